//! Configuration types for the session consolidation pipeline.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::core::normalize::DecimalSep;

/// One telemetry subsystem: the folder its logs land in and the decimal
/// convention its files are written with. The subsystem name doubles as
/// the destination worksheet name.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubsystemConfig {
    /// Subsystem (and worksheet) name.
    pub name: String,

    /// Log folder, resolved against the base path when relative.
    pub folder: PathBuf,

    /// Decimal separator convention of this subsystem's files.
    #[serde(default)]
    pub decimal: DecimalSep,
}

/// Filename classification rule for the shared moving-registers folder.
///
/// Rules are evaluated in order; the first keyword found in a file name
/// wins. A file matching no rule is excluded from the session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClassificationRule {
    /// Case-sensitive substring looked up in the file name.
    pub keyword: String,

    /// Destination worksheet for a matching file.
    pub sheet: String,

    /// Decimal separator convention for a matching file.
    #[serde(default)]
    pub decimal: DecimalSep,
}

/// Main pipeline configuration: the subsystem catalog plus the two
/// special-cased folder roles.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Root the relative folders below are resolved against.
    #[serde(default = "default_base_path")]
    pub base_path: PathBuf,

    /// Standard subsystems, in worksheet order.
    #[serde(default = "default_subsystems")]
    pub subsystems: Vec<SubsystemConfig>,

    /// Shared folder holding obstacle and movement registers.
    #[serde(default = "default_moving_folder")]
    pub moving_folder: PathBuf,

    /// Classification rules for the moving-registers folder.
    #[serde(default = "default_moving_rules")]
    pub moving_rules: Vec<ClassificationRule>,

    /// Folder holding the per-session analytics summary.
    #[serde(default = "default_analytics_folder")]
    pub analytics_folder: PathBuf,

    /// Worksheet name for the analytics summary.
    #[serde(default = "default_analytics_sheet")]
    pub analytics_sheet: String,

    /// Decimal separator convention of the analytics files.
    #[serde(default)]
    pub analytics_decimal: DecimalSep,

    /// Folder that receives one sub-folder per participant.
    #[serde(default = "default_participants_base")]
    pub participants_base: PathBuf,
}

fn default_base_path() -> PathBuf {
    PathBuf::from(".")
}

fn default_subsystems() -> Vec<SubsystemConfig> {
    vec![
        subsystem("Orientation", "JetpackSystem/JetpackLogs", DecimalSep::Dot),
        subsystem("Trajectory", "JetpackSystem/Trajectory", DecimalSep::Dot),
        subsystem("Landing", "LandingSystem", DecimalSep::Dot),
        subsystem("Multitasking", "MultitaskSystem", DecimalSep::Dot),
        subsystem("Jitter", "JitterSystem/JitterLogs", DecimalSep::Comma),
    ]
}

fn subsystem(name: &str, folder: &str, decimal: DecimalSep) -> SubsystemConfig {
    SubsystemConfig {
        name: name.to_string(),
        folder: PathBuf::from(folder),
        decimal,
    }
}

fn default_moving_folder() -> PathBuf {
    PathBuf::from("MovingSystem/Registers")
}

fn default_moving_rules() -> Vec<ClassificationRule> {
    vec![
        ClassificationRule {
            keyword: "ObstacleGateMetrics".to_string(),
            sheet: "Obstacle".to_string(),
            decimal: DecimalSep::Dot,
        },
        ClassificationRule {
            keyword: "MovementMetrics".to_string(),
            sheet: "Movement".to_string(),
            decimal: DecimalSep::Comma,
        },
    ]
}

fn default_analytics_folder() -> PathBuf {
    PathBuf::from("Analytics/Registers")
}

fn default_analytics_sheet() -> String {
    "General Stats".to_string()
}

fn default_participants_base() -> PathBuf {
    PathBuf::from("RegistersPerName")
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            base_path: default_base_path(),
            subsystems: default_subsystems(),
            moving_folder: default_moving_folder(),
            moving_rules: default_moving_rules(),
            analytics_folder: default_analytics_folder(),
            analytics_sheet: default_analytics_sheet(),
            analytics_decimal: DecimalSep::default(),
            participants_base: default_participants_base(),
        }
    }
}

impl SessionConfig {
    /// Load configuration from a YAML file.
    pub fn from_yaml<P: AsRef<Path>>(path: P) -> Result<Self, Box<dyn std::error::Error>> {
        let content = std::fs::read_to_string(path)?;
        let config: SessionConfig = serde_yaml::from_str(&content)?;
        Ok(config)
    }

    /// Save configuration to a YAML file.
    pub fn to_yaml<P: AsRef<Path>>(&self, path: P) -> Result<(), Box<dyn std::error::Error>> {
        let content = serde_yaml::to_string(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Resolve a configured folder against the base path.
    pub fn resolve(&self, folder: &Path) -> PathBuf {
        if folder.is_absolute() {
            folder.to_path_buf()
        } else {
            self.base_path.join(folder)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_catalog() {
        let config = SessionConfig::default();

        assert_eq!(config.subsystems.len(), 5);
        assert_eq!(config.subsystems[0].name, "Orientation");
        assert_eq!(config.subsystems[4].name, "Jitter");
        assert_eq!(config.subsystems[4].decimal, DecimalSep::Comma);

        assert_eq!(config.moving_rules[0].sheet, "Obstacle");
        assert_eq!(config.moving_rules[0].decimal, DecimalSep::Dot);
        assert_eq!(config.moving_rules[1].sheet, "Movement");
        assert_eq!(config.moving_rules[1].decimal, DecimalSep::Comma);

        assert_eq!(config.analytics_sheet, "General Stats");
        assert_eq!(config.analytics_decimal, DecimalSep::Dot);
    }

    #[test]
    fn test_resolve_relative_and_absolute() {
        let mut config = SessionConfig::default();
        config.base_path = PathBuf::from("/data/session");

        assert_eq!(
            config.resolve(Path::new("LandingSystem")),
            PathBuf::from("/data/session/LandingSystem")
        );
        assert_eq!(
            config.resolve(Path::new("/var/logs")),
            PathBuf::from("/var/logs")
        );
    }

    #[test]
    fn test_yaml_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("pipeline.yaml");

        let config = SessionConfig::default();
        config.to_yaml(&path).unwrap();

        let loaded = SessionConfig::from_yaml(&path).unwrap();
        assert_eq!(loaded.subsystems.len(), config.subsystems.len());
        assert_eq!(loaded.subsystems[4].decimal, DecimalSep::Comma);
        assert_eq!(loaded.analytics_sheet, config.analytics_sheet);
    }

    #[test]
    fn test_partial_yaml_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("pipeline.yaml");
        std::fs::write(&path, "base_path: /data/session\n").unwrap();

        let config = SessionConfig::from_yaml(&path).unwrap();
        assert_eq!(config.base_path, PathBuf::from("/data/session"));
        assert_eq!(config.subsystems.len(), 5);
        assert_eq!(config.analytics_sheet, "General Stats");
    }
}
