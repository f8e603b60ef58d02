//! Session consolidation across the subsystem catalog.
//!
//! Walks the configured catalog, picks the newest log file per subsystem,
//! loads each one through the ragged CSV loader and assembles the ordered
//! list of datasets the workbook writer persists. Missing folders and
//! unrecognized files downgrade to a warning and a skipped sheet; a
//! structurally broken file that was actually selected aborts the run — a
//! missing sheet is safer than a wrong one.

use std::path::Path;

use anyhow::{Context, Result};

use crate::config::{ClassificationRule, SessionConfig};
use crate::core::loaders::{load_ragged_csv, NamedDataset};

use super::selection::latest_csv_files;

/// Collect the consolidated datasets for one session run.
///
/// Sheet order is: configured subsystems (catalog order), then the
/// classified moving registers (rule order), then the analytics summary.
/// Per-source `[OK]`/`[WARN]` lines are printed to the console as the
/// catalog is walked; they are observational, not part of the result.
pub fn collect_session(config: &SessionConfig) -> Result<Vec<NamedDataset>> {
    let mut datasets = Vec::new();

    // Standard subsystems: newest file per folder, one sheet each.
    for sub in &config.subsystems {
        let folder = config.resolve(&sub.folder);
        let latest = latest_csv_files(&folder, 1)
            .with_context(|| format!("listing {}", folder.display()))?;

        let Some(csv_path) = latest.first() else {
            println!("[WARN] No CSV in: {}", folder.display());
            continue;
        };

        println!("[OK] {} -> {}", sub.name, file_name(csv_path));
        let table = load_ragged_csv(csv_path, sub.decimal)
            .with_context(|| format!("loading {}", csv_path.display()))?;
        datasets.push(NamedDataset {
            sheet: sub.name.clone(),
            table,
        });
    }

    // Moving registers: the two newest files from the shared folder,
    // classified by filename keyword. A later file matching an
    // already-filled rule slot replaces it.
    let moving_folder = config.resolve(&config.moving_folder);
    let last_two = latest_csv_files(&moving_folder, 2)
        .with_context(|| format!("listing {}", moving_folder.display()))?;

    let mut classified: Vec<Option<NamedDataset>> = vec![None; config.moving_rules.len()];
    for csv_path in &last_two {
        let name = file_name(csv_path);
        match classify(&config.moving_rules, &name) {
            Some((slot, rule)) => {
                println!("[OK] {} -> {}", rule.sheet, name);
                let table = load_ragged_csv(csv_path, rule.decimal)
                    .with_context(|| format!("loading {}", csv_path.display()))?;
                classified[slot] = Some(NamedDataset {
                    sheet: rule.sheet.clone(),
                    table,
                });
            }
            None => println!("[WARN] Unrecognized CSV: {name}"),
        }
    }
    datasets.extend(classified.into_iter().flatten());

    // Analytics summary: newest file, fixed sheet name.
    let analytics_folder = config.resolve(&config.analytics_folder);
    let latest = latest_csv_files(&analytics_folder, 1)
        .with_context(|| format!("listing {}", analytics_folder.display()))?;

    match latest.first() {
        Some(csv_path) => {
            println!("[OK] {} -> {}", config.analytics_sheet, file_name(csv_path));
            let table = load_ragged_csv(csv_path, config.analytics_decimal)
                .with_context(|| format!("loading {}", csv_path.display()))?;
            datasets.push(NamedDataset {
                sheet: config.analytics_sheet.clone(),
                table,
            });
        }
        None => println!("[WARN] No CSV in: {}", analytics_folder.display()),
    }

    Ok(datasets)
}

/// First rule whose keyword appears in the file name wins.
fn classify<'a>(
    rules: &'a [ClassificationRule],
    file_name: &str,
) -> Option<(usize, &'a ClassificationRule)> {
    rules
        .iter()
        .enumerate()
        .find(|(_, rule)| file_name.contains(&rule.keyword))
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default()
}
