fn main() {
    session_pipeline::cli::run();
}
