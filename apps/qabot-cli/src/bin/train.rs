use qabot_core::config::expand_path;

fn main() -> anyhow::Result<()> {
    qabot_cli::init_tracing();
    let mut settings = qabot_cli::load_settings()?;
    if let Some(path) = std::env::args().nth(1) {
        settings.paths.dataset = expand_path(path);
    }
    qabot_cli::finish(qabot_cli::run_train(&settings))
}
