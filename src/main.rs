use carplay_music::{app_core::CarPlayMusic, config::Config, logging};

fn main() -> anyhow::Result<()> {
    let config = Config::load()?;
    let log_path = logging::init_logging(&config)?;
    tracing::info!(log = %log_path.display(), "starting carplay-music");

    CarPlayMusic::new(&config)?.run()?;
    Ok(())
}
