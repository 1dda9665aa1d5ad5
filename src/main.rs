use spacecast::{Spacecast, SpacecastConfig, SpacecastError};

fn main() -> Result<(), SpacecastError> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = match std::env::args().nth(1) {
        Some(path) => {
            log::info!("Loading config from {}", path);
            SpacecastConfig::load(&path)?
        }
        None => SpacecastConfig::default(),
    };

    Spacecast::new().with_config(config).run()
}
