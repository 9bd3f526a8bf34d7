use log::LevelFilter;

/// Initialize the logger; `RUST_LOG` overrides `level` when set.
pub fn init_logger(level: LevelFilter) {
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .init();
}
