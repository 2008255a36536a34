use env_logger::Env;

/// Initializes `env_logger`, logging at `info` unless `RUST_LOG` says otherwise.
pub fn init() {
    // already initialized is fine
    let _ = env_logger::Builder::from_env(Env::default().default_filter_or("info"))
        .format_target(false)
        .try_init();
}
