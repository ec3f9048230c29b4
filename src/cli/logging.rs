/// Installs the logger for the binary. `RUST_LOG` overrides `level`.
pub fn init_logging(level: log::LevelFilter) {
    env_logger::builder()
        .filter_level(level)
        .parse_default_env()
        .format_timestamp(None)
        .init();
}

/// Debug-level logger captured by the test harness; safe to call from every test.
pub fn init_test_logging() {
    let _ = env_logger::builder()
        .filter_level(log::LevelFilter::Debug)
        .is_test(true)
        .try_init();
}
