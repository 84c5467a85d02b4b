//! Logging utilities and structured logging support

/// Initialize the logging system from the `RUST_LOG` environment variable
pub fn init() {
    env_logger::init();
}

/// Initialize the logging system with an explicit filter
///
/// The filter uses `env_logger` syntax (for example `"grid_mesh=debug,info"`).
/// `RUST_LOG` takes precedence when set.
pub fn init_with_filter(filter: &str) {
    let env = env_logger::Env::default().default_filter_or(filter);
    if env_logger::Builder::from_env(env).try_init().is_err() {
        log::debug!("Logger already initialized, keeping existing filter");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_repeated_init_keeps_first_logger() {
        init_with_filter("grid_mesh=trace");
        init_with_filter("warn");

        log::info!("logger still usable after a second init");
    }
}
