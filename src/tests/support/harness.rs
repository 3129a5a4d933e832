// Test harness setup.

use std::sync::Once;

static INIT: Once = Once::new();

/// Installs a test-writer tracing subscriber once per test binary.
/// Honors `RUST_LOG`; silent by default.
pub fn init_test_logging() {
    INIT.call_once(|| {
        use tracing_subscriber::EnvFilter;

        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("off"));
        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_test_writer()
            .try_init();
    });
}
