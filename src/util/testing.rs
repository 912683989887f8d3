//! Test logging setup shared by unit and integration tests.

use std::sync::Once;
use tracing::info;
use tracing_subscriber::{fmt::format::FmtSpan, EnvFilter};

static TEST_SETUP: Once = Once::new();

/// Install a global stderr subscriber once per test binary.
///
/// Honours `RUST_LOG`; defaults to `rectree=debug`.
pub fn init_test_setup() {
    TEST_SETUP.call_once(|| {
        let env_filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("rectree=debug"));

        let result = tracing_subscriber::fmt()
            .with_env_filter(env_filter)
            .with_target(true)
            .with_span_events(FmtSpan::CLOSE)
            .with_test_writer()
            .try_init();

        if let Err(e) = result {
            eprintln!("Error: Failed to set up logging: {}", e);
        }
        info!("Test Setup complete");
    });
}
