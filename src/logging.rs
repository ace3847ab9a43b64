use std::sync::Once;

static TRACING_INIT: Once = Once::new();

/// Install the stderr subscriber. `verbose` forces debug output for this
/// crate; otherwise `RUST_LOG` applies, falling back to warn.
pub fn init_tracing(verbose: bool) {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, EnvFilter};

        let filter = if verbose {
            EnvFilter::new("ledgerscope=debug")
        } else {
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("ledgerscope=warn"))
        };

        fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .with_target(false)
            .init();
    });
}
