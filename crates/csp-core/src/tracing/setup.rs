//! Tracing initialization and configuration.

use std::sync::Once;

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

static INIT: Once = Once::new();

/// Environment variable holding the filter directives.
pub const LOG_ENV_VAR: &str = "CSP_LOG";

/// Filter used when `CSP_LOG` is unset or unparseable.
pub const DEFAULT_FILTER: &str = "csp_core=info,csp_analysis=info";

/// Initialize the CSP tracing/logging system.
///
/// Reads `CSP_LOG` for per-crate log levels.
/// Format: `CSP_LOG=csp_analysis=debug,csp_core=warn`
///
/// Falls back to [`DEFAULT_FILTER`] if `CSP_LOG` is not set or is invalid.
/// Calling it more than once is a no-op.
pub fn init_tracing() {
    INIT.call_once(|| {
        let filter = EnvFilter::try_from_env(LOG_ENV_VAR)
            .unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

        // A host application may already own the global subscriber.
        let _ = tracing_subscriber::registry()
            .with(fmt::layer().with_target(true).with_line_number(true))
            .with(filter)
            .try_init();
    });
}
