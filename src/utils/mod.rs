pub mod persistence;

use std::{fs, io, path::Path, sync::Once};

static TRACING_INIT: Once = Once::new();

const DEFAULT_FILTER: &str = "expense_categorizer=info";

/// Initializes the global tracing subscriber. `RUST_LOG` overrides the
/// default filter; events go to stderr so they never mix with command output.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, EnvFilter};

        let filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

        fmt().with_env_filter(filter).with_writer(io::stderr).init();
    });
}

/// Creates `path` and any missing parents.
pub fn ensure_dir(path: &Path) -> io::Result<()> {
    if !path.exists() {
        fs::create_dir_all(path)?;
    }
    Ok(())
}
