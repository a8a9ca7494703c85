//! Tracing subscriber for the driver.
//!
//! Nothing is installed unless `RUST_LOG` is set, so normal runs pay only
//! for the disabled-callsite checks.
//!
//! ```text
//! RUST_LOG=gismo_eval=debug gismo main.gsm
//! RUST_LOG=trace GISMO_LOG_TREE=1 gismo main.gsm
//! ```

use std::sync::Once;

use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

static TRACING_INIT: Once = Once::new();

/// Install the global subscriber. Later calls do nothing.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        if std::env::var_os("RUST_LOG").is_none() {
            return;
        }
        let tree = std::env::var_os("GISMO_LOG_TREE").is_some();

        let tree_layer = tree.then(|| {
            tracing_tree::HierarchicalLayer::new(2)
                .with_targets(true)
                .with_writer(std::io::stderr)
        });
        let fmt_layer = (!tree).then(|| {
            fmt::layer()
                .with_target(true)
                .with_level(true)
                .with_writer(std::io::stderr)
        });

        // A subscriber installed elsewhere (a test harness) wins.
        let _ = tracing_subscriber::registry()
            .with(EnvFilter::from_default_env())
            .with(tree_layer)
            .with(fmt_layer)
            .try_init();
    });
}
