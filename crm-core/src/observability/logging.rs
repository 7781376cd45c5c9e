use std::sync::Once;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

static INIT: Once = Once::new();

/// Install the JSON tracing subscriber for this process.
///
/// `RUST_LOG` takes precedence over `log_level`. Repeated calls are no-ops, as
/// is a call made after another subscriber was installed.
pub fn init_tracing(service_name: &str, log_level: &str) {
    INIT.call_once(|| {
        let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(log_level));

        let installed = tracing_subscriber::registry()
            .with(env_filter)
            .with(
                tracing_subscriber::fmt::layer()
                    .with_file(true)
                    .with_line_number(true)
                    .json()
                    .flatten_event(true),
            )
            .try_init();

        match installed {
            Ok(()) => tracing::debug!(service = service_name, "Tracing initialized"),
            Err(e) => eprintln!(
                "Tracing already initialized, skipping setup for '{}': {}",
                service_name, e
            ),
        }
    });
}
