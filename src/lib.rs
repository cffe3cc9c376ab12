pub mod api;
pub mod config;
pub mod dashboard; // Patient dashboard controller
pub mod format;
pub mod front_desk; // Doctor/patient lists, add patient, booking
pub mod models;
pub mod view;

pub use api::{ApiError, HospitalApi, HospitalClient};
pub use config::ClientConfig;
pub use dashboard::{Dashboard, SelectionOutcome};
pub use front_desk::{FormError, FrontDesk, FrontDeskError};

use tracing_subscriber::EnvFilter;

/// Install the global `tracing` subscriber.
///
/// `RUST_LOG` wins over the default filter. Calling this more than once, or
/// after the host installed its own subscriber, is a no-op.
pub fn init_tracing() {
    let installed = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config::default_log_filter())),
        )
        .try_init()
        .is_ok();

    if installed {
        tracing::info!("{} client v{}", config::APP_NAME, config::APP_VERSION);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn init_tracing_is_idempotent() {
        init_tracing();
        init_tracing();
    }
}
