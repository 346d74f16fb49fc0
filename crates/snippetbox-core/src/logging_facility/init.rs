//! Logging initialization module

use std::sync::Once;
use tracing_subscriber::{util::SubscriberInitExt, EnvFilter};

/// Logging profile configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Profile {
    /// Human-readable output for development
    Development,
    /// JSON structured output for production
    Production,
    /// Bare registry; tests install their own capture layer
    Test,
}

static INIT_ONCE: Once = Once::new();

/// Initialize the logging facility
///
/// Call once at startup; later calls are no-ops.
///
/// - **Development**: human-readable logs, `snippetbox=debug` unless `RUST_LOG` is set
/// - **Production**: JSON logs, `snippetbox=info` unless `RUST_LOG` is set
/// - **Test**: no output
pub fn init(profile: Profile) {
    INIT_ONCE.call_once(|| match profile {
        Profile::Development => {
            tracing_subscriber::fmt()
                .with_env_filter(
                    EnvFilter::try_from_default_env()
                        .unwrap_or_else(|_| EnvFilter::new("snippetbox=debug")),
                )
                .finish()
                .try_init()
                .ok();
        }
        Profile::Production => {
            tracing_subscriber::fmt()
                .json()
                .with_env_filter(
                    EnvFilter::try_from_default_env()
                        .unwrap_or_else(|_| EnvFilter::new("snippetbox=info")),
                )
                .finish()
                .try_init()
                .ok();
        }
        Profile::Test => {
            tracing_subscriber::registry().try_init().ok();
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_idempotent() {
        init(Profile::Test);
        init(Profile::Test);
        init(Profile::Development);
    }

    #[test]
    fn test_profile_equality() {
        assert_eq!(Profile::Development, Profile::Development);
        assert_ne!(Profile::Development, Profile::Production);
    }
}
