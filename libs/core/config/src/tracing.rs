use crate::Environment;
use tracing::{debug, info};
use tracing_subscriber::{prelude::*, EnvFilter};

/// Directives used when `RUST_LOG` is unset.
fn default_directives(environment: &Environment) -> &'static str {
    match environment {
        Environment::Production => "info,sea_orm=warn,sqlx=warn",
        Environment::Development => {
            "debug,shareit_server=debug,shareit_gateway=debug,sea_orm=info,sqlx=warn,hyper=info,reqwest=info"
        }
    }
}

fn env_filter(environment: &Environment) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directives(environment)))
}

/// Installs the color-eyre panic and error report hooks. Repeated calls are ignored.
pub fn install_color_eyre() {
    let _ = color_eyre::config::HookBuilder::default()
        .display_location_section(true)
        .display_env_section(false)
        .install();
}

/// Sets up the global subscriber.
///
/// Production writes flattened JSON lines, development writes pretty output.
/// Both carry a `tracing_error::ErrorLayer` so eyre reports include span traces.
/// Only the first call installs anything.
pub fn init_tracing(environment: &Environment) {
    let registry = tracing_subscriber::registry()
        .with(tracing_error::ErrorLayer::default())
        .with(env_filter(environment));

    let installed = match environment {
        Environment::Production => registry
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_target(false)
                    .flatten_event(true),
            )
            .try_init(),
        Environment::Development => registry
            .with(tracing_subscriber::fmt::layer().pretty().with_file(false))
            .try_init(),
    };

    if installed.is_ok() {
        info!(environment = ?environment, "Tracing initialized");
    } else {
        debug!("Tracing subscriber already set");
    }
}
