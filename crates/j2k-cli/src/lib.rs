//! Batch rendering of resolved Java-to-Kotlin expression trees.
//!
//! Reads program units serialized as JSON, renders them with
//! [`j2k_syntax::KotlinWriter`] (in parallel by default), and formats the
//! result as text or JSON. Configuration is layered the same way for every
//! command: built-in defaults, the global config file, the project's
//! `.j2k/config.toml`, then command-line flags.

pub mod batch;
pub mod config;
pub mod error;

pub use batch::{RenderedUnit, format_json, format_text, read_units, render_units};
pub use config::{BatchConfig, CommentMode, J2kConfig, RenderConfig};
pub use error::{Error, Result};

/// Install the stderr tracing subscriber.
///
/// `RUST_LOG` wins when set; otherwise `verbosity` picks the level for this
/// project's crates (0 = warn, 1 = info, 2+ = debug).
pub fn init_tracing(verbosity: u8) {
    use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

    let level = match verbosity {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("j2k={level}")));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .with_thread_ids(false),
        )
        .init();
}
