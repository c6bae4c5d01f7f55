//! duebill-core
//!
//! Business logic for recurring-bill scheduling. Depends on duebill-domain.
//! Storage is reached only through the collaborator traits in [`store`];
//! no global state, no direct I/O.

pub mod error;
pub mod scheduler_service;
pub mod store;

pub use error::CoreError;
pub use scheduler_service::*;
pub use store::*;

use std::sync::Once;

static TRACING_INIT: Once = Once::new();

/// Initializes the global tracing subscriber with sensible defaults.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, EnvFilter};

        let filter =
            EnvFilter::from_default_env().add_directive("duebill_core=info".parse().unwrap());

        fmt().with_env_filter(filter).init();
    });
}
