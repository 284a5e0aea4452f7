//! LedgerLink.
//!
//! The crate exposes a single subject type, [`LedgerLink`], which can be
//! default-constructed and [`run`](LedgerLink::run). Everything else here is
//! the plumbing needed to drive it from the `ledgerlink` binary:
//!
//! * [`config`]: instance and logging settings (JSON file + environment).
//! * [`logging`]: `tracing` subscriber setup.
//! * [`link`]: the subject itself.

pub mod config;
pub mod link;
pub mod logging;

mod error;

pub use config::{LinkConfig, LogConfig, LogFormat};
pub use error::LedgerLinkError;
pub use link::{LedgerLink, RunOutcome};
