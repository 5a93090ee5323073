//! Library side of the qmcb command-line interface.
//!
//! The `qmcb` binary parses arguments and dispatches into [`commands`]. The
//! request and target-library loaders are re-exported for reuse.

pub mod commands;

pub use commands::common::{load_library, load_request};
