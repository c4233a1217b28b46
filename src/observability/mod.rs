//! Observability subsystem.
//!
//! All subsystems emit `tracing` events; `logging.rs` installs the
//! subscriber that renders them to stderr.

pub mod logging;
