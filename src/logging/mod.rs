//! Durable Error Log
//!
//! A process-wide failure journal, separate from the `tracing` console
//! output. Every storage or parse failure lands here as one timestamped line
//! so lost submissions can be audited after the fact.
//!
//! ## Behavior
//! - **Append-only**: the server never truncates or rewrites existing lines.
//! - **Rotation**: once the file crosses the configured size threshold it is
//!   renamed to `error.log.1` (replacing the previous rotation) and a fresh
//!   file is started.
//! - **Non-fatal**: a failure to write the log itself is reported on the
//!   console and swallowed; it never fails the request being logged.

pub mod errlog;
