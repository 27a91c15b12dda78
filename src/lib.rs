//! Story & Booking Intake Service Library
//!
//! This library crate defines the modules behind the intake server binary
//! (`main.rs`): a small HTTP service that accepts transformation stories and
//! contact/booking requests, persists each submission as one JSON file on
//! disk, and confirms bookings by email.
//!
//! ## Architecture Modules
//! The service is composed of straight-line request pipelines over a few
//! loosely coupled modules:
//!
//! - **`config`**: Environment-driven runtime configuration, including the
//!   fail-fast SMTP credential check.
//! - **`storage`**: The filesystem persistence layer. One JSON file per
//!   record, plus the binary attachment store for uploaded photos.
//! - **`stories`**: Intake and aggregation of transformation stories
//!   (multipart submission with optional photo, tolerant listing).
//! - **`contacts`**: Intake of contact/booking requests and the hand-off to
//!   the confirmation mailer.
//! - **`notify`**: The outbound SMTP transport and fire-and-forget
//!   confirmation sends.
//! - **`logging`**: The durable append-only error log with size-based
//!   rotation.

pub mod config;
pub mod contacts;
pub mod logging;
pub mod notify;
pub mod state;
pub mod storage;
pub mod stories;
