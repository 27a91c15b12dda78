//! Outbound Mail Module
//!
//! Sends booking confirmation emails over SMTP.
//!
//! ## Core Concepts
//! - **Single transport**: built once at startup from the SMTP config and
//!   shared for the process lifetime.
//! - **Fire-and-forget**: each send runs on a detached task. The HTTP
//!   response to the submitter never waits on, or learns about, the SMTP
//!   outcome; failures are logged and never retried.
//! - **Bounded sends**: a transport-level timeout keeps a stuck SMTP
//!   conversation from holding resources indefinitely.

pub mod mailer;
