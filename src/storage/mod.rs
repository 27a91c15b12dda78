//! Filesystem Persistence Module
//!
//! Implements the record and attachment stores backing every submission.
//!
//! ## Core Concepts
//! - **Record store**: one pretty-printed JSON file per submitted story or
//!   contact, named with a millisecond timestamp, the sanitized submitter
//!   name and a UUID token.
//! - **Attachment store**: uploaded photo bytes under a unique name; records
//!   reference attachments by path and never own the bytes.
//! - **Append-only lifecycle**: records and attachments are written once and
//!   never mutated or deleted by the server.
//! - **Tolerant reads**: listing parses every file and skips (with logging)
//!   the ones that are corrupt, so partial damage never hides the rest.

pub mod attachments;
pub mod records;
