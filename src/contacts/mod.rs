//! Contact Intake Module
//!
//! Handles contact/booking request submissions.
//!
//! ## Workflow
//! 1. **Validate**: all four fields (name, email, phone, message) are
//!    required; nothing is written on failure.
//! 2. **Persist**: one `contact-*.json` record per submission.
//! 3. **Confirm**: hand the record to the mailer for a fire-and-forget
//!    confirmation send; the HTTP response never waits on SMTP.

pub mod handlers;
pub mod types;

#[cfg(test)]
mod tests;
