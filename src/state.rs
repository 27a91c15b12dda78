//! Shared Application State
//!
//! One instance is built at startup and layered into the router as an
//! `Extension<Arc<AppState>>`. Nothing here is mutable across requests; the
//! filesystem directories behind the stores are the only shared resource.

use crate::notify::mailer::Mailer;
use crate::storage::attachments::AttachmentStore;
use crate::storage::records::RecordStore;
use std::sync::Arc;

pub struct AppState {
    /// Story record store (`<data>/stories`).
    pub stories: RecordStore,
    /// Contact record store (`<data>/contacts`).
    pub contacts: RecordStore,
    /// Uploaded photo store (`<data>/uploads`).
    pub attachments: AttachmentStore,
    /// Confirmation mail transport; `None` when SMTP is not configured.
    pub mailer: Option<Arc<Mailer>>,
}
