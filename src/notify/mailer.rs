use crate::config::SmtpConfig;
use crate::contacts::types::ContactRecord;
use anyhow::Context;
use lettre::message::Mailbox;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use std::sync::Arc;
use std::time::Duration;

/// How long a single SMTP conversation may take before the send is dropped.
const SEND_TIMEOUT: Duration = Duration::from_secs(30);

/// Shared SMTP transport for confirmation emails.
pub struct Mailer {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    from: Mailbox,
}

impl Mailer {
    pub fn new(config: &SmtpConfig) -> anyhow::Result<Self> {
        let transport = AsyncSmtpTransport::<Tokio1Executor>::relay(&config.host)
            .with_context(|| format!("invalid SMTP relay {}", config.host))?
            .credentials(Credentials::new(
                config.username.clone(),
                config.password.clone(),
            ))
            .timeout(Some(SEND_TIMEOUT))
            .build();
        let from = config
            .from
            .parse()
            .with_context(|| format!("invalid MAIL_FROM mailbox {}", config.from))?;

        Ok(Self { transport, from })
    }

    /// Builds the booking confirmation addressed to the submitter.
    pub fn booking_confirmation(&self, contact: &ContactRecord) -> anyhow::Result<Message> {
        let to: Mailbox = contact
            .email
            .parse()
            .with_context(|| format!("invalid recipient address {}", contact.email))?;
        let plan = plan_label(contact);

        Message::builder()
            .from(self.from.clone())
            .to(to)
            .subject(format!("Your Booking Confirmation – {}", plan))
            .body(confirmation_body(contact, &plan))
            .context("failed to build confirmation email")
    }

    pub async fn send(&self, message: Message) -> Result<(), lettre::transport::smtp::Error> {
        self.transport.send(message).await.map(|_| ())
    }
}

/// Queues the confirmation send on a detached task.
pub fn spawn_confirmation(mailer: Arc<Mailer>, contact: ContactRecord) {
    tokio::spawn(async move {
        let message = match mailer.booking_confirmation(&contact) {
            Ok(message) => message,
            Err(e) => {
                tracing::error!("Failed to build confirmation email: {}", e);
                return;
            }
        };

        match mailer.send(message).await {
            Ok(()) => tracing::info!("Confirmation email sent to {}", contact.email),
            Err(e) => tracing::error!("Email error for {}: {}", contact.email, e),
        }
    });
}

/// An explicit plan selection wins; otherwise the free-text message is
/// sniffed for the starter plan.
pub(crate) fn plan_label(contact: &ContactRecord) -> String {
    if let Some(plan) = contact.selected_plan.as_deref() {
        if !plan.trim().is_empty() {
            return plan.trim().to_string();
        }
    }

    if contact.message.contains("Starter") {
        "Starter Plan".to_string()
    } else {
        "Selected Plan".to_string()
    }
}

pub(crate) fn confirmation_body(contact: &ContactRecord, plan: &str) -> String {
    format!(
        "Hello {},\n\n\
         Thank you for choosing the {}.\n\n\
         Here's what happens next:\n\n\
         Plan selected: {}\n\
         Contact number: {}\n\n\
         We will personally contact you within 24 hours to guide you through \
         the next steps.\n",
        contact.name, plan, plan, contact.phone
    )
}
