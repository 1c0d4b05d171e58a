use lettre::message::header::ContentType;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{Message, SmtpTransport, Transport};

use crate::config::SmtpConfig;
use crate::error::Result;

/// Notification seam between the orchestrator and its delivery mechanism.
pub trait Notify {
    fn notify(&self, subject: &str, body: &str) -> Result<()>;
}

/// Sends a plain-text single-part email to the fixed recipient over
/// implicit-TLS SMTP.
pub struct EmailNotifier {
    smtp: SmtpConfig,
}

impl EmailNotifier {
    pub fn new(smtp: SmtpConfig) -> Self {
        Self { smtp }
    }
}

impl Notify for EmailNotifier {
    /// Authentication, connection and send failures all propagate; the
    /// orchestrator decides what that means for the run.
    fn notify(&self, subject: &str, body: &str) -> Result<()> {
        let message = Message::builder()
            .from(self.smtp.sender.parse()?)
            .to(self.smtp.recipient.parse()?)
            .subject(subject)
            .header(ContentType::TEXT_PLAIN)
            .body(body.to_string())?;

        // relay() wraps the connection in TLS on the submissions port (465).
        let transport = SmtpTransport::relay(&self.smtp.host)?
            .credentials(Credentials::new(
                self.smtp.sender.clone(),
                self.smtp.password.clone(),
            ))
            .build();

        transport.send(&message)?;
        println!("Notification email sent to {}", self.smtp.recipient);

        Ok(())
    }
}
