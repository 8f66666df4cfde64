/**
 * Outgoing Email
 *
 * Verification emails are sent through an SMTP relay (STARTTLS). The
 * transport is an optional service: if the SMTP environment variables are
 * not set the server runs without it and verification emails are skipped.
 *
 * Send failures are logged and never fail the triggering request; the
 * user's verification token stays valid for the resend endpoint.
 */

use lettre::message::header::ContentType;
use lettre::message::Mailbox;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};

const DEFAULT_FROM: &str = "Phonebook <no-reply@phonebook.example>";

/// Async SMTP mail transport plus the pieces needed to compose mail
#[derive(Clone)]
pub struct Mailer {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    from: Mailbox,
    base_url: String,
}

impl Mailer {
    /// Build the mailer from `SMTP_HOST`/`SMTP_USER`/`SMTP_PASS`
    ///
    /// Returns `None` when the transport is not configured; the caller
    /// decides whether that is fatal (it is not, here).
    pub fn from_env() -> Option<Self> {
        let host = std::env::var("SMTP_HOST").ok()?;
        let user = std::env::var("SMTP_USER").ok()?;
        let pass = std::env::var("SMTP_PASS").ok()?;

        let from_addr =
            std::env::var("SMTP_FROM").unwrap_or_else(|_| DEFAULT_FROM.to_string());
        let from: Mailbox = match from_addr.parse() {
            Ok(mailbox) => mailbox,
            Err(err) => {
                tracing::error!("Invalid SMTP_FROM address {:?}: {}", from_addr, err);
                return None;
            }
        };

        let transport = match AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&host) {
            Ok(builder) => builder.credentials(Credentials::new(user, pass)).build(),
            Err(err) => {
                tracing::error!("Failed to build SMTP transport for {}: {}", host, err);
                return None;
            }
        };

        let base_url =
            std::env::var("BASE_URL").unwrap_or_else(|_| "http://localhost:3000".to_string());

        Some(Self {
            transport,
            from,
            base_url,
        })
    }

    /// Send a verification email with a link embedding the one-time token
    ///
    /// Failures are logged and swallowed.
    pub async fn send_verification(&self, to: &str, token: &str) {
        let link = format!("{}/api/users/verify/{}", self.base_url, token);

        let to_mailbox: Mailbox = match to.parse() {
            Ok(mailbox) => mailbox,
            Err(err) => {
                tracing::error!("Invalid recipient address: {}", err);
                return;
            }
        };

        let body = format!(
            "<p>Welcome! Please confirm your email address by following \
             <a href=\"{link}\">this link</a>.</p>"
        );

        let message = match Message::builder()
            .from(self.from.clone())
            .to(to_mailbox)
            .subject("Verify your email")
            .header(ContentType::TEXT_HTML)
            .body(body)
        {
            Ok(message) => message,
            Err(err) => {
                tracing::error!("Failed to compose verification email: {}", err);
                return;
            }
        };

        match self.transport.send(message).await {
            Ok(_) => tracing::info!("Verification email sent"),
            Err(err) => tracing::error!("Error sending verification email: {}", err),
        }
    }
}
