use lettre::message::{MultiPart, SinglePart, header};
use lettre::transport::smtp::authentication::Credentials;
use lettre::{Message, SmtpTransport, Transport};
use tracing::{debug, instrument};

use crate::config::email::EmailConfig;
use crate::modules::users::model::StoreStatus;
use crate::utils::errors::AppError;

pub struct EmailService {
    config: EmailConfig,
}

impl EmailService {
    pub fn new(config: EmailConfig) -> Self {
        Self { config }
    }

    /// Notifies a bookseller that an admin changed their store status.
    ///
    /// Callers spawn this fire-and-forget: a delivery failure is logged and
    /// never fails the approval transition itself.
    #[instrument(skip(self))]
    pub async fn send_store_status_update(
        &self,
        to_email: &str,
        username: &str,
        store_name: &str,
        status: StoreStatus,
    ) -> Result<(), AppError> {
        let (subject, verdict) = match status {
            StoreStatus::Approved => ("Your store has been approved", "approved"),
            StoreStatus::Rejected => ("Your store application was rejected", "rejected"),
            StoreStatus::Pending => ("Your store is back under review", "moved back to review"),
        };

        let text_body = format!(
            "Hi {},\n\n\
             Your store \"{}\" has been {}.\n\n\
             Best regards,\n\
             The Bookmarket Team",
            username, store_name, verdict
        );
        let html_body = format!(
            "<p>Hi <strong>{}</strong>,</p>\
             <p>Your store \"{}\" has been <strong>{}</strong>.</p>\
             <p>Best regards,<br>The Bookmarket Team</p>",
            username, store_name, verdict
        );

        self.send_email(to_email, subject, &text_body, &html_body)
            .await
    }

    #[instrument(skip(self, text_body, html_body))]
    async fn send_email(
        &self,
        to_email: &str,
        subject: &str,
        text_body: &str,
        html_body: &str,
    ) -> Result<(), AppError> {
        if !self.config.enabled {
            debug!(to = %to_email, subject = %subject, "SMTP disabled, skipping email");
            return Ok(());
        }

        let from = format!("{} <{}>", self.config.from_name, self.config.from_email);

        let email = Message::builder()
            .from(
                from.parse()
                    .map_err(|e| AppError::internal(anyhow::anyhow!("Invalid from email: {}", e)))?,
            )
            .to(to_email
                .parse()
                .map_err(|e| AppError::internal(anyhow::anyhow!("Invalid to email: {}", e)))?)
            .subject(subject)
            .multipart(
                MultiPart::alternative()
                    .singlepart(
                        SinglePart::builder()
                            .header(header::ContentType::TEXT_PLAIN)
                            .body(text_body.to_string()),
                    )
                    .singlepart(
                        SinglePart::builder()
                            .header(header::ContentType::TEXT_HTML)
                            .body(html_body.to_string()),
                    ),
            )
            .map_err(|e| AppError::internal(anyhow::anyhow!("Failed to build email: {}", e)))?;

        let mailer = if self.config.smtp_username.is_empty() {
            SmtpTransport::builder_dangerous(&self.config.smtp_host)
                .port(self.config.smtp_port)
                .build()
        } else {
            let creds = Credentials::new(
                self.config.smtp_username.clone(),
                self.config.smtp_password.clone(),
            );

            SmtpTransport::relay(&self.config.smtp_host)
                .map_err(|e| {
                    AppError::internal(anyhow::anyhow!("Failed to create SMTP relay: {}", e))
                })?
                .port(self.config.smtp_port)
                .credentials(creds)
                .build()
        };

        tokio::task::spawn_blocking(move || mailer.send(&email))
            .await
            .map_err(|e| AppError::internal(anyhow::anyhow!("Task join error: {}", e)))?
            .map_err(|e| AppError::internal(anyhow::anyhow!("Failed to send email: {}", e)))?;

        Ok(())
    }
}
