use reqwest::Client;
use serde::Serialize;
use tracing::error;

const BREVO_API_BASE_URL: &str = "https://api.brevo.com/v3";
const REMINDER_EMAIL_SUBJECT: &str = "Recordatorio de tu estudio fotográfico Revela";

#[async_trait::async_trait]
pub trait IEmailService: Send + Sync {
    async fn send(&self, to_email: &str, to_name: &str, description: &str) -> anyhow::Result<()>;
}

#[derive(Debug, Clone, Serialize)]
struct EmailParty {
    name: String,
    email: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct SendEmailRequest {
    sender: EmailParty,
    to: Vec<EmailParty>,
    subject: String,
    text_content: String,
}

/// Transactional email client for the Brevo REST API
pub struct BrevoEmailService {
    client: Client,
    api_key: String,
    sender: EmailParty,
}

impl BrevoEmailService {
    pub fn new(client: Client, api_key: String, sender_name: String, sender_email: String) -> Self {
        Self {
            client,
            api_key,
            sender: EmailParty {
                name: sender_name,
                email: sender_email,
            },
        }
    }
}

#[async_trait::async_trait]
impl IEmailService for BrevoEmailService {
    async fn send(&self, to_email: &str, to_name: &str, description: &str) -> anyhow::Result<()> {
        let body = SendEmailRequest {
            sender: self.sender.clone(),
            to: vec![EmailParty {
                name: to_name.to_string(),
                email: to_email.to_string(),
            }],
            subject: REMINDER_EMAIL_SUBJECT.to_string(),
            text_content: description.to_string(),
        };

        let res = self
            .client
            .post(&format!("{}/smtp/email", BREVO_API_BASE_URL))
            .header("api-key", &self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                error!("[Network Error] Email API error. Error message: {:?}", e);
                anyhow::Error::new(e)
            })?;

        if !res.status().is_success() {
            error!(
                "[Unexpected Response] Email API responded with status: {}",
                res.status()
            );
            anyhow::bail!("Email API responded with status: {}", res.status());
        }

        Ok(())
    }
}

/// Stand-in used when no email credentials are configured
pub struct DisabledEmailService;

#[async_trait::async_trait]
impl IEmailService for DisabledEmailService {
    async fn send(&self, to_email: &str, _to_name: &str, _description: &str) -> anyhow::Result<()> {
        anyhow::bail!(
            "Email service is not configured, unable to send to: {}",
            to_email
        )
    }
}
