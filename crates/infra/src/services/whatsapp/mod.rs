use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::error;

const GRAPH_API_BASE_URL: &str = "https://graph.facebook.com/v18.0";

#[async_trait::async_trait]
pub trait IWhatsAppService: Send + Sync {
    /// Sends a pre-approved template message. Returns whether the
    /// provider accepted the message for delivery.
    async fn send_template(
        &self,
        to_phone: &str,
        template_name: &str,
        language_code: &str,
    ) -> anyhow::Result<bool>;
}

#[derive(Debug, Serialize)]
struct TemplateLanguage {
    code: String,
}

#[derive(Debug, Serialize)]
struct TemplateMessage {
    name: String,
    language: TemplateLanguage,
}

#[derive(Debug, Serialize)]
struct SendTemplateRequest {
    messaging_product: String,
    to: String,
    #[serde(rename = "type")]
    message_type: String,
    template: TemplateMessage,
}

#[derive(Debug, Deserialize)]
struct SendTemplateResponse {
    #[serde(default)]
    messages: Vec<serde_json::Value>,
}

/// Template message client for the WhatsApp Cloud API
pub struct WhatsAppCloudService {
    client: Client,
    access_token: String,
    phone_number_id: String,
}

impl WhatsAppCloudService {
    pub fn new(client: Client, access_token: String, phone_number_id: String) -> Self {
        Self {
            client,
            access_token,
            phone_number_id,
        }
    }
}

#[async_trait::async_trait]
impl IWhatsAppService for WhatsAppCloudService {
    async fn send_template(
        &self,
        to_phone: &str,
        template_name: &str,
        language_code: &str,
    ) -> anyhow::Result<bool> {
        let body = SendTemplateRequest {
            messaging_product: "whatsapp".to_string(),
            to: to_phone.to_string(),
            message_type: "template".to_string(),
            template: TemplateMessage {
                name: template_name.to_string(),
                language: TemplateLanguage {
                    code: language_code.to_string(),
                },
            },
        };

        let res = self
            .client
            .post(&format!(
                "{}/{}/messages",
                GRAPH_API_BASE_URL, self.phone_number_id
            ))
            .bearer_auth(&self.access_token)
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                error!(
                    "[Network Error] WhatsApp Cloud API error. Error message: {:?}",
                    e
                );
                anyhow::Error::new(e)
            })?;

        if !res.status().is_success() {
            error!(
                "[Unexpected Response] WhatsApp Cloud API responded with status: {}",
                res.status()
            );
            anyhow::bail!("WhatsApp Cloud API responded with status: {}", res.status());
        }

        let res = res.json::<SendTemplateResponse>().await.map_err(|e| {
            error!(
                "[Unexpected Response] WhatsApp Cloud API response could not be parsed. Error message: {:?}",
                e
            );
            anyhow::Error::new(e)
        })?;

        Ok(!res.messages.is_empty())
    }
}

/// Stand-in used when no WhatsApp credentials are configured
pub struct DisabledWhatsAppService;

#[async_trait::async_trait]
impl IWhatsAppService for DisabledWhatsAppService {
    async fn send_template(
        &self,
        to_phone: &str,
        _template_name: &str,
        _language_code: &str,
    ) -> anyhow::Result<bool> {
        anyhow::bail!(
            "WhatsApp service is not configured, unable to send to: {}",
            to_phone
        )
    }
}
