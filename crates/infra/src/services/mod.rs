mod email;
mod whatsapp;

pub use email::{BrevoEmailService, DisabledEmailService, IEmailService};
pub use whatsapp::{DisabledWhatsAppService, IWhatsAppService, WhatsAppCloudService};

use crate::config::Config;
use std::sync::Arc;
use std::time::Duration;
use tracing::warn;

/// Upper bound on a single provider call so one slow channel cannot
/// stall a whole dispatch run
const SENDER_TIMEOUT_SECS: u64 = 10;

/// Notification senders owned by the composition root and handed to the
/// use cases. Channels without credentials get a disabled stand-in that
/// fails every send, which the dispatch job treats like any other
/// channel failure.
#[derive(Clone)]
pub struct Services {
    pub email: Arc<dyn IEmailService>,
    pub whatsapp: Arc<dyn IWhatsAppService>,
}

impl Services {
    pub fn from_config(config: &Config) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(SENDER_TIMEOUT_SECS))
            .build()
            .expect("HTTP client for the notification providers to be created");

        let email: Arc<dyn IEmailService> = match &config.email {
            Some(email_config) => Arc::new(BrevoEmailService::new(
                client.clone(),
                email_config.api_key.clone(),
                email_config.sender_name.clone(),
                email_config.sender_email.clone(),
            )),
            None => {
                warn!("Starting without an email sender, email reminders will not be delivered.");
                Arc::new(DisabledEmailService)
            }
        };

        let whatsapp: Arc<dyn IWhatsAppService> = match &config.whatsapp {
            Some(whatsapp_config) => Arc::new(WhatsAppCloudService::new(
                client,
                whatsapp_config.access_token.clone(),
                whatsapp_config.phone_number_id.clone(),
            )),
            None => {
                warn!(
                    "Starting without a WhatsApp sender, WhatsApp reminders will not be delivered."
                );
                Arc::new(DisabledWhatsAppService)
            }
        };

        Self { email, whatsapp }
    }

    pub fn create_disabled() -> Self {
        Self {
            email: Arc::new(DisabledEmailService),
            whatsapp: Arc::new(DisabledWhatsAppService),
        }
    }
}
