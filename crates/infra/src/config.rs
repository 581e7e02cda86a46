use tracing::{info, warn};

/// Hour of the studio day at which the dispatch job runs when none is
/// configured
const DEFAULT_DISPATCH_HOUR: u32 = 8;

#[derive(Debug, Clone)]
pub struct Config {
    /// Port for the application to run on
    pub port: usize,
    /// Hour (studio local time, 0-23) at which the daily reminder
    /// dispatch job runs
    pub dispatch_hour: u32,
    /// How many days a reminder may stay overdue before the dispatch job
    /// gives up on it. `None` retries indefinitely.
    pub retry_window_days: Option<i64>,
    /// Credentials for the transactional email provider. Email reminders
    /// are disabled when missing.
    pub email: Option<EmailConfig>,
    /// Credentials for the WhatsApp Cloud API. WhatsApp reminders are
    /// disabled when missing.
    pub whatsapp: Option<WhatsAppConfig>,
}

#[derive(Debug, Clone)]
pub struct EmailConfig {
    pub api_key: String,
    pub sender_name: String,
    pub sender_email: String,
}

#[derive(Debug, Clone)]
pub struct WhatsAppConfig {
    pub access_token: String,
    pub phone_number_id: String,
}

impl Config {
    pub fn new() -> Self {
        let default_port = "5000";
        let port = std::env::var("PORT").unwrap_or(default_port.into());
        let port = match port.parse::<usize>() {
            Ok(port) => port,
            Err(_) => {
                warn!(
                    "The given PORT: {} is not valid, falling back to the default port: {}.",
                    port, default_port
                );
                default_port.parse::<usize>().unwrap()
            }
        };

        let dispatch_hour = match std::env::var("REMINDERS_DISPATCH_HOUR") {
            Ok(hour) => match hour.parse::<u32>() {
                Ok(hour) if hour < 24 => hour,
                _ => {
                    warn!(
                        "The given REMINDERS_DISPATCH_HOUR: {} is not a valid hour, falling back to the default: {}.",
                        hour, DEFAULT_DISPATCH_HOUR
                    );
                    DEFAULT_DISPATCH_HOUR
                }
            },
            Err(_) => DEFAULT_DISPATCH_HOUR,
        };

        let retry_window_days = match std::env::var("REMINDERS_RETRY_WINDOW_DAYS") {
            Ok(days) => match days.parse::<i64>() {
                Ok(days) if days >= 0 => Some(days),
                _ => {
                    warn!(
                        "The given REMINDERS_RETRY_WINDOW_DAYS: {} is not valid, overdue reminders will be retried indefinitely.",
                        days
                    );
                    None
                }
            },
            Err(_) => None,
        };

        let email = match std::env::var("EMAIL_API_KEY") {
            Ok(api_key) => Some(EmailConfig {
                api_key,
                sender_name: std::env::var("EMAIL_SENDER_NAME")
                    .unwrap_or_else(|_| "Estudio Revela".into()),
                sender_email: std::env::var("EMAIL_SENDER_ADDRESS")
                    .unwrap_or_else(|_| "recordatorios@revela.studio".into()),
            }),
            Err(_) => {
                info!("Did not find EMAIL_API_KEY environment variable. Email reminders will be disabled.");
                None
            }
        };

        let whatsapp = match (
            std::env::var("WHATSAPP_ACCESS_TOKEN"),
            std::env::var("WHATSAPP_PHONE_NUMBER_ID"),
        ) {
            (Ok(access_token), Ok(phone_number_id)) => Some(WhatsAppConfig {
                access_token,
                phone_number_id,
            }),
            _ => {
                info!("Did not find WHATSAPP_ACCESS_TOKEN and WHATSAPP_PHONE_NUMBER_ID environment variables. WhatsApp reminders will be disabled.");
                None
            }
        };

        Self {
            port,
            dispatch_hour,
            retry_window_days,
            email,
            whatsapp,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}
