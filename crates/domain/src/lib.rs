mod client;
mod date;
mod message;
mod phone;
mod reminder;
mod scheduling;
mod shared;

pub use client::Client;
pub use message::{
    photos_ready_message, pickup_message, whatsapp_template_for, WHATSAPP_TEMPLATE_LANGUAGE,
};
pub use phone::normalize_phone;
pub use reminder::{DeliveryState, Reminder, ReminderType};
pub use scheduling::{
    pickup_reminder_date, same_calendar_day, storage_reminder_dates, studio_offset, studio_today,
};
pub use shared::entity::ID;
