use crate::reminder::ReminderType;

/// WhatsApp template messages are maintained in Spanish only
pub const WHATSAPP_TEMPLATE_LANGUAGE: &str = "es";

/// Fixed pickup notice for completed sessions. Rendered once when the
/// reminder is created.
pub fn pickup_message() -> String {
    "¡Tus fotos impresas ya están listas! Te esperamos en el estudio Revela para que pases a recogerlas.".to_string()
}

/// Storage notice for delivered photo archives
pub fn photos_ready_message(client_name: &str, months_stored: u32) -> String {
    format!(
        "Hola {}, tus fotos digitales llevan {} meses guardadas en nuestro archivo. Escríbenos o pasa por el estudio para reclamarlas.",
        client_name, months_stored
    )
}

/// Template name registered with the WhatsApp provider for each reminder
/// category. Unmapped categories fall back to the generic template.
pub fn whatsapp_template_for(reminder_type: &ReminderType) -> &'static str {
    match reminder_type {
        ReminderType::SessionCompleted => "recordatorio_entrega_fotos",
        ReminderType::PhotosReady3Months => "recordatorio_fotos_3_meses",
        ReminderType::PhotosReady10Months => "recordatorio_fotos_10_meses",
        ReminderType::Other(_) => "recordatorio_general",
    }
}
