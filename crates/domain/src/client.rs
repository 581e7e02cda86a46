use crate::shared::entity::ID;

/// Directory entry for a studio client. The directory itself is owned by
/// the surrounding application, reminders only read contact details from
/// it at dispatch time.
#[derive(Debug, Clone)]
pub struct Client {
    pub id: ID,
    pub name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    /// Soft-delete marker, deleted clients are excluded from lookups
    pub deleted: bool,
}
