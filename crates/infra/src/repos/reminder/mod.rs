mod inmemory;
mod postgres;

pub use inmemory::InMemoryReminderRepo;
pub use postgres::PostgresReminderRepo;
use revela_domain::{Reminder, ReminderType, ID};

use crate::repos::shared::repo::DeleteResult;

#[async_trait::async_trait]
pub trait IReminderRepo: Send + Sync {
    async fn insert(&self, reminder: &Reminder) -> anyhow::Result<()>;
    /// All reminders that have not been sent yet, ordered by due date
    /// ascending
    async fn find_pending(&self) -> anyhow::Result<Vec<Reminder>>;
    async fn find_by_session(&self, session_id: &ID) -> Vec<Reminder>;
    async fn find_by_invoice(&self, invoice_id: &ID) -> Vec<Reminder>;
    /// Supersede: removes pending reminders of the given type for a
    /// session, sent ones stay behind as audit trail
    async fn delete_pending_by_session(
        &self,
        session_id: &ID,
        reminder_type: &ReminderType,
    ) -> anyhow::Result<DeleteResult>;
    async fn delete_pending_by_invoice(
        &self,
        invoice_id: &ID,
        reminder_types: &[ReminderType],
    ) -> anyhow::Result<DeleteResult>;
    /// Removes every reminder tied to a session, sent or not
    async fn delete_by_session(&self, session_id: &ID) -> anyhow::Result<DeleteResult>;
    /// Conditionally transitions a reminder to sent. Returns false when
    /// the reminder was already sent, e.g. by an overlapping dispatch
    /// run, so only one writer ever wins the transition.
    async fn mark_sent(&self, id: &ID, sent_at: i64) -> anyhow::Result<bool>;
}
