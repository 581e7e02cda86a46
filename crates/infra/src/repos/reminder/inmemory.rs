use super::IReminderRepo;
use crate::repos::shared::inmemory_repo::*;
use crate::repos::shared::repo::DeleteResult;
use revela_domain::{DeliveryState, Reminder, ReminderType, ID};

pub struct InMemoryReminderRepo {
    reminders: std::sync::Mutex<Vec<Reminder>>,
}

impl InMemoryReminderRepo {
    pub fn new() -> Self {
        Self {
            reminders: std::sync::Mutex::new(Vec::new()),
        }
    }
}

#[async_trait::async_trait]
impl IReminderRepo for InMemoryReminderRepo {
    async fn insert(&self, reminder: &Reminder) -> anyhow::Result<()> {
        insert(reminder, &self.reminders);
        Ok(())
    }

    async fn find_pending(&self) -> anyhow::Result<Vec<Reminder>> {
        let mut pending = find_by(&self.reminders, |r| !r.is_sent());
        pending.sort_by_key(|r| r.due_date);
        Ok(pending)
    }

    async fn find_by_session(&self, session_id: &ID) -> Vec<Reminder> {
        find_by(&self.reminders, |r| {
            r.session_id.as_ref() == Some(session_id)
        })
    }

    async fn find_by_invoice(&self, invoice_id: &ID) -> Vec<Reminder> {
        find_by(&self.reminders, |r| {
            r.invoice_id.as_ref() == Some(invoice_id)
        })
    }

    async fn delete_pending_by_session(
        &self,
        session_id: &ID,
        reminder_type: &ReminderType,
    ) -> anyhow::Result<DeleteResult> {
        Ok(delete_by(&self.reminders, |r| {
            r.session_id.as_ref() == Some(session_id)
                && r.reminder_type == *reminder_type
                && !r.is_sent()
        }))
    }

    async fn delete_pending_by_invoice(
        &self,
        invoice_id: &ID,
        reminder_types: &[ReminderType],
    ) -> anyhow::Result<DeleteResult> {
        Ok(delete_by(&self.reminders, |r| {
            r.invoice_id.as_ref() == Some(invoice_id)
                && reminder_types.contains(&r.reminder_type)
                && !r.is_sent()
        }))
    }

    async fn delete_by_session(&self, session_id: &ID) -> anyhow::Result<DeleteResult> {
        Ok(delete_by(&self.reminders, |r| {
            r.session_id.as_ref() == Some(session_id)
        }))
    }

    async fn mark_sent(&self, id: &ID, sent_at: i64) -> anyhow::Result<bool> {
        let mut reminders = self.reminders.lock().unwrap();
        for reminder in reminders.iter_mut() {
            if reminder.id == *id && !reminder.is_sent() {
                reminder.delivery = DeliveryState::Sent { at: sent_at };
                reminder.updated = sent_at;
                return Ok(true);
            }
        }
        Ok(false)
    }
}
