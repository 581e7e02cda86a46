use super::IReminderRepo;
use crate::repos::shared::repo::DeleteResult;

use chrono::NaiveDate;
use revela_domain::{DeliveryState, Reminder, ReminderType, ID};
use sqlx::{types::Uuid, FromRow, PgPool};

pub struct PostgresReminderRepo {
    pool: PgPool,
}

impl PostgresReminderRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct ReminderRaw {
    reminder_uid: Uuid,
    due_date: NaiveDate,
    client_name: String,
    description: String,
    reminder_type: String,
    session_uid: Option<Uuid>,
    invoice_uid: Option<Uuid>,
    sent_at: Option<i64>,
    created: i64,
    updated: i64,
}

impl From<ReminderRaw> for Reminder {
    fn from(raw: ReminderRaw) -> Self {
        Self {
            id: raw.reminder_uid.into(),
            due_date: raw.due_date,
            client_name: raw.client_name,
            description: raw.description,
            reminder_type: ReminderType::parse(&raw.reminder_type),
            session_id: raw.session_uid.map(Into::into),
            invoice_id: raw.invoice_uid.map(Into::into),
            delivery: match raw.sent_at {
                Some(at) => DeliveryState::Sent { at },
                None => DeliveryState::Pending,
            },
            created: raw.created,
            updated: raw.updated,
        }
    }
}

#[async_trait::async_trait]
impl IReminderRepo for PostgresReminderRepo {
    async fn insert(&self, reminder: &Reminder) -> anyhow::Result<()> {
        sqlx::query(
            r#"
            INSERT INTO reminders
            (reminder_uid, due_date, client_name, description, reminder_type, session_uid, invoice_uid, sent_at, created, updated)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            "#,
        )
        .bind(*reminder.id.inner_ref())
        .bind(reminder.due_date)
        .bind(&reminder.client_name)
        .bind(&reminder.description)
        .bind(reminder.reminder_type.as_str())
        .bind(reminder.session_id.as_ref().map(|id| *id.inner_ref()))
        .bind(reminder.invoice_id.as_ref().map(|id| *id.inner_ref()))
        .bind(reminder.sent_at())
        .bind(reminder.created)
        .bind(reminder.updated)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn find_pending(&self) -> anyhow::Result<Vec<Reminder>> {
        let reminders: Vec<ReminderRaw> = sqlx::query_as(
            r#"
            SELECT * FROM reminders
            WHERE sent_at IS NULL
            ORDER BY due_date ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(reminders.into_iter().map(Into::into).collect())
    }

    async fn find_by_session(&self, session_id: &ID) -> Vec<Reminder> {
        sqlx::query_as(
            r#"
            SELECT * FROM reminders
            WHERE session_uid = $1
            "#,
        )
        .bind(*session_id.inner_ref())
        .fetch_all(&self.pool)
        .await
        .unwrap_or_default()
        .into_iter()
        .map(|reminder: ReminderRaw| reminder.into())
        .collect()
    }

    async fn find_by_invoice(&self, invoice_id: &ID) -> Vec<Reminder> {
        sqlx::query_as(
            r#"
            SELECT * FROM reminders
            WHERE invoice_uid = $1
            "#,
        )
        .bind(*invoice_id.inner_ref())
        .fetch_all(&self.pool)
        .await
        .unwrap_or_default()
        .into_iter()
        .map(|reminder: ReminderRaw| reminder.into())
        .collect()
    }

    async fn delete_pending_by_session(
        &self,
        session_id: &ID,
        reminder_type: &ReminderType,
    ) -> anyhow::Result<DeleteResult> {
        let res = sqlx::query(
            r#"
            DELETE FROM reminders
            WHERE session_uid = $1 AND reminder_type = $2 AND sent_at IS NULL
            "#,
        )
        .bind(*session_id.inner_ref())
        .bind(reminder_type.as_str())
        .execute(&self.pool)
        .await?;

        Ok(DeleteResult {
            deleted_count: res.rows_affected() as i64,
        })
    }

    async fn delete_pending_by_invoice(
        &self,
        invoice_id: &ID,
        reminder_types: &[ReminderType],
    ) -> anyhow::Result<DeleteResult> {
        let reminder_types = reminder_types
            .iter()
            .map(|reminder_type| reminder_type.as_str().to_string())
            .collect::<Vec<_>>();

        let res = sqlx::query(
            r#"
            DELETE FROM reminders
            WHERE invoice_uid = $1 AND reminder_type = ANY($2) AND sent_at IS NULL
            "#,
        )
        .bind(*invoice_id.inner_ref())
        .bind(reminder_types)
        .execute(&self.pool)
        .await?;

        Ok(DeleteResult {
            deleted_count: res.rows_affected() as i64,
        })
    }

    async fn delete_by_session(&self, session_id: &ID) -> anyhow::Result<DeleteResult> {
        let res = sqlx::query(
            r#"
            DELETE FROM reminders
            WHERE session_uid = $1
            "#,
        )
        .bind(*session_id.inner_ref())
        .execute(&self.pool)
        .await?;

        Ok(DeleteResult {
            deleted_count: res.rows_affected() as i64,
        })
    }

    async fn mark_sent(&self, id: &ID, sent_at: i64) -> anyhow::Result<bool> {
        // The sent_at IS NULL guard makes the transition atomic, an
        // overlapping dispatch run loses the race instead of re-sending
        let res = sqlx::query(
            r#"
            UPDATE reminders
            SET sent_at = $2, updated = $2
            WHERE reminder_uid = $1 AND sent_at IS NULL
            "#,
        )
        .bind(*id.inner_ref())
        .bind(sent_at)
        .execute(&self.pool)
        .await?;

        Ok(res.rows_affected() > 0)
    }
}
