use crate::shared::usecase::{execute, UseCase};
use revela_domain::{
    pickup_message, pickup_reminder_date, studio_today, DeliveryState, Reminder, ReminderType, ID,
};
use revela_infra::{IReminderRepo, RevelaContext};

/// Entry point for the session status flow. Reminder creation is a best
/// effort side effect of completing a session and must never fail the
/// session update itself.
pub async fn create_session_completed_reminder(
    client_name: &str,
    session_id: &ID,
    ctx: &RevelaContext,
) {
    let usecase = CreateSessionCompletedReminderUseCase {
        client_name: client_name.to_string(),
        session_id: session_id.clone(),
    };

    // Sideeffect, ignore result
    let _ = execute(usecase, ctx).await;
}

/// Schedules the pickup reminder for a completed photo session,
/// superseding any pending one for the same session so a client is never
/// nagged twice for the same prints.
#[derive(Debug)]
pub struct CreateSessionCompletedReminderUseCase {
    pub client_name: String,
    pub session_id: ID,
}

#[derive(Debug, PartialEq)]
pub enum UseCaseError {
    StorageError,
}

#[async_trait::async_trait(?Send)]
impl UseCase for CreateSessionCompletedReminderUseCase {
    type Response = Reminder;

    type Error = UseCaseError;

    const NAME: &'static str = "CreateSessionCompletedReminder";

    async fn execute(&mut self, ctx: &RevelaContext) -> Result<Self::Response, Self::Error> {
        ctx.repos
            .reminders
            .delete_pending_by_session(&self.session_id, &ReminderType::SessionCompleted)
            .await
            .map_err(|_| UseCaseError::StorageError)?;

        let now = ctx.sys.get_timestamp_millis();
        let reminder = Reminder {
            id: Default::default(),
            due_date: pickup_reminder_date(studio_today(ctx.sys.now())),
            client_name: self.client_name.clone(),
            description: pickup_message(),
            reminder_type: ReminderType::SessionCompleted,
            session_id: Some(self.session_id.clone()),
            invoice_id: None,
            delivery: DeliveryState::Pending,
            created: now,
            updated: now,
        };

        ctx.repos
            .reminders
            .insert(&reminder)
            .await
            .map_err(|_| UseCaseError::StorageError)?;

        Ok(reminder)
    }
}
