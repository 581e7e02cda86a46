use crate::shared::usecase::{execute, UseCase};
use revela_domain::{
    photos_ready_message, storage_reminder_dates, studio_today, DeliveryState, Reminder,
    ReminderType, ID,
};
use revela_infra::{IReminderRepo, RevelaContext};

/// Entry point for the invoice status flow, called when an invoice
/// transitions to photos-ready. Best effort side effect, never fails the
/// invoice update.
pub async fn create_photos_ready_reminders(invoice_id: &ID, client_name: &str, ctx: &RevelaContext) {
    let usecase = CreatePhotosReadyRemindersUseCase {
        invoice_id: invoice_id.clone(),
        client_name: client_name.to_string(),
    };

    // Sideeffect, ignore result
    let _ = execute(usecase, ctx).await;
}

/// Schedules the two storage notices for a delivered photo archive, three
/// and ten months out. Re-running for the same invoice supersedes the
/// pending pair instead of stacking up duplicates.
#[derive(Debug)]
pub struct CreatePhotosReadyRemindersUseCase {
    pub invoice_id: ID,
    pub client_name: String,
}

#[derive(Debug, PartialEq)]
pub enum UseCaseError {
    StorageError,
}

#[async_trait::async_trait(?Send)]
impl UseCase for CreatePhotosReadyRemindersUseCase {
    type Response = Vec<Reminder>;

    type Error = UseCaseError;

    const NAME: &'static str = "CreatePhotosReadyReminders";

    async fn execute(&mut self, ctx: &RevelaContext) -> Result<Self::Response, Self::Error> {
        ctx.repos
            .reminders
            .delete_pending_by_invoice(
                &self.invoice_id,
                &[
                    ReminderType::PhotosReady3Months,
                    ReminderType::PhotosReady10Months,
                ],
            )
            .await
            .map_err(|_| UseCaseError::StorageError)?;

        let now = ctx.sys.get_timestamp_millis();
        let (in_three_months, in_ten_months) = storage_reminder_dates(studio_today(ctx.sys.now()));

        let reminders = vec![
            Reminder {
                id: Default::default(),
                due_date: in_three_months,
                client_name: self.client_name.clone(),
                description: photos_ready_message(&self.client_name, 3),
                reminder_type: ReminderType::PhotosReady3Months,
                session_id: None,
                invoice_id: Some(self.invoice_id.clone()),
                delivery: DeliveryState::Pending,
                created: now,
                updated: now,
            },
            Reminder {
                id: Default::default(),
                due_date: in_ten_months,
                client_name: self.client_name.clone(),
                description: photos_ready_message(&self.client_name, 10),
                reminder_type: ReminderType::PhotosReady10Months,
                session_id: None,
                invoice_id: Some(self.invoice_id.clone()),
                delivery: DeliveryState::Pending,
                created: now,
                updated: now,
            },
        ];

        for reminder in &reminders {
            ctx.repos
                .reminders
                .insert(reminder)
                .await
                .map_err(|_| UseCaseError::StorageError)?;
        }

        Ok(reminders)
    }
}
