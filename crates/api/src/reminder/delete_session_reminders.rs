use crate::shared::usecase::{execute, UseCase};
use revela_domain::ID;
use revela_infra::{DeleteResult, IReminderRepo, RevelaContext};

/// Entry point for the session status flow, called when a session is
/// claimed and any outstanding pickup nag should be cancelled. Best
/// effort side effect, never fails the session update.
pub async fn delete_session_reminders(session_id: &ID, ctx: &RevelaContext) {
    let usecase = DeleteSessionRemindersUseCase {
        session_id: session_id.clone(),
    };

    // Sideeffect, ignore result
    let _ = execute(usecase, ctx).await;
}

/// Removes every reminder tied to a session, whatever its type or
/// delivery state.
#[derive(Debug)]
pub struct DeleteSessionRemindersUseCase {
    pub session_id: ID,
}

#[derive(Debug, PartialEq)]
pub enum UseCaseError {
    StorageError,
}

#[async_trait::async_trait(?Send)]
impl UseCase for DeleteSessionRemindersUseCase {
    type Response = DeleteResult;

    type Error = UseCaseError;

    const NAME: &'static str = "DeleteSessionReminders";

    async fn execute(&mut self, ctx: &RevelaContext) -> Result<Self::Response, Self::Error> {
        ctx.repos
            .reminders
            .delete_by_session(&self.session_id)
            .await
            .map_err(|_| UseCaseError::StorageError)
    }
}
