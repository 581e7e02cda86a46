mod create_photos_ready_reminders;
mod create_session_completed_reminder;
mod delete_session_reminders;
mod process_daily_reminders;

pub use create_photos_ready_reminders::{
    create_photos_ready_reminders, CreatePhotosReadyRemindersUseCase,
};
pub use create_session_completed_reminder::{
    create_session_completed_reminder, CreateSessionCompletedReminderUseCase,
};
pub use delete_session_reminders::{delete_session_reminders, DeleteSessionRemindersUseCase};
pub use process_daily_reminders::{DispatchSummary, ProcessDailyRemindersUseCase};
