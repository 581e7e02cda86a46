use crate::shared::usecase::UseCase;
use chrono::NaiveDate;
use revela_domain::{
    normalize_phone, studio_today, whatsapp_template_for, Client, Reminder,
    WHATSAPP_TEMPLATE_LANGUAGE,
};
use revela_infra::{IClientRepo, IEmailService, IReminderRepo, IWhatsAppService, RevelaContext};
use tracing::{error, info, warn};

/// The daily dispatch run. Finds every reminder that is due today or
/// overdue and attempts delivery over the email and WhatsApp channels.
///
/// A reminder is committed as sent when at least one channel got the
/// message out. When every attempted channel fails the reminder simply
/// stays pending and the next run picks it up again, which is the only
/// retry mechanism there is.
#[derive(Debug)]
pub struct ProcessDailyRemindersUseCase;

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct DispatchSummary {
    pub due: usize,
    pub sent: usize,
    pub still_pending: usize,
    pub dropped: usize,
}

#[derive(Debug, PartialEq)]
pub enum UseCaseError {
    StorageError,
}

enum Outcome {
    Sent,
    StillPending,
    Dropped,
}

#[async_trait::async_trait(?Send)]
impl UseCase for ProcessDailyRemindersUseCase {
    type Response = DispatchSummary;

    type Error = UseCaseError;

    const NAME: &'static str = "ProcessDailyReminders";

    async fn execute(&mut self, ctx: &RevelaContext) -> Result<Self::Response, Self::Error> {
        let today = studio_today(ctx.sys.now());

        let pending = ctx
            .repos
            .reminders
            .find_pending()
            .await
            .map_err(|_| UseCaseError::StorageError)?;

        let due = pending
            .into_iter()
            .filter(|r| r.due_date <= today)
            .collect::<Vec<_>>();

        if due.is_empty() {
            info!("No reminders due on {}", today);
            return Ok(DispatchSummary::default());
        }

        let mut summary = DispatchSummary {
            due: due.len(),
            ..Default::default()
        };

        // One reminder at a time. A failure only ever affects its own
        // record, the rest of the batch still goes out.
        for reminder in due {
            match process_reminder(&reminder, today, ctx).await {
                Outcome::Sent => summary.sent += 1,
                Outcome::StillPending => summary.still_pending += 1,
                Outcome::Dropped => summary.dropped += 1,
            }
        }

        info!("Reminder dispatch finished: {:?}", summary);
        Ok(summary)
    }
}

async fn process_reminder(reminder: &Reminder, today: NaiveDate, ctx: &RevelaContext) -> Outcome {
    if let Some(window) = ctx.config.retry_window_days {
        let days_overdue = (today - reminder.due_date).num_days();
        if days_overdue > window {
            warn!(
                "Reminder {} for client {} has been failing for {} days, giving up on it",
                reminder.id, reminder.client_name, days_overdue
            );
            mark_sent(reminder, ctx).await;
            return Outcome::Dropped;
        }
    }

    let client = match ctx
        .repos
        .clients
        .find_active_by_name(&reminder.client_name)
        .await
    {
        Ok(Some(client)) => client,
        Ok(None) => {
            // Retrying an unresolvable name forever helps nobody. The
            // notification is lost and the reminder is put to rest.
            warn!(
                "No active client named {} found for reminder {}, dropping it",
                reminder.client_name, reminder.id
            );
            mark_sent(reminder, ctx).await;
            return Outcome::Dropped;
        }
        Err(e) => {
            error!(
                "Unable to look up client {} for reminder {}: {:?}",
                reminder.client_name, reminder.id, e
            );
            return Outcome::StillPending;
        }
    };

    if attempt_delivery(reminder, &client, ctx).await {
        mark_sent(reminder, ctx).await;
        Outcome::Sent
    } else {
        Outcome::StillPending
    }
}

/// Tries both channels independently and reports whether at least one of
/// them got the message out
async fn attempt_delivery(reminder: &Reminder, client: &Client, ctx: &RevelaContext) -> bool {
    let mut delivered = false;

    if let Some(email) = &client.email {
        match ctx
            .services
            .email
            .send(email, &client.name, &reminder.description)
            .await
        {
            Ok(()) => delivered = true,
            Err(e) => error!(
                "Email delivery of reminder {} to client {} failed: {:?}",
                reminder.id, client.name, e
            ),
        }
    }

    if let Some(phone) = &client.phone {
        let to_phone = normalize_phone(phone);
        let template_name = whatsapp_template_for(&reminder.reminder_type);
        match ctx
            .services
            .whatsapp
            .send_template(&to_phone, template_name, WHATSAPP_TEMPLATE_LANGUAGE)
            .await
        {
            Ok(true) => delivered = true,
            Ok(false) => error!(
                "WhatsApp provider did not accept reminder {} for client {}",
                reminder.id, client.name
            ),
            Err(e) => error!(
                "WhatsApp delivery of reminder {} to client {} failed: {:?}",
                reminder.id, client.name, e
            ),
        }
    }

    delivered
}

async fn mark_sent(reminder: &Reminder, ctx: &RevelaContext) {
    match ctx
        .repos
        .reminders
        .mark_sent(&reminder.id, ctx.sys.get_timestamp_millis())
        .await
    {
        Ok(true) => {}
        Ok(false) => info!(
            "Reminder {} was already marked sent by an overlapping run",
            reminder.id
        ),
        Err(e) => error!("Unable to mark reminder {} as sent: {:?}", reminder.id, e),
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use chrono::prelude::*;
    use revela_domain::{pickup_message, DeliveryState, ReminderType};
    use revela_infra::ISys;
    use std::sync::{Arc, Mutex};

    struct StaticTimeSys {
        now: DateTime<Utc>,
    }
    impl ISys for StaticTimeSys {
        fn now(&self) -> DateTime<Utc> {
            self.now
        }
    }

    struct StubEmailService {
        fail: bool,
        sent: Mutex<Vec<String>>,
    }

    impl StubEmailService {
        fn succeeding() -> Arc<Self> {
            Arc::new(Self {
                fail: false,
                sent: Mutex::new(Vec::new()),
            })
        }

        fn failing() -> Arc<Self> {
            Arc::new(Self {
                fail: true,
                sent: Mutex::new(Vec::new()),
            })
        }
    }

    #[async_trait::async_trait]
    impl IEmailService for StubEmailService {
        async fn send(
            &self,
            to_email: &str,
            _to_name: &str,
            _description: &str,
        ) -> anyhow::Result<()> {
            if self.fail {
                anyhow::bail!("email provider down")
            }
            self.sent.lock().unwrap().push(to_email.to_string());
            Ok(())
        }
    }

    struct StubWhatsAppService {
        fail: bool,
        sent: Mutex<Vec<(String, String)>>,
    }

    impl StubWhatsAppService {
        fn succeeding() -> Arc<Self> {
            Arc::new(Self {
                fail: false,
                sent: Mutex::new(Vec::new()),
            })
        }

        fn failing() -> Arc<Self> {
            Arc::new(Self {
                fail: true,
                sent: Mutex::new(Vec::new()),
            })
        }
    }

    #[async_trait::async_trait]
    impl IWhatsAppService for StubWhatsAppService {
        async fn send_template(
            &self,
            to_phone: &str,
            template_name: &str,
            _language_code: &str,
        ) -> anyhow::Result<bool> {
            if self.fail {
                anyhow::bail!("whatsapp provider down")
            }
            self.sent
                .lock()
                .unwrap()
                .push((to_phone.to_string(), template_name.to_string()));
            Ok(true)
        }
    }

    fn dispatch_day() -> DateTime<Utc> {
        // 13:00 UTC is 08:00 at the studio on Jan 16th 2024
        Utc.ymd(2024, 1, 16).and_hms(13, 0, 0)
    }

    fn setup(now: DateTime<Utc>) -> RevelaContext {
        let mut ctx = RevelaContext::create_inmemory();
        ctx.sys = Arc::new(StaticTimeSys { now });
        ctx
    }

    fn pending_reminder(due_date: NaiveDate, client_name: &str) -> Reminder {
        Reminder {
            id: Default::default(),
            due_date,
            client_name: client_name.to_string(),
            description: pickup_message(),
            reminder_type: ReminderType::SessionCompleted,
            session_id: Some(Default::default()),
            invoice_id: None,
            delivery: DeliveryState::Pending,
            created: 0,
            updated: 0,
        }
    }

    fn client(name: &str, email: Option<&str>, phone: Option<&str>) -> Client {
        Client {
            id: Default::default(),
            name: name.to_string(),
            email: email.map(Into::into),
            phone: phone.map(Into::into),
            deleted: false,
        }
    }

    #[actix_web::main]
    #[test]
    async fn sends_through_email_when_it_is_the_only_channel() {
        let mut ctx = setup(dispatch_day());
        let email = StubEmailService::succeeding();
        ctx.services.email = email.clone();

        ctx.repos
            .clients
            .insert(&client("Ana", Some("ana@example.com"), None))
            .await
            .unwrap();
        ctx.repos
            .reminders
            .insert(&pending_reminder(
                NaiveDate::from_ymd_opt(2024, 1, 16).unwrap(),
                "Ana",
            ))
            .await
            .unwrap();

        let summary = ProcessDailyRemindersUseCase.execute(&ctx).await.unwrap();

        assert_eq!(summary.sent, 1);
        let email_sent = email.sent.lock().unwrap();
        assert_eq!(email_sent.len(), 1);
        assert_eq!(email_sent[0], "ana@example.com");
        assert!(ctx.repos.reminders.find_pending().await.unwrap().is_empty());
    }

    #[actix_web::main]
    #[test]
    async fn commits_when_whatsapp_succeeds_even_though_email_fails() {
        let mut ctx = setup(dispatch_day());
        let whatsapp = StubWhatsAppService::succeeding();
        ctx.services.email = StubEmailService::failing();
        ctx.services.whatsapp = whatsapp.clone();

        ctx.repos
            .clients
            .insert(&client(
                "Ana",
                Some("ana@example.com"),
                Some("300 123 4567"),
            ))
            .await
            .unwrap();
        ctx.repos
            .reminders
            .insert(&pending_reminder(
                NaiveDate::from_ymd_opt(2024, 1, 16).unwrap(),
                "Ana",
            ))
            .await
            .unwrap();

        let summary = ProcessDailyRemindersUseCase.execute(&ctx).await.unwrap();

        assert_eq!(summary.sent, 1);
        assert!(ctx.repos.reminders.find_pending().await.unwrap().is_empty());

        // The phone got normalized and the template mapped from the type
        let whatsapp_sent = whatsapp.sent.lock().unwrap();
        assert_eq!(whatsapp_sent.len(), 1);
        assert_eq!(whatsapp_sent[0].0, "573001234567");
        assert_eq!(whatsapp_sent[0].1, "recordatorio_entrega_fotos");
    }

    #[actix_web::main]
    #[test]
    async fn leaves_reminder_pending_until_a_later_run_gets_through() {
        let mut ctx = setup(dispatch_day());
        ctx.services.email = StubEmailService::failing();
        ctx.services.whatsapp = StubWhatsAppService::failing();

        ctx.repos
            .clients
            .insert(&client(
                "Ana",
                Some("ana@example.com"),
                Some("3001234567"),
            ))
            .await
            .unwrap();
        ctx.repos
            .reminders
            .insert(&pending_reminder(
                NaiveDate::from_ymd_opt(2024, 1, 16).unwrap(),
                "Ana",
            ))
            .await
            .unwrap();

        let summary = ProcessDailyRemindersUseCase.execute(&ctx).await.unwrap();
        assert_eq!(summary.still_pending, 1);
        assert_eq!(ctx.repos.reminders.find_pending().await.unwrap().len(), 1);

        // The next day the reminder is overdue but still gets retried
        ctx.sys = Arc::new(StaticTimeSys {
            now: Utc.ymd(2024, 1, 17).and_hms(13, 0, 0),
        });
        ctx.services.email = StubEmailService::succeeding();

        let summary = ProcessDailyRemindersUseCase.execute(&ctx).await.unwrap();
        assert_eq!(summary.sent, 1);
        assert!(ctx.repos.reminders.find_pending().await.unwrap().is_empty());
    }

    #[actix_web::main]
    #[test]
    async fn drops_reminders_whose_client_cannot_be_resolved() {
        let mut ctx = setup(dispatch_day());
        let email = StubEmailService::succeeding();
        ctx.services.email = email.clone();

        ctx.repos
            .reminders
            .insert(&pending_reminder(
                NaiveDate::from_ymd_opt(2024, 1, 16).unwrap(),
                "Nadie",
            ))
            .await
            .unwrap();

        let summary = ProcessDailyRemindersUseCase.execute(&ctx).await.unwrap();

        assert_eq!(summary.dropped, 1);
        assert!(email.sent.lock().unwrap().is_empty());
        // Dropped means put to rest, not retried tomorrow
        assert!(ctx.repos.reminders.find_pending().await.unwrap().is_empty());
    }

    #[actix_web::main]
    #[test]
    async fn excludes_soft_deleted_clients_from_resolution() {
        let mut ctx = setup(dispatch_day());
        let email = StubEmailService::succeeding();
        ctx.services.email = email.clone();

        ctx.repos
            .clients
            .insert(&Client {
                deleted: true,
                ..client("Ana", Some("ana@example.com"), None)
            })
            .await
            .unwrap();
        ctx.repos
            .reminders
            .insert(&pending_reminder(
                NaiveDate::from_ymd_opt(2024, 1, 16).unwrap(),
                "Ana",
            ))
            .await
            .unwrap();

        let summary = ProcessDailyRemindersUseCase.execute(&ctx).await.unwrap();

        assert_eq!(summary.dropped, 1);
        assert!(email.sent.lock().unwrap().is_empty());
    }

    #[actix_web::main]
    #[test]
    async fn ignores_future_and_already_sent_reminders() {
        let ctx = setup(dispatch_day());

        ctx.repos
            .reminders
            .insert(&pending_reminder(
                NaiveDate::from_ymd_opt(2024, 1, 17).unwrap(),
                "Ana",
            ))
            .await
            .unwrap();

        let mut sent = pending_reminder(NaiveDate::from_ymd_opt(2024, 1, 16).unwrap(), "Ana");
        sent.delivery = DeliveryState::Sent { at: 1705400000000 };
        ctx.repos.reminders.insert(&sent).await.unwrap();

        let summary = ProcessDailyRemindersUseCase.execute(&ctx).await.unwrap();

        assert_eq!(summary, DispatchSummary::default());
        assert_eq!(ctx.repos.reminders.find_pending().await.unwrap().len(), 1);
    }

    #[actix_web::main]
    #[test]
    async fn client_without_contact_methods_stays_pending() {
        let ctx = setup(dispatch_day());

        ctx.repos
            .clients
            .insert(&client("Ana", None, None))
            .await
            .unwrap();
        ctx.repos
            .reminders
            .insert(&pending_reminder(
                NaiveDate::from_ymd_opt(2024, 1, 16).unwrap(),
                "Ana",
            ))
            .await
            .unwrap();

        let summary = ProcessDailyRemindersUseCase.execute(&ctx).await.unwrap();

        assert_eq!(summary.still_pending, 1);
        assert_eq!(ctx.repos.reminders.find_pending().await.unwrap().len(), 1);
    }

    #[actix_web::main]
    #[test]
    async fn gives_up_on_reminders_outside_the_retry_window() {
        let mut ctx = setup(dispatch_day());
        ctx.config.retry_window_days = Some(3);
        let email = StubEmailService::succeeding();
        ctx.services.email = email.clone();

        ctx.repos
            .clients
            .insert(&client("Ana", Some("ana@example.com"), None))
            .await
            .unwrap();
        // Six days overdue, outside the window
        ctx.repos
            .reminders
            .insert(&pending_reminder(
                NaiveDate::from_ymd_opt(2024, 1, 10).unwrap(),
                "Ana",
            ))
            .await
            .unwrap();
        // One day overdue, still within the window
        ctx.repos
            .reminders
            .insert(&pending_reminder(
                NaiveDate::from_ymd_opt(2024, 1, 15).unwrap(),
                "Ana",
            ))
            .await
            .unwrap();

        let summary = ProcessDailyRemindersUseCase.execute(&ctx).await.unwrap();

        assert_eq!(summary.dropped, 1);
        assert_eq!(summary.sent, 1);
        assert_eq!(email.sent.lock().unwrap().len(), 1);
        assert!(ctx.repos.reminders.find_pending().await.unwrap().is_empty());
    }
}
