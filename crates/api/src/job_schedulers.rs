use crate::reminder::ProcessDailyRemindersUseCase;
use crate::shared::usecase::execute;
use actix_web::rt::time::sleep;
use chrono::{DateTime, Duration, Utc};
use revela_domain::studio_offset;
use revela_infra::RevelaContext;
use tracing::error;

/// Millis from `now` until the next dispatch run at `dispatch_hour`
/// o'clock in the studio's timezone
pub fn millis_until_next_dispatch(now: DateTime<Utc>, dispatch_hour: u32) -> i64 {
    let local = now.with_timezone(&studio_offset()).naive_local();
    let run_today = local
        .date()
        .and_hms_opt(dispatch_hour, 0, 0)
        .expect("Dispatch hour to be a valid hour");
    let next_run = if run_today > local {
        run_today
    } else {
        run_today + Duration::days(1)
    };
    (next_run - local).num_milliseconds()
}

pub fn start_daily_reminders_job(ctx: RevelaContext) {
    actix_web::rt::spawn(async move {
        loop {
            let millis_to_next_run =
                millis_until_next_dispatch(ctx.sys.now(), ctx.config.dispatch_hour);
            sleep(std::time::Duration::from_millis(millis_to_next_run as u64)).await;

            let usecase = ProcessDailyRemindersUseCase;
            if let Err(e) = execute(usecase, &ctx).await {
                error!("Daily reminder dispatch run failed: {:?}", e);
            }
        }
    });
}
