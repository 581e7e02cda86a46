use crate::shared::entity::ID;
use chrono::NaiveDate;

/// What triggered a `Reminder`. The set is open ended: rows written by a
/// newer version of the application survive a round trip through the
/// store as [`ReminderType::Other`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReminderType {
    /// A photo session was completed and the prints await pickup
    SessionCompleted,
    /// Delivered photo archive, first storage notice
    PhotosReady3Months,
    /// Delivered photo archive, final storage notice
    PhotosReady10Months,
    Other(String),
}

impl ReminderType {
    pub fn as_str(&self) -> &str {
        match self {
            Self::SessionCompleted => "session_completed",
            Self::PhotosReady3Months => "photos_ready_3_months",
            Self::PhotosReady10Months => "photos_ready_10_months",
            Self::Other(tag) => tag,
        }
    }

    pub fn parse(tag: &str) -> Self {
        match tag {
            "session_completed" => Self::SessionCompleted,
            "photos_ready_3_months" => Self::PhotosReady3Months,
            "photos_ready_10_months" => Self::PhotosReady10Months,
            other => Self::Other(other.to_string()),
        }
    }
}

/// Delivery state of a `Reminder`. A reminder is either pending or has
/// been sent at a known instant, there is no failed state: a failed
/// delivery simply stays pending and is retried by the next dispatch run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeliveryState {
    Pending,
    Sent {
        /// Timestamp in millis at which delivery succeeded
        at: i64,
    },
}

/// A scheduled, single-fire notification to a client, owned by either a
/// photo session (pickup reminders) or an invoice (storage reminders).
///
/// Sent reminders are never reused or rescheduled. They stay behind as an
/// audit trail of what was communicated and when.
#[derive(Debug, Clone)]
pub struct Reminder {
    pub id: ID,
    /// Civil day on which the reminder becomes due, at the studio's locale
    pub due_date: NaiveDate,
    /// Display name of the client, also the dispatch-time lookup key into
    /// the client directory
    pub client_name: String,
    /// Message text, rendered once at creation and never re-rendered
    pub description: String,
    pub reminder_type: ReminderType,
    pub session_id: Option<ID>,
    pub invoice_id: Option<ID>,
    pub delivery: DeliveryState,
    pub created: i64,
    pub updated: i64,
}

impl Reminder {
    pub fn is_sent(&self) -> bool {
        matches!(self.delivery, DeliveryState::Sent { .. })
    }

    pub fn sent_at(&self) -> Option<i64> {
        match self.delivery {
            DeliveryState::Sent { at } => Some(at),
            DeliveryState::Pending => None,
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn reminder_types_round_trip_through_their_tags() {
        let known = vec![
            ReminderType::SessionCompleted,
            ReminderType::PhotosReady3Months,
            ReminderType::PhotosReady10Months,
        ];
        for reminder_type in known {
            assert_eq!(ReminderType::parse(reminder_type.as_str()), reminder_type);
        }

        let unknown = ReminderType::parse("anniversary_greeting");
        assert_eq!(unknown, ReminderType::Other("anniversary_greeting".to_string()));
        assert_eq!(unknown.as_str(), "anniversary_greeting");
    }

    #[test]
    fn delivery_state_accessors_agree() {
        let pending = DeliveryState::Pending;
        let sent = DeliveryState::Sent { at: 1700000000000 };

        let mut reminder = Reminder {
            id: Default::default(),
            due_date: NaiveDate::from_ymd_opt(2024, 1, 16).unwrap(),
            client_name: "Ana".to_string(),
            description: "".to_string(),
            reminder_type: ReminderType::SessionCompleted,
            session_id: Some(Default::default()),
            invoice_id: None,
            delivery: pending,
            created: 0,
            updated: 0,
        };
        assert!(!reminder.is_sent());
        assert_eq!(reminder.sent_at(), None);

        reminder.delivery = sent;
        assert!(reminder.is_sent());
        assert_eq!(reminder.sent_at(), Some(1700000000000));
    }
}
