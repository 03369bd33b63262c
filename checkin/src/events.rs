use crate::domain::Session;
use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttendanceEvent {
    pub id: String,
    pub session: Session,
    pub status: String,
    pub timestamp: i64,
}

impl AttendanceEvent {
    pub fn new(id: impl Into<String>, session: Session, status: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            session,
            status: status.into(),
            timestamp: now_timestamp(),
        }
    }
}

/// Current time in seconds since the UNIX epoch
pub fn now_timestamp() -> i64 {
    chrono::Utc::now().timestamp()
}

/// Send to any listeners; having none is not an error.
pub(crate) fn publish(broadcaster: Option<&broadcast::Sender<AttendanceEvent>>, event: AttendanceEvent) {
    let Some(broadcaster) = broadcaster else {
        return;
    };

    let (id, session) = (event.id.clone(), event.session);
    match broadcaster.send(event) {
        Ok(subscriber_count) => {
            tracing::debug!(
                "Broadcasted attendance event for '{}' in {} to {} subscriber(s)",
                id,
                session,
                subscriber_count
            );
        }
        Err(_) => {
            tracing::debug!("No subscribers for attendance event '{}' in {}", id, session);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Day, Slot};

    #[test]
    fn test_event_serializes_session_key() {
        let event = AttendanceEvent::new("BK1", Session::new(Day::Day1, Slot::Afternoon), "PRESENT");
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["session"], "day1_an");
        assert_eq!(json["status"], "PRESENT");
        assert!(json["timestamp"].as_i64().unwrap() > 0);
    }

    #[tokio::test]
    async fn test_publish_reaches_subscribers() {
        let (tx, mut rx) = broadcast::channel(4);
        let event = AttendanceEvent::new("BK1", Session::new(Day::Day2, Slot::Forenoon), "PRESENT");
        publish(Some(&tx), event.clone());
        assert_eq!(rx.recv().await.unwrap(), event);
    }

    #[test]
    fn test_publish_without_subscribers_is_silent() {
        let (tx, rx) = broadcast::channel::<AttendanceEvent>(4);
        drop(rx);
        publish(
            Some(&tx),
            AttendanceEvent::new("BK1", Session::new(Day::Day3, Slot::Forenoon), "ABSENT"),
        );
        publish(
            None,
            AttendanceEvent::new("BK1", Session::new(Day::Day3, Slot::Forenoon), "ABSENT"),
        );
    }
}
