use crate::domain::{ABSENT, Day, PRESENT, Participant, Session, normalize_status};
use crate::events::{self, AttendanceEvent};
use crate::ports::{ParticipantRepository, RosterMode};
use async_trait::async_trait;
use shared::{Error, Result};
use std::sync::Arc;
use tokio::sync::{RwLock, broadcast};
use tracing::info;

/// In-memory participant list used when no spreadsheet credentials are configured
pub struct FixtureRoster {
    participants: RwLock<Vec<Participant>>,
    event_broadcaster: Option<broadcast::Sender<AttendanceEvent>>,
}

impl FixtureRoster {
    pub fn new(participants: Vec<Participant>) -> Self {
        Self {
            participants: RwLock::new(participants),
            event_broadcaster: None,
        }
    }

    pub fn with_defaults() -> Self {
        Self::new(default_participants())
    }

    pub fn with_event_broadcaster(mut self, broadcaster: broadcast::Sender<AttendanceEvent>) -> Self {
        self.event_broadcaster = Some(broadcaster);
        self
    }
}

#[async_trait]
impl ParticipantRepository for FixtureRoster {
    async fn get_participant(&self, id: &str) -> Result<Participant> {
        info!(mock = true, "Fetching participant {}", id);
        self.participants
            .read()
            .await
            .iter()
            .find(|p| p.has_id(id))
            .cloned()
            .ok_or(Error::NotFound)
    }

    async fn list_participants(&self) -> Result<Arc<Vec<Participant>>> {
        info!(mock = true, "Fetching all participants");
        Ok(Arc::new(self.participants.read().await.clone()))
    }

    async fn mark_attendance(
        &self,
        id: &str,
        session: Session,
        status: &str,
    ) -> Result<Participant> {
        let id = id.trim();
        if id.is_empty() {
            return Err(Error::InvalidInput("id must not be empty".into()));
        }
        let status = normalize_status(status)?;
        info!(mock = true, "Marking attendance for {} in {} as {}", id, session, status);

        let updated = {
            let mut participants = self.participants.write().await;
            let participant = participants
                .iter_mut()
                .find(|p| p.has_id(id))
                .ok_or(Error::NotFound)?;
            participant.attendance.insert(session.key(), status.clone());
            participant.clone()
        };

        events::publish(
            self.event_broadcaster.as_ref(),
            AttendanceEvent::new(updated.id.clone(), session, status),
        );

        Ok(updated)
    }

    fn mode(&self) -> RosterMode {
        RosterMode::Mock
    }
}

#[allow(clippy::too_many_arguments)]
fn fixture(
    id: &str,
    name: &str,
    email: &str,
    mobile: &str,
    college: &str,
    department: &str,
    roll_no: &str,
    events: [&str; 3],
) -> Participant {
    let mut participant = Participant {
        id: id.into(),
        name: name.into(),
        email: email.into(),
        mobile: mobile.into(),
        college: college.into(),
        department: department.into(),
        roll_no: roll_no.into(),
        ..Default::default()
    };
    for (day, event) in Day::ALL.into_iter().zip(events) {
        participant.events.insert(day.key().into(), event.into());
    }
    for session in Session::ALL {
        participant.attendance.insert(session.key(), ABSENT.into());
    }
    participant
}

pub fn default_participants() -> Vec<Participant> {
    let alice = fixture(
        "BK2026001",
        "Alice Johnson",
        "alice@example.com",
        "9876543210",
        "Tech University",
        "CSE",
        "CSE-101",
        ["Hackathon Keynote", "Coding Marathon", "Project Expo"],
    );

    let mut bob = fixture(
        "BK2026002",
        "Bob Smith",
        "bob@example.com",
        "9876543211",
        "Engineering College",
        "IT",
        "IT-202",
        ["Workshop A", "Coding Marathon", "Closing Ceremony"],
    );
    bob.attendance.insert("day1_fn".into(), PRESENT.into());

    let charlie = fixture(
        "BK2026003",
        "Charlie Brown",
        "charlie@example.com",
        "9876543212",
        "Arts & Science",
        "Physics",
        "PHY-303",
        ["Seminar", "Seminar", "Seminar"],
    );

    vec![alice, bob, charlie]
}
