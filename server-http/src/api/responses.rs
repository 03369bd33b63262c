use checkin::ports::RosterMode;
use checkin::{Participant, Session};
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub message: String,
    pub mode: RosterMode,
}

// Error response
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub message: String,
}

impl ErrorResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct SessionSummary {
    pub session: Session,
    pub present: usize,
}

/// Present counts per session over the whole roster.
#[derive(Debug, Serialize)]
pub struct AttendanceSummary {
    pub total: usize,
    pub sessions: Vec<SessionSummary>,
}

impl AttendanceSummary {
    pub fn from_participants(participants: &[Participant]) -> Self {
        let sessions = Session::ALL
            .into_iter()
            .map(|session| SessionSummary {
                session,
                present: participants.iter().filter(|p| p.is_present(session)).count(),
            })
            .collect();

        Self {
            total: participants.len(),
            sessions,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use checkin::fixture::default_participants;

    #[test]
    fn test_summary_counts_present_per_session() {
        let summary = AttendanceSummary::from_participants(&default_participants());
        assert_eq!(summary.total, 3);
        assert_eq!(summary.sessions.len(), 6);
        assert_eq!(summary.sessions[0].session.key(), "day1_fn");
        assert_eq!(summary.sessions[0].present, 1);
        assert!(summary.sessions[1..].iter().all(|s| s.present == 0));
    }

    #[test]
    fn test_summary_of_empty_roster() {
        let summary = AttendanceSummary::from_participants(&[]);
        assert_eq!(summary.total, 0);
        assert!(summary.sessions.iter().all(|s| s.present == 0));
    }
}
