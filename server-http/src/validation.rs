use crate::api::MarkAttendanceRequest;
use checkin::Session;

#[derive(Debug, PartialEq, Eq)]
pub enum ValidationError {
    MissingRequiredFields,
    InvalidSession(String),
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ValidationError::MissingRequiredFields => write!(f, "Missing required fields"),
            ValidationError::InvalidSession(session) => {
                write!(
                    f,
                    "Invalid session '{}'. Must be one of day1_fn, day1_an, day2_fn, day2_an, day3_fn, day3_an",
                    session
                )
            }
        }
    }
}

impl std::error::Error for ValidationError {}

/// A mark-attendance request with every field present and the session parsed
#[derive(Debug, PartialEq, Eq)]
pub struct AttendanceCommand {
    pub id: String,
    pub session: Session,
    pub status: String,
}

impl AttendanceCommand {
    pub fn from_request(req: MarkAttendanceRequest) -> Result<Self, ValidationError> {
        let id = Self::required(req.id)?;
        let session_id = Self::required(req.session_id)?;
        let status = Self::required(req.status)?;

        let session = session_id
            .parse::<Session>()
            .map_err(|_| ValidationError::InvalidSession(session_id))?;

        Ok(Self {
            id,
            session,
            status,
        })
    }

    fn required(field: Option<String>) -> Result<String, ValidationError> {
        field
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
            .ok_or(ValidationError::MissingRequiredFields)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use checkin::{Day, Slot};

    fn request(id: Option<&str>, session: Option<&str>, status: Option<&str>) -> MarkAttendanceRequest {
        MarkAttendanceRequest {
            id: id.map(String::from),
            session_id: session.map(String::from),
            status: status.map(String::from),
        }
    }

    #[test]
    fn test_valid_request() {
        let cmd = AttendanceCommand::from_request(request(
            Some(" BK2026001 "),
            Some("day2_an"),
            Some("PRESENT"),
        ))
        .unwrap();
        assert_eq!(cmd.id, "BK2026001");
        assert_eq!(cmd.session, Session::new(Day::Day2, Slot::Afternoon));
        assert_eq!(cmd.status, "PRESENT");
    }

    #[test]
    fn test_missing_or_blank_fields() {
        for req in [
            request(None, Some("day1_fn"), Some("PRESENT")),
            request(Some("BK1"), None, Some("PRESENT")),
            request(Some("BK1"), Some("day1_fn"), None),
            request(Some("  "), Some("day1_fn"), Some("PRESENT")),
        ] {
            assert_eq!(
                AttendanceCommand::from_request(req),
                Err(ValidationError::MissingRequiredFields)
            );
        }
    }

    #[test]
    fn test_unknown_session() {
        let err = AttendanceCommand::from_request(request(Some("BK1"), Some("day9_fn"), Some("PRESENT")))
            .unwrap_err();
        assert_eq!(err, ValidationError::InvalidSession("day9_fn".into()));
        assert!(err.to_string().starts_with("Invalid session 'day9_fn'"));
    }
}
