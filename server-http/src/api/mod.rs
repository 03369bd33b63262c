pub mod requests;
pub mod responses;

pub use requests::{ListParticipantsQuery, MarkAttendanceRequest};
pub use responses::{AttendanceSummary, ErrorResponse, HealthResponse, SessionSummary};
