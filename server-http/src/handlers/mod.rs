pub mod attendance;
pub mod events;
pub mod health;
pub mod participants;

pub use attendance::{attendance_summary, mark_attendance};
pub use events::stream_events;
pub use health::health_check;
pub use participants::{get_participant, list_participants};
