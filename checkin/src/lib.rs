pub mod domain;
pub mod events;
pub mod fixture;
pub mod mapping;
pub mod ports;
pub mod roster;

pub use domain::{Day, Participant, Session, Slot};
pub use fixture::FixtureRoster;
pub use ports::{ParticipantRepository, RosterCache, RosterMode, SheetStore};
pub use roster::SheetRoster;
