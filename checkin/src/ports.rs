#![deny(clippy::all)]

use crate::domain::{Participant, Session};
use async_trait::async_trait;
use serde::Serialize;
use shared::Result;
use std::sync::Arc;

// Ports are the pluggable extension points for the spreadsheet backend and its cache

/// Port for the spreadsheet holding the attendance tabs (e.g. Google Sheets)
#[async_trait]
pub trait SheetStore: Send + Sync + 'static {
    /// Read every populated row of a tab, header row first
    async fn read_tab(&self, tab_name: &str) -> Result<Vec<Vec<String>>>;

    /// Overwrite a single cell addressed in A1 notation, stored as-is
    async fn write_cell(&self, range: &str, value: &str) -> Result<()>;
}

/// Port for the single time-boxed snapshot of the merged participant list
#[async_trait]
pub trait RosterCache: Send + Sync + 'static {
    async fn get(&self) -> Option<Arc<Vec<Participant>>>;
    async fn put(&self, snapshot: Arc<Vec<Participant>>);
    async fn invalidate(&self);
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RosterMode {
    Live,
    Mock,
}

/// What the HTTP layer talks to, live or mock
#[async_trait]
pub trait ParticipantRepository: Send + Sync + 'static {
    async fn get_participant(&self, id: &str) -> Result<Participant>;
    async fn list_participants(&self) -> Result<Arc<Vec<Participant>>>;
    async fn mark_attendance(&self, id: &str, session: Session, status: &str)
    -> Result<Participant>;
    fn mode(&self) -> RosterMode;
}
