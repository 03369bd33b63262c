use crate::domain::{Day, Participant, Session, normalize_status};
use crate::events::{self, AttendanceEvent};
use crate::mapping::{SheetTab, cell_address, merge_participants};
use crate::ports::{ParticipantRepository, RosterCache, RosterMode, SheetStore};
use async_trait::async_trait;
use futures::future::join_all;
use shared::{Error, Result};
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::sync::broadcast;
use tracing::{debug, info, warn};

/// Live participant repository backed by the three day tabs of a spreadsheet
pub struct SheetRoster<S, C>
where
    S: SheetStore,
    C: RosterCache,
{
    store: Arc<S>,
    cache: Arc<C>,
    event_broadcaster: Option<broadcast::Sender<AttendanceEvent>>,
    /// Bumped on every write; a fetch that overlaps a write must not be cached.
    generation: AtomicU64,
}

/// Result of one fan-out over the day tabs.
struct FetchedTabs {
    tabs: Vec<SheetTab>,
    complete: bool,
}

impl<S, C> SheetRoster<S, C>
where
    S: SheetStore,
    C: RosterCache,
{
    pub fn new(store: Arc<S>, cache: Arc<C>) -> Self {
        Self {
            store,
            cache,
            event_broadcaster: None,
            generation: AtomicU64::new(0),
        }
    }

    pub fn with_event_broadcaster(mut self, broadcaster: broadcast::Sender<AttendanceEvent>) -> Self {
        self.event_broadcaster = Some(broadcaster);
        self
    }

    /// Read all day tabs in parallel. Tabs that fail or are empty are skipped.
    async fn fetch_tabs(&self) -> FetchedTabs {
        debug!("Fetching {} day tabs in parallel", Day::ALL.len());

        let requests = Day::ALL.into_iter().map(|day| async move {
            let result = self.store.read_tab(day.tab_name()).await;
            (day, result)
        });

        let mut complete = true;
        let mut tabs = Vec::with_capacity(Day::ALL.len());

        for (day, result) in join_all(requests).await {
            match result {
                Ok(values) => {
                    if let Some(tab) = SheetTab::from_values(day, values) {
                        tabs.push(tab);
                    } else {
                        debug!("Tab '{}' is empty", day.tab_name());
                    }
                }
                Err(e) => {
                    warn!("Skipping tab '{}': {}", day.tab_name(), e);
                    complete = false;
                }
            }
        }

        FetchedTabs { tabs, complete }
    }

    async fn read_tab(&self, day: Day) -> Result<SheetTab> {
        let values = self.store.read_tab(day.tab_name()).await?;
        SheetTab::from_values(day, values).ok_or_else(|| Error::ColumnNotFound {
            column: crate::mapping::BOOKING_ID.to_string(),
            tab: day.tab_name().to_string(),
        })
    }
}

#[async_trait]
impl<S, C> ParticipantRepository for SheetRoster<S, C>
where
    S: SheetStore,
    C: RosterCache,
{
    async fn get_participant(&self, id: &str) -> Result<Participant> {
        let fetched = self.fetch_tabs().await;
        let mut merged: Option<Participant> = None;

        for tab in &fetched.tabs {
            let row_idx = match tab.find_row(id) {
                Ok(Some(idx)) => idx,
                Ok(None) => continue,
                Err(e) => {
                    warn!("Skipping tab '{}' for lookup: {}", tab.tab_name(), e);
                    continue;
                }
            };

            if let Some(found) = tab.participant_at(row_idx) {
                match merged.as_mut() {
                    Some(existing) => existing.merge(found),
                    None => merged = Some(found),
                }
            }
        }

        merged.ok_or(Error::NotFound)
    }

    async fn list_participants(&self) -> Result<Arc<Vec<Participant>>> {
        if let Some(snapshot) = self.cache.get().await {
            debug!("Returning cached participants ({})", snapshot.len());
            return Ok(snapshot);
        }

        let generation = self.generation.load(Ordering::SeqCst);
        let fetched = self.fetch_tabs().await;
        let snapshot = Arc::new(merge_participants(&fetched.tabs));

        if !fetched.complete {
            warn!(
                "Fetched {} participants from a partial read, not caching",
                snapshot.len()
            );
        } else if self.generation.load(Ordering::SeqCst) != generation {
            debug!("Attendance changed during fetch, not caching");
        } else {
            self.cache.put(snapshot.clone()).await;
            // a write may have invalidated between the check and the put
            if self.generation.load(Ordering::SeqCst) != generation {
                self.cache.invalidate().await;
            } else {
                info!("Fetched {} participants and cached", snapshot.len());
            }
        }

        Ok(snapshot)
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

        let tab = self.read_tab(session.day).await?;
        let row_idx = tab.find_row(id)?.ok_or(Error::NotFound)?;
        let col_idx = tab.column(&session.column_header())?;

        // rows[0] is the header, which is sheet row 1
        let range = cell_address(tab.tab_name(), col_idx, row_idx + 1);
        info!("Writing {} to {} for '{}'", status, range, id);
        self.store.write_cell(&range, &status).await?;

        self.generation.fetch_add(1, Ordering::SeqCst);
        self.cache.invalidate().await;

        let updated = self.get_participant(id).await;
        let event_id = match &updated {
            Ok(participant) => participant.id.clone(),
            Err(_) => id.to_string(),
        };
        events::publish(
            self.event_broadcaster.as_ref(),
            AttendanceEvent::new(event_id, session, status),
        );

        updated
    }

    fn mode(&self) -> RosterMode {
        RosterMode::Live
    }
}
