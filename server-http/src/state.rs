use checkin::events::AttendanceEvent;
use checkin::{FixtureRoster, ParticipantRepository, SheetRoster};
use shared::config::Config;
use std::sync::Arc;
use storage_engine::{GoogleSheetsStore, MokaRosterCache};
use tokio::sync::broadcast;

/// Capacity of the attendance event channel
const EVENT_BUFFER: usize = 1000;

/// Server state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub repository: Arc<dyn ParticipantRepository>,
    pub event_channel: broadcast::Sender<AttendanceEvent>,
}

impl AppState {
    pub fn new(
        repository: Arc<dyn ParticipantRepository>,
        event_channel: broadcast::Sender<AttendanceEvent>,
    ) -> Self {
        Self {
            repository,
            event_channel,
        }
    }

    /// Live roster when credentials are configured, fixture roster otherwise
    pub fn from_config(config: &Config) -> shared::Result<Self> {
        let (event_tx, _event_rx) = broadcast::channel(EVENT_BUFFER);

        let repository: Arc<dyn ParticipantRepository> = match &config.credentials {
            Some(credentials) => {
                tracing::info!(
                    "Using spreadsheet {} as {}",
                    credentials.sheet_id,
                    credentials.service_account_email
                );
                let store = GoogleSheetsStore::from_credentials(credentials)?;
                let cache = MokaRosterCache::new(config.cache_ttl);
                Arc::new(
                    SheetRoster::new(Arc::new(store), Arc::new(cache))
                        .with_event_broadcaster(event_tx.clone()),
                )
            }
            None => {
                tracing::warn!("Spreadsheet credentials not configured. Running in mock mode.");
                Arc::new(FixtureRoster::with_defaults().with_event_broadcaster(event_tx.clone()))
            }
        };

        Ok(Self::new(repository, event_tx))
    }

    /// Mock-mode state around the default fixtures
    pub fn mock() -> Self {
        let (event_tx, _event_rx) = broadcast::channel(EVENT_BUFFER);
        let repository = Arc::new(FixtureRoster::with_defaults().with_event_broadcaster(event_tx.clone()));
        Self::new(repository, event_tx)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use checkin::RosterMode;

    #[test]
    fn test_from_config_without_credentials_is_mock() {
        let config = Config::from_lookup(|_| None);
        let state = AppState::from_config(&config).unwrap();
        assert_eq!(state.repository.mode(), RosterMode::Mock);
    }

    #[test]
    fn test_from_config_with_bad_key_fails() {
        let config = Config::from_lookup(|key| match key {
            "GOOGLE_SHEET_ID" => Some("sheet-1".into()),
            "GOOGLE_SERVICE_ACCOUNT_EMAIL" => Some("bot@example.com".into()),
            "GOOGLE_PRIVATE_KEY" => Some("not a key".into()),
            _ => None,
        });
        assert!(matches!(
            AppState::from_config(&config),
            Err(shared::Error::Config(_))
        ));
    }
}
