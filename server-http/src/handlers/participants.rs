use crate::api::ListParticipantsQuery;
use crate::error::ApiError;
use crate::state::AppState;
use axum::{
    Json,
    extract::{Path, Query, State},
};
use checkin::Participant;
use tracing::info;

/// GET /api/participants
pub async fn list_participants(
    State(state): State<AppState>,
    Query(query): Query<ListParticipantsQuery>,
) -> Result<Json<Vec<Participant>>, ApiError> {
    info!("LIST_PARTICIPANTS: search={:?}", query.search);

    let participants = state.repository.list_participants().await?;
    let term = query.search.as_deref().unwrap_or_default();

    Ok(Json(
        participants
            .iter()
            .filter(|p| p.matches(term))
            .cloned()
            .collect(),
    ))
}

/// GET /api/participants/:id
pub async fn get_participant(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Participant>, ApiError> {
    info!("GET_PARTICIPANT: id={}", id);

    match state.repository.get_participant(&id).await {
        Ok(participant) => Ok(Json(participant)),
        Err(shared::Error::NotFound) => Err(ApiError::not_found("Participant not found")),
        Err(e) => Err(e.into()),
    }
}
