use crate::api::{AttendanceSummary, MarkAttendanceRequest};
use crate::error::ApiError;
use crate::state::AppState;
use crate::validation::{AttendanceCommand, ValidationError};
use axum::{Json, extract::State, extract::rejection::JsonRejection};
use checkin::Participant;
use tracing::{info, warn};

/// POST /api/attendance
pub async fn mark_attendance(
    State(state): State<AppState>,
    body: Result<Json<MarkAttendanceRequest>, JsonRejection>,
) -> Result<Json<Participant>, ApiError> {
    let Json(req) = body.map_err(|rejection| {
        warn!("Rejected attendance body: {}", rejection.body_text());
        ApiError::from(ValidationError::MissingRequiredFields)
    })?;
    let cmd = AttendanceCommand::from_request(req)?;

    info!(
        "MARK_ATTENDANCE: id={}, session={}, status={}",
        cmd.id, cmd.session, cmd.status
    );

    match state
        .repository
        .mark_attendance(&cmd.id, cmd.session, &cmd.status)
        .await
    {
        Ok(participant) => Ok(Json(participant)),
        Err(shared::Error::NotFound) => Err(ApiError::not_found(
            "Participant not found or update failed",
        )),
        Err(e) => Err(e.into()),
    }
}

/// GET /api/attendance/summary
pub async fn attendance_summary(
    State(state): State<AppState>,
) -> Result<Json<AttendanceSummary>, ApiError> {
    info!("ATTENDANCE_SUMMARY");

    let participants = state.repository.list_participants().await?;
    Ok(Json(AttendanceSummary::from_participants(&participants)))
}
