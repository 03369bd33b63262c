use serde::Deserialize;

/// Body of `POST /api/attendance`. Fields are optional so that missing ones
/// are reported as a validation error instead of a JSON rejection.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarkAttendanceRequest {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub session_id: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct ListParticipantsQuery {
    #[serde(default)]
    pub search: Option<String>,
}
