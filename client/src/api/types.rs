use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum AttendanceStatus {
    Present,
    Absent,
    ManualPresent,
}

impl AttendanceStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            AttendanceStatus::Present => "present",
            AttendanceStatus::Absent => "absent",
            AttendanceStatus::ManualPresent => "manual_present",
        }
    }
}

impl std::fmt::Display for AttendanceStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AttendanceRequest {
    pub status: AttendanceStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_manual: Option<bool>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StudentSummary {
    pub id: i64,
    pub name: String,
    pub email: String,
}

/// Session details embedded in an attendance record. `date` is passed
/// through as the server formats it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SessionSummary {
    pub id: i64,
    pub date: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub topic: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Attendance {
    pub id: i64,
    pub session_id: i64,
    pub student_id: i64,
    pub status: AttendanceStatus,
    #[serde(default)]
    pub is_manual: bool,
    #[serde(default)]
    pub marked_by: Option<i64>,
    #[serde(default)]
    pub marked_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub student: Option<StudentSummary>,
    #[serde(default)]
    pub session: Option<SessionSummary>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MarkAttendanceRequest {
    pub student_id: i64,
    pub status: AttendanceStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_manual: Option<bool>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Location {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub latitude: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub longitude: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
}

/// Evidence attached to a punch. Every field is optional; the server
/// decides which ones it requires.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct PunchRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub photo: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fingerprint: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<Location>,
}

pub type PunchInRequest = PunchRequest;
pub type PunchOutRequest = PunchRequest;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct StudentPunch {
    pub id: i64,
    pub user_id: i64,
    pub date: NaiveDate,
    #[serde(default)]
    pub punch_in_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub punch_out_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub punch_in_photo: Option<String>,
    #[serde(default)]
    pub punch_out_photo: Option<String>,
    #[serde(default)]
    pub punch_in_fingerprint: Option<String>,
    #[serde(default)]
    pub punch_out_fingerprint: Option<String>,
    #[serde(default)]
    pub punch_in_location: Option<Value>,
    #[serde(default)]
    pub punch_out_location: Option<Value>,
    #[serde(default, deserialize_with = "decimal::deserialize_optional")]
    pub effective_hours: Option<f64>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

impl StudentPunch {
    pub fn punch_in_location_typed(&self) -> Option<Location> {
        location_from_value(self.punch_in_location.as_ref())
    }

    pub fn punch_out_location_typed(&self) -> Option<Location> {
        location_from_value(self.punch_out_location.as_ref())
    }
}

fn location_from_value(value: Option<&Value>) -> Option<Location> {
    value
        .filter(|v| v.is_object())
        .and_then(|v| serde_json::from_value(v.clone()).ok())
}

/// Decimal columns may arrive as JSON numbers or as strings such as `"8.50"`.
mod decimal {
    use serde::{de::Error, Deserialize, Deserializer};

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum NumberOrText {
        Number(f64),
        Text(String),
    }

    pub fn deserialize_optional<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
    where
        D: Deserializer<'de>,
    {
        match Option::<NumberOrText>::deserialize(deserializer)? {
            None => Ok(None),
            Some(NumberOrText::Number(value)) => Ok(Some(value)),
            Some(NumberOrText::Text(text)) if text.trim().is_empty() => Ok(None),
            Some(NumberOrText::Text(text)) => text
                .trim()
                .parse()
                .map(Some)
                .map_err(|_| D::Error::custom(format!("invalid decimal: {}", text))),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PunchData {
    pub punch: StudentPunch,
    #[serde(default)]
    pub punch_in_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub punch_out_at: Option<DateTime<Utc>>,
    #[serde(default, deserialize_with = "decimal::deserialize_optional")]
    pub effective_working_hours: Option<f64>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PunchResponse {
    pub status: String,
    pub message: String,
    pub data: PunchData,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TodayPunchData {
    pub punch: Option<StudentPunch>,
    pub has_punched_in: bool,
    pub has_punched_out: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TodayPunchResponse {
    pub status: String,
    pub data: TodayPunchData,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AttendanceData {
    pub attendance: Attendance,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AttendanceResponse {
    pub status: String,
    pub data: AttendanceData,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AttendancesData {
    pub attendances: Vec<Attendance>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AttendancesResponse {
    pub status: String,
    pub data: AttendancesData,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PunchHistoryData {
    pub punches: Vec<StudentPunch>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PunchHistoryResponse {
    pub status: String,
    pub data: PunchHistoryData,
}

/// Optional `from`/`to` bounds sent as query parameters.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct DateRange {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub from: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub to: Option<NaiveDate>,
}

impl DateRange {
    pub fn new(from: Option<NaiveDate>, to: Option<NaiveDate>) -> Self {
        Self { from, to }
    }

    pub fn is_empty(&self) -> bool {
        self.from.is_none() && self.to.is_none()
    }
}

/// Error returned by every client call.
///
/// Mirrors the backend's `{ error, code, details }` body. `status` is the
/// HTTP status when the server answered, and `None` for failures that
/// never reached it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, thiserror::Error)]
#[error("{error}")]
pub struct ApiError {
    pub error: String,
    pub code: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<Value>,
    #[serde(skip)]
    pub status: Option<u16>,
}

impl From<ApiError> for String {
    fn from(error: ApiError) -> Self {
        error.error
    }
}

impl ApiError {
    pub fn unknown(msg: impl Into<String>) -> Self {
        Self::with_code(msg, "UNKNOWN")
    }

    pub fn request_failed(msg: impl Into<String>) -> Self {
        Self::with_code(msg, "REQUEST_FAILED")
    }

    pub fn decode_failed(msg: impl Into<String>) -> Self {
        Self::with_code(msg, "DECODE_FAILED")
    }

    /// Error for a rejected request whose body carried nothing usable.
    pub fn from_status(status: u16, msg: impl Into<String>) -> Self {
        Self {
            error: msg.into(),
            code: status_code_name(status),
            details: None,
            status: Some(status),
        }
    }

    pub fn is_unauthorized(&self) -> bool {
        self.status == Some(401) || self.code == "UNAUTHORIZED"
    }

    pub fn is_not_found(&self) -> bool {
        self.status == Some(404) || self.code == "NOT_FOUND"
    }

    fn with_code(msg: impl Into<String>, code: &str) -> Self {
        Self {
            error: msg.into(),
            code: code.to_string(),
            details: None,
            status: None,
        }
    }
}

pub(crate) fn status_code_name(status: u16) -> String {
    match status {
        400 => "BAD_REQUEST".to_string(),
        401 => "UNAUTHORIZED".to_string(),
        403 => "FORBIDDEN".to_string(),
        404 => "NOT_FOUND".to_string(),
        409 => "CONFLICT".to_string(),
        500 => "INTERNAL_SERVER_ERROR".to_string(),
        other => format!("HTTP_{}", other),
    }
}
