use super::{
    client::ApiClient,
    types::{ApiError, AttendanceResponse, AttendancesResponse, DateRange, MarkAttendanceRequest},
};

impl ApiClient {
    /// Lists every attendance record of a session.
    pub async fn get_session_attendances(
        &self,
        session_id: i64,
    ) -> Result<AttendancesResponse, ApiError> {
        self.get_json(&format!("/sessions/{}/attendance", session_id))
            .await
    }

    pub async fn mark_attendance(
        &self,
        session_id: i64,
        request: &MarkAttendanceRequest,
    ) -> Result<AttendanceResponse, ApiError> {
        self.post_json(&format!("/sessions/{}/attendance", session_id), request)
            .await
    }

    /// Lists a student's attendance, optionally bounded by `range`.
    pub async fn get_student_attendance(
        &self,
        student_id: i64,
        range: &DateRange,
    ) -> Result<AttendancesResponse, ApiError> {
        self.get_json_with_query(&format!("/students/{}/attendance", student_id), range)
            .await
    }
}
