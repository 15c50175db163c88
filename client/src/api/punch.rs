use super::{
    client::ApiClient,
    types::{
        ApiError, DateRange, PunchHistoryResponse, PunchInRequest, PunchOutRequest,
        PunchResponse, TodayPunchResponse,
    },
};

impl ApiClient {
    pub async fn punch_in(&self, request: &PunchInRequest) -> Result<PunchResponse, ApiError> {
        self.post_json("/student-attendance/punch-in", request).await
    }

    pub async fn punch_out(&self, request: &PunchOutRequest) -> Result<PunchResponse, ApiError> {
        self.post_json("/student-attendance/punch-out", request).await
    }

    /// Today's punch for the authenticated student. `data.punch` is `None`
    /// until the first punch-in of the day.
    pub async fn get_today_punch(&self) -> Result<TodayPunchResponse, ApiError> {
        self.get_json("/student-attendance/today").await
    }

    pub async fn get_student_punch_history(
        &self,
        range: &DateRange,
    ) -> Result<PunchHistoryResponse, ApiError> {
        self.get_json_with_query("/student-attendance/history", range)
            .await
    }
}
