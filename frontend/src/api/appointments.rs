use reqwest::Method;
use serde_json::json;

use super::{
    client::{with_query, ApiClient},
    types::{ApiError, Appointment, AppointmentStatus, NewAppointment},
};

impl ApiClient {
    pub async fn list_appointments(
        &self,
        specialist_id: Option<i64>,
        patient_id: Option<i64>,
    ) -> Result<Vec<Appointment>, ApiError> {
        let path = with_query(
            "/appointments",
            &[
                ("specialist_id", specialist_id.map(|id| id.to_string())),
                ("patient_id", patient_id.map(|id| id.to_string())),
            ],
        );
        self.get_json(&path).await
    }

    pub async fn create_appointment(
        &self,
        payload: &NewAppointment,
    ) -> Result<Appointment, ApiError> {
        self.send_json(Method::POST, "/appointments", payload).await
    }

    pub async fn update_appointment_status(
        &self,
        id: i64,
        status: AppointmentStatus,
    ) -> Result<Appointment, ApiError> {
        self.send_json(
            Method::PATCH,
            &format!("/appointments/{}/status", id),
            &json!({ "status": status }),
        )
        .await
    }

    pub async fn delete_appointment(&self, id: i64) -> Result<(), ApiError> {
        self.delete(&format!("/appointments/{}", id)).await
    }
}
