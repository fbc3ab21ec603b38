//! Medical records, exams, certificates and prescriptions. All four are
//! listed per patient and created by the signed-in specialist.

use reqwest::Method;

use super::{
    client::{with_query, ApiClient},
    types::{
        ApiError, Certificate, Exam, MedicalRecord, NewCertificate, NewExam, NewMedicalRecord,
        NewPrescription, Prescription,
    },
};

fn patient_filter(path: &str, patient_id: Option<i64>) -> String {
    with_query(path, &[("patient_id", patient_id.map(|id| id.to_string()))])
}

impl ApiClient {
    pub async fn list_medical_records(
        &self,
        patient_id: Option<i64>,
    ) -> Result<Vec<MedicalRecord>, ApiError> {
        self.get_json(&patient_filter("/medical-records", patient_id))
            .await
    }

    pub async fn create_medical_record(
        &self,
        payload: &NewMedicalRecord,
    ) -> Result<MedicalRecord, ApiError> {
        self.send_json(Method::POST, "/medical-records", payload)
            .await
    }

    pub async fn list_exams(&self, patient_id: Option<i64>) -> Result<Vec<Exam>, ApiError> {
        self.get_json(&patient_filter("/exams", patient_id)).await
    }

    pub async fn create_exam(&self, payload: &NewExam) -> Result<Exam, ApiError> {
        self.send_json(Method::POST, "/exams", payload).await
    }

    pub async fn list_certificates(
        &self,
        patient_id: Option<i64>,
    ) -> Result<Vec<Certificate>, ApiError> {
        self.get_json(&patient_filter("/certificates", patient_id))
            .await
    }

    pub async fn create_certificate(
        &self,
        payload: &NewCertificate,
    ) -> Result<Certificate, ApiError> {
        self.send_json(Method::POST, "/certificates", payload).await
    }

    pub async fn list_prescriptions(
        &self,
        patient_id: Option<i64>,
    ) -> Result<Vec<Prescription>, ApiError> {
        self.get_json(&patient_filter("/prescriptions", patient_id))
            .await
    }

    pub async fn create_prescription(
        &self,
        payload: &NewPrescription,
    ) -> Result<Prescription, ApiError> {
        self.send_json(Method::POST, "/prescriptions", payload).await
    }
}
