use crate::{
    api::{ApiClient, ApiError, Appointment, Role, Tenant, User},
    pages::dashboard::utils::{
        appointments_on, count_appointments, summarize_tenants, upcoming_for_patient,
        users_by_role, AppointmentCounts, TenantSummary,
    },
    utils::time::{now_local, today_local},
};
use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SuperAdminSummary {
    pub tenants: Vec<Tenant>,
    pub tenant_summary: TenantSummary,
    pub users_by_role: Vec<(Role, usize)>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TenantAdminSummary {
    pub staff_by_role: Vec<(Role, usize)>,
    pub appointments: AppointmentCounts,
    pub today: Vec<Appointment>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SpecialistSummary {
    pub appointments: AppointmentCounts,
    pub today: Vec<Appointment>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PatientSummary {
    pub upcoming: Vec<Appointment>,
    pub prescriptions: usize,
    pub exams: usize,
}

const UPCOMING_LIMIT: usize = 5;

pub async fn fetch_super_admin_summary(api: &ApiClient) -> Result<SuperAdminSummary, ApiError> {
    let tenants = api.list_tenants().await?;
    let users = api.list_users(None, None).await?;
    Ok(SuperAdminSummary {
        tenant_summary: summarize_tenants(&tenants),
        users_by_role: users_by_role(&users),
        tenants,
    })
}

pub async fn fetch_admin_summary(
    api: &ApiClient,
    admin: &User,
) -> Result<TenantAdminSummary, ApiError> {
    fetch_admin_summary_on(api, admin, today_local()).await
}

pub(crate) async fn fetch_admin_summary_on(
    api: &ApiClient,
    admin: &User,
    day: NaiveDate,
) -> Result<TenantAdminSummary, ApiError> {
    let staff = api.list_users(None, admin.tenant_id).await?;
    let appointments: Vec<Appointment> = api
        .list_appointments(None, None)
        .await?
        .into_iter()
        .filter(|appt| admin.tenant_id.is_none() || appt.tenant_id == admin.tenant_id)
        .collect();
    Ok(TenantAdminSummary {
        staff_by_role: users_by_role(&staff),
        appointments: count_appointments(&appointments),
        today: appointments_on(&appointments, day),
    })
}

pub async fn fetch_specialist_summary(
    api: &ApiClient,
    specialist: &User,
) -> Result<SpecialistSummary, ApiError> {
    fetch_specialist_summary_on(api, specialist, today_local()).await
}

pub(crate) async fn fetch_specialist_summary_on(
    api: &ApiClient,
    specialist: &User,
    day: NaiveDate,
) -> Result<SpecialistSummary, ApiError> {
    let appointments = api.list_appointments(Some(specialist.id), None).await?;
    Ok(SpecialistSummary {
        appointments: count_appointments(&appointments),
        today: appointments_on(&appointments, day),
    })
}

pub async fn fetch_patient_summary(
    api: &ApiClient,
    patient: &User,
) -> Result<PatientSummary, ApiError> {
    fetch_patient_summary_at(api, patient, now_local()).await
}

pub(crate) async fn fetch_patient_summary_at(
    api: &ApiClient,
    patient: &User,
    now: NaiveDateTime,
) -> Result<PatientSummary, ApiError> {
    let appointments = api.list_appointments(None, Some(patient.id)).await?;
    let prescriptions = api.list_prescriptions(Some(patient.id)).await?;
    let exams = api.list_exams(Some(patient.id)).await?;
    Ok(PatientSummary {
        upcoming: upcoming_for_patient(&appointments, patient.id, now, UPCOMING_LIMIT),
        prescriptions: prescriptions.len(),
        exams: exams.len(),
    })
}
