use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::api::{Appointment, AppointmentStatus, Role, Tenant, User};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TenantSummary {
    pub total: usize,
    pub active: usize,
    pub inactive: usize,
}

pub fn summarize_tenants(tenants: &[Tenant]) -> TenantSummary {
    let active = tenants.iter().filter(|t| t.is_active).count();
    TenantSummary {
        total: tenants.len(),
        active,
        inactive: tenants.len() - active,
    }
}

/// One entry per role, in `Role::ALL` order, zeros included.
pub fn users_by_role(users: &[User]) -> Vec<(Role, usize)> {
    Role::ALL
        .iter()
        .map(|role| (*role, users.iter().filter(|u| u.role == *role).count()))
        .collect()
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppointmentCounts {
    pub pending: usize,
    pub confirmed: usize,
    pub completed: usize,
    pub cancelled: usize,
}

impl AppointmentCounts {
    pub fn total(&self) -> usize {
        self.pending + self.confirmed + self.completed + self.cancelled
    }
}

pub fn count_appointments(appointments: &[Appointment]) -> AppointmentCounts {
    appointments
        .iter()
        .fold(AppointmentCounts::default(), |mut counts, appt| {
            match appt.status {
                AppointmentStatus::Pendiente => counts.pending += 1,
                AppointmentStatus::Confirmada => counts.confirmed += 1,
                AppointmentStatus::Completada => counts.completed += 1,
                AppointmentStatus::Cancelada => counts.cancelled += 1,
            }
            counts
        })
}

/// Appointments scheduled on `day`, earliest first.
pub fn appointments_on(appointments: &[Appointment], day: NaiveDate) -> Vec<Appointment> {
    let mut found: Vec<Appointment> = appointments
        .iter()
        .filter(|appt| appt.scheduled_at.date() == day)
        .cloned()
        .collect();
    found.sort_by_key(|appt| appt.scheduled_at);
    found
}

pub fn upcoming_for_patient(
    appointments: &[Appointment],
    patient_id: i64,
    now: NaiveDateTime,
    limit: usize,
) -> Vec<Appointment> {
    let mut found: Vec<Appointment> = appointments
        .iter()
        .filter(|appt| {
            appt.patient_id == patient_id
                && appt.status != AppointmentStatus::Cancelada
                && appt.scheduled_at >= now
        })
        .cloned()
        .collect();
    found.sort_by_key(|appt| appt.scheduled_at);
    found.truncate(limit);
    found
}
