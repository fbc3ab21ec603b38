//! Appointment slot availability for a single specialist.

use chrono::{Duration, NaiveDate, NaiveDateTime, NaiveTime};

use crate::api::{Appointment, AppointmentStatus};

fn end_of(start: NaiveDateTime, duration_minutes: u32) -> NaiveDateTime {
    start + Duration::minutes(i64::from(duration_minutes))
}

/// Half-open intervals: an appointment ending at 10:00 does not block 10:00.
fn overlaps(a_start: NaiveDateTime, a_end: NaiveDateTime, b_start: NaiveDateTime, b_end: NaiveDateTime) -> bool {
    a_start < b_end && b_start < a_end
}

pub fn blocks_slot(
    appointment: &Appointment,
    specialist_id: i64,
    start: NaiveDateTime,
    duration_minutes: u32,
) -> bool {
    appointment.specialist_id == specialist_id
        && appointment.status != AppointmentStatus::Cancelada
        && overlaps(
            appointment.scheduled_at,
            end_of(appointment.scheduled_at, appointment.duration_minutes),
            start,
            end_of(start, duration_minutes),
        )
}

pub fn is_slot_available(
    existing: &[Appointment],
    specialist_id: i64,
    start: NaiveDateTime,
    duration_minutes: u32,
) -> bool {
    duration_minutes > 0
        && !existing
            .iter()
            .any(|appt| blocks_slot(appt, specialist_id, start, duration_minutes))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WorkingHours {
    pub opens: NaiveTime,
    pub closes: NaiveTime,
}

impl Default for WorkingHours {
    fn default() -> Self {
        Self {
            opens: NaiveTime::from_hms_opt(8, 0, 0).unwrap_or(NaiveTime::MIN),
            closes: NaiveTime::from_hms_opt(17, 0, 0).unwrap_or(NaiveTime::MIN),
        }
    }
}

/// Free slot start times for `day`, stepping by `duration_minutes`. A slot
/// must end by closing time.
pub fn available_slots(
    existing: &[Appointment],
    specialist_id: i64,
    day: NaiveDate,
    hours: WorkingHours,
    duration_minutes: u32,
) -> Vec<NaiveDateTime> {
    if duration_minutes == 0 {
        return Vec::new();
    }
    let closes = day.and_time(hours.closes);
    let mut slots = Vec::new();
    let mut start = day.and_time(hours.opens);
    while end_of(start, duration_minutes) <= closes {
        if is_slot_available(existing, specialist_id, start, duration_minutes) {
            slots.push(start);
        }
        start = end_of(start, duration_minutes);
    }
    slots
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(h: u32, m: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 3, 3)
            .unwrap()
            .and_hms_opt(h, m, 0)
            .unwrap()
    }

    fn appt(id: i64, specialist_id: i64, start: NaiveDateTime, status: AppointmentStatus) -> Appointment {
        Appointment {
            id,
            patient_id: 100 + id,
            specialist_id,
            tenant_id: Some(7),
            scheduled_at: start,
            duration_minutes: 30,
            status,
            reason: None,
        }
    }

    #[test]
    fn overlapping_appointment_blocks_slot() {
        let existing = vec![appt(1, 3, at(9, 0), AppointmentStatus::Confirmada)];
        assert!(!is_slot_available(&existing, 3, at(9, 15), 30));
        assert!(!is_slot_available(&existing, 3, at(8, 45), 30));
    }

    #[test]
    fn touching_ends_do_not_conflict() {
        let existing = vec![appt(1, 3, at(9, 0), AppointmentStatus::Pendiente)];
        assert!(is_slot_available(&existing, 3, at(9, 30), 30));
        assert!(is_slot_available(&existing, 3, at(8, 30), 30));
    }

    #[test]
    fn other_specialists_and_cancelled_appointments_are_ignored() {
        let existing = vec![
            appt(1, 4, at(9, 0), AppointmentStatus::Confirmada),
            appt(2, 3, at(9, 0), AppointmentStatus::Cancelada),
        ];
        assert!(is_slot_available(&existing, 3, at(9, 0), 30));
    }

    #[test]
    fn zero_length_slot_is_never_available() {
        assert!(!is_slot_available(&[], 3, at(9, 0), 0));
        assert!(available_slots(&[], 3, at(9, 0).date(), WorkingHours::default(), 0).is_empty());
    }

    #[test]
    fn available_slots_skip_booked_times() {
        let hours = WorkingHours {
            opens: NaiveTime::from_hms_opt(9, 0, 0).unwrap(),
            closes: NaiveTime::from_hms_opt(11, 0, 0).unwrap(),
        };
        let existing = vec![appt(1, 3, at(9, 30), AppointmentStatus::Confirmada)];
        let slots = available_slots(&existing, 3, at(9, 0).date(), hours, 30);
        assert_eq!(slots, vec![at(9, 0), at(10, 0), at(10, 30)]);
    }
}
