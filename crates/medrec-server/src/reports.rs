//! Read-only report builders.
//!
//! Each builder is a pure function over a snapshot of the patient
//! collection plus an explicit `now`, so the date-window logic is
//! testable without a clock. Empty aggregates yield zero counts, never
//! an error.

use medrec_core::time::{day_window, in_window};
use medrec_core::{Appointment, AppointmentStatus, ContactInfo, Patient};
use serde::Serialize;
use time::OffsetDateTime;

/// One group-by bucket. `key` is `None` when the grouped field was
/// absent on the record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Bucket {
    pub key: Option<String>,
    pub count: u64,
}

// =============================================================================
// Doctor dashboard
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DoctorDashboard {
    /// Patients with at least one appointment today for this doctor.
    pub patients_today: u64,
    /// Scheduled appointments for this doctor from `now` onward.
    pub appointments_left: u64,
    /// This doctor's appointments completed today.
    pub appointments_completed: u64,
    /// Patients this doctor created today.
    pub new_patients: u64,
}

pub fn doctor_dashboard(
    patients: &[Patient],
    doctor_name: &str,
    doctor_id: &str,
    now: OffsetDateTime,
) -> DoctorDashboard {
    let today = day_window(now);
    let mine = |a: &Appointment| a.doctor.as_deref() == Some(doctor_name);

    let patients_today = patients
        .iter()
        .filter(|p| {
            p.appointments
                .iter()
                .any(|a| mine(a) && in_window(a.date, today))
        })
        .count() as u64;

    let appointments_left = patients
        .iter()
        .flat_map(|p| &p.appointments)
        .filter(|a| mine(a) && a.date >= now && a.status == AppointmentStatus::Scheduled)
        .count() as u64;

    let appointments_completed = patients
        .iter()
        .flat_map(|p| &p.appointments)
        .filter(|a| mine(a) && in_window(a.date, today) && a.status == AppointmentStatus::Completed)
        .count() as u64;

    let new_patients = patients
        .iter()
        .filter(|p| in_window(p.created_at, today) && p.created_by.as_deref() == Some(doctor_id))
        .count() as u64;

    DoctorDashboard {
        patients_today,
        appointments_left,
        appointments_completed,
        new_patients,
    }
}

// =============================================================================
// Nurse stats
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NurseStats {
    pub patients_to_check: u64,
    pub vitals_updated_today: u64,
    pub total_patients_assigned: u64,
}

/// Nurse workload summary. There is no per-nurse assignment in the data
/// model, so the counts cover the whole collection.
pub fn nurse_stats(patients: &[Patient], now: OffsetDateTime) -> NurseStats {
    let today = day_window(now);

    let total_patients_assigned = patients.len() as u64;
    let vitals_updated_today = patients
        .iter()
        .filter(|p| {
            p.vitals
                .as_ref()
                .and_then(|v| v.last_updated)
                .is_some_and(|t| in_window(t, today))
        })
        .count() as u64;

    NurseStats {
        patients_to_check: total_patients_assigned - vitals_updated_today,
        vitals_updated_today,
        total_patients_assigned,
    }
}

/// Patients whose vitals were not recorded today, trimmed to the fields
/// a nurse needs to follow up.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PendingVitalsEntry {
    pub patient_id: String,
    pub name: String,
    pub contact_info: ContactInfo,
}

pub fn pending_vitals(patients: &[Patient], now: OffsetDateTime) -> Vec<PendingVitalsEntry> {
    let today = day_window(now);

    patients
        .iter()
        .filter(|p| {
            // Records with no vitals at all are also pending.
            !p.vitals
                .as_ref()
                .and_then(|v| v.last_updated)
                .is_some_and(|t| in_window(t, today))
        })
        .map(|p| PendingVitalsEntry {
            patient_id: p.patient_id.clone(),
            name: p.name.clone(),
            contact_info: p.contact_info.clone(),
        })
        .collect()
}

// =============================================================================
// Receptionist views
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReceptionistStats {
    pub total_patients: u64,
    pub todays_appointments: u64,
    pub pending_appointments: u64,
}

pub fn receptionist_stats(patients: &[Patient], now: OffsetDateTime) -> ReceptionistStats {
    let today = day_window(now);

    let todays_appointments = patients
        .iter()
        .flat_map(|p| &p.appointments)
        .filter(|a| in_window(a.date, today))
        .count() as u64;

    let pending_appointments = patients
        .iter()
        .flat_map(|p| &p.appointments)
        .filter(|a| a.status == AppointmentStatus::Scheduled)
        .count() as u64;

    ReceptionistStats {
        total_patients: patients.len() as u64,
        todays_appointments,
        pending_appointments,
    }
}

/// One entry of the today's-appointments listing.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TodaysAppointment {
    pub patient_id: String,
    pub name: String,
    pub appointment: Appointment,
}

/// Flattens every appointment falling inside today's window, sorted by
/// appointment date ascending.
pub fn todays_appointments(patients: &[Patient], now: OffsetDateTime) -> Vec<TodaysAppointment> {
    let today = day_window(now);

    let mut entries: Vec<TodaysAppointment> = patients
        .iter()
        .flat_map(|p| {
            p.appointments
                .iter()
                .filter(|a| in_window(a.date, today))
                .map(|a| TodaysAppointment {
                    patient_id: p.patient_id.clone(),
                    name: p.name.clone(),
                    appointment: a.clone(),
                })
        })
        .collect();
    entries.sort_by_key(|e| e.appointment.date);
    entries
}

// =============================================================================
// Global analytics
// =============================================================================

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Analytics {
    pub total_patients: u64,
    pub average_age: f64,
    pub gender_distribution: Vec<Bucket>,
    pub appointments_per_department: Vec<Bucket>,
    pub appointments_per_status: Vec<Bucket>,
}

pub fn analytics(patients: &[Patient]) -> Analytics {
    let total_patients = patients.len() as u64;

    let average_age = if patients.is_empty() {
        0.0
    } else {
        patients.iter().map(|p| f64::from(p.age)).sum::<f64>() / patients.len() as f64
    };

    let gender_distribution = group_counts(
        patients.iter().map(|p| Some(p.gender.as_str().to_string())),
        false,
    );
    let appointments_per_department = group_counts(
        patients
            .iter()
            .flat_map(|p| &p.appointments)
            .map(|a| a.department.clone()),
        true,
    );
    let appointments_per_status = group_counts(
        patients
            .iter()
            .flat_map(|p| &p.appointments)
            .map(|a| Some(a.status.as_str().to_string())),
        false,
    );

    Analytics {
        total_patients,
        average_age,
        gender_distribution,
        appointments_per_department,
        appointments_per_status,
    }
}

/// Groups keys into counted buckets. With `by_count_desc` the buckets
/// sort by descending count, otherwise by key for a stable order.
fn group_counts(keys: impl Iterator<Item = Option<String>>, by_count_desc: bool) -> Vec<Bucket> {
    let mut counts: std::collections::BTreeMap<Option<String>, u64> =
        std::collections::BTreeMap::new();
    for key in keys {
        *counts.entry(key).or_insert(0) += 1;
    }

    let mut buckets: Vec<Bucket> = counts
        .into_iter()
        .map(|(key, count)| Bucket { key, count })
        .collect();
    if by_count_desc {
        buckets.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.key.cmp(&b.key)));
    }
    buckets
}

#[cfg(test)]
mod tests {
    use super::*;
    use medrec_core::{Gender, Vitals};
    use time::macros::datetime;

    const NOW: OffsetDateTime = datetime!(2026-03-01 12:00 UTC);

    fn patient(id: &str, appointments: Vec<Appointment>) -> Patient {
        Patient {
            patient_id: id.to_string(),
            name: format!("Patient {id}"),
            age: 40,
            gender: Gender::Male,
            contact_info: ContactInfo::default(),
            vitals: None,
            appointments,
            created_by: None,
            last_updated_by: None,
            created_at: datetime!(2026-02-01 09:00 UTC),
            updated_at: datetime!(2026-02-01 09:00 UTC),
        }
    }

    fn appointment(
        date: OffsetDateTime,
        doctor: &str,
        department: &str,
        status: AppointmentStatus,
    ) -> Appointment {
        Appointment {
            date,
            department: Some(department.to_string()),
            doctor: Some(doctor.to_string()),
            reason: None,
            status,
        }
    }

    #[test]
    fn test_empty_collection_yields_zero_counts() {
        let dashboard = doctor_dashboard(&[], "dr.a", "u1", NOW);
        assert_eq!(dashboard.patients_today, 0);
        assert_eq!(dashboard.appointments_left, 0);

        let stats = receptionist_stats(&[], NOW);
        assert_eq!(stats.total_patients, 0);
        assert_eq!(stats.pending_appointments, 0);

        let analytics = analytics(&[]);
        assert_eq!(analytics.average_age, 0.0);
        assert!(analytics.gender_distribution.is_empty());
    }

    #[test]
    fn test_doctor_dashboard_filters_by_doctor_name() {
        let patients = vec![
            patient(
                "P1",
                vec![
                    appointment(
                        datetime!(2026-03-01 14:00 UTC),
                        "dr.a",
                        "Cardiology",
                        AppointmentStatus::Scheduled,
                    ),
                    appointment(
                        datetime!(2026-03-01 09:00 UTC),
                        "dr.a",
                        "Cardiology",
                        AppointmentStatus::Completed,
                    ),
                ],
            ),
            patient(
                "P2",
                vec![appointment(
                    datetime!(2026-03-01 15:00 UTC),
                    "dr.b",
                    "Radiology",
                    AppointmentStatus::Scheduled,
                )],
            ),
        ];

        let dashboard = doctor_dashboard(&patients, "dr.a", "u1", NOW);
        assert_eq!(dashboard.patients_today, 1);
        assert_eq!(dashboard.appointments_left, 1);
        assert_eq!(dashboard.appointments_completed, 1);
        assert_eq!(dashboard.new_patients, 0);
    }

    #[test]
    fn test_doctor_dashboard_appointments_left_excludes_past() {
        let patients = vec![patient(
            "P1",
            vec![appointment(
                datetime!(2026-03-01 09:00 UTC),
                "dr.a",
                "Cardiology",
                AppointmentStatus::Scheduled,
            )],
        )];
        // 09:00 is before NOW (12:00), so nothing is left.
        let dashboard = doctor_dashboard(&patients, "dr.a", "u1", NOW);
        assert_eq!(dashboard.appointments_left, 0);
        assert_eq!(dashboard.patients_today, 1);
    }

    #[test]
    fn test_nurse_stats_and_pending_vitals() {
        let mut checked = patient("P1", Vec::new());
        checked.vitals = Some(Vitals {
            blood_pressure: "120/80".to_string(),
            temperature: 36.6,
            pulse: 72,
            weight: None,
            height: None,
            last_updated: Some(datetime!(2026-03-01 08:00 UTC)),
        });
        let unchecked = patient("P2", Vec::new());
        let patients = vec![checked, unchecked];

        let stats = nurse_stats(&patients, NOW);
        assert_eq!(stats.total_patients_assigned, 2);
        assert_eq!(stats.vitals_updated_today, 1);
        assert_eq!(stats.patients_to_check, 1);

        let pending = pending_vitals(&patients, NOW);
        assert_eq!(pending.len(), 1);
        assert_eq!(pending[0].patient_id, "P2");
    }

    #[test]
    fn test_todays_appointments_sorted_by_date() {
        let patients = vec![
            patient(
                "P1",
                vec![appointment(
                    datetime!(2026-03-01 16:00 UTC),
                    "dr.a",
                    "Cardiology",
                    AppointmentStatus::Scheduled,
                )],
            ),
            patient(
                "P2",
                vec![
                    appointment(
                        datetime!(2026-03-01 08:00 UTC),
                        "dr.b",
                        "Radiology",
                        AppointmentStatus::Scheduled,
                    ),
                    // Tomorrow, excluded.
                    appointment(
                        datetime!(2026-03-02 08:00 UTC),
                        "dr.b",
                        "Radiology",
                        AppointmentStatus::Scheduled,
                    ),
                ],
            ),
        ];

        let entries = todays_appointments(&patients, NOW);
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].patient_id, "P2");
        assert_eq!(entries[1].patient_id, "P1");
    }

    #[test]
    fn test_analytics_buckets() {
        let mut p1 = patient(
            "P1",
            vec![
                appointment(
                    datetime!(2026-03-01 08:00 UTC),
                    "dr.a",
                    "Cardiology",
                    AppointmentStatus::Scheduled,
                ),
                appointment(
                    datetime!(2026-03-02 08:00 UTC),
                    "dr.a",
                    "Cardiology",
                    AppointmentStatus::Completed,
                ),
            ],
        );
        p1.age = 30;
        let mut p2 = patient(
            "P2",
            vec![appointment(
                datetime!(2026-03-01 09:00 UTC),
                "dr.b",
                "Radiology",
                AppointmentStatus::Scheduled,
            )],
        );
        p2.age = 50;
        p2.gender = Gender::Female;

        let report = analytics(&[p1, p2]);
        assert_eq!(report.total_patients, 2);
        assert_eq!(report.average_age, 40.0);

        // Departments sort by descending count.
        assert_eq!(
            report.appointments_per_department[0].key.as_deref(),
            Some("Cardiology")
        );
        assert_eq!(report.appointments_per_department[0].count, 2);

        let scheduled = report
            .appointments_per_status
            .iter()
            .find(|b| b.key.as_deref() == Some("Scheduled"))
            .unwrap();
        assert_eq!(scheduled.count, 2);

        assert_eq!(report.gender_distribution.len(), 2);
    }
}
