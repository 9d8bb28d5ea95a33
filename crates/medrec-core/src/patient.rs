//! The patient document model.
//!
//! A patient record embeds contact info, the latest vitals, and an ordered
//! appointment list. `patient_id` is the external lookup key: unique,
//! alphanumeric, assigned by the caller, and distinct from any internal
//! storage key.

use std::fmt;

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

// =============================================================================
// Enumerations
// =============================================================================

/// Patient gender.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Gender {
    Male,
    Female,
    Other,
}

impl Gender {
    /// Returns the wire representation.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Male => "Male",
            Self::Female => "Female",
            Self::Other => "Other",
        }
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Lifecycle state of an appointment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AppointmentStatus {
    Scheduled,
    Completed,
    Cancelled,
}

impl AppointmentStatus {
    /// Returns the wire representation.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Scheduled => "Scheduled",
            Self::Completed => "Completed",
            Self::Cancelled => "Cancelled",
        }
    }
}

impl fmt::Display for AppointmentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// =============================================================================
// Sub-documents
// =============================================================================

/// Contact details for a patient.
///
/// Partial updates shallow-merge into this sub-object: patch fields win,
/// omitted fields retain their prior value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactInfo {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
}

impl ContactInfo {
    /// Shallow-merges `patch` into `self`: present patch fields overwrite,
    /// absent fields keep the stored value.
    pub fn merge(&mut self, patch: ContactInfo) {
        if patch.phone.is_some() {
            self.phone = patch.phone;
        }
        if patch.email.is_some() {
            self.email = patch.email;
        }
        if patch.address.is_some() {
            self.address = patch.address;
        }
    }
}

/// The most recent vitals reading.
///
/// Vitals are replaced wholesale on update, never merged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Vitals {
    /// Systolic/diastolic reading, e.g. `"120/80"`.
    pub blood_pressure: String,

    /// Body temperature in °C.
    pub temperature: f64,

    /// Pulse rate in bpm.
    pub pulse: i64,

    /// Weight in kg.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weight: Option<f64>,

    /// Height in cm.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<f64>,

    /// When this reading was recorded.
    #[serde(default, with = "time::serde::rfc3339::option")]
    pub last_updated: Option<OffsetDateTime>,
}

/// A single appointment embedded in the patient record.
///
/// Appointments carry no independent id; within a record they are
/// identified by exact date-timestamp equality. Two appointments sharing
/// the same instant are indistinguishable to update operations and the
/// first match wins.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Appointment {
    #[serde(with = "time::serde::rfc3339")]
    pub date: OffsetDateTime,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub department: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub doctor: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,

    pub status: AppointmentStatus,
}

// =============================================================================
// Patient
// =============================================================================

/// A patient record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Patient {
    /// External, globally unique, alphanumeric identifier.
    pub patient_id: String,

    pub name: String,

    /// Age in years, 0..=120.
    pub age: u8,

    pub gender: Gender,

    #[serde(default)]
    pub contact_info: ContactInfo,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vitals: Option<Vitals>,

    #[serde(default)]
    pub appointments: Vec<Appointment>,

    /// Id of the user that created the record.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_by: Option<String>,

    /// Id of the user that last stamped the vitals.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_updated_by: Option<String>,

    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,

    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,
}

impl Patient {
    /// Finds the first appointment whose date equals `target` at
    /// millisecond precision. Duplicate instants resolve to the first
    /// entry in list order.
    #[must_use]
    pub fn find_appointment_mut(&mut self, target: OffsetDateTime) -> Option<&mut Appointment> {
        let target_ms = crate::time::unix_millis(target);
        self.appointments
            .iter_mut()
            .find(|a| crate::time::unix_millis(a.date) == target_ms)
    }
}
