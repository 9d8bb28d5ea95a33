//! Boundary validation for patient and vitals input.
//!
//! Validation runs before any mutation and reports every violated field,
//! not just the first. The numeric ranges and the blood pressure pattern
//! are the clinical plausibility bounds of the API contract.

use std::sync::LazyLock;

use medrec_core::{Appointment, ContactInfo, Gender, Vitals};
use regex::Regex;
use serde::{Deserialize, Serialize};

static BLOOD_PRESSURE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d{2,3}/\d{2,3}$").expect("valid regex"));
static ALPHANUMERIC_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9]+$").expect("valid regex"));
static EMAIL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").expect("valid regex"));
static PHONE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\+?\d{7,15}$").expect("valid regex"));

/// One violated field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

impl FieldError {
    #[must_use]
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

// =============================================================================
// Patient creation
// =============================================================================

/// The patient-creation request body. All fields are optional at the
/// serde layer so that missing fields surface as validation errors, not
/// as a deserialization failure.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatePatientRequest {
    pub patient_id: Option<String>,
    pub name: Option<String>,
    pub age: Option<i64>,
    pub gender: Option<String>,
    pub contact_info: Option<ContactInfo>,
    #[serde(default)]
    pub appointments: Vec<Appointment>,
}

/// The validated output of a creation request.
#[derive(Debug, Clone)]
pub struct NewPatient {
    pub patient_id: String,
    pub name: String,
    pub age: u8,
    pub gender: Gender,
    pub contact_info: ContactInfo,
    pub appointments: Vec<Appointment>,
}

/// Validates a creation request, collecting every violation.
pub fn validate_new_patient(req: &CreatePatientRequest) -> Result<NewPatient, Vec<FieldError>> {
    let mut errors = Vec::new();

    let patient_id = match req.patient_id.as_deref() {
        None | Some("") => {
            errors.push(FieldError::new("patientId", "Patient ID is required"));
            None
        }
        Some(id) if !ALPHANUMERIC_RE.is_match(id) => {
            errors.push(FieldError::new(
                "patientId",
                "Patient ID must be alphanumeric",
            ));
            None
        }
        Some(id) => Some(id.to_string()),
    };

    let name = match req.name.as_deref() {
        None | Some("") => {
            errors.push(FieldError::new("name", "Name is required"));
            None
        }
        Some(n) if n.len() < 2 || n.len() > 100 => {
            errors.push(FieldError::new(
                "name",
                "Name must be between 2 and 100 characters",
            ));
            None
        }
        Some(n) => Some(n.to_string()),
    };

    let age = match req.age {
        None => {
            errors.push(FieldError::new("age", "Age is required"));
            None
        }
        Some(a) if !(0..=120).contains(&a) => {
            errors.push(FieldError::new("age", "Age must be between 0 and 120"));
            None
        }
        Some(a) => Some(a as u8),
    };

    let gender = match req.gender.as_deref() {
        None | Some("") => {
            errors.push(FieldError::new("gender", "Gender is required"));
            None
        }
        Some("Male") => Some(Gender::Male),
        Some("Female") => Some(Gender::Female),
        Some("Other") => Some(Gender::Other),
        Some(_) => {
            errors.push(FieldError::new(
                "gender",
                "Gender must be Male, Female, or Other",
            ));
            None
        }
    };

    let contact_info = req.contact_info.clone().unwrap_or_default();
    match contact_info.phone.as_deref() {
        None | Some("") => {
            errors.push(FieldError::new("contactInfo.phone", "Phone number is required"));
        }
        Some(p) if !PHONE_RE.is_match(p) => {
            errors.push(FieldError::new(
                "contactInfo.phone",
                "Invalid phone number format",
            ));
        }
        Some(_) => {}
    }
    match contact_info.email.as_deref() {
        None | Some("") => {
            errors.push(FieldError::new("contactInfo.email", "Email is required"));
        }
        Some(e) if !EMAIL_RE.is_match(e) => {
            errors.push(FieldError::new("contactInfo.email", "Invalid email format"));
        }
        Some(_) => {}
    }
    if let Some(address) = contact_info.address.as_deref()
        && address.len() > 200
    {
        errors.push(FieldError::new(
            "contactInfo.address",
            "Address cannot exceed 200 characters",
        ));
    }

    match (patient_id, name, age, gender) {
        (Some(patient_id), Some(name), Some(age), Some(gender)) if errors.is_empty() => {
            Ok(NewPatient {
                patient_id,
                name,
                age,
                gender,
                contact_info,
                appointments: req.appointments.clone(),
            })
        }
        _ => Err(errors),
    }
}

// =============================================================================
// Vitals
// =============================================================================

/// The vitals-update request body.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VitalsInput {
    pub blood_pressure: Option<String>,
    pub temperature: Option<f64>,
    pub pulse: Option<i64>,
    pub weight: Option<f64>,
    pub height: Option<f64>,
}

/// Validates a vitals update, collecting every violation.
///
/// The returned vitals carry no `last_updated`; the handler stamps it
/// at write time.
pub fn validate_vitals(input: &VitalsInput) -> Result<Vitals, Vec<FieldError>> {
    let mut errors = Vec::new();

    let blood_pressure = match input.blood_pressure.as_deref() {
        None | Some("") => {
            errors.push(FieldError::new("bloodPressure", "Blood pressure is required"));
            None
        }
        Some(bp) if !BLOOD_PRESSURE_RE.is_match(bp) => {
            errors.push(FieldError::new(
                "bloodPressure",
                "Blood pressure must be in format \"120/80\"",
            ));
            None
        }
        Some(bp) => Some(bp.to_string()),
    };

    let temperature = match input.temperature {
        None => {
            errors.push(FieldError::new("temperature", "Temperature is required"));
            None
        }
        Some(t) if !(35.0..=42.0).contains(&t) => {
            errors.push(FieldError::new(
                "temperature",
                "Temperature must be between 35°C and 42°C",
            ));
            None
        }
        Some(t) => Some(t),
    };

    let pulse = match input.pulse {
        None => {
            errors.push(FieldError::new("pulse", "Pulse rate is required"));
            None
        }
        Some(p) if !(30..=200).contains(&p) => {
            errors.push(FieldError::new("pulse", "Pulse must be between 30 and 200 bpm"));
            None
        }
        Some(p) => Some(p),
    };

    if let Some(w) = input.weight
        && !(0.5..=300.0).contains(&w)
    {
        errors.push(FieldError::new(
            "weight",
            "Weight must be between 0.5kg and 300kg",
        ));
    }

    if let Some(h) = input.height
        && !(30.0..=250.0).contains(&h)
    {
        errors.push(FieldError::new(
            "height",
            "Height must be between 30cm and 250cm",
        ));
    }

    match (blood_pressure, temperature, pulse) {
        (Some(blood_pressure), Some(temperature), Some(pulse)) if errors.is_empty() => {
            Ok(Vitals {
                blood_pressure,
                temperature,
                pulse,
                weight: input.weight,
                height: input.height,
                last_updated: None,
            })
        }
        _ => Err(errors),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_patient_request() -> CreatePatientRequest {
        CreatePatientRequest {
            patient_id: Some("P1".to_string()),
            name: Some("Asha Rao".to_string()),
            age: Some(30),
            gender: Some("Female".to_string()),
            contact_info: Some(ContactInfo {
                phone: Some("1234567890".to_string()),
                email: Some("asha@x.com".to_string()),
                address: None,
            }),
            appointments: Vec::new(),
        }
    }

    fn valid_vitals_input() -> VitalsInput {
        VitalsInput {
            blood_pressure: Some("120/80".to_string()),
            temperature: Some(36.6),
            pulse: Some(72),
            weight: Some(60.0),
            height: None,
        }
    }

    #[test]
    fn test_valid_patient_passes() {
        let new = validate_new_patient(&valid_patient_request()).unwrap();
        assert_eq!(new.patient_id, "P1");
        assert_eq!(new.age, 30);
        assert_eq!(new.gender, Gender::Female);
    }

    #[test]
    fn test_every_patient_violation_is_reported() {
        let req = CreatePatientRequest {
            patient_id: Some("P-1!".to_string()),
            name: Some("A".to_string()),
            age: Some(130),
            gender: Some("Unknown".to_string()),
            contact_info: None,
            appointments: Vec::new(),
        };
        let errors = validate_new_patient(&req).unwrap_err();
        let fields: Vec<_> = errors.iter().map(|e| e.field.as_str()).collect();

        assert!(fields.contains(&"patientId"));
        assert!(fields.contains(&"name"));
        assert!(fields.contains(&"age"));
        assert!(fields.contains(&"gender"));
        assert!(fields.contains(&"contactInfo.phone"));
        assert!(fields.contains(&"contactInfo.email"));
    }

    #[test]
    fn test_valid_vitals_pass() {
        let vitals = validate_vitals(&valid_vitals_input()).unwrap();
        assert_eq!(vitals.blood_pressure, "120/80");
        assert_eq!(vitals.pulse, 72);
        assert!(vitals.last_updated.is_none());
    }

    #[test]
    fn test_out_of_range_pulse_names_pulse() {
        let input = VitalsInput {
            pulse: Some(250),
            ..valid_vitals_input()
        };
        let errors = validate_vitals(&input).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].field, "pulse");
        assert!(errors[0].message.contains("Pulse"));
    }

    #[test]
    fn test_all_vitals_violations_collected() {
        let input = VitalsInput {
            blood_pressure: Some("12/800x".to_string()),
            temperature: Some(50.0),
            pulse: Some(10),
            weight: Some(500.0),
            height: Some(10.0),
        };
        let errors = validate_vitals(&input).unwrap_err();
        assert_eq!(errors.len(), 5);
    }

    #[test]
    fn test_blood_pressure_pattern() {
        for bad in ["12080", "1200/80", "abc", "12/8"] {
            let input = VitalsInput {
                blood_pressure: Some(bad.to_string()),
                ..valid_vitals_input()
            };
            assert!(validate_vitals(&input).is_err(), "accepted {bad:?}");
        }
        for good in ["90/60", "120/80", "180/110"] {
            let input = VitalsInput {
                blood_pressure: Some(good.to_string()),
                ..valid_vitals_input()
            };
            assert!(validate_vitals(&input).is_ok(), "rejected {good:?}");
        }
    }

    #[test]
    fn test_boundary_values_accepted() {
        let input = VitalsInput {
            blood_pressure: Some("90/60".to_string()),
            temperature: Some(35.0),
            pulse: Some(200),
            weight: Some(0.5),
            height: Some(250.0),
        };
        assert!(validate_vitals(&input).is_ok());
    }
}
