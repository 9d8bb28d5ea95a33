//! Role-conditional field visibility.
//!
//! One policy table decides which patient fields each role may see. The
//! single-record fetch applies it here; the search path hands the same
//! field set to the storage query so the restriction happens at the query
//! layer. Both consumers read from this module — there is no second copy
//! of the rule.

use medrec_core::{Patient, Role};
use serde_json::Value;

use crate::error::ApiError;

/// The receptionist's visible subset.
pub const RECEPTIONIST_FIELDS: &[&str] = &["patientId", "name", "contactInfo", "appointments"];

/// Returns the visible top-level fields for `role`.
///
/// `None` means the full record. Nurses are barred from prescription and
/// billing class fields; the modeled schema carries none of those, so in
/// practice a nurse sees every modeled field.
#[must_use]
pub fn visible_fields(role: Role) -> Option<&'static [&'static str]> {
    match role {
        Role::Receptionist => Some(RECEPTIONIST_FIELDS),
        Role::Nurse | Role::Doctor | Role::Admin => None,
    }
}

/// Serializes a patient restricted to the role's visible fields.
pub fn project_patient(role: Role, patient: &Patient) -> Result<Value, ApiError> {
    let record = serde_json::to_value(patient)
        .map_err(|e| ApiError::internal(format!("serialization failed: {e}")))?;

    let Some(fields) = visible_fields(role) else {
        return Ok(record);
    };

    match record {
        Value::Object(map) => Ok(Value::Object(
            map.into_iter()
                .filter(|(k, _)| fields.contains(&k.as_str()))
                .collect(),
        )),
        other => Ok(other),
    }
}
