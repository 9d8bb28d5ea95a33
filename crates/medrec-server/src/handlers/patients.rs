//! Patient record and report handlers.
//!
//! Every handler's first statement is the role gate. Read paths apply
//! the projection policy from [`crate::projection`]; the search path
//! pushes the same field set into the storage query.

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use medrec_auth::BearerAuth;
use medrec_core::{Appointment, AppointmentStatus, ContactInfo, Gender, Patient, Role};
use medrec_storage::{DEFAULT_PAGE_LIMIT, SearchParams, SearchResult};
use serde::Deserialize;
use serde_json::{Value, json};
use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;

use crate::AppState;
use crate::error::ApiError;
use crate::projection::{project_patient, visible_fields};
use crate::reports;
use crate::validation::{CreatePatientRequest, VitalsInput, validate_new_patient, validate_vitals};

// =============================================================================
// CRUD
// =============================================================================

/// `POST /api/patients` — doctor only.
pub async fn create_patient(
    State(state): State<AppState>,
    BearerAuth(ctx): BearerAuth,
    Json(req): Json<CreatePatientRequest>,
) -> Result<(StatusCode, Json<Patient>), ApiError> {
    ctx.require_any(&[Role::Doctor])?;

    let new = validate_new_patient(&req).map_err(ApiError::validation)?;

    let now = OffsetDateTime::now_utc();
    let patient = Patient {
        patient_id: new.patient_id,
        name: new.name,
        age: new.age,
        gender: new.gender,
        contact_info: new.contact_info,
        vitals: None,
        appointments: new.appointments,
        created_by: Some(ctx.user_id),
        last_updated_by: None,
        created_at: now,
        updated_at: now,
    };

    let created = state.patients.create(&patient).await?;
    tracing::info!(patient_id = %created.patient_id, "Patient created");
    Ok((StatusCode::CREATED, Json(created)))
}

#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    pub search: Option<String>,
    #[serde(default = "default_page")]
    pub page: u64,
    #[serde(default = "default_limit")]
    pub limit: u64,
    #[serde(default = "default_sort")]
    pub sort: String,
}

fn default_page() -> u64 {
    1
}

fn default_limit() -> u64 {
    DEFAULT_PAGE_LIMIT
}

fn default_sort() -> String {
    "name".to_string()
}

/// `GET /api/patients/search` — any authenticated role; hits are
/// projected per role at the query layer.
pub async fn search_patients(
    State(state): State<AppState>,
    BearerAuth(ctx): BearerAuth,
    Query(query): Query<SearchQuery>,
) -> Result<Json<SearchResult>, ApiError> {
    ctx.require_any(&[])?;

    let params = SearchParams {
        search: query.search,
        page: query.page.max(1),
        limit: query.limit,
        sort: query.sort,
        projection: visible_fields(ctx.role),
    };
    Ok(Json(state.patients.search(&params).await?))
}

/// `GET /api/patients/{patient_id}` — any authenticated role, projected.
pub async fn get_patient(
    State(state): State<AppState>,
    BearerAuth(ctx): BearerAuth,
    Path(patient_id): Path<String>,
) -> Result<Json<Value>, ApiError> {
    ctx.require_any(&[])?;

    let patient = find_patient(&state, &patient_id).await?;
    Ok(Json(project_patient(ctx.role, &patient)?))
}

/// The PUT patch shape. Present fields replace the stored value, except
/// `contactInfo` which shallow-merges into the stored sub-object.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdatePatientRequest {
    pub name: Option<String>,
    pub age: Option<u8>,
    pub gender: Option<Gender>,
    pub contact_info: Option<ContactInfo>,
    pub appointments: Option<Vec<Appointment>>,
}

/// `PUT /api/patients/{patient_id}` — doctor only.
pub async fn update_patient(
    State(state): State<AppState>,
    BearerAuth(ctx): BearerAuth,
    Path(patient_id): Path<String>,
    Json(req): Json<UpdatePatientRequest>,
) -> Result<Json<Patient>, ApiError> {
    ctx.require_any(&[Role::Doctor])?;

    let mut patient = find_patient(&state, &patient_id).await?;

    if let Some(name) = req.name {
        patient.name = name;
    }
    if let Some(age) = req.age {
        patient.age = age;
    }
    if let Some(gender) = req.gender {
        patient.gender = gender;
    }
    if let Some(contact_patch) = req.contact_info {
        patient.contact_info.merge(contact_patch);
    }
    if let Some(appointments) = req.appointments {
        patient.appointments = appointments;
    }
    patient.updated_at = OffsetDateTime::now_utc();

    Ok(Json(state.patients.update(&patient).await?))
}

/// `PATCH /api/patients/{patient_id}/vitals` — nurse only. The vitals
/// sub-object is replaced wholesale and `lastUpdatedBy` stamped.
pub async fn update_vitals(
    State(state): State<AppState>,
    BearerAuth(ctx): BearerAuth,
    Path(patient_id): Path<String>,
    Json(input): Json<VitalsInput>,
) -> Result<Json<Patient>, ApiError> {
    ctx.require_any(&[Role::Nurse])?;

    let mut vitals = validate_vitals(&input).map_err(ApiError::validation)?;

    let now = OffsetDateTime::now_utc();
    vitals.last_updated = Some(now);

    let mut patient = find_patient(&state, &patient_id).await?;
    patient.vitals = Some(vitals);
    patient.last_updated_by = Some(ctx.user_id);
    patient.updated_at = now;

    Ok(Json(state.patients.update(&patient).await?))
}

/// Field-level patch for one appointment entry. Only present fields
/// overwrite.
#[derive(Debug, Clone, Deserialize)]
pub struct AppointmentUpdates {
    pub date: Option<String>,
    pub department: Option<String>,
    pub doctor: Option<String>,
    pub reason: Option<String>,
    pub status: Option<AppointmentStatus>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateAppointmentRequest {
    pub appointment_date: Option<String>,
    pub updates: Option<AppointmentUpdates>,
}

/// `PATCH /api/patients/{patient_id}/appointments` — doctor or
/// receptionist. The target appointment is matched by millisecond
/// date equality; the first match wins.
pub async fn update_appointment(
    State(state): State<AppState>,
    BearerAuth(ctx): BearerAuth,
    Path(patient_id): Path<String>,
    Json(req): Json<UpdateAppointmentRequest>,
) -> Result<Json<Value>, ApiError> {
    ctx.require_any(&[Role::Doctor, Role::Receptionist])?;

    let (Some(date_str), Some(updates)) = (req.appointment_date, req.updates) else {
        return Err(ApiError::bad_request(
            "appointmentDate and updates are required",
        ));
    };
    let target = parse_rfc3339(&date_str)?;

    let mut patient = find_patient(&state, &patient_id).await?;

    let appointment = patient
        .find_appointment_mut(target)
        .ok_or_else(|| ApiError::not_found("Appointment not found"))?;

    if let Some(date) = updates.date {
        appointment.date = parse_rfc3339(&date)?;
    }
    if let Some(department) = updates.department {
        appointment.department = Some(department);
    }
    if let Some(doctor) = updates.doctor {
        appointment.doctor = Some(doctor);
    }
    if let Some(reason) = updates.reason {
        appointment.reason = Some(reason);
    }
    if let Some(status) = updates.status {
        appointment.status = status;
    }
    let updated = appointment.clone();
    patient.updated_at = OffsetDateTime::now_utc();

    state.patients.update(&patient).await?;
    Ok(Json(json!({
        "msg": "Appointment updated successfully",
        "appointment": updated,
    })))
}

/// `DELETE /api/patients/{patient_id}` — admin only.
pub async fn delete_patient(
    State(state): State<AppState>,
    BearerAuth(ctx): BearerAuth,
    Path(patient_id): Path<String>,
) -> Result<Json<Value>, ApiError> {
    ctx.require_any(&[Role::Admin])?;

    state.patients.delete(&patient_id).await?;
    tracing::info!(patient_id = %patient_id, "Patient deleted");
    Ok(Json(json!({ "msg": "Patient deleted successfully" })))
}

/// `GET /api/patients/{patient_id}/appointments` — receptionist, doctor,
/// admin.
pub async fn get_patient_appointments(
    State(state): State<AppState>,
    BearerAuth(ctx): BearerAuth,
    Path(patient_id): Path<String>,
) -> Result<Json<Vec<Appointment>>, ApiError> {
    ctx.require_any(&[Role::Receptionist, Role::Doctor, Role::Admin])?;

    let patient = find_patient(&state, &patient_id).await?;
    Ok(Json(patient.appointments))
}

// =============================================================================
// Reports
// =============================================================================

/// `GET /api/patients/dashboard-stats` — doctor only. Appointment
/// filters match on the doctor's username.
pub async fn doctor_dashboard(
    State(state): State<AppState>,
    BearerAuth(ctx): BearerAuth,
) -> Result<Json<reports::DoctorDashboard>, ApiError> {
    ctx.require_any(&[Role::Doctor])?;

    let user = state
        .users
        .find_by_id(&ctx.user_id)
        .await?
        .ok_or_else(|| ApiError::not_found("User not found"))?;

    let patients = state.patients.list_all().await?;
    Ok(Json(reports::doctor_dashboard(
        &patients,
        &user.username,
        &ctx.user_id,
        OffsetDateTime::now_utc(),
    )))
}

/// `GET /api/patients/nurse/stats` — nurse only.
pub async fn nurse_stats(
    State(state): State<AppState>,
    BearerAuth(ctx): BearerAuth,
) -> Result<Json<reports::NurseStats>, ApiError> {
    ctx.require_any(&[Role::Nurse])?;

    let patients = state.patients.list_all().await?;
    Ok(Json(reports::nurse_stats(
        &patients,
        OffsetDateTime::now_utc(),
    )))
}

/// `GET /api/patients/pending/vitals` — nurse only.
pub async fn pending_vitals(
    State(state): State<AppState>,
    BearerAuth(ctx): BearerAuth,
) -> Result<Json<Vec<reports::PendingVitalsEntry>>, ApiError> {
    ctx.require_any(&[Role::Nurse])?;

    let patients = state.patients.list_all().await?;
    Ok(Json(reports::pending_vitals(
        &patients,
        OffsetDateTime::now_utc(),
    )))
}

/// `GET /api/patients/receptionist/stats` — receptionist only.
pub async fn receptionist_stats(
    State(state): State<AppState>,
    BearerAuth(ctx): BearerAuth,
) -> Result<Json<Value>, ApiError> {
    ctx.require_any(&[Role::Receptionist])?;

    let patients = state.patients.list_all().await?;
    let stats = reports::receptionist_stats(&patients, OffsetDateTime::now_utc());
    Ok(Json(json!({ "success": true, "data": stats })))
}

/// `GET /api/patients/appointments/today` — receptionist or doctor.
pub async fn todays_appointments(
    State(state): State<AppState>,
    BearerAuth(ctx): BearerAuth,
) -> Result<Json<Vec<reports::TodaysAppointment>>, ApiError> {
    ctx.require_any(&[Role::Receptionist, Role::Doctor])?;

    let patients = state.patients.list_all().await?;
    Ok(Json(reports::todays_appointments(
        &patients,
        OffsetDateTime::now_utc(),
    )))
}

/// `GET /api/patients/analytics` — admin only.
pub async fn analytics(
    State(state): State<AppState>,
    BearerAuth(ctx): BearerAuth,
) -> Result<Json<Value>, ApiError> {
    ctx.require_any(&[Role::Admin])?;

    let patients = state.patients.list_all().await?;
    let report = reports::analytics(&patients);

    let mut body = serde_json::to_value(report)
        .map_err(|e| ApiError::internal(format!("serialization failed: {e}")))?;
    if let Some(map) = body.as_object_mut() {
        map.insert("success".to_string(), Value::Bool(true));
    }
    Ok(Json(body))
}

// =============================================================================
// Helpers
// =============================================================================

async fn find_patient(state: &AppState, patient_id: &str) -> Result<Patient, ApiError> {
    state
        .patients
        .find_by_patient_id(patient_id)
        .await?
        .ok_or_else(|| ApiError::not_found("Patient not found"))
}

fn parse_rfc3339(value: &str) -> Result<OffsetDateTime, ApiError> {
    OffsetDateTime::parse(value, &Rfc3339)
        .map_err(|_| ApiError::bad_request(format!("invalid date: {value}")))
}
