//! In-memory patient storage.

use std::cmp::Ordering;

use async_trait::async_trait;
use dashmap::DashMap;
use medrec_core::Patient;
use medrec_storage::{PatientStorage, SearchParams, SearchResult, StorageError};
use serde_json::Value;

/// Dashmap-backed patient store keyed by the external `patient_id`.
///
/// `update` replaces the stored record wholesale; there is no version
/// token, so interleaved read-modify-write sequences are last-write-wins.
#[derive(Debug, Default)]
pub struct InMemoryPatientStorage {
    data: DashMap<String, Patient>,
}

impl InMemoryPatientStorage {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored records.
    #[must_use]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Returns `true` if the store holds no records.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

/// Text match over the indexed fields: name, patientId, contact phone.
fn matches_search(patient: &Patient, term: &str) -> bool {
    let term = term.to_lowercase();
    patient.name.to_lowercase().contains(&term)
        || patient.patient_id.to_lowercase().contains(&term)
        || patient
            .contact_info
            .phone
            .as_deref()
            .is_some_and(|p| p.to_lowercase().contains(&term))
}

/// Orders two serialized records by a top-level field.
///
/// Strings compare lexically, numbers numerically; anything else (missing
/// fields included) compares equal, which keeps the sort stable.
fn compare_field(a: &Value, b: &Value, field: &str) -> Ordering {
    match (a.get(field), b.get(field)) {
        (Some(Value::String(x)), Some(Value::String(y))) => x.cmp(y),
        (Some(Value::Number(x)), Some(Value::Number(y))) => x
            .as_f64()
            .partial_cmp(&y.as_f64())
            .unwrap_or(Ordering::Equal),
        _ => Ordering::Equal,
    }
}

/// Restricts a serialized record to the named top-level fields.
fn apply_projection(record: Value, fields: &[&str]) -> Value {
    match record {
        Value::Object(map) => Value::Object(
            map.into_iter()
                .filter(|(k, _)| fields.contains(&k.as_str()))
                .collect(),
        ),
        other => other,
    }
}

#[async_trait]
impl PatientStorage for InMemoryPatientStorage {
    async fn create(&self, patient: &Patient) -> Result<Patient, StorageError> {
        use dashmap::mapref::entry::Entry;

        match self.data.entry(patient.patient_id.clone()) {
            Entry::Occupied(_) => Err(StorageError::already_exists(&patient.patient_id)),
            Entry::Vacant(slot) => {
                slot.insert(patient.clone());
                Ok(patient.clone())
            }
        }
    }

    async fn find_by_patient_id(&self, patient_id: &str) -> Result<Option<Patient>, StorageError> {
        Ok(self.data.get(patient_id).map(|r| r.value().clone()))
    }

    async fn search(&self, params: &SearchParams) -> Result<SearchResult, StorageError> {
        let mut hits: Vec<Value> = self
            .data
            .iter()
            .filter(|r| {
                params
                    .search
                    .as_deref()
                    .is_none_or(|term| matches_search(r.value(), term))
            })
            .map(|r| {
                serde_json::to_value(r.value())
                    .map_err(|e| StorageError::internal(format!("serialization failed: {e}")))
            })
            .collect::<Result<_, _>>()?;

        let (field, descending) = params.sort_key();
        hits.sort_by(|a, b| {
            let ord = compare_field(a, b, field);
            if descending { ord.reverse() } else { ord }
        });

        let total = hits.len() as u64;
        let patients: Vec<Value> = hits
            .into_iter()
            .skip(params.skip() as usize)
            .take(params.limit as usize)
            .map(|record| match params.projection {
                Some(fields) => apply_projection(record, fields),
                None => record,
            })
            .collect();

        Ok(SearchResult {
            total,
            page: params.page,
            patients,
        })
    }

    async fn update(&self, patient: &Patient) -> Result<Patient, StorageError> {
        match self.data.get_mut(&patient.patient_id) {
            Some(mut slot) => {
                *slot = patient.clone();
                Ok(patient.clone())
            }
            None => Err(StorageError::not_found(&patient.patient_id)),
        }
    }

    async fn delete(&self, patient_id: &str) -> Result<(), StorageError> {
        self.data
            .remove(patient_id)
            .map(|_| ())
            .ok_or_else(|| StorageError::not_found(patient_id))
    }

    async fn list_all(&self) -> Result<Vec<Patient>, StorageError> {
        Ok(self.data.iter().map(|r| r.value().clone()).collect())
    }
}

#[cfg(test)]
mod tests {
    use medrec_core::{ContactInfo, Gender};
    use time::OffsetDateTime;

    use super::*;

    fn patient(id: &str, name: &str, age: u8, phone: &str) -> Patient {
        let now = OffsetDateTime::now_utc();
        Patient {
            patient_id: id.to_string(),
            name: name.to_string(),
            age,
            gender: Gender::Other,
            contact_info: ContactInfo {
                phone: Some(phone.to_string()),
                email: None,
                address: None,
            },
            vitals: None,
            appointments: Vec::new(),
            created_by: None,
            last_updated_by: None,
            created_at: now,
            updated_at: now,
        }
    }

    #[tokio::test]
    async fn test_create_rejects_duplicate_patient_id() {
        let store = InMemoryPatientStorage::new();
        store.create(&patient("P1", "Asha", 30, "111")).await.unwrap();

        let err = store
            .create(&patient("P1", "Someone Else", 40, "222"))
            .await
            .unwrap_err();
        assert!(matches!(err, StorageError::AlreadyExists { .. }));
        assert_eq!(store.len(), 1);
    }

    #[tokio::test]
    async fn test_update_missing_record_is_not_found() {
        let store = InMemoryPatientStorage::new();
        let err = store.update(&patient("P9", "Ghost", 50, "000")).await.unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn test_search_matches_name_id_and_phone() {
        let store = InMemoryPatientStorage::new();
        store.create(&patient("P1", "Asha Rao", 30, "5550001")).await.unwrap();
        store.create(&patient("P2", "Bintu Devi", 45, "5550002")).await.unwrap();
        store.create(&patient("X3", "Chirag", 61, "7770003")).await.unwrap();

        for (term, expected) in [("asha", 1), ("p2", 1), ("555", 2), ("zzz", 0)] {
            let result = store
                .search(&SearchParams {
                    search: Some(term.to_string()),
                    ..SearchParams::default()
                })
                .await
                .unwrap();
            assert_eq!(result.total, expected, "term {term:?}");
        }
    }

    #[tokio::test]
    async fn test_search_sorts_and_paginates() {
        let store = InMemoryPatientStorage::new();
        store.create(&patient("P1", "Asha", 30, "1")).await.unwrap();
        store.create(&patient("P2", "Bintu", 45, "2")).await.unwrap();
        store.create(&patient("P3", "Chirag", 61, "3")).await.unwrap();

        let result = store
            .search(&SearchParams {
                sort: "-age".to_string(),
                page: 1,
                limit: 2,
                ..SearchParams::default()
            })
            .await
            .unwrap();
        assert_eq!(result.total, 3);
        assert_eq!(result.patients.len(), 2);
        assert_eq!(result.patients[0]["name"], "Chirag");
        assert_eq!(result.patients[1]["name"], "Bintu");

        let page2 = store
            .search(&SearchParams {
                sort: "-age".to_string(),
                page: 2,
                limit: 2,
                ..SearchParams::default()
            })
            .await
            .unwrap();
        assert_eq!(page2.patients.len(), 1);
        assert_eq!(page2.patients[0]["name"], "Asha");
    }

    #[tokio::test]
    async fn test_projection_is_applied_in_the_query_path() {
        let store = InMemoryPatientStorage::new();
        store.create(&patient("P1", "Asha", 30, "111")).await.unwrap();

        let result = store
            .search(&SearchParams {
                projection: Some(&["patientId", "name", "contactInfo", "appointments"]),
                ..SearchParams::default()
            })
            .await
            .unwrap();

        let hit = result.patients[0].as_object().unwrap();
        assert!(hit.contains_key("patientId"));
        assert!(hit.contains_key("contactInfo"));
        assert!(!hit.contains_key("age"));
        assert!(!hit.contains_key("gender"));
        assert!(!hit.contains_key("createdAt"));
    }
}
