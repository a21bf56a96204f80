use crate::error::ApiError;
use crate::model::employee::EmployeeRecord;
use crate::model::validation::{validate_new, validate_patch};
use crate::store::{EmployeeStore, StoreError};
use crate::utils::password::hash_password;
use serde_json::Value;
use std::sync::Arc;
use tracing::{debug, error, info};

/// Validates employee requests and forwards them to the store.
#[derive(Clone)]
pub struct EmployeeGateway {
    store: Arc<dyn EmployeeStore>,
}

fn storage_error(err: StoreError) -> ApiError {
    match err {
        StoreError::Duplicate { emp_code } => ApiError::Conflict { emp_code },
        StoreError::Backend { message } => {
            error!(error = %message, "Employee store failure");
            ApiError::Storage { message }
        }
    }
}

fn hash(password: &str) -> Result<String, ApiError> {
    hash_password(password).map_err(|e| {
        error!(error = %e, "Failed to hash password");
        ApiError::internal(e.to_string())
    })
}

impl EmployeeGateway {
    pub fn new(store: Arc<dyn EmployeeStore>) -> Self {
        Self { store }
    }

    pub async fn create(&self, payload: &Value) -> Result<EmployeeRecord, ApiError> {
        let mut doc = validate_new(payload).map_err(ApiError::invalid)?;

        // Cheap early answer; the unique index still guards concurrent creates.
        if self
            .store
            .find_by_code(&doc.emp_code)
            .await
            .map_err(storage_error)?
            .is_some()
        {
            return Err(ApiError::Conflict {
                emp_code: doc.emp_code,
            });
        }

        doc.password = hash(&doc.password)?;
        let saved = self.store.insert(doc).await.map_err(storage_error)?;
        info!(emp_code = %saved.emp_code, "Employee created");
        Ok(saved.into())
    }

    pub async fn list_all(&self) -> Result<Vec<EmployeeRecord>, ApiError> {
        let docs = self.store.list_all().await.map_err(storage_error)?;
        debug!(count = docs.len(), "Listed employees");
        Ok(docs.into_iter().map(EmployeeRecord::from).collect())
    }

    pub async fn get_by_emp_code(&self, emp_code: &str) -> Result<EmployeeRecord, ApiError> {
        self.store
            .find_by_code(emp_code)
            .await
            .map_err(storage_error)?
            .map(EmployeeRecord::from)
            .ok_or(ApiError::NotFound)
    }

    pub async fn update_by_emp_code(
        &self,
        emp_code: &str,
        payload: &Value,
    ) -> Result<EmployeeRecord, ApiError> {
        let mut patch = validate_patch(payload).map_err(ApiError::invalid)?;
        if let Some(password) = patch.password.take() {
            patch.password = Some(hash(&password)?);
        }

        let updated = self
            .store
            .update_by_code(emp_code, &patch)
            .await
            .map_err(storage_error)?
            .ok_or(ApiError::NotFound)?;
        info!(emp_code, "Employee updated");
        Ok(updated.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::memory::MemoryEmployeeStore;
    use crate::utils::password::verify_password;
    use serde_json::json;

    fn record(code: &str) -> Value {
        json!({
            "Emp/IC Code": code,
            "Employee Name": "A B",
            "Business Title": "Associate",
            "Category": "Delivery",
            "Station Code": "DEL1",
            "Location": "Gurgaon",
            "Mail ID": "a.b@example.com",
            "DOB": "1990-01-01",
            "PAN CARD": "ABCDE1234F",
            "Mobile Number": 9876543210u64,
            "Password": "secret"
        })
    }

    fn gateway() -> (EmployeeGateway, Arc<MemoryEmployeeStore>) {
        let store = Arc::new(MemoryEmployeeStore::default());
        (EmployeeGateway::new(store.clone()), store)
    }

    #[actix_web::test]
    async fn create_then_list_and_get() {
        let (gateway, _) = gateway();
        let created = gateway.create(&record("E100")).await.unwrap();

        let all = gateway.list_all().await.unwrap();
        assert_eq!(all, vec![created.clone()]);

        let fetched = gateway.get_by_emp_code("E100").await.unwrap();
        assert_eq!(fetched, created);
        assert_eq!(fetched.location, "Gurgaon");
        assert_eq!(fetched.mobile_number, 9876543210);
        assert!(!fetched.id.is_empty());
    }

    #[actix_web::test]
    async fn create_hashes_password() {
        let (gateway, store) = gateway();
        gateway.create(&record("E100")).await.unwrap();

        let stored = store.stored("E100").unwrap();
        assert_ne!(stored.password, "secret");
        assert!(verify_password("secret", &stored.password));
    }

    #[actix_web::test]
    async fn invalid_create_persists_nothing() {
        let (gateway, store) = gateway();
        let mut payload = record("E100");
        payload.as_object_mut().unwrap().remove("PAN CARD");

        let err = gateway.create(&payload).await.unwrap_err();
        assert!(matches!(err, ApiError::InvalidRecord { .. }));
        assert_eq!(store.len(), 0);
    }

    #[actix_web::test]
    async fn duplicate_code_conflicts() {
        let (gateway, store) = gateway();
        gateway.create(&record("E100")).await.unwrap();

        let err = gateway.create(&record("E100")).await.unwrap_err();
        assert!(matches!(err, ApiError::Conflict { ref emp_code } if emp_code == "E100"));
        assert_eq!(store.len(), 1);
    }

    #[actix_web::test]
    async fn unknown_code_is_not_found() {
        let (gateway, _) = gateway();
        assert!(matches!(
            gateway.get_by_emp_code("nope").await,
            Err(ApiError::NotFound)
        ));
        assert!(matches!(
            gateway
                .update_by_emp_code("nope", &json!({"Location": "Delhi"}))
                .await,
            Err(ApiError::NotFound)
        ));
    }

    #[actix_web::test]
    async fn partial_update_preserves_other_fields() {
        let (gateway, _) = gateway();
        let created = gateway.create(&record("E100")).await.unwrap();

        let updated = gateway
            .update_by_emp_code("E100", &json!({"Location": "Delhi"}))
            .await
            .unwrap();

        assert_eq!(updated.location, "Delhi");
        assert_eq!(
            EmployeeRecord {
                location: created.location.clone(),
                ..updated
            },
            created
        );
    }

    #[actix_web::test]
    async fn update_rehashes_supplied_password() {
        let (gateway, store) = gateway();
        gateway.create(&record("E100")).await.unwrap();

        gateway
            .update_by_emp_code("E100", &json!({"Password": "changed"}))
            .await
            .unwrap();
        assert!(verify_password("changed", &store.stored("E100").unwrap().password));
    }

    #[actix_web::test]
    async fn update_rejects_invalid_fields() {
        let (gateway, store) = gateway();
        gateway.create(&record("E100")).await.unwrap();

        let err = gateway
            .update_by_emp_code("E100", &json!({"Mobile Number": "not a number"}))
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::InvalidRecord { .. }));
        assert_eq!(store.stored("E100").unwrap().mobile_number, 9876543210);
    }

    #[actix_web::test]
    async fn renaming_onto_existing_code_conflicts() {
        let (gateway, _) = gateway();
        gateway.create(&record("E100")).await.unwrap();
        gateway.create(&record("E200")).await.unwrap();

        let err = gateway
            .update_by_emp_code("E200", &json!({"Emp/IC Code": "E100"}))
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::Conflict { .. }));
    }

    #[actix_web::test]
    async fn store_failures_are_storage_errors() {
        let gateway = EmployeeGateway::new(Arc::new(MemoryEmployeeStore::failing()));
        assert!(matches!(
            gateway.list_all().await,
            Err(ApiError::Storage { .. })
        ));
        assert!(matches!(
            gateway.get_by_emp_code("E100").await,
            Err(ApiError::Storage { .. })
        ));
    }
}
