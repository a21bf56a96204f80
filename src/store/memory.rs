use crate::model::employee::{EmployeeDocument, EmployeeField, EmployeePatch};
use crate::store::{EmployeeStore, StoreError};
use async_trait::async_trait;
use mongodb::bson::oid::ObjectId;
use std::sync::Mutex;

/// Vec-backed store with the same uniqueness rule as the unique index.
#[derive(Default)]
pub struct MemoryEmployeeStore {
    docs: Mutex<Vec<EmployeeDocument>>,
    fail: bool,
}

impl MemoryEmployeeStore {
    /// A store whose every call fails with a backend error.
    pub fn failing() -> Self {
        Self {
            docs: Mutex::new(Vec::new()),
            fail: true,
        }
    }

    pub fn len(&self) -> usize {
        self.docs.lock().unwrap().len()
    }

    pub fn stored(&self, emp_code: &str) -> Option<EmployeeDocument> {
        self.docs
            .lock()
            .unwrap()
            .iter()
            .find(|d| d.emp_code == emp_code)
            .cloned()
    }

    fn check(&self) -> Result<(), StoreError> {
        if self.fail {
            return Err(StoreError::Backend {
                message: "store unavailable".into(),
            });
        }
        Ok(())
    }
}

#[async_trait]
impl EmployeeStore for MemoryEmployeeStore {
    async fn insert(&self, mut doc: EmployeeDocument) -> Result<EmployeeDocument, StoreError> {
        self.check()?;
        let mut docs = self.docs.lock().unwrap();
        if docs.iter().any(|d| d.emp_code == doc.emp_code) {
            return Err(StoreError::Duplicate {
                emp_code: doc.emp_code,
            });
        }
        doc.id = Some(ObjectId::new());
        docs.push(doc.clone());
        Ok(doc)
    }

    async fn list_all(&self) -> Result<Vec<EmployeeDocument>, StoreError> {
        self.check()?;
        Ok(self.docs.lock().unwrap().clone())
    }

    async fn find_by_code(&self, emp_code: &str) -> Result<Option<EmployeeDocument>, StoreError> {
        self.check()?;
        Ok(self.stored(emp_code))
    }

    async fn update_by_code(
        &self,
        emp_code: &str,
        patch: &EmployeePatch,
    ) -> Result<Option<EmployeeDocument>, StoreError> {
        self.check()?;
        let mut docs = self.docs.lock().unwrap();
        if !docs.iter().any(|d| d.emp_code == emp_code) {
            return Ok(None);
        }
        if let Some(new_code) = patch.emp_code.as_deref() {
            if new_code != emp_code && docs.iter().any(|d| d.emp_code == new_code) {
                return Err(StoreError::Duplicate {
                    emp_code: new_code.to_string(),
                });
            }
        }
        Ok(docs.iter_mut().find(|d| d.emp_code == emp_code).map(|doc| {
            apply(doc, patch);
            doc.clone()
        }))
    }
}

/// Mirrors a `$set` of the supplied fields.
fn apply(doc: &mut EmployeeDocument, patch: &EmployeePatch) {
    for (field, value) in patch.text_values() {
        let slot = match field {
            EmployeeField::EmpCode => &mut doc.emp_code,
            EmployeeField::EmployeeName => &mut doc.employee_name,
            EmployeeField::BusinessTitle => &mut doc.business_title,
            EmployeeField::Category => &mut doc.category,
            EmployeeField::StationCode => &mut doc.station_code,
            EmployeeField::Location => &mut doc.location,
            EmployeeField::MailId => &mut doc.mail_id,
            EmployeeField::DateOfBirth => &mut doc.date_of_birth,
            EmployeeField::PanCard => &mut doc.pan_card,
            EmployeeField::Password => &mut doc.password,
            EmployeeField::MobileNumber => continue,
        };
        *slot = value.to_string();
    }
    if let Some(mobile) = patch.mobile_number {
        doc.mobile_number = mobile;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn employee(code: &str) -> EmployeeDocument {
        EmployeeDocument {
            id: None,
            emp_code: code.into(),
            employee_name: "A B".into(),
            business_title: "Associate".into(),
            category: "Delivery".into(),
            station_code: "DEL1".into(),
            location: "Gurgaon".into(),
            mail_id: "a.b@example.com".into(),
            date_of_birth: "1990-01-01".into(),
            pan_card: "ABCDE1234F".into(),
            mobile_number: 9876543210,
            password: "$argon2id$stub".into(),
        }
    }

    #[actix_web::test]
    async fn update_only_touches_supplied_fields() {
        let store = MemoryEmployeeStore::default();
        let before = store.insert(employee("E100")).await.unwrap();
        let patch = EmployeePatch {
            location: Some("Delhi".into()),
            mobile_number: Some(9000000000),
            ..Default::default()
        };

        let after = store.update_by_code("E100", &patch).await.unwrap().unwrap();

        assert_eq!(after.location, "Delhi");
        assert_eq!(after.mobile_number, 9000000000);
        assert_eq!(after.id, before.id);
        assert_eq!(after.employee_name, before.employee_name);
        assert_eq!(after.password, before.password);
    }

    #[actix_web::test]
    async fn update_of_missing_code_is_none_even_on_collision() {
        let store = MemoryEmployeeStore::default();
        store.insert(employee("E100")).await.unwrap();
        let patch = EmployeePatch {
            emp_code: Some("E100".into()),
            ..Default::default()
        };

        let result = store.update_by_code("E404", &patch).await.unwrap();
        assert!(result.is_none());
        assert_eq!(store.len(), 1);
    }

    #[actix_web::test]
    async fn rename_onto_existing_code_is_duplicate() {
        let store = MemoryEmployeeStore::default();
        store.insert(employee("E100")).await.unwrap();
        store.insert(employee("E200")).await.unwrap();
        let patch = EmployeePatch {
            emp_code: Some("E100".into()),
            ..Default::default()
        };

        let err = store.update_by_code("E200", &patch).await.err().unwrap();
        assert!(matches!(err, StoreError::Duplicate { ref emp_code } if emp_code == "E100"));
        assert!(store.stored("E200").is_some());
    }
}
