use crate::model::employee::{EmployeeDocument, EmployeePatch};
use crate::store::{EmployeeStore, StoreError};
use crate::utils::db_utils::{build_set_document, emp_code_filter};
use async_trait::async_trait;
use futures_util::TryStreamExt;
use mongodb::Collection;
use mongodb::error::{ErrorKind, WriteFailure};
use mongodb::options::{FindOneAndUpdateOptions, ReturnDocument};

const DUPLICATE_KEY: i32 = 11000;

pub struct MongoEmployeeStore {
    collection: Collection<EmployeeDocument>,
}

impl MongoEmployeeStore {
    pub fn new(collection: Collection<EmployeeDocument>) -> Self {
        Self { collection }
    }
}

fn is_duplicate_key(err: &mongodb::error::Error) -> bool {
    match err.kind.as_ref() {
        ErrorKind::Write(WriteFailure::WriteError(e)) => e.code == DUPLICATE_KEY,
        ErrorKind::Command(e) => e.code == DUPLICATE_KEY,
        _ => false,
    }
}

fn map_err(err: mongodb::error::Error, emp_code: &str) -> StoreError {
    if is_duplicate_key(&err) {
        StoreError::Duplicate {
            emp_code: emp_code.to_string(),
        }
    } else {
        StoreError::Backend {
            message: err.to_string(),
        }
    }
}

#[async_trait]
impl EmployeeStore for MongoEmployeeStore {
    async fn insert(&self, mut doc: EmployeeDocument) -> Result<EmployeeDocument, StoreError> {
        let result = self
            .collection
            .insert_one(&doc, None)
            .await
            .map_err(|e| map_err(e, &doc.emp_code))?;
        doc.id = result.inserted_id.as_object_id();
        Ok(doc)
    }

    async fn list_all(&self) -> Result<Vec<EmployeeDocument>, StoreError> {
        let backend = |e: mongodb::error::Error| StoreError::Backend {
            message: e.to_string(),
        };
        let cursor = self.collection.find(None, None).await.map_err(backend)?;
        cursor.try_collect().await.map_err(backend)
    }

    async fn find_by_code(&self, emp_code: &str) -> Result<Option<EmployeeDocument>, StoreError> {
        self.collection
            .find_one(emp_code_filter(emp_code), None)
            .await
            .map_err(|e| StoreError::Backend {
                message: e.to_string(),
            })
    }

    async fn update_by_code(
        &self,
        emp_code: &str,
        patch: &EmployeePatch,
    ) -> Result<Option<EmployeeDocument>, StoreError> {
        let options = FindOneAndUpdateOptions::builder()
            .return_document(ReturnDocument::After)
            .build();
        let target = patch.emp_code.as_deref().unwrap_or(emp_code);

        self.collection
            .find_one_and_update(emp_code_filter(emp_code), build_set_document(patch), options)
            .await
            .map_err(|e| map_err(e, target))
    }
}
