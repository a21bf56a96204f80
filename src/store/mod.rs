use crate::model::employee::{EmployeeDocument, EmployeePatch};
use async_trait::async_trait;
use derive_more::Display;

#[cfg(test)]
pub mod memory;
pub mod mongo;

#[derive(Debug, Display)]
pub enum StoreError {
    #[display(fmt = "duplicate Emp/IC Code `{}`", emp_code)]
    Duplicate { emp_code: String },

    #[display(fmt = "{}", message)]
    Backend { message: String },
}

/// Persistence for employee documents, keyed by Emp/IC Code.
#[async_trait]
pub trait EmployeeStore: Send + Sync {
    /// Persists a new document and returns it with its store id set.
    async fn insert(&self, doc: EmployeeDocument) -> Result<EmployeeDocument, StoreError>;

    async fn list_all(&self) -> Result<Vec<EmployeeDocument>, StoreError>;

    async fn find_by_code(&self, emp_code: &str) -> Result<Option<EmployeeDocument>, StoreError>;

    /// Applies the patch to the matching document and returns the document
    /// as it is after the update, or `None` when nothing matched.
    async fn update_by_code(
        &self,
        emp_code: &str,
        patch: &EmployeePatch,
    ) -> Result<Option<EmployeeDocument>, StoreError>;
}
