use crate::model::employee::{EmployeeField, EmployeePatch};
use mongodb::bson::{Bson, Document, doc};

/// ===============================
/// Build the `$set` update for a patch
/// ===============================
pub fn build_set_document(patch: &EmployeePatch) -> Document {
    let mut set = Document::new();

    for (field, value) in patch.text_values() {
        set.insert(field.to_string(), Bson::String(value.to_string()));
    }
    if let Some(mobile) = patch.mobile_number {
        set.insert(EmployeeField::MobileNumber.to_string(), Bson::Int64(mobile));
    }

    doc! { "$set": set }
}

/// ===============================
/// Filter matching one Emp/IC Code
/// ===============================
pub fn emp_code_filter(emp_code: &str) -> Document {
    let mut filter = Document::new();
    filter.insert(EmployeeField::EmpCode.to_string(), emp_code);
    filter
}
