use crate::model::employee::{EmployeeDocument, EmployeeField, EmployeePatch};
use serde::Serialize;
use serde_json::{Map, Value};
use std::str::FromStr;
use strum::IntoEnumIterator;
use utoipa::ToSchema;

/// A single field-level validation failure.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct FieldError {
    #[schema(example = "Mobile Number")]
    pub field: String,
    #[schema(example = "Path `Mobile Number` is required.")]
    pub message: String,
}

impl FieldError {
    fn required(field: EmployeeField) -> Self {
        Self {
            field: field.to_string(),
            message: format!("Path `{}` is required.", field),
        }
    }

    fn cast(field: EmployeeField, value: &Value) -> Self {
        let target = if field.is_numeric() { "Number" } else { "string" };
        Self {
            field: field.to_string(),
            message: format!(
                "Cast to {} failed for value {} (type {}) at path \"{}\"",
                target,
                value,
                json_type(value),
                field
            ),
        }
    }

    fn payload(message: &str) -> Self {
        Self {
            field: String::new(),
            message: message.to_string(),
        }
    }
}

/// Joins field errors into one human readable line.
pub fn summarize(errors: &[FieldError]) -> String {
    let details = errors
        .iter()
        .map(|e| {
            if e.field.is_empty() {
                e.message.clone()
            } else {
                format!("{}: {}", e.field, e.message)
            }
        })
        .collect::<Vec<_>>()
        .join(", ");
    format!("Employee validation failed: {}", details)
}

fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "Array",
        Value::Object(_) => "Object",
    }
}

fn as_object(payload: &Value) -> Result<&Map<String, Value>, Vec<FieldError>> {
    payload
        .as_object()
        .ok_or_else(|| vec![FieldError::payload("Payload must be a JSON object")])
}

/// Casts a JSON value to the text stored for `field`.
fn cast_text(field: EmployeeField, value: &Value) -> Result<String, FieldError> {
    let text = match value {
        Value::Null => return Err(FieldError::required(field)),
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Array(_) | Value::Object(_) => return Err(FieldError::cast(field, value)),
    };
    if text.is_empty() {
        return Err(FieldError::required(field));
    }
    Ok(text)
}

/// Casts a JSON value to a mobile number: a non-negative integer, either
/// given as a number or as a string of digits.
fn cast_number(field: EmployeeField, value: &Value) -> Result<i64, FieldError> {
    let parsed = match value {
        Value::Null => return Err(FieldError::required(field)),
        Value::String(s) if s.trim().is_empty() => return Err(FieldError::required(field)),
        Value::Number(n) => n.as_i64(),
        Value::String(s) => s.trim().parse::<i64>().ok(),
        _ => None,
    };
    match parsed {
        Some(n) if n >= 0 => Ok(n),
        _ => Err(FieldError::cast(field, value)),
    }
}

/// Validates a full employee payload for creation.
///
/// Every field is required. Unknown keys are ignored. The returned document
/// still carries the plaintext password; hashing is the caller's job.
pub fn validate_new(payload: &Value) -> Result<EmployeeDocument, Vec<FieldError>> {
    let obj = as_object(payload)?;
    let mut patch = EmployeePatch::default();
    let mut errors = Vec::new();

    for field in EmployeeField::iter() {
        let key: &str = field.as_ref();
        let value = obj.get(key).unwrap_or(&Value::Null);
        if field.is_numeric() {
            match cast_number(field, value) {
                Ok(n) => patch.mobile_number = Some(n),
                Err(e) => errors.push(e),
            }
        } else {
            match cast_text(field, value) {
                Ok(s) => patch.set_text(field, s),
                Err(e) => errors.push(e),
            }
        }
    }

    if !errors.is_empty() {
        return Err(errors);
    }

    Ok(EmployeeDocument {
        id: None,
        emp_code: patch.emp_code.unwrap_or_default(),
        employee_name: patch.employee_name.unwrap_or_default(),
        business_title: patch.business_title.unwrap_or_default(),
        category: patch.category.unwrap_or_default(),
        station_code: patch.station_code.unwrap_or_default(),
        location: patch.location.unwrap_or_default(),
        mail_id: patch.mail_id.unwrap_or_default(),
        date_of_birth: patch.date_of_birth.unwrap_or_default(),
        pan_card: patch.pan_card.unwrap_or_default(),
        mobile_number: patch.mobile_number.unwrap_or_default(),
        password: patch.password.unwrap_or_default(),
    })
}

/// Validates a partial update. Only supplied known keys are checked, each
/// with the same rules as on create; `_id` and unknown keys are ignored.
pub fn validate_patch(payload: &Value) -> Result<EmployeePatch, Vec<FieldError>> {
    let obj = as_object(payload)?;
    let mut patch = EmployeePatch::default();
    let mut errors = Vec::new();

    for (key, value) in obj {
        let Ok(field) = EmployeeField::from_str(key) else {
            continue;
        };
        if field.is_numeric() {
            match cast_number(field, value) {
                Ok(n) => patch.mobile_number = Some(n),
                Err(e) => errors.push(e),
            }
        } else {
            match cast_text(field, value) {
                Ok(s) => patch.set_text(field, s),
                Err(e) => errors.push(e),
            }
        }
    }

    if !errors.is_empty() {
        return Err(errors);
    }
    if patch.is_empty() {
        return Err(vec![FieldError::payload("No fields provided for update")]);
    }
    Ok(patch)
}
