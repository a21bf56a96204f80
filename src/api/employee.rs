use crate::{error::ApiError, gateway::EmployeeGateway};
use actix_web::{HttpResponse, web};
use serde_json::Value;

/// Create Employee
#[utoipa::path(
    post,
    path = "/users",
    request_body(
        content = Object,
        description = "Full employee record; every field is required",
        example = json!({
            "Emp/IC Code": "E100",
            "Employee Name": "Asha Bose",
            "Business Title": "Associate",
            "Category": "Delivery",
            "Station Code": "DEL1",
            "Location": "Gurgaon",
            "Mail ID": "asha.bose@example.com",
            "DOB": "1994-02-11",
            "PAN CARD": "ABCDE1234F",
            "Mobile Number": 9876543210u64,
            "Password": "s3cret"
        })
    ),
    responses(
        (status = 201, description = "Employee created", body = crate::model::employee::EmployeeRecord),
        (status = 400, description = "Validation failed", body = crate::error::ErrorBody),
        (status = 409, description = "Emp/IC Code already in use", body = crate::error::ErrorBody),
        (status = 500, description = "Internal server error", body = crate::error::ErrorBody)
    ),
    tag = "Employee"
)]
pub async fn create_employee(
    gateway: web::Data<EmployeeGateway>,
    payload: web::Json<Value>,
) -> Result<HttpResponse, ApiError> {
    let record = gateway.create(&payload).await?;
    Ok(HttpResponse::Created().json(record))
}

/// List Employees
#[utoipa::path(
    get,
    path = "/users",
    responses(
        (status = 200, description = "All employee records", body = [crate::model::employee::EmployeeRecord]),
        (status = 500, description = "Internal server error", body = crate::error::ErrorBody)
    ),
    tag = "Employee"
)]
pub async fn list_employees(
    gateway: web::Data<EmployeeGateway>,
) -> Result<HttpResponse, ApiError> {
    let records = gateway.list_all().await?;
    Ok(HttpResponse::Ok().json(records))
}

/// Get Employee by Emp/IC Code
#[utoipa::path(
    get,
    path = "/users/byEmpIC/{empIC}",
    params(
        ("empIC" = String, Path, description = "Emp/IC Code")
    ),
    responses(
        (status = 200, description = "Employee found", body = crate::model::employee::EmployeeRecord),
        (status = 404, description = "Employee not found", body = crate::error::ErrorBody, example = json!({
            "message": "User not found"
        })),
        (status = 500, description = "Internal server error", body = crate::error::ErrorBody)
    ),
    tag = "Employee"
)]
pub async fn get_employee(
    gateway: web::Data<EmployeeGateway>,
    path: web::Path<String>,
) -> Result<HttpResponse, ApiError> {
    let emp_code = path.into_inner();
    let record = gateway.get_by_emp_code(&emp_code).await?;
    Ok(HttpResponse::Ok().json(record))
}

/// Update Employee by Emp/IC Code
#[utoipa::path(
    put,
    path = "/users/byEmpIC/{empIC}",
    params(
        ("empIC" = String, Path, description = "Emp/IC Code")
    ),
    request_body(
        content = Object,
        description = "Any subset of the employee fields",
        example = json!({ "Location": "Delhi" })
    ),
    responses(
        (status = 200, description = "Updated employee", body = crate::model::employee::EmployeeRecord),
        (status = 400, description = "Validation failed", body = crate::error::ErrorBody),
        (status = 404, description = "Employee not found", body = crate::error::ErrorBody),
        (status = 409, description = "Emp/IC Code already in use", body = crate::error::ErrorBody),
        (status = 500, description = "Internal server error", body = crate::error::ErrorBody)
    ),
    tag = "Employee"
)]
pub async fn update_employee(
    gateway: web::Data<EmployeeGateway>,
    path: web::Path<String>,
    payload: web::Json<Value>,
) -> Result<HttpResponse, ApiError> {
    let emp_code = path.into_inner();
    let record = gateway.update_by_emp_code(&emp_code, &payload).await?;
    Ok(HttpResponse::Ok().json(record))
}
