use crate::error::ErrorBody;
use crate::model::employee::EmployeeRecord;
use crate::model::validation::FieldError;
use crate::models::{EmailReq, JobApplicationReq, MessageResponse};
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Employee Records API",
        version = "1.0.0",
        description = r#"
## Employee Records Service

A small HR backend over a single collection of employee records, plus
transactional email.

### 🔹 Key Features
- **Employee Records**
  - Create, list, view and partially update employees by their Emp/IC Code
- **Notifications**
  - Send a plain email to HR
  - Submit a job application with a resume attached

### 📦 Response Format
- JSON bodies; errors are `{"message": "..."}`
- Validation failures also list the offending fields under `errors`
- Passwords are stored hashed and never returned

---
Built with **Rust**, **Actix Web**, **MongoDB**, **lettre** and **Utoipa**.
"#,
    ),
    paths(
        crate::api::employee::create_employee,
        crate::api::employee::list_employees,
        crate::api::employee::get_employee,
        crate::api::employee::update_employee,

        crate::api::notification::send_email,
        crate::api::notification::apply_job
    ),
    components(
        schemas(
            EmployeeRecord,
            FieldError,
            ErrorBody,
            EmailReq,
            JobApplicationReq,
            MessageResponse
        )
    ),
    tags(
        (name = "Employee", description = "Employee record APIs"),
        (name = "Notification", description = "Email and job application APIs"),
    )
)]
pub struct ApiDoc;
