use crate::{
    api::{employee, notification},
    error::ApiError,
};
use actix_web::{HttpRequest, HttpResponse, Responder, error::JsonPayloadError, get, web};
use serde_json::json;

#[get("/")]
async fn index() -> impl Responder {
    "Hello World!"
}

fn json_error(err: JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    ApiError::InvalidBody {
        message: format!("Invalid JSON body: {}", err),
    }
    .into()
}

pub async fn not_found() -> HttpResponse {
    HttpResponse::NotFound().json(json!({
        "message": "Route not found"
    }))
}

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::JsonConfig::default().error_handler(json_error))
        .service(index)
        // /users
        .service(
            web::resource("/users")
                .route(web::post().to(employee::create_employee))
                .route(web::get().to(employee::list_employees)),
        )
        // /users/byEmpIC/{empIC}
        .service(
            web::resource("/users/byEmpIC/{empIC}")
                .route(web::get().to(employee::get_employee))
                .route(web::put().to(employee::update_employee)),
        )
        .service(web::resource("/send-email").route(web::post().to(notification::send_email)))
        .service(web::resource("/apply-job").route(web::post().to(notification::apply_job)));
}
