use crate::models::email::{CleanListRequest, CleanListResponse, EmailRequest, Verdict};
use crate::models::error::ErrorResponse;
use crate::worker::{ValidationWorker, parse_addresses};
use actix_web::{HttpResponse, Responder, post, web};
use tracing::info;

/// # Email Validation Endpoint
///
/// Runs one address through the full check pipeline: format, shape,
/// heuristics, role-based, disposable, MX and A record checks. The first
/// failing check decides the reason; lookups that fail count as passed.
///
/// ## Responses
/// - **200 OK**: The verdict. A rejected address is still a 200, with
///   `valid: false` and a `reason`.
///
/// ## Example Request
/// ```json
/// { "email": "user@example.com", "options": { "allow_role_based": true } }
/// ```
#[utoipa::path(
    post,
    path = "/api/v1/validate-email",
    request_body = EmailRequest,
    responses(
        (status = 200, description = "Verdict for the address", body = Verdict)
    ),
    tag = "Email Validation"
)]
#[post("/validate-email")]
pub async fn validate_email(
    req: web::Json<EmailRequest>,
    worker: web::Data<ValidationWorker>,
) -> impl Responder {
    let verdict = worker.validate_email(&req.email, &req.options).await;
    HttpResponse::Ok().json(verdict)
}

/// # List Cleaning Endpoint
///
/// Validates a pasted list (one address per line, `Name <address>` accepted),
/// drops duplicates unless `allow_duplicates` is set, and returns the report,
/// its summary and the per-line log.
///
/// ## Responses
/// - **200 OK**: Report, summary and log
/// - **400 Bad Request**: `EMPTY_INPUT` when the text holds no addresses
///
/// ## Example Request
/// ```json
/// { "text": "Jane <jane@acme.io>\njohn@acme.io", "allow_duplicates": false }
/// ```
#[utoipa::path(
    post,
    path = "/api/v1/clean-list",
    request_body = CleanListRequest,
    responses(
        (status = 200, description = "Cleaned list", body = CleanListResponse),
        (status = 400, description = "No addresses in the input", body = ErrorResponse)
    ),
    tag = "Email Validation"
)]
#[post("/clean-list")]
pub async fn clean_list(
    req: web::Json<CleanListRequest>,
    worker: web::Data<ValidationWorker>,
) -> impl Responder {
    if parse_addresses(&req.text).is_empty() {
        return HttpResponse::BadRequest().json(ErrorResponse::new(
            "EMPTY_INPUT",
            "No email addresses found in the input",
        ));
    }

    let response = worker.clean_list(&req.text, &req.batch_options()).await;
    info!(
        "clean-list served: {} rows, {} valid",
        response.report.total, response.report.valid_count
    );

    HttpResponse::Ok().json(response)
}

/// # Route Configuration
///
/// - `POST /validate-email`
/// - `POST /clean-list`
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(validate_email).service(clean_list);
}
