use utoipa::OpenApi;

/// OpenAPI Specification Documentation
///
/// Defines the REST contract with utoipa procedural macros. The GraphQL
/// endpoint is listed by tag only; its own schema is served by introspection.
///
/// # Endpoints
/// - Health Check: `GET /api/v1/health`
/// - Email Validation: `POST /api/v1/validate-email`
/// - List Cleaning: `POST /api/v1/clean-list`
///
/// # Note
/// The OpenAPI spec is generated at compile time from these annotations. Any changes
/// to the API surface should be reflected here first to maintain documentation accuracy.
#[derive(OpenApi)]
#[openapi(
    paths(
        crate::routes::health::health,
        crate::routes::email::validate_email,
        crate::routes::email::clean_list,
    ),
    components(
        schemas(
            crate::models::health::HealthResponse,
            crate::models::error::ErrorResponse,
            crate::models::email::EmailRequest,
            crate::models::email::CleanListRequest,
            crate::models::email::ValidationOptions,
            crate::models::email::Verdict,
            crate::models::email::AddressRecord,
            crate::models::email::ExtendedRecord,
            crate::models::email::DuplicateRecord,
            crate::models::email::BatchReport,
            crate::models::email::ReportSummary,
            crate::models::email::DomainCount,
            crate::models::email::CleanListResponse,
        )
    ),
    tags(
        (name = "Health Check", description = "Service health monitoring endpoints"),
        (name = "Email Validation", description = "Single address verdicts and list cleaning"),
        (name = "GraphQL", description = "GraphQL API for interacting with all service features")
    ),
    info(
        description = "Plausibility checks and list cleaning for email addresses, over REST and GraphQL",
        title = "Email List Cleaner API",
        version = "0.1.0",
    )
)]
pub struct ApiDoc;
