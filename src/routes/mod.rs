use actix_web::web;

/// # Health Check Endpoint
///
/// Returns the current health status of the service along with a timestamp.
///
/// ## Example Response
///
/// ```json
/// {
///   "status": "UP",
///   "timestamp": "2023-10-05T12:34:56.789Z"
/// }
/// ```
pub mod health;

/// # Email Endpoints
///
/// - `POST /validate-email`: verdict for one address
/// - `POST /clean-list`: report, summary and log for a pasted list
///
/// ## Example Request
/// ```json
/// { "email": "user@example.com" }
/// ```
pub mod email;

/// # GraphQL Endpoints
///
/// - `POST /graphql`: query execution
/// - `GET /playground`: interactive playground
pub mod graphql;

/// # API Route Configuration
///
/// Sets up versioned API endpoints under the `/api/v1` base path.
///
/// ```text
/// GET  /api/v1/health         - Service health status
/// POST /api/v1/validate-email - Single address verdict
/// POST /api/v1/clean-list     - List cleaning run
/// POST /api/v1/graphql        - GraphQL endpoint
/// GET  /api/v1/playground     - GraphQL playground
/// ```
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1")
            .configure(health::configure_routes)
            .configure(email::configure_routes)
            .configure(graphql::configure_routes),
    );
}
