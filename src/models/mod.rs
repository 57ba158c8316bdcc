/// # Health Status Response
///
/// Represents the operational status of the service with a timestamp.
/// Used as the response format for health check endpoints.
///
/// ## Example JSON
/// ```json
/// {
///   "status": "UP",
///   "timestamp": "2024-03-10T15:30:45.123456789Z"
/// }
/// ```
pub mod health;

/// # Email Models
///
/// Validation options, per-address verdicts and the report produced by a list
/// run, shared by the REST handlers, the GraphQL resolvers and the worker.
pub mod email;

/// # Error Body
///
/// JSON body returned by REST endpoints when a request cannot be served.
///
/// ## Example JSON
/// ```json
/// {
///   "code": "EMPTY_INPUT",
///   "message": "No email addresses found in the input"
/// }
/// ```
pub mod error;
