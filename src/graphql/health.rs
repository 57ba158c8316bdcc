use crate::models::health::HealthResponse;
use async_graphql::{Context, Object, Result};

/// GraphQL representation of service health status
///
/// Mirrors the REST health response.
#[derive(Debug)]
pub struct Health {
    pub status: String,
    pub timestamp: String,
}

impl From<HealthResponse> for Health {
    fn from(response: HealthResponse) -> Self {
        Self {
            status: response.status,
            timestamp: response.timestamp,
        }
    }
}

#[Object]
impl Health {
    /// Current service status, "UP" while the service answers.
    async fn status(&self) -> &str {
        &self.status
    }

    /// RFC 3339 timestamp of the check, UTC.
    async fn timestamp(&self) -> &str {
        &self.timestamp
    }
}

/// Root query type for health-related GraphQL operations
#[derive(Default)]
pub struct HealthQuery;

#[Object]
impl HealthQuery {
    async fn health(&self, _ctx: &Context<'_>) -> Result<Health> {
        Ok(Health::from(HealthResponse::up()))
    }
}
