use super::email::EmailQuery;
use super::health::HealthQuery;
use crate::worker::ValidationWorker;
use async_graphql::{EmptyMutation, EmptySubscription, MergedObject, Schema};

/// Root query: health plus the email operations.
#[derive(MergedObject, Default)]
pub struct QueryRoot(HealthQuery, EmailQuery);

pub type AppSchema = Schema<QueryRoot, EmptyMutation, EmptySubscription>;

/// Builds the schema with the worker available to every resolver.
pub fn create_schema(worker: ValidationWorker) -> AppSchema {
    Schema::build(QueryRoot::default(), EmptyMutation, EmptySubscription)
        .data(worker)
        .finish()
}
