use actix_web::{App, HttpServer, web::Data};
use email_list_cleaner::config::AppConfig;
use email_list_cleaner::graphql::schema::create_schema;
use email_list_cleaner::handlers::validation::dnsmx::{DohResolver, DomainLookup};
use email_list_cleaner::handlers::validation::lists::CuratedLists;
use email_list_cleaner::handlers::validation::validator::EmailValidator;
use email_list_cleaner::openapi::ApiDoc;
use email_list_cleaner::worker::ValidationWorker;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

/// Email List Cleaner Service Entry Point
///
/// Configures and launches the Actix-web HTTP server with:
/// - REST endpoints for single addresses and whole lists
/// - GraphQL endpoint powered by Async-GraphQL
/// - Swagger UI for API documentation
/// - Environment configuration via `.env` file
///
/// # Endpoints
/// - REST: `/api/v1/health`, `/api/v1/validate-email`, `/api/v1/clean-list`
/// - GraphQL: `/api/v1/graphql` (playground at `/api/v1/playground`)
/// - Swagger UI: `/swagger-ui/`
/// - OpenAPI spec: `/api-docs/openapi.json`
#[actix_web::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = AppConfig::from_env()?;
    let lists = CuratedLists::builtin()?;
    let resolver = DohResolver::new(&config.doh_endpoint, config.doh_timeout)?;
    info!("Resolving domains through {}", resolver.endpoint());

    // One lookup cache for the whole process.
    let lookup = DomainLookup::new(Arc::new(resolver));
    let worker = ValidationWorker::new(EmailValidator::new(lists, lookup))
        .with_chunking(config.chunk_size, config.chunk_timeout);
    let schema = create_schema(worker.clone());

    info!("Listening on {}:{}", config.host, config.port);
    HttpServer::new(move || {
        let openapi = ApiDoc::openapi();

        App::new()
            .app_data(Data::new(worker.clone()))
            .app_data(Data::new(schema.clone()))
            .configure(email_list_cleaner::routes::configure)
            .service(SwaggerUi::new("/swagger-ui/{_:.*}").url("/api-docs/openapi.json", openapi))
    })
    .bind((config.host.as_str(), config.port))?
    .run()
    .await?;

    Ok(())
}
