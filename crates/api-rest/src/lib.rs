//! # API REST
//!
//! REST API implementation for the contacts service.
//!
//! Handles:
//! - HTTP endpoints with axum
//! - Bearer-token authentication of every `/contacts` route
//! - OpenAPI/Swagger documentation
//! - REST-specific concerns (JSON serialisation, status codes, CORS)
//!
//! Uses `api-shared` for schemas and identity, and `contacts-core` for data operations.

#![warn(rust_2018_idioms)]

pub mod auth;
pub mod config;
pub mod error;
pub mod extract;
pub mod handlers;

use api_shared::{ContactReq, ContactRes, ErrorRes, HealthRes, IdentityProvider};
use axum::routing::{delete, get, put};
use axum::Router;
use contacts_core::{ContactService, SqliteContactStore, SystemClock};
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};
use utoipa_swagger_ui::SwaggerUi;

pub use auth::CurrentUser;
pub use config::ServerConfig;
pub use error::{ApiError, ApiResult};

/// Application state for the REST API server
///
/// Shared by all request handlers: the contact service and the identity provider used to
/// authenticate callers.
#[derive(Clone)]
pub struct AppState {
    pub(crate) contacts: ContactService,
    pub(crate) identity: Arc<dyn IdentityProvider>,
}

impl AppState {
    pub fn new(contacts: ContactService, identity: Arc<dyn IdentityProvider>) -> Self {
        Self { contacts, identity }
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(
        handlers::health,
        handlers::read_contacts,
        handlers::read_contact,
        handlers::create_contact,
        handlers::remove_contact,
        handlers::update_contact,
        handlers::read_contact_by_first_name,
        handlers::read_contact_by_last_name,
        handlers::read_contact_by_email,
        handlers::upcoming_birthdays,
    ),
    components(schemas(HealthRes, ContactReq, ContactRes, ErrorRes)),
    modifiers(&BearerAuth),
    tags((name = "contacts", description = "Personal contacts"))
)]
pub struct ApiDoc;

struct BearerAuth;

impl Modify for BearerAuth {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "bearer",
            SecurityScheme::Http(HttpBuilder::new().scheme(HttpAuthScheme::Bearer).build()),
        );
    }
}

/// Builds the REST router, including Swagger UI at `/swagger-ui`.
///
/// The list/create and upcoming-birthdays routes also answer with a trailing slash, which existing
/// clients use.
pub fn app(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handlers::health))
        .route(
            "/contacts",
            get(handlers::read_contacts).post(handlers::create_contact),
        )
        .route(
            "/contacts/",
            get(handlers::read_contacts).post(handlers::create_contact),
        )
        .route(
            "/contacts/upcoming_birthdays",
            get(handlers::upcoming_birthdays),
        )
        .route(
            "/contacts/upcoming_birthdays/",
            get(handlers::upcoming_birthdays),
        )
        .route("/contacts/:contact_id", get(handlers::read_contact))
        .route(
            "/contacts/delete/:contact_id",
            delete(handlers::remove_contact),
        )
        .route("/contacts/update/:contact_id", put(handlers::update_contact))
        .route(
            "/contacts/contact_by_first_name/:contact_first_name",
            get(handlers::read_contact_by_first_name),
        )
        .route(
            "/contacts/contact_by_last_name/:contact_last_name",
            get(handlers::read_contact_by_last_name),
        )
        .route(
            "/contacts/contact_by_email/:contact_email",
            get(handlers::read_contact_by_email),
        )
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Opens the configured store and serves the REST API until the server stops.
///
/// # Errors
/// Returns an error if:
/// - the contacts database cannot be opened or migrated,
/// - the server address cannot be bound, or
/// - the HTTP server fails while running.
pub async fn serve(cfg: ServerConfig) -> anyhow::Result<()> {
    if cfg.tokens.is_empty() {
        tracing::warn!("CONTACTS_API_TOKENS is empty; every /contacts request will be rejected");
    } else {
        tracing::info!("Loaded {} API token(s)", cfg.tokens.len());
    }

    let store = SqliteContactStore::open(cfg.core.database())?;
    let contacts = ContactService::new(cfg.core.clone(), Arc::new(store), Arc::new(SystemClock));
    let state = AppState::new(contacts, Arc::new(cfg.tokens));

    let listener = tokio::net::TcpListener::bind(&cfg.addr).await?;
    tracing::info!("Contacts REST API listening on {}", cfg.addr);
    axum::serve(listener, app(state)).await?;

    Ok(())
}
