use anyhow::Context;
use axum::http::HeaderValue;
use storage::Database;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

mod config;
mod error;
mod features;
mod middleware;

use config::Config;
use features::{fields, health, matches, reviews, users, venues};

#[derive(OpenApi)]
#[openapi(
    paths(
        health::handlers::health,
        matches::handlers::create_match,
        matches::handlers::list_matches,
        matches::handlers::get_match,
        matches::handlers::get_match_by_invite,
        matches::handlers::join_match,
        matches::handlers::leave_match,
        matches::handlers::complete_match,
        matches::handlers::cancel_match,
        fields::handlers::list_fields,
        fields::handlers::generate_schedule,
        fields::handlers::list_slots,
        venues::handlers::list_venues,
        venues::handlers::create_venue,
        venues::handlers::create_field,
        venues::handlers::update_venue,
        venues::handlers::update_field,
        users::handlers::get_profile,
        users::handlers::update_profile,
        reviews::handlers::submit_reviews,
    ),
    components(
        schemas(
            health::handlers::HealthResponse,
            storage::dto::matches::CreateMatchRequest,
            storage::dto::matches::MatchSummary,
            storage::dto::matches::MatchDetailResponse,
            storage::dto::matches::PlayerInfo,
            storage::dto::matches::FieldInfo,
            storage::dto::field::CreateFieldRequest,
            storage::dto::field::FieldResponse,
            storage::dto::field::UpdateFieldRequest,
            storage::dto::field::GenerateScheduleRequest,
            storage::dto::field::GenerateScheduleResponse,
            storage::dto::field::SlotResponse,
            storage::dto::venue::CreateVenueRequest,
            storage::dto::venue::UpdateVenueRequest,
            storage::dto::venue::VenueResponse,
            storage::dto::user::UserProfileResponse,
            storage::dto::user::UpdateProfileRequest,
            storage::dto::review::ReviewInput,
            storage::dto::review::NoShowInput,
            storage::dto::review::SubmitReviewsRequest,
            storage::dto::review::SubmitReviewsResponse,
            storage::dto::common::PaginationMeta,
            storage::models::MatchStatus,
            storage::models::SlotStatus,
            storage::models::ReviewType,
        )
    ),
    tags(
        (name = "matches", description = "Match lifecycle, roster and waitlist"),
        (name = "fields", description = "Fields and their slot schedules"),
        (name = "venues", description = "Venue owners and their fields"),
        (name = "users", description = "Player profiles"),
        (name = "reviews", description = "Post-match reviews and no-show marks"),
        (name = "health", description = "Service health"),
    ),
    modifiers(&SecurityAddon)
)]
struct ApiDoc;

struct SecurityAddon;

impl utoipa::Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                utoipa::openapi::security::SecurityScheme::Http(
                    utoipa::openapi::security::HttpBuilder::new()
                        .scheme(utoipa::openapi::security::HttpAuthScheme::Bearer)
                        .bearer_format("Access token")
                        .build(),
                ),
            )
        }
    }
}

fn cors_layer(config: &Config) -> anyhow::Result<CorsLayer> {
    let cors = CorsLayer::new().allow_methods(Any).allow_headers(Any);

    match &config.cors_allowed_origin {
        Some(origin) => {
            let origin: HeaderValue = origin
                .parse()
                .context("CORS_ALLOWED_ORIGIN is not a valid origin")?;
            Ok(cors.allow_origin(origin))
        }
        None => Ok(cors.allow_origin(Any)),
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()),
        )
        .with_target(true)
        .with_file(true)
        .with_line_number(true)
        .init();

    tracing::info!("Starting pickup match API");

    let config = Config::from_env().context("Failed to load API configuration")?;
    tracing::info!("Configuration loaded successfully");

    tracing::info!(
        "Connecting to database at: {}",
        config
            .database_url
            .split('@')
            .next_back()
            .unwrap_or("unknown")
    );
    let db = Database::with_max_connections(&config.database_url, config.database_max_connections)
        .await
        .context("Failed to initialize database")?;
    tracing::info!(
        max_connections = config.database_max_connections,
        "Database connection established"
    );

    tracing::info!("Running database migrations");
    db.run_migrations()
        .await
        .context("Failed to run migrations")?;
    tracing::info!("Database migrations completed successfully");

    let app = features::api_router()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .layer(cors_layer(&config)?)
        .layer(TraceLayer::new_for_http())
        .with_state(db);

    let bind_address = config.bind_address();
    let listener = tokio::net::TcpListener::bind(&bind_address)
        .await
        .with_context(|| format!("Failed to bind {bind_address}"))?;

    tracing::info!("Starting server at http://{}", bind_address);
    tracing::info!(
        "Swagger UI available at http://{}/swagger-ui/",
        bind_address
    );

    axum::serve(listener, app)
        .await
        .context("Server terminated unexpectedly")?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_openapi_lists_match_routes() {
        let doc = ApiDoc::openapi();
        assert!(doc.paths.paths.contains_key("/api/matches/{match_id}/join"));
        assert!(doc.paths.paths.contains_key("/api/reviews/match/{match_id}"));
        assert!(doc.paths.paths.contains_key("/api/fields/{field_id}/generate-schedule"));
        assert!(doc.paths.paths.contains_key("/api/venues/{venue_id}"));
        assert!(doc.paths.paths.contains_key("/api/venues/fields/{field_id}"));
    }
}
