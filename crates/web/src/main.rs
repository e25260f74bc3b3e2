use std::{sync::Arc, time::Duration};

use anyhow::Context;
use storage::Database;
use tokio::net::TcpListener;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

mod config;
mod error;
mod extract;
mod features;
mod middleware;
mod routes;
mod state;

use config::Config;
use features::{attempts, gl, scoreboard};
use middleware::auth::ApiKeys;
use state::AppState;

#[derive(OpenApi)]
#[openapi(
    paths(
        attempts::handlers::init_lifts,
        attempts::handlers::submit_weight,
        attempts::handlers::update_status,
        attempts::handlers::current_lifters,
        scoreboard::handlers::live_scoreboard,
        scoreboard::handlers::lift_leaderboard,
        gl::handlers::compute_gl,
        gl::handlers::required_lift,
    ),
    components(
        schemas(
            storage::dto::attempt::InitLiftsRequest,
            storage::dto::attempt::InitLiftsResponse,
            storage::dto::attempt::SubmitWeightRequest,
            storage::dto::attempt::SubmitWeightResponse,
            storage::dto::attempt::UpdateStatusRequest,
            storage::dto::attempt::UpdateStatusResponse,
            storage::dto::attempt::AthleteSummary,
            storage::dto::attempt::CurrentLifter,
            storage::dto::scoreboard::ScoreboardRow,
            storage::dto::scoreboard::LiftLeaderboardEntry,
            storage::dto::gl::ComputeGlRequest,
            storage::dto::gl::ComputeGlResponse,
            storage::dto::gl::RequiredLiftRequest,
            storage::dto::gl::RequiredLiftResponse,
            storage::models::Attempt,
            storage::models::AttemptStatus,
            storage::models::LiftType,
        )
    ),
    tags(
        (name = "attempts", description = "Lift attempt lifecycle"),
        (name = "scoreboard", description = "Live scoreboard and per-lift leaderboards"),
        (name = "gl", description = "IPF GL points calculator"),
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
                        .bearer_format("API Key")
                        .build(),
                ),
            )
        }
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

    tracing::info!("Starting meet API");

    let config = Config::from_env().context("Failed to load API configuration")?;
    tracing::info!("Configuration loaded successfully");

    let api_keys = ApiKeys::from_config(&config.official_api_keys, &config.athlete_api_keys)
        .map_err(anyhow::Error::msg)
        .context("Failed to parse API keys")?;
    if api_keys.is_empty() {
        tracing::warn!("No API keys configured, attempt mutations will be rejected");
    } else {
        tracing::info!("Loaded {} API keys", api_keys.len());
    }

    tracing::info!(
        "Connecting to database at: {}",
        config
            .database_url
            .split('@')
            .next_back()
            .unwrap_or("unknown")
    );
    let db = Database::new(&config.database_url)
        .await
        .context("Failed to initialize database")?;
    tracing::info!("Database connection established");

    tracing::info!("Running database migrations");
    db.run_migrations()
        .await
        .context("Failed to run migrations")?;
    tracing::info!("Database migrations completed successfully");

    let state = AppState::new(Arc::new(db));

    let cors = CorsLayer::very_permissive().max_age(Duration::from_secs(3600));

    let app = routes::router(state, api_keys)
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .layer(TraceLayer::new_for_http())
        .layer(cors);

    let bind_address = format!("{}:{}", config.host, config.port);
    let listener = TcpListener::bind(&bind_address)
        .await
        .with_context(|| format!("Failed to bind {bind_address}"))?;

    tracing::info!("Starting server at http://{}", bind_address);
    tracing::info!(
        "Swagger UI available at http://{}/swagger-ui/",
        bind_address
    );

    axum::serve(listener, app).await?;

    Ok(())
}
