use std::sync::Arc;

use anyhow::Context;
use storage::{Backend, BackendKind, Database, RestBackend};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

mod config;
mod error;
mod features;
mod routes;
mod state;

use config::Config;
use features::{competitions, participants, registrations};
use state::AppState;

#[derive(OpenApi)]
#[openapi(
    paths(
        registrations::handlers::register_participant,
        participants::handlers::list_participants,
        participants::handlers::count_participants,
        competitions::handlers::list_competitions,
        competitions::handlers::get_competition_stats,
        competitions::handlers::get_competition_roster,
        competitions::handlers::reconcile_catalog,
    ),
    components(
        schemas(
            storage::dto::registration::RegistrationRequest,
            storage::dto::registration::RegistrationResponse,
            storage::dto::participant::ParticipantView,
            storage::dto::participant::ParticipantCountResponse,
            storage::dto::competition::CompetitionStats,
            storage::dto::competition::CompetitionRoster,
            storage::dto::competition::RosterCompetition,
            storage::dto::competition::RosterEntry,
            storage::catalog::CatalogReport,
            storage::catalog::SlugMismatch,
            storage::models::Competition,
            storage::models::Category,
        )
    ),
    tags(
        (name = "registrations", description = "Competition sign-up"),
        (name = "participants", description = "Registered participants"),
        (name = "competitions", description = "Competition catalog, statistics and rosters"),
    )
)]
struct ApiDoc;

async fn connect_backend(config: &Config) -> anyhow::Result<Arc<dyn Backend>> {
    match BackendKind::from_url(&config.backend_url)? {
        BackendKind::Postgres => {
            tracing::info!(
                "Connecting to database at: {}",
                config
                    .backend_url
                    .split('@')
                    .next_back()
                    .unwrap_or("unknown")
            );
            let db = Database::connect(&config.backend_url, &config.backend_key)
                .await
                .context("Failed to initialize database")?;
            tracing::info!("Database connection established");

            if config.run_migrations {
                tracing::info!("Running database migrations");
                db.run_migrations()
                    .await
                    .context("Failed to run migrations")?;
                tracing::info!("Database migrations completed successfully");
            }

            Ok(Arc::new(db))
        }
        BackendKind::Rest => {
            tracing::info!("Using hosted backend at: {}", config.backend_url);
            let backend = RestBackend::new(&config.backend_url, &config.backend_key)
                .context("Failed to initialize hosted backend client")?;
            Ok(Arc::new(backend))
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

    tracing::info!("Starting Merdeka registration API");

    let config = Config::from_env().context("Failed to load API configuration")?;
    tracing::info!("Configuration loaded successfully");

    let backend = connect_backend(&config).await?;
    let app = routes::app(AppState::new(backend))
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()));

    let bind_address = config.bind_address();
    let listener = tokio::net::TcpListener::bind(&bind_address)
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
