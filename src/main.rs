use dotenvy::dotenv;
use rolodex::logging::init_tracing;
use rolodex::metrics::{init_metrics, metrics_enabled};
use rolodex::modules::users::service::UserService;
use rolodex::router::init_router;
use rolodex::state::AppState;
use rolodex_config::{AdminSeedConfig, DatabaseConfig, ServerConfig};
use rolodex_db::{PgPool, UnitOfWork, init_db_pool, run_migrations};
use tracing::{error, info, warn};

#[tokio::main]
async fn main() {
    dotenv().ok();

    let _guards = init_tracing();

    let metrics_handle = if metrics_enabled() {
        match init_metrics() {
            Ok(handle) => Some(handle),
            Err(e) => {
                warn!(error = %e, "Prometheus recorder not installed; /metrics disabled");
                None
            }
        }
    } else {
        None
    };

    let database =
        DatabaseConfig::from_env().unwrap_or_else(|e| fail("Invalid database configuration", e));
    let pool = init_db_pool(&database)
        .await
        .unwrap_or_else(|e| fail("Failed to connect to database", e));
    run_migrations(&pool)
        .await
        .unwrap_or_else(|e| fail("Failed to run migrations", e));
    info!("Database ready");

    if let Some(seed) = AdminSeedConfig::from_env() {
        if let Err(e) = bootstrap_admin(&pool, &seed).await {
            fail("Failed to bootstrap admin", e);
        }
    }

    let state = AppState::from_env(pool);
    let app = init_router(state, metrics_handle);

    let server = ServerConfig::from_env();
    let addr = server.addr();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .unwrap_or_else(|e| fail("Failed to bind listener", e));

    info!(addr = %addr, "🚀 Server running");
    info!("📚 Swagger UI available at http://{}/swagger-ui", addr);
    info!("📖 Scalar UI available at http://{}/scalar", addr);

    if let Err(e) = axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
    {
        fail("Server error", e);
    }

    info!("Server stopped");
}

async fn bootstrap_admin(
    pool: &PgPool,
    seed: &AdminSeedConfig,
) -> Result<(), rolodex_core::AppError> {
    let mut uow = UnitOfWork::begin(pool).await?;
    if UserService::ensure_admin(&mut uow, seed).await? {
        info!(email = %seed.email, "Bootstrap admin ready");
    }
    uow.commit().await
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}

fn fail<E: std::fmt::Display>(message: &str, e: E) -> ! {
    error!(error = %e, "{}", message);
    eprintln!("❌ {}: {}", message, e);
    std::process::exit(1);
}
