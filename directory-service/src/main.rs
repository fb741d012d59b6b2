use std::net::SocketAddr;
use std::sync::Arc;

use directory_service::{
    build_router,
    config::ServiceConfig,
    db::{Directory, MongoDb, MongoDirectory},
    seed,
    services::{
        AuthService, DepartmentService, OrganizationService, PermissionResolver,
        RoleDepartmentAggregator, RoleService, TokenCodec, UserService,
    },
    AppState,
};
use service_core::observability::init_tracing;
use tokio::signal;

#[tokio::main]
async fn main() -> Result<(), service_core::error::AppError> {
    // Load configuration - fail fast if invalid
    let config = ServiceConfig::from_env()?;

    init_tracing(&config.log_level);

    tracing::info!(
        service = %config.service_name,
        version = %config.service_version,
        environment = ?config.environment,
        "Starting directory service"
    );

    let db = MongoDb::connect(&config.mongodb.uri, &config.mongodb.database).await?;
    db.initialize_indexes().await?;
    tracing::info!("Database initialized successfully");

    if config.seed {
        seed::add_permissions(&db).await?;
    }

    let directory: Arc<dyn Directory> = Arc::new(MongoDirectory::new(db.clone()));
    let codec = TokenCodec::new(&config.token);

    let aggregator = RoleDepartmentAggregator::new(directory.clone());
    let resolver = PermissionResolver::new(directory);
    let departments = DepartmentService::new(db.clone());
    let roles = RoleService::new(db.clone(), resolver, departments.clone());
    let users = UserService::new(db.clone(), aggregator);
    let auth = AuthService::new(db.clone(), codec.clone());
    let organizations = OrganizationService::new(db.clone());

    let state = AppState {
        config: config.clone(),
        db,
        codec,
        auth,
        users,
        roles,
        departments,
        organizations,
    };
    let app = build_router(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.common.port));
    tracing::info!(%addr, "Listening and serving");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}
