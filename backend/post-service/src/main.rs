use actix_cors::Cors;
use actix_web::{middleware::Logger, web, App, HttpServer};
use anyhow::Context;
use post_service::config::{Config, CorsConfig, LogConfig, LogFormat};
use post_service::db::PgPostRepo;
use post_service::handlers::{self, AppState, HealthState};
use post_service::openapi::ApiDoc;
use post_service::services::PostService;
use std::sync::Arc;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

fn init_tracing(log: &LogConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("{},actix_web=info,sqlx=warn", log.level)));
    let registry = tracing_subscriber::registry().with(filter);

    match log.format {
        LogFormat::Json => registry.with(fmt::layer().json()).init(),
        LogFormat::Text => registry.with(fmt::layer()).init(),
    }
}

fn build_cors(config: &CorsConfig) -> Cors {
    let mut cors = Cors::default();
    if config.allows_any() {
        cors = cors.allow_any_origin();
    } else {
        for origin in config.origins() {
            cors = cors.allowed_origin(origin);
        }
    }
    cors.allow_any_method().allow_any_header().max_age(3600)
}

async fn shutdown_signal() {
    #[cfg(unix)]
    {
        use tokio::signal::unix::{signal, SignalKind};

        match signal(SignalKind::terminate()) {
            Ok(mut terminate) => {
                tokio::select! {
                    _ = tokio::signal::ctrl_c() => {},
                    _ = terminate.recv() => {},
                }
            }
            Err(e) => {
                tracing::warn!(error = %e, "SIGTERM handler unavailable, waiting for Ctrl+C only");
                let _ = tokio::signal::ctrl_c().await;
            }
        }
    }

    #[cfg(not(unix))]
    {
        let _ = tokio::signal::ctrl_c().await;
    }
}

/// Post Service
///
/// # Routes
///
/// - `/v1/post/*`, `/v1/posts/*` - post CRUD, reactions and listing
/// - `/healthz`, `/health/ready` - probes
/// - `/metrics` - Prometheus
/// - `/swagger/`, `/v1/openapi.json` - API docs, unless disabled
#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    if let Err(e) = dotenvy::dotenv() {
        if !e.not_found() {
            eprintln!("failed to load .env: {e}");
        }
    }

    let config = Config::from_env().context("invalid configuration")?;
    init_tracing(&config.log);

    tracing::info!(
        env = %config.app.env,
        workers = config.http.workers,
        request_timeout_ms = config.http.request_timeout.as_millis() as u64,
        "Starting post-service"
    );
    config.database.log_config();

    let pool = db_pool::create_pool(config.database.clone())
        .await
        .context("failed to create database pool")?;

    let repo = Arc::new(PgPostRepo::new(pool.clone()));
    let app_state = web::Data::new(AppState::new(
        PostService::new(repo),
        config.http.request_timeout,
    ));
    let health_state = web::Data::new(HealthState::new(pool.clone()));

    let cors_config = config.cors.clone();
    let swagger_enabled = config.http.swagger_enabled;
    if !swagger_enabled {
        tracing::info!("Swagger UI disabled");
    }

    let (host, port) = config.bind_address();
    tracing::info!("Starting HTTP server at {}:{}", host, port);

    let server = HttpServer::new(move || {
        App::new()
            .app_data(app_state.clone())
            .app_data(health_state.clone())
            .wrap(build_cors(&cors_config))
            .wrap(Logger::default())
            .wrap(tracing_actix_web::TracingLogger::default())
            .configure(|cfg| {
                if swagger_enabled {
                    cfg.service(ApiDoc::swagger_ui());
                }
            })
            .route(
                "/metrics",
                web::get().to(post_service::metrics::serve_metrics),
            )
            .route("/healthz", web::get().to(handlers::health::liveness))
            .route("/health/ready", web::get().to(handlers::health::readiness))
            .configure(handlers::configure)
    })
    .workers(config.http.workers)
    .disable_signals()
    .bind((host.as_str(), port))
    .with_context(|| format!("failed to bind {host}:{port}"))?
    .run();

    let server_handle = server.handle();

    tokio::select! {
        result = server => {
            result.context("HTTP server failed")?;
        }
        _ = shutdown_signal() => {
            tracing::info!("Shutdown signal received");
            server_handle.stop(true).await;
        }
    }

    pool.close().await;
    tracing::info!("post-service shut down");
    Ok(())
}
