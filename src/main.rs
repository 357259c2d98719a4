//! GradeFlow backend server binary.

use std::sync::Arc;
use std::time::Duration;

use axum::http::HeaderValue;
use axum::routing::get;
use axum::Router;
use secrecy::ExposeSecret;
use sqlx::postgres::PgPoolOptions;
use tower_http::cors::{Any, CorsLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use tracing::info;

use gradeflow::adapters::clock::SystemClock;
use gradeflow::adapters::http::billing::{billing_routes, webhook_routes, BillingAppState, CheckoutParams};
use gradeflow::adapters::http::middleware::JwtValidator;
use gradeflow::adapters::payment::{StripeConfig, StripePaymentGateway};
use gradeflow::adapters::postgres::{PostgresBillingRepository, PostgresProfileReader};
use gradeflow::config::AppConfig;
use gradeflow::domain::subscription::WebhookVerifier;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load()?;
    config.validate()?;

    init_tracing(&config);

    info!(
        environment = ?config.server.environment,
        "starting gradeflow backend"
    );

    let pool = PgPoolOptions::new()
        .max_connections(config.database.max_connections)
        .min_connections(config.database.min_connections)
        .acquire_timeout(Duration::from_secs(config.database.acquire_timeout_secs))
        .connect(&config.database.url)
        .await?;

    info!("database pool established");

    let billing_state = BillingAppState {
        profiles: Arc::new(PostgresProfileReader::new(pool.clone())),
        billing: Arc::new(PostgresBillingRepository::new(pool.clone())),
        payment_gateway: Arc::new(StripePaymentGateway::new(StripeConfig::new(
            config.payment.stripe_api_key.expose_secret().clone(),
        ))),
        clock: Arc::new(SystemClock),
        webhook_verifier: Arc::new(WebhookVerifier::new(
            config.payment.stripe_webhook_secret.expose_secret().clone(),
        )),
        checkout: CheckoutParams {
            price_id: config.payment.stripe_price_id.clone(),
            success_url: config.payment.checkout_success_url.clone(),
            cancel_url: config.payment.checkout_cancel_url.clone(),
        },
    };

    let auth_state = Arc::new(JwtValidator::new(
        config.auth.jwt_secret.clone(),
        &config.auth.audience,
    ));

    let app = Router::new()
        .route("/health", get(health))
        .nest("/api/billing", billing_routes(billing_state.clone(), auth_state))
        .nest("/api/webhooks", webhook_routes(billing_state))
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer(&config))
        .layer(TimeoutLayer::new(Duration::from_secs(
            config.server.request_timeout_secs,
        )));

    let addr = config.server.socket_addr();
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(addr = %addr, "listening");

    axum::serve(listener, app).await?;

    Ok(())
}

fn init_tracing(config: &AppConfig) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| config.server.log_level.parse().unwrap_or_default());

    let builder = tracing_subscriber::fmt().with_env_filter(filter);

    if config.is_production() {
        builder.json().init();
    } else {
        builder.init();
    }
}

fn cors_layer(config: &AppConfig) -> CorsLayer {
    let origins: Vec<HeaderValue> = config
        .server
        .cors_origins_list()
        .iter()
        .filter_map(|o| o.parse().ok())
        .collect();

    if origins.is_empty() {
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any)
    } else {
        CorsLayer::new()
            .allow_origin(origins)
            .allow_methods(Any)
            .allow_headers(Any)
    }
}

async fn health() -> &'static str {
    "ok"
}
