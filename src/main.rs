use axum::extract::DefaultBodyLimit;
use job_portal_backend::{
    cache::{Cache, RedisCacheStore},
    config::{get_config, init_config},
    database::pool::{create_pool, run_migrations},
    repositories::Store,
    routes,
    services::notification_service::{
        LogSender, NotificationSender, NotificationService, WebhookSender,
    },
    utils::token::TokenKeys,
    AppState,
};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::EnvFilter;

fn init_tracing(log_format: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    if log_format.eq_ignore_ascii_case("json") {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .json()
            .init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_config()?;
    let config = get_config()?;
    init_tracing(&config.log_format);

    let pool = create_pool(config).await?;
    run_migrations(&pool).await?;
    info!("Database migrations applied");

    let cache = Cache::new(Arc::new(RedisCacheStore::open(&config.redis_url)?));

    let mut senders: Vec<Arc<dyn NotificationSender>> = vec![Arc::new(LogSender)];
    if let Some(url) = &config.notification_webhook_url {
        senders.push(Arc::new(WebhookSender::new(
            url.clone(),
            config.webhook_secret.clone(),
        )?));
        info!(url = %url, "Webhook notifications enabled");
    }
    let notifications = NotificationService::spawn(senders);

    let keys = TokenKeys::new(&config.jwt_secret, config.access_token_expire_minutes);
    let app_state = AppState::new(Store::postgres(pool), cache, notifications, keys)
        .with_trusted_proxies(config.trusted_proxies.clone());

    let app = routes::app(app_state).layer(DefaultBodyLimit::max(2 * 1024 * 1024));

    let addr: SocketAddr = config.server_address.parse()?;
    info!("Server listening on {}", addr);
    let listener = TcpListener::bind(addr).await?;
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await?;

    Ok(())
}
