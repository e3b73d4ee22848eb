//! Server construction and middleware wiring.

mod config;

pub use config::ServerSettings;

use std::net::SocketAddr;
use std::sync::Arc;

use actix_session::{
    SessionMiddleware,
    config::{CookieContentSecurity, PersistentSession},
    storage::CookieSessionStore,
};
use actix_web::cookie::{Key, SameSite};
use actix_web::dev::{
    Server, ServerHandle, Service, ServiceFactory, ServiceRequest, ServiceResponse,
};
use actix_web::{App, HttpServer, web};
use futures_util::FutureExt;
use mockable::DefaultClock;
use tokio::signal;
use tracing::{debug, info, warn};

use wishlist::inbound::http::configure_api;
use wishlist::inbound::http::health::{HealthState, live, ready};
use wishlist::inbound::http::state::{HttpState, ServiceDeps};
use wishlist::outbound::credentials::Argon2CredentialHasher;
use wishlist::outbound::memory::MemoryStore;
use wishlist::outbound::notifier::TracingInvitationNotifier;

/// Everything the app factory needs, resolved once at startup.
pub struct ServerConfig {
    key: Key,
    cookie_secure: bool,
    bind_addr: SocketAddr,
    http_state: web::Data<HttpState>,
}

impl ServerConfig {
    /// Resolve settings into a bindable configuration backed by the
    /// in-memory store.
    ///
    /// # Errors
    /// Returns [`std::io::Error`] when the bind address or session key is
    /// unusable.
    pub fn from_settings(settings: &ServerSettings) -> std::io::Result<Self> {
        let bind_addr = settings
            .bind_addr()
            .map_err(|e| std::io::Error::other(format!("invalid bind address: {e}")))?;
        let key = settings.session_key().map_err(std::io::Error::other)?;
        let state = HttpState::over_store(
            Arc::new(MemoryStore::new()),
            ServiceDeps {
                hasher: Arc::new(Argon2CredentialHasher::new(settings.credential_pepper())),
                notifier: Arc::new(TracingInvitationNotifier::new()),
                clock: Arc::new(DefaultClock),
            },
        );
        Ok(Self {
            key,
            cookie_secure: settings.cookie_secure,
            bind_addr,
            http_state: web::Data::new(state),
        })
    }
}

fn build_app(
    health_state: web::Data<HealthState>,
    http_state: web::Data<HttpState>,
    key: Key,
    cookie_secure: bool,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let session = SessionMiddleware::builder(CookieSessionStore::default(), key)
        .cookie_name("session".into())
        .cookie_path("/".into())
        .cookie_secure(cookie_secure)
        .cookie_http_only(true)
        .cookie_content_security(CookieContentSecurity::Private)
        .cookie_same_site(SameSite::Lax)
        .session_lifecycle(
            PersistentSession::default().session_ttl(actix_web::cookie::time::Duration::hours(2)),
        )
        .build();

    let api = web::scope("/api/v1").wrap(session).configure(configure_api);

    App::new()
        .app_data(health_state)
        .app_data(http_state)
        .wrap_fn(|req, srv| {
            let method = req.method().clone();
            let path = req.path().to_owned();
            srv.call(req).map(move |res| {
                if let Ok(response) = &res {
                    debug!(%method, %path, status = response.status().as_u16(), "request served");
                }
                res
            })
        })
        .service(api)
        .service(ready)
        .service(live)
}

/// Construct the HTTP server and mark it ready once bound.
///
/// Actix's own signal handling is disabled; pair the server with
/// [`drain_on_signal`] so liveness fails before connections close.
///
/// # Errors
/// Propagates [`std::io::Error`] when binding the socket fails.
pub fn create_server(
    health_state: web::Data<HealthState>,
    config: ServerConfig,
) -> std::io::Result<Server> {
    let ServerConfig {
        key,
        cookie_secure,
        bind_addr,
        http_state,
    } = config;
    let server_health_state = health_state.clone();

    let server = HttpServer::new(move || {
        build_app(
            server_health_state.clone(),
            http_state.clone(),
            key.clone(),
            cookie_secure,
        )
    })
    .disable_signals()
    .bind(bind_addr)?
    .run();

    health_state.mark_ready();
    Ok(server)
}

#[cfg(unix)]
async fn shutdown_signal() -> std::io::Result<&'static str> {
    let mut terminate = signal::unix::signal(signal::unix::SignalKind::terminate())?;
    tokio::select! {
        result = signal::ctrl_c() => result.map(|()| "SIGINT"),
        _ = terminate.recv() => Ok("SIGTERM"),
    }
}

#[cfg(not(unix))]
async fn shutdown_signal() -> std::io::Result<&'static str> {
    signal::ctrl_c().await.map(|()| "ctrl-c")
}

/// Fail liveness, then stop the server once in-flight requests finish.
pub async fn drain(health_state: &HealthState, handle: ServerHandle) {
    health_state.mark_unhealthy();
    info!("draining wishlist server");
    handle.stop(true).await;
}

/// Wait for SIGINT or SIGTERM and [`drain`] the server.
///
/// Without signal handlers the server keeps running until killed.
pub async fn drain_on_signal(health_state: web::Data<HealthState>, handle: ServerHandle) {
    match shutdown_signal().await {
        Ok(name) => info!(signal = name, "shutdown requested"),
        Err(error) => {
            warn!(%error, "signal handlers unavailable; graceful drain disabled");
            return;
        }
    }
    drain(&health_state, handle).await;
}
