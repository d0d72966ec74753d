//! # iredo API Server
//!
//! A web server built on `Axum` with OpenAPI documentation wiring.
//!
//! ## Example
//! ```no_run
//! use iredo_server::Server;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     Server::builder()
//!         .port(4583)
//!         .build()?
//!         .run()
//!         .await
//! }
//! ```

mod router;

use anyhow::{Context, Result};
use axum::http::uri::{Authority, PathAndQuery, Scheme};
use axum::http::{HeaderMap, StatusCode, Uri, header};
use axum::response::Redirect;
use axum::Router;
use axum_server::Handle;
use iredo::domain::config::ApiConfig;
use iredo::kernel::server::ApiState;
use std::net::SocketAddr;
use std::time::Duration;
use tokio::signal;
use tracing::{error, info, warn};

/// A fluent builder for configuring and initializing the [`Server`].
#[must_use = "builders do nothing unless you call .build()"]
#[derive(Debug, Default)]
pub struct ServerBuilder {
    cfg: ApiConfig,
}

impl ServerBuilder {
    /// Set up the server's configuration.
    pub fn config(mut self, cfg: ApiConfig) -> Self {
        self.cfg = cfg;
        self
    }

    pub fn port(mut self, port: u16) -> Self {
        self.cfg.server.port = port;
        self
    }

    fn validate_ssl_config(&self) -> Result<()> {
        if let Some(ssl) = &self.cfg.server.ssl {
            if !ssl.cert.exists() {
                anyhow::bail!("SSL certificate not found at: {}", ssl.cert.display());
            }
            if !ssl.key.exists() {
                anyhow::bail!("SSL key not found at: {}", ssl.key.display());
            }

            #[cfg(unix)]
            {
                use std::os::unix::fs::PermissionsExt;
                let metadata = ssl.key.metadata()?;
                if metadata.permissions().mode() & 0o077 != 0 {
                    tracing::warn!(
                        "SECURITY: SSL Private Key {} has insecure permissions (should be 600)",
                        ssl.key.display()
                    );
                }
            }
        }
        Ok(())
    }

    /// Consumes the builder and initializes the server.
    ///
    /// # Errors
    /// Returns an error if SSL certificate/key files cannot be found.
    pub fn build(self) -> Result<Server> {
        self.validate_ssl_config()?;

        let address = SocketAddr::new(self.cfg.server.address, self.cfg.server.port);

        info!(
            address = %address,
            "Initializing server"
        );

        let state = ApiState::new(self.cfg);
        Ok(Server { state })
    }
}

/// A fully initialized server instance ready to run.
#[must_use = "call .run().await to start the server"]
#[derive(Debug)]
pub struct Server {
    state: ApiState,
}

impl Server {
    /// Returns a new [`ServerBuilder`] to configure the server.
    pub fn builder() -> ServerBuilder {
        ServerBuilder::default()
    }

    /// Assembles the request pipeline for this server instance.
    ///
    /// Exposed so in-process tests can drive the router without binding
    /// sockets.
    #[must_use]
    pub fn router(&self) -> Router {
        router::init(self.state.clone())
    }

    /// Starts the server and runs until the shutdown signal is received.
    ///
    /// When TLS material is configured, a plaintext listener is bound next to
    /// the TLS listener; its only job is to redirect every request to the
    /// `https://` equivalent.
    ///
    /// # Errors
    /// Returns an error if the server fails to bind to the configured address
    /// or if SSL/TLS setup fails.
    pub async fn run(self) -> Result<()> {
        let cfg = self.state.config.clone();
        let address = SocketAddr::new(cfg.server.address, cfg.server.port);

        info!(
            address = %address,
            ssl = cfg.server.ssl.is_some(),
            development = self.state.development(),
            "Starting server"
        );

        let app = self.router();

        // Graceful shutdown wiring
        let handle = Handle::<SocketAddr>::new();
        let redirect_handle = Handle::<SocketAddr>::new();
        let shutdown_handle = handle.clone();
        let shutdown_redirect_handle = redirect_handle.clone();

        // Spawn shutdown signal listener
        tokio::spawn(async move {
            if let Err(e) = shutdown_signal().await {
                error!("Error while waiting for shutdown signal: {e}");
                return;
            }
            info!("Shutdown signal received, starting graceful shutdown...");
            shutdown_redirect_handle.graceful_shutdown(Some(Duration::from_secs(30)));
            shutdown_handle.graceful_shutdown(Some(Duration::from_secs(30)));
        });

        if let Some(ssl_config) = &cfg.server.ssl {
            // HTTPS mode with a plaintext redirect listener alongside
            info!("Starting HTTPS server on https://{address}");

            let tls_config = axum_server::tls_rustls::RustlsConfig::from_pem_file(
                &ssl_config.cert,
                &ssl_config.key,
            )
            .await
            .context("Failed to load SSL/TLS certificates")?;

            let http_address = SocketAddr::new(cfg.server.address, cfg.server.http_port);
            let https_port = cfg.server.port;
            tokio::spawn(async move {
                if let Err(e) =
                    redirect_http_to_https(http_address, https_port, redirect_handle).await
                {
                    error!("HTTP redirect listener failed: {e}");
                }
            });

            axum_server::bind_rustls(address, tls_config)
                .handle(handle)
                .serve(app.into_make_service())
                .await
                .context("HTTPS server failed")?;
        } else {
            // HTTP mode; nothing to redirect to without TLS material
            info!("Starting HTTP server on http://{address}");

            axum_server::bind(address)
                .handle(handle)
                .serve(app.into_make_service())
                .await
                .context("HTTP server failed")?;
        }

        info!("Server shutdown complete");
        Ok(())
    }

    /// Returns a reference to the application state.
    #[must_use]
    pub const fn state(&self) -> &ApiState {
        &self.state
    }
}

/// The plaintext listener's app: every request is answered with a 307 to the
/// TLS listener, whatever the path. CORS sits in front so even cross-origin
/// preflights to the plaintext port behave. Requests without a usable `Host`
/// header have no redirect target and are rejected with 400.
#[must_use]
pub fn redirect_app(https_port: u16) -> Router {
    let redirect = move |headers: HeaderMap, uri: Uri| async move {
        let host = headers
            .get(header::HOST)
            .and_then(|value| value.to_str().ok())
            .ok_or(StatusCode::BAD_REQUEST)?;

        match https_equivalent(host, uri, https_port) {
            Ok(target) => Ok(Redirect::temporary(&target.to_string())),
            Err(e) => {
                warn!("Failed to convert URI to HTTPS: {e}");
                Err(StatusCode::BAD_REQUEST)
            }
        }
    };

    Router::new().fallback(redirect).layer(router::allow_all_cors())
}

/// Serves the plaintext listener built by [`redirect_app`].
async fn redirect_http_to_https(
    address: SocketAddr,
    https_port: u16,
    handle: Handle<SocketAddr>,
) -> Result<()> {
    let app = redirect_app(https_port);

    info!("Starting HTTP redirect listener on http://{address}");

    axum_server::bind(address)
        .handle(handle)
        .serve(app.into_make_service())
        .await
        .context("HTTP redirect listener failed")?;

    Ok(())
}

/// Maps a plaintext request URI to its TLS equivalent, preserving path and
/// query. The standard port (443) is omitted from the rewritten authority.
fn https_equivalent(host: &str, uri: Uri, https_port: u16) -> Result<Uri> {
    let mut parts = uri.into_parts();

    parts.scheme = Some(Scheme::HTTPS);
    if parts.path_and_query.is_none() {
        parts.path_and_query = Some(PathAndQuery::from_static("/"));
    }

    // Strip any port carried in the Host header; IPv6 literals keep their brackets.
    let authority = host.parse::<Authority>().context("Invalid Host header")?;
    let bare_host = authority.host();

    let rewritten = if https_port == 443 {
        bare_host.to_owned()
    } else {
        format!("{bare_host}:{https_port}")
    };
    parts.authority = Some(rewritten.parse::<Authority>().context("Invalid authority")?);

    Uri::from_parts(parts).context("Failed to reassemble URI")
}

/// Listens for shutdown signals (Ctrl+C, SIGTERM).
async fn shutdown_signal() -> Result<()> {
    let ctrl_c = async { signal::ctrl_c().await.context("Failed to install Ctrl+C handler") };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .context("Failed to install SIGTERM handler")?
            .recv()
            .await;
        Ok::<_, anyhow::Error>(())
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<Result<()>>();

    tokio::select! {
        res = ctrl_c => {
            res.context("Ctrl+C signal received")?;
        },
        res = terminate => {
            res.context("SIGTERM signal received")?;
        },
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn https_equivalent_preserves_path_and_query() {
        let uri: Uri = "/api/rooms?page=2".parse().expect("uri");
        let target = https_equivalent("localhost:8080", uri, 8443).expect("mapping");
        assert_eq!(target.to_string(), "https://localhost:8443/api/rooms?page=2");
    }

    #[test]
    fn https_equivalent_omits_standard_port() {
        let uri: Uri = "/api/rooms".parse().expect("uri");
        let target = https_equivalent("example.com", uri, 443).expect("mapping");
        assert_eq!(target.to_string(), "https://example.com/api/rooms");
    }

    #[test]
    fn https_equivalent_defaults_empty_path_to_root() {
        let uri = Uri::default();
        let target = https_equivalent("example.com:8080", uri, 8443).expect("mapping");
        assert_eq!(target.to_string(), "https://example.com:8443/");
    }

    #[test]
    fn https_equivalent_keeps_ipv6_brackets() {
        let uri: Uri = "/api/rooms".parse().expect("uri");
        let target = https_equivalent("[::1]:8080", uri, 8443).expect("mapping");
        assert_eq!(target.to_string(), "https://[::1]:8443/api/rooms");
    }

    #[test]
    fn builder_rejects_missing_tls_material() {
        let mut cfg = ApiConfig::default();
        cfg.server.ssl = Some(iredo::domain::config::SslConfig {
            cert: "/definitely/not/there.pem".into(),
            key: "/definitely/not/there.key".into(),
        });

        let err = Server::builder().config(cfg).build().expect_err("missing cert should fail");
        assert!(err.to_string().contains("SSL certificate not found"));
    }
}
