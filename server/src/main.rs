mod routes;

use gatehouse::config::AppConfig;

const DEFAULT_PORT: u16 = 3000;

/// Parse `PORT`, defaulting when unset.
fn listen_port(raw: Option<&str>) -> Result<u16, String> {
    match raw {
        None => Ok(DEFAULT_PORT),
        Some(value) => value
            .trim()
            .parse()
            .map_err(|_| format!("invalid PORT: {value}")),
    }
}

#[tokio::main]
async fn main() {
    let _ = dotenvy::dotenv();
    tracing_subscriber::fmt::init();

    // Both identity-provider settings are required; refuse to start without them.
    let config = match AppConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            tracing::error!(error = %e, "gatehouse not started");
            std::process::exit(1);
        }
    };

    let port = match listen_port(std::env::var("PORT").ok().as_deref()) {
        Ok(port) => port,
        Err(e) => {
            tracing::error!(error = %e, "gatehouse not started");
            std::process::exit(1);
        }
    };

    let app = match routes::app(config) {
        Ok(app) => app,
        Err(e) => {
            tracing::error!(error = %e, "gatehouse not started");
            std::process::exit(1);
        }
    };

    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{port}"))
        .await
        .expect("failed to bind");

    tracing::info!(%port, "gatehouse listening");
    axum::serve(listener, app).await.expect("server failed");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn listen_port_defaults() {
        assert_eq!(listen_port(None), Ok(DEFAULT_PORT));
    }

    #[test]
    fn listen_port_parses_value() {
        assert_eq!(listen_port(Some(" 8080 ")), Ok(8080));
    }

    #[test]
    fn listen_port_rejects_garbage() {
        assert_eq!(listen_port(Some("eighty")), Err("invalid PORT: eighty".to_owned()));
    }
}
