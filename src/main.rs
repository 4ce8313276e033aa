use std::sync::Arc;
use summarist::{api, config, logging, processing};
use tokio::net::TcpListener;

const DEFAULT_SERVER_PORT: u16 = 3001;

#[tokio::main]
async fn main() {
    config::init_config();
    logging::init_tracing();
    let app = api::create_router(Arc::new(processing::SummariserService::new()));

    let (listener, port) = bind_listener().await.expect("Failed to bind listener");
    tracing::info!("Listening on http://0.0.0.0:{}", port);
    axum::serve(listener, app).await.unwrap();
}

async fn bind_listener() -> Result<(TcpListener, u16), std::io::Error> {
    use std::net::Ipv4Addr;

    let config = config::get_config();
    let port = config.server_port.unwrap_or(DEFAULT_SERVER_PORT);
    TcpListener::bind((Ipv4Addr::UNSPECIFIED, port))
        .await
        .map(|listener| (listener, port))
}
