use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use common::http::RouteError;
use hyper::server::conn::Http;
use hyper::Body;
use routerify::{RequestServiceBuilder, Router};
use tokio::net::TcpSocket;
use tokio::select;

use crate::global::GlobalState;

pub mod error;
pub mod ext;
pub mod v1;

pub use error::ApiError;

pub fn routes(global: &Arc<GlobalState>) -> Router<Body, RouteError<ApiError>> {
    // The router holds a weak reference so open keep-alive connections do
    // not keep the global state alive during shutdown.
    let weak = Arc::downgrade(global);

    Router::builder()
        .data(weak)
        .err_handler_with_info(common::http::error_handler::<ApiError>)
        .scope("/v1", v1::routes(global))
        .build()
        .expect("failed to build router")
}

pub async fn run(global: Arc<GlobalState>) -> Result<()> {
    let addr: SocketAddr = global.config.bind_address.parse()?;

    tracing::info!("listening on {}", addr);
    let socket = if addr.is_ipv6() {
        TcpSocket::new_v6()?
    } else {
        TcpSocket::new_v4()?
    };

    socket.set_reuseaddr(true)?;
    socket.set_reuseport(true)?;
    socket.bind(addr)?;
    let listener = socket.listen(1024)?;

    let request_service =
        RequestServiceBuilder::new(routes(&global)).expect("failed to build request service");

    loop {
        select! {
            _ = global.ctx.done() => {
                return Ok(());
            },
            r = listener.accept() => {
                let (socket, addr) = r?;

                let service = request_service.build(addr);

                tracing::debug!("accepted connection from {}", addr);

                tokio::spawn(async move {
                    Http::new().serve_connection(socket, service).await.ok();
                });
            },
        }
    }
}
