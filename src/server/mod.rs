//! HTTP API.
//!
//! | Endpoint | Method | Description |
//! |----------|--------|-------------|
//! | `/resolve/datasheet?word=` | GET | Description and datasheet link for a part |
//! | `/resolve/substitutes?search=` | GET | Substitutes for an exact part designator |
//! | `/parts?query=` | GET | Search the stock (repeatable `query`) |
//! | `/parts` | POST | Add one unit of a part |
//! | `/parts` | PUT | Update a stocked part |
//! | `/parts` | DELETE | Remove a stocked part |
//! | `/parts/:id` | GET | One stocked part |
//! | `/projects` | GET | All projects with their components |
//! | `/projects` | POST | Open a project, reserving its components |

mod error;
mod parts;
mod projects;
mod resolve;

pub use self::error::{ApiError, JsonBody};
use crate::app::AppState;
use crate::error::{ErrorKind, Result};
use axum::Router;
use axum::routing::get;
use exn::ResultExt;
use std::net::SocketAddr;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/resolve/datasheet", get(resolve::datasheet))
        .route("/resolve/substitutes", get(resolve::substitutes))
        .route(
            "/parts",
            get(parts::search).post(parts::add).put(parts::update).delete(parts::delete),
        )
        .route("/parts/:id", get(parts::get))
        .route("/projects", get(projects::list).post(projects::create))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Serves the API until Ctrl+C.
pub async fn serve(state: AppState, bind: SocketAddr) -> Result<()> {
    let listener = TcpListener::bind(bind).await.or_raise(|| ErrorKind::Io)?;
    let addr = listener.local_addr().or_raise(|| ErrorKind::Io)?;
    tracing::info!(%addr, "listening");
    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .or_raise(|| ErrorKind::Serve)
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %err, "could not listen for Ctrl+C");
        std::future::pending::<()>().await;
    }
    tracing::info!("shutting down");
}
