use axum::{
    routing::{get, put},
    Router,
};
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::book::AddressBook;
use crate::ui::Icons;

pub mod error;
pub mod routes;

pub use error::{ApiError, ErrorResponse};

/// Server state
pub struct AppState {
    pub book: AddressBook,
}

/// Build the contacts API around an already-opened address book
pub fn router(book: AddressBook) -> Router {
    let state = Arc::new(AppState { book });

    Router::new()
        .route("/health", get(routes::health))
        .route(
            "/contacts",
            get(routes::list_contacts).post(routes::add_contact),
        )
        .route(
            "/contacts/{first_name}/{last_name}",
            put(routes::update_contact).delete(routes::delete_contact),
        )
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

pub async fn start_server(addr: SocketAddr, book: AddressBook) -> anyhow::Result<()> {
    tracing::info!("Serving contacts from {:?}", book.store().path());
    let app = router(book);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Starting server on {}", listener.local_addr()?);
    println!("{} Server running at http://{}", Icons::GLOBE, addr);

    axum::serve(listener, app).await?;

    Ok(())
}
