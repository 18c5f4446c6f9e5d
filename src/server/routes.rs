use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    Json,
};
use serde::Serialize;
use std::sync::Arc;

use crate::book::AddressBook;
use crate::contact::{Contact, ContactPayload};
use crate::server::error::ApiError;
use crate::server::AppState;
use crate::Error;

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    fn new(message: String) -> Json<Self> {
        Json(Self { message })
    }
}

type ApiResult<T> = Result<T, ApiError>;

/// Run a store call on the blocking pool; SQLite I/O must not stall the runtime
async fn with_book<T, F>(state: &AppState, f: F) -> ApiResult<T>
where
    F: FnOnce(&AddressBook) -> crate::Result<T> + Send + 'static,
    T: Send + 'static,
{
    let book = state.book.clone();
    let result = tokio::task::spawn_blocking(move || f(&book))
        .await
        .map_err(|e| Error::Task(e.to_string()))?;
    Ok(result?)
}

fn parse_body(body: Result<Json<ContactPayload>, JsonRejection>) -> ApiResult<Contact> {
    let Json(payload) = body?;
    Ok(payload.validate()?)
}

pub async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": "ok" }))
}

pub async fn list_contacts(State(state): State<Arc<AppState>>) -> ApiResult<Json<Vec<Contact>>> {
    let contacts = with_book(&state, |book| book.load_contacts()).await?;
    Ok(Json(contacts))
}

pub async fn add_contact(
    State(state): State<Arc<AppState>>,
    body: Result<Json<ContactPayload>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<MessageResponse>)> {
    let contact = parse_body(body)?;
    let name = contact.full_name();

    with_book(&state, move |book| book.add_contact(&contact)).await?;

    Ok((
        StatusCode::CREATED,
        MessageResponse::new(format!("Contact {name} added successfully")),
    ))
}

pub async fn update_contact(
    State(state): State<Arc<AppState>>,
    Path((first_name, last_name)): Path<(String, String)>,
    body: Result<Json<ContactPayload>, JsonRejection>,
) -> ApiResult<Json<MessageResponse>> {
    let contact = parse_body(body)?;
    let message = format!("Contact {first_name} {last_name} updated successfully");

    with_book(&state, move |book| {
        book.modify_contact(&first_name, &last_name, &contact)
    })
    .await?;

    Ok(MessageResponse::new(message))
}

pub async fn delete_contact(
    State(state): State<Arc<AppState>>,
    Path((first_name, last_name)): Path<(String, String)>,
) -> ApiResult<Json<MessageResponse>> {
    let message = format!("Contact {first_name} {last_name} deleted successfully");

    with_book(&state, move |book| book.delete_contact(&first_name, &last_name)).await?;

    Ok(MessageResponse::new(message))
}
