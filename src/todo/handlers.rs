//! Axum handlers, one per operation.
//!
//! Each handler translates the inbound request, makes exactly one backend
//! call bounded by the configured deadline, and hands the outcome to
//! `respond`. Extraction never short-circuits a handler: path segments are
//! taken as-is and body read failures become decode errors.

use std::time::Instant;

use axum::body::Bytes;
use axum::extract::rejection::BytesRejection;
use axum::extract::{RawQuery, State};
use axum::response::Response;

use crate::http::request::PathParam;
use crate::http::response::{respond, GatewayError};
use crate::http::server::AppState;
use crate::resilience::timeouts::with_deadline;
use crate::routing::Operation;
use crate::todo::translate;

type RawBody = Result<Bytes, BytesRejection>;

fn read_body(body: RawBody) -> Result<Bytes, GatewayError> {
    body.map_err(|rejection| GatewayError::Decode(rejection.body_text()))
}

/// `POST /v1/todo`
pub async fn create_todo(State(state): State<AppState>, body: RawBody) -> Response {
    let started = Instant::now();
    let outcome = async {
        let request = translate::create_request(&read_body(body)?)?;
        let deadline = state.deadline();
        let todo = with_deadline(deadline, state.service.create(request, deadline)).await?;
        Ok::<_, GatewayError>(todo)
    }
    .await;
    respond(Operation::Create, outcome, started)
}

/// `GET /v1/todo/{id}`
pub async fn get_todo(State(state): State<AppState>, PathParam(id): PathParam) -> Response {
    let started = Instant::now();
    let request = translate::get_request(id);
    let deadline = state.deadline();
    let outcome = with_deadline(deadline, state.service.get(request, deadline))
        .await
        .map_err(GatewayError::from);
    respond(Operation::Get, outcome, started)
}

/// `GET /v1/todos?page=&limit=`
pub async fn list_todos(State(state): State<AppState>, RawQuery(query): RawQuery) -> Response {
    let started = Instant::now();
    let outcome = async {
        let request = translate::list_request(query.as_deref())?;
        let deadline = state.deadline();
        let list = with_deadline(deadline, state.service.list(request, deadline)).await?;
        Ok::<_, GatewayError>(list)
    }
    .await;
    respond(Operation::List, outcome, started)
}

/// `GET /v1/todos/{time}?page=&limit=`
pub async fn list_overdue_todos(
    State(state): State<AppState>,
    PathParam(to_time): PathParam,
    RawQuery(query): RawQuery,
) -> Response {
    let started = Instant::now();
    let outcome = async {
        let request = translate::list_overdue_request(to_time, query.as_deref())?;
        let deadline = state.deadline();
        let list = with_deadline(deadline, state.service.list_overdue(request, deadline)).await?;
        Ok::<_, GatewayError>(list)
    }
    .await;
    respond(Operation::ListOverdue, outcome, started)
}

/// `PUT /v1/todo/{id}`
pub async fn update_todo(
    State(state): State<AppState>,
    PathParam(id): PathParam,
    body: RawBody,
) -> Response {
    let started = Instant::now();
    let outcome = async {
        let todo = translate::update_request(id, &read_body(body)?)?;
        let deadline = state.deadline();
        let todo = with_deadline(deadline, state.service.update(todo, deadline)).await?;
        Ok::<_, GatewayError>(todo)
    }
    .await;
    respond(Operation::Update, outcome, started)
}

/// `DELETE /v1/todo/{id}`
pub async fn delete_todo(State(state): State<AppState>, PathParam(id): PathParam) -> Response {
    let started = Instant::now();
    let request = translate::delete_request(id);
    let deadline = state.deadline();
    let outcome = with_deadline(deadline, state.service.delete(request, deadline))
        .await
        .map_err(GatewayError::from);
    respond(Operation::Delete, outcome, started)
}
