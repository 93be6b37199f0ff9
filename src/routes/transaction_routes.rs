use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection},
        Path, Query, State,
    },
    http::StatusCode,
    routing::get,
    Json, Router,
};
use validator::Validate;

use crate::dto::{TransactionRequest, TransactionResponse};
use crate::models::Transaction;
use crate::routes::{json_body, path_id};
use crate::state::AppState;
use crate::utils::errors::AppError;
use crate::utils::pagination::{Page, PageParams};

pub fn create_transaction_router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_transactions).post(create_transaction))
        .route(
            "/:id",
            get(get_transaction)
                .put(update_transaction)
                .delete(delete_transaction),
        )
        .route("/:id/distance", get(transaction_distance))
}

async fn create_transaction(
    State(state): State<AppState>,
    payload: Result<Json<TransactionRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<TransactionResponse>), AppError> {
    let request = json_body(payload)?;
    request.validate()?;
    let transaction = state.transactions.create(request.into_new()).await?;
    Ok((StatusCode::CREATED, Json(transaction.into())))
}

async fn list_transactions(
    State(state): State<AppState>,
    Query(params): Query<PageParams>,
) -> Result<Json<Page<TransactionResponse>>, AppError> {
    let request = params.resolve(Transaction::SORT_FIELDS)?;
    let page = state.transactions.list(&request).await?;
    Ok(Json(page.map(TransactionResponse::from)))
}

async fn get_transaction(
    State(state): State<AppState>,
    path: Result<Path<i64>, PathRejection>,
) -> Result<Json<TransactionResponse>, AppError> {
    let id = path_id(path)?;
    Ok(Json(state.transactions.get(id).await?.into()))
}

async fn transaction_distance(
    State(state): State<AppState>,
    path: Result<Path<i64>, PathRejection>,
) -> Result<Json<f64>, AppError> {
    let id = path_id(path)?;
    Ok(Json(state.transactions.calculate_distance(id).await?))
}

async fn update_transaction(
    State(state): State<AppState>,
    path: Result<Path<i64>, PathRejection>,
    payload: Result<Json<TransactionRequest>, JsonRejection>,
) -> Result<Json<TransactionResponse>, AppError> {
    let id = path_id(path)?;
    let request = json_body(payload)?;
    request.validate()?;
    let transaction = state.transactions.update(id, request.into_new()).await?;
    Ok(Json(transaction.into()))
}

async fn delete_transaction(
    State(state): State<AppState>,
    path: Result<Path<i64>, PathRejection>,
) -> Result<StatusCode, AppError> {
    let id = path_id(path)?;
    state.transactions.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
