use axum::{
    body::Bytes,
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use tracing::debug;

use interface::Client;

use super::error::{
    ApiError, INVALID_HISTORY_BODY, INVALID_ORDER_BOOK_BODY, LABEL_OR_PAIR_MISSING,
    ORDER_BOOK_NOT_FOUND,
};
use super::schemas::{
    ClientHistoryCreate, HistoryQuery, OrderBookCreate, OrderBookResponse, OrderHistoryResponse,
};
use super::AppState;
use crate::validate::{validate_client_history, validate_order_book};

/// GET /orders/:exchange_name/:pair
pub async fn get_order_book(
    State(state): State<AppState>,
    Path((exchange_name, pair)): Path<(String, String)>,
) -> Result<Json<OrderBookResponse>, ApiError> {
    let scope = state.request_scope();
    let _release = scope.release_on_drop();

    let depth_orders = state
        .service
        .get_order_book(&scope, &exchange_name, &pair)
        .await?;

    if depth_orders.is_empty() {
        return Err(ApiError::NotFound(ORDER_BOOK_NOT_FOUND.to_string()));
    }

    Ok(Json(OrderBookResponse { depth_orders }))
}

/// POST /orders
pub async fn save_order_book(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<StatusCode, ApiError> {
    let order_book: OrderBookCreate = serde_json::from_slice(&body).map_err(|e| {
        debug!(error = %e, "Failed to decode order book body");
        ApiError::BadRequest(INVALID_ORDER_BOOK_BODY.to_string())
    })?;

    validate_order_book(&order_book.exchange_name, &order_book.pair, &order_book.depth)?;

    let scope = state.request_scope();
    let _release = scope.release_on_drop();

    state
        .service
        .save_order_book(
            &scope,
            &order_book.exchange_name,
            &order_book.pair,
            &order_book.depth,
        )
        .await?;

    Ok(StatusCode::CREATED)
}

/// GET /orders/history/:client_name/:exchange_name?label=&pair=
pub async fn get_order_history(
    State(state): State<AppState>,
    Path((client_name, exchange_name)): Path<(String, String)>,
    Query(query): Query<HistoryQuery>,
) -> Result<Json<OrderHistoryResponse>, ApiError> {
    if query.label.is_empty() || query.pair.is_empty() {
        return Err(ApiError::BadRequest(LABEL_OR_PAIR_MISSING.to_string()));
    }

    let client = Client {
        client_name,
        exchange_name,
        label: query.label,
        pair: query.pair,
    };

    let scope = state.request_scope();
    let _release = scope.release_on_drop();

    let order_history = state.service.get_order_history(&scope, &client).await?;

    if order_history.is_empty() {
        return Err(ApiError::NotFound(format!(
            "Order history with label[{}] and pair[{}] not found",
            client.label, client.pair
        )));
    }

    Ok(Json(OrderHistoryResponse { order_history }))
}

/// POST /orders/history
pub async fn save_order(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<StatusCode, ApiError> {
    let payload: ClientHistoryCreate = serde_json::from_slice(&body).map_err(|e| {
        debug!(error = %e, "Failed to decode order history body");
        ApiError::BadRequest(INVALID_HISTORY_BODY.to_string())
    })?;

    validate_client_history(payload.client.as_ref(), payload.order_history.as_ref())?;

    // 검증을 통과했으므로 client는 항상 존재한다
    let client = payload.client.unwrap_or_default();

    let scope = state.request_scope();
    let _release = scope.release_on_drop();

    state
        .service
        .save_order(&scope, &client, payload.order_history.as_ref())
        .await?;

    Ok(StatusCode::CREATED)
}
