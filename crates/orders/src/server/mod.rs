//! HTTP 전송 계층. 요청을 OrderService 호출로, 결과를 HTTP 응답으로 바꾼다.

pub mod error;
pub mod handlers;
pub mod middleware;
pub mod schemas;

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::cors::CorsLayer;

use crate::scope::OperationScope;
use crate::service::OrderService;

#[derive(Clone)]
pub struct AppState {
    pub service: OrderService,
    /// 프로세스 범위. 종료 시 취소되면 진행 중인 저장소 호출도 중단된다.
    pub scope: OperationScope,
}

impl AppState {
    pub fn new(service: OrderService, scope: OperationScope) -> Self {
        Self { service, scope }
    }

    fn request_scope(&self) -> OperationScope {
        self.scope.child()
    }
}

pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/orders", post(handlers::save_order_book))
        .route("/orders/:exchange_name/:pair", get(handlers::get_order_book))
        .route("/orders/history", post(handlers::save_order))
        .route(
            "/orders/history/:client_name/:exchange_name",
            get(handlers::get_order_history),
        )
        .layer(axum::middleware::from_fn(middleware::log_request))
        .layer(CorsLayer::permissive())
        .with_state(state)
}
