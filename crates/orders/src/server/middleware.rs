use std::time::Instant;

use axum::{extract::Request, middleware::Next, response::Response};
use tracing::info;

/// 요청 경로, 메서드, 상태 코드, 처리 시간 기록
pub async fn log_request(req: Request, next: Next) -> Response {
    let method = req.method().clone();
    let path = req.uri().path().to_string();
    let started = Instant::now();

    let response = next.run(req).await;

    info!(
        %method,
        %path,
        status = response.status().as_u16(),
        duration = %format!("{}ms", started.elapsed().as_millis()),
        "Incoming request"
    );
    response
}
