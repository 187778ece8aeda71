//! HTTP Middleware
//!
//! 合成请求日志：把 MARY 分配的请求编号和耗时关联到 HTTP 请求上

use axum::{extract::Request, middleware::Next, response::Response};
use std::time::Instant;

use super::handlers::REQUEST_ID_HEADER;

/// 记录每个 HTTP 请求的 MARY 请求编号与耗时
///
/// 只有 `/api/process` 的响应带有请求编号；其他请求只在 debug 级别记录耗时。
/// MARY 错误以 errno 返回，已在 ApiError::into_response() 中记录。
pub async fn synthesis_logging_middleware(request: Request, next: Next) -> Response {
    let method = request.method().clone();
    let uri = request.uri().clone();
    let started = Instant::now();

    let response = next.run(request).await;
    let elapsed_ms = started.elapsed().as_millis() as u64;

    match response
        .headers()
        .get(REQUEST_ID_HEADER)
        .and_then(|v| v.to_str().ok())
    {
        Some(request_id) => tracing::info!(
            method = %method,
            uri = %uri,
            request_id = %request_id,
            elapsed_ms,
            "Synthesis request served"
        ),
        None => tracing::debug!(
            method = %method,
            uri = %uri,
            status = response.status().as_u16(),
            elapsed_ms,
            "Gateway request served"
        ),
    }

    response
}
