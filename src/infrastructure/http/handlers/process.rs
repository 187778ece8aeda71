//! Process Handler - 合成并返回输出

use axum::{
    extract::State,
    http::{header, HeaderName, HeaderValue},
    response::{IntoResponse, Response},
    Json,
};
use std::sync::Arc;

use crate::domain::content_type_for;
use crate::infrastructure::http::dto::ProcessRequest;
use crate::infrastructure::http::error::ApiError;
use crate::infrastructure::http::state::AppState;

/// 携带服务器分配的请求编号
pub const REQUEST_ID_HEADER: HeaderName = HeaderName::from_static("x-mary-request-id");

pub async fn process(
    State(state): State<Arc<AppState>>,
    Json(req): Json<ProcessRequest>,
) -> Result<Response, ApiError> {
    let request = state.synthesis_request(req);

    let mut output: Vec<u8> = Vec::new();
    let mut diagnostics: Vec<u8> = Vec::new();
    let report = state
        .client
        .process(&request, &mut output, &mut diagnostics)
        .await?;

    tracing::info!(
        request_id = %report.request_id,
        bytes = report.bytes_written,
        output_type = %request.output_type,
        "Synthesis delivered"
    );

    let content_type = content_type_for(&request.output_type, request.audio_type.as_deref());
    let mut response = ([(header::CONTENT_TYPE, content_type)], output).into_response();
    if let Ok(value) = HeaderValue::from_str(&report.request_id) {
        response.headers_mut().insert(REQUEST_ID_HEADER, value);
    }
    Ok(response)
}
