//! Ping Handler

use axum::{extract::State, Json};
use serde::Serialize;
use std::sync::Arc;

use crate::infrastructure::http::state::AppState;

/// Ping 响应
#[derive(Serialize)]
pub struct PingResponse {
    pub status: &'static str,
    pub gateway_version: &'static str,
    /// 网关转发到的 MARY 服务器
    pub mary_server: String,
}

/// 网关存活检查，不访问 MARY 服务器
pub async fn ping(State(state): State<Arc<AppState>>) -> Json<PingResponse> {
    Json(PingResponse {
        status: "ok",
        gateway_version: env!("CARGO_PKG_VERSION"),
        mary_server: state.server_addr.clone(),
    })
}
