//! HTTP Routes
//!
//! API Endpoints:
//! - /api/ping                          GET   健康检查
//! - /api/version                       GET   MARY 服务器版本
//! - /api/datatypes                     GET   数据类型（?locale=&direction=all|input|output）
//! - /api/voices                        GET   音色（?locale=&domain=all|general|limited）
//! - /api/voices/:voice/exampletext     GET   音色示例文本
//! - /api/voices/:voice/audioeffects    GET   音色支持的音效
//! - /api/languages                     GET   可用语言
//! - /api/audioformats                  GET   音频文件格式
//! - /api/exampletext/:datatype         GET   数据类型示例文本
//! - /api/cache/reset                   POST  清空能力缓存
//! - /api/process                       POST  合成，返回原始输出

use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;

use super::handlers;
use super::state::AppState;

/// 创建所有路由
pub fn create_routes() -> Router<Arc<AppState>> {
    Router::new().nest("/api", api_routes())
}

/// API 路由
fn api_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/ping", get(handlers::ping))
        .route("/version", get(handlers::server_version))
        .route("/datatypes", get(handlers::list_data_types))
        .nest("/voices", voice_routes())
        .route("/languages", get(handlers::list_languages))
        .route("/audioformats", get(handlers::list_audio_formats))
        .route("/exampletext/:datatype", get(handlers::example_text))
        .route("/cache/reset", post(handlers::reset_cache))
        .route("/process", post(handlers::process))
}

/// Voice 路由
fn voice_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/", get(handlers::list_voices))
        .route("/:voice/exampletext", get(handlers::voice_example_text))
        .route("/:voice/audioeffects", get(handlers::voice_audio_effects))
}
