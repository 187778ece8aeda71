//! HTTP Gateway - 通过 REST 暴露 MARY 客户端
//!
//! 列出服务器能力，并把一次合成的输出连同推导出的 Content-Type 返回

pub mod dto;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod routes;
pub mod server;
pub mod state;

pub use error::ApiError;
pub use routes::create_routes;
pub use server::{HttpServer, ServerConfig};
pub use state::AppState;
