//! Data Transfer Objects

use serde::{Deserialize, Serialize};

// ============================================================================
// 统一响应结构
// ============================================================================

/// 统一 API 响应格式
#[derive(Debug, Serialize)]
pub struct ApiResponse<T: Serialize> {
    pub errno: i32,
    pub error: String,
    pub data: Option<T>,
}

impl<T: Serialize> ApiResponse<T> {
    /// 成功响应
    pub fn success(data: T) -> Self {
        Self {
            errno: 0,
            error: String::new(),
            data: Some(data),
        }
    }
}

/// 空数据响应
#[derive(Debug, Serialize)]
pub struct Empty {}

// ============================================================================
// Capability DTOs
// ============================================================================

#[derive(Debug, Serialize)]
pub struct VersionResponse {
    pub version: String,
}

/// 数据类型查询参数
#[derive(Debug, Default, Deserialize)]
pub struct DataTypesQuery {
    pub locale: Option<String>,
    /// all | input | output
    pub direction: Option<String>,
}

/// 音色查询参数
#[derive(Debug, Default, Deserialize)]
pub struct VoicesQuery {
    pub locale: Option<String>,
    /// all | general | limited
    pub domain: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct DataTypeResponse {
    pub name: String,
    pub locale: Option<String>,
    pub is_input: bool,
    pub is_output: bool,
    pub is_text_type: bool,
}

#[derive(Debug, Serialize)]
pub struct VoiceResponse {
    pub name: String,
    pub locale: String,
    pub gender: String,
    pub domain: String,
    pub display_name: String,
}

#[derive(Debug, Serialize)]
pub struct LanguageResponse {
    pub code: String,
    pub name: String,
}

#[derive(Debug, Serialize)]
pub struct TextResponse {
    pub name: String,
    pub text: String,
}

// ============================================================================
// Process DTOs
// ============================================================================

/// 合成请求，未给出的字段取 `request` 配置段的默认值
#[derive(Debug, Deserialize)]
pub struct ProcessRequest {
    pub text: String,
    pub input_type: Option<String>,
    pub output_type: Option<String>,
    pub audio_type: Option<String>,
    pub voice: Option<String>,
}
