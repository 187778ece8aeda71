//! Capability Handlers - 服务器能力查询

use axum::{
    extract::{Path, Query, State},
    Json,
};
use std::sync::Arc;

use crate::domain::{DataType, Voice};
use crate::infrastructure::http::dto::{
    ApiResponse, DataTypeResponse, DataTypesQuery, Empty, LanguageResponse, TextResponse,
    VersionResponse, VoiceResponse, VoicesQuery,
};
use crate::infrastructure::http::error::ApiError;
use crate::infrastructure::http::state::AppState;

impl From<DataType> for DataTypeResponse {
    fn from(data_type: DataType) -> Self {
        Self {
            name: data_type.name().to_string(),
            locale: data_type.locale().map(str::to_string),
            is_input: data_type.is_input(),
            is_output: data_type.is_output(),
            is_text_type: data_type.is_text_type(),
        }
    }
}

impl From<Voice> for VoiceResponse {
    fn from(voice: Voice) -> Self {
        Self {
            display_name: voice.to_string(),
            name: voice.name().to_string(),
            locale: voice.locale().to_string(),
            gender: voice.gender().to_string(),
            domain: voice.domain().to_string(),
        }
    }
}

/// 服务器版本
pub async fn server_version(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ApiResponse<VersionResponse>>, ApiError> {
    let version = state.client.server_version_info().await?;
    Ok(Json(ApiResponse::success(VersionResponse { version })))
}

/// 数据类型列表
pub async fn list_data_types(
    State(state): State<Arc<AppState>>,
    Query(query): Query<DataTypesQuery>,
) -> Result<Json<ApiResponse<Vec<DataTypeResponse>>>, ApiError> {
    let locale = state.locale(&query.locale);
    let data_types = match query.direction.as_deref().unwrap_or("all") {
        "all" => state.client.all_data_types(locale).await?,
        "input" => state.client.input_data_types(locale).await?,
        "output" => state.client.output_data_types(locale).await?,
        other => {
            return Err(ApiError::BadRequest(format!(
                "Unknown direction: {} (expected all, input or output)",
                other
            )))
        }
    };

    Ok(Json(ApiResponse::success(
        data_types.into_iter().map(Into::into).collect(),
    )))
}

/// 音色列表
pub async fn list_voices(
    State(state): State<Arc<AppState>>,
    Query(query): Query<VoicesQuery>,
) -> Result<Json<ApiResponse<Vec<VoiceResponse>>>, ApiError> {
    let locale = state.locale(&query.locale);
    let voices = match query.domain.as_deref().unwrap_or("all") {
        "all" => state.client.voices(locale).await?,
        "general" => state.client.general_domain_voices(locale).await?,
        "limited" => state.client.limited_domain_voices(locale).await?,
        other => {
            return Err(ApiError::BadRequest(format!(
                "Unknown domain: {} (expected all, general or limited)",
                other
            )))
        }
    };

    Ok(Json(ApiResponse::success(
        voices.into_iter().map(Into::into).collect(),
    )))
}

/// 可用语言
pub async fn list_languages(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ApiResponse<Vec<LanguageResponse>>>, ApiError> {
    let languages = state.client.available_languages().await?;
    Ok(Json(ApiResponse::success(
        languages
            .into_iter()
            .map(|(code, name)| LanguageResponse { code, name })
            .collect(),
    )))
}

/// 音频文件格式
pub async fn list_audio_formats(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ApiResponse<Vec<String>>>, ApiError> {
    let formats = state.client.audio_file_format_types().await?;
    Ok(Json(ApiResponse::success(formats)))
}

/// 数据类型示例文本
pub async fn example_text(
    State(state): State<Arc<AppState>>,
    Path(data_type): Path<String>,
) -> Result<Json<ApiResponse<TextResponse>>, ApiError> {
    let text = state.client.server_example_text(&data_type).await?;
    Ok(Json(ApiResponse::success(TextResponse {
        name: data_type,
        text,
    })))
}

/// 音色示例文本
pub async fn voice_example_text(
    State(state): State<Arc<AppState>>,
    Path(voice): Path<String>,
) -> Result<Json<ApiResponse<TextResponse>>, ApiError> {
    let text = state.client.voice_example_text(&voice).await?;
    Ok(Json(ApiResponse::success(TextResponse { name: voice, text })))
}

/// 音色支持的音效
pub async fn voice_audio_effects(
    State(state): State<Arc<AppState>>,
    Path(voice): Path<String>,
) -> Result<Json<ApiResponse<TextResponse>>, ApiError> {
    let text = state.client.audio_effects(&voice).await?;
    Ok(Json(ApiResponse::success(TextResponse { name: voice, text })))
}

/// 清空能力缓存，下一次查询重新访问服务器
pub async fn reset_cache(State(state): State<Arc<AppState>>) -> Json<ApiResponse<Empty>> {
    state.client.reset_cache().await;
    tracing::info!("Capability cache reset by request");
    Json(ApiResponse::success(Empty {}))
}
