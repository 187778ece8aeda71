//! Domain Layer - 领域层
//!
//! MARY 协议中的值对象：数据类型、音色、合成请求与音频格式。
//! 不包含任何 I/O。

mod audio_type;
mod data_type;
mod language;
mod request;
mod voice;

pub use audio_type::{
    content_type_for, AudioType, FALLBACK_AUDIO_CONTENT_TYPE, TEXT_CONTENT_TYPE,
};
pub use data_type::{DataType, AUDIO_TYPE_NAME};
pub use language::language_name;
pub use request::{is_token, SynthesisRequest};
pub use voice::{Voice, GENERAL_DOMAIN};
