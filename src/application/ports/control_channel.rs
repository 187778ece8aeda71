//! Control Channel Port - 行式请求/应答控制通道
//!
//! 具体实现在 infrastructure/tcp 层

use async_trait::async_trait;

use crate::application::error::MaryError;

pub const CMD_VERSION: &str = "MARY VERSION";
pub const CMD_LIST_DATATYPES: &str = "MARY LIST DATATYPES";
pub const CMD_LIST_VOICES: &str = "MARY LIST VOICES";
pub const CMD_LIST_AUDIO_FILE_FORMAT_TYPES: &str = "MARY LIST AUDIOFILEFORMATTYPES";
pub const CMD_EXAMPLE_TEXT: &str = "MARY EXAMPLETEXT";
pub const CMD_VOICE_EXAMPLE_TEXT: &str = "MARY VOICE EXAMPLETEXT";
pub const CMD_VOICE_AUDIO_EFFECTS: &str = "MARY VOICE AUDIOEFFECTS";

/// Control Channel Port
///
/// 发送一行命令，收集应答行直到空行或连接关闭。
/// 返回的行不含行结束符，也不含作为终止符的空行。
#[async_trait]
pub trait ControlChannelPort: Send + Sync {
    async fn query(&self, command: &str) -> Result<Vec<String>, MaryError>;
}
