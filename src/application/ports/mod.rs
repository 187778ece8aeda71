//! Application Ports - 出站端口定义
//!
//! 定义应用层与基础设施层的抽象接口

mod control_channel;
mod synthesis;

pub use control_channel::{
    ControlChannelPort, CMD_EXAMPLE_TEXT, CMD_LIST_AUDIO_FILE_FORMAT_TYPES, CMD_LIST_DATATYPES,
    CMD_LIST_VOICES, CMD_VERSION, CMD_VOICE_AUDIO_EFFECTS, CMD_VOICE_EXAMPLE_TEXT,
};
pub use synthesis::{OutputSink, SynthesisPort, SynthesisReport};
