//! HTTP Handlers

mod capabilities;
mod ping;
mod process;

pub use capabilities::*;
pub use ping::*;
pub use process::*;
