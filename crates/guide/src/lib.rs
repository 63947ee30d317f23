pub mod chat;
pub mod gateway;
pub mod persona;
pub mod session;
pub mod wire;

#[cfg(not(target_arch = "wasm32"))]
pub mod gemini;

pub use chat::*;
pub use gateway::*;
pub use session::*;
