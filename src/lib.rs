//! `LittleLogic` - explain-it-like-I'm-five chat
//!
//! An inference proxy that forwards single messages to a hosted LLM, and the
//! client-side conversation controller that talks to it.

pub mod api;
pub mod conversation;
pub mod llm;
pub mod system_prompt;
