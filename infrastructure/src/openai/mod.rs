//! OpenAI-compatible chat-completions adapter.
//!
//! Works against any server exposing `POST {base_url}/chat/completions`
//! (OpenAI, vLLM, Ollama, LM Studio).
//!
//! - [`client`]: HTTP transport and status/error mapping
//! - [`gateway`]: [`OpenAiGateway`], the [`LlmGateway`](auction_application::LlmGateway) adapter
//! - [`session`]: [`OpenAiSession`], one conversation with a fixed model
//! - [`protocol`]: request and response bodies

pub mod client;
pub mod gateway;
pub mod protocol;
pub mod session;

pub use client::ChatClient;
pub use gateway::OpenAiGateway;
pub use session::OpenAiSession;
