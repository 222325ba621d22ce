//! LLM Service Module
//!
//! Generation is delegated entirely to an external OpenAI-compatible chat
//! completion provider. Handlers only see the [`ChatProvider`] trait.
//!
//! # Architecture
//! ```text
//! ┌─────────────────┐
//! │  ChatProvider   │  ← Trait (stream_chat / complete_chat)
//! └────────┬────────┘
//!          │
//!    ┌─────┴──────────────────┐
//!    ▼                        ▼
//! ┌────────────────────────┐ ┌──────────────┐
//! │ OpenAICompatibleClient │ │ Test doubles │
//! └────────────────────────┘ └──────────────┘
//! ```

mod client;
mod models;
mod provider;

pub use client::OpenAICompatibleClient;
pub use models::*;
pub use provider::ChatProvider;
