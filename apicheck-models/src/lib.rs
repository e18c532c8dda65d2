//! Assessment backend for apicheck.
//!
//! This crate provides:
//! - Provider trait for a unified "prompt in, text out" interface
//! - An Anthropic Messages API provider
//! - Credential management for API keys
//! - A scripted mock provider for tests and offline runs
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────┐
//! │              dyn ModelProvider                       │
//! │  ┌──────────────────────┐  ┌──────────────────────┐ │
//! │  │  AnthropicProvider   │  │     MockProvider     │ │
//! │  └──────────────────────┘  └──────────────────────┘ │
//! └─────────────────────────────────────────────────────┘
//!                          │
//!                          ▼
//! ┌─────────────────────────────────────────────────────┐
//! │                  CredentialStore                     │
//! │         (System Keyring + Env Fallback)             │
//! └─────────────────────────────────────────────────────┘
//! ```

mod error;

pub mod auth;
pub mod providers;

pub use error::{Error, Result};
