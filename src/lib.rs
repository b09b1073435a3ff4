//! Mood analysis with empathetic responses and mood-matched recommendations.
//!
//! Mindful reads free text (optionally with a voice recording and a face image), asks a
//! chat model for the mood and an empathetic reply, and picks a song, a book and a place
//! from static tables keyed by one of six mood categories:
//!
//! | Category | Typical labels |
//! |----------|----------------|
//! | **happy** | joy, cheerful, delighted |
//! | **sad** | depressed, blue, down |
//! | **angry** | mad, furious, rage |
//! | **anxious** | worry, nervous, stress, fear |
//! | **calm** | relaxed, peaceful, serene |
//! | **excited** | energetic, thrilled, pumped |
//!
//! Past analyses are kept in a capped history from which an emotional trend is derived.
//!
//! # Architecture
//!
//! - **Analysis**: OpenAI-compatible chat completions with retry and backoff
//! - **Selection**: keyword-scored books and places, seedable random fallback
//! - **Storage**: newest-first JSON history file, rewritten atomically
//! - **Transport**: HTTP API (axum) and MCP over stdio or Streamable HTTP
//!
//! # Modules
//!
//! - [`config`]: configuration loading from TOML files and environment variables
//! - [`mood`]: mood categories, the categorizer, and result types
//! - [`catalog`]: recommendation tables and keyword selection
//! - [`signals`]: voice and image readings and the multi-modal combiner
//! - [`pattern`]: emotional trend over the history
//! - [`history`]: bounded history buffers and the persisted store
//! - [`llm`]: chat model client and the mood assessment seam
//! - [`analyze`]: the per-request analysis pipeline
//! - [`web`]: HTTP routes
//! - [`tools`]: MCP tools and resources

pub mod analyze;
pub mod catalog;
pub mod config;
pub mod error;
pub mod history;
pub mod llm;
pub mod mood;
pub mod pattern;
pub mod server;
pub mod signals;
pub mod tools;
pub mod web;
