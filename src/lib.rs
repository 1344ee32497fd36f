//! # hn-digest
//!
//! Summarizes the articles linked from a news listing page (Hacker News by
//! default) and puts each summary right beneath its link.
//!
//! ## Architecture
//!
//! ```text
//! Page → scan links → BatchScheduler ─┬─ Extractor (proxy fetch + HTML → text)
//!                                     ├─ BackendHandle → Summarizer (LLM API)
//!                                     └─ Renderer
//! ```
//!
//! Links are processed in fixed-size batches with a cooldown in between,
//! and each link is claimed at most once.
//!
//! ## Quick Start
//!
//! ```bash
//! # Write settings and a config bundle template
//! hn-digest init
//!
//! # Summarize the front page to the terminal
//! hn-digest run
//!
//! # Write the front page with summaries inserted
//! hn-digest run --output front.html
//! ```

/// Application context and error handling.
///
/// The [`AppContext`](app::AppContext) struct wires together fetcher,
/// extractor and the backend task.
pub mod app;

/// Backend orchestrator behind a typed request/response channel.
///
/// - [`Request`](backend::Request) / [`Response`](backend::Response): the two message kinds
/// - [`spawn_backend`](backend::spawn_backend): starts the task, returns a handle
pub mod backend;

/// Command-line interface using clap.
pub mod cli;

/// Settings file and the one-shot config bundle provider.
pub mod config;

/// Core domain models.
///
/// - [`LinkCandidate`](domain::LinkCandidate): a link plus its claimed flag
/// - [`ConfigBundle`](domain::ConfigBundle): endpoint, key, model, prompt, proxy
/// - [`SummaryResult`](domain::SummaryResult): summary or failure reason
pub mod domain;

/// Article text extraction through a fetch proxy.
pub mod extractor;

/// Listing page loading.
pub mod fetcher;

/// Result renderers for the terminal and for the rewritten page.
pub mod render;

/// Batching, cooldowns and per-link claiming.
pub mod scheduler;

/// Summarization client for chat-completions and Gemini style APIs.
pub mod summarizer;
