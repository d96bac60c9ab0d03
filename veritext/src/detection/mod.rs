//! AI-text detection module.
//!
//! `DetectionClient` talks to the remote ZeroGPT-compatible classification
//! API: one synchronous POST per text, `ApiKey` header, JSON body with an
//! `input_text` field. Empty or whitespace-only input short-circuits to a
//! zero-valued result without touching the network. There are no retries;
//! any transport error, non-2xx status, or `success:false` envelope is
//! surfaced as a detection failure for the caller to record per-file.

mod client;

pub use client::DetectionClient;
