//! OCR (Optical Character Recognition) Module
//!
//! Wraps the Tesseract engine (via `leptess`) behind a provider that the
//! analyze endpoint calls once per uploaded file. If Tesseract or its
//! language data cannot be loaded at startup the provider degrades to an
//! `Unavailable` backend: construction still succeeds and every extraction
//! call reports a per-file error instead of crashing the process.
//!
//! Progress is surfaced through an optional observer callback that fires
//! only when `DEBUG_MODE` is enabled; it never affects the returned text.

mod provider;

pub use provider::{OcrProvider, ProgressObserver};
