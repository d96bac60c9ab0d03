//! veritext — OCR + AI-text-detection service.
//!
//! Accepts multipart image uploads over HTTP, extracts text from each image
//! with Tesseract, submits the text to a ZeroGPT-compatible detection API,
//! and returns one report per image with a human/AI probability split.

pub mod api;
pub mod config;
pub mod detection;
pub mod error;
pub mod models;
pub mod ocr;
pub mod storage;
