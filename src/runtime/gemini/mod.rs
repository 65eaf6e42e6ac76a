//! Gemini provider implementation
//!
//! This module provides a client for interacting with Google's Gemini models
//! via the Gemini API, implementing the ModelProvider trait.

pub mod client;
pub mod mapper;
pub mod sse;
pub mod types;

// Re-export main types for convenience
pub use client::GeminiClient;
