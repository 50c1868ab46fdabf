//! Illustration generator for tech blog posts
//!
//! Turns a post title into a DALL-E 3 prompt, requests one image from the
//! OpenAI image generation API, and hands back the URL of the result.

pub mod ai;
pub mod config;
pub mod error;
pub mod models;
pub mod prompts;

pub use error::{Error, Result};
