//! Utility functions for code generation and short link handling.
//!
//! - [`code_generator`] - Random short code generation
//! - [`short_url`] - Short link formatting and code extraction

pub mod code_generator;
pub mod short_url;
