// src/core/mod.rs

pub mod fmt;
pub mod html;
pub mod period;
pub mod sanitize;

pub use sanitize::normalize_title;
