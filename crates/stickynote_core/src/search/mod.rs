//! Note search entry points.
//!
//! # Responsibility
//! - Decide which notes are visible for an active search term.
//! - Keep result shaping inside core.

pub mod filter;
