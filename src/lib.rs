//! # Leftover Recipe Search Service
//!
//! A service layer between a client and an external recipe catalog that
//! normalizes ingredient input, merges pantry staples, ranks candidate
//! recipes by ingredient overlap, resolves ingredient substitutes, and
//! caches results to limit external calls.

pub mod api;
pub mod cache;
pub mod catalog;
pub mod config;
pub mod normalize;
pub mod ranking;
pub mod search;
pub mod substitution;
