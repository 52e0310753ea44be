//! Data models for tokens, receipts and configuration.

pub mod config;
pub mod receipt;
pub mod token;
