//! Desk calculator engine with basic and scientific keypads.

pub mod calculator;
pub mod config;
pub mod session;
pub mod transcript;
