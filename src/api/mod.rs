//! Backend API - types and HTTP client for the IDS backend.

pub mod client;
pub mod types;

pub use client::{ApiClient, Backend};
