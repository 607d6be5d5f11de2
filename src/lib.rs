//! IDS dashboard client - a live monitoring client for the IDS
//! machine-learning backend.
//!
//! The core is the polling-and-reconciliation engine in [`poll`]: it owns
//! the polling cadence, request sequencing, partial-failure handling, and
//! the mapping from raw server payloads to a consistent rendered state.
//! Everything else is the surface it renders onto ([`ui`]), the backend
//! contract ([`api`]), and the user command path ([`control`]).

pub mod api;
pub mod config;
pub mod constants;
pub mod control;
pub mod error;
pub mod notify;
pub mod poll;
pub mod ui;

pub use config::DashboardConfig;
pub use control::CommandDispatcher;
pub use error::{DashboardError, DashboardResult};
pub use poll::Poller;
pub use ui::Renderer;
