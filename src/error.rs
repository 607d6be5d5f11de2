//! Error handling

use thiserror::Error;

pub type DashboardResult<T> = Result<T, DashboardError>;

/// Error taxonomy for the dashboard client.
///
/// `Transport` and `Application` are always caught at the call site that
/// issued the request and converted into a notification plus a connection
/// state update where applicable; they never stop the polling schedule.
/// `RenderTargets` is only produced once, at surface binding time.
#[derive(Debug, Error)]
pub enum DashboardError {
    /// Network failure or a non-2xx response (including undecodable bodies).
    #[error("transport error: {0}")]
    Transport(String),

    /// The server answered 2xx but reported `success: false`.
    #[error("server rejected request: {0}")]
    Application(String),

    /// Required render targets were missing at initialization.
    #[error("missing render targets: {0}")]
    RenderTargets(String),
}

impl From<reqwest::Error> for DashboardError {
    fn from(err: reqwest::Error) -> Self {
        DashboardError::Transport(err.to_string())
    }
}
