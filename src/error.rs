//! Error taxonomy for the population pipeline.

use thiserror::Error;

use crate::pipeline::Stage;

pub type Result<T> = std::result::Result<T, PipelineError>;

/// Every failure is fatal to the run; nothing here is retried.
#[derive(Error, Debug)]
pub enum PipelineError {
    /// Source unreadable, malformed, or missing required columns.
    #[error("load error: {0}")]
    Load(String),

    /// A field needed for backfill, merge, derivation or a query is missing or invalid.
    #[error("data error: {0}")]
    Data(String),

    /// A pipeline operation was called out of order.
    #[error("pipeline stage error: expected {expected:?}, found {found:?}")]
    Stage { expected: Stage, found: Stage },

    /// The predictor could not fit or was used before fitting.
    #[error("model error: {0}")]
    Model(String),

    #[error("render error: {0}")]
    Render(String),

    #[error("config error: {0}")]
    Config(String),
}

impl PipelineError {
    /// Wrap an IO-layer error (and its context chain) as a load failure.
    pub(crate) fn load(err: anyhow::Error) -> Self {
        Self::Load(format!("{err:#}"))
    }

    /// Wrap an IO-layer error (and its context chain) as a render failure.
    pub(crate) fn render(err: anyhow::Error) -> Self {
        Self::Render(format!("{err:#}"))
    }
}
