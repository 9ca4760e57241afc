use plotters::drawing::DrawingAreaErrorKind;

use crate::board::BoardError;
use crate::resolver::ResolveError;
use crate::state::StateError;
use crate::types::VertexId;

#[derive(Debug, thiserror::Error)]
pub enum VizError {
    #[error(transparent)]
    Board(#[from] BoardError),
    #[error(transparent)]
    State(#[from] StateError),
    #[error(transparent)]
    Resolve(#[from] ResolveError),
    #[error("vertex {0} is not on the board")]
    UnknownVertex(VertexId),
    #[error("invalid render configuration: {0}")]
    Config(String),
    #[error("nothing to draw: {0}")]
    EmptyScene(&'static str),
    #[error("drawing failed: {0}")]
    Drawing(String),
    #[error("cannot encode vertex table: {0}")]
    Json(#[from] serde_json::Error),
}

impl<E> From<DrawingAreaErrorKind<E>> for VizError
where
    E: std::error::Error + Send + Sync,
{
    fn from(err: DrawingAreaErrorKind<E>) -> Self {
        VizError::Drawing(err.to_string())
    }
}
