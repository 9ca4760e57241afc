#![warn(clippy::all)]
#![deny(rust_2018_idioms)]

pub mod board;
pub mod coords;
pub mod error;
pub mod geometry;
pub mod render;
pub mod resolver;
pub mod state;
pub mod types;

pub use board::{Board, BoardError, Tile, TileCenters};
pub use error::VizError;
pub use geometry::Point;
pub use render::{Placement, RenderConfig, render_board, render_settlements_detailed};
pub use resolver::{Resolution, VertexKind, VertexPositionResolver, VertexTopology};
pub use state::{State, StateError};
pub use types::{PlayerId, Resource, TileId, VertexId};
