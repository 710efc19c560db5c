//! Board grid and piece geometry.

pub use self::{board::*, piece::*, render::*};

pub(crate) mod board;
pub(crate) mod piece;
pub(crate) mod render;

/// Board width used when no configuration is supplied.
pub const DEFAULT_WIDTH: usize = 10;
/// Board height used when no configuration is supplied.
pub const DEFAULT_HEIGHT: usize = 20;

/// Converts a grid dimension into the signed coordinate space pieces live in.
///
/// Dimensions are bounded by [`EngineConfig::validate`](crate::EngineConfig::validate),
/// so saturation never happens in practice.
pub(crate) fn coord(n: usize) -> i32 {
    i32::try_from(n).unwrap_or(i32::MAX)
}
