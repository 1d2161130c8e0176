//! Map loading
//!
//! A map is a PNG where each pixel is one tile: pure black is solid,
//! anything else is empty.

use std::path::Path;

use image::RgbImage;
use thiserror::Error;

use crate::consts;
use crate::grid::TileGrid;

/// Why a map image could not become a [`TileGrid`]
#[derive(Debug, Error)]
pub enum GridLoadError {
    /// The image failed to open or decode
    #[error("failed to read map image: {0}")]
    Image(#[from] image::ImageError),
    /// A zero-dimension image has no playfield
    #[error("map image is empty ({width}x{height})")]
    Empty { width: u32, height: u32 },
}

/// Load a map from a PNG path using the default tile size
pub fn load_grid(path: impl AsRef<Path>) -> Result<TileGrid, GridLoadError> {
    let path = path.as_ref();
    let img = image::open(path)?.to_rgb8();
    let grid = grid_from_image(&img)?;
    let solid = (0..grid.height())
        .flat_map(|y| (0..grid.width()).map(move |x| (x, y)))
        .filter(|&(x, y)| grid.is_solid(x, y))
        .count();
    log::info!(
        "Loaded map {} ({}x{} tiles, {} solid)",
        path.display(),
        grid.width(),
        grid.height(),
        solid
    );
    Ok(grid)
}

/// Decode an already-loaded image into a grid
pub fn grid_from_image(img: &RgbImage) -> Result<TileGrid, GridLoadError> {
    let (width, height) = img.dimensions();
    if width == 0 || height == 0 {
        return Err(GridLoadError::Empty { width, height });
    }
    let cells = img.pixels().map(|p| p.0 == [0, 0, 0]).collect();
    Ok(TileGrid::from_cells(
        width as i32,
        height as i32,
        consts::TILE_SIZE,
        cells,
    ))
}
