//! PNG rendering of grids with the ARC colour palette

use image::{Rgba, RgbaImage};
use std::path::Path;

use crate::grid::Grid;
use crate::io::configuration::ARC_PALETTE;
use crate::io::error::{InferenceError, Result, invalid_parameter};

/// Palette colour for a grid value; values past the palette wrap around
pub fn value_color(value: u8) -> Rgba<u8> {
    let index = usize::from(value) % ARC_PALETTE.len();
    Rgba(ARC_PALETTE.get(index).copied().unwrap_or([0, 0, 0, 255]))
}

/// Render each cell as a `cell_pixels`-sided square
///
/// # Errors
///
/// Returns [`InferenceError::InvalidParameter`] if `cell_pixels` is zero
pub fn grid_to_image(grid: &Grid, cell_pixels: u32) -> Result<RgbaImage> {
    if cell_pixels == 0 {
        return Err(invalid_parameter(
            "cell_pixels",
            &cell_pixels,
            &"must be at least 1",
        ));
    }
    let width = grid.cols() as u32 * cell_pixels;
    let height = grid.rows() as u32 * cell_pixels;

    let mut img = RgbaImage::new(width, height);
    for (cell, value) in grid.iter_cells() {
        let color = value_color(value);
        let x0 = cell.col as u32 * cell_pixels;
        let y0 = cell.row as u32 * cell_pixels;
        for y in y0..y0 + cell_pixels {
            for x in x0..x0 + cell_pixels {
                img.put_pixel(x, y, color);
            }
        }
    }
    Ok(img)
}

/// Render a grid and save it as PNG, creating parent directories
///
/// # Errors
///
/// Returns an error if:
/// - `cell_pixels` is zero
/// - The parent directory cannot be created
/// - The image cannot be saved to the specified path
pub fn export_grid_as_png(grid: &Grid, cell_pixels: u32, output_path: &Path) -> Result<()> {
    let img = grid_to_image(grid, cell_pixels)?;

    if let Some(parent) = output_path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|e| InferenceError::FileSystem {
            path: parent.to_path_buf(),
            operation: "create directory",
            source: e,
        })?;
    }

    img.save(output_path)
        .map_err(|e| InferenceError::ImageExport {
            path: output_path.to_path_buf(),
            source: e,
        })?;

    Ok(())
}
