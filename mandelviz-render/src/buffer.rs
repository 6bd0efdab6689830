use mandelviz_core::GridSize;

use crate::colormap::Rgb;
use crate::error::RenderError;

/// The displayed pixel grid as an RGBA byte buffer.
///
/// This is the flat copy of the frame that screenshot export reads. Rows are
/// stored top-down (image convention); the mesh's pixel y-axis points up, so
/// [`set`](Self::set) flips the row. Colors are clamped here; the colormap
/// itself produces unclamped values.
#[derive(Debug, Clone)]
pub struct FrameImage {
    pub width: u32,
    pub height: u32,
    /// RGBA pixel data, 4 bytes per pixel, row-major, top row first.
    pub pixels: Vec<u8>,
}

impl FrameImage {
    /// A black, fully opaque frame.
    pub fn new(grid: GridSize) -> Self {
        let mut pixels = vec![0u8; grid.pixel_count() * 4];
        for chunk in pixels.chunks_exact_mut(4) {
            chunk[3] = 255;
        }
        Self {
            width: grid.width,
            height: grid.height,
            pixels,
        }
    }

    /// Reset dimensions for a new grid, reusing the allocation when the new
    /// frame is no larger than the old one ever was.
    pub fn reset(&mut self, grid: GridSize) {
        self.width = grid.width;
        self.height = grid.height;
        self.pixels.clear();
        self.pixels.resize(grid.pixel_count() * 4, 0);
        for chunk in self.pixels.chunks_exact_mut(4) {
            chunk[3] = 255;
        }
    }

    /// Write one pixel. `py` is in mesh orientation (0 = bottom row).
    pub fn set(&mut self, px: u32, py: u32, color: Rgb) -> crate::Result<()> {
        if px >= self.width || py >= self.height {
            return Err(RenderError::PixelOutOfBounds {
                px,
                py,
                width: self.width,
                height: self.height,
            });
        }
        let row = (self.height - 1 - py) as usize;
        let idx = (row * self.width as usize + px as usize) * 4;
        let [r, g, b] = color.to_srgb8();
        self.pixels[idx] = r;
        self.pixels[idx + 1] = g;
        self.pixels[idx + 2] = b;
        self.pixels[idx + 3] = 255;
        Ok(())
    }

    /// Read one pixel back in mesh orientation.
    pub fn get(&self, px: u32, py: u32) -> Option<[u8; 4]> {
        if px >= self.width || py >= self.height {
            return None;
        }
        let row = (self.height - 1 - py) as usize;
        let idx = (row * self.width as usize + px as usize) * 4;
        Some([
            self.pixels[idx],
            self.pixels[idx + 1],
            self.pixels[idx + 2],
            self.pixels[idx + 3],
        ])
    }
}
