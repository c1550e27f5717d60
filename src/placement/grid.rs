//! Occupancy grid used to keep placed words from overlapping
//!
//! Collision checks sample the box interior at a coarse stride while marking
//! covers every cell plus padding. The asymmetry keeps checks cheap; the padding
//! still guarantees a marked box is detected by any box overlapping it.

use crate::io::configuration::COLLISION_STRIDE;
use crate::placement::bounds::WordBox;
use ndarray::Array2;

/// Per-run occupancy bitmap, one cell per canvas pixel (0 free, 1 occupied)
#[derive(Debug, Clone)]
pub struct CollisionGrid {
    cells: Array2<u8>,
}

// Half-open pixel span covering [start, end) after rounding outwards
fn pixel_span(start: f32, end: f32, padding: i64) -> (i64, i64) {
    (start.floor() as i64 - padding, end.ceil() as i64 + padding)
}

impl CollisionGrid {
    /// Create an all-free grid matching the canvas
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            cells: Array2::zeros((height as usize, width as usize)),
        }
    }

    /// Grid width in cells
    pub fn width(&self) -> u32 {
        self.cells.ncols() as u32
    }

    /// Grid height in cells
    pub fn height(&self) -> u32 {
        self.cells.nrows() as u32
    }

    /// Whether the cell at `(x, y)` is occupied; out-of-range cells report false
    pub fn is_occupied(&self, x: i64, y: i64) -> bool {
        let (Ok(col), Ok(row)) = (usize::try_from(x), usize::try_from(y)) else {
            return false;
        };
        self.cells.get([row, col]).is_some_and(|&cell| cell != 0)
    }

    /// Number of occupied cells
    pub fn occupied_count(&self) -> usize {
        self.cells.iter().filter(|&&cell| cell != 0).count()
    }

    /// Whether a box would collide with existing words or leave the canvas
    ///
    /// The interior is sampled every [`COLLISION_STRIDE`] pixels on both axes.
    pub fn check_collision(&self, word_box: &WordBox) -> bool {
        if !word_box.fits_within(self.width(), self.height()) {
            return true;
        }

        let (x_start, x_end) = pixel_span(word_box.left, word_box.right(), 0);
        let (y_start, y_end) = pixel_span(word_box.top, word_box.bottom(), 0);

        (y_start..y_end.max(y_start + 1))
            .step_by(COLLISION_STRIDE)
            .any(|y| {
                (x_start..x_end.max(x_start + 1))
                    .step_by(COLLISION_STRIDE)
                    .any(|x| self.is_occupied(x, y))
            })
    }

    /// Claim a box plus `padding` pixels on every side, clipped to the grid
    pub fn mark(&mut self, word_box: &WordBox, padding: u32) {
        let padding = i64::from(padding);
        let (x_start, x_end) = pixel_span(word_box.left, word_box.right(), padding);
        let (y_start, y_end) = pixel_span(word_box.top, word_box.bottom(), padding);

        let x_start = x_start.max(0) as usize;
        let y_start = y_start.max(0) as usize;
        let x_end = x_end.clamp(0, i64::from(self.width())) as usize;
        let y_end = y_end.clamp(0, i64::from(self.height())) as usize;

        for row in y_start..y_end {
            for col in x_start..x_end {
                if let Some(cell) = self.cells.get_mut([row, col]) {
                    *cell = 1;
                }
            }
        }
    }
}
