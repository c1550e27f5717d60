//! Word footprints in canvas coordinates

/// Axis-aligned box around a word, centred on its sampled point
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WordBox {
    /// Left edge
    pub left: f32,
    /// Top edge
    pub top: f32,
    /// Box width (measured text advance)
    pub width: f32,
    /// Box height
    pub height: f32,
}

impl WordBox {
    /// Box of the given size centred on `(center_x, center_y)`
    pub const fn centered(center_x: f32, center_y: f32, width: f32, height: f32) -> Self {
        Self {
            left: center_x - width / 2.0,
            top: center_y - height / 2.0,
            width,
            height,
        }
    }

    /// Right edge
    pub const fn right(&self) -> f32 {
        self.left + self.width
    }

    /// Bottom edge
    pub const fn bottom(&self) -> f32 {
        self.top + self.height
    }

    /// Centre point
    pub const fn center(&self) -> (f32, f32) {
        (self.left + self.width / 2.0, self.top + self.height / 2.0)
    }

    /// The four corners followed by the centre, as pixel coordinates
    pub fn probe_points(&self) -> [(i64, i64); 5] {
        let (left, top) = (self.left.floor() as i64, self.top.floor() as i64);
        let (right, bottom) = (self.right().floor() as i64, self.bottom().floor() as i64);
        let (center_x, center_y) = self.center();
        [
            (left, top),
            (right, top),
            (left, bottom),
            (right, bottom),
            (center_x.floor() as i64, center_y.floor() as i64),
        ]
    }

    /// Whether the box lies entirely inside a `width` x `height` canvas
    pub const fn fits_within(&self, width: u32, height: u32) -> bool {
        self.left >= 0.0
            && self.top >= 0.0
            && self.right() <= width as f32
            && self.bottom() <= height as f32
    }

    /// Whether two boxes share a region of positive area
    pub const fn overlaps(&self, other: &Self) -> bool {
        self.left < other.right()
            && other.left < self.right()
            && self.top < other.bottom()
            && other.top < self.bottom()
    }
}
