use super::constants::*;
use glam::Vec2;

#[derive(Clone, Copy, Debug, PartialEq, thiserror::Error)]
pub enum ViewportError {
    #[error("viewport height must be positive and finite, got {0}")]
    InvalidHeight(f32),
}

/// Page viewport in CSS pixels; one world unit is one CSS pixel.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    pub fn from_height(height: f32) -> Result<Self, ViewportError> {
        if !height.is_finite() || height <= 0.0 {
            return Err(ViewportError::InvalidHeight(height));
        }
        Ok(Self {
            width: height * VIEWPORT_ASPECT,
            height,
        })
    }

    /// Scale a height ratio to pixels.
    #[inline]
    pub fn h(&self, ratio: f32) -> f32 {
        self.height * ratio
    }

    pub fn max_scroll_top(&self) -> f32 {
        self.h(MAX_SCROLL_TOP_RATIO)
    }

    pub fn plane_size(&self) -> f32 {
        self.h(PLANE_SIZE_RATIO)
    }
}

/// Side of the viewport a plane slides in from.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Entry {
    Right,
    Left,
}

/// Static description of one image plane and its scroll windows (height ratios).
#[derive(Clone, Copy, Debug)]
pub struct PlaneSpec {
    pub image: &'static str,
    pub entry: Entry,
    pub move_window: (f32, f32),
    pub start_y: f32,
    pub row: u32,
    pub rotate_window: (f32, f32),
}

pub const PLANES: [PlaneSpec; 6] = [
    PlaneSpec {
        image: "jx.jpg",
        entry: Entry::Right,
        move_window: (0.3, 1.0),
        start_y: -0.4,
        row: 0,
        rotate_window: (2.6, 3.4),
    },
    PlaneSpec {
        image: "czw.jpg",
        entry: Entry::Left,
        move_window: (0.5, 1.4),
        start_y: -0.4,
        row: 0,
        rotate_window: (2.8, 3.6),
    },
    PlaneSpec {
        image: "lxm.jpg",
        entry: Entry::Right,
        move_window: (0.9, 1.6),
        start_y: -0.1,
        row: 1,
        rotate_window: (3.0, 3.8),
    },
    PlaneSpec {
        image: "gyl.jpg",
        entry: Entry::Left,
        move_window: (1.4, 2.0),
        start_y: -0.4,
        row: 1,
        rotate_window: (3.2, 4.0),
    },
    PlaneSpec {
        image: "gxw.jpg",
        entry: Entry::Right,
        move_window: (2.0, 2.6),
        start_y: 0.4,
        row: 2,
        rotate_window: (3.4, 4.2),
    },
    PlaneSpec {
        image: "wpf.jpg",
        entry: Entry::Left,
        move_window: (2.0, 2.6),
        start_y: 0.4,
        row: 2,
        rotate_window: (3.6, 4.4),
    },
];

impl PlaneSpec {
    /// Off-screen point the plane enters from.
    pub fn entry_point(&self, vp: &Viewport) -> Vec2 {
        let half = vp.plane_size() / 2.0;
        let x = vp.width / 2.0 + half + PLANE_GAP;
        let x = match self.entry {
            Entry::Right => x,
            Entry::Left => -x,
        };
        Vec2::new(x, vp.h(self.start_y))
    }

    /// Grid slot the plane settles in. Planes from the right land in the
    /// left column and vice versa.
    pub fn slot(&self, vp: &Viewport) -> Vec2 {
        let size = vp.plane_size();
        let x = size / 2.0 + PLANE_GAP;
        let x = match self.entry {
            Entry::Right => -x,
            Entry::Left => x,
        };
        let y = vp.h(MOVE_END_Y_RATIO) - self.row as f32 * (size + PLANE_ROW_GAP);
        Vec2::new(x, y)
    }
}

/// Placement of the stacked words inside the rasterized text block.
#[derive(Clone, Debug, PartialEq)]
pub struct TextBlockLayout {
    pub font_px: f32,
    /// Top-left of each line's em box, measured from the block's top-left corner.
    pub line_tops: Vec<Vec2>,
    pub size: Vec2,
    /// Block center at scroll offset zero.
    pub center: Vec2,
}

impl TextBlockLayout {
    /// `widths` are the measured advance widths of each word at `font_px`.
    pub fn new(vp: &Viewport, widths: &[f32]) -> Self {
        let font_px = vp.h(TEXT_SIZE_RATIO);
        let advance = vp.h(TEXT_LINE_ADVANCE_RATIO);
        let width = widths.iter().copied().fold(0.0_f32, f32::max);
        let lines = widths.len();
        let height = if lines == 0 {
            0.0
        } else {
            (lines - 1) as f32 * advance + font_px
        };
        let line_tops = (0..lines)
            .map(|i| Vec2::new(0.0, i as f32 * advance))
            .collect();
        Self {
            font_px,
            line_tops,
            size: Vec2::new(width, height),
            center: Vec2::new(vp.h(TEXT_NUDGE_X_RATIO), 0.0),
        }
    }
}
