use std::rc::Rc;

use crate::surface::Surface;

pub const DEFAULT_VIEWPORT_WIDTH: f64 = 1280.0;
pub const DEFAULT_VIEWPORT_HEIGHT: f64 = 720.0;

const HERO_FONT_VIEWPORT_RATIO: f64 = 0.08;
const HERO_FONT_MIN_REM: f64 = 1.5;
const HERO_FONT_MAX_REM: f64 = 4.0;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ViewportSnapshot {
    pub width: f64,
    pub height: f64,
    pub scroll_offset: f64,
}

impl Default for ViewportSnapshot {
    fn default() -> Self {
        Self {
            width: DEFAULT_VIEWPORT_WIDTH,
            height: DEFAULT_VIEWPORT_HEIGHT,
            scroll_offset: 0.0,
        }
    }
}

pub fn is_mobile_width(width: f64, breakpoint: f64) -> bool {
    width <= breakpoint
}

/// Hero title size in rem: 8% of the smaller viewport side, clamped to 1.5..=4.
pub fn hero_font_size_rem(snapshot: &ViewportSnapshot) -> f64 {
    let base = (snapshot.width * HERO_FONT_VIEWPORT_RATIO)
        .min(snapshot.height * HERO_FONT_VIEWPORT_RATIO);
    base.clamp(HERO_FONT_MIN_REM, HERO_FONT_MAX_REM)
}

/// One hundredth of the inner height, exported as `--vh` for browsers whose
/// `vh` unit ignores the collapsing toolbar.
pub fn vh_unit_px(snapshot: &ViewportSnapshot) -> f64 {
    snapshot.height * 0.01
}

/// Reads the live viewport; the single place device-class branching happens.
pub struct ViewportMetrics<S: Surface> {
    surface: Rc<S>,
    breakpoint: f64,
}

impl<S: Surface> Clone for ViewportMetrics<S> {
    fn clone(&self) -> Self {
        Self {
            surface: self.surface.clone(),
            breakpoint: self.breakpoint,
        }
    }
}

impl<S: Surface> ViewportMetrics<S> {
    pub fn new(surface: Rc<S>, breakpoint: f64) -> Self {
        Self {
            surface,
            breakpoint,
        }
    }

    pub fn snapshot(&self) -> ViewportSnapshot {
        self.surface.viewport()
    }

    pub fn is_mobile(&self) -> bool {
        self.is_mobile_snapshot(&self.snapshot())
    }

    pub fn is_mobile_snapshot(&self, snapshot: &ViewportSnapshot) -> bool {
        is_mobile_width(snapshot.width, self.breakpoint)
    }

    pub fn breakpoint(&self) -> f64 {
        self.breakpoint
    }
}
