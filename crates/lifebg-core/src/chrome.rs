//! Scroll-driven page chrome: section fades, nav highlighting, progress bars
//! and the infinite-scroll page extension.
//!
//! All functions are clamped linear interpolations over bounding rectangles
//! measured relative to the viewport, as `getBoundingClientRect` reports them.

use serde::{Deserialize, Serialize};

/// Fraction of the viewport height over which sections fade in and out
pub const FADE_FRACTION: f64 = 0.3;
/// Extend the page once its bottom is closer than this (px)
pub const INFINITE_SCROLL_MARGIN: f64 = 2000.0;
/// How much to extend the page by (px)
pub const INFINITE_SCROLL_STEP: f64 = 1000.0;

/// Vertical extent of an element relative to the top of the viewport
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub top: f64,
    pub bottom: f64,
}

impl Rect {
    pub fn new(top: f64, bottom: f64) -> Self {
        Self { top, bottom }
    }
}

/// Opacity of a section: fades in entering from below, fades out leaving at the top
pub fn section_opacity(rect: Rect, viewport_height: f64) -> f64 {
    let fade_distance = viewport_height * FADE_FRACTION;
    if fade_distance <= 0.0 {
        return if nav_link_active(rect, viewport_height) { 1.0 } else { 0.0 };
    }

    let fade_in = if rect.top > viewport_height {
        0.0
    } else if rect.top > viewport_height - fade_distance {
        (viewport_height - rect.top) / fade_distance
    } else {
        1.0
    };

    let fade_out = if rect.bottom < 0.0 {
        0.0
    } else if rect.bottom < fade_distance {
        rect.bottom / fade_distance
    } else {
        1.0
    };

    fade_in.min(fade_out).clamp(0.0, 1.0)
}

/// Whether any part of the section is on screen
pub fn nav_link_active(rect: Rect, viewport_height: f64) -> bool {
    rect.top < viewport_height && rect.bottom > 0.0
}

/// Progress through a sticky wrapper, in `[0, 1]`
pub fn section_progress(wrapper_top: f64, wrapper_height: f64, viewport_height: f64) -> f64 {
    if wrapper_top > 0.0 {
        return 0.0;
    }
    let scrollable = wrapper_height - viewport_height;
    if scrollable <= 0.0 {
        return 1.0;
    }
    (wrapper_top.abs() / scrollable).min(1.0)
}

/// Whole-page progress bar width in percent
pub fn page_progress_percent(scroll_y: f64, end_point: f64) -> f64 {
    if end_point <= 0.0 {
        return if scroll_y > 0.0 { 100.0 } else { 0.0 };
    }
    (scroll_y / end_point * 100.0).clamp(0.0, 100.0)
}

/// New minimum body height when the reader nears the bottom of the page
pub fn infinite_scroll_min_height(
    scroll_y: f64,
    viewport_height: f64,
    document_height: f64,
) -> Option<f64> {
    let scroll_bottom = scroll_y + viewport_height;
    if document_height - scroll_bottom < INFINITE_SCROLL_MARGIN {
        Some(document_height + INFINITE_SCROLL_STEP)
    } else {
        None
    }
}
