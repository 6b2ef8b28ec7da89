use std::time::Duration;

use crate::layout::{DEFAULT_COLUMN_COUNT, DEFAULT_MAX_SLIDES};

/// Timing of the one-shot column entrance animation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnimationTiming {
    /// Delay between consecutive columns.
    pub stagger: Duration,
    /// Length of the CSS slide transition.
    pub slide_duration: Duration,
    /// Extra pause after the last up-transition before sliding back down.
    pub settle: Duration,
    /// Visible fraction of the showcase that triggers the animation.
    pub visibility_threshold: f64,
}

impl Default for AnimationTiming {
    fn default() -> Self {
        Self {
            stagger: Duration::from_millis(250),
            slide_duration: Duration::from_millis(1200),
            settle: Duration::from_millis(100),
            visibility_threshold: 0.2,
        }
    }
}

impl AnimationTiming {
    /// Start offset of column `index` within a staggered pass.
    pub fn column_delay(&self, index: usize) -> Duration {
        self.stagger * index as u32
    }

    /// When the down pass starts, counted from the trigger.
    pub fn settle_delay(&self, column_count: usize) -> Duration {
        self.column_delay(column_count.saturating_sub(1)) + self.slide_duration + self.settle
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ShowcaseConfig {
    pub column_count: usize,
    pub max_slides: usize,
    /// Horizontal gap between slides in the mobile track.
    pub slide_gutter_px: f64,
    /// Window widths below this show the mobile slider instead of the grid.
    pub mobile_breakpoint_px: i32,
    pub animation: AnimationTiming,
}

impl Default for ShowcaseConfig {
    fn default() -> Self {
        Self {
            column_count: DEFAULT_COLUMN_COUNT,
            max_slides: DEFAULT_MAX_SLIDES,
            slide_gutter_px: 16.0,
            mobile_breakpoint_px: 768,
            animation: AnimationTiming::default(),
        }
    }
}

impl ShowcaseConfig {
    /// Whether an allocated width shows the slider. Unallocated (0) counts as wide.
    pub fn is_mobile_width(&self, width: i32) -> bool {
        width > 0 && width < self.mobile_breakpoint_px
    }
}
