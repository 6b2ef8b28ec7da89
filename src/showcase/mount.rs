//! Contract between the showcase logic and whatever hosts it.
//!
//! Each trait stands for one mount point of the page. The GTK window
//! implements them with real widgets; tests implement them with plain
//! recording structs.

use crate::layout::ColumnModel;
use crate::models::CardSpec;

pub const SHOWCASE_CLASS: &str = "brand-showcase";
pub const COLUMN_CLASS: &str = "brand-showcase__column";
pub const SLIDE_CLASS: &str = "mobile-slider__slide";
pub const DOT_CLASS: &str = "dot";
pub const ACTIVE_CLASS: &str = "active";
pub const ANIMATE_UP_CLASS: &str = "animate-up";
pub const ANIMATE_DOWN_CLASS: &str = "animate-down";

/// Something carrying a set of CSS classes.
pub trait StyleTarget {
    fn add_class(&self, class: &str);
    fn remove_class(&self, class: &str);
    fn has_class(&self, class: &str) -> bool;
}

/// The desktop grid container.
pub trait GridMount {
    type Column: StyleTarget + 'static;

    /// Removes every previously rendered column.
    fn clear(&self);
    /// Appends a column holding `column.cards` and returns a handle to it.
    fn append_column(&self, column: &ColumnModel) -> Self::Column;
}

#[cfg(test)]
impl<G: GridMount + ?Sized> GridMount for &G {
    type Column = G::Column;

    fn clear(&self) {
        (**self).clear()
    }

    fn append_column(&self, column: &ColumnModel) -> Self::Column {
        (**self).append_column(column)
    }
}

/// The mobile slider track, seen as a container of slides.
pub trait SliderMount {
    fn clear(&self);
    fn append_slide(&self, card: &CardSpec);
}

/// The mobile slider track, seen as a horizontally scrollable strip.
pub trait SlideTrack {
    fn slide_count(&self) -> usize;
    /// Rendered width of the first slide. Only meaningful with at least one slide.
    fn first_slide_width(&self) -> f64;
    fn scroll_left(&self) -> f64;
    /// Smoothly scrolls the strip so its left edge sits at `offset`.
    fn scroll_to(&self, offset: f64);
}

/// The indicator dot container.
pub trait DotStrip {
    fn clear(&self);
    fn append_dot(&self, label: &str, on_click: Box<dyn Fn()>);
    fn set_dot_active(&self, index: usize, active: bool);
}
