//! Dot indicators kept in sync with the mobile slide track.

use std::cell::Cell;
use std::rc::Rc;

use tracing::{debug, trace};

use super::mount::{DotStrip, SlideTrack};

pub struct SliderController<T: SlideTrack, D: DotStrip> {
    track: T,
    dots: D,
    slide_count: usize,
    gutter: f64,
    current: Cell<usize>,
}

impl<T: SlideTrack + 'static, D: DotStrip + 'static> SliderController<T, D> {
    /// Builds one dot per slide and marks the first one active.
    ///
    /// Does nothing at all if either mount point is missing.
    pub fn attach(track: Option<T>, dots: Option<D>, gutter: f64) -> Option<Rc<Self>> {
        let (Some(track), Some(dots)) = (track, dots) else {
            debug!("Slider controller not attached: missing track or dots");
            return None;
        };

        dots.clear();
        let slide_count = track.slide_count();
        let controller = Rc::new(Self {
            track,
            dots,
            slide_count,
            gutter,
            current: Cell::new(0),
        });

        for index in 0..slide_count {
            let weak = Rc::downgrade(&controller);
            controller.dots.append_dot(
                &format!("Go to slide {}", index + 1),
                Box::new(move || {
                    if let Some(controller) = weak.upgrade() {
                        controller.go_to(index);
                    }
                }),
            );
        }
        controller.refresh_dots();
        debug!(slide_count, "Slider controller attached");
        Some(controller)
    }
}

impl<T: SlideTrack, D: DotStrip> SliderController<T, D> {
    #[cfg(test)]
    pub fn current(&self) -> usize {
        self.current.get()
    }

    #[cfg(test)]
    pub fn slide_count(&self) -> usize {
        self.slide_count
    }

    /// Distance between the left edges of two neighbouring slides.
    fn pitch(&self) -> f64 {
        self.track.first_slide_width() + self.gutter
    }

    /// Scrolls to slide `index` and activates its dot right away.
    pub fn go_to(&self, index: usize) {
        if index >= self.slide_count {
            return;
        }
        let offset = index as f64 * self.pitch();
        trace!(index, offset, "Slider go_to");
        self.track.scroll_to(offset);
        self.current.set(index);
        self.refresh_dots();
    }

    /// Adopts the slide nearest to the current scroll offset.
    ///
    /// Returns the new index when it changed.
    pub fn on_scroll(&self) -> Option<usize> {
        if self.slide_count == 0 {
            return None;
        }
        let pitch = self.pitch();
        if !(pitch.is_finite() && pitch > 0.0) {
            return None;
        }
        let nearest = (self.track.scroll_left() / pitch).round();
        if !nearest.is_finite() || nearest < 0.0 || nearest >= self.slide_count as f64 {
            return None;
        }
        let nearest = nearest as usize;
        if nearest == self.current.get() {
            return None;
        }
        self.current.set(nearest);
        self.refresh_dots();
        Some(nearest)
    }

    fn refresh_dots(&self) {
        let current = self.current.get();
        for index in 0..self.slide_count {
            self.dots.set_dot_active(index, index == current);
        }
    }
}
