// GTK mount points for the showcase: desktop grid, mobile slide track and dot row

use gtk4::prelude::*;
use gtk4::{glib, Align, Box as GtkBox, Button, Orientation, PolicyType, ScrolledWindow, Widget};
use std::cell::RefCell;
use std::path::PathBuf;
use std::rc::Rc;
use std::time::{Duration, Instant};

use super::card_widget::build_card;
use crate::layout::ColumnModel;
use crate::models::CardSpec;
use crate::showcase::mount::{
    DotStrip, GridMount, SlideTrack, SliderMount, StyleTarget, ACTIVE_CLASS, COLUMN_CLASS,
    DOT_CLASS, SLIDE_CLASS,
};

const COLUMN_SPACING: i32 = 16;
const DOT_SPACING: i32 = 8;
const SMOOTH_SCROLL_DURATION: Duration = Duration::from_millis(320);

fn child_widgets(container: &impl IsA<Widget>) -> Vec<Widget> {
    let mut children = Vec::new();
    let mut child = container.first_child();
    while let Some(widget) = child {
        child = widget.next_sibling();
        children.push(widget);
    }
    children
}

fn remove_children(container: &GtkBox) {
    for child in child_widgets(container) {
        container.remove(&child);
    }
}

impl StyleTarget for GtkBox {
    fn add_class(&self, class: &str) {
        self.add_css_class(class);
    }

    fn remove_class(&self, class: &str) {
        self.remove_css_class(class);
    }

    fn has_class(&self, class: &str) -> bool {
        self.has_css_class(class)
    }
}

/// Directory that relative image references resolve against; shared by all views.
pub type AssetBase = Rc<RefCell<PathBuf>>;

/// Desktop multi-column grid.
#[derive(Clone)]
pub struct GridView {
    container: GtkBox,
    base_dir: AssetBase,
}

impl GridView {
    pub fn new(base_dir: AssetBase) -> Self {
        let container = GtkBox::new(Orientation::Horizontal, COLUMN_SPACING);
        container.set_widget_name("brandGrid");
        container.add_css_class("brand-showcase__grid");
        container.set_homogeneous(true);
        container.set_valign(Align::Start);
        Self {
            container,
            base_dir,
        }
    }

    pub fn widget(&self) -> &GtkBox {
        &self.container
    }
}

impl GridMount for GridView {
    type Column = GtkBox;

    fn clear(&self) {
        remove_children(&self.container);
    }

    fn append_column(&self, column: &ColumnModel) -> GtkBox {
        let widget = GtkBox::new(Orientation::Vertical, COLUMN_SPACING);
        widget.add_css_class(COLUMN_CLASS);
        widget.set_widget_name(&format!("column-{}", column.column_index));
        widget.set_valign(Align::Start);

        let base_dir = self.base_dir.borrow();
        for card in &column.cards {
            widget.append(&build_card(card, &base_dir));
        }
        self.container.append(&widget);
        widget
    }
}

/// Horizontally scrollable strip of mobile slides.
#[derive(Clone)]
pub struct SliderTrack {
    scroller: ScrolledWindow,
    strip: GtkBox,
    base_dir: AssetBase,
    scroll_animation: Rc<RefCell<Option<glib::SourceId>>>,
}

impl SliderTrack {
    pub fn new(base_dir: AssetBase, gutter: f64) -> Self {
        let strip = GtkBox::new(Orientation::Horizontal, gutter.round() as i32);
        strip.add_css_class("mobile-slider__strip");

        let scroller = ScrolledWindow::builder()
            .hscrollbar_policy(PolicyType::External)
            .vscrollbar_policy(PolicyType::Never)
            .child(&strip)
            .build();
        scroller.set_widget_name("mobileSliderTrack");
        scroller.add_css_class("mobile-slider__track");

        Self {
            scroller,
            strip,
            base_dir,
            scroll_animation: Rc::new(RefCell::new(None)),
        }
    }

    pub fn widget(&self) -> &ScrolledWindow {
        &self.scroller
    }

    pub fn hadjustment(&self) -> gtk4::Adjustment {
        self.scroller.hadjustment()
    }

    fn stop_scroll_animation(&self) {
        if let Some(source) = self.scroll_animation.borrow_mut().take() {
            source.remove();
        }
    }
}

impl SliderMount for SliderTrack {
    fn clear(&self) {
        self.stop_scroll_animation();
        remove_children(&self.strip);
        self.scroller.hadjustment().set_value(0.0);
    }

    fn append_slide(&self, card: &CardSpec) {
        let slide = GtkBox::new(Orientation::Vertical, 0);
        slide.add_css_class(SLIDE_CLASS);
        slide.append(&build_card(card, &self.base_dir.borrow()));
        self.strip.append(&slide);
    }
}

impl SlideTrack for SliderTrack {
    fn slide_count(&self) -> usize {
        child_widgets(&self.strip)
            .iter()
            .filter(|child| child.has_css_class(SLIDE_CLASS))
            .count()
    }

    fn first_slide_width(&self) -> f64 {
        self.strip
            .first_child()
            .map(|slide| slide.width() as f64)
            .unwrap_or(0.0)
    }

    fn scroll_left(&self) -> f64 {
        self.scroller.hadjustment().value()
    }

    fn scroll_to(&self, offset: f64) {
        self.stop_scroll_animation();

        let adjustment = self.scroller.hadjustment();
        let max = (adjustment.upper() - adjustment.page_size()).max(adjustment.lower());
        let target = offset.clamp(adjustment.lower(), max);
        let start = adjustment.value();
        if (target - start).abs() < 0.5 {
            adjustment.set_value(target);
            return;
        }

        // Ease-out cubic over a fixed duration, one step per frame.
        let started = Instant::now();
        let slot = Rc::clone(&self.scroll_animation);
        let source = glib::timeout_add_local(Duration::from_millis(16), move || {
            let t = (started.elapsed().as_secs_f64() / SMOOTH_SCROLL_DURATION.as_secs_f64())
                .min(1.0);
            let eased = 1.0 - (1.0 - t).powi(3);
            adjustment.set_value(start + (target - start) * eased);
            if t >= 1.0 {
                slot.borrow_mut().take();
                glib::ControlFlow::Break
            } else {
                glib::ControlFlow::Continue
            }
        });
        *self.scroll_animation.borrow_mut() = Some(source);
    }
}

/// Row of slide indicator dots.
#[derive(Clone)]
pub struct DotRow {
    container: GtkBox,
}

impl DotRow {
    pub fn new() -> Self {
        let container = GtkBox::new(Orientation::Horizontal, DOT_SPACING);
        container.set_widget_name("sliderDots");
        container.add_css_class("slider-dots");
        container.set_halign(Align::Center);
        Self { container }
    }

    pub fn widget(&self) -> &GtkBox {
        &self.container
    }
}

impl Default for DotRow {
    fn default() -> Self {
        Self::new()
    }
}

impl DotStrip for DotRow {
    fn clear(&self) {
        remove_children(&self.container);
    }

    fn append_dot(&self, label: &str, on_click: Box<dyn Fn()>) {
        let dot = Button::new();
        dot.add_css_class(DOT_CLASS);
        dot.set_tooltip_text(Some(label));
        dot.update_property(&[gtk4::accessible::Property::Label(label)]);
        dot.connect_clicked(move |_| on_click());
        self.container.append(&dot);
    }

    fn set_dot_active(&self, index: usize, active: bool) {
        if let Some(dot) = child_widgets(&self.container).get(index) {
            if active {
                dot.add_css_class(ACTIVE_CLASS);
            } else {
                dot.remove_css_class(ACTIVE_CLASS);
            }
        }
    }
}
