// Main window for the brand showcase
// A scrolling "page" hosting the desktop grid and the mobile slider

use gtk4::prelude::*;
use gtk4::{
    glib, Align, Application, ApplicationWindow, Box as GtkBox, Label, Orientation, PolicyType,
    ScrolledWindow,
};
use std::cell::{Cell, RefCell};
use std::path::{Path, PathBuf};
use std::rc::{Rc, Weak};
use std::sync::mpsc;
use std::time::Duration;

use super::showcase_view::{AssetBase, DotRow, GridView, SliderTrack};
use crate::config::ShowcaseConfig;
use crate::models::{Catalog, CatalogError, DEFAULT_CATALOG_FILE};
use crate::showcase::mount::SHOWCASE_CLASS;
use crate::showcase::{GlibScheduler, PageMounts, Showcase};

const DEFAULT_WIDTH: i32 = 1200;
const DEFAULT_HEIGHT: i32 = 900;
const PAGE_SPACING: i32 = 48;
/// Delay before the first visibility check, so the page has been allocated.
const INITIAL_VISIBILITY_DELAY: Duration = Duration::from_millis(50);

type MountedShowcase = Showcase<SliderTrack, DotRow>;

/// Main window hosting one showcase instance
pub struct ShowcaseWindow {
    self_weak: RefCell<Weak<ShowcaseWindow>>,
    window: ApplicationWindow,
    page: ScrolledWindow,
    showcase: GtkBox,
    grid: GridView,
    mobile_section: GtkBox,
    track: SliderTrack,
    dots: DotRow,
    base_dir: AssetBase,
    config: ShowcaseConfig,
    scheduler: Rc<GlibScheduler>,
    mounted: RefCell<Option<MountedShowcase>>,
    load_generation: Cell<u64>,
    last_page_size: Cell<(i32, i32)>,
}

impl ShowcaseWindow {
    pub fn new(app: &Application, catalog_path: Option<&Path>) -> Rc<Self> {
        let config = ShowcaseConfig::default();
        let window = ApplicationWindow::builder()
            .application(app)
            .title("Brandwall")
            .default_width(DEFAULT_WIDTH)
            .default_height(DEFAULT_HEIGHT)
            .build();

        let content = GtkBox::new(Orientation::Vertical, PAGE_SPACING);

        let hero = GtkBox::new(Orientation::Vertical, 12);
        hero.add_css_class("page-hero");
        hero.set_valign(Align::Center);
        let title = Label::new(Some("Shop your favourite brands"));
        title.add_css_class("page-hero__title");
        let subtitle = Label::new(Some("Earn cashback every time you shop with our partners."));
        subtitle.add_css_class("page-hero__subtitle");
        hero.append(&title);
        hero.append(&subtitle);
        content.append(&hero);

        let showcase = GtkBox::new(Orientation::Vertical, 24);
        showcase.set_widget_name("brandShowcase");
        showcase.add_css_class(SHOWCASE_CLASS);
        let heading = Label::new(Some("Our brands"));
        heading.add_css_class("brand-showcase__title");
        heading.set_halign(Align::Start);
        showcase.append(&heading);

        let base_dir: AssetBase = Rc::new(RefCell::new(PathBuf::new()));
        let grid = GridView::new(Rc::clone(&base_dir));
        showcase.append(grid.widget());

        let mobile_section = GtkBox::new(Orientation::Vertical, 0);
        mobile_section.add_css_class("mobile-slider");
        let track = SliderTrack::new(Rc::clone(&base_dir), config.slide_gutter_px);
        let dots = DotRow::new();
        mobile_section.append(track.widget());
        mobile_section.append(dots.widget());
        showcase.append(&mobile_section);
        content.append(&showcase);

        let page = ScrolledWindow::builder()
            .hscrollbar_policy(PolicyType::Never)
            .vscrollbar_policy(PolicyType::Automatic)
            .child(&content)
            .build();
        window.set_child(Some(&page));

        let this = Rc::new(Self {
            self_weak: RefCell::new(Weak::new()),
            window,
            page,
            showcase,
            grid,
            mobile_section,
            track,
            dots,
            base_dir,
            config,
            scheduler: Rc::new(GlibScheduler::new()),
            mounted: RefCell::new(None),
            load_generation: Cell::new(0),
            last_page_size: Cell::new((0, 0)),
        });
        *this.self_weak.borrow_mut() = Rc::downgrade(&this);

        this.connect_signals();
        this.setup_resize_observer();
        this.apply_breakpoint(DEFAULT_WIDTH);

        let path = catalog_path
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_CATALOG_FILE));
        this.load_catalog(&path);
        this
    }

    pub fn present(&self) {
        self.window.present();
    }

    fn connect_signals(&self) {
        let weak_self = self.self_weak.borrow().clone();
        self.page.vadjustment().connect_value_changed(move |_| {
            if let Some(window) = weak_self.upgrade() {
                window.check_visibility();
            }
        });

        let weak_self = self.self_weak.borrow().clone();
        self.track.hadjustment().connect_value_changed(move |_| {
            if let Some(window) = weak_self.upgrade() {
                if let Some(showcase) = window.mounted.borrow().as_ref() {
                    showcase.on_track_scroll();
                }
            }
        });
    }

    /// Follows the page's allocated size, which also changes on maximize
    /// and fullscreen where `default-width` does not.
    fn setup_resize_observer(&self) {
        let weak_self = self.self_weak.borrow().clone();
        self.page.add_tick_callback(move |page, _clock| {
            let Some(window) = weak_self.upgrade() else {
                return glib::ControlFlow::Break;
            };
            let size = (page.width(), page.height());
            if size.0 > 0 && size != window.last_page_size.get() {
                window.last_page_size.set(size);
                window.apply_breakpoint(size.0);
                window.schedule_visibility_check(INITIAL_VISIBILITY_DELAY);
            }
            glib::ControlFlow::Continue
        });
    }

    /// Shows the grid on wide windows and the slider on narrow ones.
    fn apply_breakpoint(&self, width: i32) {
        let mobile = self.config.is_mobile_width(width);
        self.grid.widget().set_visible(!mobile);
        self.mobile_section.set_visible(mobile);
        tracing::debug!(width, mobile, "Applied layout breakpoint");
    }

    /// Visible fraction of the showcase wrapper inside the page viewport.
    fn showcase_visible_ratio(&self) -> f64 {
        if !self.showcase.is_mapped() {
            return 0.0;
        }
        let Some(bounds) = self.showcase.compute_bounds(&self.page) else {
            return 0.0;
        };
        let height = bounds.height() as f64;
        if height <= 0.0 {
            return 0.0;
        }
        let viewport_height = self.page.height() as f64;
        let top = (bounds.y() as f64).max(0.0);
        let bottom = ((bounds.y() + bounds.height()) as f64).min(viewport_height);
        ((bottom - top).max(0.0) / height).clamp(0.0, 1.0)
    }

    fn check_visibility(&self) {
        let ratio = self.showcase_visible_ratio();
        if let Some(showcase) = self.mounted.borrow().as_ref() {
            if showcase.on_visibility(ratio) {
                tracing::debug!(ratio, "Showcase scrolled into view");
            }
        }
    }

    fn schedule_visibility_check(&self, delay: Duration) {
        let weak_self = self.self_weak.borrow().clone();
        glib::timeout_add_local_once(delay, move || {
            if let Some(window) = weak_self.upgrade() {
                window.check_visibility();
            }
        });
    }

    /// Reads the catalog off the main thread, then mounts the showcase.
    pub fn load_catalog(&self, path: &Path) {
        let generation = self.load_generation.get().wrapping_add(1);
        self.load_generation.set(generation);

        let path_buf = path.to_path_buf();
        let (tx, rx) = mpsc::channel::<(u64, Result<Catalog, CatalogError>)>();
        std::thread::spawn(move || {
            let result = Catalog::load_blocking(&path_buf);
            let _ = tx.send((generation, result));
        });

        let weak_self = self.self_weak.borrow().clone();
        glib::timeout_add_local(Duration::from_millis(16), move || match rx.try_recv() {
            Ok((result_generation, result)) => {
                if let Some(window) = weak_self.upgrade() {
                    window.apply_catalog_result(result_generation, result);
                }
                glib::ControlFlow::Break
            }
            Err(mpsc::TryRecvError::Empty) => glib::ControlFlow::Continue,
            Err(mpsc::TryRecvError::Disconnected) => glib::ControlFlow::Break,
        });
    }

    fn apply_catalog_result(&self, result_generation: u64, result: Result<Catalog, CatalogError>) {
        if result_generation != self.load_generation.get() {
            return;
        }
        match result {
            Ok(catalog) => self.mount_catalog(catalog),
            Err(err) => {
                // Containers stay empty; there is no retry.
                tracing::error!(error = ?err, "Error loading brands");
            }
        }
    }

    fn mount_catalog(&self, catalog: Catalog) {
        if catalog.is_empty() {
            tracing::info!("Brand catalog is empty");
        }
        *self.base_dir.borrow_mut() = catalog.base_dir.clone();

        let page = PageMounts {
            showcase: true,
            grid: Some(self.grid.clone()),
            track: Some(self.track.clone()),
            dots: Some(self.dots.clone()),
        };
        let showcase = Showcase::mount(
            page,
            &catalog.brands,
            &self.config,
            self.scheduler.clone(),
            &mut rand::rng(),
        );

        // Dropping the previous instance cancels its pending animation steps.
        let previous = self.mounted.replace(Some(showcase));
        drop(previous);

        self.schedule_visibility_check(INITIAL_VISIBILITY_DELAY);
    }
}
