use std::rc::Rc;

use rand::Rng;
use tracing::info;

use super::animator::ColumnAnimator;
use super::mount::{DotStrip, GridMount, SlideTrack, SliderMount, StyleTarget};
use super::render::{render_grid, render_slider};
use super::scheduler::Scheduler;
use super::slider::SliderController;
use crate::config::ShowcaseConfig;
use crate::layout::ShuffledOrder;
use crate::models::Brand;

/// Mount points found on the host page. Any of them may be missing.
pub struct PageMounts<G, S, D> {
    /// Whether the showcase wrapper observed for visibility exists.
    pub showcase: bool,
    pub grid: Option<G>,
    pub track: Option<S>,
    pub dots: Option<D>,
}

/// A rendered showcase with its behaviour attached.
pub struct Showcase<S: SlideTrack, D: DotStrip> {
    #[cfg(test)]
    order: ShuffledOrder,
    animator: Option<ColumnAnimator>,
    slider: Option<Rc<SliderController<S, D>>>,
}

impl<S, D> Showcase<S, D>
where
    S: SliderMount + SlideTrack + 'static,
    D: DotStrip + 'static,
{
    /// Shuffles once, renders both layouts from that one order, then
    /// attaches the column animator and the slider controller.
    pub fn mount<G: GridMount, R: Rng + ?Sized>(
        page: PageMounts<G, S, D>,
        brands: &[Brand],
        config: &ShowcaseConfig,
        scheduler: Rc<dyn Scheduler>,
        rng: &mut R,
    ) -> Self {
        let order = ShuffledOrder::new(brands, rng);

        let columns = render_grid(page.grid.as_ref(), &order, config.column_count, rng)
            .unwrap_or_default()
            .into_iter()
            .map(|column| Rc::new(column) as Rc<dyn StyleTarget>)
            .collect();
        let slide_count = render_slider(page.track.as_ref(), &order, config.max_slides);

        let animator = ColumnAnimator::attach(page.showcase, columns, config.animation, scheduler);
        let slider = SliderController::attach(page.track, page.dots, config.slide_gutter_px);

        info!(
            brands = order.len(),
            slides = slide_count,
            animated = animator.is_some(),
            "Showcase mounted"
        );
        Self {
            #[cfg(test)]
            order,
            animator,
            slider,
        }
    }
}

impl<S: SlideTrack, D: DotStrip> Showcase<S, D> {
    #[cfg(test)]
    pub fn order(&self) -> &ShuffledOrder {
        &self.order
    }

    #[cfg(test)]
    pub fn animator(&self) -> Option<&ColumnAnimator> {
        self.animator.as_ref()
    }

    #[cfg(test)]
    pub fn slider(&self) -> Option<&Rc<SliderController<S, D>>> {
        self.slider.as_ref()
    }

    pub fn on_visibility(&self, ratio: f64) -> bool {
        self.animator
            .as_ref()
            .is_some_and(|animator| animator.on_visibility(ratio))
    }

    pub fn on_track_scroll(&self) -> Option<usize> {
        self.slider.as_ref().and_then(|slider| slider.on_scroll())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::showcase::mount::fakes::{FakeDots, FakeGrid, FakeTrack};
    use crate::showcase::scheduler::ManualScheduler;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn brands(n: usize) -> Vec<Brand> {
        (0..n)
            .map(|i| Brand::new(&format!("b{i}"), &format!("{i}.png"), "bg.jpg"))
            .collect()
    }

    #[test]
    fn test_both_layouts_share_one_order() {
        let grid = FakeGrid::default();
        let track = FakeTrack::new(280.0);
        let page = PageMounts {
            showcase: true,
            grid: Some(&grid),
            track: Some(track.clone()),
            dots: Some(FakeDots::default()),
        };
        let scheduler = Rc::new(ManualScheduler::new());
        let mut rng = StdRng::seed_from_u64(11);
        let config = ShowcaseConfig::default();
        let showcase = Showcase::mount(page, &brands(20), &config, scheduler, &mut rng);

        let order: Vec<String> = showcase.order().iter().map(|b| b.logo.clone()).collect();
        let slides: Vec<String> = track
            .slides
            .borrow()
            .iter()
            .map(|c| c.logo.clone())
            .collect();
        assert_eq!(slides, order[..8].to_vec());

        for (column_index, column) in grid.columns.borrow().iter().enumerate() {
            let expected: Vec<String> = order
                .iter()
                .enumerate()
                .filter(|(i, _)| i % 4 == column_index)
                .map(|(_, logo)| logo.clone())
                .collect();
            let logos: Vec<String> = column.cards.iter().map(|c| c.logo.clone()).collect();
            assert_eq!(logos, expected);
        }

        assert!(showcase.animator().is_some());
        assert_eq!(showcase.slider().unwrap().slide_count(), 8);
    }

    #[test]
    fn test_missing_grid_leaves_slider_working() {
        let track = FakeTrack::new(280.0);
        let dots = FakeDots::default();
        let page: PageMounts<&FakeGrid, _, _> = PageMounts {
            showcase: true,
            grid: None,
            track: Some(track.clone()),
            dots: Some(dots.clone()),
        };
        let scheduler = Rc::new(ManualScheduler::new());
        let config = ShowcaseConfig::default();
        let showcase = Showcase::mount(
            page,
            &brands(3),
            &config,
            scheduler,
            &mut rand::rng(),
        );

        assert!(showcase.animator().is_none());
        assert!(!showcase.on_visibility(1.0));
        assert_eq!(dots.labels().len(), 3);
    }

    #[test]
    fn test_empty_catalog_renders_empty_containers() {
        let grid = FakeGrid::default();
        let track = FakeTrack::new(280.0);
        let dots = FakeDots::default();
        let page = PageMounts {
            showcase: true,
            grid: Some(&grid),
            track: Some(track.clone()),
            dots: Some(dots.clone()),
        };
        let scheduler = Rc::new(ManualScheduler::new());
        let config = ShowcaseConfig::default();
        let showcase = Showcase::mount(
            page,
            &[],
            &config,
            scheduler.clone(),
            &mut rand::rng(),
        );

        assert!(grid.columns.borrow().iter().all(|c| c.cards.is_empty()));
        assert!(track.slides.borrow().is_empty());
        assert!(dots.labels().is_empty());
        assert_eq!(showcase.on_track_scroll(), None);
        // Four empty columns still animate.
        assert!(showcase.on_visibility(1.0));
        assert_eq!(scheduler.pending(), 5);
    }

    #[test]
    fn test_drop_cancels_animation() {
        let grid = FakeGrid::default();
        let page: PageMounts<_, FakeTrack, FakeDots> = PageMounts {
            showcase: true,
            grid: Some(&grid),
            track: None,
            dots: None,
        };
        let scheduler = Rc::new(ManualScheduler::new());
        let config = ShowcaseConfig::default();
        let mut rng = rand::rng();
        let showcase = Showcase::mount(
            page,
            &brands(8),
            &config,
            scheduler.clone(),
            &mut rng,
        );
        assert!(showcase.on_visibility(0.3));
        drop(showcase);
        assert_eq!(scheduler.pending(), 0);
    }
}
