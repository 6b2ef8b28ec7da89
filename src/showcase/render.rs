use rand::Rng;
use tracing::debug;

use super::mount::{GridMount, SliderMount};
use crate::layout::{build_columns, build_slides, ShuffledOrder};

/// Renders the desktop columns and returns their handles.
///
/// `None` means the grid mount point is missing and nothing was touched.
pub fn render_grid<G: GridMount, R: Rng + ?Sized>(
    mount: Option<&G>,
    order: &ShuffledOrder,
    column_count: usize,
    rng: &mut R,
) -> Option<Vec<G::Column>> {
    let Some(mount) = mount else {
        debug!("Grid mount missing, skipping desktop render");
        return None;
    };
    mount.clear();
    let columns = build_columns(order, column_count, rng);
    Some(columns.iter().map(|column| mount.append_column(column)).collect())
}

/// Renders up to `max_slides` mobile slides and returns how many were rendered.
pub fn render_slider<S: SliderMount>(
    mount: Option<&S>,
    order: &ShuffledOrder,
    max_slides: usize,
) -> usize {
    let Some(mount) = mount else {
        debug!("Slider mount missing, skipping mobile render");
        return 0;
    };
    mount.clear();
    let slides = build_slides(order, max_slides);
    for card in &slides {
        mount.append_slide(card);
    }
    slides.len()
}
