// Brand card widget: background, shading overlay, optional cashback badge, centred logo

use gtk4::prelude::*;
use gtk4::{Align, Box as GtkBox, ContentFit, Label, Orientation, Overflow, Overlay, Picture};
use std::path::Path;

use super::asset_loader::load_into;
use crate::models::{
    AssetSource, CardSpec, CARD_BACKGROUND_CLASS, CARD_BADGE_CLASS, CARD_LOGO_CLASS,
    CARD_OVERLAY_CLASS,
};

fn card_picture(
    reference: &str,
    alt: &str,
    class: &str,
    fit: ContentFit,
    base_dir: &Path,
) -> Picture {
    let picture = Picture::new();
    picture.add_css_class(class);
    picture.set_content_fit(fit);
    picture.set_can_shrink(true);
    picture.set_alternative_text(Some(alt));
    load_into(&picture, &AssetSource::resolve(base_dir, reference));
    picture
}

/// Materializes `card`, resolving image references against `base_dir`.
pub fn build_card(card: &CardSpec, base_dir: &Path) -> Overlay {
    let overlay = Overlay::new();
    for class in card.css_classes() {
        overlay.add_css_class(&class);
    }
    overlay.set_overflow(Overflow::Hidden);
    overlay.set_widget_name(&format!("brand-card-{}", card.index));

    let background = card_picture(
        &card.background,
        &card.background_alt,
        CARD_BACKGROUND_CLASS,
        ContentFit::Cover,
        base_dir,
    );
    overlay.set_child(Some(&background));

    let shade = GtkBox::new(Orientation::Vertical, 0);
    shade.add_css_class(CARD_OVERLAY_CLASS);
    shade.set_can_target(false);
    overlay.add_overlay(&shade);

    if let Some(badge) = &card.badge {
        let label = Label::new(Some(badge));
        label.add_css_class(CARD_BADGE_CLASS);
        label.set_halign(Align::Start);
        label.set_valign(Align::Start);
        overlay.add_overlay(&label);
    }

    let logo = card_picture(
        &card.logo,
        &card.logo_alt,
        CARD_LOGO_CLASS,
        ContentFit::Contain,
        base_dir,
    );
    logo.set_halign(Align::Center);
    logo.set_valign(Align::Center);
    overlay.add_overlay(&logo);

    overlay
}
