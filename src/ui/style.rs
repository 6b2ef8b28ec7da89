// Stylesheet for the showcase class contract
// Embedded defaults, optionally layered with a user stylesheet from the XDG config dir

use anyhow::{Context, Result};
use directories::ProjectDirs;
use gdk4::Display;
use gtk4::{CssProvider, STYLE_PROVIDER_PRIORITY_APPLICATION, STYLE_PROVIDER_PRIORITY_USER};
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};

const USER_STYLESHEET: &str = "style.css";

static CSS_INSTALLED: AtomicBool = AtomicBool::new(false);

const DEFAULT_CSS: &str = r#"
window {
    background-color: #0e0e13;
    color: #f2f2f5;
}

.page-hero {
    min-height: 420px;
    padding: 48px;
}

.page-hero__title {
    font-size: 32px;
    font-weight: bold;
}

.brand-showcase {
    padding: 48px 32px;
}

.brand-showcase__title {
    font-size: 24px;
    font-weight: bold;
    margin-bottom: 24px;
}

.brand-showcase__column {
    transition: transform 1200ms cubic-bezier(0.22, 1, 0.36, 1);
}

.brand-showcase__column.animate-up {
    transform: translateY(-64px);
}

.brand-showcase__column.animate-down {
    transform: translateY(0px);
}

.brand-card {
    border-radius: 16px;
    background-color: #1b1b23;
}

.brand-card--small {
    min-height: 180px;
}

.brand-card--medium {
    min-height: 240px;
}

.brand-card--large {
    min-height: 320px;
}

.brand-card--mobile {
    min-height: 360px;
}

.brand-card__overlay {
    background-color: rgba(0, 0, 0, 0.35);
}

.brand-card__badge {
    margin: 12px;
    padding: 4px 10px;
    border-radius: 9999px;
    background-color: #ffcc33;
    color: #111111;
    font-size: 12px;
    font-weight: bold;
}

.brand-card__logo {
    min-width: 96px;
    min-height: 48px;
    margin: 24px;
}

.mobile-slider__track {
    padding: 0 16px;
}

.mobile-slider__slide {
    min-width: 280px;
}

.slider-dots {
    margin-top: 16px;
}

.dot {
    min-width: 8px;
    min-height: 8px;
    padding: 0;
    border: none;
    border-radius: 9999px;
    background-color: rgba(255, 255, 255, 0.3);
    transition: min-width 200ms ease;
}

.dot.active {
    min-width: 24px;
    background-color: #ffffff;
}
"#;

/// Location of the optional user stylesheet.
pub fn user_stylesheet_path() -> Result<PathBuf> {
    let proj_dirs = ProjectDirs::from("", "", "brandwall")
        .context("Failed to determine project directories")?;
    Ok(proj_dirs.config_dir().join(USER_STYLESHEET))
}

/// True only for the first caller; providers are display-wide.
fn claim_install(flag: &AtomicBool) -> bool {
    !flag.swap(true, Ordering::AcqRel)
}

/// Installs the embedded stylesheet, then the user stylesheet if one exists.
///
/// Only the first call installs anything.
pub fn load_css() {
    if !claim_install(&CSS_INSTALLED) {
        tracing::debug!("Stylesheet already installed");
        return;
    }
    let Some(display) = Display::default() else {
        tracing::warn!("No default display, skipping stylesheet");
        return;
    };

    let provider = CssProvider::new();
    provider.load_from_string(DEFAULT_CSS);
    gtk4::style_context_add_provider_for_display(
        &display,
        &provider,
        STYLE_PROVIDER_PRIORITY_APPLICATION,
    );

    match user_stylesheet_path() {
        Ok(path) if path.exists() => {
            let user_provider = CssProvider::new();
            user_provider.load_from_path(&path);
            gtk4::style_context_add_provider_for_display(
                &display,
                &user_provider,
                STYLE_PROVIDER_PRIORITY_USER,
            );
            tracing::info!("Loaded user CSS from: {}", path.display());
        }
        Ok(_) => tracing::debug!("No user stylesheet, using embedded CSS"),
        Err(err) => tracing::debug!(error = ?err, "User stylesheet lookup failed"),
    }
}
