mod asset_loader;
mod card_widget;
pub mod showcase_view;
pub mod style;
pub mod window;

pub use window::ShowcaseWindow;
