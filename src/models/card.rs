use rand::Rng;

use super::brand::Brand;

pub const CARD_CLASS: &str = "brand-card";
pub const CARD_BACKGROUND_CLASS: &str = "brand-card__bg";
pub const CARD_OVERLAY_CLASS: &str = "brand-card__overlay";
pub const CARD_BADGE_CLASS: &str = "brand-card__badge";
pub const CARD_LOGO_CLASS: &str = "brand-card__logo";

/// Cosmetic card height variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SizeClass {
    Small,
    Medium,
    Large,
}

impl SizeClass {
    pub const ALL: [SizeClass; 3] = [SizeClass::Small, SizeClass::Medium, SizeClass::Large];

    /// Uniform draw, independent of any other card.
    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self::ALL[rng.random_range(0..Self::ALL.len())]
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Small => "small",
            Self::Medium => "medium",
            Self::Large => "large",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CardVariant {
    Desktop(SizeClass),
    Mobile,
}

impl CardVariant {
    pub fn modifier_class(self) -> String {
        match self {
            Self::Desktop(size) => format!("{CARD_CLASS}--{}", size.as_str()),
            Self::Mobile => format!("{CARD_CLASS}--mobile"),
        }
    }
}

/// Everything needed to materialize one brand card.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CardSpec {
    pub index: usize,
    pub background: String,
    pub background_alt: String,
    pub logo: String,
    pub logo_alt: String,
    pub badge: Option<String>,
    pub variant: CardVariant,
}

impl CardSpec {
    fn build(brand: &Brand, index: usize, variant: CardVariant) -> Self {
        Self {
            index,
            background: brand.background.clone(),
            background_alt: format!("{} background", brand.name),
            logo: brand.logo.clone(),
            logo_alt: format!("{} logo", brand.name),
            badge: brand.badge().map(str::to_string),
            variant,
        }
    }

    /// Desktop card with a freshly drawn size class.
    pub fn desktop<R: Rng + ?Sized>(brand: &Brand, index: usize, rng: &mut R) -> Self {
        Self::build(brand, index, CardVariant::Desktop(SizeClass::random(rng)))
    }

    pub fn mobile(brand: &Brand, index: usize) -> Self {
        Self::build(brand, index, CardVariant::Mobile)
    }

    #[cfg(test)]
    pub fn size_class(&self) -> Option<SizeClass> {
        match self.variant {
            CardVariant::Desktop(size) => Some(size),
            CardVariant::Mobile => None,
        }
    }

    pub fn css_classes(&self) -> [String; 2] {
        [CARD_CLASS.to_string(), self.variant.modifier_class()]
    }
}
