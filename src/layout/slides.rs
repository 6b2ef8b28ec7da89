use crate::models::{Brand, CardSpec};

/// Maximum number of slides in the mobile slider.
pub const DEFAULT_MAX_SLIDES: usize = 8;

/// Mobile cards for the first `max_slides` brands, in order.
pub fn build_slides(brands: &[Brand], max_slides: usize) -> Vec<CardSpec> {
    brands
        .iter()
        .take(max_slides)
        .enumerate()
        .map(|(index, brand)| CardSpec::mobile(brand, index))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn brands(n: usize) -> Vec<Brand> {
        (0..n)
            .map(|i| Brand::new(&format!("brand-{i}"), &format!("{i}.png"), "bg.jpg"))
            .collect()
    }

    #[test]
    fn test_truncates_to_eight_in_order() {
        let input = brands(20);
        let slides = build_slides(&input, DEFAULT_MAX_SLIDES);
        assert_eq!(slides.len(), 8);
        for (slide, brand) in slides.iter().zip(&input) {
            assert_eq!(slide.logo, brand.logo);
        }
    }

    #[test]
    fn test_short_input_renders_all() {
        assert_eq!(build_slides(&brands(3), DEFAULT_MAX_SLIDES).len(), 3);
        assert!(build_slides(&[], DEFAULT_MAX_SLIDES).is_empty());
    }
}
