//! Hero carousel view.

use crate::carousel::Carousel;

/// Slide indicator row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CarouselView {
    pub current: usize,
    /// One entry per slide, `true` for the visible one.
    pub indicators: Vec<bool>,
}

impl From<&Carousel> for CarouselView {
    fn from(carousel: &Carousel) -> Self {
        Self {
            current: carousel.current(),
            indicators: (0..carousel.slides())
                .map(|index| index == carousel.current())
                .collect(),
        }
    }
}

impl CarouselView {
    /// Indicator dots, e.g. `○●○`.
    #[must_use]
    pub fn dots(&self) -> String {
        self.indicators
            .iter()
            .map(|&active| if active { '●' } else { '○' })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_indicators_follow_current_slide() {
        let mut carousel = Carousel::default();
        carousel.next();

        let view = CarouselView::from(&carousel);

        assert_eq!(view.indicators, [false, true, false]);
        assert_eq!(view.dots(), "○●○");
    }
}
