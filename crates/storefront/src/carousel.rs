//! Hero carousel position.
//!
//! Only the slide index is modelled. Auto-advance is the embedder's job:
//! call [`Carousel::next`] on whatever timer it runs.

/// Number of hero slides by default.
pub const DEFAULT_SLIDE_COUNT: usize = 3;

/// Current slide over a fixed number of slides.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Carousel {
    current: usize,
    slides: usize,
}

impl Carousel {
    /// A carousel showing the first of `slides` slides.
    ///
    /// A count of zero is treated as one.
    #[must_use]
    pub const fn new(slides: usize) -> Self {
        Self {
            current: 0,
            slides: if slides == 0 { 1 } else { slides },
        }
    }

    /// Index of the visible slide.
    #[must_use]
    pub const fn current(&self) -> usize {
        self.current
    }

    /// Total number of slides.
    #[must_use]
    pub const fn slides(&self) -> usize {
        self.slides
    }

    /// Advance one slide, wrapping to the first after the last.
    pub const fn next(&mut self) -> usize {
        self.current = (self.current + 1) % self.slides;
        self.current
    }

    /// Jump to `index`. Out-of-range indexes are ignored.
    ///
    /// Returns whether the visible slide changed.
    pub const fn go_to(&mut self, index: usize) -> bool {
        if index >= self.slides || index == self.current {
            return false;
        }
        self.current = index;
        true
    }
}

impl Default for Carousel {
    fn default() -> Self {
        Self::new(DEFAULT_SLIDE_COUNT)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_next_wraps() {
        let mut carousel = Carousel::default();
        assert_eq!(carousel.next(), 1);
        assert_eq!(carousel.next(), 2);
        assert_eq!(carousel.next(), 0);
    }

    #[test]
    fn test_go_to_ignores_out_of_range() {
        let mut carousel = Carousel::default();
        assert!(carousel.go_to(2));
        assert!(!carousel.go_to(3));
        assert_eq!(carousel.current(), 2);
    }

    #[test]
    fn test_go_to_current_is_unchanged() {
        let mut carousel = Carousel::default();
        assert!(!carousel.go_to(0));
    }

    #[test]
    fn test_zero_slides_is_single_slide() {
        let mut carousel = Carousel::new(0);
        assert_eq!(carousel.slides(), 1);
        assert_eq!(carousel.next(), 0);
    }
}
