//! Shop filter and carousel handlers. These only change view state.

use super::{Reply, Rerender};
use crate::catalog::CategoryFilter;
use crate::state::AppState;

/// Switch the shop category filter.
pub fn select_category<S>(state: &mut AppState<S>, filter: CategoryFilter) -> Reply {
    let changed = state.set_filter(filter);
    Reply {
        rerender: Rerender {
            products: changed,
            ..Rerender::default()
        },
        ..Reply::default()
    }
}

/// Advance the carousel.
pub fn next_slide<S>(state: &mut AppState<S>) -> Reply {
    let before = state.carousel().current();
    let after = state.carousel_mut().next();
    carousel_reply(before != after)
}

/// Jump to a slide; out-of-range indexes are ignored.
pub fn go_to_slide<S>(state: &mut AppState<S>, index: usize) -> Reply {
    let changed = state.carousel_mut().go_to(index);
    carousel_reply(changed)
}

fn carousel_reply(changed: bool) -> Reply {
    Reply {
        rerender: Rerender {
            carousel: changed,
            ..Rerender::default()
        },
        ..Reply::default()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::config::StorefrontConfig;
    use crate::storage::MemoryStorage;

    fn state() -> AppState<MemoryStorage> {
        AppState::load(MemoryStorage::new(), &StorefrontConfig::default()).unwrap()
    }

    #[test]
    fn test_next_slide_wraps() {
        let mut state = state();
        for _ in 0..3 {
            assert!(next_slide(&mut state).rerender.carousel);
        }
        assert_eq!(state.carousel().current(), 0);
    }

    #[test]
    fn test_go_to_out_of_range_is_ignored() {
        let mut state = state();
        let reply = go_to_slide(&mut state, 7);

        assert!(!reply.rerender.any());
        assert_eq!(state.carousel().current(), 0);
    }

    #[test]
    fn test_select_category() {
        let mut state = state();
        let reply = select_category(&mut state, "table".parse().unwrap());

        assert!(reply.rerender.products);
        assert_eq!(state.filter().to_string(), "table");
    }
}
