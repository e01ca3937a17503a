//! Property-based invariant tests for the loop controller.
//!
//! 1. Navigating by whole cycles never changes the active index
//! 2. `current()` is always in range after arbitrary navigation
//! 3. `closest_index` is the label with minimum cyclic distance
//! 4. Label times lie in `[0, duration)`, centered or not
//! 5. Layout changes preserve progress
//! 6. Notifications never repeat an index back to back and end on the
//!    closest index

use std::cell::RefCell;
use std::rc::Rc;

use proptest::prelude::*;
use reel_carousel::{LoopConfig, LoopController, NavOptions, Strip};
use reel_core::geometry::cyclic_distance;

// ── Strategies ──────────────────────────────────────────────────────────

fn widths_strategy() -> impl Strategy<Value = Vec<f64>> {
    prop::collection::vec(20.0f64..200.0, 1..12)
}

fn strip(widths: Vec<f64>, gap: f64, container: f64) -> Strip {
    Strip::new(widths, gap, container)
}

fn paused(center: bool) -> LoopConfig {
    LoopConfig::default().with_paused(true).with_center(center)
}

fn build(s: Strip, config: LoopConfig) -> LoopController<Strip> {
    let items = s.items();
    LoopController::builder(s, items).config(config).build()
}

proptest! {
    #[test]
    fn whole_cycles_resolve_to_same_index(
        widths in widths_strategy(),
        start in 0usize..12,
        k in -4isize..5,
    ) {
        let len = widths.len();
        let start = start % len;
        let mut c = build(strip(widths, 8.0, 400.0), paused(false));
        c.to_index(start as isize, NavOptions::instant());
        c.to_index(start as isize + k * len as isize, NavOptions::instant());
        prop_assert_eq!(c.current(), start);
    }

    #[test]
    fn current_stays_in_range(
        widths in widths_strategy(),
        moves in prop::collection::vec(-30isize..30, 0..20),
    ) {
        let len = widths.len();
        let mut c = build(strip(widths, 0.0, 300.0), paused(false));
        for target in moves {
            c.to_index(target, NavOptions::instant());
            prop_assert!(c.current() < len);
        }
    }

    #[test]
    fn closest_index_minimizes_cyclic_distance(
        widths in widths_strategy(),
        center in any::<bool>(),
        progress in 0.0f64..1.0,
    ) {
        let mut c = build(strip(widths, 4.0, 320.0), paused(center));
        c.set_progress(progress);
        let index = c.closest_index(false);
        let d = c.duration();
        let best = cyclic_distance(c.times()[index], c.time(), d);
        for &t in c.times() {
            prop_assert!(best <= cyclic_distance(t, c.time(), d));
        }
    }

    #[test]
    fn label_times_within_cycle(
        widths in widths_strategy(),
        gap in 0.0f64..40.0,
        padding in 0.0f64..80.0,
        container in 100.0f64..1200.0,
        center in any::<bool>(),
    ) {
        let config = paused(center).with_padding_right(padding);
        let c = build(strip(widths, gap, container), config);
        let d = c.duration();
        prop_assert!(d > 0.0);
        for &t in c.times() {
            prop_assert!((0.0..d).contains(&t), "label {t} outside [0, {d})");
        }
    }

    #[test]
    fn layout_change_preserves_progress(
        widths in widths_strategy(),
        progress in 0.0f64..1.0,
        new_width in 20.0f64..200.0,
        container in 100.0f64..1200.0,
        center in any::<bool>(),
    ) {
        let mut c = build(strip(widths, 6.0, 500.0), paused(center));
        c.set_progress(progress);
        let before = c.progress();
        c.stage_mut().set_width(0, new_width);
        c.stage_mut().set_container_width(container);
        prop_assert!(c.on_layout_change());
        prop_assert!((c.progress() - before).abs() < 1e-9);
    }

    #[test]
    fn notifications_are_deduplicated(
        widths in widths_strategy(),
        steps in prop::collection::vec(0.0f64..1.0, 1..40),
    ) {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        let s = strip(widths, 0.0, 300.0);
        let items = s.items();
        let mut c = LoopController::builder(s, items)
            .config(paused(false))
            .on_active_change(move |_, i| sink.borrow_mut().push(i))
            .build();
        for p in steps {
            c.set_progress(p);
        }
        let seen = seen.borrow();
        prop_assert!(seen.windows(2).all(|w| w[0] != w[1]));
        prop_assert_eq!(seen.last().copied(), Some(c.closest_index(false)));
    }
}
