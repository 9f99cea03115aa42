//! Property tests for grid generation
//!
//! Run with: cargo test --package gantt-calendar --test grid_properties

use chrono::{Datelike, Days, NaiveDate, Weekday};
use gantt_calendar::{CalendarGrid, SlotUnit, ViewMode};
use proptest::prelude::*;

fn any_date() -> impl Strategy<Value = NaiveDate> {
    (0u64..40_000).prop_map(|offset| {
        NaiveDate::from_ymd_opt(1990, 1, 1)
            .unwrap()
            .checked_add_days(Days::new(offset))
            .unwrap()
    })
}

fn any_mode() -> impl Strategy<Value = ViewMode> {
    prop_oneof![
        Just(ViewMode::day()),
        Just(ViewMode::week()),
        Just(ViewMode::month()),
        Just(ViewMode::quarter()),
        (1u32..60, 1u32..40).prop_map(|(size, count)| ViewMode::new(size, count, "custom").unwrap()),
    ]
}

proptest! {
    #[test]
    fn prop_slot_count_matches_mode(start in any_date(), mode in any_mode()) {
        let grid = CalendarGrid::generate(start, &mode, start).unwrap();
        prop_assert_eq!(grid.len(), mode.slot_count() as usize);
        prop_assert_eq!(grid.range_end(), grid.slots().last().unwrap().end);
    }

    #[test]
    fn prop_slots_are_contiguous(start in any_date(), mode in any_mode()) {
        let grid = CalendarGrid::generate(start, &mode, start).unwrap();

        for slot in grid.slots() {
            prop_assert!(slot.end >= slot.start);
        }
        for pair in grid.slots().windows(2) {
            let next_day = pair[0].end.succ_opt().unwrap();
            prop_assert_eq!(pair[1].start, next_day);
        }
    }

    #[test]
    fn prop_fixed_slots_have_fixed_length(start in any_date(), mode in any_mode()) {
        let grid = CalendarGrid::generate(start, &mode, start).unwrap();
        if let SlotUnit::Days(size) = mode.unit() {
            prop_assert_eq!(grid.range_start().weekday(), Weekday::Mon);
            for slot in grid.slots() {
                prop_assert_eq!(slot.days(), i64::from(size));
            }
        } else {
            prop_assert_eq!(grid.range_start().day(), 1);
        }
    }

    #[test]
    fn prop_today_flags_exactly_one_slot(
        start in any_date(),
        mode in any_mode(),
        pick in 0u64..10_000,
    ) {
        let window = CalendarGrid::generate(start, &mode, start).unwrap();
        let span = u64::try_from(window.date_range().days()).unwrap();
        let today = window.range_start().checked_add_days(Days::new(pick % span)).unwrap();

        let grid = CalendarGrid::generate(start, &mode, today).unwrap();
        let flagged: Vec<_> = grid.slots().iter().filter(|s| s.is_today).collect();

        prop_assert_eq!(flagged.len(), 1);
        prop_assert!(flagged[0].contains(today));
    }

    #[test]
    fn prop_groups_cover_every_slot(start in any_date(), mode in any_mode()) {
        let grid = CalendarGrid::generate(start, &mode, start).unwrap();

        let counted: u32 = grid.groups().iter().map(|g| g.slot_count).sum();
        prop_assert_eq!(counted, mode.slot_count());

        let width: f64 = grid.groups().iter().map(|g| g.width_pct).sum();
        prop_assert!((width - 1.0).abs() < 1e-9);

        for pair in grid.groups().windows(2) {
            prop_assert!(pair[0].key < pair[1].key);
        }
    }
}
