use crate::{Bounds, Duration, Error, Period, Sequence, Timestamp};
use chrono::{TimeZone, Utc};
use proptest::prelude::*;

/// All timestamps used by the strategies are on a small grid of minutes,
/// so that periods often share their start or end.
const GRID: i64 = 60;

fn minute(m: i64) -> Timestamp {
    Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap() + Duration::minutes(m)
}

fn bounds() -> impl Strategy<Value = Bounds> {
    prop_oneof![
        Just(Bounds::IncludeStartExcludeEnd),
        Just(Bounds::IncludeAll),
        Just(Bounds::ExcludeStartIncludeEnd),
        Just(Bounds::ExcludeAll),
    ]
}

fn period() -> impl Strategy<Value = Period> {
    (0..GRID - 20, 0..20_i64, bounds()).prop_map(|(start, len, bounds)| {
        Period::from_datepoints(minute(start), minute(start + len), bounds)
            .unwrap()
    })
}

/// `(x, x)` is the only period whose start endpoint comes after its end
/// endpoint.  It contains nothing, but its merge with a neighbour does.
fn is_inverted(p: &Period) -> bool {
    p.start() == p.end() && p.bounds() == Bounds::ExcludeAll
}

fn proper_period() -> impl Strategy<Value = Period> {
    period().prop_filter("inverted period", |p| !is_inverted(p))
}

fn sequence() -> impl Strategy<Value = Sequence> {
    prop::collection::vec(proper_period(), 0..8).prop_map(Sequence::from)
}

fn covered(seq: &Sequence, ts: &Timestamp) -> usize {
    seq.iter().filter(|p| p.contains(ts)).count()
}

proptest! {
    #[test]
    fn construction_fails_on_inverted_range(
        a in 0..GRID, b in 0..GRID, bounds in bounds()
    ) {
        let result = Period::from_datepoints(minute(a), minute(b), bounds);
        if a > b {
            prop_assert_eq!(
                result,
                Err(Error::InvalidRange { start: minute(a), end: minute(b) })
            );
        } else {
            prop_assert!(result.is_ok());
        }
    }

    #[test]
    fn contains_honors_bounds(p in period(), m in 0..GRID) {
        let ts = minute(m);
        let after_start = ts > p.start()
            || (ts == p.start() && p.bounds().is_start_included());
        let before_end = ts < p.end()
            || (ts == p.end() && p.bounds().is_end_included());
        prop_assert_eq!(p.contains(&ts), after_start && before_end);
    }

    #[test]
    fn overlap_and_abut_are_exclusive(a in period(), b in period()) {
        prop_assert!(!(a.overlaps(&b) && a.abuts(&b)));
        prop_assert_eq!(a.overlaps(&b), b.overlaps(&a));
        prop_assert_eq!(a.abuts(&b), b.abuts(&a));
    }

    #[test]
    fn intersect_contains_common_timestamps(a in period(), b in period()) {
        match a.intersect(&b) {
            Ok(i) => {
                for m in 0..GRID {
                    let ts = minute(m);
                    prop_assert_eq!(
                        i.contains(&ts),
                        a.contains(&ts) && b.contains(&ts)
                    );
                }
                prop_assert_eq!(b.intersect(&a), Ok(i));
            }
            Err(e) => prop_assert_eq!(e, Error::NotOverlapping),
        }
    }

    #[test]
    fn diff_is_symmetric(a in period(), b in period()) {
        prop_assume!(a.overlaps(&b));
        let left = a.diff(&b).unwrap();
        prop_assert_eq!(&left, &b.diff(&a).unwrap());
        prop_assert!(left.len() <= 2);

        for m in 0..GRID {
            let ts = minute(m);
            let in_diff = left.iter().any(|p| p.contains(&ts));
            prop_assert_eq!(in_diff, a.contains(&ts) != b.contains(&ts));
        }
    }

    #[test]
    fn gap_fills_the_merge(a in proper_period(), b in proper_period()) {
        prop_assume!(a.is_before_period(&b) && !a.abuts(&b));
        let gap = a.gap(&b).unwrap();
        prop_assert_eq!(gap.start(), a.end());
        prop_assert_eq!(gap.end(), b.start());
        prop_assert!(a.abuts(&gap));
        prop_assert!(gap.abuts(&b));
        prop_assert_eq!(a.merge(&[b]), a.merge(&[gap, b]));
        prop_assert_eq!(b.gap(&a), Ok(gap));
    }

    #[test]
    fn subtract_removes_covered_timestamps(a in period(), b in period()) {
        let rest = a.subtract(&b);
        for m in 0..GRID {
            let ts = minute(m);
            let in_rest = rest.iter().any(|p| p.contains(&ts));
            prop_assert_eq!(in_rest, a.contains(&ts) && !b.contains(&ts));
        }
    }

    #[test]
    fn bounded_with_same_bounds_is_noop(p in period()) {
        prop_assert_eq!(p.bounded_with(p.bounds()), p);
        prop_assert_eq!(p.merge(&[]), p);
        prop_assert_eq!(p.starting_on(p.start()), Ok(p));
    }

    #[test]
    fn sequence_subtract(s in sequence(), t in sequence()) {
        let rest = s.subtract(&t);
        for f in &rest {
            prop_assert!(!t.some(|q| q.overlaps(f)));
        }
        for m in 0..GRID {
            let ts = minute(m);
            prop_assert_eq!(
                covered(&rest, &ts) > 0,
                covered(&s, &ts) > 0 && covered(&t, &ts) == 0
            );
        }
    }

    #[test]
    fn unions_and_gaps_partition_the_length(s in sequence()) {
        let unions = s.unions();
        let gaps = s.gaps();
        for m in 0..GRID {
            let ts = minute(m);
            // Merging abutting periods may add the timestamp they both
            // exclude, never anything else.
            if covered(&s, &ts) > 0 {
                prop_assert_eq!(covered(&unions, &ts), 1);
            }
            prop_assert!(covered(&unions, &ts) <= 1);
            if covered(&gaps, &ts) > 0 {
                prop_assert_eq!(covered(&s, &ts), 0);
            }
            if let Some(length) = s.length() {
                prop_assert_eq!(
                    length.contains(&ts),
                    covered(&unions, &ts) > 0 || covered(&gaps, &ts) > 0
                );
            }
        }
        prop_assert_eq!(gaps.len() + 1, unions.len().max(1));
    }

    #[test]
    fn intersections_are_covered_twice(s in sequence()) {
        for i in &s.intersections() {
            prop_assert!(!i.is_empty());
            for m in 0..GRID {
                let ts = minute(m);
                if i.contains(&ts) {
                    prop_assert!(covered(&s, &ts) >= 2);
                }
            }
        }
    }
}
