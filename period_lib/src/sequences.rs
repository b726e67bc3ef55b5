use crate::errors::{Error, Result};
use crate::periods::Period;
use crate::times::{self, Duration};
use itertools::Itertools;

/// An ordered list of periods.
/// Periods may overlap, and the same period may appear several times.
/// Offsets can be negative, in which case they count from the end (-1 is
/// the last period).
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Sequence {
    periods: Vec<Period>,
}

impl Sequence {
    pub fn new() -> Self {
        Sequence::default()
    }

    pub fn len(&self) -> usize {
        self.periods.len()
    }

    pub fn is_empty(&self) -> bool {
        self.periods.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Period> {
        self.periods.iter()
    }

    pub fn as_slice(&self) -> &[Period] {
        &self.periods
    }

    pub fn to_vec(&self) -> Vec<Period> {
        self.periods.clone()
    }

    /// Convert a possibly negative offset to a position in the list
    fn position(&self, offset: isize) -> Result<usize> {
        let len = self.periods.len();
        let pos = if offset < 0 {
            len.checked_sub(offset.unsigned_abs())
        } else {
            usize::try_from(offset).ok().filter(|p| *p < len)
        };
        pos.ok_or(Error::IndexOutOfRange { index: offset, len })
    }

    pub fn get(&self, offset: isize) -> Result<&Period> {
        let pos = self.position(offset)?;
        self.periods.get(pos).ok_or(Error::IndexOutOfRange {
            index: offset,
            len: self.periods.len(),
        })
    }

    /// Replace the period at the given offset
    pub fn set(&mut self, offset: isize, period: Period) -> Result<()> {
        let pos = self.position(offset)?;
        if let Some(p) = self.periods.get_mut(pos) {
            *p = period;
        }
        Ok(())
    }

    /// Remove the period at the given offset, and return it
    pub fn remove(&mut self, offset: isize) -> Result<Period> {
        let pos = self.position(offset)?;
        Ok(self.periods.remove(pos))
    }

    /// Insert a period so that it ends up at the given offset.  The offset
    /// can be the length of the sequence, to append at the end.
    pub fn insert(&mut self, offset: isize, period: Period) -> Result<()> {
        let len = self.periods.len();
        match usize::try_from(offset) {
            Ok(pos) if pos <= len => {
                self.periods.insert(pos, period);
                Ok(())
            }
            Ok(_) | Err(_) => Err(Error::IndexOutOfRange { index: offset, len }),
        }
    }

    /// Add a period at the end
    pub fn push(&mut self, period: Period) {
        self.periods.push(period);
    }

    /// Remove the last period
    pub fn pop(&mut self) -> Option<Period> {
        self.periods.pop()
    }

    /// Add a period at the beginning
    pub fn unshift(&mut self, period: Period) {
        self.periods.insert(0, period);
    }

    /// Remove the first period
    pub fn shift(&mut self) -> Option<Period> {
        if self.periods.is_empty() {
            None
        } else {
            Some(self.periods.remove(0))
        }
    }

    pub fn clear(&mut self) {
        self.periods.clear();
    }

    /// At most `length` periods (or all remaining ones if None), starting at
    /// `offset`.  Offsets outside of the sequence are clamped.
    pub fn slice(&self, offset: isize, length: Option<usize>) -> Sequence {
        let len = self.periods.len();
        let start = if offset < 0 {
            len.saturating_sub(offset.unsigned_abs())
        } else {
            usize::try_from(offset).map_or(len, |o| o.min(len))
        };
        self.periods
            .iter()
            .skip(start)
            .take(length.unwrap_or(len))
            .copied()
            .collect()
    }

    /// Whether the sequence contains a period equal to `period`
    pub fn contains(&self, period: &Period) -> bool {
        self.periods.contains(period)
    }

    /// The offset of the first period equal to `period`
    pub fn index_of(&self, period: &Period) -> Option<usize> {
        self.periods.iter().position(|p| p == period)
    }

    /// Sort in place.  The sort is stable.
    pub fn sort_by<F>(&mut self, compare: F)
    where
        F: FnMut(&Period, &Period) -> std::cmp::Ordering,
    {
        self.periods.sort_by(compare);
    }

    /// A sorted copy of the sequence
    pub fn sorted_by<F>(&self, compare: F) -> Sequence
    where
        F: FnMut(&Period, &Period) -> std::cmp::Ordering,
    {
        let mut result = self.clone();
        result.sort_by(compare);
        result
    }

    /// Sort in place, by start date.  When two periods start on the same
    /// date, the one that includes it comes first.
    pub fn sort_by_start(&mut self) {
        self.periods.sort_by_key(Period::lower);
    }

    pub fn sorted_by_start(&self) -> Sequence {
        let mut result = self.clone();
        result.sort_by_start();
        result
    }

    pub fn filter<F>(&self, mut predicate: F) -> Sequence
    where
        F: FnMut(&Period) -> bool,
    {
        self.periods.iter().filter(|p| predicate(p)).copied().collect()
    }

    pub fn map<F>(&self, f: F) -> Sequence
    where
        F: FnMut(&Period) -> Period,
    {
        self.periods.iter().map(f).collect()
    }

    /// Whether at least one period matches the predicate
    pub fn some<F>(&self, predicate: F) -> bool
    where
        F: FnMut(&Period) -> bool,
    {
        self.periods.iter().any(predicate)
    }

    /// Whether the sequence is not empty, and all its periods match the
    /// predicate.
    pub fn every<F>(&self, predicate: F) -> bool
    where
        F: FnMut(&Period) -> bool,
    {
        !self.periods.is_empty() && self.periods.iter().all(predicate)
    }

    /// The smallest period that contains all periods of the sequence, or
    /// None if the sequence is empty.
    pub fn length(&self) -> Option<Period> {
        let (first, rest) = self.periods.split_first()?;
        Some(first.merge(rest))
    }

    /// The sum of the durations of all periods.  Timestamps covered by
    /// several periods are counted several times.
    pub fn total_duration(&self) -> Duration {
        self.periods
            .iter()
            .fold(Duration::zero(), |acc, p| acc + p.duration_as_interval())
    }

    pub fn total_duration_as_seconds(&self) -> f64 {
        times::as_seconds(&self.total_duration())
    }

    /// The periods of time not covered by any period of the sequence, between
    /// the start of the earliest and the end of the latest.
    /// ```text
    ///     [-----)      [---)
    ///        [---)        [------)
    ///            [-----)              gaps
    /// ```
    pub fn gaps(&self) -> Sequence {
        let sorted = self.sorted_by_start();
        let mut iter = sorted.periods.into_iter();
        let Some(first) = iter.next() else {
            return Sequence::new();
        };
        let (gaps, _) =
            iter.fold((Sequence::new(), first), |(mut gaps, current), next| {
                if let Ok(gap) = current.gap(&next) {
                    log::trace!("gap between {current} and {next}: {gap}");
                    gaps.push(gap);
                }
                (gaps, Self::furthest(current, next))
            });
        log::debug!(
            "{} gaps in a sequence of {} periods",
            gaps.len(),
            self.len()
        );
        gaps
    }

    /// The periods of time covered by at least two periods of the sequence.
    /// The same intersection is never returned twice in a row, even when the
    /// sequence contains duplicate periods.
    pub fn intersections(&self) -> Sequence {
        let sorted = self.sorted_by_start();
        let mut iter = sorted.periods.into_iter();
        let Some(first) = iter.next() else {
            return Sequence::new();
        };
        let (result, _) = iter.fold(
            (Sequence::new(), first),
            |(mut result, current), next| {
                if let Ok(common) = current.intersect(&next) {
                    if result.periods.last() != Some(&common) {
                        log::trace!("{current} and {next} share {common}");
                        result.push(common);
                    }
                }
                (result, Self::furthest(current, next))
            },
        );
        log::debug!(
            "{} intersections in a sequence of {} periods",
            result.len(),
            self.len()
        );
        result
    }

    /// During a sweep over periods sorted by start, keep the period that
    /// ends last: a period nested in the current one must not hide a later
    /// gap or intersection.
    fn furthest(current: Period, next: Period) -> Period {
        if current.contains_period(&next) {
            current
        } else {
            next
        }
    }

    /// Merge all periods that overlap or abut, and return them sorted by
    /// start.  The result is equal to self if self was already sorted and
    /// nothing needed merging.
    pub fn unions(&self) -> Sequence {
        let sorted = self.sorted_by_start();
        let result = sorted.periods.into_iter().fold(
            Sequence::new(),
            |mut result, period| {
                match result.periods.last_mut() {
                    Some(last)
                        if last.touches(&period) =>
                    {
                        *last = last.merge(&[period]);
                    }
                    Some(_) | None => result.push(period),
                }
                result
            },
        );
        log::debug!("{} periods merged into {}", self.len(), result.len());
        result
    }

    /// Remove from each period of self all the timestamps covered by other.
    /// A period entirely covered by other disappears, a period that covers
    /// some of other's periods might be split.
    pub fn subtract(&self, other: &Sequence) -> Sequence {
        if other.is_empty() {
            return self.clone();
        }
        other.iter().fold(self.clone(), |remaining, removed| {
            remaining.iter().flat_map(|p| p.subtract(removed)).collect()
        })
    }

    /// All periods, formatted and separated with `sep`
    pub fn join(&self, sep: &str) -> String {
        self.periods.iter().join(sep)
    }
}

impl From<Vec<Period>> for Sequence {
    fn from(periods: Vec<Period>) -> Self {
        Sequence { periods }
    }
}

impl FromIterator<Period> for Sequence {
    fn from_iter<I: IntoIterator<Item = Period>>(iter: I) -> Self {
        Sequence {
            periods: iter.into_iter().collect(),
        }
    }
}

impl Extend<Period> for Sequence {
    fn extend<I: IntoIterator<Item = Period>>(&mut self, iter: I) {
        self.periods.extend(iter);
    }
}

impl IntoIterator for Sequence {
    type Item = Period;
    type IntoIter = std::vec::IntoIter<Period>;

    fn into_iter(self) -> Self::IntoIter {
        self.periods.into_iter()
    }
}

impl<'a> IntoIterator for &'a Sequence {
    type Item = &'a Period;
    type IntoIter = std::slice::Iter<'a, Period>;

    fn into_iter(self) -> Self::IntoIter {
        self.periods.iter()
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::bounds::Bounds;
    use crate::periods::test::{bounded, day, period, ALL_BOUNDS};

    fn seq(periods: &[(&str, &str)]) -> Sequence {
        periods.iter().map(|(s, e)| period(s, e)).collect()
    }

    #[test]
    fn test_collection() {
        let mut s = Sequence::new();
        assert!(s.is_empty());
        assert_eq!(
            s.get(0),
            Err(Error::IndexOutOfRange { index: 0, len: 0 })
        );
        assert_eq!(s.shift(), None);

        let a = period("2021-01-01", "2021-01-02");
        let b = period("2021-02-01", "2021-02-02");
        let c = period("2021-03-01", "2021-03-02");
        s.push(b);
        s.unshift(a);
        s.insert(2, c).unwrap();
        assert_eq!(s.to_vec(), vec![a, b, c]);
        assert_eq!(s.get(0), Ok(&a));
        assert_eq!(s.get(-1), Ok(&c));
        assert_eq!(s.get(-3), Ok(&a));
        assert_eq!(
            s.get(-4),
            Err(Error::IndexOutOfRange { index: -4, len: 3 })
        );
        assert_eq!(
            s.get(3),
            Err(Error::IndexOutOfRange { index: 3, len: 3 })
        );
        assert_eq!(
            s.insert(4, a),
            Err(Error::IndexOutOfRange { index: 4, len: 3 })
        );
        assert!(s.insert(-1, a).is_err());

        assert_eq!(s.index_of(&b), Some(1));
        assert!(s.contains(&c));
        s.set(-2, c).unwrap();
        assert_eq!(s.index_of(&b), None);
        assert!(s.set(5, c).is_err());

        assert_eq!(s.remove(-1), Ok(c));
        assert_eq!(s.to_vec(), vec![a, c]);
        assert!(s.remove(2).is_err());
        assert_eq!(s.shift(), Some(a));
        assert_eq!(s.pop(), Some(c));
        assert_eq!(s.pop(), None);

        s.extend([a, b]);
        assert_eq!(s.len(), 2);
        s.clear();
        assert!(s.is_empty());
    }

    #[test]
    fn test_slice() {
        let s = seq(&[
            ("2021-01-01", "2021-01-02"),
            ("2021-02-01", "2021-02-02"),
            ("2021-03-01", "2021-03-02"),
        ]);
        assert_eq!(s.slice(1, None).len(), 2);
        assert_eq!(
            s.slice(-1, None).to_vec(),
            vec![period("2021-03-01", "2021-03-02")]
        );
        assert_eq!(
            s.slice(0, Some(2)).to_vec(),
            vec![
                period("2021-01-01", "2021-01-02"),
                period("2021-02-01", "2021-02-02"),
            ]
        );
        assert!(s.slice(5, None).is_empty());
        assert_eq!(s.slice(-10, Some(1)).len(), 1);
    }

    #[test]
    fn test_functional() {
        let s = seq(&[
            ("2021-03-01", "2021-03-10"),
            ("2021-01-01", "2021-01-02"),
            ("2021-02-01", "2021-02-05"),
        ]);
        let sorted = s.sorted_by(|a, b| a.start().cmp(&b.start()));
        assert_eq!(sorted.get(0).map(|p| p.start()), Ok(day("2021-01-01")));
        assert_eq!(sorted.get(-1).map(|p| p.start()), Ok(day("2021-03-01")));
        assert_eq!(sorted, s.sorted_by_start());

        let long = s.filter(|p| p.duration_as_interval() > Duration::days(2));
        assert_eq!(long.len(), 2);

        let moved = s.map(|p| p.move_by(Duration::days(1)).unwrap());
        assert_eq!(moved.get(1), Ok(&period("2021-01-02", "2021-01-03")));

        assert!(s.some(|p| p.contains(&day("2021-01-01"))));
        assert!(!s.some(|p| p.contains(&day("2021-01-03"))));
        assert!(s.every(|p| p.bounds() == Bounds::IncludeStartExcludeEnd));
        assert!(!Sequence::new().every(|_| true));

        assert_eq!(s.total_duration(), Duration::days(14));
        assert_eq!(s.total_duration_as_seconds(), 14.0 * 86_400.0);
    }

    #[test]
    fn test_sort_by_start() {
        let open = bounded("2021-01-01", "2021-01-05", Bounds::ExcludeAll);
        let closed = bounded("2021-01-01", "2021-01-03", Bounds::IncludeAll);
        let later = period("2021-01-02", "2021-01-03");
        let s: Sequence = vec![later, open, closed].into();
        assert_eq!(s.sorted_by_start().to_vec(), vec![closed, open, later]);
    }

    #[test]
    fn test_length() {
        assert_eq!(Sequence::new().length(), None);
        let s: Sequence = vec![
            period("2021-03-01", "2021-03-10"),
            bounded("2021-01-01", "2021-01-02", Bounds::ExcludeAll),
            bounded("2021-02-01", "2021-03-10", Bounds::IncludeAll),
        ]
        .into();
        assert_eq!(
            s.length(),
            Some(bounded(
                "2021-01-01",
                "2021-03-10",
                Bounds::ExcludeStartIncludeEnd
            ))
        );
    }

    #[test]
    fn test_gaps() {
        assert!(Sequence::new().gaps().is_empty());
        assert!(seq(&[("2021-01-01", "2021-01-10")]).gaps().is_empty());

        let s = seq(&[
            ("2021-01-20", "2021-01-30"),
            ("2021-01-01", "2021-01-10"),
            ("2021-01-10", "2021-01-15"),
        ]);
        assert_eq!(s.gaps().to_vec(), vec![period("2021-01-15", "2021-01-20")]);

        // A nested period must not hide the gap after the outer one
        let s = seq(&[
            ("2021-01-01", "2021-01-20"),
            ("2021-01-05", "2021-01-10"),
            ("2021-01-25", "2021-01-30"),
        ]);
        assert_eq!(s.gaps().to_vec(), vec![period("2021-01-20", "2021-01-25")]);

        // Periods that abut on a timestamp excluded from both leave no gap
        let s: Sequence = vec![
            period("2021-01-01", "2021-01-10"),
            bounded("2021-01-10", "2021-01-20", Bounds::ExcludeAll),
        ]
        .into();
        assert!(s.gaps().is_empty());

        // An empty period nested in another one is not a gap
        let s = seq(&[
            ("2021-01-01", "2021-01-10"),
            ("2021-01-05", "2021-01-05"),
        ]);
        assert!(s.gaps().is_empty());
    }

    #[test]
    fn test_intersections() {
        assert!(Sequence::new().intersections().is_empty());

        let s = seq(&[
            ("2018-01-01", "2018-01-31"),
            ("2018-01-10", "2018-01-15"),
            ("2018-01-10", "2018-01-31"),
        ]);
        let i = s.intersections();
        assert_eq!(i.len(), 2);
        assert_eq!(
            i.to_vec(),
            vec![
                period("2018-01-10", "2018-01-15"),
                period("2018-01-10", "2018-01-31"),
            ]
        );

        // Duplicate periods do not produce duplicate intersections
        let s = seq(&[
            ("2021-01-01", "2021-01-20"),
            ("2021-01-05", "2021-01-10"),
            ("2021-01-05", "2021-01-10"),
        ]);
        assert_eq!(
            s.intersections().to_vec(),
            vec![period("2021-01-05", "2021-01-10")]
        );

        let s = seq(&[
            ("2021-01-01", "2021-01-10"),
            ("2021-01-10", "2021-01-20"),
        ]);
        assert!(s.intersections().is_empty());

        // Empty periods intersect nothing
        let s = seq(&[
            ("2021-01-01", "2021-01-10"),
            ("2021-01-05", "2021-01-05"),
        ]);
        assert!(s.intersections().is_empty());

        let s = seq(&[
            ("2021-01-01", "2021-01-10"),
            ("2021-01-05", "2021-01-20"),
            ("2021-01-15", "2021-01-25"),
        ]);
        assert_eq!(
            s.intersections().to_vec(),
            vec![
                period("2021-01-05", "2021-01-10"),
                period("2021-01-15", "2021-01-20"),
            ]
        );
    }

    #[test]
    fn test_unions() {
        assert!(Sequence::new().unions().is_empty());

        let s = seq(&[
            ("2021-01-20", "2021-01-30"),
            ("2021-01-01", "2021-01-10"),
            ("2021-01-05", "2021-01-07"),
            ("2021-01-10", "2021-01-15"),
        ]);
        assert_eq!(
            s.unions().to_vec(),
            vec![
                period("2021-01-01", "2021-01-15"),
                period("2021-01-20", "2021-01-30"),
            ]
        );

        // Nothing to merge, already sorted
        let s = seq(&[
            ("2021-01-01", "2021-01-10"),
            ("2021-01-20", "2021-01-30"),
        ]);
        assert_eq!(s.unions(), s);

        // Two periods that abut on an excluded timestamp are merged
        let s: Sequence = vec![
            period("2021-01-01", "2021-01-10"),
            bounded("2021-01-10", "2021-01-20", Bounds::ExcludeAll),
        ]
        .into();
        assert_eq!(
            s.unions().to_vec(),
            vec![period("2021-01-01", "2021-01-20")]
        );

        // An empty period is absorbed by the one around it
        let s = seq(&[
            ("2021-01-01", "2021-01-10"),
            ("2021-01-05", "2021-01-05"),
        ]);
        assert_eq!(s.unions().to_vec(), vec![period("2021-01-01", "2021-01-10")]);
    }

    #[test]
    fn test_subtract() {
        let s = seq(&[
            ("2021-01-01", "2021-01-10"),
            ("2021-01-20", "2021-01-30"),
        ]);
        assert_eq!(s.subtract(&Sequence::new()), s);
        assert!(Sequence::new().subtract(&s).is_empty());
        assert!(s.subtract(&s).is_empty());

        let removed = seq(&[
            ("2021-01-05", "2021-01-06"),
            ("2021-01-08", "2021-01-25"),
        ]);
        assert_eq!(
            s.subtract(&removed).to_vec(),
            vec![
                period("2021-01-01", "2021-01-05"),
                period("2021-01-06", "2021-01-08"),
                period("2021-01-25", "2021-01-30"),
            ]
        );

        // Covered by a combination of periods
        let removed = seq(&[
            ("2021-01-01", "2021-01-05"),
            ("2021-01-05", "2021-01-10"),
            ("2021-01-15", "2021-02-15"),
        ]);
        assert!(s.subtract(&removed).is_empty());
    }

    #[test]
    fn test_iter() {
        let s = seq(&[
            ("2021-01-01", "2021-01-10"),
            ("2021-01-20", "2021-01-30"),
        ]);
        assert_eq!((&s).into_iter().count(), 2);
        let starts: Vec<_> = s.clone().into_iter().map(|p| p.start()).collect();
        assert_eq!(starts, vec![day("2021-01-01"), day("2021-01-20")]);
        assert_eq!(
            s.join(" "),
            "[2021-01-01T00:00:00Z, 2021-01-10T00:00:00Z) \
             [2021-01-20T00:00:00Z, 2021-01-30T00:00:00Z)"
        );
        for bounds in ALL_BOUNDS {
            let b = s.map(|p| p.bounded_with(bounds));
            assert!(b.every(|p| p.bounds() == bounds));
        }
    }
}
