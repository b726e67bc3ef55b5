//! A period is a bounded interval of time.
//!
//! Given two overlapping periods A and B, we can compute the following:
//!
//! ```text
//!        [------ A ------)
//!               [----- B -------)
//!
//!        [----------------------)     A.merge(B)
//!        [------)                     A.subtract(B)
//!                        [------)     B.subtract(A)
//!        [------)        [------)     A.diff(B)
//!               [--------)            A.intersect(B)
//!                                     A.gap(B) fails
//! ```
//!
//! When the two periods do not overlap:
//! ```text
//!      [---A---)   [----B----)
//!
//!      [---------------------)    A.merge(B)
//!      [-------)                  A.subtract(B)
//!              [---)              A.gap(B)
//!                                 A.intersect(B) and A.diff(B) fail
//! ```

use crate::bounds::Bounds;
use crate::endpoints::Endpoint;
use crate::errors::{Error, Result};
use crate::times::{self, Duration, Timestamp};
use chrono::{Months, SecondsFormat};
use std::cmp::Ordering;

/// An immutable interval of time.  The start is never after the end.
/// Every operation returns a new period, equal to self when nothing changed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Period {
    start: Timestamp,
    end: Timestamp,
    bounds: Bounds,
}

impl Period {
    pub fn from_datepoints(
        start: Timestamp,
        end: Timestamp,
        bounds: Bounds,
    ) -> Result<Self> {
        if start > end {
            return Err(Error::InvalidRange { start, end });
        }
        Ok(Self { start, end, bounds })
    }

    /// A left-closed, right-open period (`[start, end)`)
    pub fn new(start: Timestamp, end: Timestamp) -> Result<Self> {
        Self::from_datepoints(start, end, Bounds::default())
    }

    /// The period that starts at `start` and lasts `duration`
    pub fn after(
        start: Timestamp,
        duration: Duration,
        bounds: Bounds,
    ) -> Result<Self> {
        Self::from_datepoints(start, times::add(&start, &duration)?, bounds)
    }

    /// The period that lasts `duration` and ends at `end`
    pub fn before(
        end: Timestamp,
        duration: Duration,
        bounds: Bounds,
    ) -> Result<Self> {
        Self::from_datepoints(times::sub(&end, &duration)?, end, bounds)
    }

    /// The period that extends `duration` on each side of `center`
    pub fn around(
        center: Timestamp,
        duration: Duration,
        bounds: Bounds,
    ) -> Result<Self> {
        Self::from_datepoints(
            times::sub(&center, &duration)?,
            times::add(&center, &duration)?,
            bounds,
        )
    }

    /// The whole day, starting at midnight UTC
    pub fn from_day(
        year: i32,
        month: u32,
        day: u32,
        bounds: Bounds,
    ) -> Result<Self> {
        Self::after(times::midnight(year, month, day)?, Duration::days(1), bounds)
    }

    /// The whole month, starting on the first day at midnight UTC
    pub fn from_month(year: i32, month: u32, bounds: Bounds) -> Result<Self> {
        let start = times::midnight(year, month, 1)?;
        let end = start
            .checked_add_months(Months::new(1))
            .ok_or(Error::TimestampOverflow)?;
        Self::from_datepoints(start, end, bounds)
    }

    /// The whole year, starting on January 1st at midnight UTC
    pub fn from_year(year: i32, bounds: Bounds) -> Result<Self> {
        let start = times::midnight(year, 1, 1)?;
        let end = start
            .checked_add_months(Months::new(12))
            .ok_or(Error::TimestampOverflow)?;
        Self::from_datepoints(start, end, bounds)
    }

    /// Build a period from two endpoints.  The caller guarantees that the
    /// lower endpoint's timestamp is not after the upper one's.
    pub(crate) fn from_endpoints(lower: Endpoint, upper: Endpoint) -> Self {
        debug_assert!(lower.point <= upper.point);
        Self {
            start: lower.point,
            end: upper.point,
            bounds: Bounds::from_inclusion(
                lower.includes_as_start(),
                upper.includes_as_end(),
            ),
        }
    }

    pub fn start(&self) -> Timestamp {
        self.start
    }

    pub fn end(&self) -> Timestamp {
        self.end
    }

    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    pub fn duration_as_interval(&self) -> Duration {
        self.end - self.start
    }

    pub fn duration_as_seconds(&self) -> f64 {
        times::as_seconds(&self.duration_as_interval())
    }

    pub(crate) fn lower(&self) -> Endpoint {
        Endpoint::start(self.start, self.bounds.is_start_included())
    }

    pub(crate) fn upper(&self) -> Endpoint {
        Endpoint::end(self.end, self.bounds.is_end_included())
    }

    /// Whether the timestamp is part of the period
    pub fn contains(&self, ts: &Timestamp) -> bool {
        self.lower().left_of(ts) && self.upper().right_of(ts)
    }

    /// Whether self contains all timestamps of the other period (and
    /// possibly more).
    pub fn contains_period(&self, other: &Period) -> bool {
        self.lower() <= other.lower() && other.upper() <= self.upper()
    }

    /// Whether the other period contains all timestamps of self
    pub fn is_during(&self, other: &Period) -> bool {
        other.contains_period(self)
    }

    /// Whether the period contains no timestamp at all, like `[a, a)`.
    /// Only `[a, a]` is a non-empty zero-length period.
    pub fn is_empty(&self) -> bool {
        self.lower() >= self.upper()
    }

    /// Whether the two periods have at least one timestamp in common.
    /// Two periods that only touch on an excluded timestamp do not overlap,
    /// and an empty period overlaps nothing.
    pub fn overlaps(&self, other: &Period) -> bool {
        !self.is_empty() && !other.is_empty() && self.spans_over(other)
    }

    /// Whether the two ranges of endpoints overlap, even when one of the
    /// periods is empty.
    fn spans_over(&self, other: &Period) -> bool {
        self.lower() < other.upper() && other.lower() < self.upper()
    }

    /// Whether the two periods are contiguous without overlapping: they
    /// share one timestamp, which is excluded from at least one of them.
    /// ```text
    ///    [-------)
    ///            [-------)     abuts
    ///            (-------)     abuts
    ///    [-------]
    ///            [-------)     overlaps
    /// ```
    pub fn abuts(&self, other: &Period) -> bool {
        self.meets_on_start(other) || self.meets_on_end(other)
    }

    /// Whether the end of self abuts the start of other
    pub fn meets_on_start(&self, other: &Period) -> bool {
        self.end == other.start
            && !(self.bounds.is_end_included()
                && other.bounds.is_start_included())
    }

    /// Whether the start of self abuts the end of other
    pub fn meets_on_end(&self, other: &Period) -> bool {
        other.meets_on_start(self)
    }

    /// Whether there is no timestamp strictly between the two periods, so
    /// that merging them does not cover anything new but shared dates.
    pub(crate) fn touches(&self, other: &Period) -> bool {
        self.spans_over(other) || self.abuts(other)
    }

    /// Same start, same end and same bounds.  Two periods that cover the
    /// same timestamps with different bounds are not equal.
    pub fn equals(&self, other: &Period) -> bool {
        self == other
    }

    /// Whether every timestamp in self is strictly before ts.  An excluded
    /// end equal to ts counts as before, since ts is not part of self.
    /// ```txt
    ///    [------)
    ///           X    => before
    /// ```
    pub fn is_before(&self, ts: &Timestamp) -> bool {
        self.upper().left_of(ts)
    }

    /// Whether every timestamp in self is strictly before every timestamp
    /// in other.  `[a, b)` is before `[b, c)`, while `[a, b]` is not.
    pub fn is_before_period(&self, other: &Period) -> bool {
        self.upper() <= other.lower()
    }

    /// Whether every timestamp in self is strictly after ts
    /// ```txt
    ///      (------]
    ///      X          => after
    /// ```
    pub fn is_after(&self, ts: &Timestamp) -> bool {
        self.lower().right_of(ts)
    }

    /// Whether every timestamp in self is strictly after every timestamp
    /// in other.
    pub fn is_after_period(&self, other: &Period) -> bool {
        other.is_before_period(self)
    }

    /// Whether ts is the start of self, and is included
    pub fn is_started_by(&self, ts: &Timestamp) -> bool {
        *ts == self.start && self.bounds.is_start_included()
    }

    /// Whether both periods start on the same timestamp, with the same
    /// inclusion.
    pub fn is_started_by_period(&self, other: &Period) -> bool {
        self.lower() == other.lower()
    }

    /// Whether ts is the end of self, and is included
    pub fn is_ended_by(&self, ts: &Timestamp) -> bool {
        *ts == self.end && self.bounds.is_end_included()
    }

    /// Whether both periods end on the same timestamp, with the same
    /// inclusion.
    pub fn is_ended_by_period(&self, other: &Period) -> bool {
        self.upper() == other.upper()
    }

    /// Compare the durations, regardless of when the periods occur
    pub fn duration_compare(&self, other: &Period) -> Ordering {
        self.duration_as_interval().cmp(&other.duration_as_interval())
    }

    pub fn duration_equals(&self, other: &Period) -> bool {
        self.duration_compare(other) == Ordering::Equal
    }

    pub fn duration_greater_than(&self, other: &Period) -> bool {
        self.duration_compare(other) == Ordering::Greater
    }

    pub fn duration_less_than(&self, other: &Period) -> bool {
        self.duration_compare(other) == Ordering::Less
    }

    /// The timestamps common to both periods.  Where both periods share a
    /// start (or an end), it is included only if both include it.
    pub fn intersect(&self, other: &Period) -> Result<Period> {
        if !self.overlaps(other) {
            return Err(Error::NotOverlapping);
        }
        Ok(Self::from_endpoints(
            self.lower().max(other.lower()),
            self.upper().min(other.upper()),
        ))
    }

    /// The timestamps strictly between two periods that neither overlap nor
    /// abut.  The bounds of the gap are the complement of the neighbouring
    /// bounds: an excluded end becomes an included start of the gap.
    pub fn gap(&self, other: &Period) -> Result<Period> {
        if self.touches(other) {
            return Err(Error::NotDisjoint);
        }
        Ok(Self::from_endpoints(
            self.upper().min(other.upper()),
            self.lower().max(other.lower()),
        ))
    }

    /// The smallest period that contains self and all the others.  Where
    /// periods share the extremal start (or end), it is included if any of
    /// them includes it.
    pub fn merge(&self, others: &[Period]) -> Period {
        let (lower, upper) = others
            .iter()
            .fold((self.lower(), self.upper()), |(lower, upper), p| {
                (lower.min(p.lower()), upper.max(p.upper()))
            });
        Self::from_endpoints(lower, upper)
    }

    /// The union of the two periods: a single period if they overlap or
    /// abut, otherwise both periods in chronological order.
    pub fn union(&self, other: &Period) -> Vec<Period> {
        if self.touches(other) {
            vec![self.merge(&[*other])]
        } else if self.lower() <= other.lower() {
            vec![*self, *other]
        } else {
            vec![*other, *self]
        }
    }

    /// The timestamps that belong to exactly one of the two periods, in
    /// chronological order.  The result is the same when self and other are
    /// swapped.
    /// ```text
    ///    [------------)
    ///         [------------]
    ///    [----)       [----]
    /// ```
    pub fn diff(&self, other: &Period) -> Result<Vec<Period>> {
        if !self.overlaps(other) {
            return Err(Error::NotOverlapping);
        }
        let (first, last) = (
            self.lower().min(other.lower()),
            self.upper().max(other.upper()),
        );
        let (common_start, common_end) = (
            self.lower().max(other.lower()),
            self.upper().min(other.upper()),
        );
        let mut result = Vec::with_capacity(2);
        if first != common_start {
            result.push(Self::from_endpoints(first, common_start));
        }
        if common_end != last {
            result.push(Self::from_endpoints(common_end, last));
        }
        Ok(result)
    }

    /// The timestamps of self that are not in other, in chronological
    /// order.
    /// ```text
    ///    [------------)
    ///         [---)
    ///    [----)   [---)
    /// ```
    pub fn subtract(&self, other: &Period) -> Vec<Period> {
        if !self.overlaps(other) {
            return vec![*self];
        }
        let mut result = Vec::with_capacity(2);
        if self.lower() < other.lower() {
            result.push(Self::from_endpoints(self.lower(), other.lower()));
        }
        if other.upper() < self.upper() {
            result.push(Self::from_endpoints(other.upper(), self.upper()));
        }
        result
    }

    /// A new period with the same end and bounds, but a different start
    pub fn starting_on(&self, start: Timestamp) -> Result<Period> {
        if start == self.start {
            return Ok(*self);
        }
        Self::from_datepoints(start, self.end, self.bounds)
    }

    /// A new period with the same start and bounds, but a different end
    pub fn ending_on(&self, end: Timestamp) -> Result<Period> {
        if end == self.end {
            return Ok(*self);
        }
        Self::from_datepoints(self.start, end, self.bounds)
    }

    pub fn move_start_date(&self, duration: Duration) -> Result<Period> {
        self.starting_on(times::add(&self.start, &duration)?)
    }

    pub fn move_end_date(&self, duration: Duration) -> Result<Period> {
        self.ending_on(times::add(&self.end, &duration)?)
    }

    /// Keep the start, and set the end so that the period lasts `duration`
    pub fn with_duration_after_start(&self, duration: Duration) -> Result<Period> {
        self.ending_on(times::add(&self.start, &duration)?)
    }

    /// Keep the end, and set the start so that the period lasts `duration`
    pub fn with_duration_before_end(&self, duration: Duration) -> Result<Period> {
        self.starting_on(times::sub(&self.end, &duration)?)
    }

    /// Shift both start and end by the same duration
    pub fn move_by(&self, duration: Duration) -> Result<Period> {
        if duration.is_zero() {
            return Ok(*self);
        }
        Self::from_datepoints(
            times::add(&self.start, &duration)?,
            times::add(&self.end, &duration)?,
            self.bounds,
        )
    }

    /// Move the start backward and the end forward by `duration`.  A
    /// negative duration shrinks the period instead.
    pub fn expand(&self, duration: Duration) -> Result<Period> {
        if duration.is_zero() {
            return Ok(*self);
        }
        Self::from_datepoints(
            times::sub(&self.start, &duration)?,
            times::add(&self.end, &duration)?,
            self.bounds,
        )
    }

    #[must_use]
    pub fn bounded_with(&self, bounds: Bounds) -> Period {
        Self { bounds, ..*self }
    }

    /// Split the period into consecutive chunks lasting `duration`, starting
    /// from the start.  The last chunk might be shorter.  Chunks abut each
    /// other; the first and last chunks keep the inclusion of self's start
    /// and end.
    pub fn split_forward(
        &self,
        duration: Duration,
    ) -> Result<impl Iterator<Item = Period>> {
        if duration <= Duration::zero() {
            return Err(Error::InvalidStep(duration));
        }
        let period = *self;
        let mut cursor = Some(period.start);
        Ok(std::iter::from_fn(move || {
            let start = cursor.filter(|c| *c < period.end)?;
            let end = start
                .checked_add_signed(duration)
                .map_or(period.end, |e| e.min(period.end));
            cursor = Some(end);
            Some(period.chunk(start, end))
        }))
    }

    /// Split the period into consecutive chunks lasting `duration`, starting
    /// from the end, so that the first chunk might be shorter.  Chunks are
    /// returned from the most recent to the oldest.
    pub fn split_backwards(
        &self,
        duration: Duration,
    ) -> Result<impl Iterator<Item = Period>> {
        if duration <= Duration::zero() {
            return Err(Error::InvalidStep(duration));
        }
        let period = *self;
        let mut cursor = Some(period.end);
        Ok(std::iter::from_fn(move || {
            let end = cursor.filter(|c| *c > period.start)?;
            let start = end
                .checked_sub_signed(duration)
                .map_or(period.start, |s| s.max(period.start));
            cursor = Some(start);
            Some(period.chunk(start, end))
        }))
    }

    /// A sub-period used when splitting: inner boundaries are
    /// `[start, end)`, outer boundaries are those of self.
    fn chunk(&self, start: Timestamp, end: Timestamp) -> Period {
        Period {
            start,
            end,
            bounds: Bounds::from_inclusion(
                start != self.start || self.bounds.is_start_included(),
                end == self.end && self.bounds.is_end_included(),
            ),
        }
    }

    /// The timestamps of the period, starting from start and moving forward
    /// by `step`.
    pub fn range_forward(
        &self,
        step: Duration,
    ) -> Result<impl Iterator<Item = Timestamp>> {
        if step <= Duration::zero() {
            return Err(Error::InvalidStep(step));
        }
        let period = *self;
        Ok(std::iter::successors(Some(period.start), move |ts| {
            ts.checked_add_signed(step)
        })
        .take_while(move |ts| *ts <= period.end)
        .filter(move |ts| period.contains(ts)))
    }

    /// The timestamps of the period, starting from end and moving backward
    /// by `step`.
    pub fn range_backwards(
        &self,
        step: Duration,
    ) -> Result<impl Iterator<Item = Timestamp>> {
        if step <= Duration::zero() {
            return Err(Error::InvalidStep(step));
        }
        let period = *self;
        Ok(std::iter::successors(Some(period.end), move |ts| {
            ts.checked_sub_signed(step)
        })
        .take_while(move |ts| *ts >= period.start)
        .filter(move |ts| period.contains(ts)))
    }
}

impl std::fmt::Display for Period {
    /// Uses the ISO 80000 notation, e.g. `[2021-01-03T00:00:00Z, 2021-01-04T00:00:00Z)`
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}",
            self.bounds.to_iso80000(
                &self.start.to_rfc3339_opts(SecondsFormat::AutoSi, true),
                &self.end.to_rfc3339_opts(SecondsFormat::AutoSi, true),
            )
        )
    }
}
