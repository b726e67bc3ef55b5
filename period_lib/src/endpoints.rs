use crate::times::Timestamp;

/// Left, applied to a timestamp, represents a conceptual point halfway
/// between the timestamp and its predecessor.
/// Likewise, Right represents a conceptual point halfway between the
/// timestamp and its successor.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub(crate) enum Side {
    Left,
    Right,
}

/// One end of a period, seen as a cut of the time line.
///
/// An included start and an excluded end are left of their timestamp, an
/// excluded start and an included end are right of it.  With this
/// representation, all comparisons that depend on the bounds of the periods
/// become simple comparisons of endpoints:
///
/// ```text
///    [a, b)    is   Left(a)  .. Left(b)
///    (a, b]    is   Right(a) .. Right(b)
/// ```
///
/// Ordering is by timestamp first, then Left before Right.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub(crate) struct Endpoint {
    pub(crate) point: Timestamp,
    pub(crate) side: Side,
}

impl Endpoint {
    pub(crate) fn start(point: Timestamp, included: bool) -> Self {
        Endpoint {
            point,
            side: if included { Side::Left } else { Side::Right },
        }
    }

    pub(crate) fn end(point: Timestamp, included: bool) -> Self {
        Endpoint {
            point,
            side: if included { Side::Right } else { Side::Left },
        }
    }

    /// Whether the timestamp is included when this endpoint is used as the
    /// start of a period.
    pub(crate) fn includes_as_start(&self) -> bool {
        matches!(self.side, Side::Left)
    }

    /// Whether the timestamp is included when this endpoint is used as the
    /// end of a period.
    pub(crate) fn includes_as_end(&self) -> bool {
        matches!(self.side, Side::Right)
    }

    /// True if the value is to the right of the endpoint
    pub(crate) fn left_of(&self, value: &Timestamp) -> bool {
        match self.side {
            Side::Left => self.point <= *value,
            Side::Right => self.point < *value,
        }
    }

    /// True if the value is to the left of the endpoint
    pub(crate) fn right_of(&self, value: &Timestamp) -> bool {
        match self.side {
            Side::Left => *value < self.point,
            Side::Right => *value <= self.point,
        }
    }
}
