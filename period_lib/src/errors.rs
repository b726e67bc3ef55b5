use crate::times::{Duration, Timestamp};

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// The start of a period would be after its end.
    #[error("invalid range: {start} is after {end}")]
    InvalidRange { start: Timestamp, end: Timestamp },

    /// Splitting or iterating a period needs a strictly positive step.
    #[error("invalid step: {0}")]
    InvalidStep(Duration),

    #[error("invalid notation: {0:?}")]
    InvalidNotation(String),

    #[error("the periods do not overlap")]
    NotOverlapping,

    #[error("the periods overlap or abut")]
    NotDisjoint,

    #[error("index {index} out of range for a sequence of {len} periods")]
    IndexOutOfRange { index: isize, len: usize },

    #[error("invalid date {year:04}-{month:02}-{day:02}")]
    InvalidDate { year: i32, month: u32, day: u32 },

    #[error("timestamp out of the representable range")]
    TimestampOverflow,
}

pub type Result<T> = std::result::Result<T, Error>;
