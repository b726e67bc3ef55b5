//! This crate provides operations on periods of time, i.e. intervals
//! between two timestamps, where each end may or may not be part of the
//! period.
//!
//!  |Notation |Bounds                              |Description
//!  |---------|------------------------------------|--------------
//!  | `[A,B)` |[`Bounds::IncludeStartExcludeEnd`]  |left-closed, right-open (default)
//!  | `[A,B]` |[`Bounds::IncludeAll`]              |left-closed, right-closed
//!  | `(A,B]` |[`Bounds::ExcludeStartIncludeEnd`]  |left-open, right-closed
//!  | `(A,B)` |[`Bounds::ExcludeAll`]              |left-open, right-open
//!
//! A [`Period`] is immutable, and all its operations take the bounds into
//! account.  For instance, `[A,B)` and `[B,C)` do not overlap but abut,
//! and so do `[A,B)` and `(B,C)` even though B belongs to neither, whereas
//! `[A,B]` and `[B,C)` overlap on B.
//!
//! A [`Sequence`] is an ordered list of periods, and computes the gaps,
//! intersections and unions of all its periods in a single sweep:
//!
//! ```text
//!     [------)     [----)    [--)
//!        [-------)
//!
//!        [---)                       intersections
//!                [-)    [----)       gaps
//!     [----------) [----)    [--)    unions
//! ```
//!
//! ```
//! use chrono::{TimeZone, Utc};
//! use period_lib::{Period, Sequence};
//!
//! let day = |d| Utc.with_ymd_and_hms(2024, 1, d, 0, 0, 0).unwrap();
//! let a = Period::new(day(1), day(10)).unwrap();
//! let b = Period::new(day(20), day(25)).unwrap();
//! assert_eq!(a.gap(&b).unwrap(), Period::new(day(10), day(20)).unwrap());
//!
//! let seq: Sequence = vec![a, b].into();
//! assert_eq!(seq.length(), Some(Period::new(day(1), day(25)).unwrap()));
//! assert_eq!(seq.gaps().len(), 1);
//! ```

pub mod bounds;
mod endpoints;
pub mod errors;
pub mod periods;
pub mod sequences;
pub mod times;

pub use crate::bounds::{Bounds, Notation};
pub use crate::errors::{Error, Result};
pub use crate::periods::Period;
pub use crate::sequences::Sequence;
pub use crate::times::{Duration, Timestamp};

#[cfg(test)]
mod proptests;
