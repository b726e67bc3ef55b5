use crate::errors::{Error, Result};
use regex::Regex;
use std::sync::OnceLock;

/// Whether the start and end timestamps of a period are part of it.
///
/// ```text
///    IncludeStartExcludeEnd    [start, end)
///    IncludeAll                [start, end]
///    ExcludeStartIncludeEnd    (start, end]
///    ExcludeAll                (start, end)
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Bounds {
    #[default]
    IncludeStartExcludeEnd,
    IncludeAll,
    ExcludeStartIncludeEnd,
    ExcludeAll,
}

/// The result of splitting a period notation like `[2021-01-03,2021-01-04)`.
/// The start and end are returned as text, since parsing them is the job of
/// the caller.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Notation<'a> {
    pub start: &'a str,
    pub end: &'a str,
    pub bounds: Bounds,
}

impl Bounds {
    /// Build the bounds from the inclusion of each side
    #[must_use]
    pub fn from_inclusion(start_included: bool, end_included: bool) -> Self {
        match (start_included, end_included) {
            (true, false) => Bounds::IncludeStartExcludeEnd,
            (true, true) => Bounds::IncludeAll,
            (false, true) => Bounds::ExcludeStartIncludeEnd,
            (false, false) => Bounds::ExcludeAll,
        }
    }

    pub fn is_start_included(&self) -> bool {
        match self {
            Bounds::IncludeStartExcludeEnd | Bounds::IncludeAll => true,
            Bounds::ExcludeStartIncludeEnd | Bounds::ExcludeAll => false,
        }
    }

    pub fn is_end_included(&self) -> bool {
        match self {
            Bounds::IncludeAll | Bounds::ExcludeStartIncludeEnd => true,
            Bounds::IncludeStartExcludeEnd | Bounds::ExcludeAll => false,
        }
    }

    /// Whether both bounds agree on the inclusion of the start
    pub fn equals_start(&self, other: &Bounds) -> bool {
        self.is_start_included() == other.is_start_included()
    }

    /// Whether both bounds agree on the inclusion of the end
    pub fn equals_end(&self, other: &Bounds) -> bool {
        self.is_end_included() == other.is_end_included()
    }

    #[must_use]
    pub fn include_start(&self) -> Self {
        match self {
            Bounds::IncludeStartExcludeEnd | Bounds::ExcludeAll => {
                Bounds::IncludeStartExcludeEnd
            }
            Bounds::IncludeAll | Bounds::ExcludeStartIncludeEnd => {
                Bounds::IncludeAll
            }
        }
    }

    #[must_use]
    pub fn exclude_start(&self) -> Self {
        match self {
            Bounds::IncludeStartExcludeEnd | Bounds::ExcludeAll => {
                Bounds::ExcludeAll
            }
            Bounds::IncludeAll | Bounds::ExcludeStartIncludeEnd => {
                Bounds::ExcludeStartIncludeEnd
            }
        }
    }

    #[must_use]
    pub fn include_end(&self) -> Self {
        match self {
            Bounds::IncludeStartExcludeEnd | Bounds::IncludeAll => {
                Bounds::IncludeAll
            }
            Bounds::ExcludeStartIncludeEnd | Bounds::ExcludeAll => {
                Bounds::ExcludeStartIncludeEnd
            }
        }
    }

    #[must_use]
    pub fn exclude_end(&self) -> Self {
        match self {
            Bounds::IncludeStartExcludeEnd | Bounds::IncludeAll => {
                Bounds::IncludeStartExcludeEnd
            }
            Bounds::ExcludeStartIncludeEnd | Bounds::ExcludeAll => {
                Bounds::ExcludeAll
            }
        }
    }

    /// Copy the inclusion of the start from other, keep our own end.
    #[must_use]
    pub fn replace_start(&self, other: &Bounds) -> Self {
        if other.is_start_included() {
            self.include_start()
        } else {
            self.exclude_start()
        }
    }

    /// Copy the inclusion of the end from other, keep our own start.
    #[must_use]
    pub fn replace_end(&self, other: &Bounds) -> Self {
        if other.is_end_included() {
            self.include_end()
        } else {
            self.exclude_end()
        }
    }

    /// Split a notation like `[start, end)`, where the start is opened with
    /// either `[` (included) or `(` (excluded), and the end is closed with
    /// `]` (included) or `)` (excluded).
    ///
    /// ```
    /// use period_lib::bounds::Bounds;
    /// let n = Bounds::parse_iso80000("[2021-01-03,2021-01-04)").unwrap();
    /// assert_eq!(n.start, "2021-01-03");
    /// assert_eq!(n.end, "2021-01-04");
    /// assert_eq!(n.bounds, Bounds::IncludeStartExcludeEnd);
    /// ```
    pub fn parse_iso80000(notation: &str) -> Result<Notation<'_>> {
        static RE: OnceLock<Regex> = OnceLock::new();
        let re = RE.get_or_init(|| {
            Regex::new(
                r"^(?<lower>[\[(])(?<start>[^,\[\]()]*),(?<end>[^,\[\]()]*)(?<upper>[\])])$",
            )
            .expect("valid regexp")
        });
        Self::parse_with(re, notation, "[", "]")
    }

    /// Split a notation like `[start, end[`, where the start is opened with
    /// either `[` (included) or `]` (excluded), and the end is closed with
    /// `]` (included) or `[` (excluded).
    pub fn parse_bourbaki(notation: &str) -> Result<Notation<'_>> {
        static RE: OnceLock<Regex> = OnceLock::new();
        let re = RE.get_or_init(|| {
            Regex::new(
                r"^(?<lower>[\[\]])(?<start>[^,\[\]]*),(?<end>[^,\[\]]*)(?<upper>[\[\]])$",
            )
            .expect("valid regexp")
        });
        Self::parse_with(re, notation, "[", "]")
    }

    fn parse_with<'a>(
        re: &Regex,
        notation: &'a str,
        start_included: &str,
        end_included: &str,
    ) -> Result<Notation<'a>> {
        let caps = re
            .captures(notation)
            .ok_or_else(|| Error::InvalidNotation(notation.to_string()))?;
        let part = |name: &str| caps.name(name).map_or("", |m| m.as_str());
        Ok(Notation {
            start: part("start").trim(),
            end: part("end").trim(),
            bounds: Bounds::from_inclusion(
                part("lower") == start_included,
                part("upper") == end_included,
            ),
        })
    }

    /// Format a period using the ISO 80000 notation, e.g. `[start, end)`.
    /// The two timestamps must already have been formatted by the caller.
    pub fn to_iso80000(&self, start: &str, end: &str) -> String {
        match self {
            Bounds::IncludeStartExcludeEnd => format!("[{start}, {end})"),
            Bounds::IncludeAll => format!("[{start}, {end}]"),
            Bounds::ExcludeStartIncludeEnd => format!("({start}, {end}]"),
            Bounds::ExcludeAll => format!("({start}, {end})"),
        }
    }

    /// Format a period using the Bourbaki notation, e.g. `[start, end[`.
    pub fn to_bourbaki(&self, start: &str, end: &str) -> String {
        match self {
            Bounds::IncludeStartExcludeEnd => format!("[{start}, {end}["),
            Bounds::IncludeAll => format!("[{start}, {end}]"),
            Bounds::ExcludeStartIncludeEnd => format!("]{start}, {end}]"),
            Bounds::ExcludeAll => format!("]{start}, {end}["),
        }
    }
}
