use crate::settings::NotationKind;
use anyhow::{Context, Result};
use chrono::{DateTime, NaiveDate, NaiveTime, SecondsFormat, Utc};
use period_lib::{Bounds, Period, Timestamp};

/// Parse either a day (`2024-01-31`, at midnight UTC) or a full RFC 3339
/// timestamp.
pub fn parse_timestamp(text: &str) -> Result<Timestamp> {
    if let Ok(day) = NaiveDate::parse_from_str(text, "%Y-%m-%d") {
        return Ok(day.and_time(NaiveTime::MIN).and_utc());
    }
    let ts = DateTime::parse_from_rfc3339(text)
        .with_context(|| format!("Invalid timestamp {text:?}"))?;
    Ok(ts.with_timezone(&Utc))
}

/// Timestamps at midnight are shown as days, others in RFC 3339.
pub fn format_timestamp(ts: &Timestamp) -> String {
    if ts.time() == NaiveTime::MIN {
        ts.format("%Y-%m-%d").to_string()
    } else {
        ts.to_rfc3339_opts(SecondsFormat::AutoSi, true)
    }
}

pub fn parse_period(text: &str, kind: NotationKind) -> Result<Period> {
    let notation = match kind {
        NotationKind::Iso80000 => Bounds::parse_iso80000(text),
        NotationKind::Bourbaki => Bounds::parse_bourbaki(text),
    }?;
    let start = parse_timestamp(notation.start)
        .with_context(|| format!("Invalid start in {text:?}"))?;
    let end = parse_timestamp(notation.end)
        .with_context(|| format!("Invalid end in {text:?}"))?;
    Period::from_datepoints(start, end, notation.bounds)
        .with_context(|| format!("Invalid period {text:?}"))
}

pub fn format_period(period: &Period, kind: NotationKind) -> String {
    let start = format_timestamp(&period.start());
    let end = format_timestamp(&period.end());
    match kind {
        NotationKind::Iso80000 => period.bounds().to_iso80000(&start, &end),
        NotationKind::Bourbaki => period.bounds().to_bourbaki(&start, &end),
    }
}
