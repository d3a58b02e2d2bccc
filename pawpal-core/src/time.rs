//! Time utilities: minute-granularity schedule input and output.

use anyhow::Result;
use chrono::{DateTime, NaiveDateTime, TimeZone, Utc};
use chrono_tz::Tz;

/// Parse a minute-stamp like "2026-02-15 08:00" in an IANA tz like
/// "America/Chicago", returning UTC. All engine arithmetic stays in UTC.
pub fn parse_minute_stamp(local: &str, tz: &str) -> Result<DateTime<Utc>> {
    let tz: Tz = tz
        .parse()
        .map_err(|_| anyhow::anyhow!("invalid timezone: {tz}"))?;

    let ndt = NaiveDateTime::parse_from_str(local, "%Y-%m-%d %H:%M")
        .map_err(|e| anyhow::anyhow!("invalid minute-stamp '{local}' (want YYYY-MM-DD HH:MM): {e}"))?;

    let local_dt = tz
        .from_local_datetime(&ndt)
        .single()
        .ok_or_else(|| anyhow::anyhow!("ambiguous or invalid local time (DST?): {local} {tz}"))?;

    Ok(local_dt.with_timezone(&Utc))
}

/// Format a UTC instant in the given zone at schedule granularity.
pub fn format_minute_stamp(dt: DateTime<Utc>, tz: Tz) -> String {
    dt.with_timezone(&tz).format("%Y-%m-%d %H:%M").to_string()
}

/// Wall-clock only, for day views where the date is implied.
pub fn format_clock(dt: DateTime<Utc>, tz: Tz) -> String {
    dt.with_timezone(&tz).format("%H:%M").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_chicago_minute_stamp() {
        // Feb is CST (UTC-6)
        let utc = parse_minute_stamp("2026-02-15 08:00", "America/Chicago").unwrap();
        assert_eq!(utc.to_rfc3339(), "2026-02-15T14:00:00+00:00");
    }

    #[test]
    fn round_trips_through_the_same_zone() {
        let tz: Tz = "America/Chicago".parse().unwrap();
        let utc = parse_minute_stamp("2026-02-15 18:30", "America/Chicago").unwrap();
        assert_eq!(format_minute_stamp(utc, tz), "2026-02-15 18:30");
        assert_eq!(format_clock(utc, tz), "18:30");
    }

    #[test]
    fn rejects_bad_input() {
        assert!(parse_minute_stamp("2026-02-15 08:00", "Mars/Olympus").is_err());
        assert!(parse_minute_stamp("tomorrow at eight", "America/Chicago").is_err());
    }
}
