use chrono::{DateTime, FixedOffset, NaiveDate, Utc};

/// Calendar date of `now` in the service time zone.
pub fn local_date(now: DateTime<Utc>, tz: FixedOffset) -> NaiveDate {
    now.with_timezone(&tz).date_naive()
}

pub fn today(tz: FixedOffset) -> NaiveDate {
    local_date(Utc::now(), tz)
}

/// Parses `+HH:MM`, `-HH:MM` or `+HH`.
pub fn parse_tz_offset(value: &str) -> Option<FixedOffset> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }
    let sign_char = trimmed.chars().next()?;
    let sign = match sign_char {
        '+' => 1,
        '-' => -1,
        _ => return None,
    };
    let rest = &trimmed[1..];
    let mut parts = rest.split(':');
    let hours: i32 = parts.next()?.parse().ok()?;
    let minutes: i32 = parts.next().unwrap_or("0").parse().ok()?;
    if parts.next().is_some() {
        return None;
    }
    if !(0..=23).contains(&hours) || !(0..=59).contains(&minutes) {
        return None;
    }
    let total_seconds = sign * (hours * 3600 + minutes * 60);
    FixedOffset::east_opt(total_seconds)
}
