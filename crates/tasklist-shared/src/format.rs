use chrono::{
  NaiveDate,
  NaiveTime
};

pub const NO_DUE_DATE: &str =
  "No Due Date";

pub const STORED_DATE_FORMAT: &str =
  "%Y-%m-%d";

pub const STORED_TIME_FORMAT: &str =
  "%H:%M";

#[must_use]
pub fn parse_stored_date(
  raw: &str
) -> Option<NaiveDate> {
  NaiveDate::parse_from_str(
    raw.trim(),
    STORED_DATE_FORMAT
  )
  .ok()
}

/// Accepts `HH:MM` as written by time
/// inputs, and `HH:MM:SS` from
/// browsers that include seconds.
#[must_use]
pub fn parse_stored_time(
  raw: &str
) -> Option<NaiveTime> {
  let raw = raw.trim();
  NaiveTime::parse_from_str(
    raw,
    STORED_TIME_FORMAT
  )
  .or_else(|_| {
    NaiveTime::parse_from_str(
      raw, "%H:%M:%S"
    )
  })
  .ok()
}

/// Human-readable due label, e.g.
/// `Jan 1, 2025 at 3:05 PM`.
#[must_use]
pub fn format_date_time(
  date: Option<&str>,
  time: Option<&str>
) -> String {
  let Some(date) = date
    .map(str::trim)
    .filter(|d| !d.is_empty())
  else {
    return NO_DUE_DATE.to_string();
  };

  let mut display =
    match parse_stored_date(date) {
      | Some(parsed) => parsed
        .format("%b %-d, %Y")
        .to_string(),
      | None => date.to_string()
    };

  if let Some(time) = time
    .map(str::trim)
    .filter(|t| !t.is_empty())
  {
    let clock =
      match parse_stored_time(time) {
        | Some(parsed) => parsed
          .format("%-I:%M %p")
          .to_string(),
        | None => time.to_string()
      };
    display.push_str(" at ");
    display.push_str(&clock);
  }

  display
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn no_date_uses_placeholder() {
    assert_eq!(
      format_date_time(None, None),
      "No Due Date"
    );
    assert_eq!(
      format_date_time(
        Some(""),
        Some("10:00")
      ),
      "No Due Date"
    );
  }

  #[test]
  fn date_only() {
    assert_eq!(
      format_date_time(
        Some("2025-01-01"),
        None
      ),
      "Jan 1, 2025"
    );
    assert_eq!(
      format_date_time(
        Some("2024-12-25"),
        Some("")
      ),
      "Dec 25, 2024"
    );
  }

  #[test]
  fn twelve_hour_clock() {
    assert_eq!(
      format_date_time(
        Some("2025-03-09"),
        Some("15:05")
      ),
      "Mar 9, 2025 at 3:05 PM"
    );
    assert_eq!(
      format_date_time(
        Some("2025-03-09"),
        Some("00:30")
      ),
      "Mar 9, 2025 at 12:30 AM"
    );
    assert_eq!(
      format_date_time(
        Some("2025-03-09"),
        Some("12:00")
      ),
      "Mar 9, 2025 at 12:00 PM"
    );
  }

  #[test]
  fn unparsable_values_pass_through() {
    assert_eq!(
      format_date_time(
        Some("someday"),
        Some("later")
      ),
      "someday at later"
    );
  }
}
