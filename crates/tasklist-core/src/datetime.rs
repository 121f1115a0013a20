use anyhow::{
  Context,
  anyhow
};
use chrono::{
  Datelike,
  Duration,
  NaiveDate,
  NaiveTime,
  Weekday
};
use regex::Regex;
use tasklist_shared::format::{
  STORED_DATE_FORMAT,
  STORED_TIME_FORMAT,
  parse_stored_date
};

/// Resolves a due date argument against
/// `today`.
#[tracing::instrument(skip(today), fields(input = input))]
pub fn parse_date_arg(
  input: &str,
  today: NaiveDate
) -> anyhow::Result<NaiveDate> {
  let token = input.trim();
  let lower =
    token.to_ascii_lowercase();

  match lower.as_str() {
    | "today" => return Ok(today),
    | "tomorrow" => {
      return today
        .succ_opt()
        .ok_or_else(|| {
          anyhow!(
            "date out of range after \
             {today}"
          )
        });
    }
    | "yesterday" => {
      return today
        .pred_opt()
        .ok_or_else(|| {
          anyhow!(
            "date out of range before \
             {today}"
          )
        });
    }
    | _ => {}
  }

  if let Some(date) =
    parse_stored_date(token)
  {
    return Ok(date);
  }

  if token.len() == 4
    && token
      .chars()
      .all(|c| c.is_ascii_digit())
  {
    let year: i32 =
      token.parse().context(
        "invalid 4-digit year"
      )?;
    return NaiveDate::from_ymd_opt(
      year, 1, 1
    )
    .ok_or_else(|| {
      anyhow!(
        "invalid year value: {year}"
      )
    });
  }

  if let Some(target) =
    parse_weekday_name(&lower)
  {
    return Ok(next_weekday_date(
      today, target
    ));
  }

  if let Some(month) =
    parse_month_name(&lower)
  {
    let mut year = today.year();
    let this_year =
      NaiveDate::from_ymd_opt(
        year, month, 1
      )
      .ok_or_else(|| {
        anyhow!(
          "invalid month value: \
           {month}"
        )
      })?;
    if this_year <= today {
      year = year.saturating_add(1);
    }
    return NaiveDate::from_ymd_opt(
      year, month, 1
    )
    .ok_or_else(|| {
      anyhow!(
        "invalid month/year \
         candidate"
      )
    });
  }

  let rel_re = Regex::new(r"^(?P<sign>[+-])(?P<num>\d+)(?P<unit>[dw])$")
    .map_err(|e| anyhow!("internal regex compile failure: {e}"))?;

  if let Some(caps) =
    rel_re.captures(&lower)
  {
    let num: i64 = caps["num"]
      .parse()
      .context(
        "invalid relative number"
      )?;
    let days = match &caps["unit"] {
      | "w" => num.saturating_mul(7),
      | _ => num
    };
    let delta = if &caps["sign"] == "-"
    {
      Duration::days(-days)
    } else {
      Duration::days(days)
    };
    return today
      .checked_add_signed(delta)
      .ok_or_else(|| {
        anyhow!(
          "relative date out of \
           range: {input}"
        )
      });
  }

  Err(anyhow!(
    "unrecognized date: {input}"
  ))
  .with_context(|| {
    "supported formats: YYYY-MM-DD, \
     today/tomorrow/yesterday, \
     4-digit year, weekday names (e.g. \
     monday), month names (e.g. \
     march), +Nd/-Nd, +Nw/-Nw"
  })
}

/// Parses `15:23`, `3:23pm`, or
/// `3:23 PM`.
#[tracing::instrument]
pub fn parse_time_arg(
  input: &str
) -> anyhow::Result<NaiveTime> {
  let (hour, minute) =
    parse_clock_time(input)
      .ok_or_else(|| {
        anyhow!(
          "unrecognized time: {input} \
           (expected HH:MM or h:mmam/pm)"
        )
      })?;
  NaiveTime::from_hms_opt(
    hour, minute, 0
  )
  .ok_or_else(|| {
    anyhow!("invalid time: {input}")
  })
}

/// Date argument in the stored
/// `YYYY-MM-DD` form.
pub fn normalize_date_arg(
  input: &str,
  today: NaiveDate
) -> anyhow::Result<String> {
  Ok(
    parse_date_arg(input, today)?
      .format(STORED_DATE_FORMAT)
      .to_string()
  )
}

/// Time argument in the stored `HH:MM`
/// form.
pub fn normalize_time_arg(
  input: &str
) -> anyhow::Result<String> {
  Ok(
    parse_time_arg(input)?
      .format(STORED_TIME_FORMAT)
      .to_string()
  )
}

fn parse_weekday_name(
  token: &str
) -> Option<Weekday> {
  match token.trim() {
    | "monday" | "mon" => {
      Some(Weekday::Mon)
    }
    | "tuesday" | "tue" | "tues" => {
      Some(Weekday::Tue)
    }
    | "wednesday" | "wed" => {
      Some(Weekday::Wed)
    }
    | "thursday" | "thu" | "thur"
    | "thurs" => Some(Weekday::Thu),
    | "friday" | "fri" => {
      Some(Weekday::Fri)
    }
    | "saturday" | "sat" => {
      Some(Weekday::Sat)
    }
    | "sunday" | "sun" => {
      Some(Weekday::Sun)
    }
    | _ => None
  }
}

/// Next occurrence strictly after
/// `from`.
fn next_weekday_date(
  from: NaiveDate,
  target: Weekday
) -> NaiveDate {
  let from_idx = from
    .weekday()
    .num_days_from_monday()
    as i64;
  let target_idx = target
    .num_days_from_monday()
    as i64;
  let mut delta =
    (7 + target_idx - from_idx) % 7;
  if delta == 0 {
    delta = 7;
  }
  from
    .checked_add_signed(Duration::days(
      delta
    ))
    .unwrap_or(from)
}

fn parse_clock_time(
  token: &str
) -> Option<(u32, u32)> {
  let clock_re = Regex::new(
    r"(?i)^(?P<hour>\d{1,2}):(?P<minute>\d{2})\s*(?P<ampm>[ap]m)?$",
  )
  .ok()?;
  let captures =
    clock_re.captures(token.trim())?;

  let raw_hour = captures
    .name("hour")?
    .as_str()
    .parse::<u32>()
    .ok()?;
  let minute = captures
    .name("minute")?
    .as_str()
    .parse::<u32>()
    .ok()?;
  if minute > 59 {
    return None;
  }

  let hour = match captures
    .name("ampm")
    .map(|m| m.as_str().to_ascii_lowercase())
  {
    | Some(ampm) => {
      if raw_hour == 0 || raw_hour > 12 {
        return None;
      }
      match (ampm.as_str(), raw_hour) {
        | ("am", 12) => 0,
        | ("am", h) => h,
        | ("pm", 12) => 12,
        | ("pm", h) => h + 12,
        | _ => return None
      }
    }
    | None if raw_hour > 23 => {
      return None;
    }
    | None => raw_hour
  };

  Some((hour, minute))
}

fn parse_month_name(
  token: &str
) -> Option<u32> {
  match token.trim() {
    | "january" | "jan" => Some(1),
    | "february" | "feb" => Some(2),
    | "march" | "mar" => Some(3),
    | "april" | "apr" => Some(4),
    | "may" => Some(5),
    | "june" | "jun" => Some(6),
    | "july" | "jul" => Some(7),
    | "august" | "aug" => Some(8),
    | "september" | "sep" | "sept" => {
      Some(9)
    }
    | "october" | "oct" => Some(10),
    | "november" | "nov" => Some(11),
    | "december" | "dec" => Some(12),
    | _ => None
  }
}
