// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveTime, Offset, Utc};

use crate::error::GenerateError;

/// Moscow has stayed on UTC+3 without DST since 2014
const MOSCOW_UTC_OFFSET_SECS: i32 = 3 * 3600;

/// Genitive and nominative month names, in calendar order
const MONTHS: [(&str, &str); 12] = [
    ("января", "январь"),
    ("февраля", "февраль"),
    ("марта", "март"),
    ("апреля", "апрель"),
    ("мая", "май"),
    ("июня", "июнь"),
    ("июля", "июль"),
    ("августа", "август"),
    ("сентября", "сентябрь"),
    ("октября", "октябрь"),
    ("ноября", "ноябрь"),
    ("декабря", "декабрь"),
];

/// The broadcaster's timezone
pub fn moscow() -> FixedOffset {
    FixedOffset::east_opt(MOSCOW_UTC_OFFSET_SECS).unwrap_or_else(|| Utc.fix())
}

/// Parse the upstream `published` string.
///
/// Older episodes carry a date such as `12 марта 2024`; episodes from today
/// carry only a time such as `14:05`, which is resolved against `today`.
pub fn parse_api_date(value: &str, today: NaiveDate) -> Result<DateTime<FixedOffset>, GenerateError> {
    let value = value.trim();
    let invalid = || GenerateError::InvalidDate {
        value: value.to_string(),
    };

    let naive = match parse_russian_date(value) {
        Some(date) => date.and_time(NaiveTime::MIN),
        None => {
            let time = NaiveTime::parse_from_str(value, "%H:%M").map_err(|_| invalid())?;
            today.and_time(time)
        }
    };

    naive.and_local_timezone(moscow()).single().ok_or_else(invalid)
}

fn parse_russian_date(value: &str) -> Option<NaiveDate> {
    let mut parts = value.split_whitespace();
    let day: u32 = parts.next()?.parse().ok()?;
    let month_name = parts.next()?.to_lowercase();
    let year: i32 = parts.next()?.parse().ok()?;
    if parts.next().is_some() {
        return None;
    }

    let month = MONTHS
        .iter()
        .position(|(genitive, nominative)| month_name == *genitive || month_name == *nominative)?;

    NaiveDate::from_ymd_opt(year, month as u32 + 1, day)
}

/// Today's date in Moscow
pub fn today_in_moscow() -> NaiveDate {
    Utc::now().with_timezone(&moscow()).date_naive()
}

/// Parse `H:MM:SS`, `MM:SS` or `SS` into seconds
pub fn parse_duration(value: &str) -> Result<u64, GenerateError> {
    let invalid = || GenerateError::InvalidDuration {
        value: value.to_string(),
    };

    let value = value.trim();
    if value.is_empty() {
        return Err(invalid());
    }

    value.split(':').try_fold(0u64, |total, part| {
        let part: u64 = part.parse().map_err(|_| invalid())?;
        total
            .checked_mul(60)
            .and_then(|total| total.checked_add(part))
            .ok_or_else(invalid)
    })
}

/// Format seconds as `H:MM:SS`
pub fn format_duration(seconds: u64) -> String {
    format!(
        "{}:{:02}:{:02}",
        seconds / 3600,
        (seconds % 3600) / 60,
        seconds % 60
    )
}
