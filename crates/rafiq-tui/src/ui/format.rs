//! Clock and date formatting for the status bar.

use chrono::{Datelike, Local, NaiveDate, Timelike};

pub fn clock_line(now: &chrono::DateTime<Local>) -> String {
    let (is_pm, hour12) = now.hour12();
    format!(
        "{}:{:02} {}",
        hour12,
        now.minute(),
        if is_pm { "PM" } else { "AM" }
    )
}

pub fn date_line(now: &chrono::DateTime<Local>) -> String {
    now.format("%A, %B %-d").to_string()
}

const HIJRI_MONTHS: [&str; 12] = [
    "Muharram",
    "Safar",
    "Rabi' al-Awwal",
    "Rabi' al-Thani",
    "Jumada al-Awwal",
    "Jumada al-Thani",
    "Rajab",
    "Sha'ban",
    "Ramadan",
    "Shawwal",
    "Dhu al-Qi'dah",
    "Dhu al-Hijjah",
];

/// Tabular (civil) Islamic calendar conversion. Good to within a day of the
/// observational calendar, which is all a status line needs.
pub fn hijri_date(date: NaiveDate) -> String {
    // Julian day number of the Gregorian date.
    let a = (14 - date.month() as i64) / 12;
    let y = date.year() as i64 + 4800 - a;
    let m = date.month() as i64 + 12 * a - 3;
    let jdn =
        date.day() as i64 + (153 * m + 2) / 5 + 365 * y + y / 4 - y / 100 + y / 400 - 32045;

    // Civil epoch, 1 Muharram 1 AH, is JDN 1948440.
    let days = jdn - 1948440;
    let cycles = days / 10631; // 30-year cycles of 10631 days
    let rem = days % 10631;
    let mut year = 30 * cycles;
    let mut day_of_year = rem;
    for y_in_cycle in 0..30 {
        let year_len = if is_hijri_leap(y_in_cycle) { 355 } else { 354 };
        if day_of_year < year_len {
            year += y_in_cycle;
            break;
        }
        day_of_year -= year_len;
    }

    let mut month = 0usize;
    for m_idx in 0..12 {
        let month_len = if m_idx % 2 == 0 {
            30
        } else if m_idx == 11 && is_hijri_leap(year % 30) {
            30
        } else {
            29
        };
        if day_of_year < month_len {
            month = m_idx;
            break;
        }
        day_of_year -= month_len;
    }

    format!(
        "{} {} {} AH",
        day_of_year + 1,
        HIJRI_MONTHS[month],
        year + 1
    )
}

/// `year_in_cycle` is zero-based; the classical leap years 2, 5, 7, 10, 13,
/// 16, 18, 21, 24, 26, 29 of the 30-year cycle are one-based.
fn is_hijri_leap(year_in_cycle: i64) -> bool {
    matches!(
        year_in_cycle + 1,
        2 | 5 | 7 | 10 | 13 | 16 | 18 | 21 | 24 | 26 | 29
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hijri_epoch_is_muharram_year_one() {
        // 1 Muharram 1 AH in the proleptic Gregorian calendar.
        let date = NaiveDate::from_ymd_opt(622, 7, 19).unwrap();
        assert_eq!(hijri_date(date), "1 Muharram 1 AH");
    }

    #[test]
    fn known_conversion_lands_in_ramadan() {
        // 1 Ramadan 1445 AH was 11 March 2024 in the civil calendar.
        let date = NaiveDate::from_ymd_opt(2024, 3, 11).unwrap();
        let hijri = hijri_date(date);
        assert!(hijri.contains("Ramadan"), "got {hijri}");
        assert!(hijri.contains("1445"), "got {hijri}");
    }

    #[test]
    fn year_lengths_sum_to_the_cycle() {
        let total: i64 = (0..30)
            .map(|y| if is_hijri_leap(y) { 355 } else { 354 })
            .sum();
        assert_eq!(total, 10631);
    }
}
