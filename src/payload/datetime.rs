//! # Packed Date/Time Decoding
//!
//! HydroClima meters report their device clock as two packed 16-bit values:
//!
//! - the date packs a 1-based day-of-year in bits 0-8 and a year offset from
//!   2000 in bits 9-15;
//! - the time counts 1/30-minute ticks since midnight (1800 ticks per hour).
//!
//! The rendered string preserves the meter's historical output shape: the
//! month field is the 0-based count of whole months subtracted from the
//! day-of-year and the day field is the remaining day count. Deployed
//! consumers parse that exact shape, so no calendar correction is applied.
//! Out-of-range inputs (day-of-year 0 or past the end of the year, times at
//! or beyond 24 hours) are rejected instead of walking off the month table.

use crate::constants::{BASE_YEAR, DAYS_IN_MONTHS, TICKS_PER_HOUR, TICKS_PER_MINUTE};
use crate::error::DriverError;

/// True for leap years under the Gregorian rule
pub fn is_leap_year(year: u32) -> bool {
    (year % 4 == 0 && year % 100 != 0) || year % 400 == 0
}

/// Decode a packed date/time pair into a `YYYY-MM-DDTHH:MM:SSZ` string
///
/// # Errors
///
/// * [`DriverError::InvalidDate`] - day-of-year is 0 or exceeds the number
///   of days in the encoded year
/// * [`DriverError::InvalidTime`] - encoded time reaches hour 24 or beyond
///   (valid range is 0..=43199)
pub fn decode_datetime(encoded_date: u16, encoded_time: u16) -> Result<String, DriverError> {
    let day_of_year = encoded_date & 0x1FF;
    let year_offset = (encoded_date >> 9) & 0x7F;
    let year = BASE_YEAR + u32::from(year_offset);

    if day_of_year == 0 {
        return Err(DriverError::InvalidDate(day_of_year));
    }

    let mut days_in_months = DAYS_IN_MONTHS;
    if is_leap_year(year) {
        days_in_months[1] = 29;
    }

    let mut day = day_of_year;
    let mut month = 0usize;
    loop {
        let Some(&month_days) = days_in_months.get(month) else {
            // The walk would pass December: the day-of-year does not fit
            // inside the encoded year.
            return Err(DriverError::InvalidDate(day_of_year));
        };
        if day <= month_days {
            break;
        }
        day -= month_days;
        month += 1;
    }

    let hour = encoded_time / TICKS_PER_HOUR;
    if hour >= 24 {
        return Err(DriverError::InvalidTime {
            encoded: encoded_time,
            hour,
        });
    }
    let minute = (encoded_time % TICKS_PER_HOUR) / TICKS_PER_MINUTE;
    let second = (encoded_time % TICKS_PER_MINUTE) / 2;

    Ok(format!(
        "{year}-{month:02}-{day:02}T{hour:02}:{minute:02}:{second:02}Z"
    ))
}
