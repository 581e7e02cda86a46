use chrono::prelude::*;

pub fn is_leap_year(year: i32) -> bool {
    year % 400 == 0 || (year % 100 != 0 && year % 4 == 0)
}

// month: January -> 1
pub fn get_month_length(year: i32, month: u32) -> u32 {
    match month {
        1 => 31,
        2 => {
            if is_leap_year(year) {
                29
            } else {
                28
            }
        }
        3 => 31,
        4 => 30,
        5 => 31,
        6 => 30,
        7 => 31,
        8 => 31,
        9 => 30,
        10 => 31,
        11 => 30,
        12 => 31,
        _ => panic!("Invalid month"),
    }
}

/// Calendar month addition. When the day of month does not exist in the
/// target month it is clamped to the last day of that month, so
/// Jan 31 + 1 month = Feb 28 (or Feb 29 in a leap year).
pub fn add_months(day: NaiveDate, months: u32) -> NaiveDate {
    let months_since_year_zero = day.month0() + months;
    let year = day.year() + (months_since_year_zero / 12) as i32;
    let month = months_since_year_zero % 12 + 1;
    let day_of_month = std::cmp::min(day.day(), get_month_length(year, month));
    NaiveDate::from_ymd_opt(year, month, day_of_month).expect("Clamped day to fit target month")
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn it_knows_leap_years() {
        for year in &[1996, 2000, 2020, 2024] {
            assert!(is_leap_year(*year));
        }
        for year in &[1900, 2019, 2021, 2100] {
            assert!(!is_leap_year(*year));
        }
    }

    #[test]
    fn it_computes_month_lengths() {
        assert_eq!(get_month_length(2023, 2), 28);
        assert_eq!(get_month_length(2024, 2), 29);
        assert_eq!(get_month_length(2024, 4), 30);
        assert_eq!(get_month_length(2024, 12), 31);
    }

    #[test]
    fn it_adds_months_within_a_year() {
        let day = NaiveDate::from_ymd_opt(2024, 1, 15).unwrap();
        assert_eq!(add_months(day, 3), NaiveDate::from_ymd_opt(2024, 4, 15).unwrap());
    }

    #[test]
    fn it_adds_months_across_year_boundaries() {
        let day = NaiveDate::from_ymd_opt(2024, 6, 5).unwrap();
        assert_eq!(add_months(day, 10), NaiveDate::from_ymd_opt(2025, 4, 5).unwrap());
    }

    #[test]
    fn it_clamps_to_the_last_day_of_shorter_months() {
        let day = NaiveDate::from_ymd_opt(2023, 1, 31).unwrap();
        assert_eq!(add_months(day, 1), NaiveDate::from_ymd_opt(2023, 2, 28).unwrap());

        let day = NaiveDate::from_ymd_opt(2024, 1, 31).unwrap();
        assert_eq!(add_months(day, 1), NaiveDate::from_ymd_opt(2024, 2, 29).unwrap());

        let day = NaiveDate::from_ymd_opt(2024, 8, 31).unwrap();
        assert_eq!(add_months(day, 3), NaiveDate::from_ymd_opt(2024, 11, 30).unwrap());
    }
}
