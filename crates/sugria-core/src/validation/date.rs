//! Date-of-birth validation.

use jiff::{civil::Date, Unit, Zoned};

/// Fails if `value` is not a `YYYY-MM-DD` date or the person is younger than
/// `min_age` whole years today.
pub fn validate_date_of_birth(value: &str, min_age: i16) -> Option<String> {
    validate_date_of_birth_on(value, min_age, Zoned::now().date())
}

/// Same as [`validate_date_of_birth`] with an explicit "today".
///
/// # Examples
///
/// ```rust
/// use jiff::civil::date;
/// use sugria_core::validation::validate_date_of_birth_on;
///
/// let today = date(2025, 6, 1);
/// assert!(validate_date_of_birth_on("2007-06-01", 18, today).is_none());
/// assert!(validate_date_of_birth_on("2007-06-02", 18, today).is_some());
/// ```
pub fn validate_date_of_birth_on(value: &str, min_age: i16, today: Date) -> Option<String> {
    let Ok(born) = value.trim().parse::<Date>() else {
        return Some("Please enter a valid date of birth".to_string());
    };

    match born.until((Unit::Year, today)) {
        Ok(span) if span.get_years() >= min_age => None,
        Ok(_) => Some(format!("You must be at least {min_age} years old")),
        Err(_) => Some("Please enter a valid date of birth".to_string()),
    }
}

#[cfg(test)]
mod tests {
    use jiff::civil::date;

    use super::*;

    #[test]
    fn test_birthday_boundary() {
        let today = date(2026, 3, 15);
        assert!(validate_date_of_birth_on("2008-03-15", 18, today).is_none());
        assert_eq!(
            validate_date_of_birth_on("2008-03-16", 18, today).as_deref(),
            Some("You must be at least 18 years old")
        );
    }

    #[test]
    fn test_future_date_rejected() {
        let today = date(2026, 3, 15);
        assert!(validate_date_of_birth_on("2030-01-01", 18, today).is_some());
    }

    #[test]
    fn test_unparsable_date() {
        let today = date(2026, 3, 15);
        assert_eq!(
            validate_date_of_birth_on("15/03/1990", 18, today).as_deref(),
            Some("Please enter a valid date of birth")
        );
        assert!(validate_date_of_birth_on("", 18, today).is_some());
    }

    #[test]
    fn test_zero_minimum_accepts_any_past_date() {
        let today = date(2026, 3, 15);
        assert!(validate_date_of_birth_on("2026-03-15", 0, today).is_none());
    }
}
