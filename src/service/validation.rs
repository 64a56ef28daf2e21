use chrono::{Local, NaiveDate};
use once_cell::sync::Lazy;
use regex::Regex;
use validator::{ValidationErrors, ValidationErrorsKind};

use crate::service::error::Violation;

/// International phone number, e.g. `+420 777 777 777`.
pub static PHONE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[+][0-9]{3}( [0-9]{3}){3}$").expect("phone pattern compiles"));

/// Czech postal code without the space, e.g. `11000`.
pub static POSTAL_CODE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[0-9]{5}$").expect("postal code pattern compiles"));

/// The date a save is judged against.
pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// Save-time reservation rule: the stay may not start before `today` and
/// must last at least one night.
pub fn check_stay_dates(
    start_date: NaiveDate,
    end_date: NaiveDate,
    today: NaiveDate,
) -> Result<(), Violation> {
    if start_date < today {
        return Err(Violation::StartInPast { start_date, today });
    }
    if end_date <= start_date {
        return Err(Violation::NonPositiveDuration { start_date, end_date });
    }
    Ok(())
}

/// Collapses derive-validation output into one [`Violation`]: the first
/// failing field in `field_order`, then any remaining field by name.
pub fn first_violation(errors: &ValidationErrors, field_order: &[&'static str]) -> Violation {
    let all = errors.errors();

    let mut remaining: Vec<&'static str> = all
        .keys()
        .copied()
        .filter(|field| !field_order.contains(field))
        .collect();
    remaining.sort_unstable();

    for field in field_order.iter().copied().chain(remaining) {
        if let Some(ValidationErrorsKind::Field(field_errors)) = all.get(field) {
            if let Some(error) = field_errors.first() {
                let message = error
                    .message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| format!("Neplatná hodnota pole {}", field));
                return violation_for_code(&error.code, field, message);
            }
        }
    }

    Violation::Format {
        field: "__all__",
        message: errors.to_string(),
    }
}

fn violation_for_code(code: &str, field: &'static str, message: String) -> Violation {
    match code {
        "required" => Violation::Required { field, message },
        "range" => Violation::Range { field, message },
        "length" => Violation::Length { field, message },
        "choice" => Violation::Choice { field, message },
        _ => Violation::Format { field, message },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use validator::ValidationError;

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_phone_pattern() {
        assert!(PHONE_RE.is_match("+420 777 777 777"));
        assert!(PHONE_RE.is_match("+421 123 456 789"));
        assert!(!PHONE_RE.is_match("420777777777"));
        assert!(!PHONE_RE.is_match("+420777777777"));
        assert!(!PHONE_RE.is_match("+420 777 777 77"));
        assert!(!PHONE_RE.is_match("+420 777 777 777 "));
        assert!(!PHONE_RE.is_match("+42 0777 777 777"));
    }

    #[test]
    fn test_postal_code_pattern() {
        assert!(POSTAL_CODE_RE.is_match("12345"));
        assert!(POSTAL_CODE_RE.is_match("01001"));
        assert!(!POSTAL_CODE_RE.is_match("1234"));
        assert!(!POSTAL_CODE_RE.is_match("123456"));
        assert!(!POSTAL_CODE_RE.is_match("ABCDE"));
        assert!(!POSTAL_CODE_RE.is_match("123 45"));
    }

    #[test]
    fn test_start_today_is_accepted() {
        let today = day(2030, 5, 10);
        assert_eq!(check_stay_dates(today, day(2030, 5, 11), today), Ok(()));
    }

    #[test]
    fn test_start_in_past_is_rejected() {
        let today = day(2030, 5, 10);
        let result = check_stay_dates(day(2030, 5, 9), day(2030, 5, 12), today);
        assert!(matches!(result, Err(Violation::StartInPast { .. })));
    }

    #[test]
    fn test_end_must_follow_start() {
        let today = day(2030, 5, 10);
        let same_day = check_stay_dates(day(2030, 5, 12), day(2030, 5, 12), today);
        assert!(matches!(same_day, Err(Violation::NonPositiveDuration { .. })));

        let backwards = check_stay_dates(day(2030, 5, 12), day(2030, 5, 11), today);
        assert!(matches!(backwards, Err(Violation::NonPositiveDuration { .. })));
    }

    #[test]
    fn test_past_start_reported_before_duration() {
        let today = day(2030, 5, 10);
        let result = check_stay_dates(day(2030, 5, 1), day(2030, 4, 1), today);
        assert!(matches!(result, Err(Violation::StartInPast { .. })));
    }

    #[test]
    fn test_first_violation_follows_field_order() {
        let mut errors = ValidationErrors::new();
        let mut phone = ValidationError::new("regex");
        phone.message = Some("bad phone".into());
        errors.add("phone", phone);
        let mut email = ValidationError::new("required");
        email.message = Some("email missing".into());
        errors.add("email", email);

        let violation = first_violation(&errors, &["email", "phone"]);
        assert_eq!(
            violation,
            Violation::Required { field: "email", message: "email missing".to_string() }
        );

        let violation = first_violation(&errors, &["phone", "email"]);
        assert_eq!(
            violation,
            Violation::Format { field: "phone", message: "bad phone".to_string() }
        );
    }

    #[test]
    fn test_validator_codes_map_to_kinds() {
        let mut errors = ValidationErrors::new();
        errors.add("occupants", ValidationError::new("range"));
        assert!(matches!(first_violation(&errors, &[]), Violation::Range { field: "occupants", .. }));

        let mut errors = ValidationErrors::new();
        errors.add("caption", ValidationError::new("length"));
        assert!(matches!(first_violation(&errors, &[]), Violation::Length { field: "caption", .. }));

        let mut errors = ValidationErrors::new();
        errors.add("email", ValidationError::new("email"));
        assert!(matches!(first_violation(&errors, &[]), Violation::Format { field: "email", .. }));
    }
}
