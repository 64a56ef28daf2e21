use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::{
    dtos::{empty_string_as_none, trimmed_string},
    service::{
        error::Violation,
        validation::{first_violation, PHONE_RE},
    },
};

#[derive(Validate, Debug, Default, Clone, Serialize, Deserialize)]
pub struct SaveClientDto {
    #[serde(deserialize_with = "trimmed_string")]
    #[validate(
        length(min = 1, code = "required", message = "Jméno klienta musí být vyplněno"),
        length(max = 50, message = "Jméno klienta může mít nejvýše 50 znaků")
    )]
    pub first_name: String,

    #[serde(deserialize_with = "trimmed_string")]
    #[validate(
        length(min = 1, code = "required", message = "Příjmení klienta musí být vyplněno"),
        length(max = 50, message = "Příjmení klienta může mít nejvýše 50 znaků")
    )]
    pub last_name: String,

    #[serde(deserialize_with = "trimmed_string")]
    #[validate(
        length(min = 1, code = "required", message = "Pole nesmí být prázdné"),
        length(max = 254, message = "E-mailová adresa může mít nejvýše 254 znaků"),
        email(message = "Neplatná e-mailová adresa")
    )]
    pub email: String,

    #[serde(default, deserialize_with = "empty_string_as_none")]
    #[validate(
        length(max = 16, message = "Telefon může mít nejvýše 16 znaků"),
        regex(path = "PHONE_RE", message = "Nesprávně zadané telefonní číslo")
    )]
    pub phone: Option<String>,
}

impl SaveClientDto {
    const FIELDS: &'static [&'static str] = &["first_name", "last_name", "email", "phone"];

    pub fn check(&self) -> Result<(), Violation> {
        self.validate().map_err(|e| first_violation(&e, Self::FIELDS))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client() -> SaveClientDto {
        SaveClientDto {
            first_name: "Jan".to_string(),
            last_name: "Novák".to_string(),
            email: "jan.novak@example.cz".to_string(),
            phone: Some("+420 777 777 777".to_string()),
        }
    }

    #[test]
    fn test_valid_client() {
        assert_eq!(client().check(), Ok(()));
        assert_eq!(SaveClientDto { phone: None, ..client() }.check(), Ok(()));
    }

    #[test]
    fn test_phone_format() {
        let dto = SaveClientDto { phone: Some("420777777777".to_string()), ..client() };
        assert!(matches!(dto.check(), Err(Violation::Format { field: "phone", .. })));
    }

    #[test]
    fn test_email_format() {
        let dto = SaveClientDto { email: "not-an-email".to_string(), ..client() };
        assert!(matches!(dto.check(), Err(Violation::Format { field: "email", .. })));
    }

    #[test]
    fn test_required_names() {
        let dto = SaveClientDto { first_name: String::new(), ..client() };
        let violation = dto.check().unwrap_err();
        assert!(matches!(violation, Violation::Required { field: "first_name", .. }));
        assert_eq!(violation.to_string(), "Jméno klienta musí být vyplněno");
    }

    #[test]
    fn test_blank_names_are_required() {
        let dto: SaveClientDto = serde_json::from_value(serde_json::json!({
            "first_name": "   ",
            "last_name": "Novák",
            "email": "jan@example.cz"
        }))
        .unwrap();
        let violation = dto.check().unwrap_err();
        assert!(matches!(violation, Violation::Required { field: "first_name", .. }));
        assert_eq!(violation.to_string(), "Jméno klienta musí být vyplněno");
    }

    #[test]
    fn test_padded_phone_is_accepted() {
        let dto: SaveClientDto = serde_json::from_value(serde_json::json!({
            "first_name": " Jan",
            "last_name": "Novák ",
            "email": " jan@example.cz ",
            "phone": "+420 777 777 777 "
        }))
        .unwrap();
        assert_eq!(dto.phone.as_deref(), Some("+420 777 777 777"));
        assert_eq!(dto.email, "jan@example.cz");
        assert_eq!(dto.check(), Ok(()));
    }

    fn long_email(len: usize) -> String {
        let domain = format!("{}.{}.{}.cz", "b".repeat(63), "c".repeat(63), "d".repeat(63));
        let local = "a".repeat(len - domain.len() - 1);
        format!("{}@{}", local, domain)
    }

    #[test]
    fn test_email_length() {
        let dto = SaveClientDto { email: long_email(254), ..client() };
        assert_eq!(dto.check(), Ok(()));

        let dto = SaveClientDto { email: long_email(255), ..client() };
        assert!(matches!(dto.check(), Err(Violation::Length { field: "email", .. })));
    }

    #[test]
    fn test_blank_phone_is_absent() {
        let dto: SaveClientDto = serde_json::from_value(serde_json::json!({
            "first_name": "Jan",
            "last_name": "Novák",
            "email": "jan@example.cz",
            "phone": ""
        }))
        .unwrap();
        assert_eq!(dto.phone, None);
        assert_eq!(dto.check(), Ok(()));
    }
}
