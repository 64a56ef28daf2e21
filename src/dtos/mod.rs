pub mod clientdtos;
pub mod equipmentdtos;
pub mod photodtos;
pub mod propertydtos;
pub mod reservationdtos;
pub mod reviewdtos;

use serde::{Deserialize, Deserializer};

/// Form input with surrounding whitespace removed, so a blank value fails
/// the `required` rule.
pub fn trimmed_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = String::deserialize(deserializer)?;
    Ok(value.trim().to_string())
}

/// Blank form input means "not supplied".
pub fn empty_string_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<String>::deserialize(deserializer)?;
    Ok(value
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Deserialize)]
    struct Form {
        #[serde(deserialize_with = "trimmed_string")]
        name: String,
        #[serde(default, deserialize_with = "empty_string_as_none")]
        note: Option<String>,
    }

    #[test]
    fn test_inputs_are_trimmed() {
        let form: Form =
            serde_json::from_value(serde_json::json!({ "name": "  Jan ", "note": " ahoj\n" })).unwrap();
        assert_eq!(form.name, "Jan");
        assert_eq!(form.note.as_deref(), Some("ahoj"));
    }

    #[test]
    fn test_blank_inputs() {
        let form: Form =
            serde_json::from_value(serde_json::json!({ "name": "   ", "note": "  " })).unwrap();
        assert_eq!(form.name, "");
        assert_eq!(form.note, None);

        let form: Form = serde_json::from_value(serde_json::json!({ "name": "x" })).unwrap();
        assert_eq!(form.note, None);
    }
}
