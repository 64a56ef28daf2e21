use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::{
    dtos::trimmed_string,
    models::equipmentmodel::Equipment,
    service::{error::Violation, validation::first_violation},
    utils::image_utils::{image_path_fits, media_url, symbol_path, IMAGE_PATH_MAX_CHARS},
};

#[derive(Validate, Debug, Default, Clone, Serialize, Deserialize)]
pub struct SaveEquipmentDto {
    #[serde(deserialize_with = "trimmed_string")]
    #[validate(
        length(min = 1, code = "required", message = "Název vybavení musí být vyplněn"),
        length(max = 30, message = "Název vybavení může mít nejvýše 30 znaků")
    )]
    pub name: String,

    /// Original filename of the uploaded icon.
    #[serde(deserialize_with = "trimmed_string")]
    #[validate(length(min = 1, code = "required", message = "Grafický symbol musí být vybrán"))]
    pub symbol: String,
}

impl SaveEquipmentDto {
    const FIELDS: &'static [&'static str] = &["name", "symbol"];

    pub fn check(&self) -> Result<(), Violation> {
        self.validate().map_err(|e| first_violation(&e, Self::FIELDS))?;
        self.symbol_path().map(|_| ())
    }

    /// Stored icon path under the symbols root.
    pub fn symbol_path(&self) -> Result<String, Violation> {
        let path = symbol_path(&self.symbol).ok_or_else(|| Violation::Required {
            field: "symbol",
            message: "Grafický symbol musí být vybrán".to_string(),
        })?;
        if !image_path_fits(&path) {
            return Err(Violation::Length {
                field: "symbol",
                message: format!(
                    "Cesta k symbolu může mít nejvýše {} znaků",
                    IMAGE_PATH_MAX_CHARS
                ),
            });
        }
        Ok(path)
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct EquipmentResponseDto {
    pub id: i64,
    pub name: String,
    pub symbol: String,
    pub symbol_url: String,
}

impl EquipmentResponseDto {
    pub fn from_equipment(equipment: &Equipment, media_prefix: &str) -> Self {
        Self {
            id: equipment.id,
            name: equipment.name.clone(),
            symbol: equipment.symbol.clone(),
            symbol_url: media_url(media_prefix, &equipment.symbol),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_symbol_path_is_derived() {
        let dto = SaveEquipmentDto { name: "Wi-Fi".to_string(), symbol: "wifi.svg".to_string() };
        assert_eq!(dto.check(), Ok(()));
        assert_eq!(dto.symbol_path().unwrap(), "symbols/wifi.svg");
    }

    #[test]
    fn test_name_length() {
        let dto = SaveEquipmentDto { name: "x".repeat(31), symbol: "wifi.svg".to_string() };
        assert!(matches!(dto.check(), Err(Violation::Length { field: "name", .. })));
    }

    #[test]
    fn test_symbol_path_length() {
        let dto = SaveEquipmentDto { name: "Wi-Fi".to_string(), symbol: "s".repeat(304) };
        let violation = dto.check().unwrap_err();
        assert!(matches!(violation, Violation::Length { field: "symbol", .. }));
        assert_eq!(violation.to_string(), "Cesta k symbolu může mít nejvýše 100 znaků");

        let dto = SaveEquipmentDto { symbol: "s".repeat(92), ..dto };
        assert_eq!(dto.check(), Ok(()));
    }

    #[test]
    fn test_blank_fields_are_required() {
        let dto: SaveEquipmentDto =
            serde_json::from_value(serde_json::json!({ "name": "   ", "symbol": " wifi.svg " }))
                .unwrap();
        assert_eq!(dto.symbol, "wifi.svg");
        assert!(matches!(dto.check(), Err(Violation::Required { field: "name", .. })));
    }

    #[test]
    fn test_unusable_symbol_filename() {
        let dto = SaveEquipmentDto { name: "Wi-Fi".to_string(), symbol: "..".to_string() };
        assert!(matches!(dto.check(), Err(Violation::Required { field: "symbol", .. })));
    }
}
