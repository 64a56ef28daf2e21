use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::{
    dtos::{equipmentdtos::EquipmentResponseDto, trimmed_string},
    models::propertymodel::Property,
    service::{
        error::Violation,
        validation::{first_violation, PHONE_RE, POSTAL_CODE_RE},
    },
};

#[derive(Validate, Debug, Default, Clone, Serialize, Deserialize)]
pub struct SavePropertyDto {
    #[serde(deserialize_with = "trimmed_string")]
    #[validate(
        length(min = 1, code = "required", message = "Označení ubytování musí být vyplněno"),
        length(max = 100, message = "Označení ubytování může mít nejvýše 100 znaků")
    )]
    pub label: String,

    #[serde(deserialize_with = "trimmed_string")]
    #[validate(
        length(min = 1, code = "required", message = "Adresa musí být vyplněna"),
        length(max = 100, message = "Adresa může mít nejvýše 100 znaků")
    )]
    pub address: String,

    #[serde(deserialize_with = "trimmed_string")]
    #[validate(
        length(min = 1, code = "required", message = "Město/obec musí být vyplněno"),
        length(max = 50, message = "Město/obec může mít nejvýše 50 znaků")
    )]
    pub city: String,

    #[serde(deserialize_with = "trimmed_string")]
    #[validate(regex(path = "POSTAL_CODE_RE", message = "Nesprávně zadané poštovní směrovací číslo"))]
    pub postal_code: String,

    #[serde(deserialize_with = "trimmed_string")]
    #[validate(
        length(min = 1, code = "required", message = "Kontaktní osoba musí být vyplněna"),
        length(max = 50, message = "Kontaktní osoba může mít nejvýše 50 znaků")
    )]
    pub contact: String,

    #[serde(deserialize_with = "trimmed_string")]
    #[validate(
        length(min = 1, code = "required", message = "Telefonní číslo musí být vyplněno"),
        length(max = 16, message = "Telefon může mít nejvýše 16 znaků"),
        regex(path = "PHONE_RE", message = "Nesprávně zadané telefonní číslo")
    )]
    pub phone: String,

    #[serde(deserialize_with = "trimmed_string")]
    #[validate(
        length(min = 1, code = "required", message = "Pole nesmí být prázdné"),
        length(max = 254, message = "E-mailová adresa může mít nejvýše 254 znaků"),
        email(message = "Neplatná e-mailová adresa")
    )]
    pub email: String,

    #[serde(deserialize_with = "trimmed_string")]
    #[validate(length(min = 1, code = "required", message = "Popis ubytování musí být vyplněn"))]
    pub description: String,

    // Zero rooms passes; only the small-integer bounds are enforced.
    #[validate(range(min = 0, max = 32767, message = "Počet pokojů musí být nezáporné celé číslo"))]
    pub rooms: i32,

    #[serde(default)]
    pub equipment: Vec<i64>,
}

impl SavePropertyDto {
    const FIELDS: &'static [&'static str] = &[
        "label",
        "address",
        "city",
        "postal_code",
        "contact",
        "phone",
        "email",
        "description",
        "rooms",
    ];

    pub fn check(&self) -> Result<(), Violation> {
        self.validate().map_err(|e| first_violation(&e, Self::FIELDS))
    }

    /// Equipment ids without duplicates, in first-seen order.
    pub fn equipment_ids(&self) -> Vec<i64> {
        let mut ids = Vec::with_capacity(self.equipment.len());
        for id in &self.equipment {
            if !ids.contains(id) {
                ids.push(*id);
            }
        }
        ids
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct PropertyFilterDto {
    pub id: i64,
    pub title: String,
    pub label: String,
    pub address: String,
    pub city: String,
    pub postal_code: String,
    pub contact: String,
    pub phone: String,
    pub email: String,
    pub description: String,
    pub rooms: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub equipment: Option<Vec<EquipmentResponseDto>>,
}

impl PropertyFilterDto {
    pub fn from_property(property: &Property) -> Self {
        Self {
            id: property.id,
            title: property.to_string(),
            label: property.label.clone(),
            address: property.address.clone(),
            city: property.city.clone(),
            postal_code: property.postal_code.clone(),
            contact: property.contact.clone(),
            phone: property.phone.clone(),
            email: property.email.clone(),
            description: property.description.clone(),
            rooms: property.rooms,
            equipment: None,
        }
    }

    pub fn with_equipment(mut self, equipment: Vec<EquipmentResponseDto>) -> Self {
        self.equipment = Some(equipment);
        self
    }
}
