use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::{
    dtos::trimmed_string,
    models::photomodel::Photo,
    service::{error::Violation, validation::first_violation},
    utils::image_utils::{gallery_path, image_path_fits, media_url, IMAGE_PATH_MAX_CHARS},
};

#[derive(Validate, Debug, Default, Clone, Serialize, Deserialize)]
pub struct SavePhotoDto {
    pub property_id: i64,

    /// Original filename of the upload.
    #[serde(deserialize_with = "trimmed_string")]
    #[validate(length(min = 1, code = "required", message = "Fotografie musí být vybrána"))]
    pub filename: String,

    #[serde(deserialize_with = "trimmed_string")]
    #[validate(
        length(min = 1, code = "required", message = "Popis fotky musí být vyplněn"),
        length(max = 200, message = "Popis fotky může mít nejvýše 200 znaků")
    )]
    pub caption: String,
}

impl SavePhotoDto {
    const FIELDS: &'static [&'static str] = &["filename", "caption"];

    pub fn check(&self) -> Result<(), Violation> {
        self.validate().map_err(|e| first_violation(&e, Self::FIELDS))?;
        self.image_path().map(|_| ())
    }

    pub fn image_path(&self) -> Result<String, Violation> {
        let path = gallery_path(self.property_id, &self.filename).ok_or_else(|| {
            Violation::Required {
                field: "filename",
                message: "Fotografie musí být vybrána".to_string(),
            }
        })?;
        if !image_path_fits(&path) {
            return Err(Violation::Length {
                field: "filename",
                message: format!(
                    "Cesta k fotografii může mít nejvýše {} znaků",
                    IMAGE_PATH_MAX_CHARS
                ),
            });
        }
        Ok(path)
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct PhotoResponseDto {
    pub id: i64,
    pub property_id: Option<i64>,
    pub caption: String,
    pub image: String,
    pub image_url: String,
}

impl PhotoResponseDto {
    pub fn from_photo(photo: &Photo, media_prefix: &str) -> Self {
        Self {
            id: photo.id,
            property_id: photo.property_id,
            caption: photo.caption.clone(),
            image: photo.image.clone(),
            image_url: media_url(media_prefix, &photo.image),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_image_path_uses_property_id() {
        let dto = SavePhotoDto {
            property_id: 9,
            filename: "terasa.jpg".to_string(),
            caption: "Terasa".to_string(),
        };
        assert_eq!(dto.check(), Ok(()));
        assert_eq!(dto.image_path().unwrap(), "fotogalerie/9/terasa.jpg");
    }

    #[test]
    fn test_caption_limit() {
        let dto = SavePhotoDto {
            property_id: 9,
            filename: "terasa.jpg".to_string(),
            caption: "á".repeat(201),
        };
        assert!(matches!(dto.check(), Err(Violation::Length { field: "caption", .. })));

        let dto = SavePhotoDto { caption: "á".repeat(200), ..dto };
        assert_eq!(dto.check(), Ok(()));
    }

    #[test]
    fn test_image_path_length() {
        // "fotogalerie/9/" is 14 characters.
        let dto = SavePhotoDto {
            property_id: 9,
            filename: "f".repeat(86),
            caption: "Terasa".to_string(),
        };
        assert_eq!(dto.check(), Ok(()));

        let dto = SavePhotoDto { filename: "f".repeat(87), ..dto };
        assert!(matches!(dto.check(), Err(Violation::Length { field: "filename", .. })));
    }

    #[test]
    fn test_blank_caption_is_required() {
        let dto: SavePhotoDto = serde_json::from_value(serde_json::json!({
            "property_id": 9,
            "filename": "terasa.jpg",
            "caption": " \t "
        }))
        .unwrap();
        let violation = dto.check().unwrap_err();
        assert!(matches!(violation, Violation::Required { field: "caption", .. }));
        assert_eq!(violation.to_string(), "Popis fotky musí být vyplněn");
    }
}
