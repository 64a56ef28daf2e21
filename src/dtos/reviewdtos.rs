use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::{
    dtos::empty_string_as_none,
    models::reviewmodel::{Grade, Review},
    service::{error::Violation, validation::first_violation},
};

#[derive(Validate, Debug, Clone, Serialize, Deserialize)]
pub struct SaveReviewDto {
    pub client_id: i64,
    pub property_id: i64,

    #[serde(default, deserialize_with = "empty_string_as_none")]
    #[validate(length(max = 1000, message = "Text nesmí být delší než 1000 znaků"))]
    pub positives: Option<String>,

    #[serde(default, deserialize_with = "empty_string_as_none")]
    #[validate(length(max = 1000, message = "Text nesmí být delší než 1000 znaků"))]
    pub negatives: Option<String>,

    #[validate(range(min = 1, max = 5, code = "choice", message = "Známka musí být v rozmezí 1 až 5"))]
    pub grade: i16,
}

impl SaveReviewDto {
    const FIELDS: &'static [&'static str] = &["positives", "negatives", "grade"];

    pub fn check(&self) -> Result<(), Violation> {
        self.validate().map_err(|e| first_violation(&e, Self::FIELDS))?;
        self.grade().map(|_| ())
    }

    pub fn grade(&self) -> Result<Grade, Violation> {
        Grade::try_from(self.grade).map_err(|message| Violation::Choice {
            field: "grade",
            message,
        })
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ReviewResponseDto {
    pub id: i64,
    pub client_id: i64,
    pub property_id: i64,
    pub positives: Option<String>,
    pub negatives: Option<String>,
    pub grade: Grade,
    pub grade_label: String,
    pub review_date: NaiveDate,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
}

impl ReviewResponseDto {
    pub fn from_review(review: &Review) -> Self {
        Self {
            id: review.id,
            client_id: review.client_id,
            property_id: review.property_id,
            positives: review.positives.clone(),
            negatives: review.negatives.clone(),
            grade: review.grade,
            grade_label: review.grade.label().to_string(),
            review_date: review.review_date,
            title: None,
        }
    }

    pub fn with_title(mut self, title: String) -> Self {
        self.title = Some(title);
        self
    }
}
