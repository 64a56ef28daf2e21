use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::models::{clientmodel::Client, propertymodel::Property};

/// School-style grade, 1 is best.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, sqlx::Type, PartialEq, Eq, PartialOrd, Ord)]
#[serde(try_from = "i16", into = "i16")]
#[repr(i16)]
pub enum Grade {
    Excellent = 1,
    Commendable = 2,
    Good = 3,
    Sufficient = 4,
    Insufficient = 5,
}

impl Grade {
    pub const ALL: [Grade; 5] = [
        Grade::Excellent,
        Grade::Commendable,
        Grade::Good,
        Grade::Sufficient,
        Grade::Insufficient,
    ];

    pub fn value(self) -> i16 {
        self as i16
    }

    pub fn label(self) -> &'static str {
        match self {
            Grade::Excellent => "výborné",
            Grade::Commendable => "chvalitebné",
            Grade::Good => "dobré",
            Grade::Sufficient => "dostatečné",
            Grade::Insufficient => "nedostatečné",
        }
    }
}

impl TryFrom<i16> for Grade {
    type Error = String;

    fn try_from(value: i16) -> Result<Self, Self::Error> {
        Grade::ALL
            .into_iter()
            .find(|grade| grade.value() == value)
            .ok_or_else(|| format!("Neplatná známka: {}", value))
    }
}

impl From<Grade> for i16 {
    fn from(grade: Grade) -> Self {
        grade.value()
    }
}

impl fmt::Display for Grade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.value())
    }
}

#[derive(Debug, Serialize, Deserialize, FromRow, Clone, PartialEq)]
pub struct Review {
    pub id: i64,
    pub client_id: i64,
    pub property_id: i64,
    pub positives: Option<String>,
    pub negatives: Option<String>,
    pub grade: Grade,
    pub review_date: NaiveDate,
}

impl Review {
    /// `Property: grade, (Client, date)`
    pub fn title(&self, client: &Client, property: &Property) -> String {
        format!("{}: {}, ({}, {})", property, self.grade, client, self.review_date)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grade_from_value() {
        assert_eq!(Grade::try_from(1), Ok(Grade::Excellent));
        assert_eq!(Grade::try_from(5), Ok(Grade::Insufficient));
        assert!(Grade::try_from(0).is_err());
        assert!(Grade::try_from(6).is_err());
    }

    #[test]
    fn test_grade_labels() {
        assert_eq!(Grade::Excellent.label(), "výborné");
        assert_eq!(Grade::Good.label(), "dobré");
        assert_eq!(Grade::Insufficient.label(), "nedostatečné");
    }

    #[test]
    fn test_grade_serializes_as_number() {
        assert_eq!(serde_json::to_value(Grade::Commendable).unwrap(), serde_json::json!(2));
        let grade: Grade = serde_json::from_value(serde_json::json!(4)).unwrap();
        assert_eq!(grade, Grade::Sufficient);
        assert!(serde_json::from_value::<Grade>(serde_json::json!(7)).is_err());
    }

    #[test]
    fn test_review_title() {
        let client = Client {
            id: 1,
            first_name: "Jan".to_string(),
            last_name: "Novák".to_string(),
            email: "jan@example.cz".to_string(),
            phone: None,
        };
        let property = Property {
            id: 2,
            label: "Chata".to_string(),
            address: "U Lesa 1".to_string(),
            city: "Tábor".to_string(),
            postal_code: "39001".to_string(),
            contact: "Eva Malá".to_string(),
            phone: "+420 777 777 777".to_string(),
            email: "chata@example.cz".to_string(),
            description: String::new(),
            rooms: 3,
        };
        let review = Review {
            id: 3,
            client_id: 1,
            property_id: 2,
            positives: None,
            negatives: None,
            grade: Grade::Good,
            review_date: NaiveDate::from_ymd_opt(2030, 6, 1).unwrap(),
        };
        assert_eq!(
            review.title(&client, &property),
            "Chata (Tábor, U Lesa 1): 3, (Novák, Jan, 2030-06-01)"
        );
    }
}
