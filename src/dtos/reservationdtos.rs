use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::{
    dtos::trimmed_string,
    models::reservationmodel::ReservationListing,
    service::{
        error::Violation,
        validation::{check_stay_dates, first_violation},
    },
};

#[derive(Validate, Debug, Clone, Serialize, Deserialize)]
pub struct SaveReservationDto {
    pub client_id: i64,
    pub property_id: i64,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,

    #[validate(range(min = 1, max = 9, message = "Počet osob musí být v rozmezí 1 až 9"))]
    pub occupants: i32,

    #[serde(default, deserialize_with = "trimmed_string")]
    pub notes: String,
}

impl SaveReservationDto {
    const FIELDS: &'static [&'static str] = &["occupants"];

    /// Field rules first, then the date rules against `today`.
    pub fn check(&self, today: NaiveDate) -> Result<(), Violation> {
        self.validate().map_err(|e| first_violation(&e, Self::FIELDS))?;
        check_stay_dates(self.start_date, self.end_date, today)
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ReservationListingDto {
    pub id: i64,
    pub title: String,
    pub client_id: i64,
    pub client: String,
    pub property_id: i64,
    pub property: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub nights: i64,
    pub occupants: i32,
    pub notes: String,
}

impl ReservationListingDto {
    pub fn from_listing(listing: &ReservationListing) -> Self {
        Self {
            id: listing.id,
            title: listing.title(),
            client_id: listing.client_id,
            client: listing.client_display(),
            property_id: listing.property_id,
            property: listing.property_display(),
            start_date: listing.start_date,
            end_date: listing.end_date,
            nights: (listing.end_date - listing.start_date).num_days(),
            occupants: listing.occupants,
            notes: listing.notes.clone(),
        }
    }
}
