use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::models::{clientmodel::Client, propertymodel::Property};

#[derive(Debug, Serialize, Deserialize, FromRow, Clone, PartialEq)]
pub struct Reservation {
    pub id: i64,
    pub client_id: i64,
    pub property_id: i64,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub occupants: i32,
    pub notes: String,
}

impl Reservation {
    pub fn nights(&self) -> i64 {
        (self.end_date - self.start_date).num_days()
    }
}

/// A reservation joined with the client and property columns the list and
/// detail views render.
#[derive(Debug, Serialize, Deserialize, FromRow, Clone, PartialEq)]
pub struct ReservationListing {
    pub id: i64,
    pub client_id: i64,
    pub property_id: i64,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub occupants: i32,
    pub notes: String,
    pub client_first_name: String,
    pub client_last_name: String,
    pub property_label: String,
    pub property_city: String,
    pub property_address: String,
}

impl ReservationListing {
    pub fn from_parts(reservation: &Reservation, client: &Client, property: &Property) -> Self {
        Self {
            id: reservation.id,
            client_id: reservation.client_id,
            property_id: reservation.property_id,
            start_date: reservation.start_date,
            end_date: reservation.end_date,
            occupants: reservation.occupants,
            notes: reservation.notes.clone(),
            client_first_name: client.first_name.clone(),
            client_last_name: client.last_name.clone(),
            property_label: property.label.clone(),
            property_city: property.city.clone(),
            property_address: property.address.clone(),
        }
    }

    pub fn client_display(&self) -> String {
        format!("{}, {}", self.client_last_name, self.client_first_name)
    }

    pub fn property_display(&self) -> String {
        format!("{} ({}, {})", self.property_label, self.property_city, self.property_address)
    }

    pub fn title(&self) -> String {
        format!("{}: {}", self.client_display(), self.property_display())
    }
}
