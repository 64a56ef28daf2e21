// db/memory.rs
use std::collections::{BTreeMap, BTreeSet};

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::{
    db::{
        clientdb::ClientExt, db::Store, equipmentdb::EquipmentExt, photodb::PhotoExt,
        propertydb::PropertyExt, reservationdb::ReservationExt, reviewdb::ReviewExt,
    },
    dtos::{
        clientdtos::SaveClientDto, equipmentdtos::SaveEquipmentDto, photodtos::SavePhotoDto,
        propertydtos::SavePropertyDto, reservationdtos::SaveReservationDto,
        reviewdtos::SaveReviewDto,
    },
    models::{
        clientmodel::Client,
        equipmentmodel::Equipment,
        photomodel::Photo,
        propertymodel::{DeleteSummary, Property},
        reservationmodel::{Reservation, ReservationListing},
        reviewmodel::Review,
    },
    service::{
        error::{ServiceError, Violation},
        validation::today,
    },
};

#[derive(Debug)]
struct Table<T> {
    rows: BTreeMap<i64, T>,
    last_id: i64,
}

impl<T> Default for Table<T> {
    fn default() -> Self {
        Table {
            rows: BTreeMap::new(),
            last_id: 0,
        }
    }
}

impl<T> Table<T> {
    fn next_id(&mut self) -> i64 {
        self.last_id += 1;
        self.last_id
    }

    fn require(&self, entity: &'static str, id: i64) -> Result<&T, ServiceError> {
        self.rows.get(&id).ok_or_else(|| ServiceError::not_found(entity, id))
    }

    fn require_mut(&mut self, entity: &'static str, id: i64) -> Result<&mut T, ServiceError> {
        self.rows.get_mut(&id).ok_or_else(|| ServiceError::not_found(entity, id))
    }
}

#[derive(Debug, Default)]
struct Tables {
    clients: Table<Client>,
    equipment: Table<Equipment>,
    properties: Table<Property>,
    property_equipment: BTreeSet<(i64, i64)>,
    photos: Table<Photo>,
    reservations: Table<Reservation>,
    reviews: Table<Review>,
}

impl Tables {
    fn client_email_taken(&self, email: &str, except: Option<i64>) -> bool {
        self.clients
            .rows
            .values()
            .any(|c| c.email == email && Some(c.id) != except)
    }

    fn property_email_taken(&self, email: &str, except: Option<i64>) -> bool {
        self.properties
            .rows
            .values()
            .any(|p| p.email == email && Some(p.id) != except)
    }

    fn require_equipment(&self, ids: &[i64]) -> Result<(), ServiceError> {
        for id in ids {
            self.equipment.require("equipment", *id)?;
        }
        Ok(())
    }

    fn replace_equipment(&mut self, property_id: i64, ids: &[i64]) {
        self.property_equipment.retain(|(p, _)| *p != property_id);
        self.property_equipment
            .extend(ids.iter().map(|equipment_id| (property_id, *equipment_id)));
    }

    fn client_sort_key(&self, client_id: i64) -> (String, String, i64) {
        self.clients
            .rows
            .get(&client_id)
            .map(|c| (c.last_name.clone(), c.first_name.clone(), c.id))
            .unwrap_or_default()
    }

    fn property_sort_key(&self, property_id: i64) -> (String, i64) {
        self.properties
            .rows
            .get(&property_id)
            .map(|p| (p.label.clone(), p.id))
            .unwrap_or_default()
    }

    fn listing(&self, reservation: &Reservation) -> Option<ReservationListing> {
        let client = self.clients.rows.get(&reservation.client_id)?;
        let property = self.properties.rows.get(&reservation.property_id)?;
        Some(ReservationListing::from_parts(reservation, client, property))
    }

    fn require_parties(&self, client_id: i64, property_id: i64) -> Result<(), ServiceError> {
        self.clients.require("client", client_id)?;
        self.properties.require("property", property_id)?;
        Ok(())
    }
}

/// Process-local store with the same contract as the PostgreSQL client.
/// Every write holds the lock for its whole duration, so a rejected save
/// leaves no trace.
#[derive(Debug, Default)]
pub struct MemoryStore {
    tables: RwLock<Tables>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Store for MemoryStore {
    fn backend(&self) -> &'static str {
        "memory"
    }
}

#[async_trait]
impl ClientExt for MemoryStore {
    async fn create_client(&self, data: SaveClientDto) -> Result<Client, ServiceError> {
        data.check()?;
        let mut tables = self.tables.write().await;

        if tables.client_email_taken(&data.email, None) {
            return Err(Violation::duplicate_email().into());
        }

        let client = Client {
            id: tables.clients.next_id(),
            first_name: data.first_name,
            last_name: data.last_name,
            email: data.email,
            phone: data.phone,
        };
        tables.clients.rows.insert(client.id, client.clone());
        Ok(client)
    }

    async fn update_client(&self, client_id: i64, data: SaveClientDto) -> Result<Client, ServiceError> {
        data.check()?;
        let mut tables = self.tables.write().await;

        tables.clients.require("client", client_id)?;
        if tables.client_email_taken(&data.email, Some(client_id)) {
            return Err(Violation::duplicate_email().into());
        }

        let client = tables.clients.require_mut("client", client_id)?;
        client.first_name = data.first_name;
        client.last_name = data.last_name;
        client.email = data.email;
        client.phone = data.phone;
        Ok(client.clone())
    }

    async fn get_client(&self, client_id: i64) -> Result<Option<Client>, ServiceError> {
        Ok(self.tables.read().await.clients.rows.get(&client_id).cloned())
    }

    async fn list_clients(&self) -> Result<Vec<Client>, ServiceError> {
        let tables = self.tables.read().await;
        let mut clients: Vec<Client> = tables.clients.rows.values().cloned().collect();
        clients.sort_by(|a, b| {
            (&a.last_name, &a.first_name, a.id).cmp(&(&b.last_name, &b.first_name, b.id))
        });
        Ok(clients)
    }

    async fn delete_client(&self, client_id: i64) -> Result<(), ServiceError> {
        let mut tables = self.tables.write().await;
        tables.clients.require("client", client_id)?;

        tables.reservations.rows.retain(|_, r| r.client_id != client_id);
        tables.reviews.rows.retain(|_, r| r.client_id != client_id);
        tables.clients.rows.remove(&client_id);
        Ok(())
    }
}

#[async_trait]
impl EquipmentExt for MemoryStore {
    async fn create_equipment(&self, data: SaveEquipmentDto) -> Result<Equipment, ServiceError> {
        data.check()?;
        let symbol = data.symbol_path()?;
        let mut tables = self.tables.write().await;

        let equipment = Equipment {
            id: tables.equipment.next_id(),
            name: data.name,
            symbol,
        };
        tables.equipment.rows.insert(equipment.id, equipment.clone());
        Ok(equipment)
    }

    async fn update_equipment(
        &self,
        equipment_id: i64,
        data: SaveEquipmentDto,
    ) -> Result<Equipment, ServiceError> {
        data.check()?;
        let symbol = data.symbol_path()?;
        let mut tables = self.tables.write().await;

        let equipment = tables.equipment.require_mut("equipment", equipment_id)?;
        equipment.name = data.name;
        equipment.symbol = symbol;
        Ok(equipment.clone())
    }

    async fn get_equipment(&self, equipment_id: i64) -> Result<Option<Equipment>, ServiceError> {
        Ok(self.tables.read().await.equipment.rows.get(&equipment_id).cloned())
    }

    async fn list_equipment(&self) -> Result<Vec<Equipment>, ServiceError> {
        let tables = self.tables.read().await;
        let mut equipment: Vec<Equipment> = tables.equipment.rows.values().cloned().collect();
        equipment.sort_by(|a, b| (&a.name, a.id).cmp(&(&b.name, b.id)));
        Ok(equipment)
    }

    async fn delete_equipment(&self, equipment_id: i64) -> Result<(), ServiceError> {
        let mut tables = self.tables.write().await;
        tables.equipment.require("equipment", equipment_id)?;

        tables.property_equipment.retain(|(_, e)| *e != equipment_id);
        tables.equipment.rows.remove(&equipment_id);
        Ok(())
    }
}

#[async_trait]
impl PropertyExt for MemoryStore {
    async fn create_property(&self, data: SavePropertyDto) -> Result<Property, ServiceError> {
        data.check()?;
        let equipment_ids = data.equipment_ids();
        let mut tables = self.tables.write().await;

        if tables.property_email_taken(&data.email, None) {
            return Err(Violation::duplicate_email().into());
        }
        tables.require_equipment(&equipment_ids)?;

        let property = Property {
            id: tables.properties.next_id(),
            label: data.label,
            address: data.address,
            city: data.city,
            postal_code: data.postal_code,
            contact: data.contact,
            phone: data.phone,
            email: data.email,
            description: data.description,
            rooms: data.rooms,
        };
        tables.properties.rows.insert(property.id, property.clone());
        tables.replace_equipment(property.id, &equipment_ids);
        Ok(property)
    }

    async fn update_property(
        &self,
        property_id: i64,
        data: SavePropertyDto,
    ) -> Result<Property, ServiceError> {
        data.check()?;
        let equipment_ids = data.equipment_ids();
        let mut tables = self.tables.write().await;

        tables.properties.require("property", property_id)?;
        if tables.property_email_taken(&data.email, Some(property_id)) {
            return Err(Violation::duplicate_email().into());
        }
        tables.require_equipment(&equipment_ids)?;

        let property = tables.properties.require_mut("property", property_id)?;
        property.label = data.label;
        property.address = data.address;
        property.city = data.city;
        property.postal_code = data.postal_code;
        property.contact = data.contact;
        property.phone = data.phone;
        property.email = data.email;
        property.description = data.description;
        property.rooms = data.rooms;
        let property = property.clone();

        tables.replace_equipment(property_id, &equipment_ids);
        Ok(property)
    }

    async fn get_property(&self, property_id: i64) -> Result<Option<Property>, ServiceError> {
        Ok(self.tables.read().await.properties.rows.get(&property_id).cloned())
    }

    async fn list_properties(&self) -> Result<Vec<Property>, ServiceError> {
        let tables = self.tables.read().await;
        let mut properties: Vec<Property> = tables.properties.rows.values().cloned().collect();
        properties.sort_by(|a, b| (&a.label, a.id).cmp(&(&b.label, b.id)));
        Ok(properties)
    }

    async fn list_properties_with_rooms_over(&self, rooms: i32) -> Result<Vec<Property>, ServiceError> {
        let mut properties = self.list_properties().await?;
        properties.retain(|p| p.rooms > rooms);
        Ok(properties)
    }

    async fn property_equipment(&self, property_id: i64) -> Result<Vec<Equipment>, ServiceError> {
        let tables = self.tables.read().await;
        tables.properties.require("property", property_id)?;

        let mut equipment: Vec<Equipment> = tables
            .property_equipment
            .iter()
            .filter(|(p, _)| *p == property_id)
            .filter_map(|(_, e)| tables.equipment.rows.get(e).cloned())
            .collect();
        equipment.sort_by(|a, b| (&a.name, a.id).cmp(&(&b.name, b.id)));
        Ok(equipment)
    }

    async fn add_property_equipment(
        &self,
        property_id: i64,
        equipment_id: i64,
    ) -> Result<(), ServiceError> {
        let mut tables = self.tables.write().await;
        tables.properties.require("property", property_id)?;
        tables.equipment.require("equipment", equipment_id)?;

        tables.property_equipment.insert((property_id, equipment_id));
        Ok(())
    }

    async fn remove_property_equipment(
        &self,
        property_id: i64,
        equipment_id: i64,
    ) -> Result<(), ServiceError> {
        let mut tables = self.tables.write().await;
        tables.properties.require("property", property_id)?;

        tables.property_equipment.remove(&(property_id, equipment_id));
        Ok(())
    }

    async fn delete_property(&self, property_id: i64) -> Result<DeleteSummary, ServiceError> {
        let mut tables = self.tables.write().await;
        tables.properties.require("property", property_id)?;

        let reservations_before = tables.reservations.rows.len();
        tables.reservations.rows.retain(|_, r| r.property_id != property_id);
        let reviews_before = tables.reviews.rows.len();
        tables.reviews.rows.retain(|_, r| r.property_id != property_id);

        let mut photos_orphaned = 0;
        for photo in tables.photos.rows.values_mut() {
            if photo.property_id == Some(property_id) {
                photo.property_id = None;
                photos_orphaned += 1;
            }
        }

        tables.property_equipment.retain(|(p, _)| *p != property_id);
        tables.properties.rows.remove(&property_id);

        Ok(DeleteSummary {
            reservations_removed: (reservations_before - tables.reservations.rows.len()) as u64,
            reviews_removed: (reviews_before - tables.reviews.rows.len()) as u64,
            photos_orphaned,
        })
    }
}

#[async_trait]
impl PhotoExt for MemoryStore {
    async fn create_photo(&self, data: SavePhotoDto) -> Result<Photo, ServiceError> {
        data.check()?;
        let image = data.image_path()?;
        let mut tables = self.tables.write().await;
        tables.properties.require("property", data.property_id)?;

        let photo = Photo {
            id: tables.photos.next_id(),
            image,
            property_id: Some(data.property_id),
            caption: data.caption,
        };
        tables.photos.rows.insert(photo.id, photo.clone());
        Ok(photo)
    }

    async fn update_photo(&self, photo_id: i64, data: SavePhotoDto) -> Result<Photo, ServiceError> {
        data.check()?;
        let image = data.image_path()?;
        let mut tables = self.tables.write().await;
        tables.properties.require("property", data.property_id)?;

        let photo = tables.photos.require_mut("photo", photo_id)?;
        photo.image = image;
        photo.property_id = Some(data.property_id);
        photo.caption = data.caption;
        Ok(photo.clone())
    }

    async fn get_photo(&self, photo_id: i64) -> Result<Option<Photo>, ServiceError> {
        Ok(self.tables.read().await.photos.rows.get(&photo_id).cloned())
    }

    async fn list_photos(&self) -> Result<Vec<Photo>, ServiceError> {
        let tables = self.tables.read().await;
        let mut photos: Vec<Photo> = tables.photos.rows.values().cloned().collect();
        photos.sort_by(|a, b| (&a.caption, a.id).cmp(&(&b.caption, b.id)));
        Ok(photos)
    }

    async fn list_property_photos(&self, property_id: i64) -> Result<Vec<Photo>, ServiceError> {
        self.tables.read().await.properties.require("property", property_id)?;

        let mut photos = self.list_photos().await?;
        photos.retain(|p| p.property_id == Some(property_id));
        Ok(photos)
    }

    async fn delete_photo(&self, photo_id: i64) -> Result<(), ServiceError> {
        let mut tables = self.tables.write().await;
        tables
            .photos
            .rows
            .remove(&photo_id)
            .map(|_| ())
            .ok_or_else(|| ServiceError::not_found("photo", photo_id))
    }
}

#[async_trait]
impl ReservationExt for MemoryStore {
    async fn create_reservation(&self, data: SaveReservationDto) -> Result<Reservation, ServiceError> {
        data.check(today())?;
        let mut tables = self.tables.write().await;
        tables.require_parties(data.client_id, data.property_id)?;

        let reservation = Reservation {
            id: tables.reservations.next_id(),
            client_id: data.client_id,
            property_id: data.property_id,
            start_date: data.start_date,
            end_date: data.end_date,
            occupants: data.occupants,
            notes: data.notes,
        };
        tables.reservations.rows.insert(reservation.id, reservation.clone());
        Ok(reservation)
    }

    async fn update_reservation(
        &self,
        reservation_id: i64,
        data: SaveReservationDto,
    ) -> Result<Reservation, ServiceError> {
        data.check(today())?;
        let mut tables = self.tables.write().await;
        tables.require_parties(data.client_id, data.property_id)?;

        let reservation = tables.reservations.require_mut("reservation", reservation_id)?;
        reservation.client_id = data.client_id;
        reservation.property_id = data.property_id;
        reservation.start_date = data.start_date;
        reservation.end_date = data.end_date;
        reservation.occupants = data.occupants;
        reservation.notes = data.notes;
        Ok(reservation.clone())
    }

    async fn get_reservation(&self, reservation_id: i64) -> Result<Option<Reservation>, ServiceError> {
        Ok(self.tables.read().await.reservations.rows.get(&reservation_id).cloned())
    }

    async fn get_reservation_listing(
        &self,
        reservation_id: i64,
    ) -> Result<Option<ReservationListing>, ServiceError> {
        let tables = self.tables.read().await;
        Ok(tables
            .reservations
            .rows
            .get(&reservation_id)
            .and_then(|r| tables.listing(r)))
    }

    async fn list_reservations(&self) -> Result<Vec<Reservation>, ServiceError> {
        let tables = self.tables.read().await;
        let mut reservations: Vec<Reservation> = tables.reservations.rows.values().cloned().collect();
        reservations.sort_by_cached_key(|r| (r.start_date, tables.client_sort_key(r.client_id), r.id));
        Ok(reservations)
    }

    async fn list_reservations_by_property(&self) -> Result<Vec<ReservationListing>, ServiceError> {
        let tables = self.tables.read().await;
        let mut reservations: Vec<&Reservation> = tables.reservations.rows.values().collect();
        reservations.sort_by_cached_key(|r| {
            (
                tables.property_sort_key(r.property_id),
                r.start_date,
                tables.client_sort_key(r.client_id),
                r.id,
            )
        });
        Ok(reservations.into_iter().filter_map(|r| tables.listing(r)).collect())
    }

    async fn delete_reservation(&self, reservation_id: i64) -> Result<(), ServiceError> {
        let mut tables = self.tables.write().await;
        tables
            .reservations
            .rows
            .remove(&reservation_id)
            .map(|_| ())
            .ok_or_else(|| ServiceError::not_found("reservation", reservation_id))
    }
}

#[async_trait]
impl ReviewExt for MemoryStore {
    async fn create_review(&self, data: SaveReviewDto) -> Result<Review, ServiceError> {
        data.check()?;
        let grade = data.grade()?;
        let mut tables = self.tables.write().await;
        tables.require_parties(data.client_id, data.property_id)?;

        let review = Review {
            id: tables.reviews.next_id(),
            client_id: data.client_id,
            property_id: data.property_id,
            positives: data.positives,
            negatives: data.negatives,
            grade,
            review_date: today(),
        };
        tables.reviews.rows.insert(review.id, review.clone());
        Ok(review)
    }

    async fn update_review(&self, review_id: i64, data: SaveReviewDto) -> Result<Review, ServiceError> {
        data.check()?;
        let grade = data.grade()?;
        let mut tables = self.tables.write().await;
        tables.require_parties(data.client_id, data.property_id)?;

        let review = tables.reviews.require_mut("review", review_id)?;
        review.client_id = data.client_id;
        review.property_id = data.property_id;
        review.positives = data.positives;
        review.negatives = data.negatives;
        review.grade = grade;
        Ok(review.clone())
    }

    async fn get_review(&self, review_id: i64) -> Result<Option<Review>, ServiceError> {
        Ok(self.tables.read().await.reviews.rows.get(&review_id).cloned())
    }

    async fn list_reviews(&self) -> Result<Vec<Review>, ServiceError> {
        let tables = self.tables.read().await;
        let mut reviews: Vec<Review> = tables.reviews.rows.values().cloned().collect();
        reviews.sort_by_cached_key(|r| {
            (
                tables.property_sort_key(r.property_id),
                std::cmp::Reverse((r.review_date, r.id)),
            )
        });
        Ok(reviews)
    }

    async fn delete_review(&self, review_id: i64) -> Result<(), ServiceError> {
        let mut tables = self.tables.write().await;
        tables
            .reviews
            .rows
            .remove(&review_id)
            .map(|_| ())
            .ok_or_else(|| ServiceError::not_found("review", review_id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::reviewmodel::Grade;
    use chrono::Duration;

    fn client_dto(first: &str, last: &str, email: &str) -> SaveClientDto {
        SaveClientDto {
            first_name: first.to_string(),
            last_name: last.to_string(),
            email: email.to_string(),
            phone: None,
        }
    }

    fn property_dto(label: &str, email: &str, rooms: i32) -> SavePropertyDto {
        SavePropertyDto {
            label: label.to_string(),
            address: "Náměstí 1".to_string(),
            city: "Telč".to_string(),
            postal_code: "58856".to_string(),
            contact: "Petr Malý".to_string(),
            phone: "+420 600 100 200".to_string(),
            email: email.to_string(),
            description: "Penzion na náměstí".to_string(),
            rooms,
            equipment: vec![],
        }
    }

    fn stay(client_id: i64, property_id: i64, start_in: i64, nights: i64) -> SaveReservationDto {
        let start = today() + Duration::days(start_in);
        SaveReservationDto {
            client_id,
            property_id,
            start_date: start,
            end_date: start + Duration::days(nights),
            occupants: 2,
            notes: String::new(),
        }
    }

    fn review_dto(client_id: i64, property_id: i64, grade: i16) -> SaveReviewDto {
        SaveReviewDto {
            client_id,
            property_id,
            positives: None,
            negatives: None,
            grade,
        }
    }

    #[tokio::test]
    async fn test_client_email_unique() {
        let store = MemoryStore::new();
        store.create_client(client_dto("Jan", "Novák", "jan@example.cz")).await.unwrap();

        let err = store
            .create_client(client_dto("Jana", "Nováková", "jan@example.cz"))
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::Violation(Violation::Uniqueness { field: "email", .. })));

        store.create_client(client_dto("Jana", "Nováková", "jana@example.cz")).await.unwrap();
        assert_eq!(store.list_clients().await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_client_update_keeps_own_email() {
        let store = MemoryStore::new();
        let jan = store.create_client(client_dto("Jan", "Novák", "jan@example.cz")).await.unwrap();
        store.create_client(client_dto("Eva", "Malá", "eva@example.cz")).await.unwrap();

        let renamed = store
            .update_client(jan.id, client_dto("Honza", "Novák", "jan@example.cz"))
            .await
            .unwrap();
        assert_eq!(renamed.first_name, "Honza");

        let err = store
            .update_client(jan.id, client_dto("Honza", "Novák", "eva@example.cz"))
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::Violation(Violation::Uniqueness { .. })));
    }

    #[tokio::test]
    async fn test_invalid_phone_is_not_stored() {
        let store = MemoryStore::new();
        let dto = SaveClientDto {
            phone: Some("420777777777".to_string()),
            ..client_dto("Jan", "Novák", "jan@example.cz")
        };
        let err = store.create_client(dto).await.unwrap_err();
        assert!(matches!(err, ServiceError::Violation(Violation::Format { field: "phone", .. })));
        assert!(store.list_clients().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_clients_ordered_by_last_then_first_name() {
        let store = MemoryStore::new();
        store.create_client(client_dto("Petr", "Svoboda", "p@example.cz")).await.unwrap();
        store.create_client(client_dto("Adam", "Beneš", "a@example.cz")).await.unwrap();
        store.create_client(client_dto("Alena", "Svoboda", "al@example.cz")).await.unwrap();

        let names: Vec<String> = store
            .list_clients()
            .await
            .unwrap()
            .iter()
            .map(|c| c.to_string())
            .collect();
        assert_eq!(names, vec!["Beneš, Adam", "Svoboda, Alena", "Svoboda, Petr"]);
    }

    #[tokio::test]
    async fn test_property_email_unique() {
        let store = MemoryStore::new();
        store.create_property(property_dto("A", "a@example.cz", 3)).await.unwrap();
        let err = store
            .create_property(property_dto("B", "a@example.cz", 3))
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::Violation(Violation::Uniqueness { .. })));
    }

    #[tokio::test]
    async fn test_rooms_over_two_filter() {
        let store = MemoryStore::new();
        store.create_property(property_dto("Dvojka", "two@example.cz", 2)).await.unwrap();
        store.create_property(property_dto("Trojka", "three@example.cz", 3)).await.unwrap();
        store.create_property(property_dto("Nula", "zero@example.cz", 0)).await.unwrap();

        let labels: Vec<String> = store
            .list_properties_with_rooms_over(2)
            .await
            .unwrap()
            .into_iter()
            .map(|p| p.label)
            .collect();
        assert_eq!(labels, vec!["Trojka"]);
    }

    #[tokio::test]
    async fn test_property_equipment_set() {
        let store = MemoryStore::new();
        let wifi = store
            .create_equipment(SaveEquipmentDto { name: "Wi-Fi".to_string(), symbol: "wifi.svg".to_string() })
            .await
            .unwrap();
        let sauna = store
            .create_equipment(SaveEquipmentDto { name: "Sauna".to_string(), symbol: "sauna.svg".to_string() })
            .await
            .unwrap();
        assert_eq!(wifi.symbol, "symbols/wifi.svg");

        let property = store
            .create_property(SavePropertyDto {
                equipment: vec![wifi.id],
                ..property_dto("Chata", "chata@example.cz", 3)
            })
            .await
            .unwrap();

        store.add_property_equipment(property.id, sauna.id).await.unwrap();
        store.add_property_equipment(property.id, sauna.id).await.unwrap();
        let names: Vec<String> = store
            .property_equipment(property.id)
            .await
            .unwrap()
            .into_iter()
            .map(|e| e.name)
            .collect();
        assert_eq!(names, vec!["Sauna", "Wi-Fi"]);

        store.remove_property_equipment(property.id, wifi.id).await.unwrap();
        store.delete_equipment(sauna.id).await.unwrap();
        assert!(store.property_equipment(property.id).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_overlong_symbol_path_is_not_stored() {
        let store = MemoryStore::new();
        let err = store
            .create_equipment(SaveEquipmentDto { name: "Krb".to_string(), symbol: "k".repeat(304) })
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::Violation(Violation::Length { field: "symbol", .. })));
        assert!(store.list_equipment().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_unknown_equipment_rejects_whole_save() {
        let store = MemoryStore::new();
        let err = store
            .create_property(SavePropertyDto {
                equipment: vec![99],
                ..property_dto("Chata", "chata@example.cz", 3)
            })
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::NotFound { entity: "equipment", id: 99 }));
        assert!(store.list_properties().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_reservation_date_rules() {
        let store = MemoryStore::new();
        let client = store.create_client(client_dto("Jan", "Novák", "jan@example.cz")).await.unwrap();
        let property = store.create_property(property_dto("Chata", "c@example.cz", 3)).await.unwrap();

        let today_ok = store.create_reservation(stay(client.id, property.id, 0, 1)).await.unwrap();
        assert_eq!(today_ok.nights(), 1);

        let err = store.create_reservation(stay(client.id, property.id, -1, 3)).await.unwrap_err();
        assert!(matches!(err, ServiceError::Violation(Violation::StartInPast { .. })));

        let err = store.create_reservation(stay(client.id, property.id, 2, 0)).await.unwrap_err();
        assert!(matches!(err, ServiceError::Violation(Violation::NonPositiveDuration { .. })));

        assert_eq!(store.list_reservations().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_reservation_update_revalidates() {
        let store = MemoryStore::new();
        let client = store.create_client(client_dto("Jan", "Novák", "jan@example.cz")).await.unwrap();
        let property = store.create_property(property_dto("Chata", "c@example.cz", 3)).await.unwrap();
        let reservation = store.create_reservation(stay(client.id, property.id, 5, 2)).await.unwrap();

        let err = store
            .update_reservation(reservation.id, stay(client.id, property.id, -3, 2))
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::Violation(Violation::StartInPast { .. })));

        let unchanged = store.get_reservation(reservation.id).await.unwrap().unwrap();
        assert_eq!(unchanged, reservation);
    }

    #[tokio::test]
    async fn test_reservation_requires_existing_parties() {
        let store = MemoryStore::new();
        let property = store.create_property(property_dto("Chata", "c@example.cz", 3)).await.unwrap();
        let err = store.create_reservation(stay(42, property.id, 1, 1)).await.unwrap_err();
        assert!(matches!(err, ServiceError::NotFound { entity: "client", id: 42 }));
    }

    #[tokio::test]
    async fn test_reservation_orderings() {
        let store = MemoryStore::new();
        let zoe = store.create_client(client_dto("Zoe", "Adamová", "z@example.cz")).await.unwrap();
        let ben = store.create_client(client_dto("Ben", "Zelený", "b@example.cz")).await.unwrap();
        let beta = store.create_property(property_dto("Beta", "beta@example.cz", 3)).await.unwrap();
        let alfa = store.create_property(property_dto("Alfa", "alfa@example.cz", 3)).await.unwrap();

        let r1 = store.create_reservation(stay(ben.id, beta.id, 1, 2)).await.unwrap();
        let r2 = store.create_reservation(stay(zoe.id, beta.id, 1, 2)).await.unwrap();
        let r3 = store.create_reservation(stay(ben.id, alfa.id, 9, 2)).await.unwrap();

        let by_date: Vec<i64> = store.list_reservations().await.unwrap().iter().map(|r| r.id).collect();
        assert_eq!(by_date, vec![r2.id, r1.id, r3.id]);

        let by_property = store.list_reservations_by_property().await.unwrap();
        let ids: Vec<i64> = by_property.iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![r3.id, r2.id, r1.id]);
        assert_eq!(by_property[0].title(), "Zelený, Ben: Alfa (Telč, Náměstí 1)");
    }

    #[tokio::test]
    async fn test_review_date_stamped_and_kept() {
        let store = MemoryStore::new();
        let client = store.create_client(client_dto("Jan", "Novák", "jan@example.cz")).await.unwrap();
        let property = store.create_property(property_dto("Chata", "c@example.cz", 3)).await.unwrap();

        let review = store.create_review(review_dto(client.id, property.id, 1)).await.unwrap();
        assert_eq!(review.review_date, today());
        assert_eq!(review.grade, Grade::Excellent);

        let updated = store
            .update_review(review.id, review_dto(client.id, property.id, 3))
            .await
            .unwrap();
        assert_eq!(updated.grade, Grade::Good);
        assert_eq!(updated.review_date, review.review_date);

        let err = store.create_review(review_dto(client.id, property.id, 6)).await.unwrap_err();
        assert!(matches!(err, ServiceError::Violation(Violation::Choice { .. })));
    }

    #[tokio::test]
    async fn test_reviews_newest_first_within_property() {
        let store = MemoryStore::new();
        let client = store.create_client(client_dto("Jan", "Novák", "jan@example.cz")).await.unwrap();
        let beta = store.create_property(property_dto("Beta", "beta@example.cz", 3)).await.unwrap();
        let alfa = store.create_property(property_dto("Alfa", "alfa@example.cz", 3)).await.unwrap();

        let first = store.create_review(review_dto(client.id, beta.id, 2)).await.unwrap();
        let second = store.create_review(review_dto(client.id, beta.id, 1)).await.unwrap();
        let other = store.create_review(review_dto(client.id, alfa.id, 4)).await.unwrap();

        // Older entry pushed a day back so the date ordering is visible.
        store.tables.write().await.reviews.rows.get_mut(&first.id).unwrap().review_date =
            today() - Duration::days(1);

        let ids: Vec<i64> = store.list_reviews().await.unwrap().iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![other.id, second.id, first.id]);
    }

    #[tokio::test]
    async fn test_delete_property_cascades_and_orphans_photos() {
        let store = MemoryStore::new();
        let client = store.create_client(client_dto("Jan", "Novák", "jan@example.cz")).await.unwrap();
        let doomed = store.create_property(property_dto("Chata", "c@example.cz", 3)).await.unwrap();
        let kept = store.create_property(property_dto("Vila", "v@example.cz", 5)).await.unwrap();

        store.create_reservation(stay(client.id, doomed.id, 1, 2)).await.unwrap();
        let kept_reservation = store.create_reservation(stay(client.id, kept.id, 1, 2)).await.unwrap();
        store.create_review(review_dto(client.id, doomed.id, 2)).await.unwrap();
        let photo = store
            .create_photo(SavePhotoDto {
                property_id: doomed.id,
                filename: "pokoj.jpg".to_string(),
                caption: "Pokoj".to_string(),
            })
            .await
            .unwrap();

        let summary = store.delete_property(doomed.id).await.unwrap();
        assert_eq!(
            summary,
            DeleteSummary { reservations_removed: 1, reviews_removed: 1, photos_orphaned: 1 }
        );

        let orphan = store.get_photo(photo.id).await.unwrap().unwrap();
        assert!(orphan.is_orphaned());
        assert_eq!(orphan.image, format!("fotogalerie/{}/pokoj.jpg", doomed.id));

        let remaining: Vec<i64> = store.list_reservations().await.unwrap().iter().map(|r| r.id).collect();
        assert_eq!(remaining, vec![kept_reservation.id]);
        assert!(store.list_reviews().await.unwrap().is_empty());
        assert!(store.get_property(doomed.id).await.unwrap().is_none());

        let err = store.delete_property(doomed.id).await.unwrap_err();
        assert!(matches!(err, ServiceError::NotFound { entity: "property", .. }));
    }

    #[tokio::test]
    async fn test_delete_client_cascades() {
        let store = MemoryStore::new();
        let jan = store.create_client(client_dto("Jan", "Novák", "jan@example.cz")).await.unwrap();
        let eva = store.create_client(client_dto("Eva", "Malá", "eva@example.cz")).await.unwrap();
        let property = store.create_property(property_dto("Chata", "c@example.cz", 3)).await.unwrap();

        store.create_reservation(stay(jan.id, property.id, 1, 2)).await.unwrap();
        store.create_review(review_dto(jan.id, property.id, 1)).await.unwrap();
        let evas = store.create_reservation(stay(eva.id, property.id, 4, 2)).await.unwrap();

        store.delete_client(jan.id).await.unwrap();

        let left: Vec<i64> = store.list_reservations().await.unwrap().iter().map(|r| r.id).collect();
        assert_eq!(left, vec![evas.id]);
        assert!(store.list_reviews().await.unwrap().is_empty());
        assert!(store.get_property(property.id).await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_photos_ordered_by_caption() {
        let store = MemoryStore::new();
        let property = store.create_property(property_dto("Chata", "c@example.cz", 3)).await.unwrap();
        for caption in ["Zahrada", "Kuchyň", "Ložnice"] {
            store
                .create_photo(SavePhotoDto {
                    property_id: property.id,
                    filename: format!("{}.jpg", caption),
                    caption: caption.to_string(),
                })
                .await
                .unwrap();
        }

        let captions: Vec<String> = store
            .list_property_photos(property.id)
            .await
            .unwrap()
            .into_iter()
            .map(|p| p.caption)
            .collect();
        assert_eq!(captions, vec!["Kuchyň", "Ložnice", "Zahrada"]);
    }
}
