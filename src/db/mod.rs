pub mod clientdb;
pub mod db;
pub mod equipmentdb;
pub mod memory;
pub mod photodb;
pub mod propertydb;
pub mod reservationdb;
pub mod reviewdb;
