pub mod clientmodel;
pub mod equipmentmodel;
pub mod photomodel;
pub mod propertymodel;
pub mod reservationmodel;
pub mod reviewmodel;
