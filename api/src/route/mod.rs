pub mod booking;
pub mod health;
pub mod location;
pub mod slot;
pub mod v1;
