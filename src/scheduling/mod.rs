//! Booking rules shared by every endpoint: distance, workshop ranking, time
//! slots, the appointment status machine and the booking wizard draft.

pub mod catalog;
pub mod distance;
pub mod draft;
pub mod lifecycle;
pub mod locator;
pub mod slots;
pub mod status;
