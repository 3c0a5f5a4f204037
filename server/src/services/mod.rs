pub mod booking;
pub mod catalog;
pub mod organizer;
pub mod profile;
pub mod recommendation;
