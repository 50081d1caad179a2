//! UI widgets for reusable components.

pub mod setoran_form;
pub mod stat_card;
pub mod status_badge;

pub use setoran_form::{SetoranForm, SetoranFormAction};
pub use stat_card::{percentage_card, stat_card};
pub use status_badge::{attendance_badge, setoran_badge};
