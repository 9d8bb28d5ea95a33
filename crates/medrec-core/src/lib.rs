//! Core domain types for the medrec clinical records server.
//!
//! This crate defines the shared vocabulary of the system: staff roles,
//! the user record, the patient document (demographics, contact info,
//! vitals, embedded appointments), and the time-window helpers used by
//! the report builders.

pub mod patient;
pub mod role;
pub mod time;
pub mod user;

pub use patient::{Appointment, AppointmentStatus, ContactInfo, Gender, Patient, Vitals};
pub use role::Role;
pub use user::User;
