//! Form record data model and bundled sample records.

pub mod model;
pub mod samples;

pub use model::{CrewMember, FlightLeg, FormRecord};
