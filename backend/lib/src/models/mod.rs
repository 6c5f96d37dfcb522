//! Wire models of the API responses

pub mod envelope;

pub use envelope::{Envelope, PrimaryData, ResourceId, ResourceObject};
