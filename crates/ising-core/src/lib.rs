#![deny(missing_docs)]
#![doc = "Shared error, seeding and provenance types for the 2D Ising Metropolis engine."]

pub mod errors;
pub mod provenance;
pub mod rng;

pub use errors::{ErrorInfo, IsingError};
pub use provenance::{RunProvenance, SchemaVersion};
pub use rng::{derive_substream_seed, RngHandle, DYNAMICS_SUBSTREAM, LATTICE_SUBSTREAM};
