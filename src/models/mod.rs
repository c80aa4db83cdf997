// Domain records and model feature vectors

pub mod profile;
pub mod workout;
pub mod food;
pub mod features;
pub mod plan;

pub use profile::*;
pub use workout::*;
pub use food::*;
pub use features::*;
pub use plan::*;
