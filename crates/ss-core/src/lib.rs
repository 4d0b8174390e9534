//! ss-core: stable foundation for seasweep.
//!
//! Contains:
//! - range (declarative numeric ranges expanded into ordered values)
//! - combine (ordered Cartesian products over named axes)
//! - dof (vessel degrees of freedom and result DOF selections)
//! - numeric (finite checks + value formatting)
//! - error (configuration errors shared by every crate)

pub mod combine;
pub mod dof;
pub mod error;
pub mod numeric;
pub mod range;

// Re-exports: nice ergonomics for downstream crates
pub use combine::{Axis, CombinationIter, Combinations};
pub use dof::{Dof, DofSelection};
pub use error::{ConfigError, ConfigResult};
pub use numeric::*;
pub use range::RangeSpec;
