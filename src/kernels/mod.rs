//! Pluggable kernel strategies for the SOM.
//!
//! Three independent families of pure scalar functions drive the algorithm:
//!
//! - [`Distance`] measures how far apart two vectors are (weight space and
//!   grid space alike).
//! - [`Cooling`] anneals the learning rate and neighborhood radius as
//!   training progresses.
//! - [`Neighborhood`] converts a normalized topological distance into an
//!   update influence.
//!
//! Each family is a closed enum selected by name at configuration time; an
//! unrecognized name is a construction-time error, never a silent default.

mod cooling;
mod distance;
mod neighborhood;

pub use cooling::Cooling;
pub use distance::Distance;
pub use neighborhood::Neighborhood;
