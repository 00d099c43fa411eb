//! Geo search backends.

mod geoapify;
mod google;

pub use geoapify::GeoapifyPlaces;
pub use google::GooglePlaces;
