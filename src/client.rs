//! Geocoder facade.
//!
//! Keep the public surface small: build a [`Geocoder`] with
//! [`GeocoderBuilder`], then call [`Geocoder::resolve`] or
//! [`Geocoder::batch_geocode`]. Implementation details live in
//! `src/client/`.

pub mod builder;
pub mod core;
pub mod signals;

pub use builder::GeocoderBuilder;
pub use self::core::Geocoder;
pub use signals::ResolverSnapshot;
