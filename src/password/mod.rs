//! # Password Generation
//!
//! Character sets, length bounds, request validation and the generator itself.
//!
//! ## Components
//! - **Charset**: the closed set of password classes and their alphabets
//! - **Length**: a length that has already passed the `6..=32` range check
//! - **Validate**: predicates run before a request is sent or served
//! - **Rng**: the random-source seam the generator draws from
//! - **Generator**: per-position character selection

pub mod charset;
pub mod generator;
pub mod length;
pub mod rng;
pub mod validate;

pub use charset::PasswordClass;
pub use generator::PasswordGenerator;
pub use length::PasswordLength;
pub use rng::RandomSource;
