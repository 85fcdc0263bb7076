//! Concrete rate sources.

pub mod bnr;
pub mod fixer;
pub mod util;

pub use bnr::BnrSource;
pub use fixer::FixerSource;
