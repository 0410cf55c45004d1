pub mod bound;
pub mod catalog;
pub mod config;
pub mod signature;
pub mod sketch;

pub use bound::*;
pub use catalog::*;
pub use config::*;
pub use signature::*;
pub use sketch::*;
