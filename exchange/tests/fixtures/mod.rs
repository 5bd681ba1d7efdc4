//! Test fixtures and utilities

pub mod backends;
pub mod books;

#[allow(unused_imports)]
pub use backends::*;
#[allow(unused_imports)]
pub use books::*;
