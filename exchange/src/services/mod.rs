//! Exchange service implementations

pub mod backend_client;
pub mod metadata_lookup;

#[cfg(test)]
pub mod tests;

pub use backend_client::*;
pub use metadata_lookup::*;
