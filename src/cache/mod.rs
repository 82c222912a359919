//! Cache Module
//!
//! The load-through cache facade and its get/get-all/put-all protocol.

mod facade;

#[cfg(test)]
mod property_tests;

// Re-export public types
pub use facade::RemoteCache;
