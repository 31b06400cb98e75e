//! Common utilities and abstractions for services

/// Reactive property system for committed state updates
pub mod property;

pub use property::Property;
