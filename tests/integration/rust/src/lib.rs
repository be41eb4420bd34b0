//! Integration test suite for the compiler front end
//!
//! This crate provides integration tests that verify components work
//! together correctly across component boundaries.

/// Re-export components for test convenience
pub mod components {
    pub use core_types;
    pub use front_cli;
    pub use parser;
}
