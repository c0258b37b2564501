//! Type-directed random test fixtures.
//!
//! This is the main entry point for populate. Describe a type with
//! `#[derive(Populate)]` and ask for an instance: every mutable field is
//! filled with random data, recursively, with cycles cut at a fixed depth.
//!
//! ```
//! use populate::*;
//!
//! #[derive(Populate, Debug, Clone, Default)]
//! struct Customer {
//!     id: u64,
//!     #[populate(max_length = 20)]
//!     name: String,
//!     tags: Vec<String>,
//!     referrer: Option<Box<Customer>>,
//! }
//!
//! let populator = Populator::new();
//! populator.reseed(7);
//! let customer: Customer = populator.new_instance().unwrap();
//! assert_eq!(customer.id, 0);
//! assert!(customer.name.chars().count() <= 20);
//! ```

pub use populate_core::*;

// Re-export derive macros when available
#[cfg(feature = "derive")]
pub use populate_derive::{stub, Populate};
