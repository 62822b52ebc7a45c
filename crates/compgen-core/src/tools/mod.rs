//! Adapters to services outside the generator.
//!
//! The refinement service is the only external collaborator. Its interface is
//! the [`refiner::Refiner`] trait, with a chat-completions implementation and a
//! mock for tests.

pub mod refiner;
pub mod refiner_impl;
pub mod refiner_mock;

pub use refiner::{Refiner, ServiceError};
