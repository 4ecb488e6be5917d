//! Storage layer for the 17 Agustus competition registrations.
//!
//! Writes sign-ups through [`services::registration`] and reads them back as
//! per-participant views through [`services::projection`].

pub mod backend;
pub mod catalog;
pub mod dto;
pub mod error;
pub mod models;
pub mod repository;
pub mod services;

pub use backend::{Backend, BackendKind, Database, InMemoryBackend, RestBackend};
