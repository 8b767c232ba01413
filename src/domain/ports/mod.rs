//! Port trait definitions (Hexagonal Architecture)
//!
//! Generators are adapters behind the [`TrafficGen`] port, so the search
//! itself does not depend on any concrete traffic emitter.

pub mod traffic_gen;

pub use traffic_gen::TrafficGen;
