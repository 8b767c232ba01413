//! Adapters for concrete traffic generators.

pub mod traffic_gen;
