//! Traffic generator adapter implementations.

pub mod jsonrpc;
pub mod mock;
pub mod simulated;

pub use jsonrpc::{JsonRpcConfig, JsonRpcTrafficGen};
pub use mock::{FailurePoint, GeneratorCall, MockTrafficGen};
pub use simulated::SimulatedTrafficGen;
