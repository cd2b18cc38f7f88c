//! The Engine collaborator contract: status-code mapping and a client trait
//! for applying compiled [`SimulationDef`]s to a remote simulation engine.
//!
//! Grounded in `bento/client.py`'s `raise_native`: the Python client maps a
//! gRPC `StatusCode` to a native exception type on every call. We model the
//! same mapping as a pure function plus an `EngineClient` trait; the actual
//! RPC transport is out of scope (no `tonic`/`prost` wiring is implemented).

use crate::ecs::SimulationDef;
use thiserror::Error;

/// Coarse status reported by the engine, independent of any RPC framework.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngineStatus {
    DeadlineExceeded,
    Unimplemented,
    InvalidArgument,
    NotFound,
    AlreadyExists,
    OutOfRange,
    Other,
}

/// Native error raised for a failed engine call, mirroring `raise_native`'s
/// exception-type choice per status code.
#[derive(Debug, Error, PartialEq)]
pub enum EngineError {
    #[error("timed out: {0}")]
    Timeout(String),
    #[error("not implemented: {0}")]
    Unimplemented(String),
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
    #[error("not found: {0}")]
    NotFound(String),
    #[error("already exists: {0}")]
    AlreadyExists(String),
    #[error("out of range: {0}")]
    OutOfRange(String),
    #[error("engine error: {0}")]
    Other(String),
}

/// Map an [`EngineStatus`] and its detail message to the matching
/// [`EngineError`] variant.
pub fn raise_native(status: EngineStatus, details: impl Into<String>) -> EngineError {
    let details = details.into();
    match status {
        EngineStatus::DeadlineExceeded => EngineError::Timeout(details),
        EngineStatus::Unimplemented => EngineError::Unimplemented(details),
        EngineStatus::InvalidArgument => EngineError::InvalidArgument(details),
        EngineStatus::NotFound => EngineError::NotFound(details),
        EngineStatus::AlreadyExists => EngineError::AlreadyExists(details),
        EngineStatus::OutOfRange => EngineError::OutOfRange(details),
        EngineStatus::Other => EngineError::Other(details),
    }
}

/// Facade over the Engine's simulation-management API. A real implementation
/// plugs in gRPC transport; this crate only specifies the contract.
pub trait EngineClient {
    fn get_version(&self) -> Result<String, EngineError>;
    fn apply_sim(&self, simulation: &SimulationDef) -> Result<(), EngineError>;
    fn get_sim(&self, name: &str) -> Result<SimulationDef, EngineError>;
    fn list_sims(&self) -> Result<Vec<String>, EngineError>;
    fn remove_sim(&self, name: &str) -> Result<(), EngineError>;
}
