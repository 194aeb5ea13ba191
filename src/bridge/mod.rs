//! The boundary call table.
//!
//! Every method on [`Bridge`] corresponds to one operation a foreign caller
//! can invoke. Arguments arrive as raw integer handles, scalars and host
//! arrays; each call decodes them, forwards to exactly one engine operation
//! in [`PhysicsContext`] and encodes the result. Bulk getters write a fixed
//! field order into a caller-supplied array.
//!
//! Handles are the 64-bit encoding of generation-checked arena keys, so a
//! handle used after its object was destroyed fails with
//! [`PhysicsError::InvalidHandle`] instead of touching freed memory.
//! Handles of different kinds are not distinguished by value: callers must
//! pass each handle to the operations of its own kind.

mod buffer;
mod world;
mod body;
mod fixture;
mod shape;

pub use self::buffer::{to_points, ArrayLock, HostArray};

use crate::bodies::BodyType;
use crate::core::{EngineConfig, PhysicsContext};
use crate::error::PhysicsError;
use crate::Result;
use slotmap::{Key, KeyData};

#[cfg(feature = "serialize")]
use serde::{Deserialize, Serialize};

/// An opaque object handle as seen by the caller
pub type RawHandle = u64;

/// The handle value that never refers to an object
pub const NULL_HANDLE: RawHandle = 0;

/// Boundary behavior switches
#[derive(Debug, Clone, Default)]
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
pub struct BridgeConfig {
    /// Reject unknown body-type codes instead of treating them as static
    pub strict_body_type: bool,

    /// Defaults for the wrapped engine
    pub engine: EngineConfig,
}

/// Marshaling layer between a foreign caller and the engine
pub struct Bridge {
    context: PhysicsContext,
    config: BridgeConfig,
}

impl Bridge {
    pub fn new() -> Self {
        Self::with_config(BridgeConfig::default())
    }

    pub fn with_config(config: BridgeConfig) -> Self {
        Self {
            context: PhysicsContext::with_config(config.engine.clone()),
            config,
        }
    }

    pub fn config(&self) -> &BridgeConfig {
        &self.config
    }

    /// Direct access to the wrapped engine
    pub fn context(&self) -> &PhysicsContext {
        &self.context
    }

    pub fn context_mut(&mut self) -> &mut PhysicsContext {
        &mut self.context
    }

    /// Decodes a boundary body-type code according to the configured policy
    fn body_type(&self, code: i32) -> Result<BodyType> {
        if self.config.strict_body_type {
            return BodyType::try_from(code);
        }
        let body_type = BodyType::from_code(code);
        if body_type.code() != code {
            log::warn!("unknown body type code {}, using static", code);
        }
        Ok(body_type)
    }
}

impl Default for Bridge {
    fn default() -> Self {
        Self::new()
    }
}

/// Encodes an arena key as a raw handle
pub fn encode<K: Key>(key: K) -> RawHandle {
    key.data().as_ffi()
}

/// Decodes a raw handle, rejecting null and values no key could have produced
pub fn decode<K: Key>(kind: &'static str, raw: RawHandle) -> Result<K> {
    let data = KeyData::from_ffi(raw);
    if raw == NULL_HANDLE || data.as_ffi() != raw {
        return Err(PhysicsError::InvalidHandle { kind, handle: raw });
    }
    Ok(K::from(data))
}

/// Converts an engine count to the boundary integer type
fn count(n: usize) -> i32 {
    i32::try_from(n).unwrap_or(i32::MAX)
}
