//! World-state access for chaincode
//!
//! Keys form a single flat namespace per chaincode. A key that was never
//! written reads back as an empty value, not as an error.

use crate::context::try_context;
use crate::error::{ContractError, ContractResult};
use crate::ffi;
use alloc::vec::Vec;
use serde::Serialize;
use serde::de::DeserializeOwned;

/// Low-level world-state access
pub struct Storage;

impl Storage {
    /// Read the raw value stored under `key` (empty if absent)
    pub fn get_state(&self, key: &str) -> ContractResult<Vec<u8>> {
        let ctx = try_context()?;
        ffi::read_storage(ctx.chaincode_name(), key)
    }

    /// Write `value` under `key`, replacing whatever was there
    pub fn put_state(&mut self, key: &str, value: &[u8]) -> ContractResult<()> {
        let ctx = try_context()?;
        ffi::write_storage(ctx.chaincode_name(), key, value)
    }

    /// Read a JSON record, treating empty or undecodable values as absent.
    ///
    /// Only a failing host read is an error; callers that need to tell
    /// "missing" from "unreadable" use [`Storage::get_state`] directly.
    pub fn get_json<T>(&self, key: &str) -> ContractResult<Option<T>>
    where
        T: DeserializeOwned,
    {
        let data = self.get_state(key)?;
        if data.is_empty() {
            return Ok(None);
        }
        Ok(serde_json::from_slice(&data).ok())
    }

    /// Encode `value` as JSON and store it under `key`
    pub fn put_json<T>(&mut self, key: &str, value: &T) -> ContractResult<()>
    where
        T: Serialize,
    {
        let data = serde_json::to_vec(value).map_err(|_| ContractError::SerializationFailed)?;
        self.put_state(key, &data)
    }
}

/// Global storage instance
pub fn storage() -> Storage {
    Storage
}
