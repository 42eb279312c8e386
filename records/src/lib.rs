//! Records Chaincode
//!
//! Stores raw key/value pairs in the peer's world state and reads them back,
//! alongside JSON-encoded event and owner records.
//!
//! ## Functions
//! - `init [value]` - store `value` under the bootstrap key
//! - `invoke init [value]` - same as `init`
//! - `invoke write [key, value]` - store `value` under `key`
//! - `query read [key]` - return the raw bytes stored under `key`
//!
//! Every argument must be 1 to 32 characters long.

#![cfg_attr(target_arch = "wasm32", no_std)]

extern crate alloc;

pub mod records;

use chaincode_sdk::event;
use chaincode_sdk::prelude::*;

pub use records::{
    Event, Owner, find_event, find_owner, get_event, get_owner, put_event, put_owner,
};

/// Key written by `init`.
pub const BOOTSTRAP_KEY: &str = "hello_world";

/// Store the single argument under [`BOOTSTRAP_KEY`].
pub fn init<S: AsRef<str>>(args: &[S]) -> ContractResult<Vec<u8>> {
    validation::require_arguments(args, 1)?;
    validation::sanitize_arguments(args)?;

    storage().put_state(BOOTSTRAP_KEY, args[0].as_ref().as_bytes())?;
    event!("Initialized", key: BOOTSTRAP_KEY);
    Ok(Vec::new())
}

/// Route a state-changing call.
pub fn invoke<S: AsRef<str>>(function: &str, args: &[S]) -> ContractResult<Vec<u8>> {
    log(&format!("invoke is running {:?}", function));

    match function {
        "init" => init(args),
        "write" => write(args),
        _ => {
            log(&format!("invoke did not find func: {:?}", function));
            Err(Dispatch::Invocation.unknown(function))
        }
    }
}

/// Route a read-only call.
pub fn query<S: AsRef<str>>(function: &str, args: &[S]) -> ContractResult<Vec<u8>> {
    log(&format!("query is running {:?}", function));

    match function {
        "read" => read(args),
        _ => {
            log(&format!("query did not find func: {:?}", function));
            Err(Dispatch::Query.unknown(function))
        }
    }
}

/// Store `args[1]` under `args[0]`, overwriting any earlier value.
pub fn write<S: AsRef<str>>(args: &[S]) -> ContractResult<Vec<u8>> {
    validation::require_arguments(args, 2)?;
    validation::sanitize_arguments(args)?;

    let key = args[0].as_ref();
    let value = args[1].as_ref();
    storage().put_state(key, value.as_bytes())?;

    event!("StateWritten", key: key);
    Ok(Vec::new())
}

/// Return the raw bytes stored under `args[0]` (empty when unset).
pub fn read<S: AsRef<str>>(args: &[S]) -> ContractResult<Vec<u8>> {
    validation::require_arguments(args, 1)?;
    validation::sanitize_arguments(args)?;

    let key = args[0].as_ref();
    storage()
        .get_state(key)
        .map_err(|_| ContractError::StateRead {
            key: key.to_string(),
        })
}

/// Exports called by the peer. Each decodes its invocation from call data
/// and reports [`STATUS_OK`] or [`STATUS_ERROR`].
pub mod entry {
    use super::*;

    fn run(handler: fn(&Invocation) -> ContractResult<Vec<u8>>) -> i32 {
        let ctx = match try_context() {
            Ok(ctx) => ctx,
            Err(error) => {
                log(&format!("Failed to acquire execution context: {}", error));
                let _ = report_error(&error);
                return STATUS_ERROR;
            }
        };

        let outcome = ctx.invocation().and_then(|call| handler(&call));
        if let Err(error) = &outcome {
            log(&format!("tx {} failed: {}", ctx.tx_id(), error));
        }
        ctx.respond(outcome)
    }

    #[unsafe(no_mangle)]
    pub extern "C" fn init() -> i32 {
        run(|call| super::init(call.args.as_slice()))
    }

    #[unsafe(no_mangle)]
    pub extern "C" fn invoke() -> i32 {
        run(|call| super::invoke(&call.function, call.args.as_slice()))
    }

    #[unsafe(no_mangle)]
    pub extern "C" fn query() -> i32 {
        run(|call| super::query(&call.function, call.args.as_slice()))
    }
}
