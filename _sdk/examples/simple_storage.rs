//! Simple key-value storage chaincode example
//!
//! Stores and retrieves string values under caller-chosen keys

#![cfg_attr(target_arch = "wasm32", no_std)]
#![cfg_attr(target_arch = "wasm32", no_main)]

extern crate alloc;

#[cfg(not(target_arch = "wasm32"))]
fn main() {}

use chaincode_sdk::event;
use chaincode_sdk::prelude::*;

fn store(args: &[String]) -> ContractResult<Vec<u8>> {
    validation::require_arguments(args, 2)?;
    validation::sanitize_arguments(args)?;

    storage().put_state(&args[0], args[1].as_bytes())?;
    log(&format!("Stored: {:?}", args[0]));
    event!("Stored", key: args[0]);
    Ok(Vec::new())
}

fn retrieve(args: &[String]) -> ContractResult<Vec<u8>> {
    validation::require_arguments(args, 1)?;
    validation::sanitize_arguments(args)?;

    let value = storage().get_state(&args[0])?;
    if value.is_empty() {
        log(&format!("Key not found: {:?}", args[0]));
    }
    Ok(value)
}

/// Dispatch `store [key, value]` and `retrieve [key]`
#[unsafe(no_mangle)]
pub extern "C" fn invoke() -> i32 {
    let ctx = match try_context() {
        Ok(ctx) => ctx,
        Err(error) => {
            let _ = report_error(&error);
            return STATUS_ERROR;
        }
    };

    let outcome = ctx.invocation().and_then(|call| match call.function.as_str() {
        "store" => store(&call.args),
        "retrieve" => retrieve(&call.args),
        other => Err(Dispatch::Invocation.unknown(other)),
    });
    ctx.respond(outcome)
}
