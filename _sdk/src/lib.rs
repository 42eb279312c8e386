//! # Chaincode SDK
//!
//! Rust SDK for writing chaincode against a ledger peer's world state.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use chaincode_sdk::prelude::*;
//!
//! pub extern "C" fn query() -> i32 {
//!     let ctx = match try_context() {
//!         Ok(ctx) => ctx,
//!         Err(error) => {
//!             let _ = report_error(&error);
//!             return STATUS_ERROR;
//!         }
//!     };
//!     let outcome = ctx
//!         .invocation()
//!         .and_then(|call| storage().get_state(&call.function));
//!     ctx.respond(outcome)
//! }
//! ```

#![cfg_attr(not(test), no_std)]

extern crate alloc;

pub mod context;
pub mod error;
pub mod events;
pub mod ffi;
pub mod storage;
pub mod validation;

/// Common imports for chaincode development
pub mod prelude {
    pub use crate::context::{
        Context, Invocation, STATUS_ERROR, STATUS_OK, report_error, try_context,
    };
    pub use crate::error::{ContractError, ContractResult, Dispatch};
    pub use crate::events::{emit, log};
    pub use crate::storage::{Storage, storage};
    pub use crate::validation;

    pub use alloc::format;
    pub use alloc::string::{String, ToString};
    pub use alloc::vec::Vec;
    pub use serde::{Deserialize, Serialize};
}
