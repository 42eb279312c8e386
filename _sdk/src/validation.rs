//! Input validation helpers
//!
//! Every argument list received from the host passes through
//! [`require_arguments`] and [`sanitize_arguments`] before it is used.

use crate::error::{ContractError, ContractResult};
use alloc::format;

/// Longest accepted argument, counted in characters.
pub const MAX_ARGUMENT_LEN: usize = 32;

/// Longest accepted host identifier (tx id, channel, chaincode name).
pub const MAX_IDENTIFIER_LEN: usize = 128;

/// Fail unless exactly `expected` arguments were supplied.
#[inline(always)]
pub fn require_arguments<S: AsRef<str>>(args: &[S], expected: usize) -> ContractResult<()> {
    if args.len() != expected {
        return Err(ContractError::ArgumentCount {
            expected,
            received: args.len(),
        });
    }
    Ok(())
}

/// Reject the first argument that is empty or longer than [`MAX_ARGUMENT_LEN`].
pub fn sanitize_arguments<S: AsRef<str>>(args: &[S]) -> ContractResult<()> {
    for (position, arg) in args.iter().enumerate() {
        let arg = arg.as_ref();
        if arg.is_empty() {
            return Err(ContractError::EmptyArgument { position });
        }
        if arg.chars().count() > MAX_ARGUMENT_LEN {
            return Err(ContractError::ArgumentTooLong {
                position,
                limit: MAX_ARGUMENT_LEN,
            });
        }
    }
    Ok(())
}

#[inline(always)]
pub fn validate_non_empty(value: &str, field_name: &str) -> ContractResult<()> {
    if value.trim().is_empty() {
        return Err(ContractError::InvalidArgument(format!(
            "{} cannot be empty",
            field_name
        )));
    }
    Ok(())
}

pub fn validate_identifier(value: &str, field_name: &str) -> ContractResult<()> {
    validate_non_empty(value, field_name)?;
    if value.len() > MAX_IDENTIFIER_LEN {
        return Err(ContractError::InvalidArgument(format!(
            "{} exceeds {} bytes",
            field_name, MAX_IDENTIFIER_LEN
        )));
    }
    Ok(())
}
