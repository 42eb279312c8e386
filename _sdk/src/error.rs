//! Error types for chaincode

use alloc::string::String;
use core::fmt;

/// Chaincode execution errors
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContractError {
    /// World-state read failed in the host
    StorageReadFailed,

    /// World-state write failed in the host
    StorageWriteFailed,

    /// Read path could not fetch the state for a key
    StateRead { key: String },

    /// Failed to serialize data
    SerializationFailed,

    /// Failed to deserialize data
    DeserializationFailed,

    /// Wrong number of arguments for the called function
    ArgumentCount { expected: usize, received: usize },

    /// Argument at `position` is an empty string
    EmptyArgument { position: usize },

    /// Argument at `position` is longer than `limit` characters
    ArgumentTooLong { position: usize, limit: usize },

    /// Dispatch target is not exported by the chaincode
    UnknownFunction { dispatch: Dispatch, name: String },

    /// Typed lookup could not reach the store
    RecordNotFound(String),

    /// Stored record is absent or does not describe the requested id
    RecordMismatch(String),

    /// Invalid argument provided
    InvalidArgument(String),

    /// Failed to read call data for the current invocation
    CallDataUnavailable,

    /// Failed to return data to the runtime
    ReturnDataWriteFailed,
}

impl fmt::Display for ContractError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ContractError::StorageReadFailed => write!(f, "Storage read failed"),
            ContractError::StorageWriteFailed => write!(f, "Storage write failed"),
            ContractError::StateRead { key } => {
                write!(f, "Failed to get state for {:?}", key)
            }
            ContractError::SerializationFailed => write!(f, "Serialization failed"),
            ContractError::DeserializationFailed => write!(f, "Deserialization failed"),
            ContractError::ArgumentCount { expected, received } => write!(
                f,
                "Incorrect number of arguments: expecting {}, received {}",
                expected, received
            ),
            ContractError::EmptyArgument { position } => {
                write!(f, "Argument {} must be a non-empty string", position)
            }
            ContractError::ArgumentTooLong { position, limit } => {
                write!(f, "Argument {} must be <= {} characters", position, limit)
            }
            ContractError::UnknownFunction { dispatch, name } => {
                write!(f, "Received unknown function {}: {:?}", dispatch, name)
            }
            ContractError::RecordNotFound(id) => write!(f, "Failed to find record {:?}", id),
            ContractError::RecordMismatch(id) => write!(f, "Record does not exist: {:?}", id),
            ContractError::InvalidArgument(msg) => write!(f, "Invalid argument: {}", msg),
            ContractError::CallDataUnavailable => write!(f, "Call data unavailable"),
            ContractError::ReturnDataWriteFailed => write!(f, "Unable to write return data"),
        }
    }
}

/// Which entry point routed a call
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dispatch {
    /// State-changing path (`invoke`)
    Invocation,
    /// Read-only path (`query`)
    Query,
}

impl Dispatch {
    /// Error for a function name this path does not route.
    pub fn unknown(self, name: &str) -> ContractError {
        ContractError::UnknownFunction {
            dispatch: self,
            name: String::from(name),
        }
    }
}

impl fmt::Display for Dispatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Dispatch::Invocation => write!(f, "invocation"),
            Dispatch::Query => write!(f, "query"),
        }
    }
}

/// Result type for chaincode operations
pub type ContractResult<T> = Result<T, ContractError>;

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::string::ToString;
    #[cfg(target_arch = "wasm32")]
    use wasm_bindgen_test::wasm_bindgen_test;

    #[cfg_attr(target_arch = "wasm32", wasm_bindgen_test)]
    #[cfg_attr(not(target_arch = "wasm32"), test)]
    fn user_supplied_names_are_escaped() {
        let err = Dispatch::Invocation.unknown("bo\"gus\n");
        assert_eq!(
            err.to_string(),
            "Received unknown function invocation: \"bo\\\"gus\\n\""
        );

        let err = ContractError::StateRead {
            key: "alice".to_string(),
        };
        assert_eq!(err.to_string(), "Failed to get state for \"alice\"");
    }

    #[cfg_attr(target_arch = "wasm32", wasm_bindgen_test)]
    #[cfg_attr(not(target_arch = "wasm32"), test)]
    fn unknown_function_names_its_dispatch_path() {
        assert_eq!(
            Dispatch::Query.unknown("bogus").to_string(),
            "Received unknown function query: \"bogus\""
        );
        assert_eq!(
            Dispatch::Invocation.unknown("bogus").to_string(),
            "Received unknown function invocation: \"bogus\""
        );
    }

    #[cfg_attr(target_arch = "wasm32", wasm_bindgen_test)]
    #[cfg_attr(not(target_arch = "wasm32"), test)]
    fn argument_errors_name_the_position() {
        assert_eq!(
            ContractError::EmptyArgument { position: 2 }.to_string(),
            "Argument 2 must be a non-empty string"
        );
        assert_eq!(
            ContractError::ArgumentTooLong {
                position: 0,
                limit: 32
            }
            .to_string(),
            "Argument 0 must be <= 32 characters"
        );
    }
}
