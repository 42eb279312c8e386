//! Execution context for chaincode

use crate::error::{ContractError, ContractResult};
use crate::ffi;
use crate::validation;
use alloc::string::{String, ToString};
use alloc::vec::Vec;
use serde::{Deserialize, Serialize};

/// Status returned to the peer when an invocation succeeds.
pub const STATUS_OK: i32 = 200;

/// Status returned to the peer when an invocation fails.
pub const STATUS_ERROR: i32 = 500;

/// Function name and arguments of one invocation, as carried in call data.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Invocation {
    pub function: String,
    pub args: Vec<String>,
}

impl Invocation {
    pub fn new(function: &str, args: &[&str]) -> Self {
        Self {
            function: function.to_string(),
            args: args.iter().map(|arg| arg.to_string()).collect(),
        }
    }
}

/// Execution context for the current transaction
#[derive(Clone, Debug)]
pub struct Context {
    tx_id: String,
    channel_id: String,
    chaincode_name: String,
}

impl Context {
    /// Get the transaction id
    pub fn tx_id(&self) -> &str {
        &self.tx_id
    }

    /// Get the channel the transaction was submitted on
    pub fn channel_id(&self) -> &str {
        &self.channel_id
    }

    /// Get the name of the running chaincode (its world-state namespace)
    pub fn chaincode_name(&self) -> &str {
        &self.chaincode_name
    }

    /// Decode the postcard-encoded invocation carried in call data.
    pub fn invocation(&self) -> ContractResult<Invocation> {
        let data = ffi::read_call_data()?;
        postcard::from_bytes(&data).map_err(|_| ContractError::DeserializationFailed)
    }

    /// Write raw return bytes to the host without additional serialization.
    pub fn return_bytes(&self, data: &[u8]) -> ContractResult<()> {
        ffi::write_return_data(data)
    }

    /// Report a failed invocation to the host.
    pub fn return_error(&self, error: &ContractError) -> ContractResult<()> {
        report_error(error)
    }

    /// Hand an invocation outcome to the host and map it to a peer status.
    ///
    /// Every `STATUS_ERROR` carries an error message, including the case
    /// where the payload itself could not be handed back.
    pub fn respond(&self, outcome: ContractResult<Vec<u8>>) -> i32 {
        let delivered = outcome.and_then(|payload| self.return_bytes(&payload));
        match delivered {
            Ok(()) => STATUS_OK,
            Err(error) => {
                let _ = self.return_error(&error);
                STATUS_ERROR
            }
        }
    }
}

/// Write an error message for the host without needing a [`Context`].
///
/// Used when the context itself cannot be established.
pub fn report_error(error: &ContractError) -> ContractResult<()> {
    ffi::write_error_message(&error.to_string())
}

/// Attempt to fetch the current execution context with validation.
pub fn try_context() -> ContractResult<Context> {
    let tx_id = ffi::get_tx_id();
    let channel_id = ffi::get_channel_id();
    let chaincode_name = ffi::get_chaincode_name();

    validation::validate_identifier(&tx_id, "Transaction id")?;
    validation::validate_identifier(&channel_id, "Channel id")?;
    validation::validate_identifier(&chaincode_name, "Chaincode name")?;

    Ok(Context {
        tx_id,
        channel_id,
        chaincode_name,
    })
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod tests {
    use super::*;
    use crate::ffi::mock;

    fn prepare_mock_env() -> mock::ExclusiveGuard {
        let guard = mock::exclusive();
        mock::reset();
        mock::set_tx_id("0f1e2d3c4b5a");
        mock::set_channel_id("mychannel");
        mock::set_chaincode_name("records");
        guard
    }

    #[test]
    fn context_initializes_from_mock_runtime() {
        let _env = prepare_mock_env();

        let ctx = try_context().expect("context should be available");

        assert_eq!(ctx.tx_id(), "0f1e2d3c4b5a");
        assert_eq!(ctx.channel_id(), "mychannel");
        assert_eq!(ctx.chaincode_name(), "records");
    }

    #[test]
    fn context_rejects_missing_chaincode_name() {
        let _env = prepare_mock_env();
        mock::set_chaincode_name("");

        let err = try_context().expect_err("empty chaincode name must be rejected");
        assert!(matches!(err, ContractError::InvalidArgument(_)));
    }

    #[test]
    fn invocation_decodes_call_data() {
        let _env = prepare_mock_env();
        let invocation = Invocation::new("write", &["alice", "100"]);
        let payload = postcard::to_allocvec(&invocation).expect("postcard encode");
        mock::set_call_data(&payload);

        let ctx = try_context().expect("context should be available");
        assert_eq!(ctx.invocation().expect("invocation"), invocation);
    }

    #[test]
    fn invocation_rejects_garbage_call_data() {
        let _env = prepare_mock_env();
        mock::set_call_data(&[0xff, 0xff, 0xff]);

        let ctx = try_context().expect("context should be available");
        assert_eq!(
            ctx.invocation().unwrap_err(),
            ContractError::DeserializationFailed
        );
    }

    #[test]
    fn respond_maps_outcome_to_status() {
        let _env = prepare_mock_env();
        let ctx = try_context().expect("context should be available");

        assert_eq!(ctx.respond(Ok(b"42".to_vec())), STATUS_OK);
        assert_eq!(mock::take_return_data(), b"42".to_vec());
        assert_eq!(mock::take_error_message(), None);

        let status = ctx.respond(Err(crate::error::Dispatch::Invocation.unknown("bogus")));
        assert_eq!(status, STATUS_ERROR);
        assert_eq!(
            mock::take_error_message().as_deref(),
            Some("Received unknown function invocation: \"bogus\"")
        );
    }

    #[test]
    fn undeliverable_payload_reports_an_error() {
        let _env = prepare_mock_env();
        let ctx = try_context().expect("context should be available");
        mock::fail_return_data(true);

        assert_eq!(ctx.respond(Ok(b"42".to_vec())), STATUS_ERROR);
        assert_eq!(
            mock::take_error_message().as_deref(),
            Some("Unable to write return data")
        );
    }

    #[test]
    fn report_error_needs_no_context() {
        let _env = prepare_mock_env();
        mock::set_tx_id("");
        assert!(try_context().is_err());

        report_error(&ContractError::CallDataUnavailable).expect("report");
        assert_eq!(
            mock::take_error_message().as_deref(),
            Some("Call data unavailable")
        );
    }
}
