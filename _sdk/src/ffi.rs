//! Foreign Function Interface for host functions
//!
//! These functions are provided by the ledger peer and allow chaincode
//! to read and write its world state. When running tests on the native
//! host, we provide a deterministic mock runtime so chaincode can be
//! exercised without a peer.

use crate::error::{ContractError, ContractResult};
use alloc::string::String;
#[cfg(target_arch = "wasm32")]
use alloc::vec;
use alloc::vec::Vec;

/// Largest world-state value the host read buffer accepts.
pub const MAX_VALUE_SIZE: usize = 65_536;

#[cfg(target_arch = "wasm32")]
mod host {
    use super::{ContractError, ContractResult, MAX_VALUE_SIZE, String, Vec, vec};

    // Host function imports from the peer
    #[link(wasm_import_module = "env")]
    unsafe extern "C" {
        pub fn state_read(
            namespace_ptr: i32,
            namespace_len: i32,
            key_ptr: i32,
            key_len: i32,
            value_ptr: i32,
            value_len_ptr: i32,
        ) -> i32;

        pub fn state_write(
            namespace_ptr: i32,
            namespace_len: i32,
            key_ptr: i32,
            key_len: i32,
            value_ptr: i32,
            value_len: i32,
        ) -> i32;

        pub fn log(msg_ptr: i32, msg_len: i32);

        pub fn emit_event(topic_ptr: i32, topic_len: i32, data_ptr: i32, data_len: i32);

        pub fn get_tx_id(buffer_ptr: i32) -> i32;
        pub fn get_channel_id(buffer_ptr: i32) -> i32;
        pub fn get_chaincode_name(buffer_ptr: i32) -> i32;

        pub fn get_call_data_length() -> i32;
        pub fn read_call_data(buffer_ptr: i32, buffer_len: i32) -> i32;
        pub fn write_return_data(buffer_ptr: i32, buffer_len: i32) -> i32;
        pub fn write_error_message(msg_ptr: i32, msg_len: i32) -> i32;
    }

    pub fn read_storage(namespace: &str, key: &str) -> ContractResult<Vec<u8>> {
        let mut value = vec![0_u8; MAX_VALUE_SIZE];
        let mut value_len: i32 = 0;

        let result = unsafe {
            state_read(
                namespace.as_ptr() as i32,
                namespace.len() as i32,
                key.as_ptr() as i32,
                key.len() as i32,
                value.as_mut_ptr() as i32,
                &mut value_len as *mut i32 as i32,
            )
        };

        if result == 0 {
            value.truncate(value_len as usize);
            Ok(value)
        } else {
            Err(ContractError::StorageReadFailed)
        }
    }

    pub fn write_storage(namespace: &str, key: &str, value: &[u8]) -> ContractResult<()> {
        let result = unsafe {
            state_write(
                namespace.as_ptr() as i32,
                namespace.len() as i32,
                key.as_ptr() as i32,
                key.len() as i32,
                value.as_ptr() as i32,
                value.len() as i32,
            )
        };

        if result == 0 {
            Ok(())
        } else {
            Err(ContractError::StorageWriteFailed)
        }
    }

    pub fn log_message(message: &str) {
        unsafe {
            log(message.as_ptr() as i32, message.len() as i32);
        }
    }

    pub fn emit_event_internal(topic: &str, data: &[u8]) {
        unsafe {
            emit_event(
                topic.as_ptr() as i32,
                topic.len() as i32,
                data.as_ptr() as i32,
                data.len() as i32,
            );
        }
    }

    fn read_identifier(getter: unsafe extern "C" fn(i32) -> i32) -> String {
        let mut buffer = vec![0_u8; 128];
        let len = unsafe { getter(buffer.as_mut_ptr() as i32) };
        buffer.truncate(len.clamp(0, 128) as usize);
        String::from_utf8_lossy(&buffer).into_owned()
    }

    pub fn tx_id() -> String {
        read_identifier(get_tx_id)
    }

    pub fn channel_id() -> String {
        read_identifier(get_channel_id)
    }

    pub fn chaincode_name() -> String {
        read_identifier(get_chaincode_name)
    }

    pub fn read_call_data_internal() -> ContractResult<Vec<u8>> {
        let len = unsafe { get_call_data_length() };
        if len < 0 {
            return Err(ContractError::CallDataUnavailable);
        }
        if len == 0 {
            return Ok(Vec::new());
        }

        let mut buffer = vec![0_u8; len as usize];
        let result = unsafe { read_call_data(buffer.as_mut_ptr() as i32, len) };
        if result == 0 {
            Ok(buffer)
        } else {
            Err(ContractError::CallDataUnavailable)
        }
    }

    pub fn write_return_data_internal(data: &[u8]) -> ContractResult<()> {
        let result = unsafe { write_return_data(data.as_ptr() as i32, data.len() as i32) };
        if result == 0 {
            Ok(())
        } else {
            Err(ContractError::ReturnDataWriteFailed)
        }
    }

    pub fn write_error_message_internal(message: &str) -> ContractResult<()> {
        let result =
            unsafe { write_error_message(message.as_ptr() as i32, message.len() as i32) };
        if result == 0 {
            Ok(())
        } else {
            Err(ContractError::ReturnDataWriteFailed)
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
mod host {
    use super::{ContractError, ContractResult, String, Vec};
    use alloc::collections::BTreeMap;
    use alloc::string::ToString;
    use spin::{Mutex, MutexGuard};

    #[derive(Clone, Debug)]
    pub struct EventRecord {
        pub topic: String,
        pub data: Vec<u8>,
    }

    pub struct MockRuntime {
        storage: BTreeMap<(String, String), Vec<u8>>,
        tx_id: String,
        channel_id: String,
        chaincode_name: String,
        call_data: Vec<u8>,
        return_data: Vec<u8>,
        error_message: Option<String>,
        events: Vec<EventRecord>,
        logs: Vec<String>,
        fail_reads: bool,
        fail_writes: bool,
        fail_return_data: bool,
    }

    impl Default for MockRuntime {
        fn default() -> Self {
            Self {
                storage: BTreeMap::new(),
                tx_id: "mock-tx-0001".to_string(),
                channel_id: "mychannel".to_string(),
                chaincode_name: "records".to_string(),
                call_data: Vec::new(),
                return_data: Vec::new(),
                error_message: None,
                events: Vec::new(),
                logs: Vec::new(),
                fail_reads: false,
                fail_writes: false,
                fail_return_data: false,
            }
        }
    }

    impl MockRuntime {
        fn storage_key(namespace: &str, key: &str) -> (String, String) {
            (namespace.to_string(), key.to_string())
        }

        fn read_storage(&self, namespace: &str, key: &str) -> ContractResult<Vec<u8>> {
            if self.fail_reads {
                return Err(ContractError::StorageReadFailed);
            }
            let lookup = Self::storage_key(namespace, key);
            Ok(self.storage.get(&lookup).cloned().unwrap_or_default())
        }

        fn write_storage(&mut self, namespace: &str, key: &str, value: &[u8]) -> ContractResult<()> {
            if self.fail_writes {
                return Err(ContractError::StorageWriteFailed);
            }
            let lookup = Self::storage_key(namespace, key);
            if value.is_empty() {
                self.storage.remove(&lookup);
            } else {
                self.storage.insert(lookup, value.to_vec());
            }
            Ok(())
        }
    }

    static MOCK_RUNTIME: Mutex<Option<MockRuntime>> = Mutex::new(None);
    static EXCLUSIVE: Mutex<()> = Mutex::new(());

    pub fn with_runtime<F, R>(f: F) -> R
    where
        F: FnOnce(&mut MockRuntime) -> R,
    {
        let mut guard = MOCK_RUNTIME.lock();
        let runtime = guard.get_or_insert_with(MockRuntime::default);
        f(runtime)
    }

    pub fn exclusive() -> MutexGuard<'static, ()> {
        EXCLUSIVE.lock()
    }

    pub fn read_storage(namespace: &str, key: &str) -> ContractResult<Vec<u8>> {
        with_runtime(|rt| rt.read_storage(namespace, key))
    }

    pub fn write_storage(namespace: &str, key: &str, value: &[u8]) -> ContractResult<()> {
        with_runtime(|rt| rt.write_storage(namespace, key, value))
    }

    pub fn log_message(message: &str) {
        with_runtime(|rt| rt.logs.push(message.to_string()));
    }

    pub fn emit_event_internal(topic: &str, data: &[u8]) {
        with_runtime(|rt| {
            rt.events.push(EventRecord {
                topic: topic.to_string(),
                data: data.to_vec(),
            })
        });
    }

    pub fn tx_id() -> String {
        with_runtime(|rt| rt.tx_id.clone())
    }

    pub fn channel_id() -> String {
        with_runtime(|rt| rt.channel_id.clone())
    }

    pub fn chaincode_name() -> String {
        with_runtime(|rt| rt.chaincode_name.clone())
    }

    pub fn read_call_data_internal() -> ContractResult<Vec<u8>> {
        with_runtime(|rt| Ok(rt.call_data.clone()))
    }

    pub fn write_return_data_internal(data: &[u8]) -> ContractResult<()> {
        with_runtime(|rt| {
            if rt.fail_return_data {
                return Err(ContractError::ReturnDataWriteFailed);
            }
            rt.return_data = data.to_vec();
            Ok(())
        })
    }

    pub fn write_error_message_internal(message: &str) -> ContractResult<()> {
        with_runtime(|rt| {
            rt.error_message = Some(message.to_string());
            Ok(())
        })
    }

    pub fn reset() {
        with_runtime(|rt| *rt = MockRuntime::default());
    }

    pub fn set_tx_id(tx_id: &str) {
        with_runtime(|rt| rt.tx_id = tx_id.to_string());
    }

    pub fn set_channel_id(channel_id: &str) {
        with_runtime(|rt| rt.channel_id = channel_id.to_string());
    }

    pub fn set_chaincode_name(name: &str) {
        with_runtime(|rt| rt.chaincode_name = name.to_string());
    }

    pub fn set_call_data(data: &[u8]) {
        with_runtime(|rt| rt.call_data = data.to_vec());
    }

    pub fn fail_reads(enabled: bool) {
        with_runtime(|rt| rt.fail_reads = enabled);
    }

    pub fn fail_writes(enabled: bool) {
        with_runtime(|rt| rt.fail_writes = enabled);
    }

    pub fn fail_return_data(enabled: bool) {
        with_runtime(|rt| rt.fail_return_data = enabled);
    }

    pub fn put_raw(namespace: &str, key: &str, value: &[u8]) {
        with_runtime(|rt| {
            rt.storage
                .insert(MockRuntime::storage_key(namespace, key), value.to_vec());
        });
    }

    pub fn inspect_storage(namespace: &str, key: &str) -> Vec<u8> {
        with_runtime(|rt| {
            let lookup = MockRuntime::storage_key(namespace, key);
            rt.storage.get(&lookup).cloned().unwrap_or_default()
        })
    }

    pub fn take_events() -> Vec<EventRecord> {
        with_runtime(|rt| core::mem::take(&mut rt.events))
    }

    pub fn take_logs() -> Vec<String> {
        with_runtime(|rt| core::mem::take(&mut rt.logs))
    }

    pub fn take_return_data() -> Vec<u8> {
        with_runtime(|rt| core::mem::take(&mut rt.return_data))
    }

    pub fn take_error_message() -> Option<String> {
        with_runtime(|rt| rt.error_message.take())
    }

    pub use EventRecord as MockEventRecord;
}

pub(crate) fn read_storage(namespace: &str, key: &str) -> ContractResult<Vec<u8>> {
    host::read_storage(namespace, key)
}

pub(crate) fn write_storage(namespace: &str, key: &str, value: &[u8]) -> ContractResult<()> {
    host::write_storage(namespace, key, value)
}

pub(crate) fn log_message(message: &str) {
    host::log_message(message);
}

pub(crate) fn emit_event_internal(topic: &str, data: &[u8]) {
    host::emit_event_internal(topic, data);
}

pub(crate) fn get_tx_id() -> String {
    host::tx_id()
}

pub(crate) fn get_channel_id() -> String {
    host::channel_id()
}

pub(crate) fn get_chaincode_name() -> String {
    host::chaincode_name()
}

pub(crate) fn read_call_data() -> ContractResult<Vec<u8>> {
    host::read_call_data_internal()
}

pub(crate) fn write_return_data(data: &[u8]) -> ContractResult<()> {
    host::write_return_data_internal(data)
}

pub(crate) fn write_error_message(message: &str) -> ContractResult<()> {
    host::write_error_message_internal(message)
}

#[cfg(not(target_arch = "wasm32"))]
pub mod mock {
    use super::host;
    use alloc::string::String;
    use alloc::vec::Vec;

    pub use host::MockEventRecord as EventRecord;

    /// Guard serializing tests that share the process-wide mock runtime.
    pub type ExclusiveGuard = spin::MutexGuard<'static, ()>;

    /// Take the mock runtime for the duration of a test.
    ///
    /// Tests run on parallel threads but the runtime is a single global, so
    /// every test touching it holds this guard before calling [`reset`].
    pub fn exclusive() -> ExclusiveGuard {
        host::exclusive()
    }

    /// Restore empty storage, default identities and cleared failure flags.
    pub fn reset() {
        host::reset();
    }

    pub fn set_tx_id(tx_id: &str) {
        host::set_tx_id(tx_id);
    }

    pub fn set_channel_id(channel_id: &str) {
        host::set_channel_id(channel_id);
    }

    pub fn set_chaincode_name(name: &str) {
        host::set_chaincode_name(name);
    }

    pub fn set_call_data(data: &[u8]) {
        host::set_call_data(data);
    }

    /// Make every world-state read fail until disabled.
    pub fn fail_reads(enabled: bool) {
        host::fail_reads(enabled);
    }

    /// Make every world-state write fail until disabled.
    pub fn fail_writes(enabled: bool) {
        host::fail_writes(enabled);
    }

    /// Make handing return data to the host fail until disabled.
    pub fn fail_return_data(enabled: bool) {
        host::fail_return_data(enabled);
    }

    /// Seed world state directly, bypassing chaincode validation.
    pub fn put_raw(namespace: &str, key: &str, value: &[u8]) {
        host::put_raw(namespace, key, value);
    }

    pub fn inspect_storage(namespace: &str, key: &str) -> Vec<u8> {
        host::inspect_storage(namespace, key)
    }

    pub fn take_events() -> Vec<EventRecord> {
        host::take_events()
    }

    pub fn take_logs() -> Vec<String> {
        host::take_logs()
    }

    pub fn take_return_data() -> Vec<u8> {
        host::take_return_data()
    }

    pub fn take_error_message() -> Option<String> {
        host::take_error_message()
    }
}
