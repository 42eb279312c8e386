//! Event emission and logging for chaincode

use crate::ffi;
use serde::Serialize;

/// Emit a chaincode event for off-chain listeners
pub fn emit<T: Serialize>(topic: &str, data: &T) {
    if let Ok(data_bytes) = postcard::to_allocvec(data) {
        ffi::emit_event_internal(topic, &data_bytes);
    }
}

/// Write a line to the peer's chaincode log
pub fn log(message: &str) {
    ffi::log_message(message);
}

/// Helper macro for creating structured events
#[macro_export]
macro_rules! event {
    ($topic:expr, $($field:ident: $value:expr),* $(,)?) => {
        {
            use $crate::events::emit;
            use serde::Serialize;

            #[derive(Serialize)]
            struct EventData {
                $($field: alloc::string::String),*
            }

            let event_data = EventData {
                $($field: {
                    alloc::format!("{}", $value)
                }),*
            };

            emit($topic, &event_data);
        }
    };
}
