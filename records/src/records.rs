//! Typed records kept in world state as JSON
//!
//! Both shapes decode leniently: missing fields take their zero value and a
//! value that is not a matching JSON object reads as absent. A record is
//! only returned when it passes its identity check.

use chaincode_sdk::prelude::*;

/// Tag stored in the `docType` field of every event record.
pub const EVENT_DOC_TYPE: &str = "event";

/// Tag stored in the `docType` field of every owner record.
pub const OWNER_DOC_TYPE: &str = "owner";

/// Owner record
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Owner {
    #[serde(rename = "docType")]
    pub document_type: String,
    pub id: String,
    pub username: String,
}

impl Owner {
    pub fn new(id: &str, username: &str) -> Self {
        Self {
            document_type: OWNER_DOC_TYPE.to_string(),
            id: id.to_string(),
            username: username.to_string(),
        }
    }
}

/// Event record with its embedded owner
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Event {
    #[serde(rename = "docType")]
    pub document_type: String,
    pub id: String,
    #[serde(rename = "size")]
    pub amount: i64,
    pub owner: Owner,
}

impl Event {
    pub fn new(id: &str, amount: i64, owner: Owner) -> Self {
        Self {
            document_type: EVENT_DOC_TYPE.to_string(),
            id: id.to_string(),
            amount,
            owner,
        }
    }
}

/// Look up the event stored under `id`.
///
/// `Ok(None)` when nothing decodable is stored there or the stored event
/// carries a different id. Fails only when the store itself cannot be read.
pub fn find_event(id: &str) -> ContractResult<Option<Event>> {
    let event = storage()
        .get_json::<Event>(id)
        .map_err(|_| ContractError::RecordNotFound(id.to_string()))?;
    Ok(event.filter(|event| event.id == id))
}

/// Look up the owner stored under `id`; owners without a username are absent.
pub fn find_owner(id: &str) -> ContractResult<Option<Owner>> {
    let owner = storage()
        .get_json::<Owner>(id)
        .map_err(|_| ContractError::RecordNotFound(id.to_string()))?;
    Ok(owner.filter(|owner| !owner.username.is_empty()))
}

/// Fetch the event stored under `id`, failing if there is none.
pub fn get_event(id: &str) -> ContractResult<Event> {
    find_event(id)?.ok_or_else(|| ContractError::RecordMismatch(id.to_string()))
}

/// Fetch the owner stored under `id`, failing if there is none.
pub fn get_owner(id: &str) -> ContractResult<Owner> {
    find_owner(id)?.ok_or_else(|| ContractError::RecordMismatch(id.to_string()))
}

/// Store an event under its own id.
pub fn put_event(event: &Event) -> ContractResult<()> {
    validation::validate_non_empty(&event.id, "Event id")?;
    storage().put_json(&event.id, event)?;
    log(&format!("stored event {:?}", event.id));
    Ok(())
}

/// Store an owner under its own id.
pub fn put_owner(owner: &Owner) -> ContractResult<()> {
    validation::validate_non_empty(&owner.id, "Owner id")?;
    storage().put_json(&owner.id, owner)?;
    log(&format!("stored owner {:?}", owner.id));
    Ok(())
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod tests {
    use super::*;
    use chaincode_sdk::ffi::mock;

    const NAMESPACE: &str = "records";

    fn fresh() -> mock::ExclusiveGuard {
        let guard = mock::exclusive();
        mock::reset();
        guard
    }

    fn alice() -> Owner {
        Owner::new("o-1", "alice")
    }

    #[test]
    fn constructors_tag_document_type() {
        let event = Event::new("ev-1", 10, alice());
        assert_eq!(event.document_type, EVENT_DOC_TYPE);
        assert_eq!(event.owner.document_type, OWNER_DOC_TYPE);
    }

    #[test]
    fn stored_event_is_returned_unchanged() {
        let _env = fresh();
        let event = Event::new("ev-1", 250, alice());
        put_event(&event).expect("store event");

        assert_eq!(get_event("ev-1").expect("fetch event"), event);
        assert_eq!(find_event("ev-1").expect("lookup"), Some(event));
    }

    #[test]
    fn event_json_uses_ledger_field_names() {
        let _env = fresh();
        put_event(&Event::new("ev-2", 7, alice())).expect("store event");

        let raw = mock::inspect_storage(NAMESPACE, "ev-2");
        let value: serde_json::Value = serde_json::from_slice(&raw).expect("stored json");
        assert_eq!(value["docType"], "event");
        assert_eq!(value["id"], "ev-2");
        assert_eq!(value["size"], 7);
        assert_eq!(value["owner"]["docType"], "owner");
        assert_eq!(value["owner"]["username"], "alice");
    }

    #[test]
    fn missing_event_is_a_mismatch() {
        let _env = fresh();
        assert_eq!(find_event("ev-9").expect("lookup"), None);
        assert_eq!(
            get_event("ev-9").unwrap_err(),
            ContractError::RecordMismatch("ev-9".to_string())
        );
    }

    #[test]
    fn event_under_foreign_key_is_a_mismatch() {
        let _env = fresh();
        let stored = serde_json::to_vec(&Event::new("ev-1", 1, alice())).expect("encode");
        mock::put_raw(NAMESPACE, "ev-2", &stored);

        assert_eq!(
            get_event("ev-2").unwrap_err(),
            ContractError::RecordMismatch("ev-2".to_string())
        );
    }

    #[test]
    fn undecodable_event_is_a_mismatch() {
        let _env = fresh();
        mock::put_raw(NAMESPACE, "ev-3", b"100");
        assert_eq!(find_event("ev-3").expect("lookup"), None);

        mock::put_raw(NAMESPACE, "ev-4", br#"{"id":"ev-4","size":"lots"}"#);
        assert_eq!(find_event("ev-4").expect("lookup"), None);
    }

    #[test]
    fn partial_event_decodes_with_defaults() {
        let _env = fresh();
        mock::put_raw(NAMESPACE, "ev-5", br#"{"id":"ev-5"}"#);

        let event = get_event("ev-5").expect("fetch event");
        assert_eq!(event.amount, 0);
        assert_eq!(event.owner, Owner::default());
        assert!(event.document_type.is_empty());
    }

    #[test]
    fn store_failure_is_not_found() {
        let _env = fresh();
        mock::fail_reads(true);

        assert_eq!(
            get_event("ev-1").unwrap_err(),
            ContractError::RecordNotFound("ev-1".to_string())
        );
        assert_eq!(
            get_owner("o-1").unwrap_err(),
            ContractError::RecordNotFound("o-1".to_string())
        );
    }

    #[test]
    fn stored_owner_is_returned_unchanged() {
        let _env = fresh();
        put_owner(&alice()).expect("store owner");
        assert_eq!(get_owner("o-1").expect("fetch owner"), alice());
    }

    #[test]
    fn owner_without_username_is_a_mismatch() {
        let _env = fresh();
        put_owner(&Owner::new("o-2", "")).expect("store owner");

        assert_eq!(find_owner("o-2").expect("lookup"), None);
        assert_eq!(
            get_owner("o-2").unwrap_err(),
            ContractError::RecordMismatch("o-2".to_string())
        );
        assert_eq!(
            get_owner("o-3").unwrap_err(),
            ContractError::RecordMismatch("o-3".to_string())
        );
    }

    #[test]
    fn owner_lookup_only_checks_username() {
        let _env = fresh();
        mock::put_raw(NAMESPACE, "o-4", br#"{"id":"someone-else","username":"bob"}"#);

        let owner = get_owner("o-4").expect("fetch owner");
        assert_eq!(owner.username, "bob");
        assert_eq!(owner.id, "someone-else");
    }

    #[test]
    fn records_need_an_id() {
        let _env = fresh();
        let err = put_owner(&Owner::new("", "carol")).unwrap_err();
        assert!(matches!(err, ContractError::InvalidArgument(_)));
    }
}
