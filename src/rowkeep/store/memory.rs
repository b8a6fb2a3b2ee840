use super::{DataStore, GuardedStore};
use crate::error::{Result, StoreError, StoreResult};
use crate::model::{Activatable, Identifiable};
use serde::de::DeserializeOwned;
use serde::{Serialize, Serializer};
use std::collections::HashMap;
use tracing::debug;

/// In-memory record store.
///
/// Keeps records in insertion order plus an id → position index so lookups
/// do not scan. The index is rebuilt for the shifted tail on removal.
///
/// Not synchronized: callers sharing a store across threads wrap it in a lock.
#[derive(Debug, Clone)]
pub struct RecordStore<Row: Identifiable> {
    records: Vec<Row>,
    positions: HashMap<Row::Id, usize>,
    blank: Row,
}

impl<Row: Identifiable> RecordStore<Row> {
    /// Create an empty store. `blank` is returned whenever there is no record
    /// to hand back, so its id must never be used by a real record.
    pub fn new(blank: Row) -> Self {
        Self {
            records: Vec::new(),
            positions: HashMap::new(),
            blank,
        }
    }

    /// Rebuild a store from an ordered sequence of records.
    ///
    /// Fails with `RecordExists` on the first duplicate id, or on a record
    /// using the blank's id; nothing is built.
    pub fn from_records<I>(blank: Row, rows: I) -> StoreResult<Self>
    where
        I: IntoIterator<Item = Row>,
    {
        let mut store = Self::new(blank);
        for row in rows {
            store.add(row)?;
        }
        Ok(store)
    }

    /// Rebuild a store from a JSON array of records.
    pub fn from_json(blank: Row, json: &str) -> Result<Self>
    where
        Row: DeserializeOwned,
    {
        let rows: Vec<Row> = serde_json::from_str(json)?;
        Ok(Self::from_records(blank, rows)?)
    }

    /// Serialize the records, in order, as a JSON array.
    pub fn to_json(&self) -> Result<String>
    where
        Row: Serialize,
    {
        Ok(serde_json::to_string_pretty(&self.records)?)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Row> {
        self.records.iter()
    }

    pub fn into_records(self) -> Vec<Row> {
        self.records
    }

    fn reindex_from(&mut self, start: usize) {
        for (pos, row) in self.records.iter().enumerate().skip(start) {
            self.positions.insert(row.id().clone(), pos);
        }
    }
}

impl<Row: Identifiable> DataStore for RecordStore<Row> {
    type Row = Row;

    fn blank(&self) -> &Row {
        &self.blank
    }

    fn records(&self) -> &[Row] {
        &self.records
    }

    fn index(&self, id: &Row::Id) -> Option<usize> {
        self.positions.get(id).copied()
    }

    fn add(&mut self, row: Row) -> StoreResult<()> {
        if self.positions.contains_key(row.id()) {
            debug!(target: "rowkeep::store", id = ?row.id(), "add rejected: id taken");
            return Err(StoreError::RecordExists);
        }
        // The blank record owns its id.
        if row.id() == self.blank.id() {
            debug!(target: "rowkeep::store", id = ?row.id(), "add rejected: blank id");
            return Err(StoreError::RecordExists);
        }
        let pos = self.records.len();
        self.positions.insert(row.id().clone(), pos);
        debug!(target: "rowkeep::store", id = ?row.id(), pos, "record added");
        self.records.push(row);
        Ok(())
    }

    fn remove(&mut self, id: &Row::Id) -> StoreResult<Row> {
        let Some(pos) = self.positions.remove(id) else {
            debug!(target: "rowkeep::store", id = ?id, "remove rejected: not found");
            return Err(StoreError::NoDelete);
        };
        let row = self.records.remove(pos);
        self.reindex_from(pos);
        debug!(target: "rowkeep::store", id = ?id, pos, "record removed");
        Ok(row)
    }
}

impl<Row> GuardedStore for RecordStore<Row>
where
    Row: Activatable + Clone + PartialEq,
{
    fn update_by_id(&mut self, id: &Row::Id, row: Row, active_flag: bool) -> StoreResult<()> {
        let Some(pos) = self.index(id) else {
            debug!(target: "rowkeep::store", id = ?id, "update rejected: not found");
            return Err(StoreError::RecordNotFound);
        };
        if row.id() != id {
            debug!(
                target: "rowkeep::store",
                id = ?id,
                new_id = ?row.id(),
                "update rejected: id change"
            );
            return Err(StoreError::RecordNotFound);
        }

        if !active_flag {
            let mut reopened = self.records[pos].clone();
            reopened.set_active(true);
            if !row.is_active() || row != reopened {
                debug!(target: "rowkeep::store", id = ?id, "update rejected: read only");
                return Err(StoreError::ReadOnly);
            }
        }

        self.records[pos] = row;
        debug!(target: "rowkeep::store", id = ?id, pos, active_flag, "record updated");
        Ok(())
    }
}

impl<Row> Serialize for RecordStore<Row>
where
    Row: Identifiable + Serialize,
{
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        self.records.serialize(serializer)
    }
}

impl<'a, Row: Identifiable> IntoIterator for &'a RecordStore<Row> {
    type Item = &'a Row;
    type IntoIter = std::slice::Iter<'a, Row>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

// --- Test Fixtures ---

#[cfg(any(test, feature = "test_utils"))]
pub mod fixtures {
    use super::*;
    use crate::model::Contact;

    pub type ContactStore = RecordStore<Contact>;

    pub struct StoreFixture {
        pub store: ContactStore,
        next_id: u32,
    }

    impl Default for StoreFixture {
        fn default() -> Self {
            Self::new()
        }
    }

    impl StoreFixture {
        pub fn new() -> Self {
            Self {
                store: RecordStore::new(Contact::blank()),
                next_id: 1,
            }
        }

        fn push(mut self, contact: Contact) -> Self {
            self.store.add(contact).unwrap();
            self.next_id += 1;
            self
        }

        pub fn with_contacts(mut self, count: usize) -> Self {
            for _ in 0..count {
                let id = self.next_id;
                self = self.push(Contact::new(id, format!("Contact {}", id)));
            }
            self
        }

        pub fn with_active_contact(self, name: &str) -> Self {
            let id = self.next_id;
            self.push(Contact::new(id, name))
        }

        pub fn with_inactive_contact(self, name: &str) -> Self {
            let id = self.next_id;
            self.push(Contact::new(id, name).inactive())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::fixtures::{ContactStore, StoreFixture};
    use super::*;
    use crate::error::Status;
    use crate::model::{Contact, Ticket};

    fn abc() -> ContactStore {
        StoreFixture::new()
            .with_active_contact("A")
            .with_active_contact("B")
            .with_active_contact("C")
            .store
    }

    fn names(store: &ContactStore) -> Vec<&str> {
        store.iter().map(|c| c.name.as_str()).collect()
    }

    #[test]
    fn add_then_find_round_trips() {
        let mut store = RecordStore::new(Contact::blank());
        let ada = Contact::new(1, "Ada").with_email("ada@example.com");
        store.add(ada.clone()).unwrap();

        let (found, status) = store.find(&1);
        assert_eq!(status, Status::NoError);
        assert_eq!(found, &ada);
    }

    #[test]
    fn duplicate_add_is_rejected_and_store_unchanged() {
        let mut store = abc();
        let err = store.add(Contact::new(2, "Imposter")).unwrap_err();
        assert_eq!(err, StoreError::RecordExists);
        assert_eq!(store.len(), 3);
        assert_eq!(names(&store), vec!["A", "B", "C"]);
    }

    #[test]
    fn find_missing_returns_blank() {
        let store = abc();
        let (row, status) = store.find(&42);
        assert_eq!(status, Status::RecordNotFound);
        assert_eq!(row, &Contact::blank());
        assert_eq!(store.get(&42), Err(StoreError::RecordNotFound));
    }

    #[test]
    fn exists_and_index_follow_insertion_order() {
        let store = abc();
        assert!(store.exists(&1));
        assert!(!store.exists(&9));
        assert_eq!(store.index(&1), Some(0));
        assert_eq!(store.index(&3), Some(2));
        assert_eq!(store.index(&9), None);
    }

    #[test]
    fn navigation_wraps_around() {
        let store = abc();
        assert_eq!(store.first_record().name, "A");
        assert_eq!(store.last_record().name, "C");
        assert_eq!(store.next_record(&1).name, "B");
        assert_eq!(store.next_record(&3).name, "A");
        assert_eq!(store.previous_record(&3).name, "B");
        assert_eq!(store.previous_record(&1).name, "C");
    }

    #[test]
    fn navigation_from_unknown_id_lands_on_boundaries() {
        let store = abc();
        assert_eq!(store.next_record(&99).name, "A");
        assert_eq!(store.previous_record(&99).name, "C");
    }

    #[test]
    fn checked_navigation_reports_unknown_id() {
        let store = abc();
        assert_eq!(store.next_record_checked(&99), Err(StoreError::RecordNotFound));
        assert_eq!(
            store.previous_record_checked(&99),
            Err(StoreError::RecordNotFound)
        );
        assert_eq!(store.next_record_checked(&3).unwrap().name, "A");
        assert_eq!(store.previous_record_checked(&1).unwrap().name, "C");
    }

    #[test]
    fn empty_store_navigation_returns_blank() {
        let store = RecordStore::new(Contact::blank());
        let blank = Contact::blank();
        assert!(store.is_empty());
        assert_eq!(store.first_record(), &blank);
        assert_eq!(store.last_record(), &blank);
        assert_eq!(store.next_record(&1), &blank);
        assert_eq!(store.previous_record(&1), &blank);
    }

    #[test]
    fn full_replace_keeps_position() {
        let mut store = abc();
        let renamed = Contact::new(2, "Bea").with_email("bea@example.com");
        store.update_by_id(&2, renamed.clone(), true).unwrap();

        assert_eq!(store.index(&2), Some(1));
        assert_eq!(store.get(&2).unwrap(), &renamed);
        assert_eq!(names(&store), vec!["A", "Bea", "C"]);
    }

    #[test]
    fn blank_id_is_reserved() {
        let mut store = abc();
        let err = store.add(Contact::new(0, "Zero")).unwrap_err();
        assert_eq!(err, StoreError::RecordExists);
        assert!(!store.exists(&0));
        assert_eq!(store.len(), 3);

        let json = r#"[{"id": 0, "active": true, "name": "Zero"},
                       {"id": 1, "active": true, "name": "One"}]"#;
        let err = RecordStore::from_json(Contact::blank(), json).unwrap_err();
        assert!(matches!(
            err,
            crate::error::RowkeepError::Store(StoreError::RecordExists)
        ));
    }

    #[test]
    fn update_targets_the_new_records_id() {
        let mut store = abc();
        let old = store.get(&3).unwrap().clone();
        store.update(&old, Contact::new(3, "Cy"), true).unwrap();
        assert_eq!(store.get(&3).unwrap().name, "Cy");

        let stale = Contact::new(99, "gone");
        store.update(&stale, Contact::new(1, "A2"), true).unwrap();
        assert_eq!(store.get(&1).unwrap().name, "A2");
        assert_eq!(store.index(&1), Some(0));
        assert!(!store.exists(&99));
    }

    #[test]
    fn update_with_absent_new_id_is_not_found() {
        let mut store = abc();
        let old = store.get(&1).unwrap().clone();
        let err = store.update(&old, Contact::new(7, "Ghost"), true).unwrap_err();
        assert_eq!(err, StoreError::RecordNotFound);
        assert_eq!(names(&store), vec!["A", "B", "C"]);
    }

    #[test]
    fn update_missing_id_is_not_found() {
        let mut store = abc();
        let err = store
            .update_by_id(&7, Contact::new(7, "Ghost"), true)
            .unwrap_err();
        assert_eq!(err, StoreError::RecordNotFound);
        assert_eq!(store.len(), 3);
    }

    #[test]
    fn update_cannot_change_identity() {
        let mut store = abc();
        let err = store
            .update_by_id(&1, Contact::new(3, "Clash"), true)
            .unwrap_err();
        assert_eq!(err, StoreError::RecordNotFound);
        assert_eq!(names(&store), vec!["A", "B", "C"]);
    }

    #[test]
    fn locked_record_rejects_edits() {
        let mut store = StoreFixture::new().with_inactive_contact("B").store;
        let before = store.get(&1).unwrap().clone();

        let edit = Contact::new(1, "C").inactive();
        assert_eq!(store.update_by_id(&1, edit, false), Err(StoreError::ReadOnly));

        let reopen_and_edit = Contact::new(1, "C");
        assert_eq!(
            store.update_by_id(&1, reopen_and_edit, false),
            Err(StoreError::ReadOnly)
        );

        assert_eq!(store.get(&1).unwrap(), &before);
    }

    #[test]
    fn locked_record_noop_is_read_only() {
        let mut store = StoreFixture::new().with_inactive_contact("B").store;
        let same = store.get(&1).unwrap().clone();
        assert_eq!(store.update_by_id(&1, same, false), Err(StoreError::ReadOnly));
    }

    #[test]
    fn locked_record_can_be_reactivated() {
        let mut store = StoreFixture::new().with_inactive_contact("B").store;
        store.update_by_id(&1, Contact::new(1, "B"), false).unwrap();
        assert!(store.get(&1).unwrap().active);
    }

    #[test]
    fn remove_present_shrinks_store_and_reindexes() {
        let mut store = abc();
        let removed = store.remove(&1).unwrap();
        assert_eq!(removed.name, "A");
        assert_eq!(store.len(), 2);
        assert!(!store.exists(&1));
        assert_eq!(store.index(&2), Some(0));
        assert_eq!(store.index(&3), Some(1));
        assert_eq!(store.first_record().name, "B");
    }

    #[test]
    fn remove_absent_is_no_delete() {
        let mut store = abc();
        assert_eq!(store.remove(&9), Err(StoreError::NoDelete));
        assert_eq!(store.len(), 3);
    }

    #[test]
    fn readding_removed_id_appends_at_end() {
        let mut store = abc();
        store.remove(&1).unwrap();
        store.add(Contact::new(1, "A again")).unwrap();
        assert_eq!(names(&store), vec!["B", "C", "A again"]);
        assert_eq!(store.index(&1), Some(2));
    }

    #[test]
    fn json_round_trip_preserves_order() {
        let store = abc();
        let json = store.to_json().unwrap();
        let rebuilt = RecordStore::from_json(Contact::blank(), &json).unwrap();
        assert_eq!(rebuilt.records(), store.records());
        assert_eq!(
            serde_json::to_string(&store).unwrap(),
            serde_json::to_string(&rebuilt).unwrap()
        );
    }

    #[test]
    fn from_records_rejects_duplicates() {
        let rows = vec![Contact::new(1, "A"), Contact::new(1, "B")];
        let err = RecordStore::from_records(Contact::blank(), rows).unwrap_err();
        assert_eq!(err, StoreError::RecordExists);
    }

    #[test]
    fn ticket_store_close_and_reopen() {
        let mut store = RecordStore::new(Ticket::blank());
        let ticket = Ticket::open("Printer jam");
        let id = ticket.id;
        store.add(ticket.clone()).unwrap();

        store.update(&ticket, ticket.closed(), true).unwrap();
        assert!(!store.get(&id).unwrap().active);

        let mut retitled = ticket.closed();
        retitled.title = "Printer on fire".into();
        assert_eq!(
            store.update_by_id(&id, retitled, false),
            Err(StoreError::ReadOnly)
        );

        store.update_by_id(&id, ticket.reopened(), false).unwrap();
        assert_eq!(store.get(&id).unwrap(), &ticket);
        assert_eq!(store.next_record(&uuid::Uuid::nil()), &ticket);
    }

    #[test]
    fn fixtures_assign_sequential_ids() {
        let fixture = StoreFixture::default()
            .with_contacts(2)
            .with_active_contact("Active")
            .with_inactive_contact("Inactive");

        let store = fixture.store;
        assert_eq!(store.len(), 4);
        assert_eq!(store.records()[0].name, "Contact 1");
        assert_eq!(store.get(&3).unwrap().name, "Active");
        assert!(!store.get(&4).unwrap().active);
        assert_eq!((&store).into_iter().count(), 4);
    }
}
