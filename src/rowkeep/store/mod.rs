//! # Storage Layer
//!
//! This module defines the record store abstraction. The [`DataStore`] trait is
//! the contract a caller (a form, a CLI, a script runner) programs against;
//! [`memory::RecordStore`] is the in-memory implementation.
//!
//! ## Ordering
//!
//! A store is an ordered sequence. New records are appended, updates keep a
//! record in place, removal shifts everything behind it one slot forward.
//! Insertion order is the only navigation order: there is no sort key.
//!
//! ## Identity
//!
//! No two records in a store share an id, and no record uses the Blank
//! Record's id. `add` with a colliding id is rejected and leaves the store
//! untouched.
//!
//! ## Navigation
//!
//! `next_record` and `previous_record` treat the sequence as a ring. An id that
//! is not in the store behaves as "before first" for `next` and "after last"
//! for `previous`, so navigation never fails. When there is nothing to return
//! (empty store) the store hands back its Blank Record, a sentinel supplied by
//! the owner at construction.
//!
//! The `_checked` variants report an unknown id as
//! [`StoreError::RecordNotFound`] instead of degrading to a boundary record.
//!
//! ## Guarded Updates
//!
//! Stores of [`Activatable`](crate::model::Activatable) records additionally implement [`GuardedStore`].
//! The caller passes an `active_flag`:
//!
//! | `active_flag` | Accepted change | Otherwise |
//! |---------------|-----------------|-----------|
//! | `true`  | Full replace (same id) | - |
//! | `false` | Reactivation only: the stored record with `active = true` | `ReadOnly` |
//!
//! Every mutation either applies completely or not at all.
//!
//! ## Status Values
//!
//! Operations return [`StoreResult`]; [`crate::error::Status`] flattens that
//! into the closed set `NoError`, `RecordExists`, `RecordNotFound`,
//! `ReadOnly`, `NoDelete` for callers that want a single value.

use crate::error::{Status, StoreError, StoreResult};
use crate::model::Identifiable;

pub mod memory;
pub mod navigate;

/// Shorthand for the id type of a store's records.
pub type RowId<S> = <<S as DataStore>::Row as Identifiable>::Id;

/// Abstract interface for an ordered, identity-unique record collection.
pub trait DataStore {
    type Row: Identifiable;

    /// The sentinel returned when there is no record to hand back.
    fn blank(&self) -> &Self::Row;

    /// All records in navigation order.
    fn records(&self) -> &[Self::Row];

    /// Position of `id` in the sequence, if present.
    fn index(&self, id: &<Self::Row as Identifiable>::Id) -> Option<usize>;

    /// Append a record. Rejected with `RecordExists` if its id is taken,
    /// including by the Blank Record.
    fn add(&mut self, row: Self::Row) -> StoreResult<()>;

    /// Remove a record. Rejected with `NoDelete` if the id is absent.
    fn remove(&mut self, id: &<Self::Row as Identifiable>::Id) -> StoreResult<Self::Row>;

    fn len(&self) -> usize {
        self.records().len()
    }

    fn is_empty(&self) -> bool {
        self.records().is_empty()
    }

    fn exists(&self, id: &<Self::Row as Identifiable>::Id) -> bool {
        self.index(id).is_some()
    }

    fn get(&self, id: &<Self::Row as Identifiable>::Id) -> StoreResult<&Self::Row> {
        self.index(id)
            .map(|pos| &self.records()[pos])
            .ok_or(StoreError::RecordNotFound)
    }

    /// Lookup that always yields a record: the Blank Record on absence.
    fn find(&self, id: &<Self::Row as Identifiable>::Id) -> (&Self::Row, Status) {
        match self.get(id) {
            Ok(row) => (row, Status::NoError),
            Err(e) => (self.blank(), e.into()),
        }
    }

    fn first_record(&self) -> &Self::Row {
        at_or_blank(self, navigate::first_position(self.len()))
    }

    fn last_record(&self) -> &Self::Row {
        at_or_blank(self, navigate::last_position(self.len()))
    }

    fn next_record(&self, id: &<Self::Row as Identifiable>::Id) -> &Self::Row {
        at_or_blank(self, navigate::next_position(self.index(id), self.len()))
    }

    fn previous_record(&self, id: &<Self::Row as Identifiable>::Id) -> &Self::Row {
        at_or_blank(self, navigate::previous_position(self.index(id), self.len()))
    }

    fn next_record_checked(
        &self,
        id: &<Self::Row as Identifiable>::Id,
    ) -> StoreResult<&Self::Row> {
        let pos = self.index(id).ok_or(StoreError::RecordNotFound)?;
        Ok(at_or_blank(self, navigate::next_position(Some(pos), self.len())))
    }

    fn previous_record_checked(
        &self,
        id: &<Self::Row as Identifiable>::Id,
    ) -> StoreResult<&Self::Row> {
        let pos = self.index(id).ok_or(StoreError::RecordNotFound)?;
        Ok(at_or_blank(self, navigate::previous_position(Some(pos), self.len())))
    }
}

fn at_or_blank<S: DataStore + ?Sized>(store: &S, pos: Option<usize>) -> &S::Row {
    pos.and_then(|p| store.records().get(p))
        .unwrap_or_else(|| store.blank())
}

/// Update operations for stores whose records carry an activity flag.
///
/// Implemented for stores of [`Activatable`](crate::model::Activatable) records.
pub trait GuardedStore: DataStore {
    /// Replace the record stored under `id` with `row`.
    ///
    /// `row` must keep the id. With `active_flag == false` only a reactivation
    /// of the stored record is accepted.
    fn update_by_id(
        &mut self,
        id: &<Self::Row as Identifiable>::Id,
        row: Self::Row,
        active_flag: bool,
    ) -> StoreResult<()>;

    /// Same as [`GuardedStore::update_by_id`], targeting the stored record
    /// with `new`'s id. `old` is the caller's copy of the record being edited;
    /// it may be stale and is not consulted.
    fn update(&mut self, _old: &Self::Row, new: Self::Row, active_flag: bool) -> StoreResult<()> {
        let id = new.id().clone();
        self.update_by_id(&id, new, active_flag)
    }
}
