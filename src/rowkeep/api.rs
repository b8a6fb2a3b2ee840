//! # API Facade
//!
//! [`RowkeepApi`] is what a form-style UI talks to. It owns a store and a
//! cursor, the id of the record currently on screen, and turns each user
//! action (first, next, save, reopen, delete...) into store operations.
//!
//! ## What the API Does NOT Do
//!
//! - **Business rules**: identity and the Locked/Editable guard live in the
//!   store. The API only decides which record an action targets.
//! - **I/O**: no stdout, no files. Every method returns a [`CmdResult`] with
//!   the resulting record, a [`Status`] and user-facing [`CmdMessage`]s.
//!
//! ## Cursor Rules
//!
//! - No cursor yet: `next` behaves like `first`, `previous` like `last`.
//! - Cursor on a removed or foreign id: `next`/`previous` wrap to a boundary
//!   record when `wrap_unknown` is set, otherwise they report
//!   `RecordNotFound` and leave the cursor alone.
//! - After `remove`, the cursor moves to the record that followed the removed
//!   one, or is cleared when the store becomes empty.
//!
//! ## Generic Over DataStore
//!
//! `RowkeepApi<S: GuardedStore>` works with any store implementation and any
//! record type implementing [`Activatable`].

use crate::config::RowkeepConfig;
use crate::error::{Status, StoreError, StoreResult};
use crate::model::{Activatable, Identifiable};
use crate::store::{GuardedStore, RowId};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageLevel {
    Info,
    Success,
    Warning,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CmdMessage {
    pub level: MessageLevel,
    pub content: String,
}

impl CmdMessage {
    pub fn info(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Info,
            content: content.into(),
        }
    }

    pub fn success(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Success,
            content: content.into(),
        }
    }

    pub fn warning(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Warning,
            content: content.into(),
        }
    }

    pub fn error(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Error,
            content: content.into(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct CmdResult<Row> {
    pub status: Status,
    /// The record on screen after the command, blank included.
    pub record: Option<Row>,
    /// True when `record` is not a stored record (the store's blank).
    pub at_blank: bool,
    pub listed: Vec<Row>,
    pub messages: Vec<CmdMessage>,
}

impl<Row> CmdResult<Row> {
    pub fn new(status: Status) -> Self {
        Self {
            status,
            record: None,
            at_blank: false,
            listed: Vec::new(),
            messages: Vec::new(),
        }
    }

    pub fn add_message(&mut self, message: CmdMessage) {
        self.messages.push(message);
    }

    pub fn with_message(mut self, message: CmdMessage) -> Self {
        self.add_message(message);
        self
    }

    pub fn with_listed(mut self, rows: Vec<Row>) -> Self {
        self.listed = rows;
        self
    }
}

pub struct RowkeepApi<S: GuardedStore> {
    store: S,
    cursor: Option<RowId<S>>,
    config: RowkeepConfig,
}

impl<S> RowkeepApi<S>
where
    S: GuardedStore,
    S::Row: Activatable + Clone,
{
    pub fn new(store: S, config: RowkeepConfig) -> Self {
        Self {
            store,
            cursor: None,
            config,
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn into_store(self) -> S {
        self.store
    }

    pub fn cursor(&self) -> Option<&RowId<S>> {
        self.cursor.as_ref()
    }

    /// The record under the cursor.
    pub fn current(&self) -> CmdResult<S::Row> {
        match &self.cursor {
            Some(id) => {
                let (row, status) = self.store.find(id);
                let row = row.clone();
                let mut result = self.present(status, row);
                if !status.is_ok() {
                    result.add_message(CmdMessage::warning(format!(
                        "Record {:?} is no longer in the store",
                        id
                    )));
                }
                result
            }
            None => self.present(Status::NoError, self.store.blank().clone()),
        }
    }

    pub fn first(&mut self) -> CmdResult<S::Row> {
        let row = self.store.first_record().clone();
        self.move_to(row)
    }

    pub fn last(&mut self) -> CmdResult<S::Row> {
        let row = self.store.last_record().clone();
        self.move_to(row)
    }

    pub fn next(&mut self) -> CmdResult<S::Row> {
        self.step(true)
    }

    pub fn previous(&mut self) -> CmdResult<S::Row> {
        self.step(false)
    }

    pub fn goto(&mut self, id: &RowId<S>) -> CmdResult<S::Row> {
        match self.store.get(id) {
            Ok(row) => {
                let row = row.clone();
                self.move_to(row)
            }
            Err(e) => self
                .present(e.into(), self.store.blank().clone())
                .with_message(CmdMessage::error(format!("Record {:?} not found", id))),
        }
    }

    /// Add a record and put the cursor on it.
    pub fn add(&mut self, row: S::Row) -> CmdResult<S::Row> {
        let id = row.id().clone();
        match self.store.add(row) {
            Ok(()) => {
                let added = self.cursor_to(id.clone());
                added.with_message(CmdMessage::success(format!("Record {:?} added", id)))
            }
            Err(e) => self
                .current_with_status(e.into())
                .with_message(CmdMessage::error(format!(
                    "Record {:?} already exists",
                    id
                ))),
        }
    }

    /// Save an edited copy of the record under the cursor.
    pub fn save(&mut self, row: S::Row, active_flag: bool) -> CmdResult<S::Row> {
        let outcome = match self.cursor.clone() {
            Some(id) => self.store.update_by_id(&id, row, active_flag),
            None => Err(StoreError::RecordNotFound),
        };
        self.report_update(outcome, "Record saved")
    }

    /// Reactivate the Locked record under the cursor.
    pub fn reopen(&mut self) -> CmdResult<S::Row> {
        let outcome = match self.cursor.clone() {
            Some(id) => {
                let reopened = self.store.get(&id).map(|row| {
                    let mut row = row.clone();
                    row.set_active(true);
                    row
                });
                reopened.and_then(|row| self.store.update_by_id(&id, row, false))
            }
            None => Err(StoreError::RecordNotFound),
        };
        self.report_update(outcome, "Record reopened")
    }

    /// Remove the record under the cursor and move on to its successor.
    pub fn remove(&mut self) -> CmdResult<S::Row> {
        let Some(id) = self.cursor.clone() else {
            return self
                .present(Status::NoDelete, self.store.blank().clone())
                .with_message(CmdMessage::error("Nothing selected to delete"));
        };

        let successor = self.store.next_record(&id).id().clone();
        match self.store.remove(&id) {
            Ok(_) => {
                let result = if self.store.is_empty() || successor == id {
                    self.cursor = None;
                    self.present(Status::NoError, self.store.blank().clone())
                } else {
                    self.cursor_to(successor)
                };
                result.with_message(CmdMessage::success(format!("Record {:?} deleted", id)))
            }
            Err(e) => self
                .current_with_status(e.into())
                .with_message(CmdMessage::error(format!("Record {:?} not found", id))),
        }
    }

    /// All records in navigation order.
    pub fn list(&self) -> CmdResult<S::Row> {
        let rows = self.store.records().to_vec();
        let mut result = self.current_with_status(Status::NoError).with_listed(rows);
        if result.listed.is_empty() {
            result.add_message(CmdMessage::info("No records"));
        }
        result
    }

    fn step(&mut self, forward: bool) -> CmdResult<S::Row> {
        let Some(id) = self.cursor.clone() else {
            return if forward { self.first() } else { self.last() };
        };

        let target: StoreResult<&S::Row> = if self.config.wrap_unknown {
            Ok(if forward {
                self.store.next_record(&id)
            } else {
                self.store.previous_record(&id)
            })
        } else if forward {
            self.store.next_record_checked(&id)
        } else {
            self.store.previous_record_checked(&id)
        };

        match target {
            Ok(row) => {
                let row = row.clone();
                self.move_to(row)
            }
            Err(e) => self
                .present(e.into(), self.store.blank().clone())
                .with_message(CmdMessage::warning(format!(
                    "Record {:?} is no longer in the store",
                    id
                ))),
        }
    }

    fn report_update(&self, outcome: StoreResult<()>, done: &str) -> CmdResult<S::Row> {
        let status = Status::from_result(&outcome);
        let message = match outcome {
            Ok(()) => CmdMessage::success(done),
            Err(StoreError::ReadOnly) => {
                CmdMessage::error("Record is inactive and can only be reopened")
            }
            Err(_) => CmdMessage::error("Record not found"),
        };
        self.current_with_status(status).with_message(message)
    }

    fn move_to(&mut self, row: S::Row) -> CmdResult<S::Row> {
        if self.store.is_empty() {
            self.cursor = None;
            return self
                .present(Status::NoError, row)
                .with_message(CmdMessage::info("No records"));
        }
        self.cursor = Some(row.id().clone());
        self.present(Status::NoError, row)
    }

    fn cursor_to(&mut self, id: RowId<S>) -> CmdResult<S::Row> {
        let (row, status) = self.store.find(&id);
        let row = row.clone();
        self.cursor = Some(id);
        self.present(status, row)
    }

    fn current_with_status(&self, status: Status) -> CmdResult<S::Row> {
        let mut result = self.current();
        result.status = status;
        result
    }

    fn present(&self, status: Status, row: S::Row) -> CmdResult<S::Row> {
        let mut result = CmdResult::new(status);
        result.at_blank = !self.store.exists(row.id());
        result.record = Some(row);
        result
    }
}
