//! # Scenario Scripts
//!
//! A script is a JSON array of store operations, applied in order to a
//! contact store. Each step yields a [`StepOutcome`] so a caller can show
//! exactly how the store answered.
//!
//! ```json
//! [
//!   { "op": "add", "record": { "id": 1, "active": true, "name": "A" } },
//!   { "op": "update_by_id", "id": 1, "record": { "id": 1, "active": false, "name": "A" }, "active_flag": true },
//!   { "op": "next", "id": 1 },
//!   { "op": "remove", "id": 1 }
//! ]
//! ```

use crate::error::{Result, Status};
use crate::model::Contact;
use crate::store::memory::RecordStore;
use crate::store::{DataStore, GuardedStore};
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::debug;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Step {
    Add {
        record: Contact,
    },
    Update {
        old: Contact,
        new: Contact,
        active_flag: bool,
    },
    UpdateById {
        id: u32,
        record: Contact,
        active_flag: bool,
    },
    Remove {
        id: u32,
    },
    Find {
        id: u32,
    },
    Exists {
        id: u32,
    },
    Index {
        id: u32,
    },
    First,
    Last,
    Next {
        id: u32,
    },
    Previous {
        id: u32,
    },
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Step::Add { record } => write!(f, "add {}", record.id),
            Step::Update { new, .. } => write!(f, "update {}", new.id),
            Step::UpdateById { id, .. } => write!(f, "update_by_id {}", id),
            Step::Remove { id } => write!(f, "remove {}", id),
            Step::Find { id } => write!(f, "find {}", id),
            Step::Exists { id } => write!(f, "exists {}", id),
            Step::Index { id } => write!(f, "index {}", id),
            Step::First => f.write_str("first"),
            Step::Last => f.write_str("last"),
            Step::Next { id } => write!(f, "next {}", id),
            Step::Previous { id } => write!(f, "previous {}", id),
        }
    }
}

/// What one step returned.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StepOutcome {
    pub step: String,
    pub status: Status,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub record: Option<Contact>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub position: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exists: Option<bool>,
}

impl StepOutcome {
    fn new(step: &Step, status: Status) -> Self {
        Self {
            step: step.to_string(),
            status,
            record: None,
            position: None,
            exists: None,
        }
    }

    fn with_record(mut self, record: &Contact) -> Self {
        self.record = Some(record.clone());
        self
    }
}

pub fn parse_script(json: &str) -> Result<Vec<Step>> {
    Ok(serde_json::from_str(json)?)
}

/// Apply one step to the store.
pub fn apply(store: &mut RecordStore<Contact>, step: &Step) -> StepOutcome {
    let outcome = match step {
        Step::Add { record } => {
            let result = store.add(record.clone());
            StepOutcome::new(step, Status::from_result(&result))
        }
        Step::Update {
            old,
            new,
            active_flag,
        } => {
            let result = store.update(old, new.clone(), *active_flag);
            StepOutcome::new(step, Status::from_result(&result))
        }
        Step::UpdateById {
            id,
            record,
            active_flag,
        } => {
            let result = store.update_by_id(id, record.clone(), *active_flag);
            StepOutcome::new(step, Status::from_result(&result))
        }
        Step::Remove { id } => {
            let result = store.remove(id);
            StepOutcome::new(step, Status::from_result(&result))
        }
        Step::Find { id } => {
            let (record, status) = store.find(id);
            StepOutcome::new(step, status).with_record(record)
        }
        Step::Exists { id } => {
            let mut outcome = StepOutcome::new(step, Status::NoError);
            outcome.exists = Some(store.exists(id));
            outcome
        }
        Step::Index { id } => {
            let position = store.index(id);
            let status = if position.is_some() {
                Status::NoError
            } else {
                Status::RecordNotFound
            };
            let mut outcome = StepOutcome::new(step, status);
            outcome.position = position;
            outcome
        }
        Step::First => StepOutcome::new(step, Status::NoError).with_record(store.first_record()),
        Step::Last => StepOutcome::new(step, Status::NoError).with_record(store.last_record()),
        Step::Next { id } => {
            StepOutcome::new(step, Status::NoError).with_record(store.next_record(id))
        }
        Step::Previous { id } => {
            StepOutcome::new(step, Status::NoError).with_record(store.previous_record(id))
        }
    };
    debug!(
        target: "rowkeep::script",
        step = %outcome.step,
        status = %outcome.status,
        "step applied"
    );
    outcome
}

/// Apply every step in order.
pub fn run_script(store: &mut RecordStore<Contact>, steps: &[Step]) -> Vec<StepOutcome> {
    steps.iter().map(|step| apply(store, step)).collect()
}
