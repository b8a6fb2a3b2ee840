//! # Record Model
//!
//! The store never looks inside a record beyond two capabilities:
//!
//! - [`Identifiable`]: a stable, comparable identifier, unique within one store.
//! - [`Activatable`]: an `active` flag driving the update guard. Inactive
//!   (Locked) records can only be reopened, never edited.
//!
//! Both are plain traits, so a record type opts in structurally and a type
//! whose id cannot be hashed or compared is rejected at compile time.
//!
//! Two concrete record types live here, [`Contact`] (integer ids) and
//! [`Ticket`] (UUID ids). Each provides a `blank()` sentinel whose id sits
//! outside the range of real ids.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt::Debug;
use std::hash::Hash;
use uuid::Uuid;

/// A record type exposing a unique identifier.
pub trait Identifiable {
    type Id: Clone + Eq + Hash + Debug;

    fn id(&self) -> &Self::Id;
}

/// A record type carrying an activity flag.
pub trait Activatable: Identifiable {
    fn is_active(&self) -> bool;

    fn set_active(&mut self, active: bool);
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contact {
    pub id: u32,
    pub active: bool,
    pub name: String,
    #[serde(default)]
    pub email: String,
}

impl Contact {
    pub fn new(id: u32, name: impl Into<String>) -> Self {
        Self {
            id,
            active: true,
            name: name.into(),
            email: String::new(),
        }
    }

    /// Sentinel contact. Real contact ids start at 1.
    pub fn blank() -> Self {
        Self {
            id: 0,
            active: false,
            name: String::new(),
            email: String::new(),
        }
    }

    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = email.into();
        self
    }

    pub fn inactive(mut self) -> Self {
        self.active = false;
        self
    }
}

impl Identifiable for Contact {
    type Id = u32;

    fn id(&self) -> &u32 {
        &self.id
    }
}

impl Activatable for Contact {
    fn is_active(&self) -> bool {
        self.active
    }

    fn set_active(&mut self, active: bool) {
        self.active = active;
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ticket {
    pub id: Uuid,
    pub active: bool,
    pub title: String,
    pub opened_at: DateTime<Utc>,
}

impl Ticket {
    pub fn open(title: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            active: true,
            title: title.into(),
            opened_at: Utc::now(),
        }
    }

    /// Sentinel ticket, keyed by the nil UUID which `open` never produces.
    pub fn blank() -> Self {
        Self {
            id: Uuid::nil(),
            active: false,
            title: String::new(),
            opened_at: DateTime::<Utc>::default(),
        }
    }

    /// A closed copy of this ticket.
    pub fn closed(&self) -> Self {
        Self {
            active: false,
            ..self.clone()
        }
    }

    /// A reopened copy of this ticket.
    pub fn reopened(&self) -> Self {
        Self {
            active: true,
            ..self.clone()
        }
    }
}

impl Identifiable for Ticket {
    type Id = Uuid;

    fn id(&self) -> &Uuid {
        &self.id
    }
}

impl Activatable for Ticket {
    fn is_active(&self) -> bool {
        self.active
    }

    fn set_active(&mut self, active: bool) {
        self.active = active;
    }
}
