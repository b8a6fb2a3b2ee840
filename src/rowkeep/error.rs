use serde::Serialize;
use thiserror::Error;

/// Rejections produced by store operations.
///
/// These are expected outcomes, not faults: a caller maps them to user
/// messages and carries on. Success is the `Ok` side of [`StoreResult`].
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StoreError {
    #[error("A record with this id already exists")]
    RecordExists,

    #[error("Record not found")]
    RecordNotFound,

    #[error("Record is read-only; it can only be reactivated")]
    ReadOnly,

    #[error("Nothing to delete: record not found")]
    NoDelete,
}

pub type StoreResult<T> = std::result::Result<T, StoreError>;

/// The closed status taxonomy reported to callers, `NoError` included.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Status {
    NoError,
    RecordExists,
    RecordNotFound,
    ReadOnly,
    NoDelete,
}

impl Status {
    pub fn is_ok(self) -> bool {
        self == Status::NoError
    }

    pub fn from_result<T>(result: &StoreResult<T>) -> Self {
        match result {
            Ok(_) => Status::NoError,
            Err(e) => (*e).into(),
        }
    }
}

impl From<StoreError> for Status {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::RecordExists => Status::RecordExists,
            StoreError::RecordNotFound => Status::RecordNotFound,
            StoreError::ReadOnly => Status::ReadOnly,
            StoreError::NoDelete => Status::NoDelete,
        }
    }
}

impl std::fmt::Display for Status {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            Status::NoError => "ok",
            Status::RecordExists => "record exists",
            Status::RecordNotFound => "record not found",
            Status::ReadOnly => "read only",
            Status::NoDelete => "no delete",
        };
        f.write_str(label)
    }
}

#[derive(Error, Debug)]
pub enum RowkeepError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    #[error("Config error: {0}")]
    Config(String),

    #[error("Api Error: {0}")]
    Api(String),
}

pub type Result<T> = std::result::Result<T, RowkeepError>;
