use std::backtrace::Backtrace;
use std::fmt::{self, Display, Formatter};
use std::io;
use std::panic::Location;
use std::sync::PoisonError;

use serde::{Serialize, Serializer};
use tracing::error;

pub type VaultResult<T> = Result<T, VaultErr>;

#[derive(Debug)]
pub struct VaultErr {
    pub kind: VaultErrKind,
    pub backtrace: Option<Backtrace>,
}

impl Serialize for VaultErr {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.kind.to_string())
    }
}

impl Display for VaultErr {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        write!(f, "{}", self.kind)
    }
}

/// Wording here is what an admin sees in the console, keep it plain.
impl Display for VaultErrKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            VaultErrKind::AccountNonexistent => write!(f, "That account does not exist"),
            VaultErrKind::AccountIdMissing => {
                write!(f, "An account in that export has no uid")
            }
            VaultErrKind::ExportInvalid(msg) => write!(f, "That export is not valid: {msg}"),
            VaultErrKind::Unexpected(msg) => write!(f, "Unexpected error: {msg}"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VaultErrKind {
    AccountNonexistent,
    AccountIdMissing,
    ExportInvalid(String),

    /// If no caller (including tests) expects to see a particular error, we
    /// debug format the underlying error to keep the number of error types in
    /// check. Commonly used for errors originating in other crates.
    Unexpected(String),
}

impl From<VaultErrKind> for VaultErr {
    fn from(kind: VaultErrKind) -> Self {
        Self { kind, backtrace: Some(Backtrace::force_capture()) }
    }
}

pub trait Unexpected<T> {
    fn log_and_ignore(self) -> Option<T>;
    fn map_unexpected(self) -> VaultResult<T>;
}

impl<T, E: fmt::Debug> Unexpected<T> for Result<T, E> {
    #[track_caller]
    fn map_unexpected(self) -> VaultResult<T> {
        let location = Location::caller();
        self.map_err(|err| {
            VaultErrKind::Unexpected(format!(
                "unexpected error at {}:{} {err:?}",
                location.file(),
                location.line(),
            ))
            .into()
        })
    }

    #[track_caller]
    fn log_and_ignore(self) -> Option<T> {
        let location = Location::caller();
        if let Err(e) = &self {
            error!("error ignored at {}:{} {e:?}", location.file(), location.line());
        }

        self.ok()
    }
}

pub fn vault_err_unexpected<T: fmt::Debug>(err: T) -> VaultErrKind {
    VaultErrKind::Unexpected(format!("{:?}", err))
}

impl From<io::Error> for VaultErr {
    fn from(err: io::Error) -> Self {
        vault_err_unexpected(err).into()
    }
}

impl From<serde_json::Error> for VaultErr {
    fn from(err: serde_json::Error) -> Self {
        VaultErrKind::ExportInvalid(err.to_string()).into()
    }
}

impl<T> From<PoisonError<T>> for VaultErr {
    fn from(err: PoisonError<T>) -> Self {
        vault_err_unexpected(err).into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn json_errors_are_export_errors() {
        let err: VaultErr = serde_json::from_str::<Vec<u8>>("{").unwrap_err().into();
        assert!(matches!(err.kind, VaultErrKind::ExportInvalid(_)));
        assert!(err.backtrace.is_some());
    }

    #[test]
    fn map_unexpected_records_location() {
        let res: Result<(), &str> = Err("boom");
        let err = res.map_unexpected().unwrap_err();
        match err.kind {
            VaultErrKind::Unexpected(msg) => {
                assert!(msg.contains("errors.rs"));
                assert!(msg.contains("boom"));
            }
            other => panic!("{other:?}"),
        }
    }
}
