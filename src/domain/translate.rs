//! Backend error-code translation tables.
//!
//! # Responsibilities
//! - Map opaque backend codes to DomainError categories per operation
//! - Disambiguate codes whose meaning depends on the responding format
//!
//! # Design Decisions
//! - Tables are static slices, not switch statements: every mapping is
//!   enumerable and testable row by row.
//! - Lookup never fails; unknown codes land in the UnexpectedSystem
//!   category with the raw code and message preserved.

use super::error::{DomainError, DomainErrorKind};

/// One operation's (or operation-variant's) code table.
#[derive(Debug, Clone, Copy)]
pub struct ErrorTable {
    entries: &'static [(&'static str, DomainErrorKind)],
}

impl ErrorTable {
    pub const fn new(entries: &'static [(&'static str, DomainErrorKind)]) -> Self {
        Self { entries }
    }

    pub fn kind(&self, backend_code: &str) -> DomainErrorKind {
        self.entries
            .iter()
            .find(|(code, _)| *code == backend_code)
            .map(|(_, kind)| *kind)
            .unwrap_or(DomainErrorKind::UnexpectedSystem)
    }

    /// Translate a backend code/message pair into the client payload.
    pub fn translate(&self, backend_code: &str, backend_message: &str) -> DomainError {
        self.kind(backend_code)
            .into_domain_error(backend_code, backend_message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    static TABLE: ErrorTable = ErrorTable::new(&[
        ("SVC117", DomainErrorKind::InvalidIdCardNo),
        ("01", DomainErrorKind::DataNotFound),
    ]);

    #[test]
    fn known_code_maps_to_category() {
        assert_eq!(TABLE.kind("SVC117"), DomainErrorKind::InvalidIdCardNo);
        assert_eq!(TABLE.kind("01"), DomainErrorKind::DataNotFound);
    }

    #[test]
    fn unknown_code_falls_back_but_keeps_raw() {
        let err = TABLE.translate("ZZ999", "STRANGE");
        assert_eq!(
            err.error_code,
            DomainErrorKind::UnexpectedSystem.error_code()
        );
        assert_eq!(err.code, "ZZ999");
        assert_eq!(err.message, "STRANGE");
    }
}
