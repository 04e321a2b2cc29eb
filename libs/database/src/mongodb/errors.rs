use mongodb::error::{Error, ErrorKind, WriteFailure};

/// Server error code for a unique index violation.
pub const DUPLICATE_KEY_CODE: i32 = 11000;

/// Whether `err` was caused by a unique index rejecting a write.
pub fn is_duplicate_key_error(err: &Error) -> bool {
    match err.kind.as_ref() {
        ErrorKind::Write(WriteFailure::WriteError(write_error)) => {
            write_error.code == DUPLICATE_KEY_CODE
        }
        ErrorKind::Command(command_error) => command_error.code == DUPLICATE_KEY_CODE,
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_non_write_errors_are_not_duplicates() {
        let err = Error::custom("boom");
        assert!(!is_duplicate_key_error(&err));
    }
}
