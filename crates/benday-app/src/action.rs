//! What a caller should do with the result of a canvas operation

use benday_core::{Error, ErrorKind};

/// Reaction to a finished canvas operation, decided from the error kind
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UpdateAction {
    /// The canvas changed; decode and redraw
    Redraw,

    /// Nothing to report (debounced write, busy slot, no-op resize)
    Ignore,

    /// Tell the user, keep the view open
    Show { kind: ErrorKind, message: String },

    /// Tell the user and close the view
    Close { message: String },
}

impl UpdateAction {
    pub fn from_error(err: &Error) -> Self {
        if err.is_silent() {
            UpdateAction::Ignore
        } else if err.is_fatal() {
            UpdateAction::Close {
                message: err.to_string(),
            }
        } else {
            UpdateAction::Show {
                kind: err.kind(),
                message: err.to_string(),
            }
        }
    }

    /// Classify the outcome of a write; `changed` is false for no-op writes
    pub fn from_write<T>(result: &benday_core::Result<T>, changed: impl FnOnce(&T) -> bool) -> Self {
        match result {
            Ok(value) if changed(value) => UpdateAction::Redraw,
            Ok(_) => UpdateAction::Ignore,
            Err(e) => Self::from_error(e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_silent_errors_are_ignored() {
        assert_eq!(
            UpdateAction::from_error(&Error::TooSoon { window_ms: 1000 }),
            UpdateAction::Ignore
        );
        assert_eq!(UpdateAction::from_error(&Error::Busy), UpdateAction::Ignore);
    }

    #[test]
    fn test_decode_errors_close() {
        let action = UpdateAction::from_error(&Error::decode("truncated"));
        assert!(matches!(action, UpdateAction::Close { .. }));
    }

    #[test]
    fn test_refusals_are_shown() {
        let action = UpdateAction::from_error(&Error::already_exists("out.txt"));
        assert_eq!(
            action,
            UpdateAction::Show {
                kind: ErrorKind::AlreadyExists,
                message: "File already exists.".into()
            }
        );
    }

    #[test]
    fn test_from_write() {
        let ok: benday_core::Result<Option<u8>> = Ok(Some(1));
        assert_eq!(UpdateAction::from_write(&ok, Option::is_some), UpdateAction::Redraw);

        let noop: benday_core::Result<Option<u8>> = Ok(None);
        assert_eq!(UpdateAction::from_write(&noop, Option::is_some), UpdateAction::Ignore);
    }
}
