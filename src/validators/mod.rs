//! Concrete validators registered by [`Registry::from_config`].
//!
//! Each validator owns its domain rules and absorbs its own parse failures
//! into non-blocking warnings; the dispatcher only ever sees results.
//!
//! [`Registry::from_config`]: crate::validator::Registry::from_config

/// Git command validators: branch naming and `git add` path guarding.
pub mod git;
/// Terminal bell for notification events.
pub mod notification;
/// Secret detection in file writes and edits.
pub mod secrets;
