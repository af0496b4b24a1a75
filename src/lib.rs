//! cc-hookcheck: a hook for Claude Code that validates tool invocations.
//!
//! This crate receives a hook [`Context`](hook::Context) (event type, tool
//! name, tool input), selects the validators registered for that context,
//! runs them all, and aggregates their results into one blocking decision.
//! Shell commands are split into individual commands with a quote-aware
//! scanner and tokenized with shlex; `git` commands get a structured
//! subcommand/flags/args view for the git validators.
//!
//! # Architecture
//!
//! - **[`parse`]** — Shell parsing: operator-aware command splitter, shlex tokenizer, git command extractor.
//! - **[`validator`]** — Validator capability, result type, matcher predicates, registry.
//! - **[`dispatch`]** — Dispatcher: runs applicable validators, aggregates errors, derives the blocking decision.
//! - **[`validators`]** — Concrete validators: branch names, git add paths, secrets, notifications.
//! - **[`hook`]** — Hook context types deserialized from stdin JSON.
//! - **[`config`]** — Configuration loading: embedded defaults + user overlay merge.
//! - **[`logging`]** — File logging to `~/.local/share/cc-hookcheck/hookcheck.log`.

/// Configuration types, loading, and overlay merge logic.
pub mod config;
/// Dispatch and aggregation of validator results.
pub mod dispatch;
/// Hook invocation context types.
pub mod hook;
/// File-based logger setup.
pub mod logging;
/// Shell command parsing: splitter, tokenizer, git extractor.
pub mod parse;
/// Validator trait, result type, and registry.
pub mod validator;
/// Concrete validator implementations.
pub mod validators;

use dispatch::{Dispatcher, ValidationError};
use hook::Context;
use validator::Registry;

/// Build the default-config registry and validate a context.
///
/// This is the main entry point for tests and simple usage. For CLI usage
/// with user config, build the registry from [`config::Config::load`].
pub fn validate(ctx: &Context) -> Vec<ValidationError> {
    let config = config::Config::default_config();
    let registry = Registry::from_config(&config);
    Dispatcher::new(registry).dispatch(ctx)
}
