//! Dispatch and aggregation: run every applicable validator and reconcile
//! their results into one blocking decision.

use std::collections::BTreeMap;
use std::fmt;

use crate::hook::Context;
use crate::validator::Registry;

/// One failing validator's result, as surfaced to the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    /// Name of the validator that failed.
    pub validator: String,
    pub message: String,
    pub details: BTreeMap<String, String>,
    pub should_block: bool,
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.message.is_empty() {
            write!(f, "{}", self.validator)
        } else {
            write!(f, "{}: {}", self.validator, self.message)
        }
    }
}

/// Runs applicable validators against a context and collects failures.
pub struct Dispatcher {
    registry: Registry,
}

impl Dispatcher {
    pub fn new(registry: Registry) -> Self {
        Self { registry }
    }

    /// Validate the context with every matching validator.
    ///
    /// Returns one [`ValidationError`] per failing validator, in registry
    /// order. No applicable validators is an implicit pass (empty vec).
    /// Every validator runs even after one signals blocking, so the caller
    /// sees all violations.
    pub fn dispatch(&self, ctx: &Context) -> Vec<ValidationError> {
        log::info!(
            "dispatching event={:?} tool={:?}",
            ctx.event_type,
            ctx.tool_name
        );

        let validators = self.registry.find_validators(ctx);
        if validators.is_empty() {
            log::info!("no validators found");
            return Vec::new();
        }
        log::info!("validators found count={}", validators.len());

        let mut errors = Vec::new();

        for v in validators {
            log::debug!("running validator {}", v.name());
            let result = v.validate(ctx);

            if result.passed {
                log::info!("validator passed: {}", v.name());
                continue;
            }

            if result.should_block {
                log::error!("validator failed: {} — {}", v.name(), result.message);
            } else {
                log::info!("validator warned: {} — {}", v.name(), result.message);
            }

            errors.push(ValidationError {
                validator: v.name().to_string(),
                message: result.message,
                details: result.details,
                should_block: result.should_block,
            });
        }

        errors
    }
}

/// True iff any error blocks. A pure OR-reduction, independent of order.
pub fn should_block(errors: &[ValidationError]) -> bool {
    errors.iter().any(|e| e.should_block)
}

/// Format validation errors for terminal display: blocking failures first,
/// then warnings, each with its details.
pub fn format_errors(errors: &[ValidationError]) -> String {
    if errors.is_empty() {
        return String::new();
    }

    let mut out = String::new();

    let blocking: Vec<_> = errors.iter().filter(|e| e.should_block).collect();
    let warnings: Vec<_> = errors.iter().filter(|e| !e.should_block).collect();

    if !blocking.is_empty() {
        out.push_str("❌ Validation Failed:\n\n");
        for err in &blocking {
            append_error(&mut out, err);
        }
    }

    if !warnings.is_empty() {
        out.push_str("⚠️  Warnings:\n\n");
        for err in &warnings {
            append_error(&mut out, err);
        }
    }

    out
}

fn append_error(out: &mut String, err: &ValidationError) {
    out.push_str("  ");
    out.push_str(&err.message);
    out.push('\n');
    for (k, v) in &err.details {
        out.push_str(&format!("    {k}: {v}\n"));
    }
    out.push('\n');
}
