use std::io::Write;

use crate::hook::Context;
use crate::validator::{ValidationResult, Validator};

/// Rings the terminal bell for `bell` notifications. Always passes: a
/// notification is never a policy violation.
pub struct BellValidator;

impl Validator for BellValidator {
    fn name(&self) -> &str {
        "notify-bell"
    }

    fn validate(&self, ctx: &Context) -> ValidationResult {
        if ctx.notification_type.as_deref() == Some("bell") {
            // BEL to stderr; stdout belongs to the hook protocol
            let mut stderr = std::io::stderr();
            let _ = stderr.write_all(b"\x07");
            let _ = stderr.flush();
        }
        ValidationResult::pass()
    }
}
