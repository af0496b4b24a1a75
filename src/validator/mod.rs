//! Validator capability and registry.
//!
//! A validator is a named unit that inspects a [`Context`] and returns a
//! [`ValidationResult`]. The registry pairs each registered validator with
//! an explicit [`Matcher`] condition (event set, tool set, notification
//! types) and answers "which validators apply to this context" in
//! registration order.

use std::collections::BTreeMap;

use crate::config::Config;
use crate::hook::{Context, EventType, ToolType};

/// Outcome of one validator run.
///
/// `passed=false, should_block=true` fails the operation; `passed=false,
/// should_block=false` is a warning the operation survives. Validators that
/// hit internal parse or I/O trouble degrade to a warning rather than
/// propagating an error — the dispatcher is a pure aggregator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationResult {
    pub passed: bool,
    pub message: String,
    pub details: BTreeMap<String, String>,
    pub should_block: bool,
}

impl ValidationResult {
    pub fn pass() -> Self {
        Self {
            passed: true,
            message: String::new(),
            details: BTreeMap::new(),
            should_block: false,
        }
    }

    /// A blocking failure.
    pub fn fail(message: impl Into<String>) -> Self {
        Self {
            passed: false,
            message: message.into(),
            details: BTreeMap::new(),
            should_block: true,
        }
    }

    /// A non-blocking failure: surfaced to the user, operation proceeds.
    pub fn warn(message: impl Into<String>) -> Self {
        Self {
            passed: false,
            message: message.into(),
            details: BTreeMap::new(),
            should_block: false,
        }
    }

    pub fn with_detail(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.details.insert(key.into(), value.into());
        self
    }
}

/// The validator capability: a name plus one pure validation operation.
///
/// Side effects are limited to logging and read-only external calls; the
/// context is never mutated.
pub trait Validator: Send + Sync {
    fn name(&self) -> &str;
    fn validate(&self, ctx: &Context) -> ValidationResult;
}

/// Applicability condition for one registered validator.
///
/// Each field is a set; an empty set is a wildcard. Kept as plain data
/// rather than an opaque closure so registry contents stay inspectable.
#[derive(Debug, Clone, Default)]
pub struct Matcher {
    pub events: Vec<EventType>,
    pub tools: Vec<ToolType>,
    pub notification_types: Vec<String>,
}

impl Matcher {
    pub fn events(events: &[EventType]) -> Self {
        Self {
            events: events.to_vec(),
            ..Self::default()
        }
    }

    pub fn tools(mut self, tools: &[ToolType]) -> Self {
        self.tools = tools.to_vec();
        self
    }

    pub fn notification_types(mut self, types: &[&str]) -> Self {
        self.notification_types = types.iter().map(|s| s.to_string()).collect();
        self
    }

    /// Pure boolean test against a context.
    pub fn matches(&self, ctx: &Context) -> bool {
        if !self.events.is_empty() && !self.events.contains(&ctx.event_type) {
            return false;
        }
        if !self.tools.is_empty() {
            let Some(tool) = ctx.tool_name else {
                return false;
            };
            if !self.tools.contains(&tool) {
                return false;
            }
        }
        if !self.notification_types.is_empty() {
            let Some(ref nt) = ctx.notification_type else {
                return false;
            };
            if !self.notification_types.iter().any(|t| t == nt) {
                return false;
            }
        }
        true
    }
}

struct Registration {
    matcher: Matcher,
    validator: Box<dyn Validator>,
}

/// Holds all registered validators with their applicability conditions.
#[derive(Default)]
pub struct Registry {
    entries: Vec<Registration>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build the default validator set from configuration. Registration is
    /// an explicit list assembled once at startup.
    pub fn from_config(config: &Config) -> Self {
        use crate::validators::{
            git::{AddValidator, BranchValidator},
            notification::BellValidator,
            secrets::SecretsValidator,
        };

        let mut registry = Self::new();

        registry.register(
            Matcher::events(&[EventType::PreToolUse]).tools(&[ToolType::Bash]),
            Box::new(BranchValidator::from_config(&config.git)),
        );
        registry.register(
            Matcher::events(&[EventType::PreToolUse]).tools(&[ToolType::Bash]),
            Box::new(AddValidator::from_config(&config.git)),
        );
        registry.register(
            Matcher::events(&[EventType::PreToolUse]).tools(&[
                ToolType::Write,
                ToolType::Edit,
                ToolType::MultiEdit,
            ]),
            Box::new(SecretsValidator::from_config(&config.secrets)),
        );
        registry.register(
            Matcher::events(&[EventType::Notification]),
            Box::new(BellValidator),
        );

        registry
    }

    pub fn register(&mut self, matcher: Matcher, validator: Box<dyn Validator>) {
        self.entries.push(Registration { matcher, validator });
    }

    /// All validators whose condition matches the context, in registration
    /// order. Empty when nothing matches — not an error.
    pub fn find_validators(&self, ctx: &Context) -> Vec<&dyn Validator> {
        self.entries
            .iter()
            .filter(|e| e.matcher.matches(ctx))
            .map(|e| e.validator.as_ref())
            .collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hook::ToolInput;

    struct NamedPass(&'static str);

    impl Validator for NamedPass {
        fn name(&self) -> &str {
            self.0
        }
        fn validate(&self, _ctx: &Context) -> ValidationResult {
            ValidationResult::pass()
        }
    }

    fn ctx(event: EventType, tool: Option<ToolType>) -> Context {
        Context {
            event_type: event,
            tool_name: tool,
            tool_input: ToolInput::default(),
            notification_type: None,
        }
    }

    #[test]
    fn matcher_event_and_tool() {
        let m = Matcher::events(&[EventType::PreToolUse]).tools(&[ToolType::Bash]);
        assert!(m.matches(&ctx(EventType::PreToolUse, Some(ToolType::Bash))));
        assert!(!m.matches(&ctx(EventType::PostToolUse, Some(ToolType::Bash))));
        assert!(!m.matches(&ctx(EventType::PreToolUse, Some(ToolType::Write))));
        assert!(!m.matches(&ctx(EventType::PreToolUse, None)));
    }

    #[test]
    fn matcher_empty_sets_are_wildcards() {
        let m = Matcher::default();
        assert!(m.matches(&ctx(EventType::Notification, None)));
        assert!(m.matches(&ctx(EventType::PostToolUse, Some(ToolType::Grep))));
    }

    #[test]
    fn matcher_notification_type() {
        let m = Matcher::events(&[EventType::Notification]).notification_types(&["bell"]);
        let mut c = ctx(EventType::Notification, None);
        assert!(!m.matches(&c));
        c.notification_type = Some("bell".into());
        assert!(m.matches(&c));
        c.notification_type = Some("other".into());
        assert!(!m.matches(&c));
    }

    #[test]
    fn registry_preserves_registration_order() {
        let mut registry = Registry::new();
        registry.register(Matcher::default(), Box::new(NamedPass("first")));
        registry.register(
            Matcher::events(&[EventType::Notification]),
            Box::new(NamedPass("skipped")),
        );
        registry.register(Matcher::default(), Box::new(NamedPass("second")));

        let found = registry.find_validators(&ctx(EventType::PreToolUse, Some(ToolType::Bash)));
        let names: Vec<_> = found.iter().map(|v| v.name()).collect();
        assert_eq!(names, vec!["first", "second"]);
    }

    #[test]
    fn registry_empty_match_is_empty_vec() {
        let mut registry = Registry::new();
        registry.register(
            Matcher::events(&[EventType::Notification]),
            Box::new(NamedPass("bell")),
        );
        assert!(
            registry
                .find_validators(&ctx(EventType::PreToolUse, Some(ToolType::Bash)))
                .is_empty()
        );
    }
}
