//! cc-hookcheck: hook binary for Claude Code.
//!
//! Reads the hook event JSON from stdin, validates the invocation, prints
//! any violations to stderr, and exits 2 to block (Claude Code hook
//! convention) or 0 to allow. Undeserializable input, unknown events, and
//! unknown tools all allow: the hook fails open.

use std::io::Read;

use serde::Deserialize;

use cc_hookcheck::config::Config;
use cc_hookcheck::dispatch::{self, Dispatcher};
use cc_hookcheck::hook::{Context, EventType, ToolInput, ToolType};
use cc_hookcheck::logging;
use cc_hookcheck::validator::Registry;

#[derive(Deserialize)]
struct HookInput {
    hook_event_name: Option<String>,
    tool_name: Option<String>,
    #[serde(default)]
    tool_input: ToolInput,
    notification_type: Option<String>,
}

fn main() {
    let config = Config::load();
    logging::init(&config.settings.log_level);

    let mut raw = String::new();
    if std::io::stdin().read_to_string(&mut raw).is_err() {
        return;
    }

    let input: HookInput = match serde_json::from_str(&raw) {
        Ok(input) => input,
        Err(err) => {
            log::warn!("unparseable hook input, allowing: {err}");
            return;
        }
    };

    let event_type = match input.hook_event_name.as_deref() {
        Some("PreToolUse") => EventType::PreToolUse,
        Some("PostToolUse") => EventType::PostToolUse,
        Some("Notification") => EventType::Notification,
        other => {
            log::info!("ignoring unknown event {other:?}");
            return;
        }
    };

    let tool_name = input.tool_name.as_deref().and_then(ToolType::from_name);
    if event_type != EventType::Notification && tool_name.is_none() {
        log::info!("unknown tool {:?}, allowing", input.tool_name);
        return;
    }

    let ctx = Context {
        event_type,
        tool_name,
        tool_input: input.tool_input,
        notification_type: input.notification_type,
    };

    let registry = Registry::from_config(&config);
    log::debug!("registry holds {} validators", registry.len());
    let errors = Dispatcher::new(registry).dispatch(&ctx);

    if errors.is_empty() {
        return;
    }

    eprint!("{}", dispatch::format_errors(&errors));

    if dispatch::should_block(&errors) {
        std::process::exit(2);
    }
}
