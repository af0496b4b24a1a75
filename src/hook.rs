//! Hook invocation context: the structured form of one tool call awaiting
//! validation, deserialized from the JSON Claude Code writes to stdin.

use serde::Deserialize;

/// The hook event that triggered this invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub enum EventType {
    PreToolUse,
    PostToolUse,
    Notification,
}

/// The tool being invoked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub enum ToolType {
    Bash,
    Write,
    Edit,
    MultiEdit,
    Grep,
    Read,
    Glob,
}

impl ToolType {
    /// Map a tool name string to a known tool. Unknown tools are `None`;
    /// the caller treats them as "no validators apply".
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "Bash" => Some(ToolType::Bash),
            "Write" => Some(ToolType::Write),
            "Edit" => Some(ToolType::Edit),
            "MultiEdit" => Some(ToolType::MultiEdit),
            "Grep" => Some(ToolType::Grep),
            "Read" => Some(ToolType::Read),
            "Glob" => Some(ToolType::Glob),
            _ => None,
        }
    }
}

/// Tool-specific input fields. Which fields are set depends on the tool:
/// `command` for Bash, `file_path`/`path` + `content` for Write,
/// `old_string`/`new_string` for Edit, `pattern` for Grep/Glob.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ToolInput {
    #[serde(default)]
    pub command: Option<String>,
    #[serde(default)]
    pub file_path: Option<String>,
    #[serde(default)]
    pub path: Option<String>,
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default)]
    pub old_string: Option<String>,
    #[serde(default)]
    pub new_string: Option<String>,
    #[serde(default)]
    pub pattern: Option<String>,
}

/// One tool invocation awaiting validation. Read-only to validators;
/// one instance per process run.
#[derive(Debug, Clone)]
pub struct Context {
    pub event_type: EventType,
    /// Absent for Notification events.
    pub tool_name: Option<ToolType>,
    pub tool_input: ToolInput,
    /// Set for Notification events only.
    pub notification_type: Option<String>,
}

impl Context {
    /// The shell command for Bash invocations, empty otherwise.
    pub fn command(&self) -> &str {
        self.tool_input.command.as_deref().unwrap_or("")
    }

    /// The target file path, preferring `file_path` over `path`.
    pub fn file_path(&self) -> &str {
        self.tool_input
            .file_path
            .as_deref()
            .or(self.tool_input.path.as_deref())
            .unwrap_or("")
    }

    /// The file content for Write invocations, empty otherwise.
    pub fn content(&self) -> &str {
        self.tool_input.content.as_deref().unwrap_or("")
    }

    pub fn is_bash_tool(&self) -> bool {
        self.tool_name == Some(ToolType::Bash)
    }

    /// True for the file-mutating tools (Write, Edit, MultiEdit).
    pub fn is_file_tool(&self) -> bool {
        matches!(
            self.tool_name,
            Some(ToolType::Write) | Some(ToolType::Edit) | Some(ToolType::MultiEdit)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bash_context(command: &str) -> Context {
        Context {
            event_type: EventType::PreToolUse,
            tool_name: Some(ToolType::Bash),
            tool_input: ToolInput {
                command: Some(command.to_string()),
                ..ToolInput::default()
            },
            notification_type: None,
        }
    }

    #[test]
    fn command_accessor() {
        let ctx = bash_context("git status");
        assert_eq!(ctx.command(), "git status");
        assert!(ctx.is_bash_tool());
        assert!(!ctx.is_file_tool());
    }

    #[test]
    fn file_path_prefers_file_path_over_path() {
        let ctx = Context {
            event_type: EventType::PreToolUse,
            tool_name: Some(ToolType::Write),
            tool_input: ToolInput {
                file_path: Some("a.txt".into()),
                path: Some("b.txt".into()),
                ..ToolInput::default()
            },
            notification_type: None,
        };
        assert_eq!(ctx.file_path(), "a.txt");
        assert!(ctx.is_file_tool());
    }

    #[test]
    fn file_path_falls_back_to_path() {
        let ctx = Context {
            event_type: EventType::PreToolUse,
            tool_name: Some(ToolType::Write),
            tool_input: ToolInput {
                path: Some("b.txt".into()),
                ..ToolInput::default()
            },
            notification_type: None,
        };
        assert_eq!(ctx.file_path(), "b.txt");
    }

    #[test]
    fn unknown_tool_name() {
        assert_eq!(ToolType::from_name("WebFetch"), None);
        assert_eq!(ToolType::from_name("Bash"), Some(ToolType::Bash));
    }
}
