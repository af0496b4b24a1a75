use thiserror::Error;

use super::shell::Command;

/// Error produced when a [`Command`] cannot be viewed as a git invocation.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum GitParseError {
    #[error("not a git command: {0}")]
    NotGit(String),
    #[error("git command has no subcommand")]
    MissingSubcommand,
}

/// A structured view of one `git` invocation.
///
/// `flags` holds `-`-prefixed tokens in order; when a flag is known to
/// consume a value (see [`flag_takes_value`]), the value sits in `flags`
/// immediately after its flag and is excluded from `args`. `args` holds the
/// remaining positional tokens, `"."` included — what `.` means is up to
/// the caller (git-add special-cases it, git-branch does not).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GitCommand {
    pub subcommand: String,
    pub flags: Vec<String>,
    pub args: Vec<String>,
}

impl GitCommand {
    /// Exact flag lookup over `flags` (flag tokens and consumed values).
    pub fn has_flag(&self, flag: &str) -> bool {
        self.flags.iter().any(|f| f == flag)
    }

    /// The value consumed by `flag`, if the flag is present and one was
    /// consumed after it.
    pub fn flag_value(&self, flag: &str) -> Option<&str> {
        self.flags
            .iter()
            .position(|f| f == flag)
            .and_then(|i| self.flags.get(i + 1))
            .map(String::as_str)
    }
}

/// Which flags consume the following token as their value, per subcommand.
///
/// This is a lookup table, not an algorithm: git's flag syntax alone does
/// not say whether `-b` takes a value (it does for `checkout`, it does not
/// for `branch` where there is no `-b` at all). Only enumerated
/// combinations consume a value; anything unlisted defaults to "no value
/// consumed", which keeps unknown flags positional-safe.
fn flag_takes_value(subcommand: &str, flag: &str) -> bool {
    match subcommand {
        "checkout" => matches!(flag, "-b" | "-B" | "--orphan"),
        "add" => flag == "--chmod",
        "commit" => matches!(flag, "-m" | "--message" | "-F" | "--file"),
        _ => false,
    }
}

/// Classify a parsed command as a [`GitCommand`].
///
/// Fails when the command is not `git` or names no subcommand. A
/// value-consuming flag in final position is recorded value-less rather
/// than erroring.
pub fn extract_git_command(cmd: &Command) -> Result<GitCommand, GitParseError> {
    if cmd.name != "git" {
        return Err(GitParseError::NotGit(cmd.name.clone()));
    }
    let Some(subcommand) = cmd.args.first() else {
        return Err(GitParseError::MissingSubcommand);
    };

    let mut flags = Vec::new();
    let mut args = Vec::new();

    let mut iter = cmd.args[1..].iter();
    while let Some(token) = iter.next() {
        if token.starts_with('-') {
            flags.push(token.clone());
            if flag_takes_value(subcommand, token)
                && let Some(value) = iter.next()
            {
                flags.push(value.clone());
            }
        } else {
            args.push(token.clone());
        }
    }

    Ok(GitCommand {
        subcommand: subcommand.clone(),
        flags,
        args,
    })
}
