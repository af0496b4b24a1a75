use regex::Regex;

use crate::config::GitConfig;
use crate::hook::Context;
use crate::parse::{self, GitCommand};
use crate::validator::{ValidationResult, Validator};

/// Branch name format: `<type>/<description>`, all lowercase.
const BRANCH_NAME_PATTERN: &str = "^[a-z]+/[a-z0-9-]+$";

/// Validates branch names in `git checkout -b` and `git branch` commands.
pub struct BranchValidator {
    pattern: Regex,
    valid_types: Vec<String>,
    protected_branches: Vec<String>,
}

impl BranchValidator {
    pub fn from_config(config: &GitConfig) -> Self {
        Self {
            pattern: Regex::new(BRANCH_NAME_PATTERN).expect("static branch pattern"),
            valid_types: config.valid_branch_types.clone(),
            protected_branches: config.protected_branches.clone(),
        }
    }

    fn check_git_command(&self, git_cmd: &GitCommand) -> Option<ValidationResult> {
        match git_cmd.subcommand.as_str() {
            "checkout" => self.check_checkout(git_cmd),
            "branch" => self.check_branch(git_cmd),
            _ => None,
        }
    }

    fn check_checkout(&self, git_cmd: &GitCommand) -> Option<ValidationResult> {
        if !git_cmd.has_flag("-b") {
            return None;
        }
        let (branch, has_extra) = extract_checkout_branch(git_cmd)?;
        if has_extra {
            return Some(space_error());
        }
        self.check_branch_name(branch)
    }

    fn check_branch(&self, git_cmd: &GitCommand) -> Option<ValidationResult> {
        // Deleting a branch never creates a bad name
        if git_cmd.has_flag("-d") || git_cmd.has_flag("-D") || git_cmd.has_flag("--delete") {
            return None;
        }
        let branch = git_cmd.args.first()?;
        if git_cmd.args.len() > 1 {
            return Some(space_error());
        }
        self.check_branch_name(branch)
    }

    fn check_branch_name(&self, branch: &str) -> Option<ValidationResult> {
        if self.protected_branches.iter().any(|b| b == branch) {
            log::debug!("skipping protected branch {branch}");
            return None;
        }

        if branch != branch.to_lowercase() {
            return Some(ValidationResult::fail(format!(
                "Branch name must be lowercase\n\n\
                 Branch name '{branch}' contains uppercase characters\n\n\
                 Use: {}",
                branch.to_lowercase()
            )));
        }

        if !self.pattern.is_match(branch) {
            return Some(ValidationResult::fail(format!(
                "Branch name must follow type/description format\n\n\
                 Branch name '{branch}' doesn't match pattern\n\n\
                 Expected format: <type>/<description>\n\
                 Valid types: {}\n\n\
                 Example: feat/add-user-auth or fix/login-bug-123",
                self.valid_types.join(", ")
            )));
        }

        let branch_type = branch.split('/').next().unwrap_or("");
        if !self.valid_types.iter().any(|t| t == branch_type) {
            return Some(ValidationResult::fail(format!(
                "Invalid branch type\n\n\
                 Branch type '{branch_type}' is not valid\n\n\
                 Valid types: {}",
                self.valid_types.join(", ")
            )));
        }

        None
    }
}

/// Branch name for `git checkout -b`, plus whether trailing tokens follow
/// it. Extra positional args after the name almost always mean the user
/// typed a branch name with spaces, so callers report that instead of a
/// generic pattern failure.
fn extract_checkout_branch(git_cmd: &GitCommand) -> Option<(&str, bool)> {
    if let Some(branch) = git_cmd.flag_value("-b") {
        return Some((branch, !git_cmd.args.is_empty()));
    }
    // -b present but value-less: the name may have landed in args
    let branch = git_cmd.args.first()?;
    Some((branch, git_cmd.args.len() > 1))
}

fn space_error() -> ValidationResult {
    ValidationResult::fail(
        "Branch name appears to contain spaces\n\n\
         Branch names cannot contain spaces. Use hyphens instead.\n\n\
         Example: feat/my-feature not feat/my feature",
    )
}

impl Validator for BranchValidator {
    fn name(&self) -> &str {
        "validate-branch-name"
    }

    fn validate(&self, ctx: &Context) -> ValidationResult {
        log::debug!("validating git branch command");

        if !ctx.is_bash_tool() {
            return ValidationResult::pass();
        }

        let parsed = match parse::parse(ctx.command()) {
            Ok(parsed) => parsed,
            Err(err) => {
                log::error!("failed to parse command: {err}");
                return ValidationResult::warn(format!("Failed to parse command: {err}"));
            }
        };

        for cmd in &parsed.commands {
            if cmd.name != "git" {
                continue;
            }
            let git_cmd = match parse::extract_git_command(cmd) {
                Ok(git_cmd) => git_cmd,
                Err(err) => {
                    log::debug!("failed to extract git command: {err}");
                    continue;
                }
            };
            if let Some(result) = self.check_git_command(&git_cmd) {
                return result;
            }
        }

        ValidationResult::pass()
    }
}

/// Blocks `git add` of paths under configured prefixes (default `tmp/`).
pub struct AddValidator {
    blocked_prefixes: Vec<String>,
}

impl AddValidator {
    pub fn from_config(config: &GitConfig) -> Self {
        Self {
            blocked_prefixes: config.blocked_add_prefixes.clone(),
        }
    }

    /// Positional paths staged by one `git add`, with `.` skipped — a bare
    /// `git add .` stages whatever the index allows, and the exclusion
    /// files handle blocked paths there.
    fn staged_paths<'a>(git_cmd: &'a GitCommand) -> impl Iterator<Item = &'a str> {
        git_cmd
            .args
            .iter()
            .map(String::as_str)
            .filter(|a| !a.trim().is_empty() && *a != ".")
            .map(|a| a.strip_prefix("./").unwrap_or(a))
    }
}

impl Validator for AddValidator {
    fn name(&self) -> &str {
        "validate-git-add"
    }

    fn validate(&self, ctx: &Context) -> ValidationResult {
        log::debug!("running git add validation");

        if !ctx.is_bash_tool() {
            return ValidationResult::pass();
        }

        let parsed = match parse::parse(ctx.command()) {
            Ok(parsed) => parsed,
            Err(err) => {
                log::error!("failed to parse command: {err}");
                return ValidationResult::warn(format!("Failed to parse command: {err}"));
            }
        };

        let mut blocked_files = Vec::new();

        for cmd in &parsed.commands {
            if cmd.name != "git" {
                continue;
            }
            let Ok(git_cmd) = parse::extract_git_command(cmd) else {
                continue;
            };
            if git_cmd.subcommand != "add" {
                continue;
            }
            for path in Self::staged_paths(&git_cmd) {
                if self.blocked_prefixes.iter().any(|p| path.starts_with(p.as_str())) {
                    blocked_files.push(path.to_string());
                }
            }
        }

        if blocked_files.is_empty() {
            log::debug!("git add validation passed");
            return ValidationResult::pass();
        }

        let mut help = String::from(
            "Files under these prefixes should be in .gitignore or .git/info/exclude\n\n\
             Files being added:\n",
        );
        for file in &blocked_files {
            help.push_str(&format!("  - {file}\n"));
        }
        help.push_str("\nAdd the prefix to .git/info/exclude, e.g.:\n");
        help.push_str("  echo 'tmp/' >> .git/info/exclude");

        ValidationResult::fail("Attempting to add files from blocked directories")
            .with_detail("help", help)
    }
}
