pub mod git;
pub mod shell;

pub use git::{GitCommand, GitParseError, extract_git_command};
pub use shell::{Command, ParseError, ParseResult, parse};
