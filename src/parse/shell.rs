use thiserror::Error;

/// Error produced when a command string cannot be interpreted.
///
/// A parse failure never yields a partial [`ParseResult`]; callers that
/// degrade gracefully (validators) turn this into a non-blocking warning.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("unterminated single quote")]
    UnterminatedSingleQuote,
    #[error("unterminated double quote")]
    UnterminatedDoubleQuote,
    #[error("trailing backslash")]
    TrailingBackslash,
    #[error("cannot tokenize segment: {0}")]
    Tokenize(String),
}

/// One de-quoted command within a (possibly compound) command line.
///
/// `name` is the first word; `args` are the remaining words in their
/// original order, with quoting and escapes already resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Command {
    pub name: String,
    pub args: Vec<String>,
}

impl Command {
    /// Exact, case-sensitive flag lookup over `args`. No prefix inference:
    /// `has_flag("-f")` does not match `-force` or `--f`.
    pub fn has_flag(&self, flag: &str) -> bool {
        self.args.iter().any(|a| a == flag)
    }
}

/// The commands of a command line, in left-to-right execution order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParseResult {
    pub commands: Vec<Command>,
}

/// Split a command line at shell operators (`&&`, `||`, `;`, `|`, `|&`),
/// respecting single/double quotes and backslash escapes.
///
/// The pipe operators split like the chaining ones: this layer only needs
/// to know where one invocation ends and the next begins, not how data
/// flows between them.
fn split_segments(command: &str) -> Result<Vec<String>, ParseError> {
    let mut parts = Vec::new();
    let mut buf = String::new();

    let chars: Vec<char> = command.chars().collect();
    let len = chars.len();
    let mut i = 0;
    let (mut sq, mut dq, mut esc) = (false, false, false);

    while i < len {
        let c = chars[i];

        if esc {
            buf.push(c);
            esc = false;
            i += 1;
            continue;
        }
        if c == '\\' && !sq {
            esc = true;
            buf.push(c);
            i += 1;
            continue;
        }
        if c == '\'' && !dq {
            sq = !sq;
            buf.push(c);
            i += 1;
            continue;
        }
        if c == '"' && !sq {
            dq = !dq;
            buf.push(c);
            i += 1;
            continue;
        }
        if sq || dq {
            buf.push(c);
            i += 1;
            continue;
        }

        // Two-char operators
        if i + 1 < len {
            let next = chars[i + 1];
            if matches!((c, next), ('&', '&') | ('|', '|') | ('|', '&')) {
                parts.push(buf.trim().to_string());
                buf.clear();
                i += 2;
                continue;
            }
        }

        // Single-char operators
        if c == '|' || c == ';' {
            parts.push(buf.trim().to_string());
            buf.clear();
            i += 1;
            continue;
        }

        buf.push(c);
        i += 1;
    }

    if sq {
        return Err(ParseError::UnterminatedSingleQuote);
    }
    if dq {
        return Err(ParseError::UnterminatedDoubleQuote);
    }
    if esc {
        return Err(ParseError::TrailingBackslash);
    }

    let tail = buf.trim().to_string();
    if !tail.is_empty() {
        parts.push(tail);
    }

    // Filter empties (e.g. "ls ;; pwd" or a leading operator)
    parts.retain(|p| !p.is_empty());

    Ok(parts)
}

/// Parse a raw command line into its constituent [`Command`]s.
///
/// Splits at unquoted operators, then word-splits each segment with shlex
/// (POSIX word splitting, so tokens come back de-quoted). Empty or
/// operator-only input yields zero commands, not an error.
pub fn parse(raw: &str) -> Result<ParseResult, ParseError> {
    let mut commands = Vec::new();

    for segment in split_segments(raw)? {
        let words = shlex::split(&segment)
            .ok_or_else(|| ParseError::Tokenize(segment.clone()))?;
        let mut words = words.into_iter();
        let Some(name) = words.next() else {
            continue;
        };
        commands.push(Command {
            name,
            args: words.collect(),
        });
    }

    Ok(ParseResult { commands })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cmd(raw: &str) -> Command {
        let result = parse(raw).unwrap();
        assert_eq!(result.commands.len(), 1, "input: {raw}");
        result.commands.into_iter().next().unwrap()
    }

    #[test]
    fn parse_simple() {
        let c = cmd("ls -la /tmp");
        assert_eq!(c.name, "ls");
        assert_eq!(c.args, vec!["-la", "/tmp"]);
    }

    #[test]
    fn parse_collapses_whitespace() {
        let c = cmd("  git   status  ");
        assert_eq!(c.name, "git");
        assert_eq!(c.args, vec!["status"]);
    }

    #[test]
    fn parse_dequotes_single() {
        let c = cmd("echo 'hello world'");
        assert_eq!(c.args, vec!["hello world"]);
    }

    #[test]
    fn parse_dequotes_double() {
        let c = cmd("echo \"hello world\"");
        assert_eq!(c.args, vec!["hello world"]);
    }

    #[test]
    fn parse_quoted_operator_is_literal() {
        let c = cmd("echo \"a && b\"");
        assert_eq!(c.name, "echo");
        assert_eq!(c.args, vec!["a && b"]);
    }

    #[test]
    fn parse_splits_on_and() {
        let result = parse("git add x && git add y").unwrap();
        assert_eq!(result.commands.len(), 2);
        assert!(result.commands.iter().all(|c| c.name == "git"));
        assert_eq!(result.commands[0].args, vec!["add", "x"]);
        assert_eq!(result.commands[1].args, vec!["add", "y"]);
    }

    #[test]
    fn parse_splits_on_or_and_semi() {
        let result = parse("a || b ; c").unwrap();
        let names: Vec<_> = result.commands.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["a", "b", "c"]);
    }

    #[test]
    fn parse_splits_on_pipe() {
        let result = parse("cat file | grep pat |& tee out").unwrap();
        let names: Vec<_> = result.commands.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["cat", "grep", "tee"]);
    }

    #[test]
    fn parse_preserves_order() {
        let result = parse("first ; second && third").unwrap();
        let names: Vec<_> = result.commands.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["first", "second", "third"]);
    }

    #[test]
    fn parse_empty_input() {
        assert_eq!(parse("").unwrap().commands.len(), 0);
    }

    #[test]
    fn parse_whitespace_only() {
        assert_eq!(parse("   \t ").unwrap().commands.len(), 0);
    }

    #[test]
    fn parse_operators_only() {
        assert_eq!(parse(" ; && ; ").unwrap().commands.len(), 0);
    }

    #[test]
    fn parse_unterminated_double_quote() {
        assert_eq!(
            parse("echo \"unterminated"),
            Err(ParseError::UnterminatedDoubleQuote)
        );
    }

    #[test]
    fn parse_unterminated_single_quote() {
        assert_eq!(
            parse("echo 'unterminated"),
            Err(ParseError::UnterminatedSingleQuote)
        );
    }

    #[test]
    fn parse_trailing_backslash() {
        assert_eq!(parse("echo foo \\"), Err(ParseError::TrailingBackslash));
    }

    #[test]
    fn parse_escaped_operator_not_split() {
        let c = cmd("echo a \\&\\& b");
        assert_eq!(c.args, vec!["a", "&&", "b"]);
    }

    #[test]
    fn parse_semicolon_inside_single_quotes() {
        let c = cmd("echo 'a; b'");
        assert_eq!(c.args, vec!["a; b"]);
    }

    #[test]
    fn has_flag_exact_match() {
        let c = cmd("git branch -D old-name");
        assert!(c.has_flag("-D"));
        assert!(!c.has_flag("-d"));
        assert!(!c.has_flag("-"));
        assert!(!c.has_flag("old"));
    }
}
