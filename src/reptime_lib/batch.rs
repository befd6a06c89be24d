use std::fs;
use std::path::Path;

use anyhow::Context;
use anyhow::Result;

use crate::bailc;
use crate::command::BenchCommand;
use crate::error::ctx;

/// Parse a batch file into command specifications.
pub fn parse_batch(path: &Path) -> Result<Vec<BenchCommand>> {
    let text = fs::read_to_string(path).with_context(ctx!(
        "Could not read the batch file {path:?}", ;
        "Ensure that the file exists and you have permissions to access it",
    ))?;

    parse_batch_str(&text)
}

/// Parse the contents of a batch file.
///
/// One command per logical line; blank lines and lines starting with `#`
/// are skipped and a backslash before the newline continues the logical
/// line. Argument syntax is a lowest common denominator of the expected
/// shells: single or double quotes and two-character `\x` escapes. It will
/// probably never match any specific shell but does a sensible enough job.
///
/// Each line may start with the per-command options `-I <token>`,
/// `-i <cmd>`, `-o <cmd>`, `-r <cmd>` and `-q` (a second `-q` also
/// suppresses stderr); the remaining tokens are the command itself.
pub fn parse_batch_str(text: &str) -> Result<Vec<BenchCommand>> {
    let mut scanner = Scanner::new(text);
    let mut commands = Vec::new();

    while let Some((tokens, line)) = scanner.next_line()? {
        if tokens.is_empty() {
            continue;
        }

        commands.push(command_from_tokens(tokens, line)?);
    }

    Ok(commands)
}

/// Build one [`BenchCommand`] from the tokens of a logical line.
fn command_from_tokens(tokens: Vec<String>, line: usize) -> Result<BenchCommand> {
    let mut command = BenchCommand::default();
    let mut iter = tokens.into_iter();

    while let Some(token) = iter.next() {
        if token == "-I" {
            command.replace = Some(option_value(&mut iter, "I", line)?);
        } else if token == "-i" {
            command.input = Some(option_value(&mut iter, "i", line)?);
        } else if token == "-o" {
            command.output = Some(option_value(&mut iter, "o", line)?);
        } else if token == "-r" {
            command.pre = Some(option_value(&mut iter, "r", line)?);
        } else if token == "-q" {
            if command.quiet_stdout {
                command.quiet_stderr = true;
            } else {
                command.quiet_stdout = true;
            }
        } else if token == "-" {
            bailc!(
                "Option name not given at line {line}", ;
                "", ;
                "",
            );
        } else if token.starts_with('-') {
            bailc!(
                "Unknown option {token} at line {line}", ;
                "The per-command options are -I, -i, -o, -q and -r", ;
                "",
            );
        } else {
            command.argv.push(token);
            command.argv.extend(iter);
            break;
        }
    }

    if command.argv.is_empty() {
        bailc!(
            "Missing command at line {line}", ;
            "The line holds only options", ;
            "Add the program to benchmark after the options",
        );
    }

    command
        .check()
        .with_context(ctx!("In the batch file at line {line}", ; "",))?;

    Ok(command)
}

/// The argument of a per-command option, or an error naming the option.
fn option_value(
    iter: &mut impl Iterator<Item = String>,
    option: &str,
    line: usize,
) -> Result<String> {
    match iter.next() {
        Some(value) => Ok(value),
        None => {
            bailc!(
                "Option requires an argument -- {option} at line {line}", ;
                "", ;
                "",
            );
        }
    }
}

/// A cursor over the batch file contents that tracks line numbers.
struct Scanner {
    chars: Vec<char>,
    pos: usize,
    line: usize,
}

impl Scanner {
    fn new(text: &str) -> Self {
        Self {
            chars: text.chars().collect(),
            pos: 0,
            line: 1,
        }
    }

    fn peek(&self) -> Option<char> {
        self.chars.get(self.pos).copied()
    }

    fn peek_next(&self) -> Option<char> {
        self.chars.get(self.pos + 1).copied()
    }

    /// Advance one character, counting lines.
    fn bump(&mut self) {
        if self.peek() == Some('\n') {
            self.line += 1;
        }
        self.pos += 1;
    }

    fn skip_blanks(&mut self) {
        while matches!(self.peek(), Some(' ') | Some('\t')) {
            self.bump();
        }
    }

    /// The tokens of the next logical line, with the line it started on.
    ///
    /// Returns `None` once the input is exhausted.
    fn next_line(&mut self) -> Result<Option<(Vec<String>, usize)>> {
        loop {
            self.skip_blanks();

            match self.peek() {
                None => return Ok(None),
                Some('\n') | Some('\r') => self.bump(),
                Some('#') => {
                    while !matches!(self.peek(), None | Some('\n') | Some('\r')) {
                        self.bump();
                    }
                }
                Some(_) => break,
            }
        }

        let start_line = self.line;
        let mut tokens = Vec::new();

        loop {
            self.skip_blanks();

            match self.peek() {
                None => break,
                Some('\n') | Some('\r') => {
                    self.bump();
                    break;
                }
                // A backslash before the newline joins physical lines.
                Some('\\')
                    if matches!(self.peek_next(), Some('\n') | Some('\r')) =>
                {
                    self.bump();
                    while matches!(self.peek(), Some('\n') | Some('\r')) {
                        self.bump();
                    }
                }
                Some(_) => tokens.push(self.token()?),
            }
        }

        Ok(Some((tokens, start_line)))
    }

    /// One (possibly quoted) argument token.
    fn token(&mut self) -> Result<String> {
        let quote = match self.peek() {
            Some(q @ ('"' | '\'')) => {
                self.bump();
                Some(q)
            }
            _ => None,
        };

        let mut arg = String::new();

        loop {
            let Some(c) = self.peek() else {
                if quote.is_some() {
                    bailc!("Unterminated string at line {}", self.line);
                }
                break;
            };

            if Some(c) == quote {
                self.bump();
                break;
            }

            match c {
                '\n' | '\r' => {
                    if quote.is_some() {
                        bailc!("Unterminated string at line {}", self.line);
                    }
                    break;
                }
                ' ' if quote.is_none() => break,
                '\\' => {
                    let Some(next) = self.peek_next() else {
                        bailc!("Escape char not specified at line {}", self.line);
                    };

                    if next == '\n' || next == '\r' {
                        if quote.is_some() {
                            bailc!(
                                "'\\' is ambiguous before a newline inside a string at line {}",
                                self.line
                            );
                        }
                        // Leave the continuation for the line scanner.
                        break;
                    }

                    arg.push(escape_char(next));
                    self.bump();
                    self.bump();
                }
                _ => {
                    arg.push(c);
                    self.bump();
                }
            }
        }

        Ok(arg)
    }
}

/// Given a char `c`, assuming it was prefixed by `\` (e.g. `\r`), return the
/// escaped code.
fn escape_char(c: char) -> char {
    match c {
        '0' => '\0',
        'n' => '\n',
        'r' => '\r',
        't' => '\t',
        other => other,
    }
}

#[cfg(test)]
#[path = "tests/batch.rs"]
mod tests;
