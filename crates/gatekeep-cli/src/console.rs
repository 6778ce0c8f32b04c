//! Console commands and the stdout-backed remote link.

use std::io::Write;

use anyhow::{Context, Result, bail};

use gatekeep_core::{AccessCode, Symbol};
use gatekeep_hardware::RemoteLink;

/// One line typed at the console.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Press keys on the keypad, one per tick.
    Keypad(String),
    /// Send a whole line on the remote command channel.
    Remote(String),
    /// Replace the stored access code.
    ReplaceCode(AccessCode),
    /// Log the controller state.
    Status,
    /// Stop the host.
    Quit,
}

impl Command {
    /// Parse a console line.
    ///
    /// ```text
    /// k 1805        keypad presses
    /// r 1805        remote line
    /// :code 4321    replace the stored code
    /// status
    /// q
    /// ```
    pub fn parse(line: &str) -> Result<Self> {
        let line = line.trim();
        let (verb, rest) = line.split_once(' ').unwrap_or((line, ""));
        let rest = rest.trim();

        match verb {
            "k" | "key" if !rest.is_empty() => Ok(Command::Keypad(rest.to_string())),
            "r" | "remote" => Ok(Command::Remote(rest.to_string())),
            ":code" => {
                let code = rest
                    .parse()
                    .with_context(|| format!("invalid access code {rest:?}"))?;
                Ok(Command::ReplaceCode(code))
            }
            "status" | "s" => Ok(Command::Status),
            "q" | "quit" | "exit" => Ok(Command::Quit),
            _ => bail!("unknown command {line:?} (try: k 1805, r 1805, :code 4321, status, q)"),
        }
    }
}

/// Remote link fed from the console and answering on stdout.
#[derive(Debug, Default)]
pub struct ConsoleRemote {
    line: Vec<Symbol>,
    complete: bool,
}

impl ConsoleRemote {
    /// Deliver a line typed at the console.
    pub fn submit(&mut self, line: &str) {
        self.line = line.chars().map(Symbol::new).collect();
        self.complete = true;
    }
}

impl RemoteLink for ConsoleRemote {
    fn code_complete(&self) -> bool {
        self.complete
    }

    fn code_sequence(&self) -> &[Symbol] {
        &self.line
    }

    fn set_code_complete(&mut self, complete: bool) {
        self.complete = complete;
    }

    fn write_response(&mut self, text: &str) -> gatekeep_hardware::Result<()> {
        let mut stdout = std::io::stdout().lock();
        stdout.write_all(text.as_bytes())?;
        stdout.flush()?;
        Ok(())
    }
}

/// Frame the LCD rows for the console.
pub fn render_screen(lines: &[String]) -> String {
    let width = lines.first().map_or(0, |l| l.chars().count());
    let border = format!("+{}+", "-".repeat(width));
    let mut out = border.clone();
    for line in lines {
        out.push_str(&format!("\n|{line}|"));
    }
    out.push('\n');
    out.push_str(&border);
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("k 1805", Command::Keypad("1805".to_string()))]
    #[case("key 12", Command::Keypad("12".to_string()))]
    #[case("r 9999", Command::Remote("9999".to_string()))]
    #[case("  remote 18051 ", Command::Remote("18051".to_string()))]
    #[case("status", Command::Status)]
    #[case("q", Command::Quit)]
    fn test_parse_command(#[case] line: &str, #[case] expected: Command) {
        assert_eq!(Command::parse(line).unwrap(), expected);
    }

    #[test]
    fn test_parse_replace_code() {
        match Command::parse(":code 4321").unwrap() {
            Command::ReplaceCode(code) => assert_eq!(code.to_string(), "4321"),
            other => panic!("Expected ReplaceCode, got {other:?}"),
        }
    }

    #[rstest]
    #[case(":code 123")]
    #[case("k")]
    #[case("open sesame")]
    #[case("")]
    fn test_parse_rejects(#[case] line: &str) {
        assert!(Command::parse(line).is_err());
    }

    #[test]
    fn test_console_remote_flag() {
        let mut remote = ConsoleRemote::default();
        assert!(!remote.code_complete());

        remote.submit("1805");
        assert!(remote.code_complete());
        assert_eq!(remote.code_sequence().len(), 4);

        remote.set_code_complete(false);
        assert!(!remote.code_complete());
    }

    #[test]
    fn test_render_screen_frames_rows() {
        let lines = vec!["ab".to_string(), "cd".to_string()];
        assert_eq!(render_screen(&lines), "+--+\n|ab|\n|cd|\n+--+");
    }
}
