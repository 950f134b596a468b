use std::io::{self, BufRead, BufReader, Write};
use std::sync::{Mutex, PoisonError};

use loginseam_auth::{ConsentDecision, ConsentRequest, PresentationContext};

struct Terminal {
    input: Box<dyn BufRead + Send>,
    output: Box<dyn Write + Send>,
}

/// Consent dialog rendered as a yes/no question on the terminal.
pub struct TerminalPresenter {
    terminal: Mutex<Terminal>,
}

impl TerminalPresenter {
    pub fn new(input: Box<dyn BufRead + Send>, output: Box<dyn Write + Send>) -> Self {
        Self {
            terminal: Mutex::new(Terminal { input, output }),
        }
    }

    /// Prompts go to stderr so stdout only carries results.
    pub fn stdio() -> Self {
        Self::new(
            Box::new(BufReader::new(io::stdin())),
            Box::new(io::stderr()),
        )
    }

    /// Read one line from the same input the dialog uses. `None` on EOF.
    pub fn read_line(&self) -> io::Result<Option<String>> {
        let mut terminal = self.terminal.lock().unwrap_or_else(PoisonError::into_inner);
        let mut line = String::new();
        if terminal.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }
}

impl PresentationContext for TerminalPresenter {
    fn present(&self, request: &ConsentRequest) -> io::Result<ConsentDecision> {
        {
            let mut terminal = self.terminal.lock().unwrap_or_else(PoisonError::into_inner);
            write!(
                terminal.output,
                "{} wants access to: {}. Allow? [y/N] ",
                request.app_id,
                request.permissions.join(", ")
            )?;
            terminal.output.flush()?;
        }

        match self.read_line()? {
            Some(answer) => Ok(parse_answer(&answer)),
            None => Err(io::Error::new(
                io::ErrorKind::UnexpectedEof,
                "input closed before the login dialog was answered",
            )),
        }
    }
}

fn parse_answer(answer: &str) -> ConsentDecision {
    match answer.to_ascii_lowercase().as_str() {
        "y" | "yes" => ConsentDecision::Approved,
        _ => ConsentDecision::Declined,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn presenter(input: &'static str) -> TerminalPresenter {
        TerminalPresenter::new(Box::new(input.as_bytes()), Box::new(io::sink()))
    }

    fn request() -> ConsentRequest {
        ConsentRequest {
            app_id: "demo".into(),
            permissions: vec!["public_profile".into()],
        }
    }

    #[test]
    fn yes_approves() {
        assert_eq!(presenter("y\n").present(&request()).unwrap(), ConsentDecision::Approved);
        assert_eq!(presenter("YES\n").present(&request()).unwrap(), ConsentDecision::Approved);
    }

    #[test]
    fn anything_else_declines() {
        assert_eq!(presenter("n\n").present(&request()).unwrap(), ConsentDecision::Declined);
        assert_eq!(presenter("\n").present(&request()).unwrap(), ConsentDecision::Declined);
    }

    #[test]
    fn closed_input_is_an_error() {
        let err = presenter("").present(&request()).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::UnexpectedEof);
    }

    #[test]
    fn read_line_shares_the_input() {
        let p = presenter("login\ny\n");
        assert_eq!(p.read_line().unwrap().as_deref(), Some("login"));
        assert_eq!(p.present(&request()).unwrap(), ConsentDecision::Approved);
        assert_eq!(p.read_line().unwrap(), None);
    }
}
