use std::io::{self, BufRead, Write};

use pomotick_core::Confirm;

/// Interpret a yes/no answer. Anything but an explicit yes is a no.
pub fn is_yes(answer: &str) -> bool {
    matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes")
}

/// Blocking yes/no question on a reader/writer pair.
pub struct LineConfirm<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> LineConfirm<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }
}

impl LineConfirm<io::StdinLock<'static>, io::Stderr> {
    /// Ask on the terminal: question on stderr, answer from stdin.
    pub fn stdio() -> Self {
        Self::new(io::stdin().lock(), io::stderr())
    }
}

impl<R: BufRead, W: Write> Confirm for LineConfirm<R, W> {
    fn confirm(&mut self, prompt: &str) -> bool {
        if write!(self.output, "{prompt} [y/N] ")
            .and_then(|()| self.output.flush())
            .is_err()
        {
            return false;
        }
        let mut line = String::new();
        match self.input.read_line(&mut line) {
            Ok(0) | Err(_) => false,
            Ok(_) => is_yes(&line),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn yes_variants() {
        assert!(is_yes("y"));
        assert!(is_yes(" YES \n"));
        assert!(!is_yes(""));
        assert!(!is_yes("nope"));
    }

    #[test]
    fn line_confirm_reads_answer() {
        let mut out = Vec::new();
        let mut confirm = LineConfirm::new("y\n".as_bytes(), &mut out);
        assert!(confirm.confirm("Reset?"));
        assert_eq!(String::from_utf8(out).unwrap(), "Reset? [y/N] ");
    }

    #[test]
    fn eof_is_no() {
        let mut confirm = LineConfirm::new("".as_bytes(), Vec::new());
        assert!(!confirm.confirm("Reset?"));
    }
}
