//! Line-oriented console input.
//!
//! # Invariants
//! - Every value returned is trimmed of surrounding whitespace.
//! - Integer reads reprompt until a line parses.

use std::io::{self, BufRead, BufReader, Stdin, Stdout, Write};

pub const INVALID_INTEGER_MESSAGE: &str = "Invalid input. Please enter a valid integer.";

/// Prompting reader over one input stream and one output stream.
///
/// Built once per process with `stdio`; tests drive it with in-memory buffers.
pub struct LineInput<R, W> {
    reader: R,
    writer: W,
}

impl LineInput<BufReader<Stdin>, Stdout> {
    pub fn stdio() -> Self {
        Self::new(BufReader::new(io::stdin()), io::stdout())
    }
}

impl<R: BufRead, W: Write> LineInput<R, W> {
    pub fn new(reader: R, writer: W) -> Self {
        Self { reader, writer }
    }

    /// Output stream shared with prompts.
    pub fn output(&mut self) -> &mut W {
        &mut self.writer
    }

    /// Prompts until the user enters a valid integer.
    ///
    /// # Errors
    /// - `UnexpectedEof` when input ends before a valid integer arrives.
    /// - Any underlying read/write failure.
    pub fn read_int(&mut self, prompt: &str) -> io::Result<i64> {
        loop {
            let Some(line) = self.prompt_line(prompt)? else {
                return Err(io::Error::new(
                    io::ErrorKind::UnexpectedEof,
                    "input closed while waiting for an integer",
                ));
            };
            match line.parse::<i64>() {
                Ok(value) => return Ok(value),
                Err(_) => writeln!(self.writer, "{INVALID_INTEGER_MESSAGE}")?,
            }
        }
    }

    /// Prompts once and returns the trimmed line; empty at end of input.
    pub fn read_string(&mut self, prompt: &str) -> io::Result<String> {
        Ok(self.prompt_line(prompt)?.unwrap_or_default())
    }

    fn prompt_line(&mut self, prompt: &str) -> io::Result<Option<String>> {
        write!(self.writer, "{prompt}")?;
        self.writer.flush()?;

        let mut line = String::new();
        if self.reader.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::{LineInput, INVALID_INTEGER_MESSAGE};
    use std::io::{Cursor, ErrorKind};

    fn input(text: &str) -> LineInput<Cursor<Vec<u8>>, Vec<u8>> {
        LineInput::new(Cursor::new(text.as_bytes().to_vec()), Vec::new())
    }

    #[test]
    fn read_int_trims_and_parses() {
        let mut input = input("  42 \n");
        assert_eq!(input.read_int("Year: ").unwrap(), 42);
        assert_eq!(String::from_utf8(input.writer).unwrap(), "Year: ");
    }

    #[test]
    fn read_int_reprompts_until_valid() {
        let mut input = input("abc\n\n-7\n");
        assert_eq!(input.read_int("> ").unwrap(), -7);

        let output = String::from_utf8(input.writer).unwrap();
        assert_eq!(output.matches(INVALID_INTEGER_MESSAGE).count(), 2);
        assert_eq!(output.matches("> ").count(), 3);
    }

    #[test]
    fn read_int_reports_end_of_input() {
        let mut input = input("nope\n");
        let err = input.read_int("> ").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::UnexpectedEof);
    }

    #[test]
    fn read_string_trims_whitespace() {
        let mut input = input("\t The Hobbit  \r\nnext\n");
        assert_eq!(input.read_string("Title: ").unwrap(), "The Hobbit");
        assert_eq!(input.read_string("Title: ").unwrap(), "next");
        assert_eq!(input.read_string("Title: ").unwrap(), "");
    }
}
