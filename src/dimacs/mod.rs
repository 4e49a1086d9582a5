/*
 * Copyright (c) 2017-2022 Frank Fischer <frank-fischer@shadow-soft.de>
 *
 * This program is free software: you can redistribute it and/or
 * modify it under the terms of the GNU General Public License as
 * published by the Free Software Foundation, either version 3 of the
 * License, or (at your option) any later version.
 *
 * This program is distributed in the hope that it will be useful, but
 * WITHOUT ANY WARRANTY; without even the implied warranty of
 * MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the GNU
 * General Public License for more details.
 *
 * You should have received a copy of the GNU General Public License
 * along with this program.  If not, see  <http://www.gnu.org/licenses/>
 */

//! Line based input and output of min-cost-flow problems.
//!
//! Every line of a DIMACS file starts with a one letter descriptor
//! followed by whitespace separated fields. Lines starting with `c`
//! and blank lines carry no data. [`LineReader`] returns the remaining
//! lines as [`Fields`], which are consumed by the parsers in [`min`].

pub mod min;

use std::error;
use std::fmt;
use std::io::{self, BufRead, BufReader, Read};
use std::str::{FromStr, SplitWhitespace};

/// Error when reading a network or a solution.
#[derive(Debug)]
pub enum Error {
    /// The underlying reader failed.
    Io(io::Error),
    /// A line does not have the expected layout.
    Format { line: usize, msg: String },
    /// A line is well-formed but its values do not describe a valid
    /// network, e.g. an unknown vertex or a wrong number of arcs.
    Data { line: usize, msg: String },
}

impl From<io::Error> for Error {
    fn from(err: io::Error) -> Self {
        Error::Io(err)
    }
}

impl fmt::Display for Error {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> std::result::Result<(), fmt::Error> {
        match self {
            Error::Io(err) => write!(fmt, "I/O error: {}", err),
            Error::Format { line, msg } => write!(fmt, "line {}: malformed input: {}", line, msg),
            Error::Data { line, msg } => write!(fmt, "line {}: invalid network: {}", line, msg),
        }
    }
}

impl error::Error for Error {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        match self {
            Error::Io(err) => Some(err),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;

/// Reads the data lines of a DIMACS file.
pub struct LineReader<R: Read> {
    input: BufReader<R>,
    buf: String,
    lineno: usize,
}

impl<R: Read> LineReader<R> {
    pub fn new(reader: R) -> Self {
        LineReader {
            input: BufReader::new(reader),
            buf: String::new(),
            lineno: 0,
        }
    }

    /// The 1-based number of the line returned last, 0 before the first.
    pub fn line_number(&self) -> usize {
        self.lineno
    }

    /// Return the fields of the next data line or `None` at the end of
    /// the input.
    pub fn next_line(&mut self) -> Result<Option<Fields<'_>>> {
        loop {
            self.buf.clear();
            if self.input.read_line(&mut self.buf)? == 0 {
                return Ok(None);
            }
            self.lineno += 1;

            let data = self.buf.trim_start();
            if !data.is_empty() && !data.starts_with('c') {
                break;
            }
        }
        Ok(Some(Fields {
            it: self.buf.split_whitespace(),
            line: self.lineno,
        }))
    }
}

/// The whitespace separated fields of a single line.
pub struct Fields<'a> {
    it: SplitWhitespace<'a>,
    pub line: usize,
}

impl<'a> Iterator for Fields<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<&'a str> {
        self.it.next()
    }
}

impl<'a> Fields<'a> {
    fn format_error(&self, msg: String) -> Error {
        Error::Format { line: self.line, msg }
    }

    /// The next field, which must exist.
    pub fn field(&mut self) -> Result<&'a str> {
        match self.it.next() {
            Some(f) => Ok(f),
            None => Err(self.format_error("line ends too early".to_string())),
        }
    }

    /// Consume the next field, which must equal `keyword`.
    pub fn keyword(&mut self, keyword: &str) -> Result<()> {
        let f = self.field()?;
        if f != keyword {
            return Err(self.format_error(format!("expected '{}' but found '{}'", keyword, f)));
        }
        Ok(())
    }

    /// Parse the next field as a number.
    pub fn number<T>(&mut self) -> Result<T>
    where
        T: FromStr,
        T::Err: fmt::Display,
    {
        let f = self.field()?;
        f.parse()
            .map_err(|e| self.format_error(format!("invalid number '{}': {}", f, e)))
    }

    /// Fail if there are fields left.
    pub fn finish(&mut self) -> Result<()> {
        match self.it.next() {
            Some(f) => Err(self.format_error(format!("trailing field '{}'", f))),
            None => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{Error, LineReader};
    use std::io::Cursor;

    #[test]
    fn test_skip_comments() {
        let mut reader = LineReader::new(Cursor::new("c comment\n\n   \n  p min 1 0\nc x\n"));
        let fields: Vec<_> = reader.next_line().unwrap().unwrap().collect();
        assert_eq!(fields, vec!["p", "min", "1", "0"]);
        assert_eq!(reader.line_number(), 4);
        assert!(reader.next_line().unwrap().is_none());
        assert_eq!(reader.line_number(), 5);
    }

    #[test]
    fn test_fields() {
        let mut reader = LineReader::new(Cursor::new("a 1 x\n"));
        let mut fields = reader.next_line().unwrap().unwrap();
        assert!(fields.keyword("a").is_ok());
        assert_eq!(fields.number::<usize>().unwrap(), 1);
        match fields.number::<i64>() {
            Err(Error::Format { line, msg }) => {
                assert_eq!(line, 1);
                assert!(msg.contains("'x'"));
            }
            _ => panic!("expected a format error"),
        }
        assert!(fields.finish().is_ok());
        assert!(fields.field().is_err());

        let mut reader = LineReader::new(Cursor::new("n 2 3 4\n"));
        let mut fields = reader.next_line().unwrap().unwrap();
        assert!(fields.keyword("a").is_err());
        assert!(fields.finish().is_err());
    }

    #[test]
    fn test_display() {
        let err = Error::Data {
            line: 7,
            msg: "unknown vertex 9".to_string(),
        };
        assert_eq!(err.to_string(), "line 7: invalid network: unknown vertex 9");
    }
}
