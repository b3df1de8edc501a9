//! Line-oriented writer for plugin output.

use std::io::{self, Write};

/// Destination for Munin protocol lines.
///
/// Config blocks are followed by an empty line; value blocks are written
/// back to back.
#[derive(Debug)]
pub struct Output<W: Write> {
    writer: W,
}

impl Output<io::Stdout> {
    /// Write to standard output.
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl Output<Vec<u8>> {
    /// Write into memory.
    pub fn buffer() -> Self {
        Self::new(Vec::new())
    }

    /// Contents written so far, as text.
    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.writer).into_owned()
    }
}

impl<W: Write> Output<W> {
    /// Wrap any writer.
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    /// Write lines as they are.
    pub fn lines<S: AsRef<str>>(&mut self, lines: &[S]) -> io::Result<()> {
        for line in lines {
            writeln!(self.writer, "{}", line.as_ref())?;
        }
        Ok(())
    }

    /// Write lines followed by an empty separator line.
    pub fn block<S: AsRef<str>>(&mut self, lines: &[S]) -> io::Result<()> {
        self.lines(lines)?;
        writeln!(self.writer)
    }

    /// Flush the underlying writer.
    pub fn flush(&mut self) -> io::Result<()> {
        self.writer.flush()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_block_separator() {
        let mut out = Output::buffer();
        out.block(&["multigraph a", "x.label X"]).unwrap();
        out.lines(&["multigraph b".to_string()]).unwrap();
        assert_eq!(out.contents(), "multigraph a\nx.label X\n\nmultigraph b\n");
    }

    #[test]
    fn test_empty_block_is_blank_line() {
        let mut out = Output::buffer();
        out.block::<&str>(&[]).unwrap();
        assert_eq!(out.contents(), "\n");
    }
}
