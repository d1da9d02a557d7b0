use crate::errors::Result;
use std::io::Write;

/// Push-style consumer of the merged output, one item at a time in sorted order.
pub trait Sink {
    fn accept(&mut self, value: i32) -> Result<()>;
}

impl Sink for Vec<i32> {
    fn accept(&mut self, value: i32) -> Result<()> {
        self.push(value);
        Ok(())
    }
}

impl<S: Sink + ?Sized> Sink for &mut S {
    fn accept(&mut self, value: i32) -> Result<()> {
        (**self).accept(value)
    }
}

/// Renders each item as a decimal line.
pub struct TextSink<W: Write> {
    out: W,
    written: u64,
}

impl<W: Write> TextSink<W> {
    pub fn new(out: W) -> Self {
        Self { out, written: 0 }
    }

    pub fn written(&self) -> u64 {
        self.written
    }

    /// Flushes and hands back the underlying writer.
    pub fn finish(mut self) -> Result<W> {
        self.out.flush()?;
        Ok(self.out)
    }
}

impl<W: Write> Sink for TextSink<W> {
    fn accept(&mut self, value: i32) -> Result<()> {
        writeln!(self.out, "{value}")?;
        self.written += 1;
        Ok(())
    }
}
