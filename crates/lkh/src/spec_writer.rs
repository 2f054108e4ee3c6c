use std::fmt::{Display, Formatter, Write};

/// Line-oriented writer for TSPLIB (`KEY: value`) and LKH (`KEY = value`) files.
pub(crate) struct SpecWriter<'a, 'b>(&'a mut Formatter<'b>);

impl<'a, 'b> SpecWriter<'a, 'b> {
    pub(crate) fn new(f: &'a mut Formatter<'b>) -> Self {
        Self(f)
    }

    pub(crate) fn line<T: Display>(&mut self, value: T) -> std::fmt::Result {
        writeln!(self.0, "{value}")
    }

    pub(crate) fn kv_eq<T: Display>(&mut self, key: &str, value: T) -> std::fmt::Result {
        writeln!(self.0, "{key} = {value}")
    }

    pub(crate) fn opt_kv_eq<T: Display>(
        &mut self,
        key: &str,
        value: Option<T>,
    ) -> std::fmt::Result {
        match value {
            Some(value) => self.kv_eq(key, value),
            None => Ok(()),
        }
    }

    pub(crate) fn kv_colon<T: Display>(&mut self, key: &str, value: T) -> std::fmt::Result {
        writeln!(self.0, "{key}: {value}")
    }

    /// Writes a space separated matrix row.
    pub(crate) fn row<T: Display>(&mut self, row: &[T]) -> std::fmt::Result {
        let mut first = true;
        for value in row {
            if !first {
                self.0.write_char(' ')?;
            }
            write!(self.0, "{value}")?;
            first = false;
        }
        self.0.write_char('\n')
    }
}
