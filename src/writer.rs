use anyhow::{Context, Result};
use serde_json::Value;
use std::io::Write;

/// How flattened documents are laid out in the output
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// One compact JSON document per line; top-level lists are expanded
    #[default]
    Lines,
    /// One indented document per input
    Pretty,
    /// One compact document per input
    Compact,
}

/// Writes flattened values to any output
pub struct FlattenedWriter<W: Write> {
    writer: W,
    format: OutputFormat,
    written: usize,
}

impl<W: Write> FlattenedWriter<W> {
    pub fn new(writer: W, format: OutputFormat) -> Self {
        FlattenedWriter {
            writer,
            format,
            written: 0,
        }
    }

    /// Write one flattened value
    ///
    /// In `Lines` format a top-level array (a flattened collection) is written
    /// one element per line so every line is a single entity.
    pub fn write_value(&mut self, value: &Value) -> Result<()> {
        match (self.format, value) {
            (OutputFormat::Lines, Value::Array(items)) => {
                for item in items {
                    self.write_line(item)?;
                }
            }
            (OutputFormat::Lines, _) | (OutputFormat::Compact, _) => self.write_line(value)?,
            (OutputFormat::Pretty, _) => {
                let json = serde_json::to_string_pretty(value)
                    .context("Failed to serialize flattened value")?;
                writeln!(self.writer, "{}", json).context("Failed to write flattened value")?;
                self.written += 1;
            }
        }
        Ok(())
    }

    fn write_line(&mut self, value: &Value) -> Result<()> {
        let json = serde_json::to_string(value).context("Failed to serialize flattened value")?;
        writeln!(self.writer, "{}", json).context("Failed to write flattened value")?;
        self.written += 1;
        Ok(())
    }

    /// Number of documents written so far
    pub fn written(&self) -> usize {
        self.written
    }

    pub fn flush(&mut self) -> Result<()> {
        self.writer.flush().context("Failed to flush writer")
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_lines_expands_collections() {
        let mut writer = FlattenedWriter::new(Vec::new(), OutputFormat::Lines);

        writer
            .write_value(&json!([{"id": "1"}, {"id": "2"}]))
            .unwrap();
        writer.write_value(&json!({"id": "3"})).unwrap();

        assert_eq!(writer.written(), 3);
        let output = String::from_utf8(writer.into_inner()).unwrap();
        assert_eq!(output, "{\"id\":\"1\"}\n{\"id\":\"2\"}\n{\"id\":\"3\"}\n");
    }

    #[test]
    fn test_compact_keeps_collections_whole() {
        let mut writer = FlattenedWriter::new(Vec::new(), OutputFormat::Compact);

        writer
            .write_value(&json!([{"id": "1"}, {"id": "2"}]))
            .unwrap();

        let output = String::from_utf8(writer.into_inner()).unwrap();
        assert_eq!(output, "[{\"id\":\"1\"},{\"id\":\"2\"}]\n");
    }

    #[test]
    fn test_pretty_output() {
        let mut writer = FlattenedWriter::new(Vec::new(), OutputFormat::Pretty);

        writer.write_value(&json!({"name": "Ada", "id": "1"})).unwrap();
        writer.flush().unwrap();

        let output = String::from_utf8(writer.into_inner()).unwrap();
        assert!(output.contains("\n  \"name\": \"Ada\""));
        assert_eq!(output.lines().count(), 4);
    }
}
