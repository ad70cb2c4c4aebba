//! Indentation-aware text buffer with balanced blocks

use crate::error::{GenError, GenResult};

/// Builds source text line by line, tracking block depth
///
/// Blocks are opened with a header line followed by `{` on its own line and
/// closed with `}`. [`SourceWriter::finish`] refuses to hand out text whose
/// blocks do not balance.
#[derive(Debug, Clone)]
pub struct SourceWriter {
    buf: String,
    indent: String,
    balance: isize,
}

impl SourceWriter {
    pub fn new(indent_width: usize) -> Self {
        Self {
            buf: String::new(),
            indent: " ".repeat(indent_width),
            balance: 0,
        }
    }

    /// Current block depth
    pub fn depth(&self) -> usize {
        self.balance.max(0).unsigned_abs()
    }

    /// Write one line at the current depth; an empty line carries no indentation
    pub fn line(&mut self, text: &str) {
        if !text.is_empty() {
            for _ in 0..self.depth() {
                self.buf.push_str(&self.indent);
            }
            self.buf.push_str(text);
        }
        self.buf.push('\n');
    }

    pub fn blank(&mut self) {
        self.line("");
    }

    /// Write `header` and an opening brace, then indent
    pub fn open(&mut self, header: &str) {
        self.line(header);
        self.line("{");
        self.balance += 1;
    }

    /// Dedent and write a closing brace
    pub fn close(&mut self) {
        self.balance -= 1;
        self.line("}");
    }

    /// Write a block whose body is produced by `body`
    pub fn block<F>(&mut self, header: &str, body: F) -> GenResult<()>
    where
        F: FnOnce(&mut Self) -> GenResult<()>,
    {
        self.open(header);
        let result = body(self);
        self.close();
        result
    }

    /// Append text rendered by another writer, re-indented to the current depth
    pub fn append(&mut self, text: &str) {
        for line in text.lines() {
            self.line(line);
        }
    }

    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    /// Return the text, or `UnbalancedBlocks` if a block is still open or was
    /// closed twice
    pub fn finish(self, unit: &str) -> GenResult<String> {
        if self.balance != 0 {
            return Err(GenError::UnbalancedBlocks {
                unit: unit.to_string(),
                depth: self.balance.unsigned_abs(),
            });
        }
        Ok(self.buf)
    }
}

#[cfg(test)]
mod tests {
    #![allow(non_snake_case)]

    use super::*;

    #[test]
    fn SourceWriter___nested_blocks___indent_by_depth() {
        let mut writer = SourceWriter::new(4);

        writer
            .block("namespace Game", |w| {
                w.block("partial class Player", |w| {
                    w.line("public int Health => _health;");
                    Ok(())
                })
            })
            .unwrap();

        let text = writer.finish("test").unwrap();
        assert_eq!(
            text,
            "namespace Game\n{\n    partial class Player\n    {\n        public int Health => _health;\n    }\n}\n"
        );
    }

    #[test]
    fn SourceWriter___indent_width___is_configurable() {
        let mut writer = SourceWriter::new(2);

        writer.open("class A");
        writer.line("x;");
        writer.close();

        assert_eq!(writer.finish("test").unwrap(), "class A\n{\n  x;\n}\n");
    }

    #[test]
    fn SourceWriter___blank___has_no_trailing_whitespace() {
        let mut writer = SourceWriter::new(4);

        writer.open("class A");
        writer.blank();
        writer.close();

        assert_eq!(writer.finish("test").unwrap(), "class A\n{\n\n}\n");
    }

    #[test]
    fn SourceWriter___unclosed_block___fails_finish() {
        let mut writer = SourceWriter::new(4);
        writer.open("class A");

        let result = writer.finish("A.g.cs");

        assert!(matches!(
            result,
            Err(GenError::UnbalancedBlocks { depth: 1, .. })
        ));
    }

    #[test]
    fn SourceWriter___extra_close___fails_finish() {
        let mut writer = SourceWriter::new(4);
        writer.close();

        assert!(writer.finish("A.g.cs").is_err());
    }

    #[test]
    fn SourceWriter___block_error___still_closes() {
        let mut writer = SourceWriter::new(4);

        let result = writer.block("class A", |_| Err(GenError::Cancelled));

        assert!(result.is_err());
        assert_eq!(writer.depth(), 0);
    }

    #[test]
    fn SourceWriter___append___reindents_lines() {
        let mut inner = SourceWriter::new(4);
        inner.open("class A");
        inner.close();
        let inner_text = inner.finish("inner").unwrap();

        let mut outer = SourceWriter::new(4);
        outer.open("namespace N");
        outer.append(&inner_text);
        outer.close();

        assert_eq!(
            outer.finish("outer").unwrap(),
            "namespace N\n{\n    class A\n    {\n    }\n}\n"
        );
    }
}
