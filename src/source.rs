use std::{fs, io, path::Path};

/// File name used for source text that did not come from a file.
pub const ANONYMOUS: &str = "<stdin>";

/// A unit of ox source text together with the name it is reported under.
///
/// Every diagnostic is rendered against a `Source`: the lexer records absolute
/// offsets and zero-indexed lines, and `Source` turns those back into a
/// column, the literal line text and a caret width.
#[derive(Debug, Clone)]
pub struct Source {
    name: String,
    text: String,
}

impl Source {
    /// Creates a source unit from a name and its text.
    pub fn new(name: impl Into<String>, text: impl Into<String>) -> Self {
        Self { name: name.into(),
               text: text.into(), }
    }

    /// Creates a source unit reported as `<stdin>`.
    pub fn anonymous(text: impl Into<String>) -> Self {
        Self::new(ANONYMOUS, text)
    }

    /// Reads a file into a source unit named after its path.
    pub fn from_path(path: &Path) -> io::Result<Self> {
        let text = fs::read_to_string(path)?;
        Ok(Self::new(path.display().to_string(), text))
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Returns the text of the zero-indexed `line`, without its newline.
    ///
    /// Lines past the end of the text are reported as empty.
    #[must_use]
    pub fn line_text(&self, line: usize) -> &str {
        self.text.split('\n').nth(line).unwrap_or("")
    }

    /// Byte offset at which the zero-indexed `line` starts.
    ///
    /// This is the cumulative length of every prior line, counting one byte
    /// for each newline that terminated them.
    #[must_use]
    pub fn line_start(&self, line: usize) -> usize {
        self.text.split('\n').take(line).map(|l| l.len() + 1).sum()
    }

    /// Zero-indexed column, in characters, of byte `offset` on `line`.
    ///
    /// # Example
    /// ```
    /// use oxlang::source::Source;
    ///
    /// let source = Source::anonymous("x = 1\ny = foo\n");
    /// assert_eq!(source.column(1, 10), 4);
    /// ```
    #[must_use]
    pub fn column(&self, line: usize, offset: usize) -> usize {
        let start = self.line_start(line).min(self.text.len());
        let end = offset.clamp(start, self.text.len());

        self.text
            .get(start..end)
            .map_or(end - start, |s| s.chars().count())
    }

    /// Number of caret characters needed to underline `len` bytes starting at
    /// `offset`, clamped to the end of `line` and never less than one.
    #[must_use]
    pub fn caret_width(&self, line: usize, offset: usize, len: usize) -> usize {
        let line_end = self.line_start(line) + self.line_text(line).len();
        let start = offset.min(self.text.len());
        let end = (offset + len).min(line_end).max(start);

        self.text
            .get(start..end)
            .map_or(0, |s| s.chars().count())
            .max(1)
    }
}
