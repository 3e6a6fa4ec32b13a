/// Precomputed line layout of a source buffer.
///
/// Used by diagnostics to turn byte offsets into 1-based line/column pairs
/// and to recover the text of a line for caret rendering.
pub struct LineInfo<'a> {
    source: &'a str,
    /// Byte offset of the first character of each line
    line_starts: Vec<usize>,
}

impl<'a> LineInfo<'a> {
    pub fn new(source: &'a str) -> Self {
        let mut line_starts = vec![0];
        for (index, byte) in source.bytes().enumerate() {
            if byte == b'\n' {
                line_starts.push(index + 1);
            }
        }
        Self {
            source,
            line_starts,
        }
    }

    /// Converts a byte offset into a 1-based (line, column) pair
    pub fn get_line_col(&self, position: usize) -> (usize, usize) {
        let line = match self.line_starts.binary_search(&position) {
            Ok(index) => index,
            Err(index) => index - 1,
        };
        let column = position - self.line_starts[line] + 1;
        (line + 1, column)
    }

    /// Returns the text of a 1-based line, without its terminator
    pub fn get_line_text(&self, line: usize) -> Option<&'a str> {
        let start = *self.line_starts.get(line.checked_sub(1)?)?;
        let end = self
            .line_starts
            .get(line)
            .map(|next| next - 1)
            .unwrap_or(self.source.len());
        self.source.get(start..end)
    }

    pub fn line_count(&self) -> usize {
        self.line_starts.len()
    }
}
