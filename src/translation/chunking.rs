/*!
 * Line-preserving text chunking.
 *
 * Splits a document into ordered chunks that fit the service's request size
 * without ever cutting a line in two. Lengths are counted in characters.
 */

/// Largest chunk sent in one translate request
pub const DEFAULT_MAX_CHARS: usize = 4500;

/// An ordered fragment of a document
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Chunk {
    /// Position of the chunk in the document
    pub index: usize,
    /// Chunk content, line terminators included
    pub text: String,
}

impl Chunk {
    /// Length in characters
    pub fn char_len(&self) -> usize {
        self.text.chars().count()
    }
}

/// Whether `c` ends a line
fn is_line_break(c: char) -> bool {
    matches!(
        c,
        '\n' | '\r' | '\u{0b}' | '\u{0c}' | '\u{1c}' | '\u{1d}' | '\u{1e}' | '\u{85}' | '\u{2028}' | '\u{2029}'
    )
}

/// Iterator over the lines of a text, each with its terminator
#[derive(Debug, Clone)]
pub struct LinesInclusive<'a> {
    rest: &'a str,
}

impl<'a> Iterator for LinesInclusive<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<&'a str> {
        if self.rest.is_empty() {
            return None;
        }

        let end = match self.rest.char_indices().find(|&(_, c)| is_line_break(c)) {
            Some((i, '\r')) if self.rest[i + 1..].starts_with('\n') => i + 2,
            Some((i, c)) => i + c.len_utf8(),
            None => self.rest.len(),
        };

        let (line, rest) = self.rest.split_at(end);
        self.rest = rest;
        Some(line)
    }
}

/// Lines of `text` with their terminators kept.
///
/// Besides `\n`, a line ends at `\r`, vertical tab, form feed, the
/// separators `\x1c`..`\x1e`, NEL, U+2028 and U+2029; `\r\n` counts as one
/// terminator. The last line may have none.
pub fn lines_inclusive(text: &str) -> LinesInclusive<'_> {
    LinesInclusive { rest: text }
}

/// Split `text` into chunks of at most `max_chars` characters.
///
/// Text that already fits comes back as a single chunk, empty text included.
/// Longer text is cut only between lines; lines are accumulated greedily and
/// a line longer than `max_chars` gets a chunk of its own. Concatenating the
/// chunks in order always yields `text` again.
pub fn chunk_text(text: &str, max_chars: usize) -> Vec<Chunk> {
    if text.chars().count() <= max_chars {
        return vec![Chunk { index: 0, text: text.to_string() }];
    }

    let mut chunks = Vec::new();
    let mut buffer = String::new();
    let mut count = 0;

    for line in lines_inclusive(text) {
        let line_len = line.chars().count();
        if count + line_len > max_chars && !buffer.is_empty() {
            chunks.push(Chunk { index: chunks.len(), text: std::mem::take(&mut buffer) });
            count = 0;
        }
        buffer.push_str(line);
        count += line_len;
    }

    if !buffer.is_empty() {
        chunks.push(Chunk { index: chunks.len(), text: buffer });
    }

    chunks
}

/// Leading sample of at most `max_chars` characters
pub fn leading_sample(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((byte_index, _)) => &text[..byte_index],
        None => text,
    }
}
