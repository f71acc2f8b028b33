//! Line-oriented reading over a borrowed byte buffer.

/// A bounds-checked read position over an immutable buffer.
///
/// The position never passes the end of the buffer. Running out of data is
/// reported as `None` from [`Cursor::read_line`], never as an error.
#[derive(Debug, Clone)]
pub struct Cursor<'a> {
    data: &'a [u8],
    pos: usize,
    last_len: usize,
    truncated: bool,
}

impl<'a> Cursor<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self::at(data, 0)
    }

    /// Start reading at `offset`, clamped to the end of the buffer.
    pub fn at(data: &'a [u8], offset: usize) -> Self {
        Self {
            data,
            pos: offset.min(data.len()),
            last_len: 0,
            truncated: false,
        }
    }

    pub fn at_end(&self) -> bool {
        self.pos >= self.data.len()
    }

    pub fn offset(&self) -> usize {
        self.pos
    }

    /// Whether a read hit a final line with no terminator.
    pub fn is_truncated(&self) -> bool {
        self.truncated
    }

    /// Bytes consumed by the previous successful [`read_line`](Self::read_line),
    /// terminator included.
    pub fn last_line_len(&self) -> usize {
        self.last_len
    }

    /// Return the bytes up to (excluding) the next `\n` and step past it.
    ///
    /// A trailing fragment with no `\n` is not a complete line: the cursor
    /// moves to the end, marks itself truncated and returns `None`.
    pub fn read_line(&mut self) -> Option<&'a [u8]> {
        if self.at_end() {
            self.last_len = 0;
            return None;
        }
        let rest = &self.data[self.pos..];
        match rest.iter().position(|&b| b == b'\n') {
            Some(nl) => {
                self.pos += nl + 1;
                self.last_len = nl + 1;
                Some(&rest[..nl])
            }
            None => {
                self.pos = self.data.len();
                self.last_len = 0;
                self.truncated = true;
                None
            }
        }
    }

    /// Move back by exactly `n` bytes (saturating at the start).
    pub fn rewind(&mut self, n: usize) {
        self.pos = self.pos.saturating_sub(n);
        self.last_len = 0;
    }
}

/// Skip leading ASCII whitespace.
pub fn trim_start(line: &[u8]) -> &[u8] {
    let start = line
        .iter()
        .position(|b| !b.is_ascii_whitespace())
        .unwrap_or(line.len());
    &line[start..]
}

/// Lenient integer parse with C `atol` semantics: leading whitespace, an
/// optional sign, then the longest run of digits. Anything else is 0.
pub fn parse_leading_int(line: &[u8]) -> i64 {
    let s = trim_start(line);
    let (negative, digits) = match s.first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };
    let mut value: i64 = 0;
    for &b in digits.iter().take_while(|b| b.is_ascii_digit()) {
        value = value.saturating_mul(10).saturating_add(i64::from(b - b'0'));
    }
    if negative { -value } else { value }
}

/// [`parse_leading_int`] for counts and line numbers: negatives become 0.
pub(crate) fn parse_count(line: &[u8]) -> usize {
    usize::try_from(parse_leading_int(line)).unwrap_or(0)
}
