use console::{measure_text_width, pad_str, Alignment};

/// Append-only builder for a rendered line.
#[derive(Debug, Clone, Default)]
pub struct LineBuilder {
    buf: String,
}

impl LineBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, s: &str) -> &mut Self {
        self.buf.push_str(s);
        self
    }

    /// Pushes `yes` when `cond` holds, `no` otherwise.
    pub fn push_alt(&mut self, cond: bool, yes: &str, no: &str) -> &mut Self {
        self.push(if cond { yes } else { no })
    }

    /// Appends `n` spaces.
    pub fn pad(&mut self, n: usize) -> &mut Self {
        for _ in 0..n {
            self.buf.push(' ');
        }
        self
    }

    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    pub fn as_str(&self) -> &str {
        &self.buf
    }

    /// Returns the line, optionally with ANSI sequences removed.
    pub fn finish(&self, strip: bool) -> String {
        if strip {
            strip_ansi(&self.buf)
        } else {
            self.buf.clone()
        }
    }
}

/// Printable width of `s`, ignoring ANSI sequences.
pub fn visible_width(s: &str) -> usize {
    measure_text_width(s)
}

/// Right-aligns `s` in a column of `width` visible characters.
pub fn pad_left(s: &str, width: usize) -> String {
    pad_str(s, width, Alignment::Right, None).into_owned()
}

/// Left-aligns `s` in a column of `width` visible characters.
pub fn pad_right(s: &str, width: usize) -> String {
    pad_str(s, width, Alignment::Left, None).into_owned()
}

pub fn strip_ansi(s: &str) -> String {
    console::strip_ansi_codes(s).into_owned()
}
