// ============================================================
// Layer 4 — Text Preprocessor
// ============================================================
// Cleans a question before it reaches the tokenizer.
//
// Questions arrive from a console, an import file or a chat
// integration and may carry:
//   - Non-breaking spaces (U+00A0) and zero-width spaces (U+200B)
//   - Byte order marks from files saved on Windows
//   - Tabs, carriage returns and stray control characters
//   - Runs of whitespace and leading/trailing padding
//
// The same cleaning is applied at training and answer time so
// both sides see identical token streams. Case folding is left
// to the tokenizer's normalizer.
//
// Zero-width non-joiner (U+200C) is kept: it is part of the
// spelling of words in Persian and other scripts.

pub struct Preprocessor;

impl Preprocessor {
    pub fn new() -> Self {
        Self
    }

    /// Clean a question into a single line of single-spaced text.
    pub fn clean(&self, text: &str) -> String {
        // ── Step 1: map odd whitespace and control chars to plain spaces ─────
        let normalised = text.chars().map(|c| match c {
            '\u{00A0}' | '\u{200B}' | '\u{FEFF}' => ' ',
            c if c.is_control() => ' ',
            c => c,
        });

        // ── Step 2: collapse runs of whitespace, trim both ends ──────────────
        let mut out        = String::with_capacity(text.len());
        let mut last_space = true;
        for c in normalised {
            if c.is_whitespace() {
                if !last_space {
                    out.push(' ');
                }
                last_space = true;
            } else {
                out.push(c);
                last_space = false;
            }
        }

        if out.ends_with(' ') {
            out.pop();
        }
        out
    }
}

impl Default for Preprocessor {
    fn default() -> Self {
        Self::new()
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collapses_multiple_spaces() {
        let p = Preprocessor::new();
        assert_eq!(p.clean("what   is\t\tcovered"), "what is covered");
    }

    #[test]
    fn test_trims_edges() {
        let p = Preprocessor::new();
        assert_eq!(p.clean("  hello world  "), "hello world");
    }

    #[test]
    fn test_joins_lines() {
        let p = Preprocessor::new();
        assert_eq!(p.clean("line1\r\n\r\nline2\n"), "line1 line2");
    }

    #[test]
    fn test_removes_control_chars() {
        let p = Preprocessor::new();
        assert_eq!(p.clean("hello\x01world"), "hello world");
        assert_eq!(p.clean("\u{FEFF}hello\u{00A0}world"), "hello world");
    }

    #[test]
    fn test_keeps_non_latin_text() {
        let p = Preprocessor::new();
        assert_eq!(p.clean(" بیمه  شخص\u{200C}ثالث "), "بیمه شخص\u{200C}ثالث");
    }

    #[test]
    fn test_whitespace_only_becomes_empty() {
        let p = Preprocessor::new();
        assert_eq!(p.clean(""), "");
        assert_eq!(p.clean(" \n\t "), "");
    }
}
