use super::token::Token;

/// Splits markup into tag spans and text runs in a single left-to-right pass.
///
/// - `<` ends the pending text run (if any) and starts a tag span.
/// - `>` ends the current span, tag or not, and emits it.
/// - Anything else extends the pending span.
///
/// Empty spans are never emitted. A `<` that is never followed by `>` is not
/// an error: its span is emitted as-is when the next `<` arrives or the input
/// ends, and the classifier later treats it as text.
///
/// Quotes are not tracked here, so a `>` inside an attribute value ends the tag.
#[derive(Debug)]
pub struct MarkupTokenizer {
    input: String,
    buffer: String,
    buffer_start: usize,
    token_stream: Vec<Token>,
}

impl MarkupTokenizer {
    /// Create a new tokenizer for the given input.
    #[must_use]
    pub fn new(input: impl Into<String>) -> Self {
        Self {
            input: input.into(),
            buffer: String::new(),
            buffer_start: 0,
            token_stream: Vec::new(),
        }
    }

    /// Consume the tokenizer and return the token stream.
    /// Call this after `run()` to get the tokens for the tree builder.
    #[must_use]
    pub fn into_tokens(self) -> Vec<Token> {
        self.token_stream
    }

    /// Run the tokenizer to completion.
    ///
    /// The input is consumed; calling `run` again emits nothing more.
    pub fn run(&mut self) {
        let input = std::mem::take(&mut self.input);

        for (pos, c) in input.char_indices() {
            match c {
                '<' => {
                    self.emit_pending();
                    self.append(pos, c);
                }
                '>' => {
                    self.append(pos, c);
                    self.emit_pending();
                }
                _ => self.append(pos, c),
            }
        }

        self.emit_pending();
    }

    fn append(&mut self, pos: usize, c: char) {
        if self.buffer.is_empty() {
            self.buffer_start = pos;
        }
        self.buffer.push(c);
    }

    fn emit_pending(&mut self) {
        if self.buffer.is_empty() {
            return;
        }
        let data = std::mem::take(&mut self.buffer);
        self.token_stream.push(Token::new(data, self.buffer_start));
    }
}

/// Tokenize `input` in one call.
#[must_use]
pub fn tokenize(input: &str) -> Vec<Token> {
    let mut tokenizer = MarkupTokenizer::new(input);
    tokenizer.run();
    tokenizer.into_tokens()
}
