use regex::Regex;
use tantivy::tokenizer::{Token, TokenStream, Tokenizer};

/// Markup tags and HTML entities never contribute tokens.
const MARKUP_SEPARATORS: &str = r"<[^>]*>|&#?[0-9A-Za-z]+;";

/// Splits text on a separator pattern, then trims non-alphanumeric edges off
/// each piece. Pieces left empty are skipped.
#[derive(Clone)]
pub struct SeparatorTokenizer {
    separator: Regex,
    token: Token,
}

impl SeparatorTokenizer {
    /// `separator` is combined with the markup separators. Fails if it does not compile.
    pub fn new(separator: &str) -> Result<Self, regex::Error> {
        let separator = Regex::new(&format!("(?:{separator})|{MARKUP_SEPARATORS}"))?;
        Ok(Self { separator, token: Token::default() })
    }

    fn spans(&self, text: &str) -> Vec<(usize, usize)> {
        let mut spans = Vec::new();
        let mut start = 0;
        for sep in self.separator.find_iter(text) {
            push_trimmed(text, start, sep.start(), &mut spans);
            start = sep.end().max(start);
        }
        push_trimmed(text, start, text.len(), &mut spans);
        spans
    }
}

fn push_trimmed(text: &str, from: usize, to: usize, spans: &mut Vec<(usize, usize)>) {
    if from >= to {
        return;
    }
    let piece = &text[from..to];
    let Some((first, _)) = piece.char_indices().find(|(_, c)| c.is_alphanumeric()) else {
        return;
    };
    let last = piece
        .char_indices()
        .rev()
        .find(|(_, c)| c.is_alphanumeric())
        .map_or(first, |(i, c)| i + c.len_utf8());
    spans.push((from + first, from + last));
}

pub struct SeparatorTokenStream<'a> {
    text: &'a str,
    spans: std::vec::IntoIter<(usize, usize)>,
    token: &'a mut Token,
}

impl Tokenizer for SeparatorTokenizer {
    type TokenStream<'a> = SeparatorTokenStream<'a>;

    fn token_stream<'a>(&'a mut self, text: &'a str) -> Self::TokenStream<'a> {
        self.token.reset();
        let spans = self.spans(text);
        SeparatorTokenStream { text, spans: spans.into_iter(), token: &mut self.token }
    }
}

impl TokenStream for SeparatorTokenStream<'_> {
    fn advance(&mut self) -> bool {
        let Some((from, to)) = self.spans.next() else {
            return false;
        };
        self.token.text.clear();
        self.token.position = self.token.position.wrapping_add(1);
        self.token.offset_from = from;
        self.token.offset_to = to;
        self.token.text.push_str(&self.text[from..to]);
        true
    }

    fn token(&self) -> &Token {
        self.token
    }

    fn token_mut(&mut self) -> &mut Token {
        self.token
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tokens(separator: &str, text: &str) -> Vec<String> {
        let mut tokenizer = SeparatorTokenizer::new(separator).expect("separator");
        let mut stream = tokenizer.token_stream(text);
        let mut out = Vec::new();
        while stream.advance() {
            out.push(stream.token().text.clone());
        }
        out
    }

    #[test]
    fn markup_and_entities_separate_tokens() {
        assert_eq!(
            tokens(r"[\s\-]+", "<p>Answer&amp;text</p> self-hosted"),
            vec!["Answer", "text", "self", "hosted"]
        );
    }

    #[test]
    fn edges_are_trimmed_and_empty_pieces_dropped() {
        assert_eq!(tokens(r"\s+", "(hello), -- world!"), vec!["hello", "world"]);
    }

    #[test]
    fn positions_are_consecutive() {
        let mut tokenizer = SeparatorTokenizer::new(r"\s+").expect("separator");
        let mut stream = tokenizer.token_stream("a b c");
        let mut positions = Vec::new();
        while stream.advance() {
            positions.push(stream.token().position);
        }
        assert_eq!(positions, vec![0, 1, 2]);
    }
}
