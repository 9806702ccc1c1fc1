//! Turn text into normalized tokens
//!
//! Tokens are trimmed and lower-cased, and empty ones are dropped. Where one token ends and the
//! next begins is decided by a `Boundary`: runs of whitespace, unicode word bounds, or runs of a
//! character class (like a script's unicode block).
use std::borrow::Cow;
use regex::Regex;
use unicode_segmentation::UnicodeSegmentation;
use errors::*;
use super::{FrequencyMap, Token};

/// The Bengali unicode block, U+0980 to U+09FF
pub const BENGALI_CLASS: &'static str = r"[\x{0980}-\x{09FF}]+";

/// Nukta sequences and the single code points they fold into
const NUKTA_FOLDS: [(&'static str, &'static str); 3] = [
    ("\u{09A1}\u{09BC}", "\u{09DC}"), // ড় -> ড়
    ("\u{09A2}\u{09BC}", "\u{09DD}"), // ঢ় -> ঢ়
    ("\u{09AF}\u{09BC}", "\u{09DF}"), // য় -> য়
];

/// How to find token boundaries
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Boundary {
    /// Anything between runs of whitespace
    Whitespace,
    /// Unicode words, leaving out punctuation
    Words,
    /// Maximal matches of this regex
    Pattern(String),
}

impl Boundary {
    /// Bengali script runs; everything else separates tokens
    pub fn bengali() -> Boundary {
        Boundary::Pattern(BENGALI_CLASS.to_string())
    }
}

impl Default for Boundary {
    fn default() -> Boundary { Boundary::Whitespace }
}

enum Splitter {
    Whitespace,
    Words,
    Pattern(Regex),
}

/// Stateless tokenizer, safe to share between workers
pub struct Tokenizer {
    splitter: Splitter,
    fold_nukta: bool,
}

impl Tokenizer {
    /// Compile a tokenizer. Only a `Pattern` boundary can fail.
    pub fn new(boundary: &Boundary) -> Result<Tokenizer> {
        let splitter = match *boundary {
            Boundary::Whitespace => Splitter::Whitespace,
            Boundary::Words => Splitter::Words,
            Boundary::Pattern(ref pattern) => Splitter::Pattern(Regex::new(pattern)?),
        };
        Ok(Tokenizer { splitter: splitter, fold_nukta: false })
    }

    pub fn whitespace() -> Tokenizer {
        Tokenizer { splitter: Splitter::Whitespace, fold_nukta: false }
    }

    /// Also fold decomposed nukta letters into their precomposed forms
    pub fn with_nukta_folding(mut self, fold: bool) -> Tokenizer {
        self.fold_nukta = fold;
        self
    }

    pub fn tokenize(&self, text: &str) -> Vec<Token> {
        let mut tokens = vec![];
        self.for_each_token(text, |token| tokens.push(token));
        tokens
    }

    /// Tokenize raw bytes, skipping anything that isn't UTF-8
    pub fn tokenize_bytes(&self, bytes: &[u8]) -> Vec<Token> {
        self.tokenize(&String::from_utf8_lossy(bytes))
    }

    /// Add one to `counts` for each token in `text`
    pub fn count_into(&self, text: &str, counts: &mut FrequencyMap) {
        self.for_each_token(text, |token| *counts.entry(token).or_insert(0) += 1);
    }

    /// Same as `count_into`, but for raw bytes. Undecodable bytes become U+FFFD, which
    /// separates tokens like whitespace does.
    pub fn count_bytes_into(&self, bytes: &[u8], counts: &mut FrequencyMap) {
        self.count_into(&String::from_utf8_lossy(bytes), counts);
    }

    fn for_each_token<F: FnMut(Token)>(&self, text: &str, mut emit: F) {
        match self.splitter {
            Splitter::Whitespace => self.emit_pieces(text, &mut emit),
            Splitter::Words => {
                for word in text.unicode_words() {
                    self.emit_pieces(word, &mut emit);
                }
            }
            Splitter::Pattern(ref re) => {
                for found in re.find_iter(text) {
                    self.emit_pieces(found.as_str(), &mut emit);
                }
            }
        }
    }

    /// Normalize and emit each separator-free piece of `raw`
    fn emit_pieces<F: FnMut(Token)>(&self, raw: &str, emit: &mut F) {
        for piece in raw.split(is_separator) {
            if piece.is_empty() {
                continue;
            }
            let lower = piece.to_lowercase();
            if self.fold_nukta {
                emit(fold_nukta(&lower).into_owned());
            } else {
                emit(lower);
            }
        }
    }
}

fn is_separator(c: char) -> bool {
    c.is_whitespace() || c == '\u{FFFD}'
}

/// Replace decomposed nukta letters with their single code point forms
pub fn fold_nukta(text: &str) -> Cow<str> {
    if !text.contains('\u{09BC}') {
        return Cow::Borrowed(text);
    }
    let mut folded = text.to_string();
    for &(from, to) in NUKTA_FOLDS.iter() {
        folded = folded.replace(from, to);
    }
    Cow::Owned(folded)
}

#[cfg(test)]
mod tests {
    use super::*;
    use farm::new_farm;

    #[test]
    fn whitespace_tokens_are_lowercased() {
        let tok = Tokenizer::whitespace();
        assert_eq!(tok.tokenize("The  cat\tSAT\non the\r\nmat"),
                   vec!["the", "cat", "sat", "on", "the", "mat"]);
    }

    #[test]
    fn blank_text_has_no_tokens() {
        let tok = Tokenizer::whitespace();
        assert!(tok.tokenize("").is_empty());
        assert!(tok.tokenize(" \n\t  \n").is_empty());
    }

    #[test]
    fn tokenizing_twice_gives_the_same_tokens() {
        let text = "Ünïcode words, and SOME punctuation! plus ড় and মা";
        for boundary in vec![Boundary::Whitespace, Boundary::Words, Boundary::bengali()] {
            let tok = Tokenizer::new(&boundary).unwrap();
            assert_eq!(tok.tokenize(text), tok.tokenize(text));
        }
    }

    #[test]
    fn words_drop_punctuation() {
        let tok = Tokenizer::new(&Boundary::Words).unwrap();
        assert_eq!(tok.tokenize("Hello, world! Hello?"), vec!["hello", "world", "hello"]);
    }

    #[test]
    fn bengali_pattern_keeps_only_bengali_runs() {
        let tok = Tokenizer::new(&Boundary::bengali()).unwrap();
        assert_eq!(tok.tokenize("আমি ami, তুমি!"), vec!["আমি", "তুমি"]);
    }

    #[test]
    fn bad_patterns_are_rejected() {
        match Tokenizer::new(&Boundary::Pattern("[a-".to_string())) {
            Err(Error::InvalidPattern(_)) => {}
            _ => panic!("expected an invalid pattern error"),
        }
    }

    #[test]
    fn undecodable_bytes_split_tokens() {
        let tok = Tokenizer::whitespace();
        assert_eq!(tok.tokenize_bytes(b"foo\xffbar baz\xc3"), vec!["foo", "bar", "baz"]);
        let greedy = Tokenizer::new(&Boundary::Pattern(r"\S+".to_string())).unwrap();
        assert_eq!(greedy.tokenize_bytes(b"Foo\xffbar"), vec!["foo", "bar"]);
    }

    #[test]
    fn nukta_folding() {
        let decomposed = "\u{09AF}\u{09BC}\u{09BE}";
        let plain = Tokenizer::new(&Boundary::bengali()).unwrap();
        let folding = Tokenizer::new(&Boundary::bengali()).unwrap().with_nukta_folding(true);
        assert_eq!(plain.tokenize(decomposed), vec![decomposed]);
        assert_eq!(folding.tokenize(decomposed), vec!["\u{09DF}\u{09BE}"]);
        assert_eq!(fold_nukta("plain"), Cow::Borrowed("plain"));
    }

    #[test]
    fn counting_adds_up() {
        let tok = Tokenizer::whitespace();
        let mut counts = new_farm();
        tok.count_into("a b a", &mut counts);
        tok.count_bytes_into(b"A c", &mut counts);
        assert_eq!(counts["a"], 3);
        assert_eq!(counts["b"], 1);
        assert_eq!(counts["c"], 1);
    }
}
