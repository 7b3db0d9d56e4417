//! Immutable text corpora and their word segmentation.

use std::ops::Range;

use serde::Serialize;

use crate::error::{ComponentKind, ConfigurationError};

/// Metadata describing a corpus, as shown by [`crate::Registry::list_registered`].
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct CorpusInfo {
    pub name: String,
    /// Where the text came from (path, URL, "inline").
    pub source: String,
    pub language: String,
    pub chars: usize,
    pub words: usize,
}

/// A contiguous piece of the corpus text: either a word or the gap between words.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Segment {
    /// Byte range into the corpus text.
    pub range: Range<usize>,
    pub is_word: bool,
}

/// Named, immutable text source. Word spans are computed once, at construction.
#[derive(Debug, Clone)]
pub struct Corpus {
    name: String,
    text: String,
    source: String,
    language: String,
    segments: Vec<Segment>,
    word_count: usize,
}

/// Word separators: any whitespace, ASCII punctuation, and the Arabic
/// comma, semicolon, question mark and full stop.
pub fn is_word_boundary(c: char) -> bool {
    c.is_whitespace() || c.is_ascii_punctuation() || matches!(c, '،' | '؛' | '؟' | '۔')
}

impl Corpus {
    pub fn new(
        name: impl Into<String>,
        text: impl Into<String>,
    ) -> Result<Self, ConfigurationError> {
        Self::with_metadata(name, text, "inline", "unknown")
    }

    pub fn with_metadata(
        name: impl Into<String>,
        text: impl Into<String>,
        source: impl Into<String>,
        language: impl Into<String>,
    ) -> Result<Self, ConfigurationError> {
        let name = name.into();
        let text = text.into();
        if name.is_empty() {
            return Err(ConfigurationError::EmptyName {
                kind: ComponentKind::Corpus,
            });
        }
        if text.is_empty() {
            return Err(ConfigurationError::EmptyCorpus { name });
        }
        let segments = segment(&text);
        let word_count = segments.iter().filter(|s| s.is_word).count();
        Ok(Self {
            name,
            text,
            source: source.into(),
            language: language.into(),
            segments,
            word_count,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Words and gaps in text order; together they cover the whole text.
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Byte spans of the words, in text order.
    pub fn word_spans(&self) -> impl Iterator<Item = Range<usize>> + '_ {
        self.segments
            .iter()
            .filter(|s| s.is_word)
            .map(|s| s.range.clone())
    }

    pub fn words(&self) -> impl Iterator<Item = &str> + '_ {
        self.word_spans().map(|r| &self.text[r])
    }

    pub fn word_count(&self) -> usize {
        self.word_count
    }

    pub fn info(&self) -> CorpusInfo {
        CorpusInfo {
            name: self.name.clone(),
            source: self.source.clone(),
            language: self.language.clone(),
            chars: self.text.chars().count(),
            words: self.word_count,
        }
    }
}

fn segment(text: &str) -> Vec<Segment> {
    let mut segments: Vec<Segment> = Vec::new();
    for (start, c) in text.char_indices() {
        let end = start + c.len_utf8();
        let is_word = !is_word_boundary(c);
        match segments.last_mut() {
            Some(last) if last.is_word == is_word => last.range.end = end,
            _ => segments.push(Segment {
                range: start..end,
                is_word,
            }),
        }
    }
    segments
}
