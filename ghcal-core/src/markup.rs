use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};

use crate::GhcalError;

/// A start (or self-closing) tag with its attributes.
///
/// Names and attribute keys are ASCII-lowercased. Attribute values are kept
/// verbatim; entity references inside them are not expanded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tag {
    name: String,
    attrs: Vec<(String, String)>,
}

impl Tag {
    /// Build a tag from a name and attribute pairs.
    pub fn new<N, K, V>(name: N, attrs: impl IntoIterator<Item = (K, V)>) -> Self
    where
        N: Into<String>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            name: name.into().to_ascii_lowercase(),
            attrs: attrs
                .into_iter()
                .map(|(k, v)| (k.into().to_ascii_lowercase(), v.into()))
                .collect(),
        }
    }

    fn from_start(elem: &BytesStart<'_>) -> Self {
        let name = String::from_utf8_lossy(elem.name().as_ref()).to_ascii_lowercase();
        // Malformed attributes are dropped rather than failing the stream.
        let attrs = elem
            .html_attributes()
            .flatten()
            .map(|attr| {
                (
                    String::from_utf8_lossy(attr.key.as_ref()).to_ascii_lowercase(),
                    String::from_utf8_lossy(&attr.value).into_owned(),
                )
            })
            .collect();
        Self { name, attrs }
    }

    /// Lowercased element name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// True if this tag is a `name` element.
    #[must_use]
    pub fn is(&self, name: &str) -> bool {
        self.name == name
    }

    /// Value of the first attribute named `key`.
    #[must_use]
    pub fn attr(&self, key: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }
}

/// One markup token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    /// A start tag or a self-closing tag.
    Start(Tag),
    /// A run of character data.
    Text(String),
    /// Anything the parsers skip: end tags, comments, doctypes, references.
    Other,
}

/// Lazy token stream over a page.
///
/// Yields `None` at clean end of stream. A tokenizer failure is yielded once
/// as `Err(GhcalError::Parse)` and ends the stream. Closing-tag names are not
/// checked, so HTML void elements and stray end tags do not fail the stream.
/// Text and attribute values are decoded lossily; bare `&` passes through.
pub struct Tokenizer<'a> {
    reader: Reader<&'a [u8]>,
    done: bool,
}

impl<'a> Tokenizer<'a> {
    /// Create a tokenizer over `input`.
    #[must_use]
    pub fn new(input: &'a [u8]) -> Self {
        let mut reader = Reader::from_reader(input);
        let config = reader.config_mut();
        config.trim_text(false);
        config.enable_all_checks(false);
        config.allow_unmatched_ends = true;
        // Bare `&` is legal in HTML text.
        config.allow_dangling_amp = true;
        Self {
            reader,
            done: false,
        }
    }

    /// Consume exactly one token and return its text if it was a text token.
    ///
    /// # Errors
    /// Returns `GhcalError::Parse` if the consumed token was a tokenizer failure.
    pub fn next_text(&mut self) -> Result<Option<String>, GhcalError> {
        match self.next().transpose()? {
            Some(Token::Text(text)) => Ok(Some(text)),
            _ => Ok(None),
        }
    }

    fn fail(&mut self, msg: impl std::fmt::Display) -> GhcalError {
        self.done = true;
        GhcalError::parse(format!(
            "markup error at byte {}: {msg}",
            self.reader.error_position()
        ))
    }
}

impl Iterator for Tokenizer<'_> {
    type Item = Result<Token, GhcalError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        let token = match self.reader.read_event() {
            Ok(Event::Start(elem) | Event::Empty(elem)) => Token::Start(Tag::from_start(&elem)),
            Ok(Event::Text(text)) => Token::Text(String::from_utf8_lossy(&text).into_owned()),
            Ok(Event::Eof) => {
                self.done = true;
                return None;
            }
            Ok(_) => Token::Other,
            Err(e) => return Some(Err(self.fail(e))),
        };
        Some(Ok(token))
    }
}
