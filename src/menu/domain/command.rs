//! Chat command parsing.
//!
//! Commands arrive with the bot prefix already stripped, e.g.
//! `search 家`, `d 2 house` or `link https://jisho.org/word/家`.

use percent_encoding::percent_decode_str;
use std::num::NonZeroUsize;
use thiserror::Error;
use url::Url;

const JISHO_HOST: &str = "jisho.org";
const KANJI_MARKER: &str = "#kanji";

/// A parsed chat command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MenuCommand {
    /// Search for `query` and show the first page.
    Search {
        /// Search text.
        query: String,
    },
    /// Search for `query` and open the `number`th result.
    Details {
        /// One-based result number.
        number: NonZeroUsize,
        /// Search text.
        query: String,
    },
    /// Show whatever a jisho.org link points at.
    Link(LinkTarget),
    /// Liveness check.
    Ping,
    /// Report the bot version.
    Version,
}

/// What a jisho.org link refers to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LinkTarget {
    /// A search results page.
    Search(String),
    /// A single word entry, by slug.
    Word(String),
}

/// Reasons a link cannot be analysed.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum LinkError {
    /// The link does not point at jisho.org.
    #[error("Not a recognized jisho.org link")]
    NotJisho,
    /// The link is neither a search nor a word page.
    #[error("Unable to analyze link (error: NOTYPE)")]
    NoType,
    /// The link has no query or slug.
    #[error("Unable to determine search query")]
    NoQuery,
    /// The link is a kanji search, which the API cannot answer.
    #[error("Kanji data not currently supported by API")]
    Kanji,
}

/// Errors raised while parsing a command.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CommandParseError {
    /// Nothing followed the prefix.
    #[error("no command given")]
    EmptyInput,
    /// The command name is not recognised.
    #[error("unrecognized command '{0}'")]
    UnknownCommand(String),
    /// A required argument is missing.
    #[error("incorrect arguments - `{command}` requires <{argument}>")]
    MissingArgument {
        /// Canonical command name.
        command: &'static str,
        /// Missing argument name.
        argument: &'static str,
    },
    /// The result number is not a positive integer.
    #[error("'{0}' is not a valid result number")]
    InvalidResultNumber(String),
    /// The link could not be analysed.
    #[error(transparent)]
    Link(#[from] LinkError),
}

impl MenuCommand {
    /// Parses a command line.
    ///
    /// # Errors
    ///
    /// Returns [`CommandParseError`] for empty input, unknown commands,
    /// missing arguments, bad result numbers, and unusable links.
    pub fn parse(input: &str) -> Result<Self, CommandParseError> {
        let trimmed = input.trim();
        let (name, rest) = split_token(trimmed);
        if name.is_empty() {
            return Err(CommandParseError::EmptyInput);
        }

        match name.to_lowercase().as_str() {
            "search" | "s" => Ok(Self::Search {
                query: require(rest, "search", "query")?,
            }),
            "details" | "d" => {
                let (number_token, query) = split_token(rest);
                let number_text = require(number_token, "details", "num")?;
                let number = number_text
                    .parse::<NonZeroUsize>()
                    .map_err(|_| CommandParseError::InvalidResultNumber(number_text.clone()))?;
                Ok(Self::Details {
                    number,
                    query: require(query, "details", "query")?,
                })
            }
            "link" | "l" => {
                let link = require(rest, "link", "link")?;
                Ok(Self::Link(LinkTarget::parse(&link)?))
            }
            "ping" | "p" => Ok(Self::Ping),
            "version" | "v" => Ok(Self::Version),
            _ => Err(CommandParseError::UnknownCommand(name.to_owned())),
        }
    }
}

impl LinkTarget {
    /// Analyses a jisho.org search or word link.
    ///
    /// Links may omit the scheme and may be wrapped in `<...>` to suppress
    /// chat previews.
    ///
    /// # Errors
    ///
    /// Returns [`LinkError`] describing why the link cannot be used.
    pub fn parse(raw: &str) -> Result<Self, LinkError> {
        let trimmed = raw
            .trim()
            .trim_start_matches('<')
            .trim_end_matches('>')
            .trim();
        let with_scheme = if trimmed.contains("://") {
            trimmed.to_owned()
        } else {
            format!("https://{trimmed}")
        };

        let url = Url::parse(&with_scheme).map_err(|_| LinkError::NotJisho)?;
        let host = url.host_str().ok_or(LinkError::NotJisho)?;
        if host != JISHO_HOST && !host.ends_with(&format!(".{JISHO_HOST}")) {
            return Err(LinkError::NotJisho);
        }

        let mut segments = url
            .path_segments()
            .ok_or(LinkError::NoType)?
            .filter(|segment| !segment.is_empty());
        let kind = segments.next().ok_or(LinkError::NoType)?;
        if kind != "search" && kind != "word" {
            return Err(LinkError::NoType);
        }

        let encoded = segments.next().ok_or(LinkError::NoQuery)?;
        let decoded = percent_decode_str(encoded)
            .decode_utf8()
            .map_err(|_| LinkError::NoQuery)?;
        let query = decoded.trim();
        if query.is_empty() {
            return Err(LinkError::NoQuery);
        }

        if kind == "word" {
            return Ok(Self::Word(query.to_owned()));
        }
        if query.contains(KANJI_MARKER) || url.fragment() == Some("kanji") {
            return Err(LinkError::Kanji);
        }
        Ok(Self::Search(query.to_owned()))
    }
}

fn split_token(input: &str) -> (&str, &str) {
    let trimmed = input.trim_start();
    trimmed
        .split_once(char::is_whitespace)
        .map_or((trimmed, ""), |(head, tail)| (head, tail.trim()))
}

fn require(
    value: &str,
    command: &'static str,
    argument: &'static str,
) -> Result<String, CommandParseError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(CommandParseError::MissingArgument { command, argument });
    }
    Ok(trimmed.to_owned())
}
