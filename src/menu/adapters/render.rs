//! Embed renderer producing the bot's jisho.org result cards.

use crate::dictionary::domain::DictionaryEntry;
use crate::menu::{
    domain::{DisplayPayload, Paging, PayloadField, SELECT_EMOJIS},
    ports::{MenuRenderer, RenderError, RenderResult},
};
use minijinja::{Environment, context};
use percent_encoding::{NON_ALPHANUMERIC, utf8_percent_encode};
use serde::Serialize;

/// Accent colour of jisho.org result cards.
pub const EMBED_COLOR_JISHO: u32 = 0x003e_dd00;
/// Accent colour of bot notices.
pub const EMBED_COLOR_BOT: u32 = 0x0058_65f2;
/// Accent colour of error notices.
pub const EMBED_COLOR_ERROR: u32 = 0x00ff_0000;
/// Maximum length of a single embed field value, in characters.
pub const EMBED_FIELD_MAX_LENGTH: usize = 1024;

const JISHO_THUMBNAIL: &str = "https://assets.jisho.org/assets/touch-icon-017b99ca4bfd11363a97f66cc4c00b1667613a05e38d08d858aa5e2a35dce055.png";
const JISHO_SEARCH_URL: &str = "https://jisho.org/search/";
const JISHO_WORD_URL: &str = "https://jisho.org/word/";
const WANIKANI_SEARCH_URL: &str = "https://www.wanikani.com/search?query=";

const SEARCH_TITLE: &str = "jisho.org search results for {{ query }}";
const SEARCH_DESCRIPTION: &str = "*Showing results {{ start }} to {{ end }} (out of {{ total }})*";
const SEARCH_EMPTY: &str = "*Sorry, no results were found*";
const SEARCH_FOOTER: &str = "Use the reacts for more actions\nPowered by jisho.org's beta API";

const DETAIL_TITLE: &str = "jisho.org entry for {{ slug }}";
const DETAIL_DESCRIPTION: &str = "*Result {{ number }} of {{ total }} for {{ query }}*";
const DETAIL_FOOTER: &str =
    "jisho.org entry data from {{ sources | join(', ') }}\nPowered by jisho.org's beta API";
const DETAIL_SENSE: &str = "{{ number }}. {% if parts %}*{{ parts | join(', ') }}* {% endif %}{{ definitions | join('; ') }}{% if tags %} ({{ tags | join(', ') }}){% endif %}";

const FIELD_WORD: &str = "__Word__";
const FIELD_TAGS: &str = "__Tags__";
const FIELD_DEFINITIONS: &str = "__Definition(s)__";
const FIELD_DEFINITIONS_TRUNCATED: &str = "__Defintions(s) *(some results have been truncated)*__";
const FIELD_OTHER_FORMS: &str = "__Other forms__";
const FIELD_NONE: &str = "*None*";

const ERROR_TITLE: &str = "An error has occurred";
const ERROR_FOOTER: &str = "Please report any unexpected errors";

#[derive(Serialize)]
struct SenseRow<'a> {
    number: usize,
    parts: &'a [String],
    definitions: &'a [String],
    tags: &'a [String],
}

/// Renders search pages and entry details as Discord-style embeds.
///
/// Templates are rendered with `minijinja`; the page size must match the
/// one the interaction controller pages with.
#[derive(Debug, Clone, Copy)]
pub struct EmbedRenderer {
    paging: Paging,
}

impl EmbedRenderer {
    /// Creates a renderer showing `paging.page_size()` results per page.
    #[must_use]
    pub const fn new(paging: Paging) -> Self {
        Self { paging }
    }
}

fn render(template: &str, ctx: minijinja::Value) -> RenderResult<String> {
    Environment::new()
        .render_str(template, ctx)
        .map_err(RenderError::template)
}

fn encode(text: &str) -> String {
    utf8_percent_encode(text, NON_ALPHANUMERIC).to_string()
}

fn tags_field(entry: &DictionaryEntry) -> String {
    let mut tags = Vec::new();
    if entry.is_common == Some(true) {
        tags.push("Common word".to_owned());
    }
    if let Some(level) = entry.jlpt_level() {
        tags.push(format!("JLPT N{level}"));
    }
    if let Some(level) = entry.wanikani_level() {
        tags.push(format!(
            "[WaniKani level {level}]({WANIKANI_SEARCH_URL}{})",
            encode(&entry.slug)
        ));
    }
    if tags.is_empty() {
        FIELD_NONE.to_owned()
    } else {
        tags.join("\n")
    }
}

/// Joins sense lines until the field limit is reached. Returns the value and
/// whether any lines were dropped or cut.
fn fit_lines(lines: &[String]) -> (String, bool) {
    let mut value = String::new();
    let mut used = 0;
    for (position, line) in lines.iter().enumerate() {
        let separator = usize::from(position > 0);
        let length = line.chars().count();
        if used + separator + length > EMBED_FIELD_MAX_LENGTH {
            if value.is_empty() {
                let cut: String = line.chars().take(EMBED_FIELD_MAX_LENGTH - 3).collect();
                return (format!("{cut}..."), true);
            }
            return (value, true);
        }
        if separator == 1 {
            value.push('\n');
        }
        value.push_str(line);
        used += separator + length;
    }
    (value, false)
}

fn definitions_field(entry: &DictionaryEntry) -> RenderResult<PayloadField> {
    let lines = entry
        .senses
        .iter()
        .enumerate()
        .map(|(position, sense)| {
            let row = SenseRow {
                number: position + 1,
                parts: &sense.parts_of_speech,
                definitions: &sense.english_definitions,
                tags: &sense.tags,
            };
            render(DETAIL_SENSE, minijinja::Value::from_serialize(&row))
        })
        .collect::<RenderResult<Vec<_>>>()?;

    if lines.is_empty() {
        return Ok(PayloadField::new(FIELD_DEFINITIONS, FIELD_NONE));
    }
    let (value, truncated) = fit_lines(&lines);
    let name = if truncated {
        FIELD_DEFINITIONS_TRUNCATED
    } else {
        FIELD_DEFINITIONS
    };
    Ok(PayloadField::new(name, value))
}

impl MenuRenderer for EmbedRenderer {
    fn render_search(
        &self,
        query: &str,
        results: &[DictionaryEntry],
        offset: usize,
    ) -> RenderResult<DisplayPayload> {
        let payload = DisplayPayload::new(render(SEARCH_TITLE, context! { query })?, EMBED_COLOR_JISHO)
            .with_url(format!("{JISHO_SEARCH_URL}{}", encode(query)))
            .with_footer(SEARCH_FOOTER)
            .with_thumbnail(JISHO_THUMBNAIL);

        if results.is_empty() {
            return Ok(payload.with_description(SEARCH_EMPTY));
        }
        if offset >= results.len() {
            return Err(RenderError::IndexOutOfRange {
                index: offset,
                len: results.len(),
            });
        }

        let visible = self.paging.visible(offset, results.len());
        let description = render(
            SEARCH_DESCRIPTION,
            context! { start => offset + 1, end => offset + visible, total => results.len() },
        )?;
        let shown = results.iter().skip(offset).take(visible);
        Ok(SELECT_EMOJIS
            .iter()
            .zip(shown)
            .fold(payload.with_description(description), |page, (emoji, entry)| {
                page.with_field(PayloadField::new(*emoji, entry.headword()))
            }))
    }

    fn render_detail(
        &self,
        query: &str,
        results: &[DictionaryEntry],
        index: usize,
    ) -> RenderResult<DisplayPayload> {
        let entry = results.get(index).ok_or(RenderError::IndexOutOfRange {
            index,
            len: results.len(),
        })?;

        let title = render(DETAIL_TITLE, context! { slug => &entry.slug })?;
        let description = render(
            DETAIL_DESCRIPTION,
            context! { number => index + 1, total => results.len(), query },
        )?;
        let footer = render(DETAIL_FOOTER, context! { sources => entry.attribution.sources() })?;

        let mut payload = DisplayPayload::new(title, EMBED_COLOR_JISHO)
            .with_url(format!("{JISHO_WORD_URL}{}", encode(&entry.slug)))
            .with_description(description)
            .with_field(PayloadField::inline(FIELD_WORD, entry.headword()))
            .with_field(PayloadField::inline(FIELD_TAGS, tags_field(entry)))
            .with_field(definitions_field(entry)?)
            .with_footer(footer)
            .with_thumbnail(JISHO_THUMBNAIL);

        let other_forms: Vec<String> = entry
            .other_forms()
            .iter()
            .map(|form| form.readable())
            .filter(|readable| !readable.is_empty())
            .collect();
        if !other_forms.is_empty() {
            payload = payload.with_field(PayloadField::new(FIELD_OTHER_FORMS, other_forms.join("、")));
        }
        Ok(payload)
    }

    fn render_error(&self, message: &str) -> DisplayPayload {
        DisplayPayload::new(ERROR_TITLE, EMBED_COLOR_ERROR)
            .with_description(message)
            .with_footer(ERROR_FOOTER)
    }

    fn render_notice(&self, title: &str, message: &str) -> DisplayPayload {
        DisplayPayload::new(title, EMBED_COLOR_BOT).with_description(message)
    }
}
