//! Display payloads sent as menu message bodies.

use serde::Serialize;

/// Named block of text inside a payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PayloadField {
    /// Field heading.
    pub name: String,
    /// Field body.
    pub value: String,
    /// Whether the field may share a row with its neighbours.
    pub inline: bool,
}

impl PayloadField {
    /// Creates a full-width field.
    #[must_use]
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
            inline: false,
        }
    }

    /// Creates a field that may share a row.
    #[must_use]
    pub fn inline(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            inline: true,
            ..Self::new(name, value)
        }
    }
}

/// Rendered message content: a title, an optional body, and fields.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DisplayPayload {
    /// Heading line.
    pub title: String,
    /// Body text under the title.
    pub description: Option<String>,
    /// Link attached to the title.
    pub url: Option<String>,
    /// Accent colour as `0xRRGGBB`.
    pub color: u32,
    /// Ordered fields.
    pub fields: Vec<PayloadField>,
    /// Small print under the fields.
    pub footer: Option<String>,
    /// Thumbnail image URL.
    pub thumbnail: Option<String>,
}

impl DisplayPayload {
    /// Creates a payload with a title and accent colour.
    #[must_use]
    pub fn new(title: impl Into<String>, color: u32) -> Self {
        Self {
            title: title.into(),
            color,
            ..Self::default()
        }
    }

    /// Sets the body text.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Sets the title link.
    #[must_use]
    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }

    /// Appends a field.
    #[must_use]
    pub fn with_field(mut self, field: PayloadField) -> Self {
        self.fields.push(field);
        self
    }

    /// Sets the footer.
    #[must_use]
    pub fn with_footer(mut self, footer: impl Into<String>) -> Self {
        self.footer = Some(footer.into());
        self
    }

    /// Sets the thumbnail.
    #[must_use]
    pub fn with_thumbnail(mut self, thumbnail: impl Into<String>) -> Self {
        self.thumbnail = Some(thumbnail.into());
        self
    }
}
