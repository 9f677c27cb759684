use serde::{Deserialize, Serialize};

/// Type tag for markdown text objects and context elements.
pub const TEXT_TYPE_MARKDOWN: &str = "mrkdwn";

/// Type tag for image elements.
pub const ELEMENT_TYPE_IMAGE: &str = "image";

/// Request body posted to every Slack incoming webhook.
///
/// Serializes as `{"blocks": [...]}`. Block order is preserved verbatim.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    /// Layout blocks, rendered top to bottom.
    pub blocks: Vec<Block>,
}

impl Message {
    /// Create an empty message.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a block to the end of the message.
    pub fn push(&mut self, block: Block) {
        self.blocks.push(block);
    }
}

/// A single layout block.
///
/// Discriminated on the wire by the `type` field (`context`, `divider` or
/// `section`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Block {
    /// A line of small markdown elements.
    Context {
        /// Elements shown left to right.
        elements: Vec<ContextElement>,
    },

    /// A horizontal rule.
    Divider,

    /// A markdown body with an optional image on the right.
    Section {
        /// Markdown body.
        text: SectionText,
        /// Image shown beside the body. Omitted from the wire when `None`.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        accessory: Option<Accessory>,
    },
}

impl Block {
    /// Create a context block from pre-rendered markdown strings.
    pub fn context<I, S>(texts: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::Context {
            elements: texts.into_iter().map(ContextElement::markdown).collect(),
        }
    }

    /// Create a divider block.
    pub fn divider() -> Self {
        Self::Divider
    }

    /// Create a section block with markdown text and no accessory.
    pub fn section(text: impl Into<String>) -> Self {
        Self::Section {
            text: SectionText::markdown(text),
            accessory: None,
        }
    }

    /// Create a section block with an image accessory.
    pub fn section_with_image(
        text: impl Into<String>,
        image_url: impl Into<String>,
        alt_text: impl Into<String>,
    ) -> Self {
        Self::Section {
            text: SectionText::markdown(text),
            accessory: Some(Accessory::image(image_url, alt_text)),
        }
    }

    /// The wire discriminator for this block.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Context { .. } => "context",
            Self::Divider => "divider",
            Self::Section { .. } => "section",
        }
    }
}

/// A markdown element inside a context block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContextElement {
    /// Element type; always `mrkdwn` for elements built here.
    #[serde(rename = "type")]
    pub element_type: String,
    /// Markdown text of the element.
    pub text: String,
}

impl ContextElement {
    /// Create a markdown element.
    pub fn markdown(text: impl Into<String>) -> Self {
        Self {
            element_type: TEXT_TYPE_MARKDOWN.to_owned(),
            text: text.into(),
        }
    }
}

/// Text object of a section block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SectionText {
    /// Text object type; always `mrkdwn` for text built here.
    #[serde(rename = "type")]
    pub text_type: String,
    /// Markdown body.
    pub text: String,
}

impl SectionText {
    /// Create a markdown text object.
    pub fn markdown(text: impl Into<String>) -> Self {
        Self {
            text_type: TEXT_TYPE_MARKDOWN.to_owned(),
            text: text.into(),
        }
    }
}

/// Image shown alongside a section's text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Accessory {
    /// Element type; always `image`.
    #[serde(rename = "type")]
    pub element_type: String,
    /// Publicly reachable URL of the image.
    pub image_url: String,
    /// Plain-text description of the image.
    pub alt_text: String,
}

impl Accessory {
    /// Create an image accessory.
    pub fn image(image_url: impl Into<String>, alt_text: impl Into<String>) -> Self {
        Self {
            element_type: ELEMENT_TYPE_IMAGE.to_owned(),
            image_url: image_url.into(),
            alt_text: alt_text.into(),
        }
    }
}
