use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::types::{Block, Message};

/// Alt text attached to the icon shown beside the description.
pub const ICON_ALT_TEXT: &str = "Identifier for the Slack message";

/// Header rendered above the action links.
pub const NEXT_STEPS_HEADER: &str = "*Next Steps:*";

/// Separator between action links.
const LINK_SEPARATOR: &str = "\t";

/// The fields a caller supplies to post a message.
///
/// Optional fields treat an empty string the same as `None`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostMessageParams {
    /// Labels identifying what the message is about, e.g. environment or
    /// project. Rendered as `*label* = value`, sorted by label.
    #[serde(default)]
    pub context: BTreeMap<String, String>,

    /// Main body of the message. Required.
    pub description: String,

    /// Link to a dashboard for reviewing the issue.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dashboard: Option<String>,

    /// Link to documentation for triaging the issue.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub documentation: Option<String>,

    /// Image shown beside the description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
}

impl PostMessageParams {
    /// Create parameters with the given description and nothing else.
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
            ..Self::default()
        }
    }

    /// Add a context label.
    #[must_use]
    pub fn with_context(mut self, label: impl Into<String>, value: impl Into<String>) -> Self {
        self.context.insert(label.into(), value.into());
        self
    }

    /// Set the dashboard link offered under "Next Steps".
    #[must_use]
    pub fn with_dashboard(mut self, url: impl Into<String>) -> Self {
        self.dashboard = Some(url.into());
        self
    }

    /// Set the documentation link offered under "Next Steps".
    #[must_use]
    pub fn with_documentation(mut self, url: impl Into<String>) -> Self {
        self.documentation = Some(url.into());
        self
    }

    /// Set the image shown beside the description.
    #[must_use]
    pub fn with_icon(mut self, url: impl Into<String>) -> Self {
        self.icon = Some(url.into());
        self
    }

    /// Check every rule and report all violations together.
    pub fn validate(&self) -> Result<(), ValidationError> {
        let mut errors = ValidationError::new();

        if self.description.is_empty() {
            errors.push("description is required");
        }

        errors.into_result()
    }

    /// Validate and lay out the message blocks.
    ///
    /// Layout, top to bottom: context line and divider (only when context is
    /// set), the description section, then a divider, a "Next Steps" header
    /// and the action links (only when at least one link is set).
    pub fn build(&self) -> Result<Message, ValidationError> {
        self.validate()?;

        let mut message = Message::new();

        if !self.context.is_empty() {
            message.push(Block::context(
                self.context
                    .iter()
                    .map(|(label, value)| format!("*{label}* = {value}")),
            ));
            message.push(Block::divider());
        }

        message.push(match non_empty(self.icon.as_deref()) {
            Some(icon) => Block::section_with_image(&self.description, icon, ICON_ALT_TEXT),
            None => Block::section(&self.description),
        });

        let links = self.action_links();
        if !links.is_empty() {
            message.push(Block::divider());
            message.push(Block::section(NEXT_STEPS_HEADER));
            message.push(Block::section(links.join(LINK_SEPARATOR)));
        }

        Ok(message)
    }

    fn action_links(&self) -> Vec<String> {
        let mut links = Vec::with_capacity(2);

        if let Some(url) = non_empty(self.dashboard.as_deref()) {
            links.push(format!("<{url}|:skpr_dashboard: Review with Dashboard>"));
        }

        if let Some(url) = non_empty(self.documentation.as_deref()) {
            links.push(format!(
                "<{url}|:skpr_documentation: Triage using Documentation>"
            ));
        }

        links
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Accessory, SectionText};

    fn section_text(block: &Block) -> &str {
        match block {
            Block::Section { text, .. } => &text.text,
            other => panic!("expected section, got {}", other.kind()),
        }
    }

    #[test]
    fn empty_description_fails_validation() {
        let err = PostMessageParams::default().build().unwrap_err();
        assert_eq!(err.errors(), ["description is required"]);
    }

    #[test]
    fn empty_description_fails_even_with_other_fields() {
        let params = PostMessageParams::default()
            .with_context("Env", "prod")
            .with_dashboard("https://dash.example.com")
            .with_icon("https://example.com/icon.png");
        assert!(params.build().is_err());
    }

    #[test]
    fn description_only_yields_single_section() {
        let message = PostMessageParams::new("CPU high").build().unwrap();
        assert_eq!(message.blocks, vec![Block::section("CPU high")]);
    }

    #[test]
    fn context_emits_context_then_divider() {
        let message = PostMessageParams::new("CPU high")
            .with_context("Env", "prod")
            .build()
            .unwrap();

        assert_eq!(
            message.blocks,
            vec![
                Block::context(["*Env* = prod"]),
                Block::divider(),
                Block::section("CPU high"),
            ]
        );
    }

    #[test]
    fn context_elements_are_sorted_by_label() {
        let message = PostMessageParams::new("d")
            .with_context("Project", "web")
            .with_context("Environment", "prod")
            .with_context("Cluster", "c1")
            .build()
            .unwrap();

        let Block::Context { elements } = &message.blocks[0] else {
            panic!("expected context block first");
        };
        let texts: Vec<&str> = elements.iter().map(|e| e.text.as_str()).collect();
        assert_eq!(
            texts,
            ["*Cluster* = c1", "*Environment* = prod", "*Project* = web"]
        );
        assert!(elements.iter().all(|e| e.element_type == "mrkdwn"));
    }

    #[test]
    fn icon_becomes_accessory() {
        let message = PostMessageParams::new("d")
            .with_icon("https://example.com/drupal.png")
            .build()
            .unwrap();

        let Block::Section { text, accessory } = &message.blocks[0] else {
            panic!("expected section block");
        };
        assert_eq!(text, &SectionText::markdown("d"));
        assert_eq!(
            accessory.as_ref(),
            Some(&Accessory::image(
                "https://example.com/drupal.png",
                ICON_ALT_TEXT
            ))
        );
    }

    #[test]
    fn empty_icon_is_omitted() {
        let message = PostMessageParams::new("d").with_icon("").build().unwrap();
        assert_eq!(message.blocks, vec![Block::section("d")]);
    }

    #[test]
    fn no_links_means_no_next_steps() {
        let message = PostMessageParams::new("d")
            .with_dashboard("")
            .with_documentation("")
            .build()
            .unwrap();
        assert_eq!(message.blocks.len(), 1);
    }

    #[test]
    fn dashboard_only_link() {
        let message = PostMessageParams::new("d")
            .with_dashboard("https://dash.example.com")
            .build()
            .unwrap();

        assert_eq!(message.blocks.len(), 4);
        assert_eq!(message.blocks[1], Block::divider());
        assert_eq!(section_text(&message.blocks[2]), NEXT_STEPS_HEADER);
        assert_eq!(
            section_text(&message.blocks[3]),
            "<https://dash.example.com|:skpr_dashboard: Review with Dashboard>"
        );
    }

    #[test]
    fn documentation_only_link() {
        let message = PostMessageParams::new("d")
            .with_documentation("https://docs.example.com")
            .build()
            .unwrap();

        let links = section_text(message.blocks.last().unwrap());
        assert_eq!(
            links,
            "<https://docs.example.com|:skpr_documentation: Triage using Documentation>"
        );
        assert!(!links.contains("skpr_dashboard"));
    }

    #[test]
    fn both_links_are_tab_joined() {
        let message = PostMessageParams::new("d")
            .with_dashboard("https://dash.example.com")
            .with_documentation("https://docs.example.com")
            .build()
            .unwrap();

        let links = section_text(message.blocks.last().unwrap());
        let parts: Vec<&str> = links.split('\t').collect();
        assert_eq!(parts.len(), 2);
        assert!(parts[0].starts_with("<https://dash.example.com|"));
        assert!(parts[1].starts_with("<https://docs.example.com|"));
    }

    #[test]
    fn full_layout_order() {
        let message = PostMessageParams::new("Anomaly detected")
            .with_context("Account", "123456789")
            .with_icon("https://example.com/icon.png")
            .with_dashboard("https://dash.example.com")
            .build()
            .unwrap();

        let kinds: Vec<&str> = message.blocks.iter().map(Block::kind).collect();
        assert_eq!(
            kinds,
            ["context", "divider", "section", "divider", "section", "section"]
        );
    }

    #[test]
    fn params_deserialize_with_defaults() {
        let params: PostMessageParams =
            serde_json::from_str(r#"{"description":"hello"}"#).unwrap();
        assert_eq!(params, PostMessageParams::new("hello"));
    }
}
