//! Declarative feature manifest backing `/threadsum-help`.
//!
//! The manifest lives in `features.yaml` at the repository root and is
//! embedded at compile time, so the help text can never drift from the
//! shipped binary.

use serde::Deserialize;

use crate::errors::BotError;

const MANIFEST_SOURCE: &str = include_str!("../../features.yaml");

#[derive(Debug, Clone, Deserialize)]
pub struct FeatureManifest {
    #[serde(default)]
    pub commands: Vec<CommandFeature>,
    #[serde(default)]
    pub shortcuts: Vec<ShortcutFeature>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CommandFeature {
    pub name: String,
    pub usage: Option<String>,
    pub description: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ShortcutFeature {
    pub name: String,
    pub description: String,
    #[serde(rename = "type")]
    pub kind: ShortcutKind,
}

/// Where Slack surfaces the shortcut: on a message's context menu or in the
/// global shortcuts picker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShortcutKind {
    Message,
    Global,
}

impl FeatureManifest {
    /// Parse the embedded manifest.
    ///
    /// # Errors
    ///
    /// Returns `BotError::Configuration` if the embedded YAML is invalid,
    /// which is a build defect and fatal at start-up.
    pub fn embedded() -> Result<Self, BotError> {
        Ok(serde_yaml::from_str(MANIFEST_SOURCE)?)
    }

    /// Render the manifest as Slack mrkdwn for the help command.
    #[must_use]
    pub fn render_help(&self) -> String {
        let mut out = String::from("*Commands*\n");
        for command in &self.commands {
            match &command.usage {
                Some(usage) => {
                    out.push_str(&format!(
                        "• `{} {}` — {}\n",
                        command.name, usage, command.description
                    ));
                }
                None => {
                    out.push_str(&format!("• `{}` — {}\n", command.name, command.description));
                }
            }
        }
        if !self.shortcuts.is_empty() {
            out.push_str("\n*Shortcuts*\n");
            for shortcut in &self.shortcuts {
                let surface = match shortcut.kind {
                    ShortcutKind::Message => "message menu",
                    ShortcutKind::Global => "shortcuts picker",
                };
                out.push_str(&format!(
                    "• *{}* ({}) — {}\n",
                    shortcut.name, surface, shortcut.description
                ));
            }
        }
        out
    }
}
