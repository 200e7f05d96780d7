//! Light/dark theme selection applied as a class on the document root.

use serde::{Deserialize, Serialize};

/// What the user asked for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemePreference {
    Light,
    Dark,
    #[default]
    System,
}

/// What is actually rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorScheme {
    Light,
    Dark,
}

impl ColorScheme {
    /// Token applied to the root element.
    pub fn class_token(self) -> &'static str {
        match self {
            ColorScheme::Light => "light",
            ColorScheme::Dark => "dark",
        }
    }
}

/// How the theme toggle is wired into the page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ThemeConfig {
    /// Root attribute the scheme is written to.
    pub attribute: String,
    pub default_preference: ThemePreference,
    /// Follow the operating system when the preference is `System`.
    pub enable_system: bool,
    /// Suppress CSS transitions while the scheme switches.
    pub disable_transition_on_change: bool,
}

impl Default for ThemeConfig {
    fn default() -> Self {
        ThemeConfig {
            attribute: "class".to_string(),
            default_preference: ThemePreference::System,
            enable_system: true,
            disable_transition_on_change: true,
        }
    }
}

impl ThemeConfig {
    /// Scheme to render for `preference` (or the default when `None`).
    ///
    /// `System` follows `system_prefers_dark` only when system detection is
    /// enabled, and is light otherwise.
    pub fn scheme(
        &self,
        preference: Option<ThemePreference>,
        system_prefers_dark: bool,
    ) -> ColorScheme {
        match preference.unwrap_or(self.default_preference) {
            ThemePreference::Light => ColorScheme::Light,
            ThemePreference::Dark => ColorScheme::Dark,
            ThemePreference::System if self.enable_system && system_prefers_dark => {
                ColorScheme::Dark
            }
            ThemePreference::System => ColorScheme::Light,
        }
    }

    /// Root class token for `preference`.
    pub fn root_class(
        &self,
        preference: Option<ThemePreference>,
        system_prefers_dark: bool,
    ) -> &'static str {
        self.scheme(preference, system_prefers_dark).class_token()
    }
}
