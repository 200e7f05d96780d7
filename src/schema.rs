//! Variant schemas: the closed set of style options a UI primitive accepts.
//!
//! A schema is built once with [`SchemaBuilder`] and validated at `build()`,
//! so an unknown option can only ever show up as an
//! [`InvalidSelectionError`](crate::InvalidSelectionError) at resolve time.

use std::collections::HashSet;

use crate::error::SchemaError;

/// A named axis of mutually exclusive choices, each mapped to a token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VariantGroup {
    name: String,
    choices: Vec<(String, String)>,
    default_choice: String,
}

impl VariantGroup {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn default_choice(&self) -> &str {
        &self.default_choice
    }

    /// Token for `choice`, or `None` if the group has no such choice.
    pub fn token(&self, choice: &str) -> Option<&str> {
        self.choices
            .iter()
            .find(|(name, _)| name == choice)
            .map(|(_, token)| token.as_str())
    }

    /// Token of the default choice.
    pub fn default_token(&self) -> &str {
        // Validated at build time: the default is always a known choice.
        self.token(&self.default_choice).unwrap_or_default()
    }

    /// Choice names in declaration order.
    pub fn choices(&self) -> impl Iterator<Item = &str> {
        self.choices.iter().map(|(name, _)| name.as_str())
    }
}

/// Always-applied base token plus an ordered list of variant groups.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VariantSchema {
    base: String,
    groups: Vec<VariantGroup>,
}

impl VariantSchema {
    /// Start building a schema with the given base token.
    pub fn builder(base: impl Into<String>) -> SchemaBuilder {
        SchemaBuilder {
            base: base.into(),
            groups: Vec::new(),
        }
    }

    pub fn base(&self) -> &str {
        &self.base
    }

    /// Groups in declaration order.
    pub fn groups(&self) -> &[VariantGroup] {
        &self.groups
    }

    pub fn group(&self, name: &str) -> Option<&VariantGroup> {
        self.groups.iter().find(|g| g.name == name)
    }
}

/// Builder for a single variant group.
#[derive(Debug, Clone)]
pub struct GroupBuilder {
    name: String,
    choices: Vec<(String, String)>,
    default_choice: Option<String>,
}

impl GroupBuilder {
    pub fn new(name: impl Into<String>) -> Self {
        GroupBuilder {
            name: name.into(),
            choices: Vec::new(),
            default_choice: None,
        }
    }

    /// Add a choice and the token it maps to.
    pub fn choice(mut self, name: impl Into<String>, token: impl Into<String>) -> Self {
        self.choices.push((name.into(), token.into()));
        self
    }

    pub fn default_choice(mut self, name: impl Into<String>) -> Self {
        self.default_choice = Some(name.into());
        self
    }

    fn build(self) -> Result<VariantGroup, SchemaError> {
        if self.choices.is_empty() {
            return Err(SchemaError::EmptyGroup { group: self.name });
        }

        let mut seen = HashSet::new();
        for (choice, _) in &self.choices {
            if !seen.insert(choice.as_str()) {
                return Err(SchemaError::DuplicateChoice {
                    group: self.name.clone(),
                    choice: choice.clone(),
                });
            }
        }

        let Some(default_choice) = self.default_choice else {
            return Err(SchemaError::MissingDefault { group: self.name });
        };
        if !seen.contains(default_choice.as_str()) {
            return Err(SchemaError::UnknownDefault {
                group: self.name,
                choice: default_choice,
            });
        }

        Ok(VariantGroup {
            name: self.name,
            choices: self.choices,
            default_choice,
        })
    }
}

/// Builder for [`VariantSchema`].
///
/// # Example
///
/// ```
/// use ui_swr_kit::{GroupBuilder, VariantSchema};
///
/// let schema = VariantSchema::builder("btn")
///     .group(
///         GroupBuilder::new("variant")
///             .choice("default", "btn-primary")
///             .choice("outline", "btn-outline")
///             .default_choice("default"),
///     )
///     .build()
///     .unwrap();
///
/// assert_eq!(schema.groups().len(), 1);
/// ```
#[derive(Debug, Clone)]
pub struct SchemaBuilder {
    base: String,
    groups: Vec<GroupBuilder>,
}

impl SchemaBuilder {
    /// Append a group. Groups resolve in the order they are added.
    pub fn group(mut self, group: GroupBuilder) -> Self {
        self.groups.push(group);
        self
    }

    /// Validate every group and build the schema.
    pub fn build(self) -> Result<VariantSchema, SchemaError> {
        let mut names = HashSet::new();
        let mut groups = Vec::with_capacity(self.groups.len());

        for group in self.groups {
            if !names.insert(group.name.clone()) {
                return Err(SchemaError::DuplicateGroup { group: group.name });
            }
            groups.push(group.build()?);
        }

        Ok(VariantSchema {
            base: self.base,
            groups,
        })
    }
}
