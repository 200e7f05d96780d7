use std::collections::BTreeMap;

/// Per-render input to the resolver: explicit choices plus raw extra tokens.
///
/// Groups without a selection fall back to their default choice.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResolutionRequest {
    selections: BTreeMap<String, String>,
    extra_tokens: Vec<String>,
}

impl ResolutionRequest {
    pub fn new() -> Self {
        Self::default()
    }

    /// Select `choice` for `group`. A later selection for the same group wins.
    pub fn select(mut self, group: impl Into<String>, choice: impl Into<String>) -> Self {
        self.selections.insert(group.into(), choice.into());
        self
    }

    /// Select `choice` for `group` if present, otherwise leave the group unset.
    pub fn select_opt<C: Into<String>>(self, group: impl Into<String>, choice: Option<C>) -> Self {
        match choice {
            Some(choice) => self.select(group, choice),
            None => self,
        }
    }

    /// Append a raw token after the resolved variant tokens.
    pub fn extra(mut self, token: impl Into<String>) -> Self {
        self.extra_tokens.push(token.into());
        self
    }

    /// Append several raw tokens, keeping their order.
    pub fn extras<I, T>(mut self, tokens: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        self.extra_tokens.extend(tokens.into_iter().map(Into::into));
        self
    }

    pub fn selection(&self, group: &str) -> Option<&str> {
        self.selections.get(group).map(String::as_str)
    }

    pub fn selections(&self) -> impl Iterator<Item = (&str, &str)> {
        self.selections
            .iter()
            .map(|(group, choice)| (group.as_str(), choice.as_str()))
    }

    pub fn extra_tokens(&self) -> &[String] {
        &self.extra_tokens
    }
}
