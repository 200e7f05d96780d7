//! Turns a schema plus a per-render request into a class string.
//!
//! Output order is fixed: base token, then one token per group in schema
//! order, then the request's extra tokens. Nothing is deduplicated, so a
//! later token can override an earlier rule by source order.

use crate::error::InvalidSelectionError;
use crate::request::ResolutionRequest;
use crate::schema::VariantSchema;

/// Join tokens with single spaces.
///
/// Each token is trimmed first; empty or whitespace-only tokens are skipped.
pub fn join_tokens<'a, I>(tokens: I) -> String
where
    I: IntoIterator<Item = &'a str>,
{
    let mut out = String::new();
    for token in tokens {
        let token = token.trim();
        if token.is_empty() {
            continue;
        }
        if !out.is_empty() {
            out.push(' ');
        }
        out.push_str(token);
    }
    out
}

/// Resolve `request` against `schema`.
///
/// Fails if the request selects a group the schema does not declare, or a
/// choice the group does not offer.
pub fn resolve(
    schema: &VariantSchema,
    request: &ResolutionRequest,
) -> Result<String, InvalidSelectionError> {
    for (group, _) in request.selections() {
        if schema.group(group).is_none() {
            return Err(InvalidSelectionError::UnknownGroup {
                group: group.to_string(),
            });
        }
    }

    let mut group_tokens = Vec::with_capacity(schema.groups().len());
    for group in schema.groups() {
        let token = match request.selection(group.name()) {
            Some(choice) => {
                group
                    .token(choice)
                    .ok_or_else(|| InvalidSelectionError::UnknownChoice {
                        group: group.name().to_string(),
                        choice: choice.to_string(),
                    })?
            }
            None => group.default_token(),
        };
        group_tokens.push(token);
    }

    Ok(join_tokens(
        std::iter::once(schema.base())
            .chain(group_tokens)
            .chain(request.extra_tokens().iter().map(String::as_str)),
    ))
}

/// Resolve `request`, degrading to the schema defaults on a bad selection.
///
/// The request's extra tokens are still applied. Never fails, so it is safe
/// to call from a render path.
pub fn resolve_or_default(schema: &VariantSchema, request: &ResolutionRequest) -> String {
    match resolve(schema, request) {
        Ok(classes) => classes,
        Err(e) => {
            tracing::warn!(
                "Falling back to default variants: base={}, group={}, error={}",
                schema.base(),
                e.group(),
                e
            );
            schema.default_classes(request.extra_tokens())
        }
    }
}

impl VariantSchema {
    /// See [`resolve`].
    pub fn resolve(&self, request: &ResolutionRequest) -> Result<String, InvalidSelectionError> {
        resolve(self, request)
    }

    /// See [`resolve_or_default`].
    pub fn resolve_or_default(&self, request: &ResolutionRequest) -> String {
        resolve_or_default(self, request)
    }

    /// Base token, every group's default token, then `extra_tokens`.
    pub fn default_classes(&self, extra_tokens: &[String]) -> String {
        join_tokens(
            std::iter::once(self.base())
                .chain(self.groups().iter().map(|g| g.default_token()))
                .chain(extra_tokens.iter().map(String::as_str)),
        )
    }
}
