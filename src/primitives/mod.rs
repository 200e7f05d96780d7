//! UI primitives built on the variant resolver.
//!
//! Each primitive defines its schema once; [`UiKit`] builds all of them at
//! boot and resolves class strings per render.

pub mod badge;
pub mod button;
pub mod card;

pub use badge::{BadgeProps, BadgeVariant, badge_schema};
pub use button::{ButtonProps, ButtonSize, ButtonVariant, button_schema};
pub use card::{CardPart, card_schema};

use crate::error::SchemaError;
use crate::request::ResolutionRequest;
use crate::schema::VariantSchema;

/// Every primitive's schema, built once and shared by reference.
#[derive(Debug, Clone)]
pub struct UiKit {
    button: VariantSchema,
    badge: VariantSchema,
    cards: Vec<(CardPart, VariantSchema)>,
}

impl UiKit {
    /// Build every primitive schema.
    ///
    /// A failure here is a programming error in a schema definition and
    /// should abort startup.
    pub fn new() -> Result<Self, SchemaError> {
        let cards = CardPart::ALL
            .iter()
            .map(|&part| card_schema(part).map(|schema| (part, schema)))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(UiKit {
            button: button_schema()?,
            badge: badge_schema()?,
            cards,
        })
    }

    pub fn button_schema(&self) -> &VariantSchema {
        &self.button
    }

    pub fn badge_schema(&self) -> &VariantSchema {
        &self.badge
    }

    /// Class string for a button.
    pub fn button(&self, props: &ButtonProps) -> String {
        self.button.resolve_or_default(&props.to_request())
    }

    /// Class string for a badge.
    pub fn badge(&self, props: &BadgeProps) -> String {
        self.badge.resolve_or_default(&props.to_request())
    }

    /// Class string for one part of a card.
    pub fn card(&self, part: CardPart, class_name: Option<&str>) -> String {
        let request = match class_name {
            Some(class_name) => ResolutionRequest::new().extra(class_name),
            None => ResolutionRequest::new(),
        };
        match self.cards.iter().find(|(p, _)| *p == part) {
            Some((_, schema)) => schema.resolve_or_default(&request),
            None => part.base_token().to_string(),
        }
    }
}
