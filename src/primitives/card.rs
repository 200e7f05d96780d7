use crate::error::SchemaError;
use crate::schema::VariantSchema;

/// The parts of the card family. None of them have variant groups.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CardPart {
    Card,
    Header,
    Title,
    Description,
    Content,
    Footer,
}

impl CardPart {
    pub const ALL: [CardPart; 6] = [
        CardPart::Card,
        CardPart::Header,
        CardPart::Title,
        CardPart::Description,
        CardPart::Content,
        CardPart::Footer,
    ];

    pub fn base_token(self) -> &'static str {
        match self {
            CardPart::Card => "card",
            CardPart::Header => "card-header",
            CardPart::Title => "card-title",
            CardPart::Description => "card-description",
            CardPart::Content => "card-content",
            CardPart::Footer => "card-footer",
        }
    }
}

/// Base-only schema for one card part.
pub fn card_schema(part: CardPart) -> Result<VariantSchema, SchemaError> {
    VariantSchema::builder(part.base_token()).build()
}
