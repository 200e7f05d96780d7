use crate::error::SchemaError;
use crate::request::ResolutionRequest;
use crate::schema::{GroupBuilder, VariantSchema};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BadgeVariant {
    #[default]
    Default,
    Secondary,
    Outline,
    Destructive,
}

impl BadgeVariant {
    pub fn as_str(self) -> &'static str {
        match self {
            BadgeVariant::Default => "default",
            BadgeVariant::Secondary => "secondary",
            BadgeVariant::Outline => "outline",
            BadgeVariant::Destructive => "destructive",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BadgeProps {
    pub variant: Option<BadgeVariant>,
    pub class_name: Option<String>,
}

impl BadgeProps {
    pub fn to_request(&self) -> ResolutionRequest {
        ResolutionRequest::new()
            .select_opt("variant", self.variant.map(BadgeVariant::as_str))
            .extras(self.class_name.as_deref())
    }
}

/// Schema for the `Badge` primitive.
pub fn badge_schema() -> Result<VariantSchema, SchemaError> {
    VariantSchema::builder("badge")
        .group(
            GroupBuilder::new("variant")
                .choice("default", "badge-default")
                .choice("secondary", "badge-secondary")
                .choice("outline", "badge-outline")
                .choice(
                    "destructive",
                    "border-transparent bg-destructive text-destructive-foreground hover:bg-destructive/80",
                )
                .default_choice("default"),
        )
        .build()
}
