use crate::error::SchemaError;
use crate::request::ResolutionRequest;
use crate::schema::{GroupBuilder, VariantSchema};

/// Visual style of a button.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ButtonVariant {
    #[default]
    Default,
    Destructive,
    Outline,
    Secondary,
    Ghost,
    Link,
}

impl ButtonVariant {
    pub const ALL: [ButtonVariant; 6] = [
        ButtonVariant::Default,
        ButtonVariant::Destructive,
        ButtonVariant::Outline,
        ButtonVariant::Secondary,
        ButtonVariant::Ghost,
        ButtonVariant::Link,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            ButtonVariant::Default => "default",
            ButtonVariant::Destructive => "destructive",
            ButtonVariant::Outline => "outline",
            ButtonVariant::Secondary => "secondary",
            ButtonVariant::Ghost => "ghost",
            ButtonVariant::Link => "link",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ButtonSize {
    #[default]
    Default,
    Sm,
    Lg,
    Icon,
}

impl ButtonSize {
    pub const ALL: [ButtonSize; 4] = [
        ButtonSize::Default,
        ButtonSize::Sm,
        ButtonSize::Lg,
        ButtonSize::Icon,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            ButtonSize::Default => "default",
            ButtonSize::Sm => "sm",
            ButtonSize::Lg => "lg",
            ButtonSize::Icon => "icon",
        }
    }
}

/// Props a button is rendered with.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ButtonProps {
    pub variant: Option<ButtonVariant>,
    pub size: Option<ButtonSize>,
    /// Extra classes appended after the variant tokens.
    pub class_name: Option<String>,
    /// Render the child element instead of a `<button>`. Does not affect classes.
    pub as_child: bool,
}

impl ButtonProps {
    pub fn to_request(&self) -> ResolutionRequest {
        ResolutionRequest::new()
            .select_opt("variant", self.variant.map(ButtonVariant::as_str))
            .select_opt("size", self.size.map(ButtonSize::as_str))
            .extras(self.class_name.as_deref())
    }
}

/// Schema for the `Button` primitive.
pub fn button_schema() -> Result<VariantSchema, SchemaError> {
    VariantSchema::builder("btn")
        .group(
            GroupBuilder::new("variant")
                .choice("default", "btn-primary")
                .choice("destructive", "btn-destructive")
                .choice("outline", "btn-outline")
                .choice("secondary", "btn-secondary")
                .choice("ghost", "btn-ghost")
                .choice("link", "text-primary underline-offset-4 hover:underline")
                .default_choice("default"),
        )
        .group(
            GroupBuilder::new("size")
                .choice("default", "h-10 px-4 py-2")
                .choice("sm", "h-9 rounded-md px-3")
                .choice("lg", "h-11 rounded-md px-8")
                .choice("icon", "h-10 w-10")
                .default_choice("default"),
        )
        .build()
}
