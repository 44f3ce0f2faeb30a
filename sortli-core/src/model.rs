//! Domain data structures for classification requests and results.

use std::fmt;

use serde::{Deserialize, Serialize};

/// The four waste buckets a classification can land in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WasteCategory {
    /// Organic, biodegradable waste.
    Wet,
    /// Recyclable materials such as paper, plastic, glass, and metal.
    Dry,
    /// Electronic waste.
    #[serde(rename = "ewaste")]
    EWaste,
    /// Dangerous materials that need special handling.
    Hazardous,
}

impl WasteCategory {
    /// All categories in display order.
    pub const ALL: [Self; 4] = [Self::Wet, Self::Dry, Self::EWaste, Self::Hazardous];

    /// Category used whenever a model reply cannot be mapped onto the taxonomy.
    pub const DEFAULT: Self = Self::Dry;

    /// Wire slug, e.g. `"ewaste"`.
    #[must_use]
    pub const fn slug(self) -> &'static str {
        match self {
            Self::Wet => "wet",
            Self::Dry => "dry",
            Self::EWaste => "ewaste",
            Self::Hazardous => "hazardous",
        }
    }

    /// Match a free-form label against the known slugs.
    ///
    /// Matching ignores case and surrounding whitespace. Returns `None` for
    /// anything outside the four categories.
    #[must_use]
    pub fn from_label(raw: &str) -> Option<Self> {
        let label = raw.trim();
        Self::ALL
            .into_iter()
            .find(|category| category.slug().eq_ignore_ascii_case(label))
    }
}

impl fmt::Display for WasteCategory {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.slug())
    }
}

/// Body of a classification call as sent by clients.
///
/// Both fields are optional on the wire; at least one has to carry content.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassificationRequest {
    /// Free-text depiction of the waste item.
    ///
    /// A whitespace-only description counts as missing and is rejected.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Data URL of a photo of the waste item.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_base64: Option<String>,
}

impl ClassificationRequest {
    /// Request carrying only a description.
    #[must_use]
    pub fn from_description<S: Into<String>>(description: S) -> Self {
        Self {
            description: Some(description.into()),
            image_base64: None,
        }
    }

    /// Request carrying only an image.
    #[must_use]
    pub fn from_image<S: Into<String>>(image_base64: S) -> Self {
        Self {
            description: None,
            image_base64: Some(image_base64.into()),
        }
    }

    /// Resolve the request into the input that will be sent upstream.
    ///
    /// Blank fields count as absent. When both are given the image wins.
    #[must_use]
    pub fn input(&self) -> Option<ClassificationInput> {
        let non_blank = |field: Option<&str>| {
            field
                .map(str::trim)
                .filter(|value| !value.is_empty())
                .map(str::to_owned)
        };

        non_blank(self.image_base64.as_deref())
            .map(ClassificationInput::Image)
            .or_else(|| non_blank(self.description.as_deref()).map(ClassificationInput::Description))
    }
}

/// Validated input for a single classification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClassificationInput {
    /// Data URL of an image.
    Image(String),
    /// Free-text description.
    Description(String),
}

impl ClassificationInput {
    /// Whether the input needs a multimodal model.
    #[must_use]
    pub const fn is_image(&self) -> bool {
        matches!(self, Self::Image(_))
    }
}

/// Normalized classification returned to clients.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassificationResult {
    /// Category the item was placed in.
    #[serde(rename = "type")]
    pub category: WasteCategory,
    /// Human-friendly category name.
    pub label: String,
    /// Self-reported model certainty, 0 to 100.
    pub confidence: u8,
    /// Short explanation from the model.
    pub reasoning: String,
    /// Disposal tips for the category.
    pub suggestions: Vec<String>,
}
