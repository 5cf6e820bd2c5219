//! Disease models.

use serde::{Deserialize, Serialize};

/// A target condition in the disease catalog.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Disease {
    /// Unique identifier within the catalog
    pub id: String,
    /// Display name
    pub name: String,
    /// Category label; open-ended, only some categories carry rules
    pub category: String,
    /// Prevalence as displayed (e.g., "1 in 10,000")
    pub prevalence: String,
    /// Informational flag carried from the source catalog; ignored by ranking
    #[serde(default)]
    pub selected: bool,
}

/// Disease categories that the ranking and assessment tables key on.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum KnownCategory {
    Neurological,
    Metabolic,
    Hematological,
}

impl KnownCategory {
    /// Parse an authored category label. Case-sensitive.
    pub fn from_label(label: &str) -> Option<Self> {
        match label {
            "Neurological" => Some(Self::Neurological),
            "Metabolic" => Some(Self::Metabolic),
            "Hematological" => Some(Self::Hematological),
            _ => None,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Neurological => "Neurological",
            Self::Metabolic => "Metabolic",
            Self::Hematological => "Hematological",
        }
    }
}

impl Disease {
    /// Create a disease with required fields.
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        category: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            category: category.into(),
            prevalence: String::new(),
            selected: false,
        }
    }

    /// The rule-bearing category, if this disease has one.
    pub fn known_category(&self) -> Option<KnownCategory> {
        KnownCategory::from_label(&self.category)
    }
}
