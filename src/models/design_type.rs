//! Design style tags and the other small domain enums.
//!
//! `DesignType` has exactly one canonical tag per variant. Older clients and
//! stored data used a second naming scheme; those aliases are accepted on input
//! through [`DesignType::parse`] and never emitted.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// One of the four fixed aesthetic categories applied to a photo.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case", try_from = "String")]
pub enum DesignType {
    ModernPremium,
    TrustHeritage,
    EcoSmart,
    Festive,
}

/// Legacy tag -> canonical variant.
const LEGACY_ALIASES: &[(&str, DesignType)] = &[
    ("modern", DesignType::ModernPremium),
    ("classical", DesignType::TrustHeritage),
    ("industrial", DesignType::EcoSmart),
    ("eco_friendly", DesignType::Festive),
];

impl DesignType {
    /// Every style, in presentation order.
    pub const ALL: [DesignType; 4] = [
        DesignType::ModernPremium,
        DesignType::TrustHeritage,
        DesignType::EcoSmart,
        DesignType::Festive,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ModernPremium => "modern_premium",
            Self::TrustHeritage => "trust_heritage",
            Self::EcoSmart => "eco_smart",
            Self::Festive => "festive",
        }
    }

    /// Human-readable name used in prompts and share text.
    pub fn label(&self) -> &'static str {
        match self {
            Self::ModernPremium => "Modern Premium",
            Self::TrustHeritage => "Trust & Heritage",
            Self::EcoSmart => "Eco Smart",
            Self::Festive => "Festive",
        }
    }

    /// Every tag a stored row of this style may carry (canonical first).
    pub fn stored_tags(&self) -> Vec<&'static str> {
        let mut tags = vec![self.as_str()];
        tags.extend(
            LEGACY_ALIASES
                .iter()
                .filter(|(_, t)| t == self)
                .map(|(alias, _)| *alias),
        );
        tags
    }

    /// Parse a canonical tag or a legacy alias (case-insensitive).
    pub fn parse(s: &str) -> Option<Self> {
        let s = s.trim().to_lowercase();
        Self::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .or_else(|| {
                LEGACY_ALIASES
                    .iter()
                    .find(|(alias, _)| *alias == s)
                    .map(|(_, t)| *t)
            })
    }
}

impl TryFrom<String> for DesignType {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value).ok_or_else(|| format!("unknown design type '{}'", value))
    }
}

impl std::fmt::Display for DesignType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which kind of photo an upload holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum UploadType {
    Storefront,
    Interior,
}

impl UploadType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Storefront => "storefront",
            Self::Interior => "interior",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "storefront" => Some(Self::Storefront),
            "interior" => Some(Self::Interior),
            _ => None,
        }
    }
}

/// Lifecycle of a generated design row.
///
/// Rows are only written once an image exists, so stored rows are `completed`;
/// the other states exist for the status endpoint and older data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum ProcessingStatus {
    Pending,
    Processing,
    Completed,
    Failed,
}

impl ProcessingStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Processing => "processing",
            Self::Completed => "completed",
            Self::Failed => "failed",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "pending" => Some(Self::Pending),
            "processing" => Some(Self::Processing),
            "completed" => Some(Self::Completed),
            "failed" => Some(Self::Failed),
            _ => None,
        }
    }
}

/// Contest submission state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum SubmissionStatus {
    Submitted,
}

impl SubmissionStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Submitted => "submitted",
        }
    }
}
