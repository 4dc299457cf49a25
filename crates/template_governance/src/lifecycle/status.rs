//! Template lifecycle status and transition table.

use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use std::str::FromStr;

/// Lifecycle status of one template.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum TemplateStatus {
    /// Being authored; freely editable.
    #[default]
    Draft,
    /// Shared for review before release.
    Preview,
    /// Released to consumers.
    Published,
    /// Still served but scheduled for retirement.
    Deprecated,
}

impl TemplateStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Draft => "draft",
            Self::Preview => "preview",
            Self::Published => "published",
            Self::Deprecated => "deprecated",
        }
    }

    /// Returns whether `self -> target` is a legal edge.
    ///
    /// Only single forward steps are legal; there is no way back and no
    /// skipping of `preview`.
    pub fn can_transition_to(self, target: TemplateStatus) -> bool {
        matches!(
            (self, target),
            (Self::Draft, Self::Preview)
                | (Self::Preview, Self::Published)
                | (Self::Published, Self::Deprecated)
        )
    }

    /// Returns the single legal successor, if any.
    pub fn next(self) -> Option<TemplateStatus> {
        match self {
            Self::Draft => Some(Self::Preview),
            Self::Preview => Some(Self::Published),
            Self::Published => Some(Self::Deprecated),
            Self::Deprecated => None,
        }
    }
}

impl Display for TemplateStatus {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TemplateStatus {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim() {
            "draft" => Ok(Self::Draft),
            "preview" => Ok(Self::Preview),
            "published" => Ok(Self::Published),
            "deprecated" => Ok(Self::Deprecated),
            other => Err(format!(
                "unsupported template status `{other}`; expected draft|preview|published|deprecated"
            )),
        }
    }
}
