//! Edit scripts: a TOML list of edits applied in order.
//!
//! ```toml
//! [[edit]]
//! op = "rotate"
//! pages = [1, 3]
//! degrees = 90
//!
//! [[edit]]
//! op = "reorder"
//! pages = [4]
//! after = 0        # 0 = start, k = after page k
//! ```
//!
//! Page numbers are 1-based and refer to the document as it stands after
//! the previous edit.

use std::path::Path;

use anyhow::{Context, Result, bail};
use pdf_editor_core::{Anchor, Edit, Rotation};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct Script {
    #[serde(rename = "edit", default)]
    pub edits: Vec<ScriptEdit>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "op", rename_all = "lowercase")]
pub enum ScriptEdit {
    Rotate {
        pages: Vec<usize>,
        /// Falls back to the configured default rotation
        #[serde(default)]
        degrees: Option<i64>,
    },
    Reorder {
        pages: Vec<usize>,
        after: usize,
    },
    Delete {
        pages: Vec<usize>,
    },
    Extract {
        pages: Vec<usize>,
    },
}

impl Script {
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read script: {}", path.display()))?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> Result<Self> {
        toml::from_str(content).context("Failed to parse edit script")
    }
}

impl ScriptEdit {
    pub fn pages(&self) -> &[usize] {
        match self {
            Self::Rotate { pages, .. }
            | Self::Reorder { pages, .. }
            | Self::Delete { pages }
            | Self::Extract { pages } => pages,
        }
    }

    /// Resolve into a core edit.
    pub fn to_edit(&self, default_rotation: Rotation) -> Result<Edit> {
        Ok(match self {
            Self::Rotate { degrees, .. } => Edit::Rotate(rotation_delta(*degrees, default_rotation)?),
            Self::Reorder { after, .. } => Edit::Reorder(Anchor::from_position(*after)),
            Self::Delete { .. } => Edit::Delete,
            Self::Extract { .. } => Edit::Extract,
        })
    }
}

/// The rotation to apply for an optional `degrees` value.
///
/// A rotation must turn the page, so multiples of 360 are rejected.
pub fn rotation_delta(degrees: Option<i64>, default_rotation: Rotation) -> Result<Rotation> {
    let delta = degrees.map_or(Ok(default_rotation), Rotation::from_degrees)?;
    if delta.is_none() {
        bail!("Rotation must be 90, 180 or 270 degrees, got {}", degrees.unwrap_or(0));
    }
    Ok(delta)
}
