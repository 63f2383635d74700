use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::app::infrastructure::error::AppError;

/// Editor height: sized to content, or a fixed pixel count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum EditorHeight {
    Auto,
    Fixed(u32),
}

impl EditorHeight {
    /// Options offered by the height selector.
    pub const OPTIONS: [&'static str; 4] = ["auto", "200px", "300px", "500px"];

    pub const MIN_AUTO_PX: i32 = 60;

    /// Pixel height for a document of `line_count` lines at `line_height` pixels.
    pub fn resolve(self, line_count: usize, line_height: i32) -> i32 {
        match self {
            Self::Fixed(px) => i32::try_from(px).unwrap_or(i32::MAX),
            Self::Auto => {
                let lines = i32::try_from(line_count.max(1)).unwrap_or(i32::MAX);
                lines
                    .saturating_mul(line_height)
                    .saturating_add(8)
                    .max(Self::MIN_AUTO_PX)
            }
        }
    }
}

impl FromStr for EditorHeight {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed == "auto" {
            return Ok(Self::Auto);
        }
        trimmed
            .strip_suffix("px")
            .and_then(|n| n.parse::<u32>().ok())
            .filter(|&px| px > 0 && i32::try_from(px).is_ok())
            .map(Self::Fixed)
            .ok_or_else(|| AppError::InvalidHeight(s.to_string()))
    }
}

impl fmt::Display for EditorHeight {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Auto => write!(f, "auto"),
            Self::Fixed(px) => write!(f, "{}px", px),
        }
    }
}

impl TryFrom<String> for EditorHeight {
    type Error = AppError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<EditorHeight> for String {
    fn from(value: EditorHeight) -> Self {
        value.to_string()
    }
}
