//! Font size options
//!
//! The toolbar dropdown takes its entries from a packed
//! `label/size;label/size` string. A bare entry without a slash uses
//! its value as its own label.

use serde::{Deserialize, Serialize};

use crate::error::EditorError;
use crate::Result;

/// The toolbar's default range, 8px through 72px.
pub const DEFAULT_FONT_SIZES: &str = "8/8px;9/9px;10/10px;11/11px;12/12px;14/14px;16/16px;\
                                      18/18px;20/20px;22/22px;24/24px;26/26px;28/28px;36/36px;\
                                      48/48px;54/54px;60/60px;72/72px";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FontSizeOption {
    /// Text shown in the dropdown.
    pub label: String,
    /// CSS size applied to the selection.
    pub size: String,
}

impl FontSizeOption {
    /// Parse a packed option string. Empty segments (doubled or
    /// trailing separators) are skipped; an entry with an empty label
    /// or size is malformed.
    pub fn parse_list(input: &str) -> Result<Vec<FontSizeOption>> {
        let mut options = Vec::new();

        for entry in input.split(';') {
            let entry = entry.trim();
            if entry.is_empty() {
                continue;
            }

            let option = match entry.split_once('/') {
                Some((label, size)) => {
                    let label = label.trim();
                    let size = size.trim();
                    if label.is_empty() || size.is_empty() {
                        return Err(EditorError::InvalidFontSize(entry.to_string()));
                    }
                    FontSizeOption {
                        label: label.to_string(),
                        size: size.to_string(),
                    }
                }
                None => FontSizeOption {
                    label: entry.to_string(),
                    size: entry.to_string(),
                },
            };

            options.push(option);
        }

        Ok(options)
    }

    /// Pack options back into the `label/size;label/size` form.
    pub fn format_list(options: &[FontSizeOption]) -> String {
        options
            .iter()
            .map(|option| format!("{}/{}", option.label, option.size))
            .collect::<Vec<_>>()
            .join(";")
    }
}

/// The default range as parsed options.
pub fn default_font_sizes() -> Vec<FontSizeOption> {
    const SIZES: &[&str] = &[
        "8", "9", "10", "11", "12", "14", "16", "18", "20", "22", "24", "26", "28", "36", "48",
        "54", "60", "72",
    ];

    SIZES
        .iter()
        .map(|size| FontSizeOption {
            label: size.to_string(),
            size: format!("{}px", size),
        })
        .collect()
}
