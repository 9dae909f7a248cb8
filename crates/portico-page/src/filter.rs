//! Portfolio filter bars
//!
//! A bar is a row of filter options the host enumerated from markup.
//! Selecting one moves the active class across the options and
//! reports the grid filter the host's layout widget should apply.

use serde::{Deserialize, Serialize};

use crate::error::PageError;
use crate::patch::SurfacePatch;
use crate::Result;

/// One option in a filter bar.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FilterOption {
    /// Selector of the option's anchor element.
    pub target: String,
    /// Grid filter the option applies (`*`, `.web-design`, ...).
    pub filter: String,
}

/// Outcome of a selection.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FilterSelection {
    /// Filter for the host's layout widget.
    pub filter: String,
    /// Active-class movement across the bar.
    pub patches: Vec<SurfacePatch>,
}

pub struct FilterBar {
    group: String,
    options: Vec<FilterOption>,
}

impl FilterBar {
    pub fn new(group: impl Into<String>, options: Vec<FilterOption>) -> Self {
        Self {
            group: group.into(),
            options,
        }
    }

    /// Grid this bar drives, e.g. `.portfolio-items`.
    pub fn group(&self) -> &str {
        &self.group
    }

    pub fn options(&self) -> &[FilterOption] {
        &self.options
    }

    /// A bar without options never binds; the host skips its grid
    /// entirely instead of wiring dead handlers.
    pub fn should_bind(&self) -> bool {
        !self.options.is_empty()
    }

    /// Select the option at `index`: strip the active class from every
    /// option, mark the chosen one, and report its filter.
    pub fn select(&self, index: usize) -> Result<FilterSelection> {
        let chosen = self
            .options
            .get(index)
            .ok_or_else(|| PageError::UnknownFilter {
                group: self.group.clone(),
                index,
            })?;

        let mut patches: Vec<SurfacePatch> = self
            .options
            .iter()
            .map(|option| SurfacePatch::remove_class(&option.target, "active"))
            .collect();
        patches.push(SurfacePatch::add_class(&chosen.target, "active"));

        tracing::debug!(group = %self.group, filter = %chosen.filter, "Filter selected");

        Ok(FilterSelection {
            filter: chosen.filter.clone(),
            patches,
        })
    }
}

/// Column width for a masonry grid: the container split evenly. Zero
/// columns would divide by zero and comes back as one full-width
/// column instead.
pub fn masonry_column_width(container_width: f64, columns: u32) -> f64 {
    if columns == 0 {
        return container_width;
    }

    container_width / f64::from(columns)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::patch::PatchOp;

    fn web_bar() -> FilterBar {
        FilterBar::new(
            ".portfolio-items",
            vec![
                FilterOption {
                    target: "#filter-all".to_string(),
                    filter: "*".to_string(),
                },
                FilterOption {
                    target: "#filter-web".to_string(),
                    filter: ".web-design".to_string(),
                },
                FilterOption {
                    target: "#filter-print".to_string(),
                    filter: ".print".to_string(),
                },
            ],
        )
    }

    #[test]
    fn test_select_moves_active_class() {
        let bar = web_bar();
        let selection = bar.select(1).unwrap();

        assert_eq!(selection.filter, ".web-design");

        // Strip everywhere, then mark the chosen option
        assert_eq!(selection.patches.len(), 4);
        assert!(selection
            .patches
            .iter()
            .take(3)
            .all(|p| matches!(p.op, PatchOp::RemoveClass { .. })));
        assert_eq!(
            selection.patches[3],
            SurfacePatch::add_class("#filter-web", "active")
        );
    }

    #[test]
    fn test_select_out_of_range() {
        let bar = web_bar();
        let err = bar.select(9).unwrap_err();

        match err {
            PageError::UnknownFilter { group, index } => {
                assert_eq!(group, ".portfolio-items");
                assert_eq!(index, 9);
            }
        }
    }

    #[test]
    fn test_empty_bar_never_binds() {
        let bar = FilterBar::new(".portfolio-items", Vec::new());
        assert!(!bar.should_bind());
        assert!(bar.select(0).is_err());

        assert!(web_bar().should_bind());
    }

    #[test]
    fn test_masonry_column_width() {
        assert_eq!(masonry_column_width(960.0, 3), 320.0);
        assert_eq!(masonry_column_width(960.0, 4), 240.0);

        // Zero columns degrades to a single full-width column
        assert_eq!(masonry_column_width(960.0, 0), 960.0);
    }
}
