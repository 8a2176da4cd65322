use serde::{Deserialize, Serialize};

use crate::shared::charts::ChartSpec;

/// Catalog value meaning "no constraint"
pub const ALL: &str = "All";

// ============================================================================
// Filter selection
// ============================================================================

/// Current cross-filter state of the dashboard.
///
/// An empty or absent value in any field means the field does not constrain
/// the data: `"All"` or `""` for the category, an empty list or one containing
/// `"All"` for the regions, `None` or `""` for either click.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterSelection {
    #[serde(default = "default_category")]
    pub category: String,
    #[serde(default = "default_regions")]
    pub regions: Vec<String>,
    #[serde(default)]
    pub clicked_state: Option<String>,
    #[serde(default)]
    pub clicked_subcategory: Option<String>,
}

fn default_category() -> String {
    ALL.to_string()
}

fn default_regions() -> Vec<String> {
    vec![ALL.to_string()]
}

impl Default for FilterSelection {
    fn default() -> Self {
        Self {
            category: default_category(),
            regions: default_regions(),
            clicked_state: None,
            clicked_subcategory: None,
        }
    }
}

impl FilterSelection {
    /// Category to filter on, if any
    pub fn active_category(&self) -> Option<&str> {
        let category = self.category.as_str();
        if category.is_empty() || category == ALL {
            None
        } else {
            Some(category)
        }
    }

    /// Regions to filter on, if any
    pub fn active_regions(&self) -> Option<&[String]> {
        if self.regions.is_empty() || self.regions.iter().any(|r| r == ALL) {
            None
        } else {
            Some(&self.regions)
        }
    }

    pub fn active_state(&self) -> Option<&str> {
        non_empty(self.clicked_state.as_deref())
    }

    pub fn active_subcategory(&self) -> Option<&str> {
        non_empty(self.clicked_subcategory.as_deref())
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}

// ============================================================================
// Interaction events
// ============================================================================

/// Event emitted by the renderer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SelectionEvent {
    /// Category radio changed
    SetCategory { category: String },
    /// Region multi-select changed
    SetRegions { regions: Vec<String> },
    /// Click on the state map; `None` when the click was cleared
    MapClick {
        #[serde(default)]
        location: Option<String>,
    },
    /// Click on a sub-category bar; `None` when the click was cleared
    SubcategoryClick {
        #[serde(default)]
        label: Option<String>,
    },
    /// "Clear All Filters" button
    ClearAll,
}

// ============================================================================
// Catalogs
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogOption {
    pub label: String,
    pub value: String,
}

/// Option lists for the category radio and the region dropdown
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Catalogs {
    pub categories: Vec<CatalogOption>,
    pub regions: Vec<CatalogOption>,
}

// ============================================================================
// Filter summary
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FilterKind {
    Category,
    Regions,
    State,
    SubCategory,
}

/// One active constraint, e.g. "State: Texas"
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppliedFilter {
    pub kind: FilterKind,
    pub label: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterSummary {
    pub heading: String,
    /// Shown only when no filter is active
    pub hint: Option<String>,
    /// Active constraints in order: category, regions, state, sub-category
    pub entries: Vec<AppliedFilter>,
}

impl FilterSummary {
    pub fn from_applied(entries: Vec<AppliedFilter>) -> Self {
        if entries.is_empty() {
            Self {
                heading: "No filters applied".to_string(),
                hint: Some("Click on charts to apply cross-filters".to_string()),
                entries,
            }
        } else {
            Self {
                heading: "Active Filters:".to_string(),
                hint: None,
                entries,
            }
        }
    }
}

// ============================================================================
// Response
// ============================================================================

/// Everything the renderer needs after one selection change
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardResponse {
    pub selection: FilterSelection,
    /// Number of order lines left after filtering
    pub row_count: usize,
    pub monthly_sales: ChartSpec,
    pub subcategory_sales: ChartSpec,
    pub sales_hierarchy: ChartSpec,
    pub state_map: ChartSpec,
    pub filters: FilterSummary,
}
