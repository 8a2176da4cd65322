use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Title carried by every placeholder chart
pub const NO_DATA_TITLE: &str = "No data available for current filters";

/// Chart specification handed to the renderer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ChartSpec {
    TimeSeries(TimeSeriesChart),
    HorizontalBar(HorizontalBarChart),
    Sunburst(SunburstChart),
    Choropleth(ChoroplethChart),
    NoData(NoDataChart),
}

impl ChartSpec {
    pub fn title(&self) -> &str {
        match self {
            ChartSpec::TimeSeries(c) => &c.title,
            ChartSpec::HorizontalBar(c) => &c.title,
            ChartSpec::Sunburst(c) => &c.title,
            ChartSpec::Choropleth(c) => &c.title,
            ChartSpec::NoData(c) => &c.title,
        }
    }

    pub fn is_no_data(&self) -> bool {
        matches!(self, ChartSpec::NoData(_))
    }
}

/// Which dashboard slot a chart occupies
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChartKind {
    TimeSeries,
    HorizontalBar,
    Sunburst,
    Choropleth,
}

// ============================================================================
// Time series
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimeSeriesMode {
    /// One line per category
    Line,
    /// Bars for a single category
    Bar,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimeSeriesChart {
    pub title: String,
    pub mode: TimeSeriesMode,
    pub x_label: String,
    pub y_label: String,
    pub series: Vec<TimeSeries>,
    pub hovermode: String,
    pub show_legend: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimeSeries {
    /// Category name
    pub name: String,
    pub points: Vec<TimePoint>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimePoint {
    /// First day of the month
    pub month: NaiveDate,
    pub sales: f64,
}

// ============================================================================
// Horizontal bar
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HorizontalBarChart {
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    /// Bar labels from bottom to top (ascending by value)
    pub label_order: Vec<String>,
    /// One series per category, coloured separately
    pub series: Vec<BarSeries>,
    pub hovermode: String,
    pub height: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BarSeries {
    pub name: String,
    pub bars: Vec<Bar>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bar {
    pub label: String,
    pub value: f64,
}

// ============================================================================
// Sunburst
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SunburstChart {
    pub title: String,
    /// Nodes in depth-first order, parents before children
    pub nodes: Vec<SunburstNode>,
    /// "total": a parent's value already includes its children
    pub branch_values: String,
    pub text_info: String,
    pub inside_text_orientation: String,
    pub hover_template: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SunburstNode {
    /// Slash-joined path from the root, e.g. "South/Texas/Furniture"
    pub id: String,
    pub label: String,
    /// Empty string for top-level nodes
    pub parent: String,
    pub value: f64,
}

// ============================================================================
// Choropleth
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChoroplethChart {
    pub title: String,
    pub locations: Vec<String>,
    pub values: Vec<f64>,
    /// Where the renderer fetches the boundary document
    pub geojson_url: String,
    /// Feature property matched against `locations`
    pub feature_id_key: String,
    pub color_scale: String,
    pub colorbar_title: String,
    pub opacity: f64,
    pub view: MapView,
    pub hover_format: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MapView {
    pub style: String,
    pub center: GeoPoint,
    pub zoom: f64,
}

impl Default for MapView {
    fn default() -> Self {
        Self {
            style: "carto-positron".to_string(),
            center: GeoPoint {
                lat: 37.0902,
                lon: -95.7129,
            },
            zoom: 2.3,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub lat: f64,
    pub lon: f64,
}

// ============================================================================
// Placeholder
// ============================================================================

/// Rendered instead of a chart when the filtered subset is empty
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NoDataChart {
    pub chart: ChartKind,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub map_view: Option<MapView>,
}

impl NoDataChart {
    pub fn new(chart: ChartKind) -> Self {
        let map_view = match chart {
            ChartKind::Choropleth => Some(MapView::default()),
            _ => None,
        };
        Self {
            chart,
            title: NO_DATA_TITLE.to_string(),
            map_view,
        }
    }
}
