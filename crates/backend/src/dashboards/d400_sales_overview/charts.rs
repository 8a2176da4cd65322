use contracts::shared::charts::{
    Bar, BarSeries, ChartKind, ChartSpec, ChoroplethChart, HorizontalBarChart, MapView,
    NoDataChart, SunburstChart, TimePoint, TimeSeries, TimeSeriesChart, TimeSeriesMode,
};

use super::aggregations::{MonthlySales, StateSales, SubcategorySales};
use crate::shared::data::geo::FEATURE_ID_KEY;
use crate::shared::pivot::{flatten_to_sunburst, HierarchyLevel, HierarchyNode};

/// Endpoint serving the boundary document referenced by the map
pub const GEOJSON_URL: &str = "/api/d400/geojson";

const SALES_LABEL: &str = "Total Sales ($)";

pub fn no_data(kind: ChartKind) -> ChartSpec {
    ChartSpec::NoData(NoDataChart::new(kind))
}

/// Multi-series line for all categories, single-series bar for one category
pub fn monthly_chart(data: &[MonthlySales], selected_category: Option<&str>) -> ChartSpec {
    let (mode, title) = match selected_category {
        None => (
            TimeSeriesMode::Line,
            "Monthly Sales Trend by Category".to_string(),
        ),
        Some(category) => (TimeSeriesMode::Bar, format!("Monthly Sales for {}", category)),
    };

    // data is month-ordered, so every series is month-ordered as well
    let mut series: Vec<TimeSeries> = Vec::new();
    for row in data {
        let point = TimePoint {
            month: row.month,
            sales: row.sales,
        };
        match series.iter_mut().find(|s| s.name == row.category) {
            Some(existing) => existing.points.push(point),
            None => series.push(TimeSeries {
                name: row.category.clone(),
                points: vec![point],
            }),
        }
    }
    series.sort_by(|a, b| a.name.cmp(&b.name));

    ChartSpec::TimeSeries(TimeSeriesChart {
        title,
        mode,
        x_label: "Month".to_string(),
        y_label: SALES_LABEL.to_string(),
        series,
        hovermode: "x unified".to_string(),
        show_legend: true,
    })
}

pub fn subcategory_chart(data: &[SubcategorySales]) -> ChartSpec {
    let label_order: Vec<String> = data.iter().map(|s| s.sub_category.clone()).collect();

    let mut series: Vec<BarSeries> = Vec::new();
    for row in data {
        let bar = Bar {
            label: row.sub_category.clone(),
            value: row.sales,
        };
        match series.iter_mut().find(|s| s.name == row.category) {
            Some(existing) => existing.bars.push(bar),
            None => series.push(BarSeries {
                name: row.category.clone(),
                bars: vec![bar],
            }),
        }
    }

    ChartSpec::HorizontalBar(HorizontalBarChart {
        title: "Sales by Sub-Category".to_string(),
        x_label: SALES_LABEL.to_string(),
        y_label: "Sub-Category".to_string(),
        label_order,
        series,
        hovermode: "y unified".to_string(),
        height: 500,
    })
}

pub fn hierarchy_chart(nodes: &[HierarchyNode], levels: &[HierarchyLevel]) -> ChartSpec {
    let path = levels
        .iter()
        .map(HierarchyLevel::display_name)
        .collect::<Vec<_>>()
        .join(" → ");

    ChartSpec::Sunburst(SunburstChart {
        title: format!("Sales Hierarchy: {}", path),
        nodes: flatten_to_sunburst(nodes),
        branch_values: "total".to_string(),
        text_info: "label+percent entry".to_string(),
        inside_text_orientation: "radial".to_string(),
        hover_template: concat!(
            "<b>%{label}</b><br>",
            "Parent: %{parent}<br>",
            "Sales: $%{value:,.0f}<br>",
            "Share: %{percentEntry:.1%}<extra></extra>"
        )
        .to_string(),
    })
}

pub fn state_map_chart(data: &[StateSales]) -> ChartSpec {
    ChartSpec::Choropleth(ChoroplethChart {
        title: "Sales by State (Click to filter)".to_string(),
        locations: data.iter().map(|s| s.state.clone()).collect(),
        values: data.iter().map(|s| s.sales).collect(),
        geojson_url: GEOJSON_URL.to_string(),
        feature_id_key: FEATURE_ID_KEY.to_string(),
        color_scale: "Viridis".to_string(),
        colorbar_title: "Sales ($)".to_string(),
        opacity: 0.7,
        view: MapView::default(),
        hover_format: "$,.0f".to_string(),
    })
}
