use contracts::dashboards::d400_sales_overview::{
    DashboardResponse, FilterSelection, FilterSummary,
};
use contracts::shared::charts::ChartKind;

use super::{aggregations, charts, filter};
use crate::shared::data::{Dataset, GeoReference};
use crate::shared::format::format_currency;
use crate::shared::pivot::{calculate_subtotal, HierarchyLevel};

/// Recompute every chart and the filter summary for `selection`.
///
/// An empty filtered subset yields "no data" placeholders for all four
/// charts; no aggregation runs in that case.
pub fn render(
    dataset: &Dataset,
    geo: Option<&GeoReference>,
    selection: &FilterSelection,
) -> DashboardResponse {
    let view = filter::apply(dataset.lines(), selection);
    let filters = FilterSummary::from_applied(view.applied);

    if view.rows.is_empty() {
        tracing::info!(
            "D400 Dashboard: no rows match {} active filter(s)",
            filters.entries.len()
        );
        return DashboardResponse {
            selection: selection.clone(),
            row_count: 0,
            monthly_sales: charts::no_data(ChartKind::TimeSeries),
            subcategory_sales: charts::no_data(ChartKind::HorizontalBar),
            sales_hierarchy: charts::no_data(ChartKind::Sunburst),
            state_map: charts::no_data(ChartKind::Choropleth),
            filters,
        };
    }

    let rows = &view.rows;
    let monthly = aggregations::monthly_by_category(rows);
    let subcategories = aggregations::subcategory_totals(rows);
    let hierarchy = aggregations::hierarchy_totals(rows, &HierarchyLevel::DEFAULT_PATH);
    let states = aggregations::state_totals(rows);

    if let Some(geo) = geo {
        for state in states.iter().filter(|s| !geo.contains_state(&s.state)) {
            tracing::warn!(
                "D400 Dashboard: state '{}' has no boundary in the geography document",
                state.state
            );
        }
    }

    tracing::info!(
        "D400 Dashboard: {} of {} rows, total sales {}",
        rows.len(),
        dataset.len(),
        format_currency(calculate_subtotal(rows))
    );

    DashboardResponse {
        selection: selection.clone(),
        row_count: rows.len(),
        monthly_sales: charts::monthly_chart(&monthly, selection.active_category()),
        subcategory_sales: charts::subcategory_chart(&subcategories),
        sales_hierarchy: charts::hierarchy_chart(&hierarchy, &HierarchyLevel::DEFAULT_PATH),
        state_map: charts::state_map_chart(&states),
        filters,
    }
}
