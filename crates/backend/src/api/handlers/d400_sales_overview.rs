use axum::{http::StatusCode, Json};
use contracts::dashboards::d400_sales_overview::{
    Catalogs, DashboardResponse, FilterSelection, SelectionEvent,
};
use once_cell::sync::Lazy;
use std::sync::Mutex;

use crate::dashboards::d400_sales_overview::{interaction, service};
use crate::shared::data::{store, Dataset, GeoReference};

// ============================================================================
// Session state
// ============================================================================

/// Selection driven by click and dropdown events. Events are reduced and
/// rendered while the lock is held, one at a time.
static SESSION: Lazy<Mutex<FilterSelection>> = Lazy::new(|| Mutex::new(FilterSelection::default()));

fn loaded() -> Result<(&'static Dataset, &'static GeoReference), StatusCode> {
    match (store::get_dataset(), store::get_geo()) {
        (Some(dataset), Some(geo)) => Ok((dataset, geo)),
        _ => {
            tracing::error!("D400 Dashboard: data requested before initialization");
            Err(StatusCode::SERVICE_UNAVAILABLE)
        }
    }
}

/// Reduce `event` into the session selection and render the result
pub fn handle_event(
    session: &Mutex<FilterSelection>,
    dataset: &Dataset,
    geo: Option<&GeoReference>,
    event: SelectionEvent,
) -> Result<DashboardResponse, StatusCode> {
    let mut selection = session.lock().map_err(|e| {
        tracing::error!("D400 Dashboard: session lock poisoned: {}", e);
        StatusCode::INTERNAL_SERVER_ERROR
    })?;

    let next = interaction::reduce(&selection, event);
    if next == *selection {
        tracing::debug!("D400 Dashboard: event left the selection unchanged");
    }
    *selection = next;

    Ok(service::render(dataset, geo, &selection))
}

// ============================================================================
// Handlers
// ============================================================================

/// GET /api/d400/catalogs
pub async fn get_catalogs() -> Result<Json<Catalogs>, StatusCode> {
    let (dataset, _) = loaded()?;
    Ok(Json(dataset.catalogs()))
}

/// GET /api/d400/geojson
pub async fn get_geojson() -> Result<Json<serde_json::Value>, StatusCode> {
    let (_, geo) = loaded()?;
    Ok(Json(geo.document().clone()))
}

/// POST /api/d400/render
pub async fn render(
    Json(selection): Json<FilterSelection>,
) -> Result<Json<DashboardResponse>, StatusCode> {
    let (dataset, geo) = loaded()?;
    tracing::info!("D400 Dashboard: render {:?}", selection);
    Ok(Json(service::render(dataset, Some(geo), &selection)))
}

/// GET /api/d400/session
pub async fn get_session() -> Result<Json<DashboardResponse>, StatusCode> {
    let (dataset, geo) = loaded()?;
    let selection = SESSION
        .lock()
        .map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)?
        .clone();
    Ok(Json(service::render(dataset, Some(geo), &selection)))
}

/// POST /api/d400/session/events
pub async fn post_event(
    Json(event): Json<SelectionEvent>,
) -> Result<Json<DashboardResponse>, StatusCode> {
    let (dataset, geo) = loaded()?;
    tracing::info!("D400 Dashboard: event {:?}", event);
    handle_event(&SESSION, dataset, Some(geo), event).map(Json)
}

/// POST /api/d400/session/clear
pub async fn clear_session() -> Result<Json<DashboardResponse>, StatusCode> {
    let (dataset, geo) = loaded()?;
    tracing::info!("D400 Dashboard: clear all filters");
    handle_event(&SESSION, dataset, Some(geo), SelectionEvent::ClearAll).map(Json)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use contracts::domain::a001_order_line::OrderLine;

    fn dataset() -> Dataset {
        let line = |category: &str, sub: &str, state: &str, sales: f64| OrderLine {
            order_id: format!("{}-{}", state, sub),
            order_date: NaiveDate::from_ymd_opt(2017, 6, 1).unwrap(),
            category: category.to_string(),
            sub_category: sub.to_string(),
            region: "Central".to_string(),
            state: state.to_string(),
            city: "City".to_string(),
            sales,
            returned: false,
        };
        Dataset::new(vec![
            line("Furniture", "Chairs", "Texas", 10.0),
            line("Office Supplies", "Paper", "Texas", 20.0),
            line("Office Supplies", "Paper", "Iowa", 30.0),
        ])
    }

    #[test]
    fn test_session_events_accumulate_then_clear() {
        let session = Mutex::new(FilterSelection::default());
        let data = dataset();

        let response = handle_event(
            &session,
            &data,
            None,
            SelectionEvent::SetCategory { category: "Office Supplies".into() },
        )
        .unwrap();
        assert_eq!(response.row_count, 2);

        let response = handle_event(
            &session,
            &data,
            None,
            SelectionEvent::MapClick { location: Some("Texas".into()) },
        )
        .unwrap();
        assert_eq!(response.row_count, 1);
        assert_eq!(response.filters.entries.len(), 2);

        let response = handle_event(&session, &data, None, SelectionEvent::ClearAll).unwrap();
        assert_eq!(response.row_count, 3);
        assert_eq!(response.selection, FilterSelection::default());
        assert_eq!(*session.lock().unwrap(), FilterSelection::default());
    }

    #[tokio::test]
    async fn test_unavailable_before_initialization() {
        let result = render(Json(FilterSelection::default())).await;
        assert_eq!(result.unwrap_err(), StatusCode::SERVICE_UNAVAILABLE);

        let result = get_catalogs().await;
        assert_eq!(result.unwrap_err(), StatusCode::SERVICE_UNAVAILABLE);
    }
}
