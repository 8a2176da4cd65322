use contracts::dashboards::d400_sales_overview::{FilterSelection, SelectionEvent};

/// Next selection after `event`.
///
/// Clicks set their field; a click on another target replaces the previous
/// one, a repeated click on the same target leaves the selection unchanged,
/// and a click event without a value clears the field. `ClearAll` resets all
/// four fields together.
pub fn reduce(selection: &FilterSelection, event: SelectionEvent) -> FilterSelection {
    let mut next = selection.clone();
    match event {
        SelectionEvent::SetCategory { category } => next.category = category,
        SelectionEvent::SetRegions { regions } => next.regions = regions,
        SelectionEvent::MapClick { location } => next.clicked_state = location,
        SelectionEvent::SubcategoryClick { label } => next.clicked_subcategory = label,
        SelectionEvent::ClearAll => next = FilterSelection::default(),
    }
    next
}

#[cfg(test)]
mod tests {
    use super::*;

    fn busy_selection() -> FilterSelection {
        FilterSelection {
            category: "Technology".to_string(),
            regions: vec!["East".to_string(), "West".to_string()],
            clicked_state: Some("New York".to_string()),
            clicked_subcategory: Some("Phones".to_string()),
        }
    }

    #[test]
    fn test_map_click_sets_and_replaces() {
        let start = FilterSelection::default();

        let texas = reduce(&start, SelectionEvent::MapClick { location: Some("Texas".into()) });
        assert_eq!(texas.clicked_state.as_deref(), Some("Texas"));

        let ohio = reduce(&texas, SelectionEvent::MapClick { location: Some("Ohio".into()) });
        assert_eq!(ohio.clicked_state.as_deref(), Some("Ohio"));
    }

    #[test]
    fn test_repeated_click_is_noop() {
        let texas = reduce(
            &FilterSelection::default(),
            SelectionEvent::MapClick { location: Some("Texas".into()) },
        );
        let again = reduce(&texas, SelectionEvent::MapClick { location: Some("Texas".into()) });
        assert_eq!(again, texas);

        let phones = reduce(&texas, SelectionEvent::SubcategoryClick { label: Some("Phones".into()) });
        let again = reduce(&phones, SelectionEvent::SubcategoryClick { label: Some("Phones".into()) });
        assert_eq!(again, phones);
    }

    #[test]
    fn test_cleared_click_resets_field_only() {
        let start = busy_selection();

        let next = reduce(&start, SelectionEvent::MapClick { location: None });
        assert!(next.clicked_state.is_none());
        assert_eq!(next.clicked_subcategory, start.clicked_subcategory);
        assert_eq!(next.category, start.category);

        let next = reduce(&next, SelectionEvent::SubcategoryClick { label: None });
        assert!(next.clicked_subcategory.is_none());
        assert_eq!(next.regions, start.regions);
    }

    #[test]
    fn test_clicks_are_independent_of_dropdowns() {
        let start = busy_selection();
        let next = reduce(&start, SelectionEvent::SetCategory { category: "Furniture".into() });

        assert_eq!(next.category, "Furniture");
        assert_eq!(next.clicked_state, start.clicked_state);
        assert_eq!(next.clicked_subcategory, start.clicked_subcategory);

        let next = reduce(&next, SelectionEvent::SetRegions { regions: vec!["South".into()] });
        assert_eq!(next.regions, vec!["South".to_string()]);
    }

    #[test]
    fn test_clear_all_restores_default() {
        let cleared = reduce(&busy_selection(), SelectionEvent::ClearAll);
        assert_eq!(cleared, FilterSelection::default());

        let cleared_twice = reduce(&cleared, SelectionEvent::ClearAll);
        assert_eq!(cleared_twice, FilterSelection::default());
    }
}
