use contracts::dashboards::d400_sales_overview::{AppliedFilter, FilterKind, FilterSelection};
use contracts::domain::a001_order_line::OrderLine;

/// A single row predicate derived from one field of the selection
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Constraint<'s> {
    Category(&'s str),
    Regions(&'s [String]),
    State(&'s str),
    SubCategory(&'s str),
}

impl<'s> Constraint<'s> {
    pub fn matches(&self, line: &OrderLine) -> bool {
        match self {
            Constraint::Category(category) => line.category == *category,
            Constraint::Regions(regions) => regions.iter().any(|r| *r == line.region),
            Constraint::State(state) => line.state == *state,
            Constraint::SubCategory(sub) => line.sub_category == *sub,
        }
    }

    pub fn kind(&self) -> FilterKind {
        match self {
            Constraint::Category(_) => FilterKind::Category,
            Constraint::Regions(_) => FilterKind::Regions,
            Constraint::State(_) => FilterKind::State,
            Constraint::SubCategory(_) => FilterKind::SubCategory,
        }
    }

    /// Summary line shown to the user, e.g. "Regions: East, West"
    pub fn describe(&self) -> AppliedFilter {
        let label = match self {
            Constraint::Category(category) => format!("Category: {}", category),
            Constraint::Regions(regions) => format!("Regions: {}", regions.join(", ")),
            Constraint::State(state) => format!("State: {}", state),
            Constraint::SubCategory(sub) => format!("Sub-Category: {}", sub),
        };
        AppliedFilter {
            kind: self.kind(),
            label,
        }
    }
}

/// Active constraints of a selection, in display order:
/// category, regions, state, sub-category
pub fn constraints(selection: &FilterSelection) -> Vec<Constraint<'_>> {
    let mut out = Vec::with_capacity(4);
    if let Some(category) = selection.active_category() {
        out.push(Constraint::Category(category));
    }
    if let Some(regions) = selection.active_regions() {
        out.push(Constraint::Regions(regions));
    }
    if let Some(state) = selection.active_state() {
        out.push(Constraint::State(state));
    }
    if let Some(sub) = selection.active_subcategory() {
        out.push(Constraint::SubCategory(sub));
    }
    out
}

/// Rows that passed the filter, borrowed from the dataset
#[derive(Debug, Clone)]
pub struct FilteredView<'a> {
    pub rows: Vec<&'a OrderLine>,
    pub applied: Vec<AppliedFilter>,
}

impl<'a> FilteredView<'a> {
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Keep the rows matching every active constraint of `selection`
pub fn apply<'a, I>(rows: I, selection: &FilterSelection) -> FilteredView<'a>
where
    I: IntoIterator<Item = &'a OrderLine>,
{
    let active = constraints(selection);
    FilteredView {
        rows: apply_constraints(rows, &active),
        applied: active.iter().map(Constraint::describe).collect(),
    }
}

pub fn apply_constraints<'a, I>(rows: I, constraints: &[Constraint<'_>]) -> Vec<&'a OrderLine>
where
    I: IntoIterator<Item = &'a OrderLine>,
{
    rows.into_iter()
        .filter(|line| constraints.iter().all(|c| c.matches(line)))
        .collect()
}
