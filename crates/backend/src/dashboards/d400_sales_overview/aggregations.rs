use chrono::NaiveDate;
use contracts::domain::a001_order_line::OrderLine;
use std::collections::BTreeMap;

use crate::shared::pivot::{HierarchyLevel, HierarchyNode, TreeBuilder};

/// Sales of one category in one calendar month
#[derive(Debug, Clone, PartialEq)]
pub struct MonthlySales {
    /// First day of the month
    pub month: NaiveDate,
    pub category: String,
    pub sales: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SubcategorySales {
    pub sub_category: String,
    pub category: String,
    pub sales: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct StateSales {
    pub state: String,
    pub sales: f64,
}

/// Group by (month, category) and sum sales; month ascending, then category
pub fn monthly_by_category(rows: &[&OrderLine]) -> Vec<MonthlySales> {
    let mut totals: BTreeMap<(NaiveDate, &str), f64> = BTreeMap::new();
    for line in rows {
        *totals
            .entry((line.order_month(), line.category.as_str()))
            .or_insert(0.0) += line.sales;
    }

    totals
        .into_iter()
        .map(|((month, category), sales)| MonthlySales {
            month,
            category: category.to_string(),
            sales,
        })
        .collect()
}

/// Group by (sub-category, category) and sum sales; ascending by sum
pub fn subcategory_totals(rows: &[&OrderLine]) -> Vec<SubcategorySales> {
    let mut totals: BTreeMap<(&str, &str), f64> = BTreeMap::new();
    for line in rows {
        *totals
            .entry((line.sub_category.as_str(), line.category.as_str()))
            .or_insert(0.0) += line.sales;
    }

    let mut result: Vec<SubcategorySales> = totals
        .into_iter()
        .map(|((sub_category, category), sales)| SubcategorySales {
            sub_category: sub_category.to_string(),
            category: category.to_string(),
            sales,
        })
        .collect();
    // stable: equal sums stay in name order
    result.sort_by(|a, b| a.sales.total_cmp(&b.sales));
    result
}

/// Sales tree along `levels`; every parent equals the sum of its children
pub fn hierarchy_totals(rows: &[&OrderLine], levels: &[HierarchyLevel]) -> Vec<HierarchyNode> {
    TreeBuilder::new(levels.to_vec()).build(rows)
}

/// One row per state, sorted by state name
pub fn state_totals(rows: &[&OrderLine]) -> Vec<StateSales> {
    let mut totals: BTreeMap<&str, f64> = BTreeMap::new();
    for line in rows {
        *totals.entry(line.state.as_str()).or_insert(0.0) += line.sales;
    }

    totals
        .into_iter()
        .map(|(state, sales)| StateSales {
            state: state.to_string(),
            sales,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line(date: (i32, u32, u32), category: &str, sub: &str, state: &str, sales: f64) -> OrderLine {
        OrderLine {
            order_id: "US-1".to_string(),
            order_date: NaiveDate::from_ymd_opt(date.0, date.1, date.2).unwrap(),
            category: category.to_string(),
            sub_category: sub.to_string(),
            region: "East".to_string(),
            state: state.to_string(),
            city: "City".to_string(),
            sales,
            returned: false,
        }
    }

    fn sample() -> Vec<OrderLine> {
        vec![
            line((2017, 2, 20), "Technology", "Phones", "Ohio", 300.0),
            line((2017, 1, 5), "Furniture", "Chairs", "Ohio", 100.0),
            line((2017, 1, 28), "Furniture", "Tables", "New York", 50.0),
            line((2017, 1, 9), "Technology", "Phones", "New York", 20.0),
            line((2017, 2, 1), "Furniture", "Chairs", "Vermont", 10.0),
            line((2016, 12, 31), "Office Supplies", "Paper", "Vermont", 5.0),
        ]
    }

    #[test]
    fn test_monthly_by_category() {
        let data = sample();
        let refs: Vec<&OrderLine> = data.iter().collect();

        let monthly = monthly_by_category(&refs);
        let keys: Vec<_> = monthly
            .iter()
            .map(|m| (m.month.to_string(), m.category.as_str(), m.sales))
            .collect();

        assert_eq!(
            keys,
            vec![
                ("2016-12-01".to_string(), "Office Supplies", 5.0),
                ("2017-01-01".to_string(), "Furniture", 150.0),
                ("2017-01-01".to_string(), "Technology", 20.0),
                ("2017-02-01".to_string(), "Furniture", 10.0),
                ("2017-02-01".to_string(), "Technology", 300.0),
            ]
        );
    }

    #[test]
    fn test_subcategory_totals_sorted_ascending() {
        let data = sample();
        let refs: Vec<&OrderLine> = data.iter().collect();

        let totals = subcategory_totals(&refs);
        let names: Vec<_> = totals.iter().map(|s| s.sub_category.as_str()).collect();

        assert_eq!(names, vec!["Paper", "Tables", "Chairs", "Phones"]);
        assert_eq!(totals[2].category, "Furniture");
        assert_eq!(totals[2].sales, 110.0);
        assert_eq!(totals[3].sales, 320.0);
    }

    #[test]
    fn test_state_totals_one_row_per_state() {
        let data = sample();
        let refs: Vec<&OrderLine> = data.iter().collect();

        let totals = state_totals(&refs);
        let pairs: Vec<_> = totals.iter().map(|s| (s.state.as_str(), s.sales)).collect();

        assert_eq!(pairs, vec![("New York", 70.0), ("Ohio", 400.0), ("Vermont", 15.0)]);
    }

    #[test]
    fn test_hierarchy_root_matches_state_totals() {
        let data = sample();
        let refs: Vec<&OrderLine> = data.iter().collect();

        let tree = hierarchy_totals(&refs, &HierarchyLevel::DEFAULT_PATH);
        let states = state_totals(&refs);

        // single region "East" whose children are the states
        assert_eq!(tree.len(), 1);
        let east = &tree[0];
        assert_eq!(east.value, 485.0);
        for (node, state) in east.children.iter().zip(states.iter()) {
            assert_eq!(node.label, state.state);
            assert!((node.value - state.sales).abs() < 1e-9);
        }
    }
}
