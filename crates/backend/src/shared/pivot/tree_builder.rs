use contracts::domain::a001_order_line::OrderLine;
use contracts::shared::charts::SunburstNode;
use std::collections::BTreeMap;

/// Order line attribute used as one level of the hierarchy
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HierarchyLevel {
    Region,
    State,
    City,
    Category,
    SubCategory,
}

impl HierarchyLevel {
    /// Region → State → Category → Sub-Category
    pub const DEFAULT_PATH: [HierarchyLevel; 4] = [
        HierarchyLevel::Region,
        HierarchyLevel::State,
        HierarchyLevel::Category,
        HierarchyLevel::SubCategory,
    ];

    /// Region → State → City
    pub const GEOGRAPHIC_PATH: [HierarchyLevel; 3] = [
        HierarchyLevel::Region,
        HierarchyLevel::State,
        HierarchyLevel::City,
    ];

    pub fn key<'a>(&self, line: &'a OrderLine) -> &'a str {
        match self {
            HierarchyLevel::Region => &line.region,
            HierarchyLevel::State => &line.state,
            HierarchyLevel::City => &line.city,
            HierarchyLevel::Category => &line.category,
            HierarchyLevel::SubCategory => &line.sub_category,
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            HierarchyLevel::Region => "Region",
            HierarchyLevel::State => "State",
            HierarchyLevel::City => "City",
            HierarchyLevel::Category => "Category",
            HierarchyLevel::SubCategory => "Sub-Category",
        }
    }
}

/// One group in the hierarchy with its summed sales
#[derive(Debug, Clone, PartialEq)]
pub struct HierarchyNode {
    pub label: String,
    /// 0 = top level
    pub level: usize,
    /// Leaf: sum of the group's sales. Parent: sum of the children's values.
    pub value: f64,
    pub children: Vec<HierarchyNode>,
}

/// Tree builder for transforming flat order lines to a hierarchical structure
pub struct TreeBuilder {
    /// Grouping levels (in order)
    levels: Vec<HierarchyLevel>,
}

impl TreeBuilder {
    pub fn new(levels: Vec<HierarchyLevel>) -> Self {
        Self { levels }
    }

    /// Build the hierarchy; top-level groups sorted by label
    pub fn build(&self, lines: &[&OrderLine]) -> Vec<HierarchyNode> {
        if lines.is_empty() || self.levels.is_empty() {
            return vec![];
        }
        self.build_recursive(lines, 0)
    }

    fn build_recursive(&self, lines: &[&OrderLine], level: usize) -> Vec<HierarchyNode> {
        let grouping = self.levels[level];

        let mut groups: BTreeMap<&str, Vec<&OrderLine>> = BTreeMap::new();
        for line in lines {
            groups.entry(grouping.key(*line)).or_default().push(*line);
        }

        groups
            .into_iter()
            .map(|(label, group_lines)| {
                if level + 1 < self.levels.len() {
                    let children = self.build_recursive(&group_lines, level + 1);
                    // Parent value is derived from the children so that every
                    // level sums to the same total.
                    let value = children.iter().map(|c| c.value).sum();
                    HierarchyNode {
                        label: label.to_string(),
                        level,
                        value,
                        children,
                    }
                } else {
                    HierarchyNode {
                        label: label.to_string(),
                        level,
                        value: calculate_subtotal(&group_lines),
                        children: vec![],
                    }
                }
            })
            .collect()
    }
}

/// Sum of sales over the given lines
pub fn calculate_subtotal(lines: &[&OrderLine]) -> f64 {
    lines.iter().map(|l| l.sales).sum()
}

/// Flatten the tree into sunburst nodes, parents before children.
/// Node ids are slash-joined label paths so equal labels under different
/// parents stay distinct.
pub fn flatten_to_sunburst(nodes: &[HierarchyNode]) -> Vec<SunburstNode> {
    let mut out = Vec::new();
    flatten_into(nodes, "", &mut out);
    out
}

fn flatten_into(nodes: &[HierarchyNode], parent_id: &str, out: &mut Vec<SunburstNode>) {
    for node in nodes {
        let id = if parent_id.is_empty() {
            node.label.clone()
        } else {
            format!("{}/{}", parent_id, node.label)
        };
        out.push(SunburstNode {
            id: id.clone(),
            label: node.label.clone(),
            parent: parent_id.to_string(),
            value: node.value,
        });
        flatten_into(&node.children, &id, out);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn line(region: &str, state: &str, category: &str, sub: &str, sales: f64) -> OrderLine {
        line_in(region, state, "City", category, sub, sales)
    }

    fn line_in(
        region: &str,
        state: &str,
        city: &str,
        category: &str,
        sub: &str,
        sales: f64,
    ) -> OrderLine {
        OrderLine {
            order_id: format!("{}-{}", state, sub),
            order_date: NaiveDate::from_ymd_opt(2017, 5, 3).unwrap(),
            category: category.to_string(),
            sub_category: sub.to_string(),
            region: region.to_string(),
            state: state.to_string(),
            city: city.to_string(),
            sales,
            returned: false,
        }
    }

    fn sample() -> Vec<OrderLine> {
        vec![
            line("Central", "Texas", "Furniture", "Chairs", 100.25),
            line("Central", "Texas", "Furniture", "Chairs", 50.5),
            line("Central", "Texas", "Technology", "Phones", 300.0),
            line("Central", "Illinois", "Furniture", "Tables", 75.125),
            line("West", "California", "Office Supplies", "Paper", 12.0),
            line("West", "California", "Furniture", "Chairs", 40.0),
        ]
    }

    fn assert_sum_consistent(nodes: &[HierarchyNode]) {
        for node in nodes {
            if !node.children.is_empty() {
                let children_sum: f64 = node.children.iter().map(|c| c.value).sum();
                assert!(
                    (node.value - children_sum).abs() < 1e-9,
                    "{} = {} but children sum to {}",
                    node.label,
                    node.value,
                    children_sum
                );
                assert_sum_consistent(&node.children);
            }
        }
    }

    #[test]
    fn test_simple_grouping() {
        let data = sample();
        let refs: Vec<&OrderLine> = data.iter().collect();
        let builder = TreeBuilder::new(vec![HierarchyLevel::Region]);

        let result = builder.build(&refs);

        assert_eq!(result.len(), 2);
        assert_eq!(result[0].label, "Central");
        assert!((result[0].value - 525.875).abs() < 1e-9);
        assert_eq!(result[1].label, "West");
        assert!(result[1].children.is_empty());
    }

    #[test]
    fn test_parent_equals_sum_of_children() {
        let data = sample();
        let refs: Vec<&OrderLine> = data.iter().collect();
        let builder = TreeBuilder::new(HierarchyLevel::DEFAULT_PATH.to_vec());

        let tree = builder.build(&refs);
        assert_sum_consistent(&tree);

        let root_total: f64 = tree.iter().map(|n| n.value).sum();
        assert!((root_total - calculate_subtotal(&refs)).abs() < 1e-9);

        // Central → Texas → Furniture → Chairs merges the two chair lines
        let chairs = &tree[0].children[1].children[0].children[0];
        assert_eq!(chairs.label, "Chairs");
        assert_eq!(chairs.level, 3);
        assert!((chairs.value - 150.75).abs() < 1e-9);
    }

    #[test]
    fn test_geographic_path_groups_by_city() {
        let data = vec![
            line_in("Central", "Texas", "Houston", "Furniture", "Chairs", 100.0),
            line_in("Central", "Texas", "Dallas", "Technology", "Phones", 30.5),
            line_in("Central", "Texas", "Houston", "Office Supplies", "Paper", 9.5),
            line_in("West", "California", "Los Angeles", "Furniture", "Tables", 60.0),
        ];
        let refs: Vec<&OrderLine> = data.iter().collect();
        let builder = TreeBuilder::new(HierarchyLevel::GEOGRAPHIC_PATH.to_vec());

        let tree = builder.build(&refs);
        assert_sum_consistent(&tree);

        let texas = &tree[0].children[0];
        assert_eq!(texas.label, "Texas");
        let cities: Vec<_> = texas.children.iter().map(|c| c.label.as_str()).collect();
        assert_eq!(cities, vec!["Dallas", "Houston"]);
        assert_eq!(texas.children[1].level, 2);
        assert!((texas.children[1].value - 109.5).abs() < 1e-9);
        assert!((tree[0].value - 140.0).abs() < 1e-9);
        assert!(texas.children.iter().all(|c| c.children.is_empty()));
    }

    #[test]
    fn test_flatten_ids_are_paths() {
        let data = sample();
        let refs: Vec<&OrderLine> = data.iter().collect();
        let builder = TreeBuilder::new(vec![HierarchyLevel::Region, HierarchyLevel::State]);

        let nodes = flatten_to_sunburst(&builder.build(&refs));
        let ids: Vec<_> = nodes.iter().map(|n| n.id.as_str()).collect();

        assert_eq!(
            ids,
            vec!["Central", "Central/Illinois", "Central/Texas", "West", "West/California"]
        );
        assert_eq!(nodes[0].parent, "");
        assert_eq!(nodes[2].parent, "Central");
    }

    #[test]
    fn test_empty_input() {
        let builder = TreeBuilder::new(HierarchyLevel::DEFAULT_PATH.to_vec());
        assert!(builder.build(&[]).is_empty());
    }
}
