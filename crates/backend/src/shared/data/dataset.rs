use contracts::dashboards::d400_sales_overview::{CatalogOption, Catalogs, ALL};
use contracts::domain::a001_order_line::OrderLine;

/// Merged order lines in workbook row order. Never mutated after load.
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    lines: Vec<OrderLine>,
}

impl Dataset {
    pub fn new(lines: Vec<OrderLine>) -> Self {
        Self { lines }
    }

    pub fn lines(&self) -> &[OrderLine] {
        &self.lines
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn returned_count(&self) -> usize {
        self.lines.iter().filter(|l| l.returned).count()
    }

    /// Category and region option lists, "All" first, then distinct values
    /// in order of first appearance
    pub fn catalogs(&self) -> Catalogs {
        Catalogs {
            categories: catalog("All Categories", self.lines.iter().map(|l| l.category.as_str())),
            regions: catalog("All Regions", self.lines.iter().map(|l| l.region.as_str())),
        }
    }
}

fn catalog<'a>(all_label: &str, values: impl Iterator<Item = &'a str>) -> Vec<CatalogOption> {
    let mut options = vec![CatalogOption {
        label: all_label.to_string(),
        value: ALL.to_string(),
    }];
    for value in values {
        if !options.iter().skip(1).any(|o| o.value == value) {
            options.push(CatalogOption {
                label: value.to_string(),
                value: value.to_string(),
            });
        }
    }
    options
}
