use calamine::{open_workbook, Data, Range, Reader, Xlsx};
use chrono::{NaiveDate, NaiveDateTime};
use contracts::domain::a001_order_line::OrderLine;
use std::collections::{HashMap, HashSet};
use std::path::Path;

use super::{Dataset, LoadError};

const COL_ORDER_ID: &str = "Order ID";
const COL_ORDER_DATE: &str = "Order Date";
const COL_CATEGORY: &str = "Category";
const COL_SUB_CATEGORY: &str = "Sub-Category";
const COL_REGION: &str = "Region";
const COL_STATE: &str = "State";
const COL_CITY: &str = "City";
const COL_SALES: &str = "Sales";

/// Load the orders sheet and left-join the returns sheet on `Order ID`.
///
/// An order line is marked `returned` when its order id appears in the
/// returns sheet. Row order of the orders sheet is preserved.
pub fn load_dataset(
    path: &Path,
    orders_sheet: &str,
    returns_sheet: &str,
) -> Result<Dataset, LoadError> {
    if !path.exists() {
        return Err(LoadError::NotFound(path.display().to_string()));
    }

    let mut workbook: Xlsx<_> = open_workbook(path)?;
    let orders = sheet_range(&mut workbook, orders_sheet)?;
    let returns = sheet_range(&mut workbook, returns_sheet)?;

    let returned_ids = read_returned_ids(&returns, returns_sheet)?;
    let lines = read_order_lines(&orders, orders_sheet, &returned_ids)?;

    tracing::info!(
        "Loaded {} order lines from '{}' ({} returned order ids)",
        lines.len(),
        path.display(),
        returned_ids.len()
    );

    Ok(Dataset::new(lines))
}

fn sheet_range<R>(workbook: &mut Xlsx<R>, sheet: &str) -> Result<Range<Data>, LoadError>
where
    R: std::io::Read + std::io::Seek,
{
    if !workbook.sheet_names().iter().any(|name| name == sheet) {
        return Err(LoadError::SheetNotFound(sheet.to_string()));
    }
    Ok(workbook.worksheet_range(sheet)?)
}

/// Column positions by header name, taken from the first row
struct Header {
    sheet: String,
    columns: HashMap<String, usize>,
}

impl Header {
    fn read(range: &Range<Data>, sheet: &str) -> Self {
        let columns = range
            .rows()
            .next()
            .map(|row| {
                row.iter()
                    .enumerate()
                    .filter_map(|(idx, cell)| match cell {
                        Data::String(s) => Some((s.trim().to_string(), idx)),
                        _ => None,
                    })
                    .collect()
            })
            .unwrap_or_default();

        Self {
            sheet: sheet.to_string(),
            columns,
        }
    }

    fn index(&self, column: &str) -> Result<usize, LoadError> {
        self.columns
            .get(column)
            .copied()
            .ok_or_else(|| LoadError::MissingColumn {
                sheet: self.sheet.clone(),
                column: column.to_string(),
            })
    }

    fn invalid(&self, row: usize, column: &str, cell: &Data) -> LoadError {
        LoadError::InvalidValue {
            sheet: self.sheet.clone(),
            row,
            column: column.to_string(),
            value: cell.to_string(),
        }
    }
}

fn read_returned_ids(range: &Range<Data>, sheet: &str) -> Result<HashSet<String>, LoadError> {
    let header = Header::read(range, sheet);
    let id_col = header.index(COL_ORDER_ID)?;

    Ok(range
        .rows()
        .skip(1)
        .map(|row| cell_text(row.get(id_col)))
        .filter(|id| !id.is_empty())
        .collect())
}

fn read_order_lines(
    range: &Range<Data>,
    sheet: &str,
    returned_ids: &HashSet<String>,
) -> Result<Vec<OrderLine>, LoadError> {
    let header = Header::read(range, sheet);
    let order_id = header.index(COL_ORDER_ID)?;
    let order_date = header.index(COL_ORDER_DATE)?;
    let category = header.index(COL_CATEGORY)?;
    let sub_category = header.index(COL_SUB_CATEGORY)?;
    let region = header.index(COL_REGION)?;
    let state = header.index(COL_STATE)?;
    let city = header.index(COL_CITY)?;
    let sales = header.index(COL_SALES)?;

    let mut lines = Vec::with_capacity(range.height().saturating_sub(1));

    for (idx, row) in range.rows().enumerate().skip(1) {
        if row.iter().all(|cell| matches!(cell, Data::Empty)) {
            continue;
        }
        // 1-based, as shown in spreadsheet software
        let row_no = idx + 1;

        let date_cell = row.get(order_date).unwrap_or(&Data::Empty);
        let sales_cell = row.get(sales).unwrap_or(&Data::Empty);

        let id = cell_text(row.get(order_id));
        let returned = returned_ids.contains(&id);

        lines.push(OrderLine {
            order_id: id,
            order_date: cell_date(date_cell)
                .ok_or_else(|| header.invalid(row_no, COL_ORDER_DATE, date_cell))?,
            category: cell_text(row.get(category)),
            sub_category: cell_text(row.get(sub_category)),
            region: cell_text(row.get(region)),
            state: cell_text(row.get(state)),
            city: cell_text(row.get(city)),
            sales: cell_number(sales_cell)
                .ok_or_else(|| header.invalid(row_no, COL_SALES, sales_cell))?,
            returned,
        });
    }

    Ok(lines)
}

fn cell_text(cell: Option<&Data>) -> String {
    match cell {
        Some(Data::String(s)) => s.trim().to_string(),
        Some(Data::Float(f)) if f.fract() == 0.0 => format!("{:.0}", f),
        Some(Data::Empty) | None => String::new(),
        Some(other) => other.to_string(),
    }
}

fn cell_number(cell: &Data) -> Option<f64> {
    match cell {
        Data::Float(f) => Some(*f),
        Data::Int(i) => Some(*i as f64),
        Data::String(s) => s.trim().replace(',', "").parse().ok(),
        _ => None,
    }
}

fn cell_date(cell: &Data) -> Option<NaiveDate> {
    match cell {
        Data::DateTime(dt) => excel_serial_to_date(dt.as_f64()),
        Data::Float(f) => excel_serial_to_date(*f),
        Data::Int(i) => excel_serial_to_date(*i as f64),
        Data::DateTimeIso(s) | Data::String(s) => parse_date_text(s.trim()),
        _ => None,
    }
}

/// Excel serial day number (1900 date system) to a calendar date
pub fn excel_serial_to_date(serial: f64) -> Option<NaiveDate> {
    if !serial.is_finite() || serial < 1.0 {
        return None;
    }
    // Day 0 is 1899-12-30 once the fictional 1900-02-29 is accounted for
    let epoch = NaiveDate::from_ymd_opt(1899, 12, 30)?;
    let days = chrono::TimeDelta::try_days(serial.floor() as i64)?;
    epoch.checked_add_signed(days)
}

fn parse_date_text(s: &str) -> Option<NaiveDate> {
    const DATE_FORMATS: [&str; 3] = ["%Y-%m-%d", "%m/%d/%Y", "%d.%m.%Y"];
    const DATETIME_FORMATS: [&str; 3] = ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S%.f"];

    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(s, fmt).ok())
        .or_else(|| {
            DATETIME_FORMATS
                .iter()
                .find_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok())
                .map(|dt| dt.date())
        })
}
