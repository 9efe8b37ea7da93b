//! In-memory listing table
//!
//! A [`Table`] keeps every column of the source sheet in its original order,
//! plus a schema that points the four canonical fields (`Name`, `Price`,
//! `Rating`, `Link`) at the columns that carry them. Tables are immutable once
//! built; query results are new tables holding copies of the selected rows.

pub mod loader;
pub mod price;
pub mod query;
pub mod schema;

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fmt;
use std::path::{Path, PathBuf};

pub use loader::{load, load_sheet, try_load};
pub use query::{classify, resolve, Intent};
pub use schema::Field;

use crate::config::InventoryConfig;
use crate::error::LoadError;

/// A single spreadsheet cell after loading
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Cell {
    Empty,
    Text(String),
    Number(f64),
}

impl Cell {
    /// Text form of the cell, `None` when empty
    ///
    /// Numbers use Rust's shortest form, so `8.0` reads as `"8"` (not
    /// `"8.0"`) when names are matched against query words.
    pub fn as_text(&self) -> Option<String> {
        match self {
            Cell::Empty => None,
            Cell::Text(s) => Some(s.clone()),
            Cell::Number(n) => Some(n.to_string()),
        }
    }

    /// Numeric value of the cell; text is parsed leniently, nothing else is coerced
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Cell::Number(n) if n.is_finite() => Some(*n),
            Cell::Text(s) => s.trim().parse::<f64>().ok().filter(|n| n.is_finite()),
            _ => None,
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, Cell::Empty)
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Cell::Empty => write!(f, "NaN"),
            Cell::Text(s) => write!(f, "{}", s),
            Cell::Number(n) if n.is_finite() && n.fract() == 0.0 => write!(f, "{:.1}", n),
            Cell::Number(n) => write!(f, "{}", n),
        }
    }
}

/// Listing table with a normalized schema
#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    columns: Vec<String>,
    schema: schema::Schema,
    rows: Vec<Vec<Cell>>,
}

impl Table {
    /// Empty table with only the canonical columns
    pub fn empty() -> Self {
        let columns = Field::ALL.iter().map(|f| f.as_str().to_string()).collect();
        Self {
            columns,
            schema: schema::Schema::canonical(),
            rows: Vec::new(),
        }
    }

    /// Build a table from raw source headers and rows.
    ///
    /// Headers are renamed to canonical fields and the price column is
    /// cleaned into numbers. Short rows are padded with empty cells.
    pub fn from_source(headers: Vec<String>, rows: Vec<Vec<Cell>>) -> Self {
        let (columns, schema) = schema::normalize_headers(&headers);
        let width = columns.len();

        let rows = rows
            .into_iter()
            .map(|mut row| {
                row.resize(width, Cell::Empty);
                if let Some(idx) = schema.get(Field::Price) {
                    row[idx] = match price::clean_price(&row[idx]) {
                        Some(value) => Cell::Number(value),
                        None => Cell::Empty,
                    };
                }
                row
            })
            .collect();

        Self {
            columns,
            schema,
            rows,
        }
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Column index carrying a canonical field, if the source had one
    pub fn column_of(&self, field: Field) -> Option<usize> {
        self.schema.get(field)
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn row(&self, index: usize) -> Option<Row<'_>> {
        self.rows.get(index).map(|cells| Row { table: self, cells })
    }

    pub fn rows(&self) -> impl Iterator<Item = Row<'_>> + '_ {
        self.rows.iter().map(move |cells| Row { table: self, cells })
    }

    /// New table with the given rows, in the given order, over the same columns
    pub fn select<I>(&self, indices: I) -> Table
    where
        I: IntoIterator<Item = usize>,
    {
        let rows = indices
            .into_iter()
            .filter_map(|idx| self.rows.get(idx).cloned())
            .collect();

        Table {
            columns: self.columns.clone(),
            schema: self.schema.clone(),
            rows,
        }
    }
}

impl Default for Table {
    fn default() -> Self {
        Self::empty()
    }
}

/// Borrowed view of one table row
#[derive(Debug, Clone, Copy)]
pub struct Row<'a> {
    table: &'a Table,
    cells: &'a [Cell],
}

impl<'a> Row<'a> {
    pub fn cells(&self) -> &'a [Cell] {
        self.cells
    }

    pub fn get(&self, field: Field) -> Option<&'a Cell> {
        self.table
            .column_of(field)
            .and_then(|idx| self.cells.get(idx))
    }

    pub fn name(&self) -> Option<String> {
        self.get(Field::Name).and_then(Cell::as_text)
    }

    pub fn price(&self) -> Option<f64> {
        self.get(Field::Price).and_then(Cell::as_number)
    }

    pub fn rating(&self) -> Option<f64> {
        self.get(Field::Rating).and_then(Cell::as_number)
    }

    pub fn link(&self) -> Option<String> {
        self.get(Field::Link)
            .and_then(Cell::as_text)
            .filter(|link| !link.trim().is_empty())
    }
}

/// Loaded table plus where and when it came from
#[derive(Debug, Clone)]
pub struct Inventory {
    pub table: Table,
    pub source: PathBuf,
    pub loaded_at: DateTime<Utc>,
}

impl Inventory {
    /// Load the configured source, degrading to an empty table on failure
    pub fn load(config: &InventoryConfig) -> Self {
        Self::from_table(
            &config.path,
            loader::load_sheet(&config.path, config.sheet.as_deref()),
        )
    }

    /// Load the configured source, reporting failures instead of degrading
    pub fn try_load(config: &InventoryConfig) -> Result<Self, LoadError> {
        let table = loader::try_load(&config.path, config.sheet.as_deref())?;
        Ok(Self::from_table(&config.path, table))
    }

    pub fn from_table(source: &Path, table: Table) -> Self {
        Self {
            table,
            source: source.to_path_buf(),
            loaded_at: Utc::now(),
        }
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::*;

    /// Table with a Model / Price / Rating / Link sheet layout
    pub fn phones(rows: &[(&str, &str, Option<f64>, &str)]) -> Table {
        let headers = vec![
            "Mobile Model".to_string(),
            "Price (₹)".to_string(),
            "Rating".to_string(),
            "Buy Link".to_string(),
        ];
        let rows = rows
            .iter()
            .map(|(name, price, rating, link)| {
                vec![
                    Cell::Text(name.to_string()),
                    Cell::Text(price.to_string()),
                    rating.map(Cell::Number).unwrap_or(Cell::Empty),
                    if link.is_empty() {
                        Cell::Empty
                    } else {
                        Cell::Text(link.to_string())
                    },
                ]
            })
            .collect();
        Table::from_source(headers, rows)
    }
}
