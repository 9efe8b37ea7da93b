use serde::Serialize;
use std::fmt;

/// Canonical listing fields
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Field {
    Name,
    Price,
    Rating,
    Link,
}

impl Field {
    pub const ALL: [Field; 4] = [Field::Name, Field::Price, Field::Rating, Field::Link];

    pub fn as_str(&self) -> &'static str {
        match self {
            Field::Name => "Name",
            Field::Price => "Price",
            Field::Rating => "Rating",
            Field::Link => "Link",
        }
    }

    fn slot(self) -> usize {
        match self {
            Field::Name => 0,
            Field::Price => 1,
            Field::Rating => 2,
            Field::Link => 3,
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Which column carries each canonical field
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Schema {
    slots: [Option<usize>; 4],
}

impl Schema {
    /// Schema of the canonical `Name, Price, Rating, Link` layout
    pub fn canonical() -> Self {
        Self {
            slots: [Some(0), Some(1), Some(2), Some(3)],
        }
    }

    pub fn get(&self, field: Field) -> Option<usize> {
        self.slots[field.slot()]
    }

    fn set(&mut self, field: Field, column: usize) -> Option<usize> {
        self.slots[field.slot()].replace(column)
    }
}

/// Map a raw source header to a canonical field.
///
/// The header is trimmed, lowercased and stripped of spaces, then checked
/// for the name, price, rating and link markers in that order.
pub fn canonical_field(header: &str) -> Option<Field> {
    let key = header.trim().to_lowercase().replace(' ', "");

    if key.contains("mobile") || key.contains("name") || key.contains("model") {
        Some(Field::Name)
    } else if key.contains("price") {
        Some(Field::Price)
    } else if key.contains("rating") {
        Some(Field::Rating)
    } else if key.contains("link") {
        Some(Field::Link)
    } else {
        None
    }
}

/// Rename source headers to canonical fields.
///
/// Columns are visited in source order. When a later column maps to a field
/// an earlier column already claimed, the later column takes the field and
/// the earlier one falls back to its original header. Blank headers are
/// named `Unnamed: <idx>` and never claim a field.
pub fn normalize_headers(headers: &[String]) -> (Vec<String>, Schema) {
    let mut columns = headers.to_vec();
    let mut schema = Schema::default();

    for (idx, header) in headers.iter().enumerate() {
        if header.trim().is_empty() {
            columns[idx] = format!("Unnamed: {}", idx);
            continue;
        }

        let Some(field) = canonical_field(header) else {
            continue;
        };

        if let Some(previous) = schema.set(field, idx) {
            tracing::debug!(
                field = %field,
                replaced = %headers[previous],
                by = %header,
                "Multiple columns map to the same field, keeping the later one"
            );
            columns[previous] = headers[previous].clone();
        }
        columns[idx] = field.as_str().to_string();
    }

    (columns, schema)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn headers(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_canonical_field_markers() {
        assert_eq!(canonical_field("Mobile"), Some(Field::Name));
        assert_eq!(canonical_field("Product Name"), Some(Field::Name));
        assert_eq!(canonical_field(" MODEL "), Some(Field::Name));
        assert_eq!(canonical_field("Selling Price"), Some(Field::Price));
        assert_eq!(canonical_field("Avg Rating"), Some(Field::Rating));
        assert_eq!(canonical_field("Model Link"), Some(Field::Name));
        assert_eq!(canonical_field("URL Link"), Some(Field::Link));
        assert_eq!(canonical_field("Storage"), None);
    }

    #[test]
    fn test_spaces_are_stripped_before_matching() {
        assert_eq!(canonical_field("Pri ce"), Some(Field::Price));
        assert_eq!(canonical_field("Rat ing"), Some(Field::Rating));
    }

    #[test]
    fn test_normalize_headers_in_source_order() {
        let (columns, schema) =
            normalize_headers(&headers(&["Model", "RAM", "Price", "Stars Rating", "Link"]));
        assert_eq!(columns, headers(&["Name", "RAM", "Price", "Rating", "Link"]));
        assert_eq!(schema.get(Field::Name), Some(0));
        assert_eq!(schema.get(Field::Price), Some(2));
        assert_eq!(schema.get(Field::Rating), Some(3));
        assert_eq!(schema.get(Field::Link), Some(4));
    }

    #[test]
    fn test_later_duplicate_wins() {
        let (columns, schema) = normalize_headers(&headers(&["Brand Name", "Model", "Price"]));
        assert_eq!(schema.get(Field::Name), Some(1));
        assert_eq!(columns, headers(&["Brand Name", "Name", "Price"]));
    }

    #[test]
    fn test_blank_header_is_placeholder_only() {
        let (columns, schema) = normalize_headers(&headers(&["Model", " ", "Price"]));
        assert_eq!(columns, headers(&["Name", "Unnamed: 1", "Price"]));
        assert_eq!(schema.get(Field::Name), Some(0));
    }

    #[test]
    fn test_missing_fields_stay_unmapped() {
        let (_, schema) = normalize_headers(&headers(&["Phone", "Cost"]));
        assert_eq!(schema, Schema::default());
    }
}
