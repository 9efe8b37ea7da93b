/// End-to-end tests: load a listings file, resolve queries, render replies
use phone_finder::{
    handlers::ask::reply_for,
    inventory::{self, query, Field, Intent, Table},
    render,
};
use std::io::Write;

const LISTINGS: &str = "\
Mobile Name,Price,Rating,Product Link,Colour
Samsung Galaxy S23,\"₹74,999\",4.5,https://shop.example/s23,Black
iPhone 15,\"₹79,900.00\",4.7,https://shop.example/ip15,Blue
Redmi Note 13,\"₹17,999\",4.2,,White
SAMSUNG Galaxy A14,\"₹13,499\",4.0,https://shop.example/a14,Green
Nothing Phone 2,N/A,4.4,,White
OnePlus 12,\"₹64,999\",,https://shop.example/op12,Green
Samsung Galaxy M34,\"₹16,999\",4.1,,Blue
Realme Narzo 60,\"₹15,999\",3.8,,Black
";

fn load_fixture() -> (tempfile::NamedTempFile, Table) {
    let mut file = tempfile::Builder::new().suffix(".csv").tempfile().unwrap();
    file.write_all(LISTINGS.as_bytes()).unwrap();
    file.flush().unwrap();
    let table = inventory::load(file.path());
    (file, table)
}

fn names(table: &Table) -> Vec<String> {
    table.rows().filter_map(|r| r.name()).collect()
}

#[test]
fn test_fixture_schema_is_normalized() {
    let (_file, table) = load_fixture();

    assert_eq!(table.len(), 8);
    assert_eq!(table.columns(), &["Name", "Price", "Rating", "Link", "Colour"]);
    assert_eq!(table.row(1).unwrap().price(), Some(79900.0));
    assert_eq!(table.row(4).unwrap().price(), None);
    assert_eq!(table.row(5).unwrap().rating(), None);
}

#[test]
fn test_price_queries_bound_and_order() {
    let (_file, table) = load_fixture();

    for q in ["cheap", "Budget phone", "LOW price"] {
        let result = inventory::resolve(&table, q);
        assert!(result.len() <= 5);
        let prices: Vec<f64> = result.rows().filter_map(|r| r.price()).collect();
        assert!(prices.windows(2).all(|w| w[0] <= w[1]), "{}", q);

        let cutoff = prices.last().copied().unwrap();
        let returned = names(&result);
        for row in table.rows() {
            if let (Some(price), Some(name)) = (row.price(), row.name()) {
                if !returned.contains(&name) {
                    assert!(price >= cutoff);
                }
            }
        }
    }

    for q in ["premium", "most expensive", "high end"] {
        let result = inventory::resolve(&table, q);
        assert!(result.len() <= 5);
        let prices: Vec<f64> = result.rows().filter_map(|r| r.price()).collect();
        assert!(prices.windows(2).all(|w| w[0] >= w[1]), "{}", q);
        assert_eq!(names(&result)[0], "iPhone 15");
    }
}

#[test]
fn test_rating_query() {
    let (_file, table) = load_fixture();
    let result = inventory::resolve(&table, "best rating");

    assert_eq!(result.len(), 5);
    assert_eq!(
        names(&result),
        [
            "iPhone 15",
            "Samsung Galaxy S23",
            "Nothing Phone 2",
            "Redmi Note 13",
            "Samsung Galaxy M34"
        ]
    );
}

#[test]
fn test_priority_beats_brand() {
    let (_file, table) = load_fixture();
    assert_eq!(query::classify("cheap iphone"), Intent::Cheapest);

    let result = inventory::resolve(&table, "cheap iphone");
    assert_eq!(names(&result)[0], "SAMSUNG Galaxy A14");
}

#[test]
fn test_brand_query_case_insensitive() {
    let (_file, table) = load_fixture();

    let lower = inventory::resolve(&table, "samsung");
    let upper = inventory::resolve(&table, "SAMSUNG");
    assert_eq!(lower, upper);
    assert_eq!(
        names(&lower),
        ["Samsung Galaxy S23", "SAMSUNG Galaxy A14", "Samsung Galaxy M34"]
    );
}

#[test]
fn test_unmatched_query_reply() {
    let (_file, table) = load_fixture();

    assert!(inventory::resolve(&table, "xyz123").is_empty());
    assert_eq!(reply_for(&table, "xyz123", 5), render::NO_MATCH_REPLY);
    assert_eq!(reply_for(&table, "", 5), render::EMPTY_MESSAGE_REPLY);
}

#[test]
fn test_reply_renders_links_and_extra_columns() {
    let (_file, table) = load_fixture();
    let reply = reply_for(&table, "galaxy", 5);

    assert!(reply.starts_with(render::RESULTS_PREAMBLE));
    assert!(reply.contains("<th>Colour</th>"));
    assert!(reply.contains("href=\"https://shop.example/a14\""));
    assert_eq!(reply.matches("Open</a>").count(), 2);
}

#[test]
fn test_missing_source_serves_empty_table() {
    let table = inventory::load("/definitely/not/here/phones.xlsx");

    assert_eq!(table.len(), 0);
    for field in Field::ALL {
        assert!(table.column_of(field).is_some());
    }
    assert_eq!(reply_for(&table, "cheap", 5), render::NO_MATCH_REPLY);
}
