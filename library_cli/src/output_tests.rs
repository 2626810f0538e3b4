use serde_json::json;

use super::*;

fn authors_fixture() -> Value {
    json!([
        {"id": "1", "firstName": "Stephen", "lastName": "King", "genre": "Horror"},
        {"id": "2", "firstName": "Neil", "lastName": "Gaiman", "genre": "Fantasy"}
    ])
}

fn linked_fixture() -> Value {
    json!({
        "value": [
            {
                "firstName": "Stephen",
                "links": [
                    {"href": "http://localhost:5000/api/authors/1", "rel": "self", "method": "GET"},
                    {"href": "http://localhost:5000/api/authors/1", "rel": "delete_author", "method": "DELETE"}
                ]
            }
        ],
        "links": [
            {"href": "http://localhost:5000/api/authors?pageNumber=1&pageSize=10", "rel": "self", "method": "GET"}
        ]
    })
}

// -- Format selection --

#[test]
fn test_output_format_parse() {
    assert_eq!(OutputFormat::parse("table"), OutputFormat::Table);
    assert_eq!(OutputFormat::parse("csv"), OutputFormat::Csv);
    assert_eq!(OutputFormat::parse("xml"), OutputFormat::Xml);
    assert_eq!(OutputFormat::parse("json"), OutputFormat::Json);
    assert_eq!(OutputFormat::parse("yaml"), OutputFormat::Json);
}

// -- Row builder tests --

#[test]
fn test_build_rows_from_list() {
    let (columns, rows) = build_rows(&authors_fixture());
    assert_eq!(columns, vec!["id", "firstName", "lastName", "genre"]);
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[1], vec!["2", "Neil", "Gaiman", "Fantasy"]);
}

#[test]
fn test_build_rows_from_linked_collection() {
    let (columns, rows) = build_rows(&linked_fixture());
    assert_eq!(columns, vec!["firstName", "links"]);
    assert_eq!(rows[0], vec!["Stephen", "self delete_author"]);
}

#[test]
fn test_build_rows_from_single_resource() {
    let (columns, rows) = build_rows(&json!({"title": "It", "description": null}));
    assert_eq!(columns, vec!["title", "description"]);
    assert_eq!(rows, vec![vec!["It".to_string(), String::new()]]);
}

#[test]
fn test_build_rows_empty() {
    let (columns, rows) = build_rows(&json!([]));
    assert!(columns.is_empty());
    assert!(rows.is_empty());
}

#[test]
fn test_cell_formats_numbers() {
    assert_eq!(cell(Some(&json!(12))), "12");
    assert_eq!(cell(Some(&json!(true))), "true");
    assert_eq!(cell(None), "");
}

// -- Rendered output --

#[test]
fn test_render_table_contains_values() {
    let table = render(&authors_fixture(), &OutputFormat::Table).unwrap();
    assert!(table.contains("firstName"));
    assert!(table.contains("Gaiman"));
}

#[test]
fn test_render_csv() {
    let csv = render(&authors_fixture(), &OutputFormat::Csv).unwrap();
    let lines: Vec<&str> = csv.lines().collect();
    assert_eq!(lines[0], "id,firstName,lastName,genre");
    assert_eq!(lines[1], "1,Stephen,King,Horror");
    assert_eq!(lines.len(), 3);
}

#[test]
fn test_render_csv_empty() {
    assert_eq!(render(&json!([]), &OutputFormat::Csv).unwrap(), "");
}

#[test]
fn test_render_json_preserves_field_order() {
    let json = render(&authors_fixture(), &OutputFormat::Json).unwrap();
    let first = json.find("\"firstName\"").unwrap();
    let last = json.find("\"lastName\"").unwrap();
    assert!(first < last);
}
