//! PriceTable reshape, filtering, text view, and CSV persistence.

mod common;

use pasar_sdk::{PasarError, PriceEntry, PriceTable, VariantPrices};

// ---------------------------------------------------------------------------
// from_variants
// ---------------------------------------------------------------------------

#[test]
fn empty_input_yields_table_without_columns() {
    let table = PriceTable::from_variants(&[]);
    assert!(table.is_empty());
    assert!(table.columns().is_empty());
    assert!(table.dates().is_empty());
}

#[test]
fn rows_and_columns_match_variants_and_distinct_dates() {
    let table = PriceTable::from_variants(&common::sample_variants());
    assert_eq!(table.len(), 2);
    assert_eq!(
        table.columns(),
        vec!["Var ID", "Variant Name", "2024-03-04", "2024-03-05", "2024-03-06"]
    );
}

#[test]
fn date_columns_sorted_ascending() {
    let table = PriceTable::from_variants(&common::sample_variants());
    let mut sorted = table.dates().to_vec();
    sorted.sort();
    assert_eq!(table.dates(), sorted.as_slice());
}

#[test]
fn missing_price_defaults_to_zero() {
    let table = PriceTable::from_variants(&common::sample_variants());
    let cabe = &table.rows()[1];
    assert_eq!(cabe.variant_name, "Cabe Merah");
    assert_eq!(table.price(cabe, "2024-03-05"), Some(0));
    assert_eq!(cabe.prices, vec![45000, 0, 40000]);
}

#[test]
fn row_order_follows_input_order() {
    let mut items = common::sample_variants();
    items.reverse();
    let table = PriceTable::from_variants(&items);
    assert_eq!(table.rows()[0].variant_id, Some(9));
    assert_eq!(table.rows()[1].variant_id, Some(52));
}

#[test]
fn later_duplicate_date_wins() {
    let items = vec![VariantPrices {
        variant_id: Some(1),
        variant: "Gula Pasir".into(),
        daftar_harga: vec![
            PriceEntry::new("2024-03-04", 100),
            PriceEntry::new("2024-03-04", 150),
        ],
    }];
    let table = PriceTable::from_variants(&items);
    assert_eq!(table.dates(), ["2024-03-04".to_string()]);
    assert_eq!(table.rows()[0].prices, vec![150]);
}

#[test]
fn entries_without_date_are_skipped() {
    let items = vec![VariantPrices {
        variant_id: Some(1),
        variant: "Gula Pasir".into(),
        daftar_harga: vec![PriceEntry { date: None, harga: 10 }],
    }];
    let table = PriceTable::from_variants(&items);
    assert_eq!(table.len(), 1);
    assert_eq!(table.columns(), vec!["Var ID", "Variant Name"]);
}

#[test]
fn price_of_unknown_date_is_none() {
    let table = PriceTable::from_variants(&common::sample_variants());
    assert_eq!(table.price(&table.rows()[0], "2024-03-09"), None);
    assert!(!table.has_date("2024-03-09"));
    assert!(table.has_column("Variant Name"));
}

// ---------------------------------------------------------------------------
// filter_names / variant_names
// ---------------------------------------------------------------------------

#[test]
fn filter_names_keeps_selected_rows_and_all_dates() {
    let table = PriceTable::from_variants(&common::sample_variants());
    let filtered = table.filter_names(&["Cabe Merah"]);
    assert_eq!(filtered.len(), 1);
    assert_eq!(filtered.rows()[0].variant_id, Some(9));
    assert_eq!(filtered.dates(), table.dates());
}

#[test]
fn filter_names_with_empty_selection_is_empty() {
    let table = PriceTable::from_variants(&common::sample_variants());
    let none: [&str; 0] = [];
    let filtered = table.filter_names(&none);
    assert!(filtered.is_empty());
    assert!(filtered.columns().is_empty());
}

#[test]
fn variant_names_are_unique_in_row_order() {
    let mut items = common::sample_variants();
    items.push(items[0].clone());
    let table = PriceTable::from_variants(&items);
    assert_eq!(table.variant_names(), vec!["Beras Medium", "Cabe Merah"]);
}

// ---------------------------------------------------------------------------
// to_text
// ---------------------------------------------------------------------------

#[test]
fn to_text_renders_selected_columns() {
    let table = PriceTable::from_variants(&common::sample_variants());
    let text = table
        .to_text(&["Variant Name", "2024-03-04", "2024-03-06"])
        .unwrap();
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines.len(), 3);
    assert!(lines[0].starts_with("Variant Name"));
    assert!(lines[1].starts_with("Beras Medium"));
    assert!(lines[1].ends_with("1200"));
    assert!(lines[2].ends_with("40000"));
}

#[test]
fn to_text_rejects_unknown_column() {
    let table = PriceTable::from_variants(&common::sample_variants());
    let err = table.to_text(&["Variant Name", "1999-01-01"]).unwrap_err();
    assert!(matches!(err, PasarError::MissingColumn(c) if c == "1999-01-01"));
}

// ---------------------------------------------------------------------------
// CSV
// ---------------------------------------------------------------------------

#[test]
fn csv_has_header_row_and_one_line_per_row() {
    let tmp = tempfile::tempdir().unwrap();
    let path = tmp.path().join("prices.csv");
    let table = PriceTable::from_variants(&common::sample_variants());
    table.write_csv(&path).unwrap();

    let text = std::fs::read_to_string(&path).unwrap();
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(
        lines[0],
        "Var ID,Variant Name,2024-03-04,2024-03-05,2024-03-06"
    );
    assert_eq!(lines[1], "52,Beras Medium,1000,1100,1200");
    assert_eq!(lines[2], "9,Cabe Merah,45000,0,40000");

    assert_eq!(PriceTable::read_csv(&path).unwrap(), table);
}

#[test]
fn unknown_variant_id_is_written_as_empty_cell() {
    let tmp = tempfile::tempdir().unwrap();
    let path = tmp.path().join("prices.csv");
    let items = vec![VariantPrices {
        variant_id: None,
        variant: "Daging Sapi".into(),
        daftar_harga: vec![PriceEntry::new("2024-03-04", 130000)],
    }];
    let table = PriceTable::from_variants(&items);
    table.write_csv(&path).unwrap();

    let text = std::fs::read_to_string(&path).unwrap();
    assert_eq!(text.lines().nth(1), Some(",Daging Sapi,130000"));
    assert_eq!(PriceTable::read_csv(&path).unwrap().rows()[0].variant_id, None);
}

#[test]
fn read_csv_coerces_malformed_prices_to_zero() {
    let tmp = tempfile::tempdir().unwrap();
    let path = tmp.path().join("prices.csv");
    std::fs::write(
        &path,
        "Var ID,Variant Name,2024-03-04\n52,Beras Medium,n/a\n",
    )
    .unwrap();
    let table = PriceTable::read_csv(&path).unwrap();
    assert_eq!(table.rows()[0].prices, vec![0]);
}

#[test]
fn read_csv_rejects_foreign_header() {
    let tmp = tempfile::tempdir().unwrap();
    let path = tmp.path().join("other.csv");
    std::fs::write(&path, "id,name\n1,x\n").unwrap();
    assert!(matches!(
        PriceTable::read_csv(&path),
        Err(PasarError::InvalidArgument(_))
    ));
}
