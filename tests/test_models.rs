//! Response decoding and variant selection parsing.

mod common;

use pasar_sdk::models::ApiResponse;
use pasar_sdk::VariantSelection;

// ---------------------------------------------------------------------------
// ApiResponse
// ---------------------------------------------------------------------------

#[test]
fn decodes_numbers_and_numeric_strings() {
    let resp: ApiResponse = serde_json::from_str(&common::sample_response_json()).unwrap();
    assert!(resp.is_success());
    assert_eq!(resp.data.len(), 2);
    assert_eq!(resp.data[0].daftar_harga[1].harga, 1100);
    assert_eq!(resp.data[1].variant_id, Some(9));
    assert_eq!(resp.data[1].daftar_harga[1].harga, 40000);
}

#[test]
fn malformed_or_null_price_decodes_to_zero() {
    let json = r#"{"status":"success","data":[{"variant_id":1,"variant":"Telur","daftarHarga":[
        {"date":"2024-03-04","harga":null},
        {"date":"2024-03-05","harga":"-"},
        {"date":"2024-03-06"}
    ]}]}"#;
    let resp: ApiResponse = serde_json::from_str(json).unwrap();
    let prices: Vec<i64> = resp.data[0].daftar_harga.iter().map(|e| e.harga).collect();
    assert_eq!(prices, vec![0, 0, 0]);
}

#[test]
fn unparseable_variant_id_is_none() {
    let json = r#"{"status":"success","data":[
        {"variant_id":"abc","variant":"Daging Sapi","daftarHarga":[]},
        {"variant":"Daging Ayam","daftarHarga":[]}
    ]}"#;
    let resp: ApiResponse = serde_json::from_str(json).unwrap();
    assert_eq!(resp.data[0].variant_id, None);
    assert_eq!(resp.data[1].variant_id, None);
}

#[test]
fn missing_data_and_price_list_default_to_empty() {
    let resp: ApiResponse = serde_json::from_str(r#"{"status":"success"}"#).unwrap();
    assert!(resp.data.is_empty());

    let resp: ApiResponse =
        serde_json::from_str(r#"{"status":"success","data":[{"variant_id":3,"variant":"Garam","daftarHarga":null}]}"#)
            .unwrap();
    assert!(resp.data[0].daftar_harga.is_empty());
}

#[test]
fn non_success_status_is_not_success() {
    let resp: ApiResponse =
        serde_json::from_str(r#"{"status":"error","message":"bad market"}"#).unwrap();
    assert!(!resp.is_success());
    assert_eq!(resp.message.as_deref(), Some("bad market"));
}

// ---------------------------------------------------------------------------
// VariantSelection
// ---------------------------------------------------------------------------

#[test]
fn parse_all_is_case_insensitive() {
    assert_eq!(VariantSelection::parse("All"), Some(VariantSelection::All));
    assert_eq!(VariantSelection::parse(" ALL "), Some(VariantSelection::All));
}

#[test]
fn parse_id_list() {
    assert_eq!(
        VariantSelection::parse("52, 9,13"),
        Some(VariantSelection::Ids(vec![52, 9, 13]))
    );
}

#[test]
fn parse_rejects_garbage_and_empty() {
    assert_eq!(VariantSelection::parse(""), None);
    assert_eq!(VariantSelection::parse("rice"), None);
    assert_eq!(VariantSelection::parse("52,,9"), None);
}

#[test]
fn all_param_is_full_default_list() {
    let param = VariantSelection::All.to_param();
    assert!(param.starts_with("37,13,38,39"));
    assert!(param.ends_with("56,40"));
    assert_eq!(param.split(',').count(), 57);
}
