use std::time::Duration;

pub const API_URL: &str =
    "https://api-sp2kp.kemendag.go.id/report/api/average-price/export-area-daily-json";

pub const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/91.0";

/// Every commodity the Bondowoso report tracks, in upstream order.
pub const ALL_VARIANT_IDS: &[u32] = &[
    37, 13, 38, 39, 29, 52, 51, 9, 2, 11, 10, 6, 43, 27, 49, 50, 22, 53, 19, 21, 41, 14, 15, 24,
    30, 23, 20, 34, 55, 46, 4, 45, 48, 58, 28, 8, 57, 47, 12, 3, 42, 16, 17, 18, 7, 54, 5, 32, 33,
    31, 35, 44, 25, 36, 26, 56, 40,
];

pub const DEFAULT_CSV_FILE: &str = "bondowoso_prices.csv";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(20);
pub const DEFAULT_WINDOW_DAYS: i64 = 4;
pub const DEFAULT_TITLE: &str = "Harga Pangan Kabupaten Bondowoso";

/// Header of the two fixed table columns.
pub const VAR_ID_COLUMN: &str = "Var ID";
pub const VARIANT_NAME_COLUMN: &str = "Variant Name";

pub fn variant_ids_param(ids: &[u32]) -> String {
    ids.iter()
        .map(|id| id.to_string())
        .collect::<Vec<_>>()
        .join(",")
}

/// Region and market identifiers sent with every request.
///
/// The default targets Pasar Induk in Kabupaten Bondowoso (East Java).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarketParams {
    pub level: String,
    pub province_code: String,
    pub regency_code: String,
    pub market_id: String,
    pub skip_weekends: bool,
    pub commodity_type: String,
}

impl Default for MarketParams {
    fn default() -> Self {
        Self {
            level: "3".into(),
            province_code: "35".into(),
            regency_code: "3511".into(),
            market_id: "406".into(),
            skip_weekends: true,
            commodity_type: "1".into(),
        }
    }
}

impl MarketParams {
    /// Multipart field names and values, in the order the API documents them.
    pub fn fields(&self) -> Vec<(&'static str, String)> {
        vec![
            ("level", self.level.clone()),
            ("kode_provinsi", self.province_code.clone()),
            ("kode_kab_kota", self.regency_code.clone()),
            ("pasar_id", self.market_id.clone()),
            ("skip_sat_sun", self.skip_weekends.to_string()),
            ("tipe_komoditas", self.commodity_type.clone()),
        ]
    }
}
