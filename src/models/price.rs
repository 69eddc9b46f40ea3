use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

// ---------------------------------------------------------------------------
// ApiResponse — Envelope returned by the daily export endpoint
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse {
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub data: Vec<VariantPrices>,
}

impl ApiResponse {
    /// `true` when the application-level status flag reads `"success"`.
    pub fn is_success(&self) -> bool {
        self.status.as_deref() == Some("success")
    }
}

// ---------------------------------------------------------------------------
// VariantPrices — One commodity with its daily price list
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VariantPrices {
    /// `None` when the upstream id is missing or not a non-negative integer.
    #[serde(default, deserialize_with = "lenient_u32")]
    pub variant_id: Option<u32>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub variant: String,
    #[serde(rename = "daftarHarga", default, deserialize_with = "null_as_default")]
    pub daftar_harga: Vec<PriceEntry>,
}

// ---------------------------------------------------------------------------
// PriceEntry — Single (date, price) observation
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceEntry {
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default, deserialize_with = "lenient_price")]
    pub harga: i64,
}

impl PriceEntry {
    pub fn new(date: &str, harga: i64) -> Self {
        Self {
            date: Some(date.to_string()),
            harga,
        }
    }
}

// ---------------------------------------------------------------------------
// Lenient field decoding
// ---------------------------------------------------------------------------

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Accepts `12`, `"12"`, `12.0`; anything else decodes to `None`.
fn lenient_u32<'de, D>(deserializer: D) -> Result<Option<u32>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(value_to_i64(&value).and_then(|v| u32::try_from(v).ok()))
}

/// Prices arrive as integers, floats or numeric strings. Malformed or
/// missing values become 0 rather than failing the whole response.
fn lenient_price<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(value_to_i64(&value).unwrap_or(0))
}

fn value_to_i64(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64().or_else(|| n.as_f64().and_then(float_to_i64)),
        Value::String(s) => {
            let s = s.trim();
            s.parse::<i64>()
                .ok()
                .or_else(|| s.parse::<f64>().ok().and_then(float_to_i64))
        }
        _ => None,
    }
}

/// Truncates toward zero; NaN, infinities and out-of-range values are `None`.
fn float_to_i64(f: f64) -> Option<i64> {
    // i64::MAX as f64 rounds up to 2^63, so the upper bound is exclusive.
    if f.is_finite() && f >= i64::MIN as f64 && f < i64::MAX as f64 {
        Some(f.trunc() as i64)
    } else {
        None
    }
}
