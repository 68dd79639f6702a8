use serde::Deserialize;
use serde_json::Value;

pub const INSUFFICIENT_CAPACITY: &str = "insufficient";

/// One marketplace listing. Every field is optional upstream, so values are kept
/// loosely typed and rendered on demand.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct StoreItem {
    #[serde(default)]
    pub id: Option<Value>,
    #[serde(default)]
    pub name: Option<Value>,
    #[serde(default)]
    pub location: Option<Value>,
    #[serde(default)]
    pub price: Option<Value>,
}

impl StoreItem {
    /// Cache key for the item, or `None` when the id is absent or falsy
    /// (null, empty string, zero, `false`).
    pub fn item_key(&self) -> Option<ItemKey> {
        match self.id.as_ref()? {
            Value::String(s) if !s.is_empty() => Some(ItemKey::Text(s.clone())),
            Value::Number(n) if n.as_f64() != Some(0.0) => Some(ItemKey::Number(number_key(n))),
            Value::Bool(true) => Some(ItemKey::Number("1".to_string())),
            _ => None,
        }
    }

    pub fn display_name(&self) -> String {
        render(&self.name).unwrap_or_else(|| "Unknown item".to_string())
    }

    pub fn location(&self) -> String {
        render(&self.location).unwrap_or_default()
    }

    pub fn price(&self) -> String {
        render(&self.price).unwrap_or_else(|| "N/A".to_string())
    }
}

/// Identity of a store item. Textual and numeric ids never collide, so `"42"`
/// and `42` are distinct items; `42` and `42.0` are the same one.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ItemKey {
    Text(String),
    Number(String),
}

impl std::fmt::Display for ItemKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ItemKey::Text(s) => write!(f, "{:?}", s),
            ItemKey::Number(n) => f.write_str(n),
        }
    }
}

fn number_key(n: &serde_json::Number) -> String {
    if let Some(i) = n.as_i64() {
        return i.to_string();
    }
    if let Some(u) = n.as_u64() {
        return u.to_string();
    }
    match n.as_f64() {
        Some(f) if f.fract() == 0.0 && f.abs() < 9.0e15 => format!("{}", f as i64),
        _ => n.to_string(),
    }
}

/// Python-style truthiness for loosely typed flags.
fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().map_or(true, |f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(items) => !items.is_empty(),
        Value::Object(fields) => !fields.is_empty(),
    }
}

/// Keeps an explicit `null` as `Some(Value::Null)` so it differs from a missing key.
fn present<'de, D>(deserializer: D) -> Result<Option<Value>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Value::deserialize(deserializer).map(Some)
}

fn render(value: &Option<Value>) -> Option<String> {
    match value.as_ref()? {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RegionRef {
    #[serde(default)]
    pub display: Option<Value>,
}

/// Capacity state for a single region inside a region group.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RegionDetail {
    /// Entitlement flag; any truthy value counts.
    #[serde(default)]
    pub equity: Option<Value>,
    /// `None` only when the key is missing, which reads as `insufficient`.
    #[serde(default, deserialize_with = "present")]
    pub capacity: Option<Value>,
    #[serde(default)]
    pub region: Option<RegionRef>,
}

impl RegionDetail {
    pub fn is_entitled(&self) -> bool {
        self.equity.as_ref().map_or(false, is_truthy)
    }

    pub fn capacity_status(&self) -> String {
        match &self.capacity {
            None => INSUFFICIENT_CAPACITY.to_string(),
            Some(Value::String(s)) => s.clone(),
            Some(other) => other.to_string(),
        }
    }

    /// Entitled and capacity anything other than the string `insufficient`.
    pub fn is_available(&self) -> bool {
        let insufficient = match &self.capacity {
            None => true,
            Some(Value::String(s)) => s == INSUFFICIENT_CAPACITY,
            Some(_) => false,
        };
        self.is_entitled() && !insufficient
    }

    pub fn region_name(&self) -> String {
        self.region
            .as_ref()
            .and_then(|r| render(&r.display))
            .unwrap_or_else(|| "Unknown region".to_string())
    }
}
