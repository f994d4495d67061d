use serde_json::{Map, Value};

// ---------------------------------------------------------------------------
// Document
// ---------------------------------------------------------------------------

/// A stored record: its identity plus a loosely-typed field map.
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    pub id: String,
    pub fields: Map<String, Value>,
}

impl Document {
    pub fn new(id: impl Into<String>, fields: Map<String, Value>) -> Self {
        Self { id: id.into(), fields }
    }

    /// Builds a document from a JSON object literal. Non-object values yield an empty field map.
    pub fn from_json(id: impl Into<String>, value: Value) -> Self {
        let fields = match value {
            Value::Object(map) => map,
            _ => Map::new(),
        };
        Self::new(id, fields)
    }

    pub fn get(&self, field: &str) -> Option<&Value> {
        self.fields.get(field)
    }
}

// ---------------------------------------------------------------------------
// Field lists
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Integer,
    Real,
}

impl std::fmt::Display for FieldKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FieldKind::Integer => write!(f, "integer"),
            FieldKind::Real => write!(f, "real"),
        }
    }
}

/// A collection and the fields the pass coerces in each of its records.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CollectionSpec {
    pub name: &'static str,
    pub fields: &'static [(&'static str, FieldKind)],
}

pub const COINS: CollectionSpec = CollectionSpec {
    name: "coins",
    fields: &[
        ("rank", FieldKind::Integer),
        ("available_supply", FieldKind::Integer),
        ("total_supply", FieldKind::Integer),
        ("last_updated", FieldKind::Integer),
        ("price_usd", FieldKind::Real),
        ("24h_volume_usd", FieldKind::Real),
        ("market_cap_usd", FieldKind::Real),
    ],
};

pub const CURRENCIES: CollectionSpec = CollectionSpec {
    name: "currencies",
    fields: &[("last_updated", FieldKind::Integer)],
};

pub const MARKETCAP: CollectionSpec = CollectionSpec {
    name: "marketcap",
    fields: &[
        ("active_currencies", FieldKind::Integer),
        ("active_assets", FieldKind::Integer),
        ("active_markets", FieldKind::Integer),
        ("last_updated", FieldKind::Integer),
        ("timestamp", FieldKind::Integer),
        ("total_market_cap_usd", FieldKind::Real),
        ("total_24h_volume_usd", FieldKind::Real),
        ("bitcoin_percentage_of_market_cap", FieldKind::Real),
    ],
};

/// Collections in the order the pass visits them.
pub const ALL_COLLECTIONS: [CollectionSpec; 3] = [COINS, CURRENCIES, MARKETCAP];
