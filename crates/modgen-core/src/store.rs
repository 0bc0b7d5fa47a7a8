//! In-memory record store backing generated modules
//!
//! [`ModuleStore`] is the native model of the service layer that every generated
//! module ships with. The generated `service.ts` follows the same rules, and the
//! seed records rendered into `data.ts` come from [`seed_records`].

use crate::naming::{to_kebab, to_pascal};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;
use uuid::Uuid;

/// Number of records every generated data module is seeded with
pub const SEED_COUNT: usize = 5;

/// Age of the first seed record; each following record is one year older
pub const SEED_BASE_AGE: i64 = 20;

/// A stored record: an identifier plus whatever fields the record carries.
///
/// Seeded and inserted records always carry `name`, `email`, `address` and
/// `age`. Updates merge request bodies as-is, so field types are not enforced
/// after creation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    pub id: String,
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

impl Record {
    pub fn field(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }

    /// A string field, or `""` when absent or not a string
    fn text(&self, key: &str) -> &str {
        self.field(key).and_then(Value::as_str).unwrap_or_default()
    }

    pub fn name(&self) -> &str {
        self.text("name")
    }

    pub fn email(&self) -> &str {
        self.text("email")
    }

    pub fn address(&self) -> &str {
        self.text("address")
    }

    /// The numeric age, when the stored value is a number
    pub fn age(&self) -> Option<f64> {
        self.field("age").and_then(Value::as_f64)
    }
}

/// Query filters accepted by the list operation. All present filters must match.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Filters {
    /// Case-insensitive exact match on `address`
    pub address: Option<String>,
    /// Parsed as a number and matched exactly against `age`; ignored unless finite
    pub age: Option<String>,
    /// Case-insensitive substring match on `name`
    pub search: Option<String>,
}

impl Filters {
    fn address(&self) -> Option<String> {
        self.address
            .as_deref()
            .filter(|a| !a.is_empty())
            .map(str::to_lowercase)
    }

    fn age(&self) -> Option<f64> {
        self.age
            .as_deref()
            .map(str::trim)
            .filter(|a| !a.is_empty())
            .and_then(|a| a.parse::<f64>().ok())
            .filter(|a| a.is_finite())
    }

    fn search(&self) -> Option<String> {
        self.search
            .as_deref()
            .filter(|s| !s.is_empty())
            .map(str::to_lowercase)
    }

    fn matches(&self, record: &Record) -> bool {
        if let Some(address) = self.address() {
            if record.address().to_lowercase() != address {
                return false;
            }
        }
        if let Some(age) = self.age() {
            if record.age() != Some(age) {
                return false;
            }
        }
        if let Some(search) = self.search() {
            if !record.name().to_lowercase().contains(&search) {
                return false;
            }
        }
        true
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum StoreError {
    #[error("{0}")]
    BadRequest(String),

    #[error("record '{0}' not found")]
    NotFound(String),
}

/// Build the seed records for a module name.
///
/// Always [`SEED_COUNT`] records with fresh v4 identifiers and ages counting up
/// from [`SEED_BASE_AGE`].
pub fn seed_records(module_name: &str) -> Vec<Record> {
    let kebab = to_kebab(module_name).replace('/', "-");
    let pascal = to_pascal(&kebab);

    (0..SEED_COUNT)
        .map(|i| {
            let n = i + 1;
            let mut fields = Map::new();
            fields.insert("name".into(), Value::from(format!("{} {}", pascal, n)));
            fields.insert("email".into(), Value::from(format!("{}{}@example.com", kebab, n)));
            fields.insert("address".into(), Value::from(format!("{} Main Street", n)));
            fields.insert("age".into(), Value::from(SEED_BASE_AGE + i as i64));
            Record {
                id: Uuid::new_v4().to_string(),
                fields,
            }
        })
        .collect()
}

/// An owned record store. Callers create one and pass it to whatever needs it.
#[derive(Debug, Clone, Default)]
pub struct ModuleStore {
    records: Vec<Record>,
}

impl ModuleStore {
    pub fn new(records: Vec<Record>) -> Self {
        Self { records }
    }

    /// A store holding the seed records for `module_name`
    pub fn seeded(module_name: &str) -> Self {
        Self::new(seed_records(module_name))
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    /// List records matching every present filter, in insertion order
    pub fn list(&self, filters: &Filters) -> Vec<Record> {
        self.records
            .iter()
            .filter(|r| filters.matches(r))
            .cloned()
            .collect()
    }

    pub fn get(&self, id: &str) -> Option<&Record> {
        self.records.iter().find(|r| r.id == id)
    }

    /// Insert a record from a parsed request body.
    ///
    /// `name` and `email` must be truthy. `address` defaults to an empty string and
    /// `age` to the numeric coercion of the supplied value, or 0.
    pub fn insert(&mut self, body: &Value) -> Result<Record, StoreError> {
        let name = body.get("name").filter(|v| is_truthy(v));
        let email = body.get("email").filter(|v| is_truthy(v));

        let (Some(name), Some(email)) = (name, email) else {
            return Err(StoreError::BadRequest(
                "name and email are required".to_string(),
            ));
        };

        let address = body
            .get("address")
            .filter(|v| is_truthy(v))
            .map(coerce_string)
            .unwrap_or_default();
        let age = body.get("age").map(coerce_number).unwrap_or(0.0);

        let mut fields = Map::new();
        fields.insert("name".into(), Value::from(coerce_string(name)));
        fields.insert("email".into(), Value::from(coerce_string(email)));
        fields.insert("address".into(), Value::from(address));
        fields.insert("age".into(), number_value(age));

        let record = Record {
            id: Uuid::new_v4().to_string(),
            fields,
        };

        self.records.push(record.clone());
        Ok(record)
    }

    /// Shallow-merge `body` into the record with `id`, replacing it in place.
    ///
    /// Values are stored as given. The identifier itself is never overwritten,
    /// and a body that is not a JSON object contributes no fields.
    pub fn update(&mut self, id: &str, body: &Value) -> Result<Record, StoreError> {
        let record = self
            .records
            .iter_mut()
            .find(|r| r.id == id)
            .ok_or_else(|| StoreError::NotFound(id.to_string()))?;

        if let Some(patch) = body.as_object() {
            for (key, value) in patch {
                if key != "id" {
                    record.fields.insert(key.clone(), value.clone());
                }
            }
        }

        Ok(record.clone())
    }

    /// Remove exactly the record with `id` and return it
    pub fn remove(&mut self, id: &str) -> Result<Record, StoreError> {
        let index = self
            .records
            .iter()
            .position(|r| r.id == id)
            .ok_or_else(|| StoreError::NotFound(id.to_string()))?;
        Ok(self.records.remove(index))
    }
}

fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0 && !f.is_nan()),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

fn coerce_string(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn coerce_number(value: &Value) -> f64 {
    let number = match value {
        Value::Number(n) => n.as_f64(),
        Value::Null => Some(0.0),
        Value::String(s) if s.trim().is_empty() => Some(0.0),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        Value::Bool(b) => Some(if *b { 1.0 } else { 0.0 }),
        _ => None,
    };
    number.filter(|n| n.is_finite()).unwrap_or(0.0)
}

/// Whole numbers are kept as JSON integers so they render as `36`, not `36.0`
fn number_value(n: f64) -> Value {
    const MAX_EXACT: f64 = 9_007_199_254_740_992.0;
    if n.fract() == 0.0 && n.abs() <= MAX_EXACT {
        Value::from(n as i64)
    } else {
        serde_json::Number::from_f64(n)
            .map(Value::Number)
            .unwrap_or_else(|| Value::from(0))
    }
}
