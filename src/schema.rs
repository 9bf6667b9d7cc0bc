//! Structural validation of World Bank API responses.
//!
//! Every endpoint answers with a two-slot envelope `[metadata, records]`. The
//! validators here are pure: they either return the typed wire values or the
//! complete list of [`Violation`]s. Malformed input is an ordinary `Err`,
//! never a panic, and validation keeps going after the first mismatch so the
//! caller sees every broken field path at once.

use serde::Deserialize;
use serde_json::{Map, Value};
use std::fmt;

/// One structural mismatch: where it is (JSONPath-style), what was expected
/// there, and what actually arrived.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Violation {
    pub path: String,
    pub expected: &'static str,
    pub actual: String,
}

impl Violation {
    fn new(path: impl Into<String>, expected: &'static str, actual: &Value) -> Self {
        Self {
            path: path.into(),
            expected,
            actual: describe(actual),
        }
    }

    fn missing(path: impl Into<String>, expected: &'static str) -> Self {
        Self {
            path: path.into(),
            expected,
            actual: "nothing (field absent)".into(),
        }
    }
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: expected {}, got {}", self.path, self.expected, self.actual)
    }
}

fn describe(value: &Value) -> String {
    match value {
        Value::Null => "null".into(),
        Value::Bool(b) => format!("boolean {b}"),
        Value::Number(n) => format!("number {n}"),
        Value::String(s) => format!("string {s:?}"),
        Value::Array(items) => format!("an array of {} elements", items.len()),
        Value::Object(_) => "an object".into(),
    }
}

/// Pagination metadata carried in slot 0 of every envelope.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct PageInfo {
    pub page: u32,
    pub pages: u32,
    /// Some responses encode `per_page` as a string, others as a number.
    /// Accept both and normalize to `u32`.
    #[serde(deserialize_with = "de_u32_from_string_or_number")]
    pub per_page: u32,
    pub total: u32,
}

/// Serde helper: parse `u32` from either a JSON number or a string.
fn de_u32_from_string_or_number<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: serde::Deserializer<'de>,
{
    use serde::de::{self, Visitor};
    struct U32Visitor;

    impl<'de> Visitor<'de> for U32Visitor {
        type Value = u32;

        fn expecting(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
            write!(f, "a string or integer representing a non-negative number")
        }

        fn visit_u64<E>(self, v: u64) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(v as u32)
        }

        fn visit_i64<E>(self, v: i64) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            if v < 0 {
                return Err(E::custom("negative value for u32"));
            }
            Ok(v as u32)
        }

        fn visit_str<E>(self, s: &str) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            s.parse::<u32>().map_err(E::custom)
        }
    }

    deserializer.deserialize_any(U32Visitor)
}

/// Serde helper: keep a string verbatim, or render a JSON number as text.
fn de_string_from_string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: serde::Deserializer<'de>,
{
    use serde::de::{self, Visitor};
    struct StringVisitor;

    impl<'de> Visitor<'de> for StringVisitor {
        type Value = String;

        fn expecting(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
            write!(f, "a string or number")
        }

        fn visit_str<E>(self, s: &str) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(s.to_string())
        }

        fn visit_u64<E>(self, v: u64) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(v.to_string())
        }

        fn visit_i64<E>(self, v: i64) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(v.to_string())
        }

        fn visit_f64<E>(self, v: f64) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(v.to_string())
        }
    }

    deserializer.deserialize_any(StringVisitor)
}

/// Auxiliary `{id, value}` pair used for region and income-level metadata.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CodeName {
    pub id: String,
    pub value: String,
}

/// Raw country record from the countries endpoint (slot 1 of the envelope).
/// Coordinates stay strings here; the domain mapping parses them.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CountryRecord {
    pub name: String,
    pub id: String,
    #[serde(rename = "iso2Code")]
    pub iso2_code: String,
    #[serde(rename = "capitalCity")]
    pub capital_city: String,
    pub longitude: Option<String>,
    pub latitude: Option<String>,
    pub region: Option<CodeName>,
    #[serde(rename = "incomeLevel")]
    pub income_level: Option<CodeName>,
}

/// Raw indicator observation. Extra fields (`indicator`, `country`,
/// `obs_status`, ...) are tolerated and ignored.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SeriesRecord {
    #[serde(deserialize_with = "de_string_from_string_or_number")]
    pub date: String,
    pub value: Option<f64>,
}

/// Either the typed envelope content or every violation found.
pub type Validated<T> = Result<(PageInfo, Vec<T>), Vec<Violation>>;

/// Validates a countries-endpoint response against the envelope and
/// country-record contracts.
pub fn validate_country_envelope(body: &Value) -> Validated<CountryRecord> {
    let mut violations = Vec::new();
    let Some((meta, records)) = check_envelope(body, &mut violations) else {
        return Err(violations);
    };
    check_page_info(meta, &mut violations);
    for (index, record) in records.iter().enumerate() {
        check_country_record(index, record, &mut violations);
    }
    if violations.is_empty() {
        decode_slots(meta, records)
    } else {
        Err(violations)
    }
}

/// Validates an indicator-endpoint response: same envelope contract, records
/// carrying `date` and `value`.
pub fn validate_series_envelope(body: &Value) -> Validated<SeriesRecord> {
    let mut violations = Vec::new();
    let Some((meta, records)) = check_envelope(body, &mut violations) else {
        return Err(violations);
    };
    check_page_info(meta, &mut violations);
    for (index, record) in records.iter().enumerate() {
        check_series_record(index, record, &mut violations);
    }
    if violations.is_empty() {
        decode_slots(meta, records)
    } else {
        Err(violations)
    }
}

/// The envelope must be exactly `[metadata-object, records-array]`. Anything
/// else rejects the whole response; there is no partial acceptance.
fn check_envelope<'a>(
    body: &'a Value,
    violations: &mut Vec<Violation>,
) -> Option<(&'a Value, &'a [Value])> {
    let expected = "a two-element array [metadata, records]";
    let Some(slots) = body.as_array() else {
        violations.push(Violation::new("$", expected, body));
        return None;
    };
    if slots.len() != 2 {
        violations.push(Violation::new("$", expected, body));
        return None;
    }
    match (slots[0].is_object(), slots[1].as_array()) {
        (true, Some(records)) => Some((&slots[0], records)),
        (meta_ok, records) => {
            if !meta_ok {
                violations.push(Violation::new("$[0]", "a pagination metadata object", &slots[0]));
            }
            if records.is_none() {
                violations.push(Violation::new("$[1]", "an array of records", &slots[1]));
            }
            None
        }
    }
}

fn check_page_info(meta: &Value, violations: &mut Vec<Violation>) {
    for field in ["page", "pages", "total"] {
        let path = format!("$[0].{field}");
        match meta.get(field) {
            None => violations.push(Violation::missing(path, "a non-negative integer")),
            Some(v) if v.as_u64().is_none() => {
                violations.push(Violation::new(path, "a non-negative integer", v));
            }
            Some(_) => {}
        }
    }
    let path = "$[0].per_page";
    let expected = "a non-negative integer or numeric string";
    match meta.get("per_page") {
        None => violations.push(Violation::missing(path, expected)),
        Some(v) => {
            let ok = v.as_u64().is_some() || v.as_str().is_some_and(|s| s.parse::<u32>().is_ok());
            if !ok {
                violations.push(Violation::new(path, expected, v));
            }
        }
    }
}

fn check_country_record(index: usize, record: &Value, violations: &mut Vec<Violation>) {
    let base = format!("$[1][{index}]");
    let Some(fields) = record.as_object() else {
        violations.push(Violation::new(base, "a country record object", record));
        return;
    };
    check_string_field(&base, fields, "name", false, violations);
    check_string_field(&base, fields, "id", true, violations);
    check_string_field(&base, fields, "iso2Code", true, violations);
    check_string_field(&base, fields, "capitalCity", false, violations);
    check_coordinate_field(&base, fields, "longitude", violations);
    check_coordinate_field(&base, fields, "latitude", violations);
    check_code_name_field(&base, fields, "region", violations);
    check_code_name_field(&base, fields, "incomeLevel", violations);
}

fn check_series_record(index: usize, record: &Value, violations: &mut Vec<Violation>) {
    let base = format!("$[1][{index}]");
    let Some(fields) = record.as_object() else {
        violations.push(Violation::new(base, "an observation object", record));
        return;
    };
    let path = format!("{base}.date");
    match fields.get("date") {
        None => violations.push(Violation::missing(path, "a string or number")),
        Some(Value::String(_)) | Some(Value::Number(_)) => {}
        Some(other) => violations.push(Violation::new(path, "a string or number", other)),
    }
    let path = format!("{base}.value");
    match fields.get("value") {
        None | Some(Value::Null) | Some(Value::Number(_)) => {}
        Some(other) => violations.push(Violation::new(path, "a number or null", other)),
    }
}

fn check_string_field(
    base: &str,
    fields: &Map<String, Value>,
    name: &str,
    require_non_empty: bool,
    violations: &mut Vec<Violation>,
) {
    let path = format!("{base}.{name}");
    let expected = if require_non_empty { "a non-empty string" } else { "a string" };
    match fields.get(name) {
        None => violations.push(Violation::missing(path, expected)),
        Some(Value::String(s)) => {
            if require_non_empty && s.trim().is_empty() {
                violations.push(Violation {
                    path,
                    expected,
                    actual: format!("string {s:?}"),
                });
            }
        }
        Some(other) => violations.push(Violation::new(path, expected, other)),
    }
}

/// Coordinates arrive as numeric strings. Absent, null, or empty means
/// "not reported"; anything else must parse as a number so the later domain
/// mapping cannot fail.
fn check_coordinate_field(
    base: &str,
    fields: &Map<String, Value>,
    name: &str,
    violations: &mut Vec<Violation>,
) {
    let expected = "a numeric string, number, or null";
    let ok = match fields.get(name) {
        None | Some(Value::Null) | Some(Value::Number(_)) => true,
        Some(Value::String(s)) => s.trim().is_empty() || s.trim().parse::<f64>().is_ok(),
        Some(_) => false,
    };
    if !ok {
        violations.push(Violation::new(
            format!("{base}.{name}"),
            expected,
            &fields[name],
        ));
    }
}

fn check_code_name_field(
    base: &str,
    fields: &Map<String, Value>,
    name: &str,
    violations: &mut Vec<Violation>,
) {
    let path = format!("{base}.{name}");
    match fields.get(name) {
        None | Some(Value::Null) => {}
        Some(Value::Object(inner)) => {
            for key in ["id", "value"] {
                match inner.get(key) {
                    Some(Value::String(_)) => {}
                    Some(other) => {
                        violations.push(Violation::new(format!("{path}.{key}"), "a string", other));
                    }
                    None => violations.push(Violation::missing(format!("{path}.{key}"), "a string")),
                }
            }
        }
        Some(other) => {
            violations.push(Violation::new(path, "an object carrying `id` and `value`", other));
        }
    }
}

/// Shape was verified above, so serde decoding is a formality. A failure here
/// is still reported as a violation rather than a panic.
fn decode_slots<T: serde::de::DeserializeOwned>(
    meta: &Value,
    records: &[Value],
) -> Validated<T> {
    let page_info: PageInfo = serde_json::from_value(meta.clone())
        .map_err(|e| vec![decode_violation("$[0]".into(), e)])?;
    let mut decoded = Vec::with_capacity(records.len());
    for (index, record) in records.iter().enumerate() {
        let value: T = serde_json::from_value(record.clone())
            .map_err(|e| vec![decode_violation(format!("$[1][{index}]"), e)])?;
        decoded.push(value);
    }
    Ok((page_info, decoded))
}

fn decode_violation(path: String, err: serde_json::Error) -> Violation {
    Violation {
        path,
        expected: "a decodable record",
        actual: err.to_string(),
    }
}
