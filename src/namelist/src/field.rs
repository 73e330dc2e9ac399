// astrars-namelist/src/field.rs

//! Unit-tagged field descriptors and typed lookup against raw request maps.
//!
//! Every domain model declares a static table of [`FieldSpec`]s, one per
//! field, in the order the external binary expects them. The descriptor
//! carries the external keyword (what ASTRA reads), the public alias (what
//! callers write), the physical unit tag, and the exclusion/computed flags.
//! Resolution and rendering are both direct folds over that table.

use crate::error::SchemaError;
use serde_json::Value;

/// A raw request map as supplied by the caller, keyed by either internal
/// names or public aliases.
pub type RawMap = serde_json::Map<String, Value>;

/// Declarative description of one configuration field.
///
/// Immutable once the owning model is defined; instances are `const` and
/// process-wide static.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
    /// Internal name, i.e. the keyword the external binary reads.
    pub name: &'static str,
    /// Public alias accepted from callers in place of the internal name.
    pub alias: Option<&'static str>,
    /// Physical unit tag, e.g. `[nC]`. Documentation metadata only.
    pub unit: Option<&'static str>,
    /// Excluded fields resolve from input but never render.
    pub excluded: bool,
    /// Computed fields render but are never user-settable.
    pub computed: bool,
}

impl FieldSpec {
    pub const fn new(name: &'static str) -> Self {
        Self {
            name,
            alias: None,
            unit: None,
            excluded: false,
            computed: false,
        }
    }

    pub const fn alias(mut self, alias: &'static str) -> Self {
        self.alias = Some(alias);
        self
    }

    pub const fn unit(mut self, unit: &'static str) -> Self {
        self.unit = Some(unit);
        self
    }

    pub const fn excluded(mut self) -> Self {
        self.excluded = true;
        self
    }

    pub const fn computed(mut self) -> Self {
        self.computed = true;
        self
    }

    /// The error for this field being absent without a default.
    pub fn missing(&self) -> SchemaError {
        SchemaError::MissingRequiredField { field: self.name }
    }

    /// Look this field up in a raw map, by internal name or alias.
    ///
    /// Supplying the field under both names is rejected rather than left to
    /// last-defined-wins. JSON `null` counts as absent, matching the
    /// omit-if-unset convention of the request documents.
    pub fn raw<'a>(&self, input: &'a RawMap) -> Result<Option<&'a Value>, SchemaError> {
        let by_name = input.get(self.name);
        let by_alias = self.alias.and_then(|alias| input.get(alias));
        let value = match (by_name, by_alias) {
            (Some(_), Some(_)) => {
                return Err(SchemaError::DuplicateField {
                    field: self.name,
                    alias: self.alias.unwrap_or(""),
                })
            }
            (Some(value), None) => Some(value),
            (None, found) => found,
        };
        Ok(value.filter(|v| !v.is_null()))
    }

    /// Typed lookup of an integer field. Absent fields resolve to `None`.
    pub fn int(&self, input: &RawMap) -> Result<Option<i64>, SchemaError> {
        match self.raw(input)? {
            None => Ok(None),
            Some(Value::Number(n)) if n.as_i64().is_some() => Ok(n.as_i64()),
            Some(other) => Err(self.bad_kind("an integer", other)),
        }
    }

    /// Typed lookup of a real field. Integers widen to reals.
    pub fn real(&self, input: &RawMap) -> Result<Option<f64>, SchemaError> {
        match self.raw(input)? {
            None => Ok(None),
            Some(Value::Number(n)) => Ok(n.as_f64()),
            Some(other) => Err(self.bad_kind("a number", other)),
        }
    }

    /// Typed lookup of a logical field.
    pub fn logical(&self, input: &RawMap) -> Result<Option<bool>, SchemaError> {
        match self.raw(input)? {
            None => Ok(None),
            Some(Value::Bool(b)) => Ok(Some(*b)),
            Some(other) => Err(self.bad_kind("a boolean", other)),
        }
    }

    /// Typed lookup of a string field.
    pub fn string(&self, input: &RawMap) -> Result<Option<String>, SchemaError> {
        match self.raw(input)? {
            None => Ok(None),
            Some(Value::String(s)) => Ok(Some(s.clone())),
            Some(other) => Err(self.bad_kind("a string", other)),
        }
    }

    /// Typed lookup of a sequence-of-reals field (field-map tables).
    pub fn real_seq(&self, input: &RawMap) -> Result<Option<Vec<f64>>, SchemaError> {
        let values = match self.raw(input)? {
            None => return Ok(None),
            Some(Value::Array(values)) => values,
            Some(other) => return Err(self.bad_kind("an array of numbers", other)),
        };
        let mut seq = Vec::with_capacity(values.len());
        for value in values {
            match value.as_f64() {
                Some(v) => seq.push(v),
                None => return Err(self.bad_kind("an array of numbers", value)),
            }
        }
        Ok(Some(seq))
    }

    fn bad_kind(&self, expected: &'static str, got: &Value) -> SchemaError {
        SchemaError::InvalidFieldValue {
            field: self.name,
            expected,
            got: json_kind(got),
        }
    }
}

/// Human-readable kind of a raw JSON value, for error messages.
pub fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const IPART: FieldSpec = FieldSpec::new("IPart").alias("particle_count");
    const Q_TOTAL: FieldSpec = FieldSpec::new("Q_total").alias("total_charge").unit("[nC]");

    fn raw(value: Value) -> RawMap {
        value.as_object().unwrap().clone()
    }

    #[test]
    fn lookup_accepts_internal_name_and_alias() {
        let input = raw(json!({"IPart": 50}));
        assert_eq!(IPART.int(&input).unwrap(), Some(50));

        let input = raw(json!({"particle_count": 50}));
        assert_eq!(IPART.int(&input).unwrap(), Some(50));
    }

    #[test]
    fn duplicate_supply_is_rejected() {
        let input = raw(json!({"IPart": 50, "particle_count": 60}));
        assert_eq!(
            IPART.int(&input),
            Err(SchemaError::DuplicateField {
                field: "IPart",
                alias: "particle_count",
            })
        );
    }

    #[test]
    fn null_counts_as_absent() {
        let input = raw(json!({"IPart": null}));
        assert_eq!(IPART.int(&input).unwrap(), None);
    }

    #[test]
    fn integers_widen_to_reals_but_not_the_reverse() {
        let input = raw(json!({"total_charge": 2}));
        assert_eq!(Q_TOTAL.real(&input).unwrap(), Some(2.0));

        let input = raw(json!({"IPart": 2.5}));
        assert!(matches!(
            IPART.int(&input),
            Err(SchemaError::InvalidFieldValue { field: "IPart", .. })
        ));
    }

    #[test]
    fn wrong_kind_names_the_field() {
        let input = raw(json!({"particle_count": "many"}));
        assert_eq!(
            IPART.int(&input),
            Err(SchemaError::InvalidFieldValue {
                field: "IPart",
                expected: "an integer",
                got: "a string",
            })
        );
    }

    #[test]
    fn missing_names_the_field() {
        assert_eq!(
            IPART.missing(),
            SchemaError::MissingRequiredField { field: "IPart" }
        );
    }
}
