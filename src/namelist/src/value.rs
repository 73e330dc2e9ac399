// astrars-namelist/src/value.rs

//! Scalar value kinds of a namelist assignment and their textual formatting.

use std::fmt;

/// A value that can appear on the right-hand side of a namelist assignment.
///
/// ASTRA input decks only ever carry scalars: integers, reals, logicals and
/// quoted strings. Arrays are expressed at the key level via `(id)` suffixes
/// on indexed module fields, not as array literals.
#[derive(Debug, Clone, PartialEq)]
pub enum NmlValue {
    /// Integer value
    Integer(i64),

    /// Real (floating-point) value
    Real(f64),

    /// Logical value, rendered as bare lowercase `true` / `false`
    Logical(bool),

    /// Character string, rendered single-quoted
    Character(String),
}

impl NmlValue {
    /// Create a new integer value.
    pub fn integer(value: i64) -> Self {
        NmlValue::Integer(value)
    }

    /// Create a new real value.
    pub fn real(value: f64) -> Self {
        NmlValue::Real(value)
    }

    /// Create a new logical value.
    pub fn logical(value: bool) -> Self {
        NmlValue::Logical(value)
    }

    /// Create a new character value.
    pub fn character<S: Into<String>>(value: S) -> Self {
        NmlValue::Character(value.into())
    }

    /// Get the kind name as a string.
    pub fn kind(&self) -> &'static str {
        match self {
            NmlValue::Integer(_) => "integer",
            NmlValue::Real(_) => "real",
            NmlValue::Logical(_) => "logical",
            NmlValue::Character(_) => "character",
        }
    }

    /// Check that the rendered form of this value cannot corrupt a group.
    ///
    /// Quoting carries `/` safely inside character values, but a quote
    /// character would escape the quoting, a control character could place
    /// a bare `/` or key text on its own line, and a non-finite real has no
    /// accepted lexical form. Returns the reason on failure so the caller
    /// can attach the field name.
    pub fn check_renderable(&self) -> std::result::Result<(), &'static str> {
        match self {
            NmlValue::Character(s) => {
                if s.contains('\'') {
                    Err("value contains a quote character")
                } else if s.chars().any(|c| c.is_control()) {
                    Err("value contains a control character")
                } else {
                    Ok(())
                }
            }
            NmlValue::Real(v) if !v.is_finite() => Err("value is not a finite number"),
            _ => Ok(()),
        }
    }

    /// Format this value as it appears in the rendered deck.
    ///
    /// The caller is expected to have run [`check_renderable`] first;
    /// formatting itself performs no escaping.
    ///
    /// [`check_renderable`]: NmlValue::check_renderable
    pub fn to_namelist_string(&self) -> String {
        match self {
            NmlValue::Integer(i) => i.to_string(),
            NmlValue::Real(v) => format_real(*v),
            NmlValue::Logical(b) => if *b { "true" } else { "false" }.to_string(),
            NmlValue::Character(s) => format!("'{}'", s),
        }
    }
}

/// Reals keep Rust's shortest round-trip form with a guaranteed decimal
/// point, matching the lexical grammar ASTRA accepts for real-typed keys.
fn format_real(value: f64) -> String {
    let s = value.to_string();
    if s.contains('.') || s.contains('e') || s.contains('E') {
        s
    } else {
        format!("{}.0", s)
    }
}

impl fmt::Display for NmlValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_namelist_string())
    }
}

impl From<i64> for NmlValue {
    fn from(value: i64) -> Self {
        NmlValue::Integer(value)
    }
}

impl From<f64> for NmlValue {
    fn from(value: f64) -> Self {
        NmlValue::Real(value)
    }
}

impl From<bool> for NmlValue {
    fn from(value: bool) -> Self {
        NmlValue::Logical(value)
    }
}

impl From<&str> for NmlValue {
    fn from(value: &str) -> Self {
        NmlValue::Character(value.to_string())
    }
}

impl From<String> for NmlValue {
    fn from(value: String) -> Self {
        NmlValue::Character(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn integers_render_bare() {
        assert_eq!(NmlValue::integer(100).to_namelist_string(), "100");
        assert_eq!(NmlValue::integer(-3).to_namelist_string(), "-3");
    }

    #[test]
    fn reals_always_carry_a_decimal_point() {
        assert_eq!(NmlValue::real(1.3).to_namelist_string(), "1.3");
        assert_eq!(NmlValue::real(130.0).to_namelist_string(), "130.0");
        assert_eq!(NmlValue::real(-1.0).to_namelist_string(), "-1.0");
        assert_eq!(NmlValue::real(1e-3).to_namelist_string(), "0.001");
    }

    #[test]
    fn logicals_render_lowercase_bare() {
        assert_eq!(NmlValue::logical(true).to_namelist_string(), "true");
        assert_eq!(NmlValue::logical(false).to_namelist_string(), "false");
    }

    #[test]
    fn strings_render_single_quoted() {
        assert_eq!(
            NmlValue::character("C1_E.dat").to_namelist_string(),
            "'C1_E.dat'"
        );
    }

    #[test]
    fn slash_inside_a_quoted_string_is_renderable() {
        let v = NmlValue::character("/data/generator/example.ini");
        assert!(v.check_renderable().is_ok());
        assert_eq!(v.to_namelist_string(), "'/data/generator/example.ini'");
    }

    #[test]
    fn quote_and_control_characters_are_rejected() {
        assert!(NmlValue::character("it's").check_renderable().is_err());
        assert!(NmlValue::character("a\n/").check_renderable().is_err());
    }

    #[test]
    fn non_finite_reals_are_rejected() {
        assert!(NmlValue::real(f64::NAN).check_renderable().is_err());
        assert!(NmlValue::real(f64::INFINITY).check_renderable().is_err());
    }
}
