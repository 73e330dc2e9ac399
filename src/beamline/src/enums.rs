// astrars-beamline/src/enums.rs

//! Closed enumerations with alias resolution.
//!
//! The external binary accepts exactly one canonical spelling per option;
//! callers may use any documented short form. Matching is a case-sensitive
//! exact lookup against the accepted-spelling table, no fuzzy matching.

use astrars_namelist::{FieldSpec, NmlValue, RawMap, SchemaError};
use std::str::FromStr;
use strum::IntoEnumIterator;
use strum_macros::{Display, EnumIter, EnumString};

/// Shape of a particle or momentum distribution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Display, EnumString, EnumIter)]
pub enum Distribution {
    #[default]
    #[strum(to_string = "gaussian", serialize = "gauss", serialize = "g")]
    Gaussian,
    #[strum(to_string = "uniform", serialize = "u")]
    Uniform,
    #[strum(to_string = "plateau", serialize = "p", serialize = "flattop")]
    Plateau,
    #[strum(to_string = "inverted", serialize = "i")]
    Inverted,
    #[strum(to_string = "radial_uniform", serialize = "r")]
    RadialUniform,
    #[strum(to_string = "isotropic")]
    Isotropic,
    #[strum(to_string = "fd_300")]
    Fd300,
}

/// Species of the generated particles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Display, EnumString, EnumIter)]
pub enum ParticleType {
    #[default]
    #[strum(to_string = "electrons", serialize = "el", serialize = "e")]
    Electrons,
    #[strum(to_string = "positrons", serialize = "po")]
    Positrons,
    #[strum(to_string = "protons", serialize = "pr")]
    Protons,
    #[strum(to_string = "hydrogen", serialize = "hy")]
    Hydrogen,
}

/// The canonical tokens of an enumeration, for error messages.
fn canonical_tokens<T: IntoEnumIterator + std::fmt::Display>() -> String {
    T::iter()
        .map(|variant| variant.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Resolve an enum-typed field from a raw map.
pub(crate) fn resolve_enum<T>(spec: &FieldSpec, input: &RawMap) -> Result<Option<T>, SchemaError>
where
    T: FromStr + IntoEnumIterator + std::fmt::Display,
{
    let token = match spec.string(input)? {
        None => return Ok(None),
        Some(token) => token,
    };
    match token.parse::<T>() {
        Ok(variant) => Ok(Some(variant)),
        Err(_) => Err(SchemaError::InvalidEnumValue {
            field: spec.name,
            token,
            accepted: canonical_tokens::<T>(),
        }),
    }
}

impl From<Distribution> for NmlValue {
    fn from(value: Distribution) -> Self {
        NmlValue::character(value.to_string())
    }
}

impl From<ParticleType> for NmlValue {
    fn from(value: ParticleType) -> Self {
        NmlValue::character(value.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const DIST_Z: FieldSpec = FieldSpec::new("Dist_z").alias("dist_z");
    const SPECIES: FieldSpec = FieldSpec::new("Species").alias("particle_type");

    fn raw(value: serde_json::Value) -> RawMap {
        value.as_object().unwrap().clone()
    }

    #[test]
    fn every_documented_alias_resolves_to_its_canonical_token() {
        let cases: [(&str, Distribution); 11] = [
            ("gaussian", Distribution::Gaussian),
            ("gauss", Distribution::Gaussian),
            ("g", Distribution::Gaussian),
            ("uniform", Distribution::Uniform),
            ("u", Distribution::Uniform),
            ("plateau", Distribution::Plateau),
            ("p", Distribution::Plateau),
            ("flattop", Distribution::Plateau),
            ("inverted", Distribution::Inverted),
            ("i", Distribution::Inverted),
            ("r", Distribution::RadialUniform),
        ];
        for (token, expected) in cases {
            assert_eq!(token.parse::<Distribution>().unwrap(), expected, "{token}");
        }
        assert_eq!("radial_uniform".parse::<Distribution>().unwrap(), Distribution::RadialUniform);
        assert_eq!("isotropic".parse::<Distribution>().unwrap(), Distribution::Isotropic);
        assert_eq!("fd_300".parse::<Distribution>().unwrap(), Distribution::Fd300);

        for (token, expected) in [
            ("electrons", ParticleType::Electrons),
            ("el", ParticleType::Electrons),
            ("e", ParticleType::Electrons),
            ("positrons", ParticleType::Positrons),
            ("po", ParticleType::Positrons),
            ("protons", ParticleType::Protons),
            ("pr", ParticleType::Protons),
            ("hydrogen", ParticleType::Hydrogen),
            ("hy", ParticleType::Hydrogen),
        ] {
            assert_eq!(token.parse::<ParticleType>().unwrap(), expected, "{token}");
        }
    }

    #[test]
    fn matching_is_case_sensitive() {
        assert!("Gauss".parse::<Distribution>().is_err());
        assert!("ELECTRONS".parse::<ParticleType>().is_err());
    }

    #[test]
    fn undocumented_token_fails_with_the_accepted_set() {
        let input = raw(json!({"dist_z": "bimodal"}));
        let err = resolve_enum::<Distribution>(&DIST_Z, &input).unwrap_err();
        match err {
            SchemaError::InvalidEnumValue {
                field,
                token,
                accepted,
            } => {
                assert_eq!(field, "Dist_z");
                assert_eq!(token, "bimodal");
                assert!(accepted.contains("gaussian"));
                assert!(accepted.contains("fd_300"));
            }
            other => panic!("unexpected error: {}", other),
        }
    }

    #[test]
    fn canonical_token_renders_single_quoted() {
        let input = raw(json!({"particle_type": "el"}));
        let species = resolve_enum::<ParticleType>(&SPECIES, &input)
            .unwrap()
            .unwrap();
        assert_eq!(NmlValue::from(species).to_namelist_string(), "'electrons'");
    }
}
