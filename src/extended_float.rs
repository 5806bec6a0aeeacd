//! Serde representation for `f64` values that may be infinite.
//!
//! JSON has no infinity and `serde_json` writes it as `null`, which then fails to
//! read back as an `f64`. Fields using this module write `"inf"` or `"-inf"`
//! instead and accept either a number or one of those strings.
//!
//! ```text
//! #[serde(with = "crate::extended_float")]
//! fos_yielding: f64,
//! ```

use serde::de::{Error, Unexpected};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Wire form of an extended float.
#[derive(Serialize, Deserialize)]
#[serde(untagged)]
enum Repr {
    /// Any finite value.
    Number(f64),
    /// `"inf"`, `"-inf"` or `"nan"`.
    Text(String),
}

/// Map a value onto its wire form.
fn to_repr(value: f64) -> Repr {
    if value.is_nan() {
        Repr::Text("nan".to_owned())
    } else if value.is_infinite() && value > 0.0 {
        Repr::Text("inf".to_owned())
    } else if value.is_infinite() {
        Repr::Text("-inf".to_owned())
    } else {
        Repr::Number(value)
    }
}

/// Read a value back from its wire form.
fn from_repr<E: Error>(repr: Repr) -> Result<f64, E> {
    match repr {
        Repr::Number(value) => Ok(value),
        Repr::Text(text) => match text.as_str() {
            "inf" | "+inf" | "infinity" => Ok(f64::INFINITY),
            "-inf" | "-infinity" => Ok(f64::NEG_INFINITY),
            "nan" => Ok(f64::NAN),
            other => Err(E::invalid_value(
                Unexpected::Str(other),
                &"a number, \"inf\" or \"-inf\"",
            )),
        },
    }
}

/// Serialize an `f64`, writing infinities as strings.
pub(crate) fn serialize<S: Serializer>(value: &f64, serializer: S) -> Result<S::Ok, S::Error> {
    to_repr(*value).serialize(serializer)
}

/// Deserialize an `f64` written by [`serialize`] or as a plain number.
pub(crate) fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
    from_repr(Repr::deserialize(deserializer)?)
}

/// The same representation for `Option<f64>`, with `None` written as `null`.
pub(crate) mod option {
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    use super::{from_repr, to_repr, Repr};

    /// Serialize an optional `f64`.
    pub(crate) fn serialize<S: Serializer>(
        value: &Option<f64>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        value.map(to_repr).serialize(serializer)
    }

    /// Deserialize an optional `f64`.
    pub(crate) fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<f64>, D::Error> {
        Option::<Repr>::deserialize(deserializer)?
            .map(from_repr)
            .transpose()
    }
}

#[cfg(test)]
mod tests {
    use serde::{Deserialize, Serialize};

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Sample {
        #[serde(with = "crate::extended_float")]
        value: f64,
        #[serde(with = "crate::extended_float::option")]
        optional: Option<f64>,
    }

    #[test]
    fn infinities_are_written_as_strings() {
        let sample = Sample {
            value: f64::INFINITY,
            optional: Some(f64::NEG_INFINITY),
        };
        let json = serde_json::to_string(&sample).expect("serializes");
        assert_eq!(json, r#"{"value":"inf","optional":"-inf"}"#);
        assert_eq!(
            serde_json::from_str::<Sample>(&json).expect("deserializes"),
            sample
        );
    }

    #[test]
    fn finite_values_stay_numbers() {
        let sample = Sample {
            value: 2.5,
            optional: None,
        };
        let json = serde_json::to_string(&sample).expect("serializes");
        assert_eq!(json, r#"{"value":2.5,"optional":null}"#);
        let parsed: Sample =
            serde_json::from_str(r#"{"value":3,"optional":1.5}"#).expect("numbers");
        assert_eq!(
            parsed,
            Sample {
                value: 3.0,
                optional: Some(1.5)
            }
        );
    }

    #[test]
    fn unknown_strings_are_rejected() {
        assert!(serde_json::from_str::<Sample>(r#"{"value":"lots","optional":null}"#).is_err());
    }
}
