//! Field level (de)serialization helpers for the webauthn types.

use coset::iana::EnumI64;
use serde::{
    de::{Error, Unexpected},
    Deserialize, Deserializer, Serializer,
};

/// Fall back to `T::default()` when a field holds a value this crate does not know.
///
/// Browsers are required to skip unknown enumeration values rather than reject the request, and
/// the options given to the ceremonies are read the same way.
pub fn ignore_unknown<'de, D, T>(de: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(T::deserialize(de).unwrap_or_default())
}

/// IANA registered enums as their signed integer value, `-7` for ES256.
pub mod i64_to_iana {
    use super::*;

    pub fn serialize<S, T>(value: &T, ser: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
        T: EnumI64,
    {
        ser.serialize_i64(value.to_i64())
    }

    pub fn deserialize<'de, D, T>(de: D) -> Result<T, D::Error>
    where
        D: Deserializer<'de>,
        T: EnumI64,
    {
        let value = i64::deserialize(de)?;
        T::from_i64(value)
            .ok_or_else(|| D::Error::invalid_value(Unexpected::Signed(value), &"a COSE algorithm"))
    }
}
