//! Three-state optional fields for sparse patch requests.
//!
//! Dynamic client registration distinguishes "field omitted" (keep the
//! stored value) from "field explicitly null" (erase it) when patching an
//! existing client. A plain `Option` collapses the two, so every optional
//! registration field is a [`Patch`] instead.

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// The value of an optional field in a sparse patch request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Patch<T> {
    /// The field was omitted: keep the existing value.
    #[default]
    Unset,
    /// The field was explicitly `null`: erase the existing value.
    Null,
    /// The field was set to a value: replace the existing value.
    Value(T),
}

impl<T> Patch<T> {
    /// Returns `true` when the field was omitted.
    #[must_use]
    pub fn is_unset(&self) -> bool {
        matches!(self, Self::Unset)
    }

    /// Returns `true` when the field carries a value.
    #[must_use]
    pub fn is_value(&self) -> bool {
        matches!(self, Self::Value(_))
    }

    /// Returns the carried value, if any.
    #[must_use]
    pub fn as_value(&self) -> Option<&T> {
        match self {
            Self::Value(value) => Some(value),
            _ => None,
        }
    }

    /// Applies this patch onto `target`: a value replaces it, `null`
    /// erases it, an omitted field leaves it untouched.
    pub fn apply_to(&self, target: &mut Option<T>)
    where
        T: Clone,
    {
        match self {
            Self::Unset => {}
            Self::Null => *target = None,
            Self::Value(value) => *target = Some(value.clone()),
        }
    }

    /// Applies this patch onto a non-optional `target`, substituting
    /// `default` when the field was explicitly nulled.
    pub fn apply_or_default(&self, target: &mut T, default: T)
    where
        T: Clone,
    {
        match self {
            Self::Unset => {}
            Self::Null => *target = default,
            Self::Value(value) => *target = value.clone(),
        }
    }
}

// A missing field deserializes to `Unset` through `#[serde(default)]`;
// this impl only ever sees present fields.
impl<'de, T: Deserialize<'de>> Deserialize<'de> for Patch<T> {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(match Option::<T>::deserialize(deserializer)? {
            Some(value) => Self::Value(value),
            None => Self::Null,
        })
    }
}

impl<T: Serialize> Serialize for Patch<T> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            Self::Value(value) => serializer.serialize_some(value),
            _ => serializer.serialize_none(),
        }
    }
}
