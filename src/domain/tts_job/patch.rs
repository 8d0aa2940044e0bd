use serde::{Deserialize, Deserializer};

/// A field of a partial update.
///
/// Distinguishes a key that was omitted (`Unset`) from one explicitly set to
/// `null` (`Null`) and one carrying a value. Fields using it must be marked
/// `#[serde(default)]` so an omitted key deserializes to `Unset`.
#[derive(Debug, Clone, PartialEq)]
pub enum Patch<T> {
    Unset,
    Null,
    Value(T),
}

impl<T> Default for Patch<T> {
    fn default() -> Self {
        Patch::Unset
    }
}

impl<T> Patch<T> {
    pub fn is_unset(&self) -> bool {
        matches!(self, Patch::Unset)
    }

    pub fn value(&self) -> Option<&T> {
        match self {
            Patch::Value(v) => Some(v),
            _ => None,
        }
    }

    /// Treat values matched by `discard` as if the key had been omitted
    pub fn unset_if(self, discard: impl FnOnce(&T) -> bool) -> Self {
        match self {
            Patch::Value(v) if discard(&v) => Patch::Unset,
            other => other,
        }
    }
}

impl Patch<String> {
    /// Empty or whitespace-only strings mean "do not change"
    pub fn non_blank(self) -> Self {
        self.unset_if(|s| s.trim().is_empty())
    }
}

impl<'de, T> Deserialize<'de> for Patch<T>
where
    T: Deserialize<'de>,
{
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(match Option::<T>::deserialize(deserializer)? {
            Some(value) => Patch::Value(value),
            None => Patch::Null,
        })
    }
}
