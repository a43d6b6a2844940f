use serde::{Deserialize, Deserializer};

/// Three-state field for partial payloads targeting a nullable column:
/// an absent key leaves the stored value untouched, an explicit `null`
/// clears it, and a value overwrites it.
///
/// Use `#[serde(default)]` on every `Patch` field so absent keys
/// deserialize to `Missing`.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum Patch<T> {
    #[default]
    Missing,
    Null,
    Value(T),
}

impl<T> Patch<T> {
    pub fn is_missing(&self) -> bool {
        matches!(self, Patch::Missing)
    }

    /// The carried value, if any. `Null` and `Missing` both yield `None`.
    pub fn value(&self) -> Option<&T> {
        match self {
            Patch::Value(v) => Some(v),
            _ => None,
        }
    }

    /// `Missing` → `None`; `Null` → `Some(None)`; `Value(v)` → `Some(Some(v))`.
    /// The outer `Option` answers "was the key explicitly present?".
    pub fn explicit(&self) -> Option<Option<&T>> {
        match self {
            Patch::Missing => None,
            Patch::Null => Some(None),
            Patch::Value(v) => Some(Some(v)),
        }
    }

    /// Applies the patch to a nullable slot.
    pub fn apply_to(&self, slot: &mut Option<T>)
    where
        T: Clone,
    {
        match self {
            Patch::Missing => {}
            Patch::Null => *slot = None,
            Patch::Value(v) => *slot = Some(v.clone()),
        }
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
        // A present key is either null or a value; absence is handled by
        // #[serde(default)] on the field.
        Ok(match Option::<T>::deserialize(deserializer)? {
            Some(v) => Patch::Value(v),
            None => Patch::Null,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, Deserialize)]
    struct Payload {
        #[serde(default)]
        vma: Patch<f64>,
    }

    #[test]
    fn test_absent_key_is_missing() {
        let p: Payload = serde_json::from_str("{}").unwrap();
        assert_eq!(p.vma, Patch::Missing);
    }

    #[test]
    fn test_explicit_null_clears() {
        let p: Payload = serde_json::from_str(r#"{"vma": null}"#).unwrap();
        assert_eq!(p.vma, Patch::Null);
    }

    #[test]
    fn test_value_overwrites() {
        let p: Payload = serde_json::from_str(r#"{"vma": 16.5}"#).unwrap();
        assert_eq!(p.vma, Patch::Value(16.5));
    }

    #[test]
    fn test_apply_to_missing_keeps_slot() {
        let mut slot = Some(3);
        Patch::<i32>::Missing.apply_to(&mut slot);
        assert_eq!(slot, Some(3));
    }

    #[test]
    fn test_apply_to_null_clears_slot() {
        let mut slot = Some(3);
        Patch::<i32>::Null.apply_to(&mut slot);
        assert_eq!(slot, None);
    }

    #[test]
    fn test_apply_to_value_sets_slot() {
        let mut slot = None;
        Patch::Value(7).apply_to(&mut slot);
        assert_eq!(slot, Some(7));
    }

    #[test]
    fn test_explicit_distinguishes_all_three() {
        assert_eq!(Patch::<i32>::Missing.explicit(), None);
        assert_eq!(Patch::<i32>::Null.explicit(), Some(None));
        assert_eq!(Patch::Value(1).explicit(), Some(Some(&1)));
    }
}
