//! Absence predicate.
//!
//! A dynamically held value can be absent in two ways: there is no value at all, or there is
//! a value whose representation includes a nullable reference layer that is empty (an
//! `Option` that is `None`, a null raw pointer, JSON `null`). [`is_nil`] answers both.
//!
//! Nullability is a capability declared per type through [`Nullable`]. Types without a
//! nullable layer keep the default `false`; user records opt in with an empty impl.

use std::collections::{BTreeMap, HashMap, HashSet};
use std::rc::Rc;
use std::sync::Arc;

/// A value that may carry an empty reference layer.
pub trait Nullable {
    /// Returns `true` when this value's nullable layer is empty.
    fn is_nil(&self) -> bool {
        false
    }
}

/// Returns `true` for untyped absence (`None`) or a value whose nullable layer is empty.
///
/// ```
/// use recordkit_core::is_nil;
///
/// let typed_nil: Option<Box<i32>> = None;
/// assert!(is_nil(None));
/// assert!(is_nil(Some(&typed_nil)));
/// assert!(!is_nil(Some(&0)));
/// assert!(!is_nil(Some(&"")));
/// ```
pub fn is_nil(value: Option<&dyn Nullable>) -> bool {
    value.is_none_or(|v| v.is_nil())
}

impl<T> Nullable for Option<T> {
    fn is_nil(&self) -> bool {
        self.is_none()
    }
}

impl<T: ?Sized> Nullable for *const T {
    fn is_nil(&self) -> bool {
        self.is_null()
    }
}

impl<T: ?Sized> Nullable for *mut T {
    fn is_nil(&self) -> bool {
        self.is_null()
    }
}

impl Nullable for serde_json::Value {
    fn is_nil(&self) -> bool {
        self.is_null()
    }
}

macro_rules! never_nil {
    ($($ty:ty),* $(,)?) => {
        $(impl Nullable for $ty {})*
    };
}

never_nil!(
    (),
    bool,
    char,
    i8,
    i16,
    i32,
    i64,
    i128,
    isize,
    u8,
    u16,
    u32,
    u64,
    u128,
    usize,
    f32,
    f64,
    str,
    String,
);

// References and owning pointers are never null.
impl<T: ?Sized> Nullable for &T {}
impl<T: ?Sized> Nullable for Box<T> {}
impl<T: ?Sized> Nullable for Rc<T> {}
impl<T: ?Sized> Nullable for Arc<T> {}

impl<T> Nullable for [T] {}
impl<T, const N: usize> Nullable for [T; N] {}
impl<T> Nullable for Vec<T> {}
impl<T, S> Nullable for HashSet<T, S> {}
impl<K, V, S> Nullable for HashMap<K, V, S> {}
impl<K, V> Nullable for BTreeMap<K, V> {}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    struct Record {
        _id: u32,
    }

    impl Nullable for Record {}

    #[test]
    fn test_untyped_absence_is_nil() {
        assert!(is_nil(None));
    }

    #[test]
    fn test_typed_nil_pointer_is_nil() {
        let typed: *const i32 = std::ptr::null();
        assert!(is_nil(Some(&typed)));

        let mutable: *mut String = std::ptr::null_mut();
        assert!(is_nil(Some(&mutable)));
    }

    #[test]
    fn test_non_null_pointer_is_not_nil() {
        let value = 5;
        let pointer: *const i32 = &value;
        assert!(!is_nil(Some(&pointer)));
    }

    #[test]
    fn test_empty_option_is_nil() {
        let empty: Option<Vec<u8>> = None;
        let full: Option<Vec<u8>> = Some(Vec::new());

        assert!(is_nil(Some(&empty)));
        assert!(!is_nil(Some(&full)));
    }

    #[test]
    fn test_zero_values_are_not_nil() {
        assert!(!is_nil(Some(&0)));
        assert!(!is_nil(Some(&0.0)));
        assert!(!is_nil(Some(&false)));
        assert!(!is_nil(Some(&"")));
        assert!(!is_nil(Some(&String::new())));
        assert!(!is_nil(Some(&[0u8; 4])));
        assert!(!is_nil(Some(&Vec::<i32>::new())));
        assert!(!is_nil(Some(&HashMap::<String, i32>::new())));
    }

    #[test]
    fn test_boxed_values_are_not_nil() {
        let boxed: Box<dyn Nullable> = Box::new(Option::<i32>::None);
        assert!(!is_nil(Some(&boxed)));
        assert!(!is_nil(Some(&Arc::new(1))));
    }

    #[test]
    fn test_records_are_not_nil() {
        assert!(!is_nil(Some(&Record { _id: 1 })));
    }

    #[test]
    fn test_json_null_is_nil() {
        assert!(is_nil(Some(&json!(null))));
        assert!(!is_nil(Some(&json!({}))));
    }
}
