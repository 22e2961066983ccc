use std::borrow::Cow;
use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet, VecDeque};
use std::rc::Rc;
use std::sync::Arc;

/// Zero value test used by the `omitempty` tag option.
///
/// Empty means: zero-length string or collection, `false`, numeric zero,
/// or an unset `Option`. Smart pointers delegate to their target.
pub trait IsEmpty {
    fn is_empty_value(&self) -> bool;
}

/// `IsEmpty` as a free function, for `#[serde(skip_serializing_if = "structfield::is_empty")]`.
pub fn is_empty<T: IsEmpty + ?Sized>(value: &T) -> bool {
    value.is_empty_value()
}

impl IsEmpty for str {
    fn is_empty_value(&self) -> bool {
        self.is_empty()
    }
}

impl IsEmpty for String {
    fn is_empty_value(&self) -> bool {
        self.is_empty()
    }
}

impl IsEmpty for bool {
    fn is_empty_value(&self) -> bool {
        !*self
    }
}

impl IsEmpty for char {
    fn is_empty_value(&self) -> bool {
        false
    }
}

macro_rules! impl_numeric {
    ($zero:literal => $($t:ty),*) => {
        $(
            impl IsEmpty for $t {
                fn is_empty_value(&self) -> bool {
                    *self == $zero
                }
            }
        )*
    };
}

impl_numeric!(0 => i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize);
impl_numeric!(0.0 => f32, f64);

impl<T> IsEmpty for Option<T> {
    fn is_empty_value(&self) -> bool {
        self.is_none()
    }
}

impl<T> IsEmpty for [T] {
    fn is_empty_value(&self) -> bool {
        self.is_empty()
    }
}

impl<T, const N: usize> IsEmpty for [T; N] {
    fn is_empty_value(&self) -> bool {
        N == 0
    }
}

impl<T> IsEmpty for Vec<T> {
    fn is_empty_value(&self) -> bool {
        self.is_empty()
    }
}

impl<T> IsEmpty for VecDeque<T> {
    fn is_empty_value(&self) -> bool {
        self.is_empty()
    }
}

impl<K, V, S> IsEmpty for HashMap<K, V, S> {
    fn is_empty_value(&self) -> bool {
        self.is_empty()
    }
}

impl<K, V> IsEmpty for BTreeMap<K, V> {
    fn is_empty_value(&self) -> bool {
        self.is_empty()
    }
}

impl<T, S> IsEmpty for HashSet<T, S> {
    fn is_empty_value(&self) -> bool {
        self.is_empty()
    }
}

impl<T> IsEmpty for BTreeSet<T> {
    fn is_empty_value(&self) -> bool {
        self.is_empty()
    }
}

impl<T: IsEmpty + ?Sized> IsEmpty for &T {
    fn is_empty_value(&self) -> bool {
        (**self).is_empty_value()
    }
}

impl<T: IsEmpty + ?Sized> IsEmpty for Box<T> {
    fn is_empty_value(&self) -> bool {
        (**self).is_empty_value()
    }
}

impl<T: IsEmpty + ?Sized> IsEmpty for Rc<T> {
    fn is_empty_value(&self) -> bool {
        (**self).is_empty_value()
    }
}

impl<T: IsEmpty + ?Sized> IsEmpty for Arc<T> {
    fn is_empty_value(&self) -> bool {
        (**self).is_empty_value()
    }
}

impl<T: IsEmpty + ToOwned + ?Sized> IsEmpty for Cow<'_, T> {
    fn is_empty_value(&self) -> bool {
        (**self).is_empty_value()
    }
}

impl IsEmpty for serde_json::Value {
    fn is_empty_value(&self) -> bool {
        use serde_json::Value;
        match self {
            Value::Null => true,
            Value::Bool(b) => !b,
            Value::Number(n) => n.as_f64() == Some(0.0),
            Value::String(s) => s.is_empty(),
            Value::Array(a) => a.is_empty(),
            Value::Object(o) => o.is_empty(),
        }
    }
}

// ---------------------------------------------------------------------------
// Emptiness for `omitempty` fields in derived records
// ---------------------------------------------------------------------------
//
// `(&EmptyCheck(&field)).check_empty()` resolves to `KnownEmpty` when the
// field type implements `IsEmpty`, and to `NeverEmpty` through one more
// autoref otherwise.

#[doc(hidden)]
pub struct EmptyCheck<'a, T: ?Sized>(pub &'a T);

#[doc(hidden)]
pub trait KnownEmpty {
    fn check_empty(&self) -> bool;
}

impl<T: IsEmpty + ?Sized> KnownEmpty for EmptyCheck<'_, T> {
    fn check_empty(&self) -> bool {
        self.0.is_empty_value()
    }
}

#[doc(hidden)]
pub trait NeverEmpty {
    fn check_empty(&self) -> bool;
}

impl<T: ?Sized> NeverEmpty for &EmptyCheck<'_, T> {
    fn check_empty(&self) -> bool {
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn zero_values_are_empty() {
        assert!(is_empty(""));
        assert!(is_empty(&String::new()));
        assert!(is_empty(&false));
        assert!(is_empty(&0i32));
        assert!(is_empty(&0u64));
        assert!(is_empty(&0.0f64));
        assert!(is_empty(&None::<String>));
        assert!(is_empty(&Vec::<u8>::new()));
        assert!(is_empty(&HashMap::<String, i32>::new()));
        assert!(is_empty(&[0u8; 0]));
    }

    #[test]
    fn set_values_are_not_empty() {
        assert!(!is_empty("meow"));
        assert!(!is_empty(&true));
        assert!(!is_empty(&-1i64));
        assert!(!is_empty(&0.5f32));
        assert!(!is_empty(&Some(String::new())));
        assert!(!is_empty(&vec![0u8]));
        assert!(!is_empty(&[0u8; 2]));
        assert!(!is_empty(&'x'));
    }

    #[test]
    fn pointers_delegate() {
        assert!(is_empty(&Box::new(String::new())));
        assert!(!is_empty(&Arc::new(1u8)));
        assert!(is_empty(&Rc::new(Vec::<i32>::new())));
        assert!(is_empty(&Cow::Borrowed("")));
    }

    #[test]
    fn check_falls_back_to_never_empty() {
        struct Opaque;

        use super::{KnownEmpty as _, NeverEmpty as _};
        assert!((&EmptyCheck(&String::new())).check_empty());
        assert!(!(&EmptyCheck(&"x")).check_empty());
        assert!(!(&EmptyCheck(&Opaque)).check_empty());
    }

    #[test]
    fn json_values() {
        for v in [json!(null), json!(false), json!(0), json!(0.0), json!(""), json!([]), json!({})] {
            assert!(is_empty(&v), "{v} should be empty");
        }
        for v in [json!(true), json!(1), json!("a"), json!([0]), json!({"a": null})] {
            assert!(!is_empty(&v), "{v} should not be empty");
        }
    }
}
