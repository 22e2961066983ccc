use std::rc::Rc;
use std::sync::Arc;

use serde_json::Value;

use crate::schema::Schema;

/// A fixed-schema aggregate of named fields.
///
/// Usually derived with `#[derive(Record)]`. Indices passed to
/// `field_is_empty()` and `field_value()` are positions in `schema().fields`.
///
/// References and smart pointers to a record are records themselves,
/// so any chain of indirection resolves to the underlying value.
pub trait Record {
    fn schema(&self) -> &'static Schema;

    /// `true` if the field holds its type's zero value.
    ///
    /// Only consulted for fields tagged `omitempty`.
    fn field_is_empty(&self, index: usize) -> bool;

    fn field_value(&self, index: usize) -> Result<Value, serde_json::Error>;
}

macro_rules! forward_record {
    ($($ptr:ty),*) => {
        $(
            impl<T: Record + ?Sized> Record for $ptr {
                fn schema(&self) -> &'static Schema {
                    (**self).schema()
                }

                fn field_is_empty(&self, index: usize) -> bool {
                    (**self).field_is_empty(index)
                }

                fn field_value(&self, index: usize) -> Result<Value, serde_json::Error> {
                    (**self).field_value(index)
                }
            }
        )*
    };
}

forward_record!(&T, &mut T, Box<T>, Rc<T>, Arc<T>);
