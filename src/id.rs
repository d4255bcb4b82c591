//! Code for handling the string keys used to look up reference data
use anyhow::{Context, Result};
use indexmap::IndexMap;
use std::borrow::Borrow;

/// A trait alias for ID types
pub trait IDLike:
    Eq + std::hash::Hash + Borrow<str> + Clone + std::fmt::Display + From<String>
{
}
impl<T> IDLike for T where
    T: Eq + std::hash::Hash + Borrow<str> + Clone + std::fmt::Display + From<String>
{
}

macro_rules! define_id_type {
    ($name:ident) => {
        #[derive(
            Clone,
            std::hash::Hash,
            PartialEq,
            Eq,
            PartialOrd,
            Ord,
            serde::Deserialize,
            Debug,
            serde::Serialize,
        )]
        /// An ID type (e.g. `PostalCode`, `RegionID`, etc.)
        pub struct $name(pub std::rc::Rc<str>);

        impl std::borrow::Borrow<str> for $name {
            fn borrow(&self) -> &str {
                &self.0
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<&str> for $name {
            fn from(s: &str) -> Self {
                $name(std::rc::Rc::from(s))
            }
        }

        impl From<String> for $name {
            fn from(s: String) -> Self {
                $name(std::rc::Rc::from(s))
            }
        }

        impl $name {
            /// Create a new ID from a string slice
            pub fn new(id: &str) -> Self {
                $name(std::rc::Rc::from(id))
            }
        }
    };
}
pub(crate) use define_id_type;

#[cfg(test)]
define_id_type!(GenericID);

/// Indicates that the struct has an ID field
pub trait HasID<ID: IDLike> {
    /// Get the struct's ID
    fn get_id(&self) -> &ID;
}

/// Implement the `HasID` trait for the given type, assuming it has a field called `id`
macro_rules! define_id_getter {
    ($t:ty, $id_ty:ty, $field:ident) => {
        impl crate::id::HasID<$id_ty> for $t {
            fn get_id(&self) -> &$id_ty {
                &self.$field
            }
        }
    };
}
pub(crate) use define_id_getter;

/// Look up an entry in a map by the string form of its key.
///
/// # Arguments
///
/// * `map` - The map to search
/// * `id` - The string representation of the key
/// * `kind` - What the key identifies, used in the error message (e.g. "postal code")
///
/// # Returns
///
/// A reference to the entry, or an error naming the unknown key.
pub fn get_by_id<'a, ID: IDLike, V>(
    map: &'a IndexMap<ID, V>,
    id: &str,
    kind: &str,
) -> Result<&'a V> {
    map.get(id).with_context(|| format!("Unknown {kind}: {id}"))
}

/// Collect items into a map keyed by their ID, raising an error on duplicate IDs.
pub fn collect_id_map<ID, T, I>(iter: I) -> Result<IndexMap<ID, T>>
where
    ID: IDLike,
    T: HasID<ID>,
    I: IntoIterator<Item = T>,
{
    let mut map = IndexMap::new();
    for item in iter {
        let id = item.get_id().clone();
        anyhow::ensure!(!map.contains_key(&id), "Duplicate ID found: {id}");
        map.insert(id, item);
    }

    Ok(map)
}
