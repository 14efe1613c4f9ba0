//! Query parameter collection.
//!
//! [`QueryParams`] is the query half of a request descriptor. A name holds at
//! most one value. Absent (`None`) and empty values are never stored, so they
//! never reach the wire.

use std::collections::BTreeMap;
use std::fmt;

/// Query parameters for a single request.
///
/// Setting a name twice replaces the earlier value. Setting a name to the
/// empty string removes it.
///
/// ```
/// use massive_core::QueryParams;
///
/// let params = QueryParams::new()
///     .with("adjusted", true)
///     .with("sort", "")
///     .with_opt("limit", None::<u32>);
///
/// assert_eq!(params.get("adjusted"), Some("true"));
/// assert_eq!(params.get("sort"), None);
/// assert_eq!(params.len(), 1);
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct QueryParams {
    params: BTreeMap<String, String>,
}

impl QueryParams {
    /// Creates an empty parameter set.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            params: BTreeMap::new(),
        }
    }

    /// Sets `name` to `value`, or removes `name` if `value` renders empty.
    pub fn set(&mut self, name: impl Into<String>, value: impl fmt::Display) -> &mut Self {
        let name = name.into();
        let value = value.to_string();
        if value.is_empty() {
            self.params.remove(&name);
        } else {
            self.params.insert(name, value);
        }
        self
    }

    /// Sets `name` when `value` is present; does nothing otherwise.
    pub fn set_opt<T: fmt::Display>(
        &mut self,
        name: impl Into<String>,
        value: Option<T>,
    ) -> &mut Self {
        if let Some(value) = value {
            self.set(name, value);
        }
        self
    }

    /// Builder form of [`set`](Self::set).
    #[must_use]
    pub fn with(mut self, name: impl Into<String>, value: impl fmt::Display) -> Self {
        self.set(name, value);
        self
    }

    /// Builder form of [`set_opt`](Self::set_opt).
    #[must_use]
    pub fn with_opt<T: fmt::Display>(mut self, name: impl Into<String>, value: Option<T>) -> Self {
        self.set_opt(name, value);
        self
    }

    /// Removes `name`, returning its previous value.
    pub fn remove(&mut self, name: &str) -> Option<String> {
        self.params.remove(name)
    }

    /// Returns the value stored for `name`.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.params.get(name).map(String::as_str)
    }

    /// Returns true if `name` has a value.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.params.contains_key(name)
    }

    /// Returns the number of parameters.
    #[must_use]
    pub fn len(&self) -> usize {
        self.params.len()
    }

    /// Returns true if there are no parameters.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }

    /// Iterates over `(name, value)` pairs in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.params.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl<K: Into<String>, V: fmt::Display> Extend<(K, V)> for QueryParams {
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (name, value) in iter {
            self.set(name, value);
        }
    }
}

impl<K: Into<String>, V: fmt::Display> FromIterator<(K, V)> for QueryParams {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut params = Self::new();
        params.extend(iter);
        params
    }
}
