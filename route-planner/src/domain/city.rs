//! City names.

use std::fmt;
use std::hash::{Hash, Hasher};

/// A city served by one or more schedule legs.
///
/// Schedule data spells city names inconsistently ("Dhaka", "dhaka",
/// " DHAKA"), so a `City` keeps the name as it was written for display and
/// a canonical key (trimmed, lowercase) for comparison. Equality and hashing
/// use only the key.
///
/// # Examples
///
/// ```
/// use route_planner::domain::City;
///
/// let a = City::new("Chattogram");
/// let b = City::new("  chattogram ");
///
/// assert_eq!(a, b);
/// assert_eq!(a.key(), "chattogram");
/// assert_eq!(a.name(), "Chattogram");
/// ```
#[derive(Clone)]
pub struct City {
    name: String,
    key: String,
}

impl City {
    /// Create a city from a name as written in the schedule.
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        let key = canonical_key(&name);
        Self { name, key }
    }

    /// Returns the name as originally written.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the canonical lookup key.
    pub fn key(&self) -> &str {
        &self.key
    }

}

/// Canonicalize a city name for lookup: trimmed and lowercased.
pub fn canonical_key(name: &str) -> String {
    name.trim().to_lowercase()
}

impl PartialEq for City {
    fn eq(&self, other: &Self) -> bool {
        self.key == other.key
    }
}

impl Eq for City {}

impl Hash for City {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.key.hash(state);
    }
}

impl fmt::Debug for City {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "City({})", self.name)
    }
}

impl fmt::Display for City {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name.trim())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn canonical_key_trims_and_lowercases() {
        assert_eq!(canonical_key("Dhaka"), "dhaka");
        assert_eq!(canonical_key("  Cox's Bazar  "), "cox's bazar");
        assert_eq!(canonical_key(""), "");
    }

    #[test]
    fn equality_ignores_case() {
        assert_eq!(City::new("Sylhet"), City::new("SYLHET"));
        assert_ne!(City::new("Sylhet"), City::new("Rajshahi"));
    }

    #[test]
    fn name_is_preserved() {
        let city = City::new("Jamalpur");
        assert_eq!(city.name(), "Jamalpur");
        assert_eq!(city.to_string(), "Jamalpur");
        assert_eq!(format!("{:?}", city), "City(Jamalpur)");
    }

    #[test]
    fn hash_consistent_with_eq() {
        use std::collections::HashSet;
        let mut set = HashSet::new();
        set.insert(City::new("Dhaka"));
        assert!(set.contains(&City::new("dhaka")));
        assert!(!set.contains(&City::new("Comilla")));
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Case changes never affect equality
        #[test]
        fn case_insensitive(s in "[A-Za-z ]{1,12}") {
            prop_assert_eq!(City::new(s.to_uppercase()), City::new(s.to_lowercase()));
        }

        /// The key is idempotent
        #[test]
        fn key_idempotent(s in "[A-Za-z0-9 '\\-]{0,16}") {
            let once = canonical_key(&s);
            prop_assert_eq!(canonical_key(&once), once.clone());
        }
    }
}
