use std::fmt;

use serde::Serialize;

/// One normalized address entry.
///
/// Equality and hashing cover all four fields, so two addresses that differ
/// only in floor count are distinct keys.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct Address {
    city: String,
    street: String,
    house: String,
    floor: i32,
}

impl Address {
    pub fn new(
        city: impl Into<String>,
        street: impl Into<String>,
        house: impl Into<String>,
        floor: i32,
    ) -> Self {
        Self {
            city: city.into(),
            street: street.into(),
            house: house.into(),
            floor,
        }
    }

    pub fn city(&self) -> &str {
        &self.city
    }

    pub fn street(&self) -> &str {
        &self.street
    }

    pub fn house(&self) -> &str {
        &self.house
    }

    /// Floor count exactly as it appeared in the source, never clamped.
    pub fn floor(&self) -> i32 {
        self.floor
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "City: {}, Street: {}, House: {}, Floors: {}",
            self.city, self.street, self.house, self.floor
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn equality_is_structural() {
        let a = Address::new("Moscow", "Tverskaya", "1", 3);
        let b = Address::new(String::from("Moscow"), "Tverskaya", "1", 3);
        assert_eq!(a, b);

        let mut set = HashSet::new();
        set.insert(a);
        assert!(set.contains(&b));
    }

    #[test]
    fn floor_participates_in_equality() {
        let a = Address::new("Moscow", "Tverskaya", "1", 3);
        let b = Address::new("Moscow", "Tverskaya", "1", 4);
        assert_ne!(a, b);
    }

    #[test]
    fn display_lists_all_fields() {
        let a = Address::new("Kazan", "Baumana", "12a", 5);
        assert_eq!(
            a.to_string(),
            "City: Kazan, Street: Baumana, House: 12a, Floors: 5"
        );
    }

    #[test]
    fn out_of_range_floor_is_kept_verbatim() {
        let a = Address::new("Omsk", "Lenina", "7", 42);
        assert_eq!(a.floor(), 42);
        let b = Address::new("Omsk", "Lenina", "7", -1);
        assert_eq!(b.floor(), -1);
    }
}
