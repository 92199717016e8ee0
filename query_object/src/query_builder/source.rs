//! Registered FROM sources
//!
//! Sources are kept in registration order, which is their emission order.
//! Registering a name again replaces its alias in place.

use indexmap::IndexMap;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Sources {
    entries: IndexMap<String, Option<String>>,
}

impl Sources {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a source or overwrite the alias of an existing one
    pub fn register(&mut self, name: String, alias: Option<String>) {
        self.entries.insert(name, alias);
    }

    /// Alias registered for `name`, if the name is known and aliased
    pub fn alias(&self, name: &str) -> Option<&str> {
        self.entries.get(name).and_then(|alias| alias.as_deref())
    }

    /// Entries in emission order
    pub fn iter(&self) -> impl Iterator<Item = (&str, Option<&str>)> {
        self.entries
            .iter()
            .map(|(name, alias)| (name.as_str(), alias.as_deref()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sources_keep_registration_order() {
        let mut sources = Sources::new();
        sources.register("User".to_string(), Some("u".to_string()));
        sources.register("Role".to_string(), None);

        let names: Vec<&str> = sources.iter().map(|(name, _)| name).collect();
        assert_eq!(names, vec!["User", "Role"]);
    }

    #[test]
    fn test_reregistration_overwrites_alias_in_place() {
        let mut sources = Sources::new();
        sources.register("User".to_string(), Some("u".to_string()));
        sources.register("Role".to_string(), Some("r".to_string()));
        sources.register("User".to_string(), Some("usr".to_string()));

        assert_eq!(sources.len(), 2);
        assert_eq!(sources.alias("User"), Some("usr"));
        assert_eq!(sources.iter().next(), Some(("User", Some("usr"))));
    }
}
