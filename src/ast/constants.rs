use indexmap::IndexMap;
use log::debug;

use super::Value;

/// Constants declared so far in one document, in declaration order.
///
/// Lives for exactly one parse. Names declared later in the text are not
/// visible yet, which is what makes declaration order significant.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct ConstantTable {
    entries: IndexMap<String, Value>,
}

impl ConstantTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts or overwrites. A redeclared name keeps its original slot.
    pub fn declare(&mut self, name: impl Into<String>, value: Value) {
        let name = name.into();
        debug!("set {} = {}", name, value);
        if let Some(previous) = self.entries.insert(name.clone(), value) {
            debug!("constant '{}' redeclared (was {})", name, previous);
        }
    }

    pub fn resolve(&self, name: &str) -> Option<&Value> {
        self.entries.get(name)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn redeclaration_overwrites_in_place() {
        let mut table = ConstantTable::new();
        table.declare("A", Value::Integer(1));
        table.declare("B", Value::Integer(2));
        table.declare("A", Value::from("again"));

        assert_eq!(table.len(), 2);
        assert_eq!(table.resolve("A"), Some(&Value::from("again")));
        let names: Vec<&str> = table.iter().map(|(k, _)| k).collect();
        assert_eq!(names, vec!["A", "B"]);
    }

    #[test]
    fn unknown_name_is_none() {
        let table = ConstantTable::new();
        assert!(table.is_empty());
        assert_eq!(table.resolve("nope"), None);
    }
}
