//! Ordered variable set produced by a setup script.

/// Variables assigned by a setup script, in first-assignment order.
///
/// Reassigning a name keeps its original position and replaces the value,
/// which matches what a shell leaves behind after sourcing the file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SetupEnv {
    vars: Vec<(String, String)>,
}

impl SetupEnv {
    /// Create an empty variable set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Assign `name`, replacing any earlier value.
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        let value = value.into();

        match self.vars.iter_mut().find(|(n, _)| *n == name) {
            Some(slot) => slot.1 = value,
            None => self.vars.push((name, value)),
        }
    }

    /// Look up a variable assigned by the script.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.vars
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    /// Iterate over `(name, value)` pairs in assignment order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.vars.iter().map(|(n, v)| (n.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.vars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vars.is_empty()
    }
}

impl IntoIterator for SetupEnv {
    type Item = (String, String);
    type IntoIter = std::vec::IntoIter<(String, String)>;

    fn into_iter(self) -> Self::IntoIter {
        self.vars.into_iter()
    }
}
