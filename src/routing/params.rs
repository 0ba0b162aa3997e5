//! Captured path parameters.

/// Parameter values captured from a path, in pattern declaration order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Params {
    entries: Vec<(String, String)>,
}

impl Params {
    pub fn new() -> Self {
        Self::default()
    }

    /// Value captured for `name`, if the pattern declares it.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Entries as `(name, value)` pairs, usable directly for reverse lookup.
    pub fn as_slice(&self) -> &[(String, String)] {
        &self.entries
    }

    pub(crate) fn push(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.entries.push((name.into(), value.into()));
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Params {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut params = Params::new();
        for (k, v) in iter {
            params.push(k, v);
        }
        params
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_params_preserve_order() {
        let params: Params = [("org", "acme"), ("repo", "widgets")].into_iter().collect();

        assert_eq!(params.len(), 2);
        assert_eq!(params.get("repo"), Some("widgets"));
        assert_eq!(params.get("missing"), None);
        assert_eq!(
            params.iter().map(|(k, _)| k).collect::<Vec<_>>(),
            vec!["org", "repo"]
        );
    }
}
