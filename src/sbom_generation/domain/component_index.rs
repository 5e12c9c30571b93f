use std::collections::HashMap;

/// Lookup from package name to the reference identifier of its component
///
/// Built once before dependency edges are resolved and read-only afterwards.
/// When a listing reports the same name twice, the first component wins.
#[derive(Debug, Clone, Default)]
pub struct ComponentIndex {
    refs: HashMap<String, String>,
}

impl ComponentIndex {
    pub fn build<'a, I>(entries: I) -> Self
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let mut refs = HashMap::new();
        for (name, bom_ref) in entries {
            refs.entry(name.to_string())
                .or_insert_with(|| bom_ref.to_string());
        }
        Self { refs }
    }

    pub fn lookup(&self, package_name: &str) -> Option<&str> {
        self.refs.get(package_name).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.refs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.refs.is_empty()
    }
}
