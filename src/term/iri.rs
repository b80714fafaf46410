//! IRI helpers and prefix maps

use std::fmt;

use indexmap::IndexMap;

use crate::core::ns;

/// An IRI reference
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Iri {
    value: String,
}

impl Iri {
    /// Create a new IRI
    pub fn new(value: impl Into<String>) -> Self {
        Iri { value: value.into() }
    }

    /// Get the IRI as a string slice
    pub fn as_str(&self) -> &str {
        &self.value
    }

    /// Get the namespace (everything up to and including the last # or /)
    pub fn namespace(&self) -> &str {
        match self.split_point() {
            Some(pos) => &self.value[..=pos],
            None => &self.value,
        }
    }

    /// Get the local name (fragment or last path segment)
    pub fn local_name(&self) -> &str {
        match self.split_point() {
            Some(pos) => &self.value[pos + 1..],
            None => &self.value,
        }
    }

    fn split_point(&self) -> Option<usize> {
        self.value.rfind('#').or_else(|| self.value.rfind('/'))
    }

    /// Whether the IRI carries a scheme (`http:`, `urn:`, ...)
    pub fn is_absolute(&self) -> bool {
        match self.value.find(':') {
            Some(pos) if pos > 0 => self.value[..pos]
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.')),
            _ => false,
        }
    }
}

impl fmt::Debug for Iri {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<{}>", self.value)
    }
}

impl fmt::Display for Iri {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<{}>", self.value)
    }
}

impl From<&str> for Iri {
    fn from(s: &str) -> Self {
        Iri::new(s)
    }
}

impl From<String> for Iri {
    fn from(s: String) -> Self {
        Iri::new(s)
    }
}

// ============================================================================
// Prefix map
// ============================================================================

/// Ordered prefix to namespace bindings
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PrefixMap {
    prefixes: IndexMap<String, String>,
}

impl Default for PrefixMap {
    fn default() -> Self {
        let mut map = PrefixMap::empty();
        map.insert("swrlb", ns::SWRLB);
        map.insert("swrl", ns::SWRL);
        map.insert("xsd", ns::XSD);
        map.insert("rdf", ns::RDF);
        map.insert("rdfs", ns::RDFS);
        map.insert("owl", ns::OWL);
        map
    }
}

impl PrefixMap {
    /// A map with no bindings
    pub fn empty() -> Self {
        PrefixMap {
            prefixes: IndexMap::new(),
        }
    }

    /// Bind a prefix, replacing any earlier binding
    pub fn insert(&mut self, prefix: impl Into<String>, namespace: impl Into<String>) {
        self.prefixes.insert(prefix.into(), namespace.into());
    }

    pub fn namespace(&self, prefix: &str) -> Option<&str> {
        self.prefixes.get(prefix).map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.prefixes.iter().map(|(p, n)| (p.as_str(), n.as_str()))
    }

    pub fn len(&self) -> usize {
        self.prefixes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.prefixes.is_empty()
    }

    /// Expand `prefix:local` to a full IRI
    pub fn expand(&self, prefix: &str, local: &str) -> Option<String> {
        self.namespace(prefix).map(|namespace| ns::uri(namespace, local))
    }

    /// Compact an IRI with the longest matching namespace
    pub fn compact(&self, iri: &str) -> Option<String> {
        self.prefixes
            .iter()
            .filter(|(_, namespace)| !namespace.is_empty())
            .filter_map(|(prefix, namespace)| {
                ns::local_name(iri, namespace).map(|local| (prefix, namespace.len(), local))
            })
            .filter(|(_, _, local)| is_local_name(local))
            .max_by_key(|(_, len, _)| *len)
            .map(|(prefix, _, local)| format!("{}:{}", prefix, local))
    }

    /// Compact an IRI, or write it as `<iri>` when no prefix applies
    pub fn render(&self, iri: &str) -> String {
        self.compact(iri).unwrap_or_else(|| format!("<{}>", iri))
    }

    /// Compact a datatype identifier. Short forms such as `int` or `xsd:int`
    /// are already compact and pass through unchanged.
    pub fn render_datatype(&self, datatype: &str) -> String {
        if Iri::new(datatype).is_absolute() && !self.is_prefixed(datatype) {
            self.render(datatype)
        } else {
            datatype.to_string()
        }
    }

    fn is_prefixed(&self, name: &str) -> bool {
        name.split_once(':')
            .map_or(false, |(prefix, _)| self.prefixes.contains_key(prefix))
    }
}

/// Characters allowed in the local part of a compact name
pub fn is_local_name(local: &str) -> bool {
    local
        .chars()
        .all(|c| c.is_alphanumeric() || matches!(c, '_' | '-' | '.'))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_namespace() {
        let iri = Iri::new("http://www.w3.org/2003/11/swrlb#mod");
        assert_eq!(iri.namespace(), "http://www.w3.org/2003/11/swrlb#");
        assert_eq!(iri.local_name(), "mod");
        assert!(iri.is_absolute());

        let iri2 = Iri::new("http://example.org/path/name");
        assert_eq!(iri2.namespace(), "http://example.org/path/");
        assert_eq!(iri2.local_name(), "name");
        assert!(!Iri::new("int").is_absolute());
    }

    #[test]
    fn test_expand_and_compact() {
        let prefixes = PrefixMap::default();
        assert_eq!(
            prefixes.expand("swrlb", "mod").as_deref(),
            Some("http://www.w3.org/2003/11/swrlb#mod")
        );
        assert_eq!(prefixes.expand("ex", "mod"), None);
        assert_eq!(
            prefixes.compact("http://www.w3.org/2001/XMLSchema#integer").as_deref(),
            Some("xsd:integer")
        );
    }

    #[test]
    fn test_compact_prefers_longest_namespace() {
        let mut prefixes = PrefixMap::empty();
        prefixes.insert("w3", "http://www.w3.org/");
        prefixes.insert("swrlb", ns::SWRLB);
        assert_eq!(
            prefixes.compact("http://www.w3.org/2003/11/swrlb#mod").as_deref(),
            Some("swrlb:mod")
        );
    }

    #[test]
    fn test_render_unknown_iri() {
        let prefixes = PrefixMap::default();
        assert_eq!(
            prefixes.render("http://example.org/fn#f"),
            "<http://example.org/fn#f>"
        );
    }

    #[test]
    fn test_render_datatype() {
        let prefixes = PrefixMap::default();
        assert_eq!(prefixes.render_datatype("int"), "int");
        assert_eq!(prefixes.render_datatype("xsd:int"), "xsd:int");
        assert_eq!(
            prefixes.render_datatype("http://www.w3.org/2001/XMLSchema#float"),
            "xsd:float"
        );
    }
}
