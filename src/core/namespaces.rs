//! Standard SWRL, RDF and XSD namespace URI constants
//!
//! These constants provide compile-time verified namespace URIs for
//! use throughout the codebase, eliminating string typos.

/// Standard namespace URI constants
pub mod ns {
    // W3C Core Vocabularies
    /// RDF namespace
    pub const RDF: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#";
    /// RDF Schema namespace
    pub const RDFS: &str = "http://www.w3.org/2000/01/rdf-schema#";
    /// XML Schema Datatypes namespace
    pub const XSD: &str = "http://www.w3.org/2001/XMLSchema#";
    /// OWL Web Ontology Language namespace
    pub const OWL: &str = "http://www.w3.org/2002/07/owl#";

    // SWRL
    /// SWRL rule vocabulary (swrl:)
    pub const SWRL: &str = "http://www.w3.org/2003/11/swrl#";
    /// SWRL built-ins (swrlb:)
    pub const SWRLB: &str = "http://www.w3.org/2003/11/swrlb#";
    /// Default namespace for rule variables in the XML encoding
    pub const VARIABLE: &str = "urn:swrl#";

    /// Helper to construct a full URI from namespace and local name
    #[inline]
    pub fn uri(namespace: &str, local: &str) -> String {
        format!("{}{}", namespace, local)
    }

    /// Check if a URI belongs to a namespace
    #[inline]
    pub fn in_namespace(uri: &str, namespace: &str) -> bool {
        uri.starts_with(namespace)
    }

    /// Extract local name from a URI given its namespace
    #[inline]
    pub fn local_name<'a>(uri: &'a str, namespace: &str) -> Option<&'a str> {
        uri.strip_prefix(namespace)
    }
}
