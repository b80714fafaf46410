//! XML encoding of built-in atoms
//!
//! ```xml
//! <BuiltInAtom IRI="http://www.w3.org/2003/11/swrlb#mod">
//!   <Variable IRI="urn:swrl#X"/>
//!   <Literal datatypeIRI="http://www.w3.org/2001/XMLSchema#int">5</Literal>
//!   <Literal xml:lang="en">five</Literal>
//! </BuiltInAtom>
//! ```

use tracing::debug;

use crate::atom::{BuiltinArgument, BuiltinAtom};
use crate::core::ns;
use crate::error::{ErrorCode, SwrlError, SwrlResult};
use crate::term::{Iri, LiteralKind, TypedLiteral, Variable};

use super::element::Element;

pub const ATOM_ELEMENT: &str = "BuiltInAtom";
pub const VARIABLE_ELEMENT: &str = "Variable";
pub const LITERAL_ELEMENT: &str = "Literal";
pub const IRI_ATTRIBUTE: &str = "IRI";
pub const DATATYPE_ATTRIBUTE: &str = "datatypeIRI";
pub const LANGUAGE_ATTRIBUTE: &str = "xml:lang";

/// Converts atoms to and from element trees
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AtomCodec {
    variable_namespace: String,
}

impl Default for AtomCodec {
    fn default() -> Self {
        AtomCodec::new(ns::VARIABLE)
    }
}

impl AtomCodec {
    /// A codec writing variables as `<namespace><name>`
    pub fn new(variable_namespace: impl Into<String>) -> Self {
        AtomCodec {
            variable_namespace: variable_namespace.into(),
        }
    }

    pub fn variable_namespace(&self) -> &str {
        &self.variable_namespace
    }

    /// Encode an atom; arguments become children in order
    pub fn encode(&self, atom: &BuiltinAtom) -> Element {
        atom.arguments().iter().fold(
            Element::new(ATOM_ELEMENT).with_attribute(IRI_ATTRIBUTE, atom.predicate()),
            |element, arg| element.with_child(self.encode_argument(arg)),
        )
    }

    fn encode_argument(&self, argument: &BuiltinArgument) -> Element {
        match argument {
            BuiltinArgument::Variable(v) => Element::new(VARIABLE_ELEMENT)
                .with_attribute(IRI_ATTRIBUTE, ns::uri(&self.variable_namespace, v.name())),
            BuiltinArgument::Literal(lit) => {
                let element = Element::new(LITERAL_ELEMENT).with_text(lit.lexical());
                match lit.kind() {
                    LiteralKind::Numeric(dt) | LiteralKind::Typed(dt) => {
                        element.with_attribute(DATATYPE_ATTRIBUTE, dt.as_str())
                    }
                    LiteralKind::Language(lang) => element.with_attribute(LANGUAGE_ATTRIBUTE, lang.as_str()),
                    LiteralKind::Plain => element,
                }
            }
        }
    }

    /// Decode an atom element
    ///
    /// The argument count is not checked here; an atom with the wrong number
    /// of arguments is rejected when it is evaluated.
    pub fn decode(&self, element: &Element) -> SwrlResult<BuiltinAtom> {
        if element.name() != ATOM_ELEMENT {
            return Err(SwrlError::malformed(format!(
                "Expected <{}>, found <{}>",
                ATOM_ELEMENT,
                element.name()
            )));
        }
        let predicate = element.attribute(IRI_ATTRIBUTE).ok_or_else(|| {
            SwrlError::malformed(format!("<{}> has no {} attribute", ATOM_ELEMENT, IRI_ATTRIBUTE))
        })?;
        let arguments = element
            .children()
            .iter()
            .enumerate()
            .map(|(position, child)| {
                self.decode_argument(child)
                    .map_err(|e| e.with_context("argument", (position + 1).to_string()))
            })
            .collect::<SwrlResult<Vec<_>>>()?;
        debug!(predicate, arguments = arguments.len(), "decoded built-in atom");
        Ok(BuiltinAtom::new(predicate, arguments))
    }

    fn decode_argument(&self, element: &Element) -> SwrlResult<BuiltinArgument> {
        match element.name() {
            VARIABLE_ELEMENT => {
                let iri = element.attribute(IRI_ATTRIBUTE).ok_or_else(|| {
                    SwrlError::malformed(format!("<{}> has no {} attribute", VARIABLE_ELEMENT, IRI_ATTRIBUTE))
                })?;
                let name = match ns::local_name(iri, &self.variable_namespace) {
                    Some(local) => local.to_string(),
                    None => Iri::new(iri).local_name().to_string(),
                };
                Ok(BuiltinArgument::Variable(Variable::new(name)))
            }
            LITERAL_ELEMENT => {
                let lexical = element.text();
                let literal = match (
                    element.attribute(DATATYPE_ATTRIBUTE),
                    element.attribute(LANGUAGE_ATTRIBUTE),
                ) {
                    (Some(_), Some(_)) => {
                        return Err(SwrlError::new(
                            ErrorCode::InvalidLiteral,
                            format!(
                                "<{}> has both {} and {}",
                                LITERAL_ELEMENT, DATATYPE_ATTRIBUTE, LANGUAGE_ATTRIBUTE
                            ),
                        )
                        .with_context("lexical", lexical))
                    }
                    (Some(""), None) => {
                        return Err(SwrlError::new(
                            ErrorCode::InvalidLiteral,
                            format!("<{}> has an empty {}", LITERAL_ELEMENT, DATATYPE_ATTRIBUTE),
                        )
                        .with_context("lexical", lexical))
                    }
                    (Some(dt), None) => TypedLiteral::typed(lexical, dt),
                    (None, Some(lang)) => TypedLiteral::with_language(lexical, lang),
                    (None, None) => TypedLiteral::plain(lexical),
                };
                Ok(BuiltinArgument::Literal(literal))
            }
            other => Err(SwrlError::malformed(format!(
                "Unexpected <{}> inside <{}>",
                other, ATOM_ELEMENT
            ))),
        }
    }

    /// Encode an atom as an XML string
    pub fn to_xml(&self, atom: &BuiltinAtom) -> SwrlResult<String> {
        self.encode(atom).to_xml()
    }

    /// Decode an atom from an XML string
    pub fn from_xml(&self, input: &str) -> SwrlResult<BuiltinAtom> {
        self.decode(&Element::from_xml(input)?)
    }
}
