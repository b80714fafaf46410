//! Atom codecs
//!
//! - [`element`]: a small XML element tree on top of `quick-xml`
//! - [`atom_xml`]: `<BuiltInAtom>` encoding of built-in atoms
//! - [`notation`]: parser for the compact `swrlb:mod(?X,?Y,5)` notation

pub mod atom_xml;
pub mod element;
pub mod notation;

pub use atom_xml::AtomCodec;
pub use element::Element;
pub use notation::{parse_atom, NotationParser, ParseError};
