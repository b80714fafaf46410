//! Core abstractions and common definitions for swrl-builtins
//!
//! This module provides:
//! - `traits`: the binding table and evaluation hook seams
//! - `namespaces`: standard SWRL/RDF/XSD namespace URI constants

pub mod traits;
pub mod namespaces;

pub use traits::*;
pub use namespaces::ns;
