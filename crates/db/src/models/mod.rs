//! Row structs for the document table.

pub mod document;
