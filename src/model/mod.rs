/// Labelled tree arena built by the Newick parser
pub mod tree;
/// Leaf-indexed tree arena used for encoding, decoding and editing
pub mod topology;
/// Tree vertex types (root, internal, leaf)
pub mod vertex;
/// Leaf label mapping to dense indices
pub mod label_mapping;
pub(crate) mod fenwick;

pub use label_mapping::LabelMapping;
pub use topology::Topology;
pub use tree::Tree;
