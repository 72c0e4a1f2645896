//! # firepack_document
//!
//! Read-only index over flattened scene-graph documents.
//!
//! The visual editor serializes a scene or prefab as a single JSON array of
//! heterogeneous records, cross-referenced by 0-based integer handles
//! (`{"__id__": n}`). This crate parses that array once and provides:
//!
//! - **Handle resolution**: explicit, fallible lookup of records by handle
//! - **Component access**: a node's attached components, in stored order
//! - **Type indexing**: fast tag-based lookup built with `ahash`
//! - **Root discovery**: scene and prefab entry points
//!
//! The traversal only follows node→children and node→components edges,
//! which the editor guarantees to be acyclic, so no cycle detection is
//! performed here.

pub mod document;
pub mod index;
pub mod record;
pub mod values;

pub use document::Document;
pub use index::{TypeIndex, build_type_index};
pub use record::{Handle, Record, handle_of};
pub use values::{Rect, Rgb, Rgba, Size, Vec2, Vec3};
