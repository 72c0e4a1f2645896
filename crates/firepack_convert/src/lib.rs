//! Scene graph normalization
//!
//! Converts flattened editor scene/prefab documents into normalized typed
//! trees. The pipeline is classify → extract → recurse: the tree builder
//! resolves the root through the document index, the classifier picks a node
//! kind from the attached components, the matching property extractor
//! produces the normalized object (resolving assets and reshaping animation
//! curves on the way), and the builder descends into the children the
//! extractor allows.
//!
//! All mutable run state (asset resolutions, converted clips) lives in an
//! explicit [`ConvertContext`] scoped to one batch run, never in globals.

pub mod animation;
pub mod assets;
pub mod classify;
pub mod context;
pub mod extract;
pub mod tree;

pub use animation::{AnimationBlock, AnimationClip, CurveGroup, CurveProps, CurveValue, Keyframe};
pub use assets::{AssetResolver, AssetTable, FontInfo, FontTechnology, SpriteFrameInfo, SpriteFrameMeta};
pub use classify::{NodeKind, classify};
pub use context::{ClipCache, ConvertContext, Quirks};
pub use extract::{ChildPolicy, Extraction, PropertyExtractor, register_default_extractors};
pub use tree::{NormalizedNode, NormalizedTree, SCHEMA_VERSION, TreeBuilder};
