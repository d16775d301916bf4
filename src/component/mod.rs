//! Component kinds, their typed properties and the registry that ties them together.
//!
//! Every per-kind decision (default props, validation, property editors, palette
//! label) is made in one table in [`registry`]. Other modules dispatch through
//! [`ComponentKind::spec`] or match on [`ComponentProps`] instead of switching on
//! type-name strings.

pub mod editor;
pub mod props;
pub mod registry;

pub use editor::{EditorKind, PropertyEditor};
pub use props::*;
pub use registry::{ComponentKind, ComponentProps, ComponentRegistry, ComponentSpec};
