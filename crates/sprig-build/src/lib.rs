//! Sprig Build - Element construction
//!
//! Polymorphic argument classification, the element builder, reusable
//! partial builders, and the tag registry.

mod builder;
mod classify;
mod partial;
mod registry;
mod value;

pub use builder::{apply, build, build_value};
pub use classify::{Arg, classify};
pub use partial::Partial;
pub use registry::{DEFAULT_TAGS, TagRegistry};
pub use value::Value;

use sprig_dom::DomError;

/// Result type for build operations
pub type BuildResult<T> = Result<T, BuildError>;

/// Build errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BuildError {
    /// Argument shape is not one of {string, attribute map, node, list}
    #[error("invalid argument type: {type_name}")]
    InvalidArgumentType { type_name: &'static str },

    /// Attribute map entry whose value is not a scalar
    #[error("invalid attribute value for '{name}': {type_name}")]
    InvalidAttributeEntry { name: String, type_name: &'static str },

    /// Tag not present in the registry
    #[error("unknown tag: {0}")]
    UnknownTag(String),

    #[error(transparent)]
    Dom(#[from] DomError),
}

/// Build a `Vec<Arg>` from anything convertible into an [`Arg`].
///
/// ```
/// use sprig_build::{args, Arg};
/// use sprig_dom::AttrMap;
///
/// let args = args![AttrMap::new().with("class", "row"), "hello"];
/// assert_eq!(args.len(), 2);
/// ```
#[macro_export]
macro_rules! args {
    () => {
        ::std::vec::Vec::<$crate::Arg>::new()
    };
    ($($arg:expr),+ $(,)?) => {
        ::std::vec![$($crate::Arg::from($arg)),+]
    };
}
