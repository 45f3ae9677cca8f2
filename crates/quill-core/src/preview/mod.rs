//! Preview composition: inline the project's stylesheet and script into its
//! entry page and inject the console interception shim

mod compose;
mod shim;

pub use compose::{
    ComposedDocument, HTML_ENTRY, NOT_FOUND_DOCUMENT, SCRIPT_ENTRY, STYLE_ENTRY, compose,
    compose_with,
};
pub use shim::{InterceptorShim, UNSERIALIZABLE_PLACEHOLDER};
