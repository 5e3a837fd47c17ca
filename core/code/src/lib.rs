#![warn(clippy::pedantic)]
#![recursion_limit = "512"]
//! SPL source-code node kinds for the spldoc tree model.
//!
//! Everything here is data: the static [`CATALOG`] describing the parsed
//! structure of SPL sources (compilation units, composites, operator
//! invocations, windows, configs, documentation comments), its enumerations,
//! and thin helpers to create and visit nodes of a [`spldoc_model::Document`]
//! built over it.
#[macro_use]
mod macros;

pub mod enums;
pub mod factory;
pub mod schema;
pub mod view;
pub mod visitor;

pub use enums::{
    CompositeModifier, CompositeParameterExpressionMode, FunctionModifier,
    FunctionParameterModifier, TypeModifier, WindowPolicyKind, WindowType,
};
pub use factory::{create, create_by_name, kind_of, new_document, new_document_with_config};
pub use schema::{CATALOG, CodeVisitor, NAMESPACE_URI, NodeKind, features};
pub use view::CodeNode;
pub use visitor::{dispatch, walk};
