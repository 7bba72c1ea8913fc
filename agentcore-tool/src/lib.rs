#![deny(missing_docs)]
//! Tool registry and schema observer.
//!
//! Owns the authoritative set of tools an agent can call, renders
//! per-language stubs for generated code, and infers a return schema
//! by observing actual call results over time.

pub mod error;
pub mod param;
pub mod registry;
pub mod schema;
pub mod shape;
pub mod stub;
pub mod tool;

pub use error::ToolError;
pub use param::{ParamNode, ParamType};
pub use registry::ToolRegistry;
pub use schema::{DeclaredSchema, ReturnSchema, SchemaRegistry, SchemaSource};
pub use shape::{Primitive, Shape, ShapeKind};
pub use stub::generate_structured_tool_prompt;
pub use tool::{ToolDef, ToolDyn, ToolMetadata, ToolRecord};
