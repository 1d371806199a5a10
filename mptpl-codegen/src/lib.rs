//! Lowers an annotated component-template AST into mini-program markup
//! (`wxml`, `axml`, `swan`, ...).

pub mod context;
pub mod control_flow;
pub mod element_props;
pub mod emit;
pub mod error;
pub mod event;
pub mod expr;
pub mod lazy;
pub mod options;
pub mod template_ast;
pub mod template_codegen;

pub use context::CodegenContext;
pub use emit::{Asset, EmitFile};
pub use error::{CodegenError, CodegenResult};
pub use event::{EventFlags, EventFormatter};
pub use expr::{ExprError, ExprSerializer, RawSerializer};
pub use lazy::{LazyElement, LazyElementTable, LazyProp, LazyProps, LazyResolution};
pub use options::{ComponentOptions, Dialect, SlotOptions, TemplateCodegenOptions, tag_set};
pub use template_ast::{
    Attribute, Directive, ElementNode, ElementRole, Expression, ForMeta, IfMeta, IfNode, Node,
    Prop, RootNode,
};
pub use template_codegen::{compile, gen_element, gen_node, generate};
