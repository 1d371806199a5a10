use crate::error::CodegenResult;
use crate::event::EventFlags;
use crate::options::{ComponentOptions, TemplateCodegenOptions};
use crate::template_ast::{ElementNode, ElementRole, Expression};

/// State of one compilation: the output buffer plus borrowed configuration.
pub struct CodegenContext<'a> {
    code: String,
    options: &'a TemplateCodegenOptions,
}

impl<'a> CodegenContext<'a> {
    pub fn new(options: &'a TemplateCodegenOptions) -> Self {
        Self {
            code: String::new(),
            options,
        }
    }

    pub fn push(&mut self, code: &str) {
        self.code.push_str(code);
    }

    pub fn code(&self) -> &str {
        &self.code
    }

    pub fn into_code(self) -> String {
        self.code
    }

    pub fn options(&self) -> &'a TemplateCodegenOptions {
        self.options
    }

    pub fn directive(&self) -> &'a str {
        &self.options.directive
    }

    pub fn component(&self) -> Option<&'a ComponentOptions> {
        self.options.component.as_ref()
    }

    pub fn format_event(&self, event: &str, flags: EventFlags) -> String {
        self.options.event.format(event, flags)
    }

    pub fn is_builtin_component(&self, tag: &str) -> bool {
        (self.options.is_builtin_component)(tag)
    }

    pub fn is_mini_program_component(&self, tag: &str) -> bool {
        (self.options.is_mini_program_component)(tag)
    }

    /// A component authored in the project, as opposed to `<component :is>`
    /// or one provided by the framework.
    pub fn is_user_component(&self, node: &ElementNode) -> bool {
        node.role == ElementRole::Component
            && !is_component_tag(&node.tag)
            && !self.is_builtin_component(&node.tag)
    }

    pub fn is_lazy_element(&self, node: &ElementNode) -> bool {
        self.options
            .lazy_element
            .as_ref()
            .is_some_and(|lazy| lazy.is_lazy(node))
    }

    pub fn expr(&self, expr: &Expression) -> CodegenResult<String> {
        Ok(self.options.expr.serialize(expr)?)
    }
}

fn is_component_tag(tag: &str) -> bool {
    tag == "component" || tag == "Component"
}
