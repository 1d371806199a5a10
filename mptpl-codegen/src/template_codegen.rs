use std::mem;

use tracing::{debug, instrument, trace};

use crate::context::CodegenContext;
use crate::control_flow::{gen_v_else, gen_v_for, gen_v_if, gen_v_if_code};
use crate::element_props::{SLOT_DEFAULT_NAME, gen_element_props};
use crate::emit::{Asset, EmitFile};
use crate::error::{CodegenError, CodegenResult};
use crate::options::TemplateCodegenOptions;
use crate::template_ast::{ElementNode, ElementRole, Expression, IfMeta, Node, Prop, RootNode};

/// Condition that turns true once the page finished its first render.
pub const READY_CONDITION: &str = "r0";
/// Binding through which computed component props are passed.
pub const ATTR_VUE_PROPS: &str = "u-p";

/// Public API: compile a template and hand the markup to `emitter` under
/// `options.file_name`.
#[instrument(skip_all, fields(file = %options.file_name, scope_id = ?options.scope_id))]
pub fn generate(
    root: RootNode,
    options: &TemplateCodegenOptions,
    emitter: &mut dyn EmitFile,
) -> CodegenResult<()> {
    let source = compile(root, options)?;
    debug!(bytes = source.len(), "template compiled");
    emitter
        .emit_file(Asset {
            file_name: options.file_name.clone(),
            source,
        })
        .map_err(|source| CodegenError::Emit {
            file_name: options.file_name.clone(),
            source,
        })
}

/// Compile a template to markup without emitting it.
pub fn compile(root: RootNode, options: &TemplateCodegenOptions) -> CodegenResult<String> {
    let mut ctx = CodegenContext::new(options);
    for node in root.children {
        gen_node(node, &mut ctx)?;
    }
    Ok(ctx.into_code())
}

pub fn gen_node(node: Node, ctx: &mut CodegenContext<'_>) -> CodegenResult<()> {
    match node {
        // branches carry their own v-if metadata; no wrapper here
        Node::If(group) => {
            for branch in group.branches {
                gen_element_node(branch, ctx)?;
            }
            Ok(())
        }
        Node::Text(text) => {
            gen_text(&text, ctx);
            Ok(())
        }
        Node::Interpolation(expr) => gen_expression(&expr, ctx),
        Node::Element(el) => gen_element_node(el, ctx),
    }
}

fn gen_element_node(node: ElementNode, ctx: &mut CodegenContext<'_>) -> CodegenResult<()> {
    let role = node.role;
    match role {
        ElementRole::SlotOutlet => gen_slot(node, ctx),
        ElementRole::Component => gen_component(node, ctx),
        ElementRole::Template => gen_template(node, ctx),
        ElementRole::Plain if ctx.is_lazy_element(&node) => gen_lazy_element(node, ctx),
        ElementRole::Plain => gen_element(node, ctx),
    }
}

fn gen_text(text: &str, ctx: &mut CodegenContext<'_>) {
    ctx.push(text);
}

fn gen_expression(expr: &Expression, ctx: &mut CodegenContext<'_>) -> CodegenResult<()> {
    let code = ctx.expr(expr)?;
    ctx.push(&format!("{{{{{code}}}}}"));
    Ok(())
}

fn slot_outlet_name(node: &ElementNode) -> &str {
    let name = match node.find_prop("name", false) {
        Some(Prop::Attribute(attr)) => attr.value.as_deref(),
        Some(Prop::Directive(dir)) => dir.slot_name.as_deref(),
        None => None,
    };
    name.filter(|n| !n.is_empty()).unwrap_or(SLOT_DEFAULT_NAME)
}

/// Lowers `<slot>` with fallback children into a "was it provided?" pair of blocks
/// when the dialect cannot render fallback content itself.
fn gen_slot(mut node: ElementNode, ctx: &mut CodegenContext<'_>) -> CodegenResult<()> {
    // projection is by name only; scoped-slot bindings are dropped
    node.props.retain(|prop| match prop {
        Prop::Attribute(attr) => attr.name == "name",
        Prop::Directive(dir) => dir.arg_content() == Some("name"),
    });
    if node.children.is_empty() || ctx.options().slot.fallback_content {
        return gen_element(node, ctx);
    }

    let outer = node.v_if.take();
    if let Some(meta) = &outer {
        ctx.push("<block");
        gen_v_if_code(meta, ctx);
        ctx.push(">");
    }
    let fallback = mem::take(&mut node.children);
    let name = slot_outlet_name(&node).to_string();
    debug!(slot = %name, guarded = outer.is_some(), "slot fallback lowered to blocks");

    ctx.push("<block");
    gen_v_if(&format!("$slots.{name}"), ctx);
    ctx.push(">");
    gen_element(node, ctx)?;
    ctx.push("</block>");

    ctx.push("<block");
    gen_v_else(ctx);
    ctx.push(">");
    for child in fallback {
        gen_node(child, ctx)?;
    }
    ctx.push("</block>");

    if outer.is_some() {
        ctx.push("</block>");
    }
    Ok(())
}

fn gen_template(mut node: ElementNode, ctx: &mut CodegenContext<'_>) -> CodegenResult<()> {
    let slot_prop = node.props.iter().position(|prop| {
        matches!(prop, Prop::Directive(dir)
            if dir.name == "slot" || (dir.name == "bind" && dir.arg_content() == Some("slot")))
    });
    // <template v-slot:x> => <view slot="x">, plain <template> => <block>
    node.tag = if slot_prop.is_some() { "view" } else { "block" }.to_string();
    node.role = ElementRole::Plain;

    // a single named-slot child carries the slot itself, saving a view in flex layouts
    if let Some(pos) = slot_prop {
        if node.v_for.is_none() && node.children.len() == 1 {
            let splice = matches!(&node.children[0], Node::Element(child)
                if child.v_for.is_none() && child.role != ElementRole::SlotOutlet);
            if splice {
                let carrier = node.props.swap_remove(pos);
                if let Some(Node::Element(mut child)) = node.children.pop() {
                    trace!(tag = %child.tag, "slot template spliced onto its only child");
                    child.props.push(carrier);
                    return gen_element(child, ctx);
                }
            }
        }
    }

    gen_element(node, ctx)
}

fn gen_component(mut node: ElementNode, ctx: &mut CodegenContext<'_>) -> CodegenResult<()> {
    if ctx.component().is_some_and(|c| c.get_property_sync) {
        return gen_element(node, ctx);
    }
    if node.v_if.is_some() || node.v_for.is_some() {
        return gen_element(node, ctx);
    }
    // native components must wait for the first data binding
    if ctx.is_mini_program_component(&node.tag) {
        debug!(tag = %node.tag, "native component guarded by ready flag");
        node.v_if = Some(IfMeta::If(READY_CONDITION.to_string()));
        return gen_element(node, ctx);
    }
    let props_exp = match node.find_prop(ATTR_VUE_PROPS, true) {
        Some(Prop::Directive(dir)) => dir.exp.as_ref().map(|exp| ctx.expr(exp)).transpose()?,
        _ => None,
    };
    if let Some(condition) = props_exp {
        debug!(tag = %node.tag, %condition, "component guarded by its props binding");
        node.v_if = Some(IfMeta::If(condition));
    }
    gen_element(node, ctx)
}

/// Some built-in elements fire events while mounting, before handlers are known;
/// hold them back until the first render.
fn gen_lazy_element(mut node: ElementNode, ctx: &mut CodegenContext<'_>) -> CodegenResult<()> {
    match node.v_if.take() {
        None => {
            debug!(tag = %node.tag, "lazy element wrapped in ready block");
            ctx.push("<block");
            gen_v_if(READY_CONDITION, ctx);
            ctx.push(">");
            gen_element(node, ctx)?;
            ctx.push("</block>");
            Ok(())
        }
        Some(IfMeta::Else) => {
            debug!(tag = %node.tag, "lazy else branch nested under ready check");
            ctx.push("<block");
            gen_v_else(ctx);
            ctx.push(">");
            node.v_if = Some(IfMeta::If(READY_CONDITION.to_string()));
            gen_element(node, ctx)?;
            ctx.push("</block>");
            Ok(())
        }
        // if / else-if already wait on a real condition
        meta => {
            node.v_if = meta;
            gen_element(node, ctx)
        }
    }
}

pub fn gen_element(mut node: ElementNode, ctx: &mut CodegenContext<'_>) -> CodegenResult<()> {
    let mut tag = node.tag.clone();
    // <template slot="left"/> => <view slot="left"/>
    if tag == "template" {
        tag = if node.find_prop("slot", false).is_some() { "view" } else { "block" }.to_string();
    }
    // a bare block only groups its children
    if tag == "block" && node.props.is_empty() && node.v_if.is_none() && node.v_for.is_none() {
        for child in node.children {
            gen_node(child, ctx)?;
        }
        return Ok(());
    }

    let mut virtual_host = false;
    if ctx.is_user_component(&node) {
        tag = hyphenate(&tag);
        if let Some(component) = ctx.component() {
            if let Some(normalize) = &component.normalize_name {
                tag = normalize(&tag);
            }
            virtual_host = component.merge_virtual_host_attributes;
        }
    }

    // else/elif cannot share a tag with for, so the condition moves to a block
    let hoist_if = node.v_if.is_some() && node.v_for.is_some();
    if hoist_if {
        if let Some(meta) = &node.v_if {
            ctx.push("<block");
            gen_v_if_code(meta, ctx);
            ctx.push(">");
        }
    }
    ctx.push(&format!("<{tag}"));
    if !hoist_if {
        if let Some(meta) = &node.v_if {
            gen_v_if_code(meta, ctx);
        }
    }
    gen_v_for(&mut node, ctx)?;
    if !node.props.is_empty() {
        gen_element_props(&node, virtual_host, ctx)?;
    }

    if node.self_closing {
        ctx.push("/>");
    } else {
        ctx.push(">");
        for child in node.children {
            gen_node(child, ctx)?;
        }
        ctx.push(&format!("</{tag}>"));
    }
    if hoist_if {
        ctx.push("</block>");
    }
    Ok(())
}

/// `MyButton` => `my-button`
pub fn hyphenate(tag: &str) -> String {
    let mut out = String::with_capacity(tag.len() + 4);
    let mut prev_word = false;
    for ch in tag.chars() {
        let word = ch.is_ascii_alphanumeric() || ch == '_';
        if ch.is_ascii_uppercase() && prev_word {
            out.push('-');
        }
        out.push(ch.to_ascii_lowercase());
        prev_word = word;
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("MyButton", "my-button")]
    #[case("myButton", "my-button")]
    #[case("van-button", "van-button")]
    #[case("UIList2Item", "u-i-list2-item")]
    #[case("x-Foo", "x-foo")]
    #[case("éB", "éb")]
    fn hyphenates_component_tags(#[case] tag: &str, #[case] expected: &str) {
        assert_eq!(hyphenate(tag), expected);
    }

    #[test]
    fn slot_name_defaults_when_missing_or_empty() {
        let el = ElementNode::new("slot");
        assert_eq!(slot_outlet_name(&el), "d");
        let el = ElementNode::new("slot").with_prop(Prop::attr("name", ""));
        assert_eq!(slot_outlet_name(&el), "d");
        let el = ElementNode::new("slot").with_prop(Prop::attr("name", "header"));
        assert_eq!(slot_outlet_name(&el), "header");
    }
}
