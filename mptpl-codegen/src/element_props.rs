use crate::context::CodegenContext;
use crate::error::{CodegenError, CodegenResult};
use crate::event::EventFlags;
use crate::template_ast::{Directive, ElementNode, Prop};

pub const SLOT_DEFAULT_NAME: &str = "d";
pub const VIRTUAL_HOST_STYLE: &str = "virtualHostStyle";
pub const VIRTUAL_HOST_CLASS: &str = "virtualHostClass";

/// Static slot names as the runtime registers them.
pub fn dynamic_slot_name(name: &str) -> &str {
    if name == "default" { SLOT_DEFAULT_NAME } else { name }
}

fn check_virtual_host_props(name: &str, virtual_host: bool) -> Vec<&str> {
    let mut names = vec![name];
    if virtual_host {
        match name {
            "style" => names.push(VIRTUAL_HOST_STYLE),
            "class" => names.push(VIRTUAL_HOST_CLASS),
            _ => {}
        }
    }
    names
}

pub fn gen_element_props(
    node: &ElementNode,
    virtual_host: bool,
    ctx: &mut CodegenContext<'_>,
) -> CodegenResult<()> {
    for prop in &node.props {
        match prop {
            Prop::Attribute(attr) => match &attr.value {
                Some(value) => {
                    for name in check_virtual_host_props(&attr.name, virtual_host) {
                        ctx.push(&format!(r#" {name}="{value}""#));
                    }
                }
                None => ctx.push(&format!(" {}", attr.name)),
            },
            Prop::Directive(dir) if dir.name == "on" => gen_on(dir, node, ctx)?,
            Prop::Directive(dir) => gen_directive(dir, node, virtual_host, ctx)?,
        }
    }
    Ok(())
}

fn gen_on(dir: &Directive, node: &ElementNode, ctx: &mut CodegenContext<'_>) -> CodegenResult<()> {
    let malformed = |missing: &'static str| CodegenError::MalformedEvent {
        directive: dir.describe(),
        tag: node.tag.clone(),
        missing,
    };
    let event = dir.arg_content().ok_or_else(|| malformed("event name"))?;
    let exp = dir.exp.as_ref().ok_or_else(|| malformed("handler"))?;

    let name = ctx.format_event(
        event,
        EventFlags {
            is_catch: dir.has_modifier("stop") || dir.has_modifier("prevent"),
            is_capture: dir.has_modifier("capture"),
            is_component: ctx.is_user_component(node),
        },
    );
    let handler = ctx.expr(exp)?;
    if exp.is_static() {
        ctx.push(&format!(r#" {name}="{handler}""#));
    } else {
        ctx.push(&format!(r#" {name}="{{{{{handler}}}}}""#));
    }
    Ok(())
}

fn gen_directive(
    dir: &Directive,
    node: &ElementNode,
    virtual_host: bool,
    ctx: &mut CodegenContext<'_>,
) -> CodegenResult<()> {
    match dir.name.as_str() {
        "slot" => {
            let Some(arg) = &dir.arg else { return Ok(()) };
            let name = ctx.expr(arg)?;
            if arg.is_static() {
                let name = dynamic_slot_name(&name);
                // the default slot is matched without an attribute
                if name != SLOT_DEFAULT_NAME {
                    ctx.push(&format!(r#" slot="{name}""#));
                }
            } else {
                ctx.push(&format!(r#" slot="{{{{{name}}}}}""#));
            }
        }
        "show" => {
            let exp = dir.exp.as_ref().ok_or_else(|| unknown_directive(dir, node))?;
            let hidden = match ctx.component().and_then(|c| c.v_show.as_deref()) {
                Some(custom) if ctx.is_user_component(node) => custom,
                _ => "hidden",
            };
            let exp = ctx.expr(exp)?;
            ctx.push(&format!(r#" {hidden}="{{{{!{exp}}}}}""#));
        }
        _ => match (&dir.arg, &dir.exp) {
            (Some(arg), Some(exp)) => {
                let arg = ctx.expr(arg)?;
                let exp = ctx.expr(exp)?;
                for name in check_virtual_host_props(&arg, virtual_host) {
                    ctx.push(&format!(r#" {name}="{{{{{exp}}}}}""#));
                }
            }
            // `v-bind="obj"` is lowered by an earlier pass
            _ if dir.name == "bind" => {}
            _ => return Err(unknown_directive(dir, node)),
        },
    }
    Ok(())
}

fn unknown_directive(dir: &Directive, node: &ElementNode) -> CodegenError {
    CodegenError::UnknownDirective {
        directive: dir.describe(),
        tag: node.tag.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn virtual_host_duplicates_only_style_and_class() {
        assert_eq!(check_virtual_host_props("style", true), vec!["style", VIRTUAL_HOST_STYLE]);
        assert_eq!(check_virtual_host_props("class", true), vec!["class", VIRTUAL_HOST_CLASS]);
        assert_eq!(check_virtual_host_props("id", true), vec!["id"]);
        assert_eq!(check_virtual_host_props("style", false), vec!["style"]);
    }

    #[test]
    fn default_slot_maps_to_short_name() {
        assert_eq!(dynamic_slot_name("default"), "d");
        assert_eq!(dynamic_slot_name("header"), "header");
    }
}
