use crate::context::CodegenContext;
use crate::error::CodegenResult;
use crate::template_ast::{ElementNode, IfMeta, Prop};

pub fn gen_v_if(exp: &str, ctx: &mut CodegenContext<'_>) {
    let directive = ctx.directive();
    ctx.push(&format!(r#" {directive}if="{{{{{exp}}}}}""#));
}

pub fn gen_v_else_if(exp: &str, ctx: &mut CodegenContext<'_>) {
    let directive = ctx.directive();
    ctx.push(&format!(r#" {directive}elif="{{{{{exp}}}}}""#));
}

pub fn gen_v_else(ctx: &mut CodegenContext<'_>) {
    let directive = ctx.directive();
    ctx.push(&format!(" {directive}else"));
}

pub fn gen_v_if_code(meta: &IfMeta, ctx: &mut CodegenContext<'_>) {
    match meta {
        IfMeta::If(condition) => gen_v_if(condition, ctx),
        IfMeta::ElseIf(condition) => gen_v_else_if(condition, ctx),
        IfMeta::Else => gen_v_else(ctx),
    }
}

/// Emits the repetition attributes and consumes a colocated `:key`.
pub fn gen_v_for(node: &mut ElementNode, ctx: &mut CodegenContext<'_>) -> CodegenResult<()> {
    let Some(v_for) = node.v_for.as_ref() else {
        return Ok(());
    };
    let directive = ctx.directive();
    ctx.push(&format!(r#" {directive}for="{}""#, v_for.source));
    if let Some(value) = &v_for.value_alias {
        ctx.push(&format!(r#" {directive}for-item="{value}""#));
    }
    // An item alias called `index` would shadow the implicit index variable.
    if v_for.value_alias.as_deref() == Some("index") {
        let index = v_for.index_alias.as_deref().unwrap_or_default();
        ctx.push(&format!(r#" {directive}for-index="{index}""#));
    }

    let Some(pos) = node.find_prop_index("key", true) else {
        return Ok(());
    };
    if let Prop::Directive(key_prop) = &node.props[pos] {
        let key = match &key_prop.exp {
            Some(exp) => ctx.expr(exp)?,
            None => String::new(),
        };
        let key = key.split_once('.').map_or(key.as_str(), |(_, rest)| rest);
        ctx.push(&format!(r#" {directive}key="{key}""#));
    }
    node.props.remove(pos);
    Ok(())
}
