use mptpl_codegen::{
    Dialect, Directive, ElementNode, ElementRole, Expression, IfMeta, Node, Prop, RootNode,
    TemplateCodegenOptions, compile,
};

fn wx() -> TemplateCodegenOptions {
    TemplateCodegenOptions::new(Dialect::Weixin, "components/card.wxml")
}

fn render(opts: &TemplateCodegenOptions, node: ElementNode) -> String {
    compile(RootNode { children: vec![node.into()] }, opts).expect("compile")
}

fn slot() -> ElementNode {
    ElementNode::new("slot").with_role(ElementRole::SlotOutlet)
}

#[test]
fn outlet_without_fallback_keeps_only_name() {
    let node = slot()
        .with_prop(Prop::attr("name", "header"))
        .with_prop(Prop::bind("item", "item"))
        .with_prop(Prop::attr("class", "x"));
    assert_eq!(render(&wx(), node), r#"<slot name="header"></slot>"#);
}

#[test]
fn fallback_becomes_guarded_branches() {
    let node = slot()
        .with_prop(Prop::attr("name", "header"))
        .with_child(ElementNode::new("text").with_child("Fallback"));
    assert_eq!(
        render(&wx(), node),
        concat!(
            r#"<block wx:if="{{$slots.header}}"><slot name="header"></slot></block>"#,
            r#"<block wx:else><text>Fallback</text></block>"#
        )
    );
}

#[test]
fn unnamed_outlet_checks_default_slot() {
    let node = slot().with_child("F");
    assert_eq!(
        render(&wx(), node),
        r#"<block wx:if="{{$slots.d}}"><slot></slot></block><block wx:else>F</block>"#
    );
}

#[test]
fn conditional_outlet_is_wrapped_once() {
    let node = slot().with_if(IfMeta::If("show".into())).with_child("F");
    assert_eq!(
        render(&wx(), node),
        concat!(
            r#"<block wx:if="{{show}}">"#,
            r#"<block wx:if="{{$slots.d}}"><slot></slot></block><block wx:else>F</block>"#,
            "</block>"
        )
    );
}

#[test]
fn bound_name_uses_resolved_slot_name() {
    let name = Directive::new("bind")
        .with_arg(Expression::literal("name"))
        .with_exp(Expression::dynamic("n"))
        .with_slot_name("footer");
    let node = slot().with_prop(name).with_child("F");
    assert_eq!(
        render(&wx(), node),
        r#"<block wx:if="{{$slots.footer}}"><slot name="{{n}}"></slot></block><block wx:else>F</block>"#
    );
}

#[test]
fn dialect_with_native_fallback_renders_inline() {
    let opts = wx().with_slot_fallback(true);
    let node = slot().with_prop(Prop::attr("name", "header")).with_child("F");
    assert_eq!(render(&opts, node), r#"<slot name="header">F</slot>"#);
}

#[test]
fn fallback_branches_are_negations() {
    let node = slot().with_child(Node::Interpolation(Expression::dynamic("msg")));
    let out = render(&wx(), node);
    let guard = out.find(r#"wx:if="{{$slots.d}}""#).expect("presence guard");
    let other = out.find("wx:else").expect("else branch");
    assert!(guard < other);
    assert!(out.ends_with("<block wx:else>{{msg}}</block>"));
}
