use std::io;

use mptpl_codegen::{
    Asset, CodegenError, Dialect, EmitFile, ElementNode, ExprError, ExprSerializer, Expression,
    Node, RootNode, TemplateCodegenOptions, generate,
};

fn root(nodes: Vec<Node>) -> RootNode {
    RootNode { children: nodes }
}

#[test]
fn emits_one_asset_keyed_by_file_name() {
    let opts = TemplateCodegenOptions::new(Dialect::Weixin, "pages/index/index.wxml").with_scope_id("data-v-1");
    let mut assets: Vec<Asset> = Vec::new();
    generate(
        root(vec![ElementNode::new("view").with_child("a").into(), "b".into()]),
        &opts,
        &mut assets,
    )
    .expect("generate");
    assert_eq!(
        assets,
        vec![Asset {
            file_name: "pages/index/index.wxml".into(),
            source: "<view>a</view>b".into(),
        }]
    );
}

#[test]
fn compiles_json_ast() {
    let json = r#"{ "children": [
        { "element": {
            "tag": "view",
            "props": [ { "kind": "attribute", "name": "class", "value": "list" } ],
            "children": [
                { "element": {
                    "tag": "view",
                    "vFor": { "source": "{{items}}", "valueAlias": "item", "indexAlias": "i" },
                    "props": [
                        { "kind": "directive", "name": "bind",
                          "arg": { "content": "key", "isStatic": true },
                          "exp": { "content": "item.id" } },
                        { "kind": "directive", "name": "on", "modifiers": ["stop"],
                          "arg": { "content": "click", "isStatic": true },
                          "exp": { "content": "e0" } }
                    ],
                    "children": [ { "interpolation": { "content": "item.label" } } ]
                } }
            ]
        } }
    ] }"#;
    let ast: RootNode = serde_json::from_str(json).expect("ast");
    let opts = TemplateCodegenOptions::new(Dialect::Qq, "list.qml");
    let mut assets: Vec<Asset> = Vec::new();
    generate(ast, &opts, &mut assets).expect("generate");
    assert_eq!(
        assets[0].source,
        concat!(
            r#"<view class="list">"#,
            r#"<view qq:for="{{items}}" qq:for-item="item" qq:key="id" catch:tap="{{e0}}">{{item.label}}</view>"#,
            "</view>"
        )
    );
}

struct FullDisk;

impl EmitFile for FullDisk {
    fn emit_file(&mut self, _asset: Asset) -> io::Result<()> {
        Err(io::Error::other("disk full"))
    }
}

#[test]
fn emitter_failure_is_reported_with_file_name() {
    let opts = TemplateCodegenOptions::new(Dialect::Weixin, "a.wxml");
    let err = generate(root(vec!["x".into()]), &opts, &mut FullDisk).unwrap_err();
    assert!(matches!(&err, CodegenError::Emit { file_name, .. } if file_name == "a.wxml"));
    assert_eq!(err.to_string(), "failed to emit a.wxml");
}

struct Strict;

impl ExprSerializer for Strict {
    fn serialize(&self, expr: &Expression) -> Result<String, ExprError> {
        let s = expr.as_simple().ok_or_else(|| ExprError {
            expression: "<compound>".into(),
            reason: "compound expressions are not supported".into(),
        })?;
        Ok(s.content.replace('"', "'"))
    }
}

#[test]
fn serializer_output_is_used_for_expressions() {
    let opts = TemplateCodegenOptions::new(Dialect::Weixin, "a.wxml").with_expr_serializer(Strict);
    let node = Node::Interpolation(Expression::dynamic(r#"a ? "x" : "y""#));
    let mut assets: Vec<Asset> = Vec::new();
    generate(root(vec![node]), &opts, &mut assets).expect("generate");
    assert_eq!(assets[0].source, "{{a ? 'x' : 'y'}}");
}

#[test]
fn serializer_failure_propagates() {
    let opts = TemplateCodegenOptions::new(Dialect::Weixin, "a.wxml").with_expr_serializer(Strict);
    let node = Node::Interpolation(Expression::Compound(vec![]));
    let mut assets: Vec<Asset> = Vec::new();
    let err = generate(root(vec![node]), &opts, &mut assets).unwrap_err();
    assert!(matches!(err, CodegenError::Expression(_)));
    assert!(assets.is_empty());
}
