use serde::Deserialize;

/// Which generator owns an element. Set by the upstream transform passes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ElementRole {
    #[default]
    Plain,
    SlotOutlet,
    Component,
    Template,
}

/// Control-flow metadata attached to an element (`v-if` family).
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum IfMeta {
    If(String),
    ElseIf(String),
    Else,
}

/// Repetition metadata attached to an element (`v-for`).
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ForMeta {
    /// Already in target syntax, emitted verbatim.
    pub source: String,
    #[serde(default)]
    pub value_alias: Option<String>,
    #[serde(default)]
    pub index_alias: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SimpleExpression {
    pub content: String,
    #[serde(default)]
    pub is_static: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum CompoundPart {
    Text(String),
    Expr(SimpleExpression),
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum Expression {
    Simple(SimpleExpression),
    Compound(Vec<CompoundPart>),
}

impl Expression {
    /// A bound (dynamic) expression, e.g. `:value="count"`.
    pub fn dynamic(content: impl Into<String>) -> Self {
        Expression::Simple(SimpleExpression {
            content: content.into(),
            is_static: false,
        })
    }

    /// A literal, e.g. the `tap` in `@tap` or a method-name handler.
    pub fn literal(content: impl Into<String>) -> Self {
        Expression::Simple(SimpleExpression {
            content: content.into(),
            is_static: true,
        })
    }

    pub fn as_simple(&self) -> Option<&SimpleExpression> {
        match self {
            Expression::Simple(s) => Some(s),
            Expression::Compound(_) => None,
        }
    }

    pub fn is_static(&self) -> bool {
        self.as_simple().is_some_and(|s| s.is_static)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Attribute {
    pub name: String,
    #[serde(default)]
    pub value: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Directive {
    pub name: String,
    #[serde(default)]
    pub arg: Option<Expression>,
    #[serde(default)]
    pub exp: Option<Expression>,
    #[serde(default)]
    pub modifiers: Vec<String>,
    /// Resolved projection name of a slot outlet's `:name` binding.
    #[serde(default)]
    pub slot_name: Option<String>,
}

impl Directive {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            arg: None,
            exp: None,
            modifiers: Vec::new(),
            slot_name: None,
        }
    }

    pub fn with_arg(mut self, arg: Expression) -> Self {
        self.arg = Some(arg);
        self
    }

    pub fn with_exp(mut self, exp: Expression) -> Self {
        self.exp = Some(exp);
        self
    }

    pub fn with_modifier(mut self, modifier: impl Into<String>) -> Self {
        self.modifiers.push(modifier.into());
        self
    }

    pub fn with_slot_name(mut self, name: impl Into<String>) -> Self {
        self.slot_name = Some(name.into());
        self
    }

    /// Content of the argument when it is a simple expression, static or not.
    pub fn arg_content(&self) -> Option<&str> {
        self.arg
            .as_ref()
            .and_then(Expression::as_simple)
            .map(|s| s.content.as_str())
    }

    pub fn is_static_arg_of(&self, name: &str) -> bool {
        matches!(
            self.arg.as_ref().and_then(Expression::as_simple),
            Some(SimpleExpression { content, is_static: true }) if content == name
        )
    }

    pub fn has_modifier(&self, modifier: &str) -> bool {
        self.modifiers.iter().any(|m| m == modifier)
    }

    /// Source-like rendering used in diagnostics: `v-name:arg.mod`.
    pub fn describe(&self) -> String {
        let mut out = format!("v-{}", self.name);
        match &self.arg {
            Some(Expression::Simple(s)) if s.is_static => {
                out.push(':');
                out.push_str(&s.content);
            }
            Some(Expression::Simple(s)) => {
                out.push_str(":[");
                out.push_str(&s.content);
                out.push(']');
            }
            Some(Expression::Compound(_)) => out.push_str(":[..]"),
            None => {}
        }
        for m in &self.modifiers {
            out.push('.');
            out.push_str(m);
        }
        out
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum Prop {
    Attribute(Attribute),
    Directive(Directive),
}

impl Prop {
    pub fn attr(name: impl Into<String>, value: impl Into<String>) -> Self {
        Prop::Attribute(Attribute {
            name: name.into(),
            value: Some(value.into()),
        })
    }

    pub fn bare(name: impl Into<String>) -> Self {
        Prop::Attribute(Attribute {
            name: name.into(),
            value: None,
        })
    }

    /// `:name="exp"`
    pub fn bind(name: impl Into<String>, exp: impl Into<String>) -> Self {
        Prop::Directive(
            Directive::new("bind")
                .with_arg(Expression::literal(name))
                .with_exp(Expression::dynamic(exp)),
        )
    }
}

impl From<Directive> for Prop {
    fn from(d: Directive) -> Self {
        Prop::Directive(d)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ElementNode {
    pub tag: String,
    #[serde(default)]
    pub role: ElementRole,
    #[serde(default)]
    pub props: Vec<Prop>,
    #[serde(default)]
    pub children: Vec<Node>,
    #[serde(default)]
    pub self_closing: bool,
    #[serde(default)]
    pub v_if: Option<IfMeta>,
    #[serde(default)]
    pub v_for: Option<ForMeta>,
}

impl ElementNode {
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            role: ElementRole::Plain,
            props: Vec::new(),
            children: Vec::new(),
            self_closing: false,
            v_if: None,
            v_for: None,
        }
    }

    pub fn with_role(mut self, role: ElementRole) -> Self {
        self.role = role;
        self
    }

    pub fn with_prop(mut self, prop: impl Into<Prop>) -> Self {
        self.props.push(prop.into());
        self
    }

    pub fn with_child(mut self, child: impl Into<Node>) -> Self {
        self.children.push(child.into());
        self
    }

    pub fn with_if(mut self, meta: IfMeta) -> Self {
        self.v_if = Some(meta);
        self
    }

    pub fn with_for(mut self, meta: ForMeta) -> Self {
        self.v_for = Some(meta);
        self
    }

    pub fn self_closing(mut self) -> Self {
        self.self_closing = true;
        self
    }

    /// Position of the prop named `name`: a static attribute carrying a value
    /// (skipped when `dynamic_only`), or a `bind` directive with an expression
    /// and the static argument `name`.
    pub fn find_prop_index(&self, name: &str, dynamic_only: bool) -> Option<usize> {
        self.props.iter().position(|p| match p {
            Prop::Attribute(a) => !dynamic_only && a.name == name && a.value.is_some(),
            Prop::Directive(d) => d.name == "bind" && d.exp.is_some() && d.is_static_arg_of(name),
        })
    }

    pub fn find_prop(&self, name: &str, dynamic_only: bool) -> Option<&Prop> {
        self.find_prop_index(name, dynamic_only)
            .map(|i| &self.props[i])
    }
}

/// A `v-if` chain; every branch is an element carrying its own [`IfMeta`].
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
pub struct IfNode {
    pub branches: Vec<ElementNode>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Node {
    Element(ElementNode),
    If(IfNode),
    Text(String),
    Interpolation(Expression), // {{ expr }}
}

impl From<ElementNode> for Node {
    fn from(e: ElementNode) -> Self {
        Node::Element(e)
    }
}

impl From<IfNode> for Node {
    fn from(n: IfNode) -> Self {
        Node::If(n)
    }
}

impl From<&str> for Node {
    fn from(t: &str) -> Self {
        Node::Text(t.to_string())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
pub struct RootNode {
    #[serde(default)]
    pub children: Vec<Node>,
}
