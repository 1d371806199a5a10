use std::collections::HashMap;

use serde::{Deserialize, Deserializer};

use crate::template_ast::{ElementNode, Prop};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LazyPropKind {
    On,
    Bind,
}

impl LazyPropKind {
    fn directive_name(self) -> &'static str {
        match self {
            LazyPropKind::On => "on",
            LazyPropKind::Bind => "bind",
        }
    }
}

/// Directive kind plus the arguments (event names or bound props) that defer an element.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LazyProp {
    pub name: LazyPropKind,
    pub arg: Vec<String>,
}

impl LazyProp {
    pub fn on<I, S>(events: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            name: LazyPropKind::On,
            arg: events.into_iter().map(Into::into).collect(),
        }
    }

    pub fn bind<I, S>(props: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            name: LazyPropKind::Bind,
            arg: props.into_iter().map(Into::into).collect(),
        }
    }
}

/// Per-tag entry of a lazy table. In JSON: `true` or a list of [`LazyProp`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LazyProps {
    Always,
    Props(Vec<LazyProp>),
}

impl<'de> Deserialize<'de> for LazyProps {
    fn deserialize<D: Deserializer<'de>>(d: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Repr {
            Flag(bool),
            Props(Vec<LazyProp>),
        }
        Ok(match Repr::deserialize(d)? {
            Repr::Flag(true) => LazyProps::Always,
            Repr::Flag(false) => LazyProps::Props(Vec::new()),
            Repr::Props(p) => LazyProps::Props(p),
        })
    }
}

pub type LazyElementTable = HashMap<String, LazyProps>;

/// What a [`LazyElement::Resolver`] decides for one node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LazyResolution {
    Flag(bool),
    Table(LazyElementTable),
}

pub type LazyResolverFn = Box<dyn Fn(&ElementNode) -> LazyResolution>;

/// Elements whose bindings must wait for the first render.
pub enum LazyElement {
    Table(LazyElementTable),
    Resolver(LazyResolverFn),
}

impl LazyElement {
    pub fn is_lazy(&self, node: &ElementNode) -> bool {
        match self {
            LazyElement::Table(table) => table_matches(table, node),
            LazyElement::Resolver(resolve) => match resolve(node) {
                LazyResolution::Flag(flag) => flag,
                LazyResolution::Table(table) => table_matches(&table, node),
            },
        }
    }
}

impl std::fmt::Debug for LazyElement {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LazyElement::Table(t) => f.debug_tuple("Table").field(t).finish(),
            LazyElement::Resolver(_) => f.write_str("Resolver(..)"),
        }
    }
}

fn table_matches(table: &LazyElementTable, node: &ElementNode) -> bool {
    match table.get(&node.tag) {
        None => false,
        Some(LazyProps::Always) => true,
        Some(LazyProps::Props(lazy)) => node.props.iter().any(|prop| {
            let Prop::Directive(d) = prop else { return false };
            lazy.iter().any(|lp| {
                d.name == lp.name.directive_name()
                    && d.arg_content().is_some_and(|arg| lp.arg.iter().any(|a| a == arg))
            })
        }),
    }
}
