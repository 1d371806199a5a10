use std::collections::HashSet;

use serde::Deserialize;

use crate::event::EventFormatter;
use crate::expr::{ExprSerializer, RawSerializer};
use crate::lazy::{LazyElement, LazyElementTable, LazyProp, LazyProps};

pub type TagPredicate = Box<dyn Fn(&str) -> bool>;
pub type NameNormalizer = Box<dyn Fn(&str) -> String>;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SlotOptions {
    /// The dialect renders `<slot>` fallback children itself.
    pub fallback_content: bool,
}

#[derive(Default)]
pub struct ComponentOptions {
    /// Component props can be read synchronously, so no render guard is needed.
    pub get_property_sync: bool,
    /// Duplicate `style`/`class` onto the virtual-host carrier attributes.
    pub merge_virtual_host_attributes: bool,
    /// Attribute that replaces `hidden` for `v-show` on user components.
    pub v_show: Option<String>,
    pub normalize_name: Option<NameNormalizer>,
}

impl std::fmt::Debug for ComponentOptions {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ComponentOptions")
            .field("get_property_sync", &self.get_property_sync)
            .field("merge_virtual_host_attributes", &self.merge_virtual_host_attributes)
            .field("v_show", &self.v_show)
            .field("normalize_name", &self.normalize_name.as_ref().map(|_| ".."))
            .finish()
    }
}

/// Target mini-program flavours with a ready-made configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Dialect {
    #[default]
    Weixin,
    Qq,
    Alipay,
    Baidu,
    Toutiao,
    Kuaishou,
}

impl Dialect {
    pub fn directive_prefix(self) -> &'static str {
        match self {
            Dialect::Weixin => "wx:",
            Dialect::Qq => "qq:",
            Dialect::Alipay => "a:",
            Dialect::Baidu => "s-",
            Dialect::Toutiao => "tt:",
            Dialect::Kuaishou => "ks:",
        }
    }

    fn event_formatter(self) -> EventFormatter {
        match self {
            Dialect::Alipay => EventFormatter::Alipay,
            _ => EventFormatter::Standard,
        }
    }

    fn slot(self) -> SlotOptions {
        SlotOptions {
            fallback_content: matches!(self, Dialect::Alipay | Dialect::Baidu),
        }
    }

    fn component(self) -> ComponentOptions {
        match self {
            Dialect::Alipay => ComponentOptions {
                merge_virtual_host_attributes: true,
                ..Default::default()
            },
            Dialect::Weixin | Dialect::Qq => ComponentOptions {
                v_show: Some("data-c-h".to_string()),
                ..Default::default()
            },
            _ => ComponentOptions::default(),
        }
    }

    fn lazy_element(self) -> Option<LazyElement> {
        let mut table = LazyElementTable::new();
        match self {
            Dialect::Weixin | Dialect::Qq | Dialect::Toutiao | Dialect::Kuaishou => {
                table.insert("canvas".into(), LazyProps::Props(vec![LazyProp::bind(["canvas-id", "id"])]));
                table.insert("editor".into(), LazyProps::Props(vec![LazyProp::on(["ready"])]));
                table.insert(
                    "scroll-view".into(),
                    LazyProps::Props(vec![LazyProp::on(["dragstart", "dragging", "dragend"])]),
                );
            }
            Dialect::Alipay => {
                table.insert(
                    "swiper".into(),
                    LazyProps::Props(vec![LazyProp::on(["change", "transition", "animationfinish"])]),
                );
                table.insert("movable-view".into(), LazyProps::Props(vec![LazyProp::on(["change", "scale"])]));
            }
            Dialect::Baidu => return None,
        }
        Some(LazyElement::Table(table))
    }
}

/// Read-only configuration for one template compilation.
pub struct TemplateCodegenOptions {
    /// Key under which the markup is handed to the emitter.
    pub file_name: String,
    /// Control-flow attribute prefix, e.g. `wx:`.
    pub directive: String,
    pub scope_id: Option<String>,
    pub event: EventFormatter,
    pub slot: SlotOptions,
    pub lazy_element: Option<LazyElement>,
    pub component: Option<ComponentOptions>,
    pub is_builtin_component: TagPredicate,
    pub is_mini_program_component: TagPredicate,
    pub expr: Box<dyn ExprSerializer>,
}

impl TemplateCodegenOptions {
    pub fn new(dialect: Dialect, file_name: impl Into<String>) -> Self {
        Self {
            file_name: file_name.into(),
            directive: dialect.directive_prefix().to_string(),
            scope_id: None,
            event: dialect.event_formatter(),
            slot: dialect.slot(),
            lazy_element: dialect.lazy_element(),
            component: Some(dialect.component()),
            is_builtin_component: Box::new(|_: &str| false),
            is_mini_program_component: Box::new(|_: &str| false),
            expr: Box::new(RawSerializer),
        }
    }

    pub fn with_directive(mut self, prefix: impl Into<String>) -> Self {
        self.directive = prefix.into();
        self
    }

    pub fn with_scope_id(mut self, scope_id: impl Into<String>) -> Self {
        self.scope_id = Some(scope_id.into());
        self
    }

    pub fn with_event_formatter(mut self, event: EventFormatter) -> Self {
        self.event = event;
        self
    }

    pub fn with_slot_fallback(mut self, fallback_content: bool) -> Self {
        self.slot.fallback_content = fallback_content;
        self
    }

    pub fn with_lazy_element(mut self, lazy: Option<LazyElement>) -> Self {
        self.lazy_element = lazy;
        self
    }

    pub fn with_component(mut self, component: Option<ComponentOptions>) -> Self {
        self.component = component;
        self
    }

    pub fn with_builtin_components(mut self, is_builtin: impl Fn(&str) -> bool + 'static) -> Self {
        self.is_builtin_component = Box::new(is_builtin);
        self
    }

    pub fn with_mini_program_components(mut self, is_native: impl Fn(&str) -> bool + 'static) -> Self {
        self.is_mini_program_component = Box::new(is_native);
        self
    }

    pub fn with_expr_serializer(mut self, expr: impl ExprSerializer + 'static) -> Self {
        self.expr = Box::new(expr);
        self
    }
}

/// Predicate over a fixed set of tag names.
pub fn tag_set<I, S>(tags: I) -> impl Fn(&str) -> bool + 'static
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let set: HashSet<String> = tags.into_iter().map(Into::into).collect();
    move |tag: &str| set.contains(tag)
}
