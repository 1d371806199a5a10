/// Facts about an event binding that decide its attribute name.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EventFlags {
    /// `.stop` or `.prevent` was used.
    pub is_catch: bool,
    pub is_capture: bool,
    /// The bound element is a user component.
    pub is_component: bool,
}

pub type EventFormatFn = Box<dyn Fn(&str, EventFlags) -> String>;

/// How a dialect spells event-binding attributes.
#[derive(Default)]
pub enum EventFormatter {
    /// `bind:tap`, `catch:tap`, `capture-bind:tap`
    #[default]
    Standard,
    /// `onTap`, `catchTap`
    Alipay,
    Custom(EventFormatFn),
}

impl EventFormatter {
    pub fn format(&self, event: &str, flags: EventFlags) -> String {
        match self {
            EventFormatter::Standard => format_mini_program_event(event, flags),
            EventFormatter::Alipay => format_alipay_event(event, flags),
            EventFormatter::Custom(f) => f(event, flags),
        }
    }
}

impl std::fmt::Debug for EventFormatter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EventFormatter::Standard => f.write_str("Standard"),
            EventFormatter::Alipay => f.write_str("Alipay"),
            EventFormatter::Custom(_) => f.write_str("Custom(..)"),
        }
    }
}

// Native elements only know `tap`.
fn native_event_name(event: &str, is_component: bool) -> &str {
    if !is_component && event == "click" { "tap" } else { event }
}

pub fn format_mini_program_event(event: &str, flags: EventFlags) -> String {
    let event = native_event_name(event, flags.is_component);
    let event_type = if flags.is_catch { "catch" } else { "bind" };
    if flags.is_capture {
        return format!("capture-{event_type}:{event}");
    }
    format!("{event_type}:{event}")
}

// Alipay spells compound DOM event names in camel case.
fn alipay_event_name(event: &str) -> &str {
    match event {
        "touchstart" => "touchStart",
        "touchmove" => "touchMove",
        "touchend" => "touchEnd",
        "touchcancel" => "touchCancel",
        "longtap" | "longpress" => "longTap",
        "transitionend" => "transitionEnd",
        "animationstart" => "animationStart",
        "animationiteration" => "animationIteration",
        "animationend" => "animationEnd",
        "firstappear" => "firstAppear",
        _ => event,
    }
}

pub fn format_alipay_event(event: &str, flags: EventFlags) -> String {
    let event = alipay_event_name(native_event_name(event, flags.is_component));
    let prefix = if flags.is_catch { "catch" } else { "on" };
    let mut out = String::with_capacity(prefix.len() + event.len());
    out.push_str(prefix);
    let mut upper = true;
    for ch in event.chars() {
        if ch == '-' {
            upper = true;
            continue;
        }
        if upper {
            out.extend(ch.to_uppercase());
            upper = false;
        } else {
            out.push(ch);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn flags(is_catch: bool, is_capture: bool, is_component: bool) -> EventFlags {
        EventFlags { is_catch, is_capture, is_component }
    }

    #[rstest]
    #[case("tap", flags(false, false, false), "bind:tap")]
    #[case("click", flags(false, false, false), "bind:tap")]
    #[case("click", flags(false, false, true), "bind:click")]
    #[case("tap", flags(true, false, false), "catch:tap")]
    #[case("tap", flags(false, true, false), "capture-bind:tap")]
    #[case("tap", flags(true, true, false), "capture-catch:tap")]
    fn standard_event_names(#[case] event: &str, #[case] flags: EventFlags, #[case] expected: &str) {
        assert_eq!(EventFormatter::Standard.format(event, flags), expected);
    }

    #[rstest]
    #[case("tap", flags(false, false, false), "onTap")]
    #[case("click", flags(true, false, false), "catchTap")]
    #[case("touch-start", flags(false, true, false), "onTouchStart")]
    #[case("click", flags(false, false, true), "onClick")]
    #[case("touchstart", flags(false, false, false), "onTouchStart")]
    #[case("longpress", flags(true, false, false), "catchLongTap")]
    #[case("transitionend", flags(false, false, false), "onTransitionEnd")]
    #[case("animationiteration", flags(false, false, true), "onAnimationIteration")]
    fn alipay_event_names(#[case] event: &str, #[case] flags: EventFlags, #[case] expected: &str) {
        assert_eq!(EventFormatter::Alipay.format(event, flags), expected);
    }

    #[test]
    fn custom_formatter_is_called() {
        let f = EventFormatter::Custom(Box::new(|e: &str, fl: EventFlags| {
            format!("{}{}", if fl.is_catch { "catch" } else { "bind" }, e)
        }));
        assert_eq!(f.format("input", EventFlags::default()), "bindinput");
    }
}
