//! Message formatting for `{}`-anchored patterns.
//!
//! Anchors are filled left to right. `\{}` renders a literal `{}` and `\\{}`
//! renders a backslash followed by the substituted argument. Anchors without
//! a matching argument stay as `{}`; surplus arguments are ignored.

use logbridge_domain::LogArg;
use serde_json::Value;
use std::borrow::Cow;

const ANCHOR: &str = "{}";

/// Substitute `arguments` into `pattern`.
#[must_use]
pub fn format_message(pattern: &str, arguments: &[LogArg]) -> String {
    if arguments.is_empty() {
        return pattern.to_owned();
    }

    let mut output = String::with_capacity(pattern.len() + arguments.len() * 8);
    let mut rest = pattern;
    let mut next_argument = 0;

    while let Some(index) = rest.find(ANCHOR) {
        let (head, tail) = rest.split_at(index);
        let after = tail.get(ANCHOR.len()..).unwrap_or_default();

        if let Some(escaped) = head.strip_suffix('\\') {
            output.push_str(escaped);
            // `\\{}` keeps one backslash and still substitutes.
            if !escaped.ends_with('\\') {
                output.push_str(ANCHOR);
                rest = after;
                continue;
            }
        } else {
            output.push_str(head);
        }

        match arguments.get(next_argument) {
            Some(argument) => {
                output.push_str(&render_argument(argument));
                next_argument += 1;
            },
            None => output.push_str(ANCHOR),
        }
        rest = after;
    }

    output.push_str(rest);
    output
}

/// Render one argument: strings verbatim, `null` as `null`, everything else
/// as compact JSON.
#[must_use]
pub fn render_argument(argument: &LogArg) -> Cow<'_, str> {
    match argument {
        Value::String(text) => Cow::Borrowed(text),
        Value::Null => Cow::Borrowed("null"),
        Value::Bool(flag) => Cow::Borrowed(if *flag { "true" } else { "false" }),
        Value::Number(number) => Cow::Owned(number.to_string()),
        other => Cow::Owned(other.to_string()),
    }
}

/// Render a cause and its `source()` chain, outermost first.
#[must_use]
pub fn render_cause_chain(cause: &(dyn std::error::Error + 'static)) -> Vec<String> {
    let mut chain = vec![cause.to_string()];
    let mut current = cause.source();
    while let Some(source) = current {
        chain.push(source.to_string());
        current = source.source();
    }
    chain
}
