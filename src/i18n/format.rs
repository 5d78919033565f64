//! Positional placeholder formatting.
//!
//! Templates use `{0}`, `{1}`, ... for arguments and `{{` / `}}` for literal
//! braces. Anything the formatter cannot make sense of (an index past the
//! end of `args`, a non-numeric placeholder, an unbalanced brace) makes the
//! whole call return the template untouched.

use std::fmt::{Display, Write};

/// Format `template` against `args`.
///
/// With no arguments the template is returned as is, braces included.
pub fn format_positional(template: &str, args: &[&dyn Display]) -> String {
    if args.is_empty() {
        return template.to_string();
    }

    try_format(template, args).unwrap_or_else(|| template.to_string())
}

fn try_format(template: &str, args: &[&dyn Display]) -> Option<String> {
    let mut out = String::with_capacity(template.len());
    let mut chars = template.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '{' if chars.peek() == Some(&'{') => {
                chars.next();
                out.push('{');
            }
            '{' => {
                let mut index = String::new();
                loop {
                    match chars.next()? {
                        '}' => break,
                        d if d.is_ascii_digit() => index.push(d),
                        c if c.is_whitespace() && index.is_empty() => {}
                        _ => return None,
                    }
                }
                let arg = args.get(index.parse::<usize>().ok()?)?;
                write!(out, "{}", arg).ok()?;
            }
            '}' if chars.peek() == Some(&'}') => {
                chars.next();
                out.push('}');
            }
            '}' => return None,
            c => out.push(c),
        }
    }

    Some(out)
}
