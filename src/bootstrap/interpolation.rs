//! `${name}` references inside module text.
//!
//! - `${name}` - replaced with the module value `name`
//! - `$${name}` - produces literal `${name}` in output
//!
//! Only the module's own values are visible. There is no fallback to the
//! process environment.

use std::collections::BTreeMap;

/// A segment of an interpolated string.
#[derive(Debug, Clone, PartialEq)]
pub enum Segment {
    /// Literal text
    Literal(String),
    /// Variable reference: ${name}
    Variable(String),
}

/// Parse a string containing `${var}` references.
pub fn parse_interpolation(input: &str) -> Vec<Segment> {
    let mut segments = Vec::new();
    let mut chars = input.chars().peekable();
    let mut current_literal = String::new();

    while let Some(c) = chars.next() {
        if c != '$' {
            current_literal.push(c);
            continue;
        }
        match chars.peek() {
            Some('$') => {
                // $$ becomes $, and $${...} stays literal
                chars.next();
                current_literal.push('$');
                if chars.peek() == Some(&'{') {
                    for c in chars.by_ref() {
                        current_literal.push(c);
                        if c == '}' {
                            break;
                        }
                    }
                }
            }
            Some('{') => {
                chars.next();
                if !current_literal.is_empty() {
                    segments.push(Segment::Literal(std::mem::take(&mut current_literal)));
                }
                let mut var_name = String::new();
                for c in chars.by_ref() {
                    if c == '}' {
                        break;
                    }
                    var_name.push(c);
                }
                segments.push(Segment::Variable(var_name.trim().to_string()));
            }
            _ => current_literal.push(c),
        }
    }

    if !current_literal.is_empty() {
        segments.push(Segment::Literal(current_literal));
    }

    segments
}

/// Resolve every reference in `input` against `values`.
///
/// Returns the name of the first unresolved reference on failure.
pub fn resolve(input: &str, values: &BTreeMap<String, String>) -> Result<String, String> {
    let mut result = String::new();
    for segment in parse_interpolation(input) {
        match segment {
            Segment::Literal(text) => result.push_str(&text),
            Segment::Variable(name) => match values.get(&name) {
                Some(value) => result.push_str(value),
                None => return Err(name),
            },
        }
    }
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn values(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn parse_literal_only() {
        assert_eq!(
            parse_interpolation("hello world"),
            vec![Segment::Literal("hello world".to_string())]
        );
    }

    #[test]
    fn parse_variable_with_surrounding_text() {
        assert_eq!(
            parse_interpolation("Hello, ${name}!"),
            vec![
                Segment::Literal("Hello, ".to_string()),
                Segment::Variable("name".to_string()),
                Segment::Literal("!".to_string()),
            ]
        );
    }

    #[test]
    fn parse_escaped_reference() {
        assert_eq!(
            parse_interpolation("cost $${price}"),
            vec![Segment::Literal("cost ${price}".to_string())]
        );
    }

    #[test]
    fn lone_dollar_is_literal() {
        assert_eq!(
            parse_interpolation("echo $HOME"),
            vec![Segment::Literal("echo $HOME".to_string())]
        );
    }

    #[test]
    fn resolve_substitutes_values() {
        let v = values(&[("course", "44-671"), ("who", "students")]);
        assert_eq!(
            resolve("${course} for ${who}", &v).unwrap(),
            "44-671 for students"
        );
    }

    #[test]
    fn resolve_reports_unknown_name() {
        let v = values(&[]);
        assert_eq!(resolve("hi ${PATH}", &v).unwrap_err(), "PATH");
    }
}
