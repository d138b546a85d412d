//! Textual template binding for the payment widget markup
//!
//! A deliberately small `{{name}}` substitution engine: one pass over
//! the template, keyed replacement only. Replacement values are copied
//! in literally and never rescanned, so a value that itself looks like
//! a placeholder stays literal text. Callers are responsible for
//! escaping attacker-controlled values before handing them in.

pub mod button;

/// Substitute `{{name}}` placeholders in `template` from `replacements`.
///
/// Unknown placeholders are left untouched; a `{{` with no closing
/// `}}` is treated as literal text.
pub fn bind(template: &str, replacements: &[(&str, &str)]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(start) = rest.find("{{") {
        out.push_str(&rest[..start]);
        let after = &rest[start + 2..];
        match after.find("}}") {
            Some(end) => {
                let key = &after[..end];
                match lookup(replacements, key) {
                    Some(value) => out.push_str(value),
                    None => {
                        out.push_str("{{");
                        out.push_str(key);
                        out.push_str("}}");
                    }
                }
                rest = &after[end + 2..];
            }
            None => {
                out.push_str("{{");
                rest = after;
            }
        }
    }

    out.push_str(rest);
    out
}

fn lookup<'a>(replacements: &[(&str, &'a str)], key: &str) -> Option<&'a str> {
    replacements
        .iter()
        .find(|(name, _)| *name == key)
        .map(|(_, value)| *value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bind_substitutes_each_key() {
        let rendered = bind(
            "<a href=\"{{url}}\">{{label}}</a>",
            &[("url", "https://shop.example/pay"), ("label", "Pay Now")],
        );
        assert_eq!(rendered, "<a href=\"https://shop.example/pay\">Pay Now</a>");
    }

    #[test]
    fn test_bind_does_not_rescan_replacement_values() {
        // A value that spells another placeholder must stay literal.
        let rendered = bind(
            "{{label}}:{{apiId}}",
            &[("label", "{{apiId}}"), ("apiId", "login123")],
        );
        assert_eq!(rendered, "{{apiId}}:login123");
    }

    #[test]
    fn test_bind_leaves_unknown_placeholders() {
        let rendered = bind("{{known}} and {{unknown}}", &[("known", "yes")]);
        assert_eq!(rendered, "yes and {{unknown}}");
    }

    #[test]
    fn test_bind_treats_unterminated_delimiter_as_text() {
        let rendered = bind("broken {{tail", &[("tail", "nope")]);
        assert_eq!(rendered, "broken {{tail");
    }

    #[test]
    fn test_bind_repeated_placeholder() {
        let rendered = bind("{{x}}-{{x}}", &[("x", "a")]);
        assert_eq!(rendered, "a-a");
    }
}
