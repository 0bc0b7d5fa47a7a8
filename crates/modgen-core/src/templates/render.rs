//! `{{key}}` placeholder interpolation

/// Placeholder values for a single rendering pass
#[derive(Debug, Clone, Default)]
pub struct TemplateContext {
    values: Vec<(String, String)>,
}

impl TemplateContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a placeholder value, replacing any earlier value for the same key
    pub fn insert(&mut self, key: &str, value: impl Into<String>) -> &mut Self {
        let value = value.into();
        match self.values.iter_mut().find(|(k, _)| k == key) {
            Some(slot) => slot.1 = value,
            None => self.values.push((key.to_string(), value)),
        }
        self
    }

    pub fn with(mut self, key: &str, value: impl Into<String>) -> Self {
        self.insert(key, value);
        self
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.values
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Replace every `{{key}}` in `body`. Unknown placeholders are left untouched.
    ///
    /// The body is scanned once; substituted values are emitted verbatim and
    /// never scanned again.
    pub fn render(&self, body: &str) -> String {
        let mut out = String::with_capacity(body.len());
        let mut rest = body;

        while let Some(start) = rest.find("{{") {
            let after = &rest[start + 2..];
            let Some(end) = after.find("}}") else {
                break;
            };

            match self.get(&after[..end]) {
                Some(value) => {
                    out.push_str(&rest[..start]);
                    out.push_str(value);
                    rest = &after[end + 2..];
                }
                None => {
                    // Keep one brace and rescan, so `{{{key}}` still resolves
                    out.push_str(&rest[..start + 1]);
                    rest = &rest[start + 1..];
                }
            }
        }

        out.push_str(rest);
        out
    }

    /// Placeholder-shaped tokens (`{{identifier}}`) still present in `text`
    pub fn unresolved(&self, text: &str) -> Vec<String> {
        let mut found = Vec::new();
        let mut rest = text;

        while let Some(start) = rest.find("{{") {
            let after = &rest[start + 2..];
            match after.find("}}") {
                Some(end) => {
                    let key = &after[..end];
                    if !key.is_empty()
                        && key.chars().all(|c| c.is_ascii_alphanumeric() || c == '_')
                    {
                        found.push(key.to_string());
                    }
                    rest = &after[end + 2..];
                }
                None => break,
            }
        }

        found
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_replaces_all_occurrences() {
        let ctx = TemplateContext::new().with("type", "Song");
        assert_eq!(
            ctx.render("interface {{type}} {} type {{type}}Input"),
            "interface Song {} type SongInput"
        );
    }

    #[test]
    fn test_render_leaves_unknown_placeholders() {
        let ctx = TemplateContext::new().with("type", "Song");
        let out = ctx.render("{{type}} {{other}}");
        assert_eq!(out, "Song {{other}}");
        assert_eq!(ctx.unresolved(&out), vec!["other".to_string()]);
    }

    #[test]
    fn test_render_next_to_jsx_brace() {
        let ctx = TemplateContext::new().with("camel", "song");
        assert_eq!(
            ctx.render("<p>{{{camel}}Counter.value.count}</p>"),
            "<p>{songCounter.value.count}</p>"
        );
    }

    #[test]
    fn test_values_are_not_expanded_again() {
        let ctx = TemplateContext::new()
            .with("module", "{{type}}")
            .with("type", "Song");
        assert_eq!(
            ctx.render("{{module}} holds {{type}}"),
            "{{type}} holds Song"
        );
    }

    #[test]
    fn test_render_unterminated_placeholder() {
        let ctx = TemplateContext::new().with("type", "Song");
        assert_eq!(ctx.render("{{type}} and {{type"), "Song and {{type");
    }

    #[test]
    fn test_insert_overwrites() {
        let mut ctx = TemplateContext::new();
        ctx.insert("type", "A").insert("type", "B");
        assert_eq!(ctx.get("type"), Some("B"));
    }
}
