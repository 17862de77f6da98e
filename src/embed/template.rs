//! Template types for typed variable injection.

use std::borrow::Cow;
use std::marker::PhantomData;

/// Trait for template variable sets
pub trait TemplateVars {
    fn apply(&self, content: &str) -> String;
}

/// Template with typed variable injection
///
/// Built-in templates borrow `'static` content; user templates read from
/// disk own theirs.
#[derive(Debug, Clone)]
pub struct Template<V> {
    content: Cow<'static, str>,
    _marker: PhantomData<V>,
}

impl<V> Template<V> {
    pub const fn new(content: &'static str) -> Self {
        Self {
            content: Cow::Borrowed(content),
            _marker: PhantomData,
        }
    }

    pub fn from_string(content: String) -> Self {
        Self {
            content: Cow::Owned(content),
            _marker: PhantomData,
        }
    }

    pub fn content(&self) -> &str {
        &self.content
    }
}

impl<V: TemplateVars> Template<V> {
    pub fn render(&self, vars: &V) -> String {
        vars.apply(&self.content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Upper;

    impl TemplateVars for Upper {
        fn apply(&self, content: &str) -> String {
            content.to_uppercase()
        }
    }

    #[test]
    fn test_static_and_owned_render_alike() {
        const STATIC: Template<Upper> = Template::new("hi {{x}}");
        let owned: Template<Upper> = Template::from_string("hi {{x}}".to_string());
        assert_eq!(STATIC.render(&Upper), "HI {{X}}");
        assert_eq!(owned.render(&Upper), STATIC.render(&Upper));
        assert_eq!(owned.content(), "hi {{x}}");
    }
}
