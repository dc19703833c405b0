//! Render context: placeholder name to literal value.

use indexmap::IndexMap;
use log::debug;
use serde::Serialize;

use crate::config::TemplateConfig;
use crate::error::Result;
use crate::renderer::TemplateRenderer;

/// Namespace under which every variable is also exposed, so templates written
/// as `{{cookiecutter.project_name}}` render the same values.
pub const COMPAT_NAMESPACE: &str = "cookiecutter";

/// Values substituted into a template during one invocation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RenderContext {
    values: IndexMap<String, String>,
}

impl RenderContext {
    /// Creates the context for `project_name` with the derived `project_slug`.
    pub fn new<S: Into<String>>(project_name: S) -> Self {
        let project_name = project_name.into();
        let slug = project_slug(&project_name);
        let mut values = IndexMap::new();
        values.insert("project_name".to_string(), project_name);
        values.insert("project_slug".to_string(), slug);
        Self { values }
    }

    /// Creates the context for `project_name` and renders the template's extra
    /// variables on top of it.
    ///
    /// Declared variables replace derived ones (`project_slug`) but never the
    /// project name itself.
    pub fn for_template<S: Into<String>>(
        project_name: S,
        config: &TemplateConfig,
        engine: &dyn TemplateRenderer,
    ) -> Result<Self> {
        let mut context = Self::new(project_name);
        for (key, default) in &config.variables {
            if key == "project_name" {
                debug!("Ignoring template default for project_name");
                continue;
            }
            let value = engine
                .render(default, &context.to_value())
                .map_err(|e| e.at_path(config.variable_location(key)))?;
            debug!("Template variable {key} = {value:?}");
            context.insert(key.clone(), value);
        }
        Ok(context)
    }

    pub fn insert<K: Into<String>, V: Into<String>>(&mut self, key: K, value: V) {
        self.values.insert(key.into(), value.into());
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

    pub fn project_name(&self) -> &str {
        self.get("project_name").unwrap_or_default()
    }

    /// JSON object handed to the renderer: every value at the top level and
    /// again under [`COMPAT_NAMESPACE`].
    pub fn to_value(&self) -> serde_json::Value {
        let mut map: serde_json::Map<String, serde_json::Value> = self
            .values
            .iter()
            .map(|(k, v)| (k.clone(), serde_json::Value::String(v.clone())))
            .collect();
        let namespaced = serde_json::Value::Object(map.clone());
        map.entry(COMPAT_NAMESPACE).or_insert(namespaced);
        serde_json::Value::Object(map)
    }
}

/// Python-importable form of a project name: `My Blog-API` becomes `my_blog_api`.
///
/// The name is lowercased and every run of characters outside `[a-z0-9_]`
/// becomes a single `_`. Leading and trailing underscores are dropped, so the
/// result may be empty.
pub fn project_slug(project_name: &str) -> String {
    let mut slug = String::with_capacity(project_name.len());
    let mut in_run = false;
    for c in project_name.chars().flat_map(char::to_lowercase) {
        if c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_' {
            slug.push(c);
            in_run = false;
        } else if !in_run {
            slug.push('_');
            in_run = true;
        }
    }
    slug.trim_matches('_').to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::MiniJinjaRenderer;
    use serde_json::json;

    #[test]
    fn test_slug_is_snake_case() {
        assert_eq!(project_slug("blog"), "blog");
        assert_eq!(project_slug("My Blog"), "my_blog");
        assert_eq!(project_slug("blog-api"), "blog_api");
        assert_eq!(project_slug("My Blog-API"), "my_blog_api");
    }

    #[test]
    fn test_slug_keeps_digits_attached() {
        assert_eq!(project_slug("blog2"), "blog2");
        assert_eq!(project_slug("app1"), "app1");
        assert_eq!(project_slug("blog_v2"), "blog_v2");
        assert_eq!(project_slug("my-site"), "my_site");
    }

    #[test]
    fn test_slug_collapses_other_characters() {
        assert_eq!(project_slug("Café"), "caf");
        assert_eq!(project_slug("  shop -- api  "), "shop_api");
        assert_eq!(project_slug("---"), "");
    }

    #[test]
    fn test_value_exposes_compat_namespace() {
        let value = RenderContext::new("demo").to_value();
        assert_eq!(value["project_name"], json!("demo"));
        assert_eq!(value["cookiecutter"]["project_slug"], json!("demo"));
    }

    #[test]
    fn test_template_variables_render_in_order() {
        let mut config = TemplateConfig::default();
        config.variables.insert("module".into(), "{{ project_slug }}_app".into());
        config.variables.insert("title".into(), "{{ module | upper }}".into());
        config.variables.insert("project_name".into(), "ignored".into());

        let engine = MiniJinjaRenderer::new();
        let context = RenderContext::for_template("Blog Api", &config, &engine).unwrap();

        assert_eq!(context.project_name(), "Blog Api");
        assert_eq!(context.get("module"), Some("blog_api_app"));
        assert_eq!(context.get("title"), Some("BLOG_API_APP"));
    }

    #[test]
    fn test_failing_variable_names_its_key() {
        let mut config = TemplateConfig::default();
        config.variables.insert("app_title".into(), "{{ missing_value }}".into());

        let engine = MiniJinjaRenderer::new();
        let err = RenderContext::for_template("blog", &config, &engine).unwrap_err();

        match err {
            crate::error::Error::RenderFailure { path, source } => {
                assert_eq!(path, "variable 'app_title'");
                assert!(matches!(*source, crate::error::Error::MinijinjaError(_)));
            }
            other => panic!("Expected RenderFailure, got {other:?}"),
        }
    }
}
