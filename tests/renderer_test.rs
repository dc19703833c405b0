use pybolt::error::Error;
use pybolt::renderer::{MiniJinjaRenderer, TemplateRenderer};
use serde_json::json;

#[test]
fn test_minijinja_renderer() {
    let engine = MiniJinjaRenderer::new();
    let context = json!({
        "project_name": "demo",
        "value": 42
    });

    let result = engine.render("Hello {{project_name}}!", &context).unwrap();
    assert_eq!(result, "Hello demo!");

    let result = engine.render("Value: {{ value }}", &context).unwrap();
    assert_eq!(result, "Value: 42");
}

#[test]
fn test_filters_are_available() {
    let engine = MiniJinjaRenderer::new();
    let context = json!({"project_name": "my blog"});

    let result = engine.render("{{ project_name | title }}", &context).unwrap();
    assert_eq!(result, "My Blog");
}

#[test]
fn test_namespaced_tokens() {
    let engine = MiniJinjaRenderer::new();
    let context = json!({"cookiecutter": {"project_name": "blog"}});

    let result = engine.render(r#"ROOT_URLCONF = "{{cookiecutter.project_name}}.urls""#, &context);
    assert_eq!(result.unwrap(), r#"ROOT_URLCONF = "blog.urls""#);
}

#[test]
fn test_undefined_token_is_an_error() {
    let engine = MiniJinjaRenderer::new();
    let context = json!({"project_name": "demo"});

    let result = engine.render("{{ project_name }} by {{ author }}", &context);
    assert!(matches!(result, Err(Error::MinijinjaError(_))));
}

#[test]
fn test_text_without_tokens_is_unchanged() {
    let engine = MiniJinjaRenderer::new();
    let text = "DATABASES = {\n    \"default\": {}\n}\n";

    assert_eq!(engine.render(text, &json!({})).unwrap(), text);
}
