use std::fs;
use std::path::Path;

use pybolt::context::RenderContext;
use pybolt::error::Error;
use pybolt::processor::Processor;
use pybolt::renderer::MiniJinjaRenderer;
use tempfile::TempDir;

fn write(root: &Path, relative: &str, content: &str) {
    let path = root.join(relative);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, content).unwrap();
}

fn render(template: &Path, target: &Path, project_name: &str) -> pybolt::error::Result<()> {
    let engine = MiniJinjaRenderer::new();
    let processor = Processor::new(&engine, template)?;
    let context = RenderContext::new(project_name).to_value();
    let created = processor.render_tree(template, target, &context)?;
    assert_eq!(created, target);
    Ok(())
}

#[test]
fn test_renders_paths_and_contents() {
    let template = TempDir::new().unwrap();
    let output = TempDir::new().unwrap();
    write(template.path(), "{{project_slug}}/settings.py", "ROOT_URLCONF = \"{{project_slug}}.urls\"\n");
    write(template.path(), "README.md", "# {{ project_name }}\n");

    let target = output.path().join("My Blog");
    render(template.path(), &target, "My Blog").unwrap();

    assert_eq!(
        fs::read_to_string(target.join("my_blog/settings.py")).unwrap(),
        "ROOT_URLCONF = \"my_blog.urls\"\n"
    );
    assert_eq!(fs::read_to_string(target.join("README.md")).unwrap(), "# My Blog\n");
}

#[test]
fn test_files_without_tokens_are_copied_verbatim() {
    let template = TempDir::new().unwrap();
    let output = TempDir::new().unwrap();
    write(template.path(), "static/site.css", "body { margin: 0; }\n");
    write(template.path(), "nested/deeper/notes.txt", "plain text\n");
    fs::write(template.path().join("logo.bin"), [0xffu8, 0xfe, 0x00, b'{', b'{']).unwrap();

    let target = output.path().join("demo");
    render(template.path(), &target, "demo").unwrap();

    assert!(!dir_diff::is_different(template.path(), &target).unwrap());
}

#[test]
fn test_ignored_entries_are_skipped() {
    let template = TempDir::new().unwrap();
    let output = TempDir::new().unwrap();
    write(template.path(), "app.py", "print('hi')\n");
    write(template.path(), "__pycache__/app.cpython-311.pyc", "junk");
    write(template.path(), "bolt.yaml", "variables: {}\n");
    write(template.path(), ".boltignore", "drafts/**\ndrafts\n");
    write(template.path(), "drafts/idea.md", "{{ undefined_token }}");

    let target = output.path().join("demo");
    render(template.path(), &target, "demo").unwrap();

    assert!(target.join("app.py").is_file());
    assert!(!target.join("__pycache__").exists());
    assert!(!target.join("bolt.yaml").exists());
    assert!(!target.join(".boltignore").exists());
    assert!(!target.join("drafts").exists());
}

#[test]
fn test_empty_rendered_path_is_skipped() {
    let template = TempDir::new().unwrap();
    let output = TempDir::new().unwrap();
    write(template.path(), "{% if false %}optional.txt{% endif %}", "never");
    write(template.path(), "kept.txt", "kept");

    let target = output.path().join("demo");
    render(template.path(), &target, "demo").unwrap();

    let entries: Vec<_> = fs::read_dir(&target).unwrap().map(|e| e.unwrap().file_name()).collect();
    assert_eq!(entries, vec![std::ffi::OsString::from("kept.txt")]);
}

#[test]
fn test_existing_target_is_not_touched() {
    let template = TempDir::new().unwrap();
    let output = TempDir::new().unwrap();
    write(template.path(), "app.py", "new");
    let target = output.path().join("demo");
    write(&target, "app.py", "original");

    let err = render(template.path(), &target, "demo").unwrap_err();

    assert!(matches!(err, Error::AlreadyExists { .. }));
    assert_eq!(fs::read_to_string(target.join("app.py")).unwrap(), "original");
}

#[test]
fn test_missing_template() {
    let output = TempDir::new().unwrap();
    let missing = output.path().join("no-such-template");
    let target = output.path().join("demo");

    let engine = MiniJinjaRenderer::new();
    let processor = Processor::new(&engine, &missing).unwrap();
    let err = processor
        .render_tree(&missing, &target, &RenderContext::new("demo").to_value())
        .unwrap_err();

    assert!(matches!(err, Error::TemplateNotFound { .. }));
    assert!(!target.exists());
}

#[test]
fn test_render_failure_keeps_partial_output() {
    let template = TempDir::new().unwrap();
    let output = TempDir::new().unwrap();
    write(template.path(), "a_first.txt", "{{ project_name }}");
    write(template.path(), "b_broken.txt", "{{ missing_variable }}");

    let target = output.path().join("demo");
    let err = render(template.path(), &target, "demo").unwrap_err();

    match err {
        Error::RenderFailure { path, .. } => assert!(path.ends_with("b_broken.txt")),
        other => panic!("Expected RenderFailure, got {other:?}"),
    }
    assert_eq!(fs::read_to_string(target.join("a_first.txt")).unwrap(), "demo");
}

#[cfg(unix)]
#[test]
fn test_permissions_are_preserved() {
    use std::os::unix::fs::PermissionsExt;

    let template = TempDir::new().unwrap();
    let output = TempDir::new().unwrap();
    write(template.path(), "manage.py", "#!/usr/bin/env python\n# {{ project_slug }}\n");
    fs::set_permissions(template.path().join("manage.py"), fs::Permissions::from_mode(0o755))
        .unwrap();

    let target = output.path().join("demo");
    render(template.path(), &target, "demo").unwrap();

    let mode = fs::metadata(target.join("manage.py")).unwrap().permissions().mode();
    assert_eq!(mode & 0o777, 0o755);
}
