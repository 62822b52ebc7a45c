//! Integration tests for the generate pipeline.
//!
//! Runs submissions through `ComponentRuntime` with a mock refiner and checks
//! the generated source and the validation behaviour.

use compgen_core::tools::refiner_mock::MockRefiner;
use compgen_core::{
    CompgenConfig, CompgenError, ComponentRequest, ComponentRuntime, InputDescriptor,
    ValidationIssue,
};
use compgen_pm::{ComponentContext, PromptEngine, TemplateManager};
use std::fs;
use std::sync::Arc;
use tempfile::TempDir;

fn runtime(mock: &MockRefiner) -> ComponentRuntime {
    ComponentRuntime::with_refiner(
        CompgenConfig::default(),
        Arc::new(TemplateManager::bundled()),
        Some(Box::new(mock.clone())),
    )
}

#[tokio::test]
async fn test_one_block_per_descriptor_in_order() {
    let mock = MockRefiner::new();
    let runtime = runtime(&mock);

    let inputs: Vec<InputDescriptor> = (0..7)
        .map(|i| {
            InputDescriptor::new(
                format!("input_{i}"),
                format!("Input #{i}"),
                format!("Description for input {i}"),
            )
        })
        .collect();

    let component = runtime
        .submit(ComponentRequest::new(inputs.clone()))
        .await
        .unwrap();

    assert_eq!(component.draft.matches("MessageTextInput(\n").count(), 7);

    let mut last_position = 0;
    for input in &inputs {
        let name = format!("name=\"{}\"", input.name);
        let position = component.draft.find(&name).unwrap();
        assert!(position > last_position, "{} is out of order", input.name);
        last_position = position;

        assert!(component.draft.contains(&format!("display_name=\"{}\"", input.display_name)));
        assert!(component.draft.contains(&format!("info=\"{}\"", input.description)));
    }
}

#[tokio::test]
async fn test_empty_batch_yields_skeleton() {
    let mock = MockRefiner::new();
    let runtime = runtime(&mock);

    let component = runtime.submit(ComponentRequest::default()).await.unwrap();

    let skeleton = TemplateManager::bundled()
        .render("component", &ComponentContext::empty())
        .unwrap();
    assert_eq!(component.draft, skeleton);
    assert!(!component.draft.contains("MessageTextInput("));
    assert_eq!(component.input_count, 0);
}

#[tokio::test]
async fn test_foo_example() {
    let mock = MockRefiner::new();
    let runtime = runtime(&mock);

    let request = ComponentRequest::new(vec![InputDescriptor::new("foo", "Foo", "d1")]);
    let component = runtime.submit(request).await.unwrap();

    assert_eq!(component.draft.matches("MessageTextInput(\n").count(), 1);
    assert!(component.draft.contains("name=\"foo\""));
    assert!(component.draft.contains("display_name=\"Foo\""));
    assert!(component.draft.contains("info=\"d1\""));
    assert!(component.draft.contains("value=\"\""));
    assert!(component.draft.contains("tool_mode=True"));

    // The mock echoes, so the refined code is the trimmed draft.
    assert_eq!(component.code, component.draft.trim());
    assert_eq!(mock.call_count(), 1);
}

#[tokio::test]
async fn test_whitespace_name_reports_error() {
    let mock = MockRefiner::new();
    let runtime = runtime(&mock);

    let request = ComponentRequest::new(vec![InputDescriptor::new("a b", "A B", "spaced")]);
    let err = runtime.submit(request).await.unwrap_err();

    let errors = err.validation().expect("expected validation error");
    assert_eq!(
        errors.issues,
        vec![ValidationIssue::NameContainsWhitespace {
            index: 0,
            name: "a b".to_string()
        }]
    );
    assert_eq!(mock.call_count(), 0);
}

#[tokio::test]
async fn test_three_violations_three_errors() {
    let mock = MockRefiner::new();
    let runtime = runtime(&mock);

    let request = ComponentRequest::new(vec![
        InputDescriptor::new("", "Empty", ""),
        InputDescriptor::new("has space", "Space", ""),
        InputDescriptor::new("dup", "First", ""),
        InputDescriptor::new("dup", "Second", ""),
    ]);
    let err = runtime.submit(request).await.unwrap_err();

    match err {
        CompgenError::Validation(errors) => {
            assert_eq!(errors.len(), 3);
            assert_eq!(
                errors.messages(),
                vec![
                    "Name of Input 1 cannot be empty.",
                    "Name of Input 2 ('has space') contains spaces. Spaces are not allowed.",
                    "Name of Input 4 ('dup') is a duplicate. Each name must be unique.",
                ]
            );
        }
        other => panic!("expected validation error, got {other:?}"),
    }
    assert_eq!(mock.call_count(), 0);
}

#[tokio::test]
async fn test_template_override_directory() {
    let temp_dir = TempDir::new().unwrap();
    fs::write(
        temp_dir.path().join("input_block.j2"),
        "StrInput(name=\"{{ name }}\")",
    )
    .unwrap();

    let runtime = ComponentRuntime::with_refiner(
        CompgenConfig::default(),
        Arc::new(TemplateManager::new(temp_dir.path().to_path_buf()).unwrap()),
        None,
    );

    let request = ComponentRequest::new(vec![
        InputDescriptor::new("a", "", ""),
        InputDescriptor::new("b", "", ""),
    ]);
    let component = runtime.submit(request).await.unwrap();

    assert!(
        component
            .code
            .contains("        StrInput(name=\"a\"),\n        StrInput(name=\"b\")\n")
    );
    assert!(component.code.contains("class CustomComponent(Component):"));
}
