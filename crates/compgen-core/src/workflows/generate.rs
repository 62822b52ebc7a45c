//! Component generation workflow.
//!
//! Renders one `input_block` per descriptor, joins them, and substitutes the
//! result into the `component` skeleton.

use crate::descriptor::{ComponentRequest, InputDescriptor};
use crate::error::Result;
use crate::workflows::validate::validate_request;
use compgen_pm::{ComponentContext, PromptEngine};

/// Separator placed between rendered input blocks.
pub const INPUT_SEPARATOR: &str = ",\n        ";

/// Template holding the component skeleton.
pub const COMPONENT_TEMPLATE: &str = "component";

/// Template holding a single input block.
pub const INPUT_BLOCK_TEMPLATE: &str = "input_block";

/// Renders the component source for a list of descriptors.
///
/// Field values are embedded literally; quotes and other special characters
/// are not escaped. No validation is performed here.
///
/// # Errors
///
/// Returns `CompgenError::Template` if a template is missing or fails to render.
pub fn render_component<E: PromptEngine>(pm: &E, inputs: &[InputDescriptor]) -> Result<String> {
    let blocks = inputs
        .iter()
        .map(|input| pm.render(INPUT_BLOCK_TEMPLATE, input))
        .collect::<std::result::Result<Vec<_>, _>>()?;

    let context = ComponentContext::new(blocks.join(INPUT_SEPARATOR));
    Ok(pm.render(COMPONENT_TEMPLATE, &context)?)
}

/// Validates a request and renders its component source.
///
/// # Errors
///
/// Returns:
/// - `CompgenError::Validation` with every broken rule; nothing is rendered
/// - `CompgenError::Template` if rendering fails
///
/// # Examples
///
/// ```
/// use compgen_core::{ComponentRequest, InputDescriptor};
/// use compgen_core::workflows::generate_component;
/// use compgen_pm::TemplateManager;
///
/// let pm = TemplateManager::bundled();
/// let request = ComponentRequest::new(vec![InputDescriptor::new("foo", "Foo", "d1")]);
///
/// let code = generate_component(&pm, &request, 10)?;
/// assert!(code.contains("name=\"foo\""));
/// assert!(code.contains("info=\"d1\""));
/// # Ok::<(), compgen_core::CompgenError>(())
/// ```
#[tracing::instrument(skip(pm, request), fields(inputs = request.len()))]
pub fn generate_component<E: PromptEngine>(
    pm: &E,
    request: &ComponentRequest,
    max_inputs: usize,
) -> Result<String> {
    validate_request(request, max_inputs)?;

    let code = render_component(pm, &request.inputs)?;
    tracing::debug!(bytes = code.len(), "component rendered");
    Ok(code)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CompgenError;
    use compgen_pm::TemplateManager;

    fn foo() -> InputDescriptor {
        InputDescriptor::new("foo", "Foo", "d1")
    }

    #[test]
    fn test_single_input_block() {
        let pm = TemplateManager::bundled();
        let code = render_component(&pm, &[foo()]).unwrap();

        let expected_block = "        MessageTextInput(
            name=\"foo\",
            display_name=\"Foo\",
            info=\"d1\",
            value=\"\",  # you can customize a default value if desired
            tool_mode=True,
        )
    ]";
        assert!(code.contains(expected_block), "unexpected output:\n{code}");
        assert_eq!(code.matches("MessageTextInput(").count(), 1);
    }

    #[test]
    fn test_empty_batch_is_bare_skeleton() {
        let pm = TemplateManager::bundled();
        let code = render_component(&pm, &[]).unwrap();
        let skeleton = pm
            .render(COMPONENT_TEMPLATE, &ComponentContext::empty())
            .unwrap();

        assert_eq!(code, skeleton);
        assert!(code.contains("    inputs = [\n        \n    ]"));
    }

    #[test]
    fn test_blocks_follow_input_order() {
        let pm = TemplateManager::bundled();
        let inputs = vec![
            InputDescriptor::new("zeta", "Z", "last letter"),
            InputDescriptor::new("alpha", "A", "first letter"),
            InputDescriptor::new("mid", "M", "middle"),
        ];
        let code = render_component(&pm, &inputs).unwrap();

        let zeta = code.find("name=\"zeta\"").unwrap();
        let alpha = code.find("name=\"alpha\"").unwrap();
        let mid = code.find("name=\"mid\"").unwrap();
        assert!(zeta < alpha && alpha < mid);
        assert_eq!(code.matches("tool_mode=True").count(), 3);
        assert_eq!(code.matches("        ),\n        MessageTextInput(").count(), 2);
    }

    #[test]
    fn test_fields_embedded_without_escaping() {
        let pm = TemplateManager::bundled();
        let input = InputDescriptor::new("q", "Say \"hi\"", "<b>&</b>");
        let code = render_component(&pm, &[input]).unwrap();

        assert!(code.contains("display_name=\"Say \"hi\"\""));
        assert!(code.contains("info=\"<b>&</b>\""));
    }

    #[test]
    fn test_empty_display_and_description() {
        let pm = TemplateManager::bundled();
        let code = render_component(&pm, &[InputDescriptor::new("bare", "", "")]).unwrap();

        assert!(code.contains("display_name=\"\","));
        assert!(code.contains("info=\"\","));
    }

    #[test]
    fn test_ten_inputs() {
        let pm = TemplateManager::bundled();
        let inputs: Vec<_> = (0..10)
            .map(|i| InputDescriptor::new(format!("field_{i}"), format!("Field {i}"), ""))
            .collect();
        let request = ComponentRequest::new(inputs);

        let code = generate_component(&pm, &request, 10).unwrap();
        assert_eq!(code.matches("tool_mode=True").count(), 10);
    }

    #[test]
    fn test_invalid_request_is_not_rendered() {
        let pm = TemplateManager::bundled();
        let request = ComponentRequest::new(vec![InputDescriptor::new("a b", "A", "")]);

        let err = generate_component(&pm, &request, 10).unwrap_err();
        match err {
            CompgenError::Validation(errors) => assert_eq!(errors.len(), 1),
            other => panic!("expected validation error, got {other:?}"),
        }
    }
}
