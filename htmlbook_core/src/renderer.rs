use crate::HtmlbookResult;
use crate::model::Model;
use crate::templates::LoadedTemplate;

/// Render `template` with `model` bound to the `node` variable.
///
/// Engine failures are returned unchanged as [`crate::HtmlbookError::Render`].
pub fn render(template: &LoadedTemplate, model: &Model<'_>) -> HtmlbookResult<String> {
	let compiled = template.template()?;
	Ok(compiled.render(minijinja::context! { node => model })?)
}
