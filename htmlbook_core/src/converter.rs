use std::borrow::Cow;
use std::path::Path;
use std::path::PathBuf;

use crate::HtmlbookResult;
use crate::config::HtmlbookConfig;
use crate::model::Model;
use crate::model::project;
use crate::model::project_document;
use crate::renderer::render;
use crate::templates::TemplateResolver;
use crate::tree::DocumentNode;
use crate::tree::Node;

/// Render mode that converts a document without its outer page wrapper.
pub const EMBEDDED: &str = "embedded";

/// Options for constructing a [`Converter`].
#[derive(Debug, Clone, Default)]
pub struct ConverterOptions {
	/// Directories searched for templates before the built-in ones, highest
	/// precedence first.
	pub template_dirs: Vec<PathBuf>,
}

impl ConverterOptions {
	/// Build options from an [`HtmlbookConfig`]. Relative template paths are
	/// resolved against `root`.
	pub fn from_config(config: Option<&HtmlbookConfig>, root: &Path) -> Self {
		let template_dirs = config
			.map(|c| c.templates.paths.iter().map(|path| root.join(path)).collect())
			.unwrap_or_default();

		Self { template_dirs }
	}
}

/// Converts document tree nodes to markup through templates.
///
/// A converter owns its template cache. It is `Send + Sync`, so one instance
/// can serve conversions on several threads.
#[derive(Debug)]
pub struct Converter {
	templates: TemplateResolver,
}

impl Converter {
	pub fn new(options: ConverterOptions) -> Self {
		Self {
			templates: TemplateResolver::new(options.template_dirs),
		}
	}

	pub fn with_resolver(templates: TemplateResolver) -> Self {
		Self { templates }
	}

	pub fn templates(&self) -> &TemplateResolver {
		&self.templates
	}

	/// Convert `node`, which belongs to the tree rooted at `document`.
	///
	/// `transform` is a render mode hint; only [`EMBEDDED`] has a meaning and
	/// only for document nodes.
	pub fn convert(
		&self,
		node: &Node,
		document: &DocumentNode,
		transform: Option<&str>,
	) -> HtmlbookResult<String> {
		let name = template_name(node, transform);
		tracing::trace!(template = %name, kind = %node.kind(), "converting node");

		let template = self.templates.resolve(&name)?;
		let model = project(node, document);
		render(&template, &model)
	}

	/// Convert the root of a tree.
	pub fn convert_document(
		&self,
		document: &DocumentNode,
		transform: Option<&str>,
	) -> HtmlbookResult<String> {
		let name = if transform == Some(EMBEDDED) {
			EMBEDDED
		} else {
			"document"
		};
		tracing::trace!(template = name, "converting document");

		let template = self.templates.resolve(name)?;
		let model = Model::Document(project_document(document));
		render(&template, &model)
	}
}

impl Default for Converter {
	fn default() -> Self {
		Self::new(ConverterOptions::default())
	}
}

/// The logical template name used for `node`.
pub fn template_name<'a>(node: &'a Node, transform: Option<&str>) -> Cow<'a, str> {
	match node {
		Node::Document(_) if transform == Some(EMBEDDED) => Cow::Borrowed(EMBEDDED),
		_ => node.node_name(),
	}
}
