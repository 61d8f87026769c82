use std::path::PathBuf;

use miette::Diagnostic;
use thiserror::Error;

#[derive(Debug, Diagnostic, Error)]
#[non_exhaustive]
pub enum HtmlbookError {
	#[error(transparent)]
	#[diagnostic(code(htmlbook::io_error))]
	Io(#[from] std::io::Error),

	#[error("unrecognized node kind: `{0}`")]
	#[diagnostic(
		code(htmlbook::unknown_node_kind),
		help("supported node kinds: document, section, block, list, table, inline")
	)]
	UnknownNodeKind(String),

	#[error("template not found: `{name}`")]
	#[diagnostic(
		code(htmlbook::template_not_found),
		help("add `{name}.html` to a template directory passed to the converter")
	)]
	TemplateNotFound { name: String, searched: Vec<PathBuf> },

	#[error("failed to parse template `{name}` from `{}`", .path.display())]
	#[diagnostic(code(htmlbook::template_syntax))]
	TemplateSyntax {
		name: String,
		path: PathBuf,
		#[source]
		source: minijinja::Error,
	},

	#[error(transparent)]
	#[diagnostic(code(htmlbook::template_render))]
	Render(#[from] minijinja::Error),

	#[error(transparent)]
	#[diagnostic(
		code(htmlbook::tree_parse),
		help("every node object needs a `kind` field and the fields of that kind")
	)]
	TreeParse(#[from] serde_json::Error),

	#[error("expected a document at the root of the tree, found `{0}`")]
	#[diagnostic(code(htmlbook::expected_document))]
	ExpectedDocument(String),

	#[error("failed to parse config file: {0}")]
	#[diagnostic(
		code(htmlbook::config_parse),
		help("check that htmlbook.toml is valid TOML with [templates] and/or [attributes] sections")
	)]
	ConfigParse(String),
}

pub type HtmlbookResult<T> = Result<T, HtmlbookError>;
pub type AnyError = Box<dyn std::error::Error>;
pub type AnyEmptyResult = Result<(), AnyError>;
pub type AnyResult<T> = Result<T, AnyError>;
