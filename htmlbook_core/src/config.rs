use std::path::Path;
use std::path::PathBuf;

use serde::Deserialize;

use crate::HtmlbookError;
use crate::HtmlbookResult;
use crate::tree::Attributes;

/// Supported config file locations in discovery order (highest precedence
/// first).
pub const CONFIG_FILE_CANDIDATES: [&str; 3] = [
	"htmlbook.toml",
	".htmlbook.toml",
	".config/htmlbook.toml",
];

/// Configuration loaded from an `htmlbook.toml` file.
///
/// ```toml
/// [templates]
/// paths = ["templates", "shared/templates"]
///
/// [attributes]
/// toclevels = 3
/// sectnumlevels = 2
/// ```
#[derive(Debug, Default, Deserialize)]
pub struct HtmlbookConfig {
	/// Template directories searched before the built-in templates.
	#[serde(default)]
	pub templates: TemplatesConfig,
	/// Document attribute defaults. Attributes set by the document itself
	/// take precedence.
	#[serde(default)]
	pub attributes: Attributes,
}

/// Configuration for additional template search paths.
#[derive(Debug, Default, Deserialize)]
pub struct TemplatesConfig {
	/// Directories to search for `<name>.html` templates, in priority order.
	/// These are relative to the project root.
	#[serde(default)]
	pub paths: Vec<PathBuf>,
}

impl HtmlbookConfig {
	/// Resolve the config path from known discovery candidates.
	#[must_use]
	pub fn resolve_path(root: &Path) -> Option<PathBuf> {
		CONFIG_FILE_CANDIDATES
			.iter()
			.map(|candidate| root.join(candidate))
			.find(|path| path.is_file())
	}

	/// Load the config from the first discovered config file at `root`.
	/// Returns `None` if no config file exists.
	pub fn load(root: &Path) -> HtmlbookResult<Option<HtmlbookConfig>> {
		let Some(config_path) = Self::resolve_path(root) else {
			return Ok(None);
		};

		tracing::debug!(path = %config_path.display(), "loading config");
		let content = std::fs::read_to_string(&config_path)?;

		Self::parse(&content).map(Some)
	}

	pub fn parse(content: &str) -> HtmlbookResult<HtmlbookConfig> {
		toml::from_str(content).map_err(|e| HtmlbookError::ConfigParse(e.to_string()))
	}
}
