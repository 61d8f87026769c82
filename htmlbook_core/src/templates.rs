use std::collections::HashMap;
use std::fmt;
use std::path::Path;
use std::path::PathBuf;
use std::sync::Arc;

use minijinja::AutoEscape;
use minijinja::Environment;
use minijinja::UndefinedBehavior;
use parking_lot::RwLock;

use crate::HtmlbookError;
use crate::HtmlbookResult;

/// Directory holding the built-in HTMLBook templates. It is always searched
/// last.
pub const DEFAULT_TEMPLATE_DIR: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/templates");

/// File extension of template files. A logical name `section` resolves to
/// `section.html`.
pub const TEMPLATE_EXTENSION: &str = "html";

/// A parsed template ready to be rendered.
pub struct LoadedTemplate {
	name: String,
	path: PathBuf,
	env: Environment<'static>,
}

impl LoadedTemplate {
	/// Parse `source` as the template `name`. Markup is never auto-escaped
	/// because node content arrives already rendered, and `none` values
	/// print as an empty string.
	pub fn parse(name: &str, path: PathBuf, source: String) -> HtmlbookResult<Self> {
		let mut env = Environment::new();
		env.set_keep_trailing_newline(true);
		env.set_undefined_behavior(UndefinedBehavior::Chainable);
		env.set_auto_escape_callback(|_| AutoEscape::None);
		env.set_formatter(|out, state, value| {
			if value.is_none() {
				return Ok(());
			}
			minijinja::escape_formatter(out, state, value)
		});

		if let Err(source) = env.add_template_owned(name.to_string(), source) {
			return Err(HtmlbookError::TemplateSyntax {
				name: name.to_string(),
				path,
				source,
			});
		}

		Ok(Self {
			name: name.to_string(),
			path,
			env,
		})
	}

	/// The logical name this template was resolved for.
	pub fn name(&self) -> &str {
		&self.name
	}

	/// The file the template was read from.
	pub fn path(&self) -> &Path {
		&self.path
	}

	pub(crate) fn template(&self) -> HtmlbookResult<minijinja::Template<'_, '_>> {
		Ok(self.env.get_template(&self.name)?)
	}
}

impl fmt::Debug for LoadedTemplate {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("LoadedTemplate")
			.field("name", &self.name)
			.field("path", &self.path)
			.finish_non_exhaustive()
	}
}

/// Resolves logical template names against an ordered list of directories
/// and memoizes the parsed result.
///
/// The first directory containing `<name>.html` wins. Each name is parsed at
/// most once for the lifetime of the resolver, also when several threads ask
/// for it at the same time. A resolved template is never reloaded, even if
/// the file changes on disk.
#[derive(Debug)]
pub struct TemplateResolver {
	search_paths: Vec<PathBuf>,
	cache: RwLock<HashMap<String, Arc<LoadedTemplate>>>,
}

impl TemplateResolver {
	/// Search `template_dirs` in order, then the built-in templates.
	pub fn new<I, P>(template_dirs: I) -> Self
	where
		I: IntoIterator<Item = P>,
		P: Into<PathBuf>,
	{
		let mut search_paths: Vec<PathBuf> = template_dirs.into_iter().map(Into::into).collect();
		search_paths.push(PathBuf::from(DEFAULT_TEMPLATE_DIR));
		Self::with_search_paths(search_paths)
	}

	/// Search exactly `search_paths`, without the built-in templates.
	pub fn with_search_paths(search_paths: Vec<PathBuf>) -> Self {
		Self {
			search_paths,
			cache: RwLock::new(HashMap::new()),
		}
	}

	pub fn search_paths(&self) -> &[PathBuf] {
		&self.search_paths
	}

	/// Resolve `name` to a parsed template.
	pub fn resolve(&self, name: &str) -> HtmlbookResult<Arc<LoadedTemplate>> {
		if let Some(template) = self.cache.read().get(name) {
			tracing::trace!(name, "template cache hit");
			return Ok(Arc::clone(template));
		}

		let mut cache = self.cache.write();
		// Another thread may have loaded it while we waited for the lock.
		if let Some(template) = cache.get(name) {
			return Ok(Arc::clone(template));
		}

		let template = Arc::new(self.load(name)?);
		cache.insert(name.to_string(), Arc::clone(&template));

		Ok(template)
	}

	/// Whether `name` has already been resolved.
	pub fn is_cached(&self, name: &str) -> bool {
		self.cache.read().contains_key(name)
	}

	/// Names resolved so far, sorted.
	pub fn cached_names(&self) -> Vec<String> {
		let mut names: Vec<String> = self.cache.read().keys().cloned().collect();
		names.sort();
		names
	}

	/// Find the file for `name` in the search path.
	pub fn find(&self, name: &str) -> Option<PathBuf> {
		if !is_valid_name(name) {
			return None;
		}

		let file_name = format!("{name}.{TEMPLATE_EXTENSION}");
		self.search_paths
			.iter()
			.map(|dir| dir.join(&file_name))
			.find(|path| path.is_file())
	}

	fn load(&self, name: &str) -> HtmlbookResult<LoadedTemplate> {
		let Some(path) = self.find(name) else {
			return Err(HtmlbookError::TemplateNotFound {
				name: name.to_string(),
				searched: self.search_paths.clone(),
			});
		};

		let source = std::fs::read_to_string(&path)?;
		let template = LoadedTemplate::parse(name, path, source)?;
		tracing::debug!(name, path = %template.path().display(), "parsed template");

		Ok(template)
	}
}

/// Names map straight to file names, so anything that could leave the
/// template directory is rejected.
fn is_valid_name(name: &str) -> bool {
	!name.is_empty()
		&& name
			.chars()
			.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
}
