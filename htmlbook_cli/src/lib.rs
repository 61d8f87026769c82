use std::path::PathBuf;

use clap::Parser;
use clap::Subcommand;

#[derive(Parser)]
#[command(
	author,
	version,
	about = "Render structured document trees to HTMLBook markup.",
	long_about = "htmlbook converts a document tree, produced by a markup parser and encoded as \
	              JSON, into HTMLBook markup.\n\nEvery node is rendered through a template named \
	              after the node (`section.html`, `paragraph.html`, ...). Template directories \
	              passed with `--template-dir` or listed in `htmlbook.toml` are searched before \
	              the built-in templates.\n\nQuick start:\n  htmlbook render book.json    \
	              Render a full page\n  htmlbook render --embedded book.json    Render without \
	              the page wrapper\n  htmlbook outline book.json    Print the table of contents"
)]
pub struct HtmlbookCli {
	#[command(subcommand)]
	pub command: Option<Commands>,

	/// Path to the project root directory, where `htmlbook.toml` is looked
	/// up.
	#[arg(long, short, global = true)]
	pub path: Option<PathBuf>,

	/// Additional template directory. May be repeated; earlier directories
	/// take precedence over later ones and over the configured paths.
	#[arg(long = "template-dir", short = 't', global = true)]
	pub template_dirs: Vec<PathBuf>,

	/// Enable verbose output.
	#[arg(long, short, global = true, default_value_t = false)]
	pub verbose: bool,

	/// Disable colored output.
	#[arg(long, global = true, default_value_t = false)]
	pub no_color: bool,
}

#[derive(Subcommand)]
pub enum Commands {
	/// Render a document tree.
	///
	/// Reads a JSON encoded document tree, applies the attribute defaults
	/// from `htmlbook.toml` and renders the root document through the
	/// `document` template, or the `embedded` template with `--embedded`.
	Render {
		/// JSON file holding the document tree.
		input: PathBuf,

		/// Render without the outer page wrapper.
		#[arg(long, default_value_t = false)]
		embedded: bool,

		/// Write the output to this file instead of stdout.
		#[arg(long, short)]
		output: Option<PathBuf>,
	},
	/// Print the table of contents of a document tree.
	///
	/// The outline honours the `toclevels` and `sectnumlevels` document
	/// attributes.
	Outline {
		/// JSON file holding the document tree.
		input: PathBuf,
	},
}
