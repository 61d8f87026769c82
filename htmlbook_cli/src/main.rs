use std::path::Path;
use std::path::PathBuf;
use std::process;

use clap::Parser;
use htmlbook_cli::Commands;
use htmlbook_cli::HtmlbookCli;
use htmlbook_core::Converter;
use htmlbook_core::ConverterOptions;
use htmlbook_core::EMBEDDED;
use htmlbook_core::HtmlbookError;
use htmlbook_core::HtmlbookResult;
use htmlbook_core::config::HtmlbookConfig;
use htmlbook_core::outline::OutlineSettings;
use htmlbook_core::outline::outline;
use htmlbook_core::tree::DocumentNode;
use htmlbook_core::tree::parse_document;
use owo_colors::OwoColorize;
use tracing_subscriber::EnvFilter;

fn main() {
	let args = HtmlbookCli::parse();

	// Respect NO_COLOR env var and --no-color flag.
	let use_color = !args.no_color && std::env::var_os("NO_COLOR").is_none();

	init_tracing(args.verbose, use_color);

	// Install miette's fancy handler for rich error diagnostics.
	miette::set_hook(Box::new(move |_| {
		Box::new(
			miette::MietteHandlerOpts::new()
				.color(use_color)
				.unicode(use_color)
				.build(),
		)
	}))
	.ok();

	let result = match &args.command {
		Some(Commands::Render {
			input,
			embedded,
			output,
		}) => run_render(&args, input, *embedded, output.as_deref()),
		Some(Commands::Outline { input }) => run_outline(&args, input),
		None => {
			eprintln!("No subcommand specified. Run `htmlbook --help` for usage.");
			process::exit(1);
		}
	};

	if let Err(e) = result {
		let report: miette::Report = e.into();
		if use_color {
			eprintln!("{} {report:?}", "error:".red());
		} else {
			eprintln!("error: {report:?}");
		}
		process::exit(2);
	}
}

fn init_tracing(verbose: bool, use_color: bool) {
	let default_directive = if verbose { "debug" } else { "warn" };
	let filter =
		EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directive));

	tracing_subscriber::fmt()
		.with_env_filter(filter)
		.with_ansi(use_color)
		.with_writer(std::io::stderr)
		.without_time()
		.init();
}

fn resolve_root(args: &HtmlbookCli) -> PathBuf {
	args.path
		.clone()
		.unwrap_or_else(|| std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")))
}

/// Load the config and the input tree, with config attribute defaults
/// applied to the document.
fn load(args: &HtmlbookCli, input: &Path) -> HtmlbookResult<(ConverterOptions, DocumentNode)> {
	let root = resolve_root(args);
	let config = HtmlbookConfig::load(&root)?;

	let mut options = ConverterOptions::from_config(config.as_ref(), &root);
	let mut template_dirs = args.template_dirs.clone();
	template_dirs.append(&mut options.template_dirs);
	options.template_dirs = template_dirs;

	let json = std::fs::read_to_string(input)?;
	let mut document = parse_document(&json)?;
	if let Some(config) = &config {
		document.block.attributes.merge_defaults(&config.attributes);
	}

	tracing::debug!(
		input = %input.display(),
		template_dirs = ?options.template_dirs,
		"loaded document tree"
	);

	Ok((options, document))
}

fn run_render(
	args: &HtmlbookCli,
	input: &Path,
	embedded: bool,
	output: Option<&Path>,
) -> Result<(), HtmlbookError> {
	let (options, document) = load(args, input)?;
	let converter = Converter::new(options);
	let transform = embedded.then_some(EMBEDDED);
	let html = converter.convert_document(&document, transform)?;

	match output {
		Some(path) => {
			std::fs::write(path, html)?;
			tracing::info!(output = %path.display(), "wrote output");
		}
		None => print!("{html}"),
	}

	Ok(())
}

fn run_outline(args: &HtmlbookCli, input: &Path) -> Result<(), HtmlbookError> {
	let (_, document) = load(args, input)?;
	let settings = OutlineSettings::from_attributes(document.attributes());
	println!("{}", outline(&document, settings));

	Ok(())
}
