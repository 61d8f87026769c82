use std::path::Path;
use std::path::PathBuf;

use assert_cmd::Command;
use htmlbook_core::AnyResult;
use insta_cmd::get_cargo_bin;

pub fn htmlbook_cmd() -> Command {
	let mut cmd = Command::new(get_cargo_bin("htmlbook"));
	cmd.env("NO_COLOR", "1");
	cmd
}

/// A small book: a table of contents, a chapter with a subsection and a
/// second chapter.
pub const BOOK_JSON: &str = r#"{
	"kind": "document",
	"attributes": {"toclevels": 3},
	"header": {"title": "Sample Book"},
	"references": {"ids": {"intro": "Introduction"}},
	"content": "<p>Body</p>",
	"blocks": [
		{"kind": "block", "context": "toc"},
		{
			"kind": "section",
			"id": "intro",
			"title": "Introduction",
			"level": 1,
			"numbered": true,
			"sectnum": "1",
			"blocks": [
				{"kind": "section", "id": "goals", "title": "Goals", "level": 2, "numbered": true, "sectnum": "1.1"}
			]
		},
		{"kind": "section", "id": "usage", "title": "Usage", "level": 1, "numbered": true, "sectnum": "2"}
	]
}"#;

pub fn write_input(dir: &Path, json: &str) -> AnyResult<PathBuf> {
	let path = dir.join("book.json");
	std::fs::write(&path, json)?;
	Ok(path)
}
