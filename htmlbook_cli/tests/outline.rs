mod common;

use common::BOOK_JSON;
use common::write_input;
use htmlbook_core::AnyEmptyResult;

#[test]
fn outline_prints_nested_sections() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	let input = write_input(tmp.path(), BOOK_JSON)?;

	let mut cmd = common::htmlbook_cmd();
	let _ = cmd
		.arg("outline")
		.arg(&input)
		.arg("--path")
		.arg(tmp.path())
		.assert()
		.success()
		.stdout(
			"<ol><li><a href=\"#intro\">1 Introduction</a><ol><li><a href=\"#goals\">1.1 \
			 Goals</a></li></ol></li><li><a href=\"#usage\">2 Usage</a></li></ol>\n",
		);

	Ok(())
}

#[test]
fn outline_honours_configured_toclevels() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	let input = write_input(
		tmp.path(),
		&BOOK_JSON.replace("\"attributes\": {\"toclevels\": 3},", ""),
	)?;
	std::fs::write(
		tmp.path().join("htmlbook.toml"),
		"[attributes]\ntoclevels = 1\n",
	)?;

	let mut cmd = common::htmlbook_cmd();
	let _ = cmd
		.arg("outline")
		.arg(&input)
		.arg("--path")
		.arg(tmp.path())
		.assert()
		.success()
		.stdout(
			"<ol><li><a href=\"#intro\">1 Introduction</a></li><li><a href=\"#usage\">2 \
			 Usage</a></li></ol>\n",
		);

	Ok(())
}

#[test]
fn outline_of_a_document_without_sections_is_empty() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	let input = write_input(
		tmp.path(),
		r#"{"kind": "document", "blocks": [{"kind": "block", "context": "paragraph"}]}"#,
	)?;

	let mut cmd = common::htmlbook_cmd();
	let _ = cmd
		.arg("outline")
		.arg(&input)
		.arg("--path")
		.arg(tmp.path())
		.assert()
		.success()
		.stdout("\n");

	Ok(())
}
