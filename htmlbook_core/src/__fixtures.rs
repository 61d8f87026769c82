use std::num::NonZeroU32;

use tempfile::TempDir;

use crate::AnyResult;
use crate::tree::Attributes;
use crate::tree::BlockFields;
use crate::tree::BlockNode;
use crate::tree::Cell;
use crate::tree::DescriptionEntry;
use crate::tree::DocumentNode;
use crate::tree::Header;
use crate::tree::InlineNode;
use crate::tree::ListItem;
use crate::tree::ListItems;
use crate::tree::ListNode;
use crate::tree::Node;
use crate::tree::References;
use crate::tree::Row;
use crate::tree::SectionNode;
use crate::tree::TableNode;
use crate::tree::TableRows;

pub fn fields(id: Option<&str>, title: Option<&str>, level: u32) -> BlockFields {
	BlockFields {
		id: id.map(ToString::to_string),
		title: title.map(ToString::to_string),
		level,
		..BlockFields::default()
	}
}

/// A numbered section whose display number is `sectnum`.
pub fn section(id: &str, title: &str, level: u32, sectnum: &str, blocks: Vec<Node>) -> SectionNode {
	SectionNode {
		block: fields(Some(id), Some(title), level),
		numbered: true,
		sectnum: Some(sectnum.to_string()),
		blocks,
		..SectionNode::default()
	}
}

pub fn document(attributes: Attributes, blocks: Vec<Node>) -> DocumentNode {
	DocumentNode {
		block: BlockFields {
			attributes,
			..BlockFields::default()
		},
		blocks,
		..DocumentNode::default()
	}
}

pub fn titled_document(title: &str, blocks: Vec<Node>) -> DocumentNode {
	DocumentNode {
		header: Some(Header {
			title: Some(title.to_string()),
		}),
		references: References {
			ids: [("intro".to_string(), "Introduction".to_string())]
				.into_iter()
				.collect(),
		},
		..document(Attributes::new(), blocks)
	}
}

pub fn block(context: &str, content: &str) -> BlockNode {
	BlockNode {
		block: BlockFields {
			content: content.to_string(),
			..BlockFields::default()
		},
		context: context.to_string(),
	}
}

pub fn item(text: &str) -> ListItem {
	ListItem {
		text: Some(text.to_string()),
		..ListItem::default()
	}
}

pub fn description_list(pairs: Vec<(Vec<&str>, &str)>) -> ListNode {
	ListNode {
		context: "dlist".to_string(),
		items: ListItems::Description(
			pairs
				.into_iter()
				.map(|(terms, description)| {
					DescriptionEntry {
						terms: terms.into_iter().map(item).collect(),
						description: Some(item(description)),
					}
				})
				.collect(),
		),
		..ListNode::default()
	}
}

pub fn cell(text: &str) -> Cell {
	Cell {
		text: Some(text.to_string()),
		..Cell::default()
	}
}

pub fn rows(count: usize, width: usize) -> Vec<Row> {
	(0..count)
		.map(|row| (0..width).map(|col| cell(&format!("r{row}c{col}"))).collect())
		.collect()
}

pub fn table(head: usize, body: usize, foot: usize) -> TableNode {
	TableNode {
		rows: TableRows {
			head: rows(head, 2),
			body: rows(body, 2),
			foot: rows(foot, 2),
		},
		..TableNode::default()
	}
}

pub fn spanning_cell(text: &str, colspan: u32, rowspan: u32) -> Cell {
	Cell {
		colspan: NonZeroU32::new(colspan).unwrap_or(NonZeroU32::MIN),
		rowspan: NonZeroU32::new(rowspan).unwrap_or(NonZeroU32::MIN),
		..cell(text)
	}
}

pub fn inline(context: &str, id: Option<&str>, text: Option<&str>) -> InlineNode {
	InlineNode {
		id: id.map(ToString::to_string),
		context: context.to_string(),
		text: text.map(ToString::to_string),
		..InlineNode::default()
	}
}

/// Write `(name, source)` pairs as `<name>.html` files into a fresh
/// directory.
pub fn template_dir(templates: &[(&str, &str)]) -> AnyResult<TempDir> {
	let tmp = tempfile::tempdir()?;
	for (name, source) in templates {
		std::fs::write(tmp.path().join(format!("{name}.html")), source)?;
	}

	Ok(tmp)
}

/// A book with a preface, two numbered chapters and nested subsections.
pub fn sample_book() -> DocumentNode {
	let preface = SectionNode {
		block: fields(Some("preface"), Some("Preface"), 1),
		sectname: Some("preface".to_string()),
		special: true,
		..SectionNode::default()
	};
	let chapter_one = section(
		"intro",
		"Introduction",
		1,
		"1",
		vec![
			block("paragraph", "<p>Welcome.</p>").into(),
			section("goals", "Goals", 2, "1.1", vec![
				section("scope", "Scope", 3, "1.1.1", vec![]).into(),
			])
			.into(),
		],
	);
	let chapter_two = section("usage", "Usage", 1, "2", vec![]);

	titled_document("Sample Book", vec![
		block("toc", "").into(),
		preface.into(),
		chapter_one.into(),
		chapter_two.into(),
	])
}
