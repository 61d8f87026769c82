//! Presentation models handed to templates.
//!
//! Every model borrows from the tree it was projected from, so projecting is
//! cheap and never mutates a node. Optional fields are always serialized,
//! as `null` when absent, so templates can test for them uniformly.

use std::borrow::Cow;

use serde::Serialize;

use crate::outline::OutlineSettings;
use crate::outline::outline;
use crate::tree::Attributes;
use crate::tree::BlockFields;
use crate::tree::BlockNode;
use crate::tree::Cell;
use crate::tree::Column;
use crate::tree::DescriptionEntry;
use crate::tree::DocumentNode;
use crate::tree::InlineNode;
use crate::tree::ListItem;
use crate::tree::ListItems;
use crate::tree::ListNode;
use crate::tree::Node;
use crate::tree::NodeKind;
use crate::tree::References;
use crate::tree::Row;
use crate::tree::SectionNode;
use crate::tree::TableNode;

/// The document-wide state visible to every template.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DocumentSnapshot<'a> {
	pub references: &'a References,
	pub attributes: &'a Attributes,
}

impl<'a> DocumentSnapshot<'a> {
	pub fn of(document: &'a DocumentNode) -> Self {
		Self {
			references: &document.references,
			attributes: document.attributes(),
		}
	}
}

/// Fields shared by every projected node.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NodeModel<'a> {
	pub context: &'a str,
	pub node_name: Cow<'a, str>,
	pub id: Option<&'a str>,
	pub attributes: &'a Attributes,
	pub document: DocumentSnapshot<'a>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BlockLikeModel<'a> {
	#[serde(flatten)]
	pub node: NodeModel<'a>,
	pub level: u32,
	pub title: Option<&'a str>,
	pub caption: Option<&'a str>,
	pub captioned_title: Option<String>,
	pub style: Option<&'a str>,
	pub content: Cow<'a, str>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HeaderModel<'a> {
	pub title: Option<&'a str>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DocumentModel<'a> {
	#[serde(flatten)]
	pub block: BlockLikeModel<'a>,
	pub header: HeaderModel<'a>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SectionModel<'a> {
	#[serde(flatten)]
	pub block: BlockLikeModel<'a>,
	pub index: usize,
	pub number: usize,
	pub sectname: &'a str,
	pub special: bool,
	pub numbered: bool,
	pub sectnum: Cow<'a, str>,
	/// Whether the heading carries `sectnum`, following the same
	/// `sectnumlevels` rule as the outline.
	pub show_number: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BlockModel<'a> {
	#[serde(flatten)]
	pub block: BlockLikeModel<'a>,
	pub blockname: &'a str,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ListItemModel<'a> {
	#[serde(flatten)]
	pub block: BlockLikeModel<'a>,
	pub text: Option<&'a str>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DescriptionEntryModel<'a> {
	pub terms: Vec<ListItemModel<'a>>,
	pub description: Option<ListItemModel<'a>>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ListItemsModel<'a> {
	Description(Vec<DescriptionEntryModel<'a>>),
	Items(Vec<ListItemModel<'a>>),
}

impl ListItemsModel<'_> {
	pub fn len(&self) -> usize {
		match self {
			Self::Description(entries) => entries.len(),
			Self::Items(items) => items.len(),
		}
	}

	pub fn is_empty(&self) -> bool {
		self.len() == 0
	}
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ListModel<'a> {
	#[serde(flatten)]
	pub block: BlockLikeModel<'a>,
	pub items: ListItemsModel<'a>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CellModel<'a> {
	#[serde(flatten)]
	pub node: NodeModel<'a>,
	pub text: Option<&'a str>,
	pub content: &'a str,
	pub style: Option<&'a str>,
	pub colspan: u32,
	pub rowspan: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RowsModel<'a> {
	pub head: Vec<Vec<CellModel<'a>>>,
	pub body: Vec<Vec<CellModel<'a>>>,
	pub foot: Vec<Vec<CellModel<'a>>>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TableModel<'a> {
	#[serde(flatten)]
	pub block: BlockLikeModel<'a>,
	pub columns: &'a [Column],
	pub rows: RowsModel<'a>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InlineModel<'a> {
	#[serde(flatten)]
	pub node: NodeModel<'a>,
	pub text: Option<&'a str>,
	#[serde(rename = "type")]
	pub r#type: Option<&'a str>,
	pub target: Option<&'a str>,
}

/// A projected node, one variant per [`NodeKind`].
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Model<'a> {
	Document(DocumentModel<'a>),
	Section(SectionModel<'a>),
	Block(BlockModel<'a>),
	List(ListModel<'a>),
	Table(TableModel<'a>),
	Inline(InlineModel<'a>),
}

impl Model<'_> {
	pub fn kind(&self) -> NodeKind {
		match self {
			Self::Document(_) => NodeKind::Document,
			Self::Section(_) => NodeKind::Section,
			Self::Block(_) => NodeKind::Block,
			Self::List(_) => NodeKind::List,
			Self::Table(_) => NodeKind::Table,
			Self::Inline(_) => NodeKind::Inline,
		}
	}
}

/// Project `node` into its presentation model.
///
/// `document` is the root of the tree `node` belongs to. A document node is
/// always projected against itself.
pub fn project<'a>(node: &'a Node, document: &'a DocumentNode) -> Model<'a> {
	tracing::trace!(kind = %node.kind(), context = node.context(), "projecting node");

	match node {
		Node::Document(root) => Model::Document(project_document(root)),
		Node::Section(section) => Model::Section(project_section(section, document)),
		Node::Block(block) => Model::Block(project_block(block, document)),
		Node::List(list) => Model::List(project_list(list, document)),
		Node::Table(table) => Model::Table(project_table(table, document)),
		Node::Inline(inline) => Model::Inline(project_inline(inline, document)),
	}
}

fn node_model<'a>(
	context: &'a str,
	node_name: Cow<'a, str>,
	id: Option<&'a str>,
	attributes: &'a Attributes,
	document: &'a DocumentNode,
) -> NodeModel<'a> {
	NodeModel {
		context,
		node_name,
		id,
		attributes,
		document: DocumentSnapshot::of(document),
	}
}

fn block_like<'a>(
	fields: &'a BlockFields,
	context: &'a str,
	document: &'a DocumentNode,
) -> BlockLikeModel<'a> {
	BlockLikeModel {
		node: node_model(
			context,
			Cow::Borrowed(context),
			fields.id.as_deref(),
			&fields.attributes,
			document,
		),
		level: fields.level,
		title: fields.title.as_deref(),
		caption: fields.caption.as_deref(),
		captioned_title: fields.captioned_title(),
		style: fields.style.as_deref(),
		content: Cow::Borrowed(&fields.content),
	}
}

pub fn project_document(document: &DocumentNode) -> DocumentModel<'_> {
	DocumentModel {
		block: block_like(&document.block, "document", document),
		header: HeaderModel {
			title: document
				.header
				.as_ref()
				.and_then(|header| header.title.as_deref()),
		},
	}
}

pub fn project_section<'a>(section: &'a SectionNode, document: &'a DocumentNode) -> SectionModel<'a> {
	SectionModel {
		block: block_like(&section.block, "section", document),
		index: section.index,
		number: section.number,
		sectname: section.sectname(),
		special: section.special,
		numbered: section.numbered,
		sectnum: section.sectnum(),
		show_number: OutlineSettings::from_attributes(document.attributes())
			.shows_number(section),
	}
}

/// Table of contents blocks get the document outline as their content, every
/// other block is passed through.
pub fn project_block<'a>(block: &'a BlockNode, document: &'a DocumentNode) -> BlockModel<'a> {
	let mut model = BlockModel {
		block: block_like(&block.block, &block.context, document),
		blockname: block.blockname(),
	};

	if block.is_toc() {
		let settings = OutlineSettings::from_attributes(document.attributes());
		model.block.content = Cow::Owned(outline(document, settings));
	}

	model
}

pub fn project_list<'a>(list: &'a ListNode, document: &'a DocumentNode) -> ListModel<'a> {
	let items = match &list.items {
		ListItems::Description(entries) => {
			ListItemsModel::Description(
				entries
					.iter()
					.map(|entry| project_description_entry(entry, document))
					.collect(),
			)
		}
		ListItems::Items(items) => {
			ListItemsModel::Items(
				items
					.iter()
					.map(|item| project_list_item(item, document))
					.collect(),
			)
		}
	};

	ListModel {
		block: block_like(&list.block, &list.context, document),
		items,
	}
}

fn project_description_entry<'a>(
	entry: &'a DescriptionEntry,
	document: &'a DocumentNode,
) -> DescriptionEntryModel<'a> {
	DescriptionEntryModel {
		terms: entry
			.terms
			.iter()
			.map(|term| project_list_item(term, document))
			.collect(),
		description: entry
			.description
			.as_ref()
			.map(|description| project_list_item(description, document)),
	}
}

pub fn project_list_item<'a>(item: &'a ListItem, document: &'a DocumentNode) -> ListItemModel<'a> {
	ListItemModel {
		block: block_like(&item.block, "list_item", document),
		text: item.text.as_deref(),
	}
}

pub fn project_table<'a>(table: &'a TableNode, document: &'a DocumentNode) -> TableModel<'a> {
	let rows = |group: &'a [Row]| -> Vec<Vec<CellModel<'a>>> {
		group
			.iter()
			.map(|row| row.iter().map(|cell| project_cell(cell, document)).collect())
			.collect()
	};

	TableModel {
		block: block_like(&table.block, "table", document),
		columns: &table.columns,
		rows: RowsModel {
			head: rows(&table.rows.head),
			body: rows(&table.rows.body),
			foot: rows(&table.rows.foot),
		},
	}
}

pub fn project_cell<'a>(cell: &'a Cell, document: &'a DocumentNode) -> CellModel<'a> {
	CellModel {
		node: node_model(
			"table_cell",
			Cow::Borrowed("table_cell"),
			cell.id.as_deref(),
			&cell.attributes,
			document,
		),
		text: cell.text.as_deref(),
		content: &cell.content,
		style: cell.style.as_deref(),
		colspan: cell.colspan.get(),
		rowspan: cell.rowspan.get(),
	}
}

pub fn project_inline<'a>(inline: &'a InlineNode, document: &'a DocumentNode) -> InlineModel<'a> {
	InlineModel {
		node: node_model(
			&inline.context,
			Cow::Owned(format!("inline_{}", inline.context)),
			inline.id.as_deref(),
			&inline.attributes,
			document,
		),
		text: inline.text.as_deref(),
		r#type: inline.r#type.as_deref(),
		target: inline.target.as_deref(),
	}
}
