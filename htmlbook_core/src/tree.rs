//! The document tree consumed by the converter.
//!
//! Trees are produced by an upstream parser and are read-only from the point
//! of view of this crate. Rust callers build them directly from the public
//! structs; other producers hand them over as JSON (see [`parse_tree`]),
//! where every node object is tagged with a `kind` field.

use std::borrow::Cow;
use std::collections::BTreeMap;
use std::fmt;
use std::num::NonZeroU32;
use std::str::FromStr;

use derive_more::Deref;
use derive_more::DerefMut;
use serde::Deserialize;
use serde::Serialize;

use crate::HtmlbookError;
use crate::HtmlbookResult;

/// The closed set of node kinds a tree may contain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
	Document,
	Section,
	Block,
	List,
	Table,
	Inline,
}

impl NodeKind {
	pub const ALL: [NodeKind; 6] = [
		Self::Document,
		Self::Section,
		Self::Block,
		Self::List,
		Self::Table,
		Self::Inline,
	];

	pub fn as_str(self) -> &'static str {
		match self {
			Self::Document => "document",
			Self::Section => "section",
			Self::Block => "block",
			Self::List => "list",
			Self::Table => "table",
			Self::Inline => "inline",
		}
	}
}

impl fmt::Display for NodeKind {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

impl FromStr for NodeKind {
	type Err = HtmlbookError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		Self::ALL
			.into_iter()
			.find(|kind| kind.as_str() == s)
			.ok_or_else(|| HtmlbookError::UnknownNodeKind(s.to_string()))
	}
}

/// A single attribute value. Attributes coming from markup are mostly
/// strings, but parsers are free to hand over typed values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AttributeValue {
	Bool(bool),
	Integer(i64),
	Float(f64),
	String(String),
}

impl AttributeValue {
	/// Read the value as a non-negative integer. Integer-valued strings such
	/// as `"3"` are accepted.
	pub fn as_u32(&self) -> Option<u32> {
		match self {
			Self::Integer(n) => u32::try_from(*n).ok(),
			Self::String(s) => s.trim().parse().ok(),
			Self::Bool(_) | Self::Float(_) => None,
		}
	}
}

impl From<&str> for AttributeValue {
	fn from(value: &str) -> Self {
		Self::String(value.to_string())
	}
}

impl From<String> for AttributeValue {
	fn from(value: String) -> Self {
		Self::String(value)
	}
}

impl From<bool> for AttributeValue {
	fn from(value: bool) -> Self {
		Self::Bool(value)
	}
}

impl From<i64> for AttributeValue {
	fn from(value: i64) -> Self {
		Self::Integer(value)
	}
}

impl From<f64> for AttributeValue {
	fn from(value: f64) -> Self {
		Self::Float(value)
	}
}

/// Ordered attribute mapping. Ordering keeps projections deterministic.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Deref, DerefMut)]
#[serde(transparent)]
pub struct Attributes(BTreeMap<String, AttributeValue>);

impl Attributes {
	pub fn new() -> Self {
		Self::default()
	}

	/// Read an attribute as a non-negative integer, see
	/// [`AttributeValue::as_u32`].
	pub fn get_u32(&self, name: &str) -> Option<u32> {
		self.0.get(name).and_then(AttributeValue::as_u32)
	}

	/// Add every entry of `defaults` that is not already set.
	pub fn merge_defaults(&mut self, defaults: &Attributes) {
		for (name, value) in defaults.iter() {
			self.0
				.entry(name.clone())
				.or_insert_with(|| value.clone());
		}
	}
}

impl<K: Into<String>, V: Into<AttributeValue>> FromIterator<(K, V)> for Attributes {
	fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
		Self(
			iter.into_iter()
				.map(|(key, value)| (key.into(), value.into()))
				.collect(),
		)
	}
}

/// Document-wide cross reference table.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct References {
	/// Map of anchor id to its reference text.
	#[serde(default)]
	pub ids: BTreeMap<String, String>,
}

/// Fields shared by every block-like node.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct BlockFields {
	pub id: Option<String>,
	pub attributes: Attributes,
	/// Nesting depth, `0` for the document.
	pub level: u32,
	pub title: Option<String>,
	pub caption: Option<String>,
	pub style: Option<String>,
	/// Markup of the already rendered children.
	pub content: String,
}

impl BlockFields {
	/// The title prefixed with its caption (e.g. `"Table 1. "`) when both are
	/// present.
	pub fn captioned_title(&self) -> Option<String> {
		match (&self.caption, &self.title) {
			(Some(caption), Some(title)) => Some(format!("{caption}{title}")),
			(_, title) => title.clone(),
		}
	}
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Header {
	#[serde(default)]
	pub title: Option<String>,
}

/// The root of a tree. It doubles as the shared document context: every
/// projection reads cross references and document attributes from it.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct DocumentNode {
	#[serde(flatten)]
	pub block: BlockFields,
	#[serde(default)]
	pub header: Option<Header>,
	#[serde(default)]
	pub references: References,
	#[serde(default)]
	pub blocks: Vec<Node>,
}

impl DocumentNode {
	/// Document-wide attributes.
	pub fn attributes(&self) -> &Attributes {
		&self.block.attributes
	}
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct SectionNode {
	#[serde(flatten)]
	pub block: BlockFields,
	/// Position among the sibling sections.
	#[serde(default)]
	pub index: usize,
	#[serde(default)]
	pub number: usize,
	#[serde(default)]
	pub sectname: Option<String>,
	/// Set for unnumbered front and back matter such as a preface.
	#[serde(default)]
	pub special: bool,
	#[serde(default)]
	pub numbered: bool,
	/// Display number such as `"1.2"`.
	#[serde(default)]
	pub sectnum: Option<String>,
	#[serde(default)]
	pub blocks: Vec<Node>,
}

impl SectionNode {
	pub fn sectname(&self) -> &str {
		self.sectname.as_deref().unwrap_or("section")
	}

	/// The display number, falling back to `number` when the parser did not
	/// provide one.
	pub fn sectnum(&self) -> Cow<'_, str> {
		match &self.sectnum {
			Some(sectnum) => Cow::Borrowed(sectnum),
			None => Cow::Owned(self.number.to_string()),
		}
	}
}

/// A leaf block such as a paragraph, listing, quote or table of contents.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct BlockNode {
	#[serde(flatten)]
	pub block: BlockFields,
	pub context: String,
}

impl BlockNode {
	pub fn blockname(&self) -> &str {
		&self.context
	}

	pub fn is_toc(&self) -> bool {
		self.blockname() == "toc"
	}
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ListItem {
	#[serde(flatten)]
	pub block: BlockFields,
	#[serde(default)]
	pub text: Option<String>,
}

/// One `terms → description` pair of a description list.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct DescriptionEntry {
	pub terms: Vec<ListItem>,
	#[serde(default)]
	pub description: Option<ListItem>,
}

/// The entries of a list. Only a `dlist` holds description entries.
#[derive(Debug, Clone, PartialEq)]
pub enum ListItems {
	Description(Vec<DescriptionEntry>),
	Items(Vec<ListItem>),
}

impl Default for ListItems {
	fn default() -> Self {
		Self::Items(Vec::new())
	}
}

impl ListItems {
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

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(try_from = "RawList")]
pub struct ListNode {
	pub block: BlockFields,
	/// `ulist`, `olist`, `colist` or `dlist`.
	pub context: String,
	pub items: ListItems,
}

/// Context of a description list.
pub const DESCRIPTION_LIST: &str = "dlist";

/// Wire shape of a list. The shape of `items` depends on `context`.
#[derive(Deserialize)]
struct RawList {
	#[serde(flatten)]
	block: BlockFields,
	context: String,
	#[serde(default)]
	items: Option<serde_json::Value>,
}

impl TryFrom<RawList> for ListNode {
	type Error = serde_json::Error;

	fn try_from(raw: RawList) -> Result<Self, Self::Error> {
		let entries = raw
			.items
			.unwrap_or_else(|| serde_json::Value::Array(Vec::new()));
		let items = if raw.context == DESCRIPTION_LIST {
			ListItems::Description(serde_json::from_value(entries)?)
		} else {
			ListItems::Items(serde_json::from_value(entries)?)
		};

		Ok(Self {
			block: raw.block,
			context: raw.context,
			items,
		})
	}
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Column {
	pub colnumber: usize,
	/// Width as a percentage of the table width.
	pub colpcwidth: Option<f64>,
	pub halign: Option<String>,
	pub valign: Option<String>,
	pub style: Option<String>,
}

fn default_span() -> NonZeroU32 {
	NonZeroU32::MIN
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Cell {
	#[serde(default)]
	pub id: Option<String>,
	#[serde(default)]
	pub attributes: Attributes,
	#[serde(default)]
	pub text: Option<String>,
	#[serde(default)]
	pub content: String,
	#[serde(default)]
	pub style: Option<String>,
	#[serde(default = "default_span")]
	pub colspan: NonZeroU32,
	#[serde(default = "default_span")]
	pub rowspan: NonZeroU32,
}

impl Default for Cell {
	fn default() -> Self {
		Self {
			id: None,
			attributes: Attributes::default(),
			text: None,
			content: String::new(),
			style: None,
			colspan: default_span(),
			rowspan: default_span(),
		}
	}
}

pub type Row = Vec<Cell>;

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct TableRows {
	pub head: Vec<Row>,
	pub body: Vec<Row>,
	pub foot: Vec<Row>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct TableNode {
	#[serde(flatten)]
	pub block: BlockFields,
	#[serde(default)]
	pub columns: Vec<Column>,
	#[serde(default)]
	pub rows: TableRows,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct InlineNode {
	#[serde(default)]
	pub id: Option<String>,
	#[serde(default)]
	pub attributes: Attributes,
	/// `quoted`, `anchor`, `callout`, ...
	pub context: String,
	#[serde(default)]
	pub text: Option<String>,
	/// Sub type, e.g. `emphasis` for quoted text or `xref` for anchors.
	#[serde(default, rename = "type")]
	pub r#type: Option<String>,
	#[serde(default)]
	pub target: Option<String>,
}

/// A node of the document tree.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(try_from = "RawNode")]
pub enum Node {
	Document(Box<DocumentNode>),
	Section(SectionNode),
	Block(BlockNode),
	List(ListNode),
	Table(TableNode),
	Inline(InlineNode),
}

impl Node {
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

	/// The fine grained context, e.g. `paragraph` for a block or `callout`
	/// for an inline node.
	pub fn context(&self) -> &str {
		match self {
			Self::Document(_) => "document",
			Self::Section(_) => "section",
			Self::Table(_) => "table",
			Self::Block(block) => &block.context,
			Self::List(list) => &list.context,
			Self::Inline(inline) => &inline.context,
		}
	}

	/// The name templates are looked up by.
	pub fn node_name(&self) -> Cow<'_, str> {
		match self {
			Self::Inline(inline) => Cow::Owned(format!("inline_{}", inline.context)),
			_ => Cow::Borrowed(self.context()),
		}
	}

	pub fn id(&self) -> Option<&str> {
		match self {
			Self::Document(document) => document.block.id.as_deref(),
			Self::Section(section) => section.block.id.as_deref(),
			Self::Block(block) => block.block.id.as_deref(),
			Self::List(list) => list.block.id.as_deref(),
			Self::Table(table) => table.block.id.as_deref(),
			Self::Inline(inline) => inline.id.as_deref(),
		}
	}

	pub fn as_section(&self) -> Option<&SectionNode> {
		match self {
			Self::Section(section) => Some(section),
			_ => None,
		}
	}
}

impl From<DocumentNode> for Node {
	fn from(value: DocumentNode) -> Self {
		Self::Document(Box::new(value))
	}
}

impl From<SectionNode> for Node {
	fn from(value: SectionNode) -> Self {
		Self::Section(value)
	}
}

impl From<BlockNode> for Node {
	fn from(value: BlockNode) -> Self {
		Self::Block(value)
	}
}

impl From<ListNode> for Node {
	fn from(value: ListNode) -> Self {
		Self::List(value)
	}
}

impl From<TableNode> for Node {
	fn from(value: TableNode) -> Self {
		Self::Table(value)
	}
}

impl From<InlineNode> for Node {
	fn from(value: InlineNode) -> Self {
		Self::Inline(value)
	}
}

/// A container whose child sections make up an outline.
pub trait SectionContainer {
	fn level(&self) -> u32;

	fn child_blocks(&self) -> &[Node];

	/// Child sections in document order.
	fn sections(&self) -> impl Iterator<Item = &SectionNode> {
		self.child_blocks().iter().filter_map(Node::as_section)
	}

	fn has_sections(&self) -> bool {
		self.sections().next().is_some()
	}
}

impl SectionContainer for DocumentNode {
	fn level(&self) -> u32 {
		self.block.level
	}

	fn child_blocks(&self) -> &[Node] {
		&self.blocks
	}
}

impl SectionContainer for SectionNode {
	fn level(&self) -> u32 {
		self.block.level
	}

	fn child_blocks(&self) -> &[Node] {
		&self.blocks
	}
}

/// Wire shape of a node: the `kind` tag plus the fields of that kind.
#[derive(Deserialize)]
struct RawNode {
	kind: String,
	#[serde(flatten)]
	fields: serde_json::Map<String, serde_json::Value>,
}

impl TryFrom<RawNode> for Node {
	type Error = HtmlbookError;

	fn try_from(raw: RawNode) -> HtmlbookResult<Self> {
		let kind: NodeKind = raw.kind.parse()?;
		let fields = serde_json::Value::Object(raw.fields);

		let node = match kind {
			NodeKind::Document => Self::Document(Box::new(serde_json::from_value(fields)?)),
			NodeKind::Section => Self::Section(serde_json::from_value(fields)?),
			NodeKind::Block => Self::Block(serde_json::from_value(fields)?),
			NodeKind::List => Self::List(serde_json::from_value(fields)?),
			NodeKind::Table => Self::Table(serde_json::from_value(fields)?),
			NodeKind::Inline => Self::Inline(serde_json::from_value(fields)?),
		};

		Ok(node)
	}
}

/// Decode a JSON encoded tree.
///
/// Every `kind` tag is checked before the typed decoding, so an unknown kind
/// is reported as [`HtmlbookError::UnknownNodeKind`].
pub fn parse_tree(json: &str) -> HtmlbookResult<Node> {
	let value: serde_json::Value = serde_json::from_str(json)?;
	check_kinds(&value)?;

	Ok(serde_json::from_value(value)?)
}

/// Walk the node objects of a JSON tree and validate their `kind` tags.
/// Nodes only nest through `blocks`, so attribute maps are never inspected.
fn check_kinds(root: &serde_json::Value) -> HtmlbookResult<()> {
	let mut stack = vec![root];

	while let Some(node) = stack.pop() {
		if let Some(kind) = node.get("kind").and_then(serde_json::Value::as_str) {
			kind.parse::<NodeKind>()?;
		}

		if let Some(blocks) = node.get("blocks").and_then(serde_json::Value::as_array) {
			stack.extend(blocks.iter());
		}
	}

	Ok(())
}

/// Decode a JSON encoded tree whose root must be a document.
pub fn parse_document(json: &str) -> HtmlbookResult<DocumentNode> {
	match parse_tree(json)? {
		Node::Document(document) => Ok(*document),
		other => Err(HtmlbookError::ExpectedDocument(other.kind().to_string())),
	}
}
