//! Table of contents generation.
//!
//! The outline is a nested `<ol>` of links to the sections below a
//! container. Depth is bounded by the `toclevels` document attribute and
//! section numbers are shown down to `sectnumlevels`.

use minijinja::HtmlEscape;

use crate::tree::Attributes;
use crate::tree::SectionContainer;
use crate::tree::SectionNode;

/// Deepest container level whose sections are listed, unless the document
/// sets `toclevels`.
pub const DEFAULT_TOCLEVELS: u32 = 2;
/// Deepest section level that is shown with its number, unless the document
/// sets `sectnumlevels`.
pub const DEFAULT_SECTNUMLEVELS: u32 = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OutlineSettings {
	/// Containers at this level or deeper produce no nested list.
	pub toclevels: u32,
	/// Sections at this level or deeper are listed without their number.
	pub sectnumlevels: u32,
}

impl Default for OutlineSettings {
	fn default() -> Self {
		Self {
			toclevels: DEFAULT_TOCLEVELS,
			sectnumlevels: DEFAULT_SECTNUMLEVELS,
		}
	}
}

impl OutlineSettings {
	/// Read `toclevels` and `sectnumlevels` from document attributes. Values
	/// that are missing or not integers fall back to the defaults.
	pub fn from_attributes(attributes: &Attributes) -> Self {
		Self {
			toclevels: attributes
				.get_u32("toclevels")
				.unwrap_or(DEFAULT_TOCLEVELS),
			sectnumlevels: attributes
				.get_u32("sectnumlevels")
				.unwrap_or(DEFAULT_SECTNUMLEVELS),
		}
	}

	fn expands<C: SectionContainer>(self, container: &C) -> bool {
		container.has_sections() && container.level() < self.toclevels
	}

	/// Whether `section` is displayed with its number, in the outline and in
	/// its own heading.
	pub fn shows_number(self, section: &SectionNode) -> bool {
		section.numbered && section.block.level < self.sectnumlevels
	}
}

enum Step<'a> {
	Entry(&'a SectionNode),
	Close(&'static str),
}

/// Build the outline markup for the sections below `root`.
///
/// Returns an empty string when `root` has no sections or sits at or below
/// the `toclevels` cutoff. The tree is walked with an explicit stack so deep
/// nesting cannot overflow the call stack.
pub fn outline<C: SectionContainer>(root: &C, settings: OutlineSettings) -> String {
	let mut result = String::new();
	if !settings.expands(root) {
		return result;
	}

	let mut stack = vec![Step::Close("</ol>")];
	push_sections(&mut stack, root.sections());
	result.push_str("<ol>");

	while let Some(step) = stack.pop() {
		match step {
			Step::Close(tag) => result.push_str(tag),
			Step::Entry(section) => {
				push_link(&mut result, section, settings);
				stack.push(Step::Close("</li>"));

				if settings.expands(section) {
					result.push_str("<ol>");
					stack.push(Step::Close("</ol>"));
					push_sections(&mut stack, section.sections());
				}
			}
		}
	}

	result
}

/// Push sections so that they pop in document order.
fn push_sections<'a>(stack: &mut Vec<Step<'a>>, sections: impl Iterator<Item = &'a SectionNode>) {
	let start = stack.len();
	stack.extend(sections.map(Step::Entry));
	stack[start..].reverse();
}

fn push_link(result: &mut String, section: &SectionNode, settings: OutlineSettings) {
	// Titles are markup already, but the id lands inside an attribute.
	let id = section.block.id.as_deref().unwrap_or_default();
	result.push_str("<li><a href=\"#");
	result.push_str(&HtmlEscape(id).to_string());
	result.push_str("\">");

	if settings.shows_number(section) {
		result.push_str(&section.sectnum());
		result.push(' ');
	}

	result.push_str(section.block.title.as_deref().unwrap_or_default());
	result.push_str("</a>");
}
