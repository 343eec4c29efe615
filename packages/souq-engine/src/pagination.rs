//! Load-more pagination over an already ranked result list. The cursor only
//! tracks how many leading items are visible; the list itself never changes
//! while a cursor is live.

use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct FeedCursor {
	visible: usize,
	total: usize,
}
impl FeedCursor {
	/// Opens a cursor showing the first page, clamped to the list length.
	pub fn new(initial_visible: usize, total: usize) -> Self {
		Self { visible: initial_visible.min(total), total }
	}

	pub fn visible(&self) -> usize {
		self.visible
	}

	pub fn total(&self) -> usize {
		self.total
	}

	/// Reveals one more page. Saturates at the end of the list.
	pub fn advance(&mut self, increment: usize) {
		self.visible = self.visible.saturating_add(increment).min(self.total);
	}

	/// Collapses back to the first page, e.g. after the query or any filter
	/// changes underneath the cursor.
	pub fn reset(&mut self, initial_visible: usize, total: usize) {
		self.total = total;
		self.visible = initial_visible.min(total);
	}

	pub fn end_of_list(&self) -> bool {
		self.visible >= self.total
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn advances_in_increments_then_saturates() {
		let mut cursor = FeedCursor::new(6, 14);

		assert_eq!(cursor.visible(), 6);
		assert!(!cursor.end_of_list());

		cursor.advance(6);

		assert_eq!(cursor.visible(), 12);

		cursor.advance(6);

		assert_eq!(cursor.visible(), 14);
		assert!(cursor.end_of_list());

		cursor.advance(6);

		assert_eq!(cursor.visible(), 14);
	}

	#[test]
	fn short_list_is_terminal_immediately() {
		let cursor = FeedCursor::new(6, 4);

		assert_eq!(cursor.visible(), 4);
		assert!(cursor.end_of_list());
	}

	#[test]
	fn reset_collapses_to_first_page() {
		let mut cursor = FeedCursor::new(6, 30);

		cursor.advance(6);
		cursor.reset(6, 9);

		assert_eq!(cursor.visible(), 6);
		assert_eq!(cursor.total(), 9);
		assert!(!cursor.end_of_list());
	}

	#[test]
	fn empty_list_shows_nothing() {
		let cursor = FeedCursor::new(6, 0);

		assert_eq!(cursor.visible(), 0);
		assert!(cursor.end_of_list());
	}
}
