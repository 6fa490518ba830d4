//! Ordered collection of intercepted diagnostics.

use std::collections::VecDeque;
use std::collections::vec_deque;

use crate::DiagnosticRecord;

/// Records captured during the most recent interception, most recent first.
///
/// [`first`](Self::first) is the latest capture and [`last`](Self::last) the
/// earliest; iteration follows the same front-to-back order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DiagnosticLog {
	records: VecDeque<DiagnosticRecord>,
}

impl DiagnosticLog {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn len(&self) -> usize {
		self.records.len()
	}

	/// Alias of [`len`](Self::len).
	pub fn count(&self) -> usize {
		self.len()
	}

	pub fn is_empty(&self) -> bool {
		self.records.is_empty()
	}

	pub fn is_not_empty(&self) -> bool {
		!self.is_empty()
	}

	/// Most recently captured record.
	pub fn first(&self) -> Option<&DiagnosticRecord> {
		self.records.front()
	}

	/// Earliest captured record.
	pub fn last(&self) -> Option<&DiagnosticRecord> {
		self.records.back()
	}

	/// Record at `offset`; negative offsets count back from the end, so `-1`
	/// is the earliest capture.
	pub fn get(&self, offset: isize) -> Option<&DiagnosticRecord> {
		let index = if offset < 0 {
			self.records.len().checked_sub(offset.unsigned_abs())?
		} else {
			offset.unsigned_abs()
		};
		self.records.get(index)
	}

	pub fn iter(&self) -> vec_deque::Iter<'_, DiagnosticRecord> {
		self.records.iter()
	}

	pub(crate) fn push_front(&mut self, record: DiagnosticRecord) {
		self.records.push_front(record);
	}

	pub(crate) fn clear(&mut self) {
		self.records.clear();
	}
}

impl<'a> IntoIterator for &'a DiagnosticLog {
	type Item = &'a DiagnosticRecord;
	type IntoIter = vec_deque::Iter<'a, DiagnosticRecord>;

	fn into_iter(self) -> Self::IntoIter {
		self.iter()
	}
}

impl IntoIterator for DiagnosticLog {
	type Item = DiagnosticRecord;
	type IntoIter = vec_deque::IntoIter<DiagnosticRecord>;

	fn into_iter(self) -> Self::IntoIter {
		self.records.into_iter()
	}
}
