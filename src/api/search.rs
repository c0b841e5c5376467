use log::debug;

/// Token identifying one in-flight search.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SearchTicket {
	seq: u64,
	/// Trimmed query the request was issued for.
	pub term: String,
}

/// Issues increasing tokens so that only the newest response is applied.
#[derive(Clone, Debug, Default)]
pub struct SearchSequencer {
	latest: u64,
}

impl SearchSequencer {
	/// Start a new search; any earlier ticket becomes stale.
	pub fn begin(&mut self, term: &str) -> SearchTicket {
		self.latest += 1;
		SearchTicket {
			seq: self.latest,
			term: term.trim().to_string(),
		}
	}

	/// True if no search started after `ticket`.
	pub fn is_current(&self, ticket: &SearchTicket) -> bool {
		let current = ticket.seq == self.latest;
		if !current {
			debug!("dropping stale response for {:?}", ticket.term);
		}
		current
	}
}

/// Trimmed query if long enough to send.
pub fn prepare_query(input: &str, min_len: usize) -> Option<&str> {
	let query = input.trim();
	(query.chars().count() >= min_len).then_some(query)
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn only_latest_ticket_is_current() {
		let mut seq = SearchSequencer::default();
		let first = seq.begin("open");
		let second = seq.begin(" openai ");
		assert_eq!(second.term, "openai");
		assert!(!seq.is_current(&first));
		assert!(seq.is_current(&second));
	}

	#[test]
	fn short_queries_are_not_sent() {
		assert_eq!(prepare_query(" a ", 2), None);
		assert_eq!(prepare_query("   ", 2), None);
		assert_eq!(prepare_query(" aws ", 2), Some("aws"));
	}
}
