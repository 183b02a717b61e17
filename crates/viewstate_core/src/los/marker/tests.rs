use crate::los::marker::{self, REGISTRATIONS};
use crate::los::{MARKERS, MarkerTable, Rule};

#[test]
fn every_registration_resolves() {
	for &(byte, rule) in REGISTRATIONS {
		assert_eq!(MARKERS.rule(byte), Some(rule), "marker 0x{byte:02x}");
	}
}

#[test]
fn registrations_have_no_duplicate_markers() {
	let mut seen = [false; 256];
	for &(byte, _) in REGISTRATIONS {
		assert!(!seen[usize::from(byte)], "marker 0x{byte:02x} registered twice");
		seen[usize::from(byte)] = true;
	}
	assert_eq!(MARKERS.markers().count(), REGISTRATIONS.len());
}

#[test]
fn shared_rules_cover_both_markers() {
	assert_eq!(MARKERS.rule(marker::HYBRID_DICT), Some(Rule::Dict));
	assert_eq!(MARKERS.rule(marker::HASHTABLE), Some(Rule::Dict));
	assert_eq!(MARKERS.rule(marker::INDEXED_STRING_ADD), Some(Rule::IndexedString));
	assert_eq!(MARKERS.rule(marker::INDEXED_STRING_REF), Some(Rule::IndexedString));
}

#[test]
fn unregistered_markers_are_absent() {
	for byte in [0x00_u8, 0x0d, 0x1d, 0x2b, 0xfe, 0xff] {
		assert_eq!(MARKERS.rule(byte), None, "marker 0x{byte:02x}");
	}
}

#[test]
fn thirty_distinct_rules() {
	let mut rules: Vec<&str> = MARKERS.markers().map(|(_, rule)| rule.as_str()).collect();
	rules.sort_unstable();
	rules.dedup();
	assert_eq!(rules.len(), 30);
}

#[test]
fn custom_table_overrides_later_entries() {
	let table = MarkerTable::from_registrations(&[(0x70, Rule::Int), (0x70, Rule::Byte)]);
	assert_eq!(table.rule(0x70), Some(Rule::Byte));
	assert_eq!(table.markers().count(), 1);
}
