//! Dispatches the tagged record stream into a [`Grammar`]'s flat tables.
//!
//! Legacy (`v1.0`) and enhanced (`v5.0`) files share most of their record
//! tags; the two formats differ in how table counts, character sets,
//! properties and groups are encoded. A single `load_record` function
//! switches on the tag byte rather than splitting into two parallel
//! loader types, since the two formats agree on nearly everything.

use goldrun_tables::{read_header, RecordReader, RecordValue, TableFormat};

use crate::error::GrammarError;
use crate::types::{
    AdvanceMode, CharRange, CharSet, EndingMode, Grammar, LrAction, SymbolKind,
};

const TAG_PARAMETERS: u8 = b'P';
const TAG_PROPERTY: u8 = b'p';
const TAG_TABLE_COUNTS_LEGACY: u8 = b'T';
const TAG_TABLE_COUNTS_ENHANCED: u8 = b't';
const TAG_INITIAL: u8 = b'I';
const TAG_SYMBOL: u8 = b'S';
const TAG_CHARSET_LEGACY: u8 = b'C';
const TAG_CHARSET_ENHANCED: u8 = b'c';
const TAG_RULE: u8 = b'R';
const TAG_DFA_STATE: u8 = b'D';
const TAG_LR_STATE: u8 = b'L';
const TAG_GROUP: u8 = b'g';

const ACTION_SHIFT: u16 = 1;
const ACTION_REDUCE: u16 = 2;
const ACTION_GOTO: u16 = 3;
const ACTION_ACCEPT: u16 = 4;

impl Grammar {
    /// Loads a grammar from the raw bytes of a `.cgt`/`.egt` table file.
    ///
    /// Only two things fail the whole load: an unrecognized or
    /// undecodable header, and a table-counts record never having been
    /// seen by the time any indexed record tries to use it (in which
    /// case that record is dropped rather than the whole load aborted —
    /// see the module doc).
    pub fn load(bytes: &[u8]) -> Result<Grammar, GrammarError> {
        let (format, body) = match read_header(bytes) {
            Some(pair) => pair,
            None => {
                let header = goldrun_tables::peek_header_string(bytes)
                    .unwrap_or_else(|| "<undecodable>".to_string());
                return Err(GrammarError::UnknownHeader(header));
            }
        };

        let mut reader = RecordReader::new(body);
        let mut grammar: Option<Grammar> = None;

        while let Some(mut record) = reader.next_record() {
            let Some(tag) = record.next_entry() else {
                continue;
            };
            load_record(tag.as_byte(), &mut record, format, &mut grammar);
        }

        Ok(grammar.unwrap_or_else(|| Grammar::with_table_sizes(format, 0, 0, 0, 0, 0, 0)))
    }
}

/// Used directly only by the table-counts and parameters branches (to
/// stamp the freshly built `Grammar` with which file shape produced it);
/// every other branch is tag-driven, since legacy and enhanced never
/// reuse the same tag byte for a different meaning.
fn load_record(
    tag: u8,
    record: &mut goldrun_tables::Record<'_, '_>,
    format: TableFormat,
    grammar: &mut Option<Grammar>,
) {
    match tag {
        TAG_TABLE_COUNTS_LEGACY | TAG_TABLE_COUNTS_ENHANCED => {
            let values = record.drain();
            let get = |i: usize| values.get(i).map(RecordValue::as_int).unwrap_or(0);
            let groups = if tag == TAG_TABLE_COUNTS_ENHANCED { get(5) } else { 0 };
            *grammar = Some(Grammar::with_table_sizes(
                format,
                get(0),
                get(1),
                get(2),
                get(3),
                get(4),
                groups,
            ));
        }
        TAG_PARAMETERS => {
            let g = grammar.get_or_insert_with(|| Grammar::with_table_sizes(format, 0, 0, 0, 0, 0, 0));
            g.info.name = record.next_entry().map(|v| v.as_string().to_string()).unwrap_or_default();
            g.info.version = record.next_entry().map(|v| v.as_string().to_string()).unwrap_or_default();
            g.info.author = record.next_entry().map(|v| v.as_string().to_string()).unwrap_or_default();
            g.info.about = record.next_entry().map(|v| v.as_string().to_string()).unwrap_or_default();
            g.case_sensitive = record.next_entry().map(|v| v.as_bool()).unwrap_or(true);
            record.skip(); // reserved
        }
        TAG_PROPERTY => {
            let Some(g) = grammar.as_mut() else { return };
            let index = record.next_entry().map(|v| v.as_int()).unwrap_or(u16::MAX);
            record.next_entry(); // name, unused
            let value = record.next_entry().map(|v| v.as_string().to_string()).unwrap_or_default();
            match index {
                0 => g.info.name = value,
                1 => g.info.version = value,
                2 => g.info.author = value,
                3 => g.info.about = value,
                _ => {}
            }
        }
        TAG_INITIAL => {
            let Some(g) = grammar.as_mut() else { return };
            let dfa = record.next_entry().map(|v| v.as_int()).unwrap_or(0);
            let lr = record.next_entry().map(|v| v.as_int()).unwrap_or(0);
            if let Some(id) = g.in_bounds_dfa_state(dfa) {
                g.initial_dfa_state = id;
            }
            if let Some(id) = g.in_bounds_lr_state(lr) {
                g.initial_lr_state = id;
            }
        }
        TAG_SYMBOL => {
            let Some(g) = grammar.as_mut() else { return };
            let Some(idx) = record.next_entry().map(|v| v.as_int()).and_then(|i| g.in_bounds_symbol(i)) else {
                record.skip();
                return;
            };
            let name = record.next_entry().map(|v| v.as_string().to_string()).unwrap_or_default();
            let kind_code = record.next_entry().map(|v| v.as_int()).unwrap_or(u16::MAX);
            let Some(kind) = SymbolKind::from_code(kind_code) else { return };
            g.symbols[idx.0 as usize].name = name;
            g.symbols[idx.0 as usize].kind = kind;
            match kind {
                SymbolKind::End => g.end_symbol = Some(idx),
                SymbolKind::Error => g.error_symbol = Some(idx),
                _ => {}
            }
        }
        TAG_CHARSET_LEGACY => {
            let Some(g) = grammar.as_mut() else { return };
            let Some(idx) = record.next_entry().map(|v| v.as_int()).and_then(|i| g.in_bounds_char_set(i)) else {
                return;
            };
            let set = record.next_entry().map(|v| v.as_string().to_string()).unwrap_or_default();
            g.char_sets[idx.0 as usize] = CharSet::Enumerated(set);
        }
        TAG_CHARSET_ENHANCED => {
            let Some(g) = grammar.as_mut() else { return };
            let Some(idx) = record.next_entry().map(|v| v.as_int()).and_then(|i| g.in_bounds_char_set(i)) else {
                record.skip();
                return;
            };
            let plane = record.next_entry().map(|v| v.as_int()).unwrap_or(0);
            let range_count = record.next_entry().map(|v| v.as_int()).unwrap_or(0);
            record.next_entry(); // reserved
            let tail = record.drain();
            let mut ranges = Vec::with_capacity(range_count as usize);
            for pair in tail.chunks_exact(2) {
                ranges.push(CharRange {
                    start: pair[0].as_int(),
                    end: pair[1].as_int(),
                });
            }
            let mut set = CharSet::Ranges { plane, ranges };
            set.sort_ranges();
            g.char_sets[idx.0 as usize] = set;
        }
        TAG_RULE => {
            let Some(g) = grammar.as_mut() else { return };
            let Some(idx) = record.next_entry().map(|v| v.as_int()).and_then(|i| g.in_bounds_rule(i)) else {
                record.skip();
                return;
            };
            let Some(head) = record.next_entry().map(|v| v.as_int()).and_then(|i| g.in_bounds_symbol(i)) else {
                record.skip();
                return;
            };
            record.next_entry(); // reserved
            let body_entries = record.drain();
            let body = body_entries
                .iter()
                .filter_map(|v| g.in_bounds_symbol(v.as_int()))
                .collect();
            g.rules[idx.0 as usize].head = head;
            g.rules[idx.0 as usize].body = body;
        }
        TAG_DFA_STATE => {
            let Some(g) = grammar.as_mut() else { return };
            let Some(idx) = record.next_entry().map(|v| v.as_int()).and_then(|i| g.in_bounds_dfa_state(i)) else {
                record.skip();
                return;
            };
            let has_accept = record.next_entry().map(|v| v.as_bool()).unwrap_or(false);
            let accept_idx = record.next_entry().map(|v| v.as_int()).unwrap_or(0);
            record.next_entry(); // reserved
            let accept = if has_accept { g.in_bounds_symbol(accept_idx) } else { None };

            let tail = record.drain();
            let mut edges = Vec::with_capacity(tail.len() / 3);
            for triple in tail.chunks_exact(3) {
                let Some(char_set) = g.in_bounds_char_set(triple[0].as_int()) else { continue };
                let Some(target) = g.in_bounds_dfa_state(triple[1].as_int()) else { continue };
                edges.push(crate::types::DfaEdge { char_set, target });
            }
            g.dfa_states[idx.0 as usize].accept = accept;
            g.dfa_states[idx.0 as usize].edges = edges;
        }
        TAG_LR_STATE => {
            let Some(g) = grammar.as_mut() else { return };
            let Some(idx) = record.next_entry().map(|v| v.as_int()).and_then(|i| g.in_bounds_lr_state(i)) else {
                record.skip();
                return;
            };
            record.next_entry(); // reserved
            let tail = record.drain();
            let mut actions = std::collections::HashMap::new();
            for quad in tail.chunks_exact(4) {
                let Some(symbol) = g.in_bounds_symbol(quad[0].as_int()) else { continue };
                let action_code = quad[1].as_int();
                let target_idx = quad[2].as_int();
                let action = match action_code {
                    ACTION_SHIFT => g.in_bounds_lr_state(target_idx).map(LrAction::Shift),
                    ACTION_REDUCE => g.in_bounds_rule(target_idx).map(LrAction::Reduce),
                    ACTION_GOTO => g.in_bounds_lr_state(target_idx).map(LrAction::Goto),
                    ACTION_ACCEPT => Some(LrAction::Accept),
                    _ => None,
                };
                if let Some(action) = action {
                    actions.insert(symbol, action);
                }
            }
            g.lr_states[idx.0 as usize].actions = actions;
        }
        TAG_GROUP => {
            let Some(g) = grammar.as_mut() else { return };
            let Some(idx) = record.next_entry().map(|v| v.as_int()).and_then(|i| g.in_bounds_group(i)) else {
                record.skip();
                return;
            };
            let name = record.next_entry().map(|v| v.as_string().to_string()).unwrap_or_default();
            let container = record.next_entry().map(|v| v.as_int()).and_then(|i| g.in_bounds_symbol(i));
            let start = record.next_entry().map(|v| v.as_int()).and_then(|i| g.in_bounds_symbol(i));
            let end = record.next_entry().map(|v| v.as_int()).and_then(|i| g.in_bounds_symbol(i));
            let advance_mode = match record.next_entry().map(|v| v.as_int()).unwrap_or(0) {
                1 => AdvanceMode::Character,
                _ => AdvanceMode::Token,
            };
            let ending_mode = match record.next_entry().map(|v| v.as_int()).unwrap_or(0) {
                1 => EndingMode::Closed,
                _ => EndingMode::Open,
            };
            record.next_entry(); // reserved
            record.next_entry(); // nesting count; `drain` below reads the rest regardless
            let nested_entries = record.drain();
            let nested = nested_entries
                .iter()
                .filter_map(|v| g.in_bounds_group(v.as_int()))
                .collect();

            let (Some(container), Some(start), Some(end)) = (container, start, end) else {
                return;
            };
            g.groups[idx.0 as usize] = crate::types::Group {
                id: idx,
                name,
                container,
                start,
                end,
                advance_mode,
                ending_mode,
                nested,
            };
            g.symbols[container.0 as usize].group = Some(idx);
            g.symbols[start.0 as usize].group = Some(idx);
            g.symbols[end.0 as usize].group = Some(idx);
        }
        _ => record.skip(),
    }
}
