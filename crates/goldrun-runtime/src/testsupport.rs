//! Hand-built synthetic grammars shared by the lexer, group processor
//! and driver unit tests, so none of them need a real `.cgt`/`.egt`
//! fixture on disk. `goldrun-grammar`'s own tests already cover the
//! binary decoder end to end.

use std::collections::HashMap;

use goldrun_grammar::{
    AdvanceMode, CharSet, DfaEdge, DfaState, DfaStateId, EndingMode, Grammar, GrammarInfo, Group,
    GroupId, LrAction, LrState, LrStateId, Rule, RuleId, Symbol, SymbolId, SymbolKind, TableFormat,
};

fn symbol(id: u16, name: &str, kind: SymbolKind) -> Symbol {
    Symbol {
        id: SymbolId(id),
        name: name.to_string(),
        kind,
        group: None,
    }
}

fn lr_state(id: u16, actions: &[(SymbolId, LrAction)]) -> LrState {
    LrState {
        id: LrStateId(id),
        actions: actions.iter().copied().collect::<HashMap<_, _>>(),
    }
}

/// Recognizes the single terminal `"a"`: `End`, `Error`, `A`.
pub fn single_char_grammar() -> Grammar {
    Grammar {
        format: TableFormat::Enhanced,
        info: GrammarInfo::default(),
        case_sensitive: true,
        symbols: vec![
            symbol(0, "EOF", SymbolKind::End),
            symbol(1, "Error", SymbolKind::Error),
            symbol(2, "a", SymbolKind::Terminal),
        ],
        char_sets: vec![CharSet::Enumerated("a".to_string())],
        rules: Vec::new(),
        dfa_states: vec![
            DfaState {
                accept: None,
                edges: vec![DfaEdge {
                    char_set: goldrun_grammar::CharSetId(0),
                    target: DfaStateId(1),
                }],
            },
            DfaState {
                accept: Some(SymbolId(2)),
                edges: Vec::new(),
            },
        ],
        lr_states: Vec::new(),
        groups: Vec::new(),
        initial_dfa_state: DfaStateId(0),
        initial_lr_state: LrStateId(0),
        end_symbol: Some(SymbolId(0)),
        error_symbol: Some(SymbolId(1)),
    }
}

/// `Num ::= digit (accept), then a '.' edge into a state with no
/// accept and no further edges. Exercises backtracking past an accept
/// into a longer, ultimately non-accepting tail (`"3."` on input
/// `"3.x"`): the dead end must keep the whole buffer, not just the
/// text captured at the last accept.
pub fn number_then_dot_grammar() -> Grammar {
    Grammar {
        format: TableFormat::Enhanced,
        info: GrammarInfo::default(),
        case_sensitive: true,
        symbols: vec![
            symbol(0, "EOF", SymbolKind::End),
            symbol(1, "Error", SymbolKind::Error),
            symbol(2, "Num", SymbolKind::Terminal),
        ],
        char_sets: vec![
            CharSet::Enumerated("3".to_string()),
            CharSet::Enumerated(".".to_string()),
        ],
        rules: Vec::new(),
        dfa_states: vec![
            DfaState {
                accept: None,
                edges: vec![DfaEdge {
                    char_set: goldrun_grammar::CharSetId(0),
                    target: DfaStateId(1),
                }],
            },
            DfaState {
                accept: Some(SymbolId(2)),
                edges: vec![DfaEdge {
                    char_set: goldrun_grammar::CharSetId(1),
                    target: DfaStateId(2),
                }],
            },
            DfaState {
                accept: None,
                edges: Vec::new(),
            },
        ],
        lr_states: Vec::new(),
        groups: Vec::new(),
        initial_dfa_state: DfaStateId(0),
        initial_lr_state: LrStateId(0),
        end_symbol: Some(SymbolId(0)),
        error_symbol: Some(SymbolId(1)),
    }
}

/// Accepts `"a"` via the single rule `Start ::= a`. Exercises a plain
/// shift / reduce / goto / accept cycle with no trim-eligible reduction.
pub fn accepts_single_a_grammar() -> Grammar {
    let mut g = single_char_grammar();
    g.symbols.push(symbol(3, "Start", SymbolKind::NonTerminal));
    let start = SymbolId(3);
    let a = SymbolId(2);
    let end = SymbolId(0);
    g.rules = vec![Rule {
        id: RuleId(0),
        head: start,
        body: vec![a],
    }];
    g.lr_states = vec![
        lr_state(0, &[(a, LrAction::Shift(LrStateId(1))), (start, LrAction::Goto(LrStateId(2)))]),
        lr_state(1, &[(end, LrAction::Reduce(RuleId(0)))]),
        lr_state(2, &[(end, LrAction::Accept)]),
    ];
    g.initial_lr_state = LrStateId(0);
    g
}

/// `Start ::= Chain`, `Chain ::= a`: the outer reduction is trim-eligible
/// (a unit production over a non-terminal body), the inner one is not
/// (its body is the terminal `a`).
pub fn trim_reduction_grammar() -> Grammar {
    let mut g = single_char_grammar();
    g.symbols.push(symbol(3, "Chain", SymbolKind::NonTerminal));
    g.symbols.push(symbol(4, "Start", SymbolKind::NonTerminal));
    let a = SymbolId(2);
    let chain = SymbolId(3);
    let start = SymbolId(4);
    let end = SymbolId(0);
    g.rules = vec![
        Rule { id: RuleId(0), head: chain, body: vec![a] },
        Rule { id: RuleId(1), head: start, body: vec![chain] },
    ];
    g.lr_states = vec![
        lr_state(
            0,
            &[
                (a, LrAction::Shift(LrStateId(1))),
                (chain, LrAction::Goto(LrStateId(2))),
                (start, LrAction::Goto(LrStateId(3))),
            ],
        ),
        lr_state(1, &[(end, LrAction::Reduce(RuleId(0)))]),
        lr_state(2, &[(end, LrAction::Reduce(RuleId(1)))]),
        lr_state(3, &[(end, LrAction::Accept)]),
    ];
    g.initial_lr_state = LrStateId(0);
    g
}

/// `Start ::= A B`. State 1 (after shifting `A`) has no action for
/// either `End` or a second `A` — exercises `UnexpectedEndOfFile` and
/// generic `SyntaxError` from the same grammar.
pub fn two_terminal_grammar() -> Grammar {
    let mut g = single_char_grammar();
    g.symbols.push(symbol(3, "b", SymbolKind::Terminal));
    g.symbols.push(symbol(4, "Start", SymbolKind::NonTerminal));
    let a = SymbolId(2);
    let b = SymbolId(3);
    let start = SymbolId(4);
    let end = SymbolId(0);
    g.rules = vec![Rule {
        id: RuleId(0),
        head: start,
        body: vec![a, b],
    }];
    g.lr_states = vec![
        lr_state(0, &[(a, LrAction::Shift(LrStateId(1))), (start, LrAction::Goto(LrStateId(3)))]),
        lr_state(1, &[(b, LrAction::Shift(LrStateId(2)))]),
        lr_state(2, &[(end, LrAction::Reduce(RuleId(0)))]),
        lr_state(3, &[(end, LrAction::Accept)]),
    ];
    g.initial_lr_state = LrStateId(0);
    g
}

/// Legacy-style line comment: `#` starts a `CommentLine` token, `a` is
/// an ordinary terminal.
pub fn legacy_line_comment_grammar() -> Grammar {
    Grammar {
        format: TableFormat::Legacy,
        info: GrammarInfo::default(),
        case_sensitive: true,
        symbols: vec![
            symbol(0, "EOF", SymbolKind::End),
            symbol(1, "Error", SymbolKind::Error),
            symbol(2, "a", SymbolKind::Terminal),
            symbol(3, "Comment Line", SymbolKind::CommentLine),
            symbol(4, "Whitespace", SymbolKind::Noise),
        ],
        char_sets: vec![
            CharSet::Enumerated("a".to_string()),
            CharSet::Enumerated("#".to_string()),
            CharSet::Enumerated("\n".to_string()),
        ],
        rules: Vec::new(),
        dfa_states: vec![
            DfaState {
                accept: None,
                edges: vec![
                    DfaEdge { char_set: goldrun_grammar::CharSetId(0), target: DfaStateId(1) },
                    DfaEdge { char_set: goldrun_grammar::CharSetId(1), target: DfaStateId(2) },
                    DfaEdge { char_set: goldrun_grammar::CharSetId(2), target: DfaStateId(3) },
                ],
            },
            DfaState { accept: Some(SymbolId(2)), edges: Vec::new() },
            DfaState { accept: Some(SymbolId(3)), edges: Vec::new() },
            DfaState { accept: Some(SymbolId(4)), edges: Vec::new() },
        ],
        lr_states: Vec::new(),
        groups: Vec::new(),
        initial_dfa_state: DfaStateId(0),
        initial_lr_state: LrStateId(0),
        end_symbol: Some(SymbolId(0)),
        error_symbol: Some(SymbolId(1)),
    }
}

/// Enhanced-style block comment group `{ ... }`, permitted to nest in
/// itself, closed (the terminator text is folded into the comment).
pub fn enhanced_block_comment_grammar() -> Grammar {
    let group_id = GroupId(0);
    let start = SymbolId(3);
    let end = SymbolId(4);
    let container = SymbolId(5);
    let mut g = Grammar {
        format: TableFormat::Enhanced,
        info: GrammarInfo::default(),
        case_sensitive: true,
        symbols: vec![
            symbol(0, "EOF", SymbolKind::End),
            symbol(1, "Error", SymbolKind::Error),
            symbol(2, "a", SymbolKind::Terminal),
            symbol(3, "Comment Start", SymbolKind::GroupStart),
            symbol(4, "Comment End", SymbolKind::GroupEnd),
            symbol(5, "Comment", SymbolKind::Noise),
        ],
        char_sets: vec![
            CharSet::Enumerated("a".to_string()),
            CharSet::Enumerated("{".to_string()),
            CharSet::Enumerated("}".to_string()),
        ],
        rules: Vec::new(),
        dfa_states: vec![
            DfaState {
                accept: None,
                edges: vec![
                    DfaEdge { char_set: goldrun_grammar::CharSetId(0), target: DfaStateId(1) },
                    DfaEdge { char_set: goldrun_grammar::CharSetId(1), target: DfaStateId(2) },
                    DfaEdge { char_set: goldrun_grammar::CharSetId(2), target: DfaStateId(3) },
                ],
            },
            DfaState { accept: Some(SymbolId(2)), edges: Vec::new() },
            DfaState { accept: Some(start), edges: Vec::new() },
            DfaState { accept: Some(end), edges: Vec::new() },
        ],
        lr_states: Vec::new(),
        groups: vec![Group {
            id: group_id,
            name: "Comment".to_string(),
            container,
            start,
            end,
            advance_mode: AdvanceMode::Token,
            ending_mode: EndingMode::Closed,
            nested: vec![group_id],
        }],
        initial_dfa_state: DfaStateId(0),
        initial_lr_state: LrStateId(0),
        end_symbol: Some(SymbolId(0)),
        error_symbol: Some(SymbolId(1)),
    };
    g.symbols[3].group = Some(group_id);
    g.symbols[4].group = Some(group_id);
    g.symbols[5].group = Some(group_id);
    g
}
