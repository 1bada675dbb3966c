//! This module provides the parser for Turing Machine programs, utilizing the `pest` crate.
//! The grammar in `grammar.pest` classifies every line of the program text on its own, and
//! the parser builds the state graph from those lines in two passes: states and raw rules
//! are collected first, then every rule's target is resolved once all states are known.

use crate::{
    program::Program,
    state::{State, StateId},
    types::{Direction, Symbol, SyntaxError, TuringMachineError},
};
use pest::{iterators::Pair, Parser as PestParser};
use pest_derive::Parser as PestParser;
use std::collections::HashMap;
use tracing::{debug, warn};

/// Derives a `PestParser` for the Turing Machine grammar defined in `grammar.pest`.
#[derive(PestParser)]
#[grammar = "grammar.pest"]
pub struct TuringMachineParser;

/// Parses the given input string into a `Program`.
///
/// Lines matching neither a state header nor a transition are skipped, logged at `warn`
/// as they are found, and recorded in [`Program::diagnostics`]. A transition targeting an
/// undeclared state aborts the parse.
///
/// # Returns
///
/// * `Ok(Program)` whose entry is the first declared state.
/// * `Err(TuringMachineError::UndefinedState)` if a target name never resolves.
/// * `Err(TuringMachineError::EmptyProgram)` if no state header is present.
pub fn parse(input: &str) -> Result<Program, TuringMachineError> {
    let pairs = TuringMachineParser::parse(Rule::program, input)
        .map_err(|e| TuringMachineError::ParseError(e.into()))?;

    let mut builder = ProgramBuilder::default();
    for pair in pairs.flat_map(Pair::into_inner) {
        match pair.as_rule() {
            Rule::header => builder.declare(pair),
            Rule::transition => builder.transition(pair),
            Rule::invalid => builder.reject(&pair, "unrecognized line"),
            _ => {} // Blank lines and EOI
        }
    }

    builder.build()
}

/// A transition whose target has not been resolved yet.
struct RawRule<'i> {
    input: Symbol,
    output: Symbol,
    direction: Direction,
    target: &'i str,
    line: usize,
}

/// Collects states and raw rules in declaration order.
#[derive(Default)]
struct ProgramBuilder<'i> {
    states: Vec<State>,
    rules: Vec<Vec<RawRule<'i>>>,
    names: HashMap<String, StateId>,
    diagnostics: Vec<SyntaxError>,
}

impl<'i> ProgramBuilder<'i> {
    /// Opens a new state block.
    ///
    /// A repeated name rebinds to the newer state, and the shadowed state loses its raw
    /// rules: they are never resolved, so it ends up with an empty table.
    fn declare(&mut self, pair: Pair<'i, Rule>) {
        let mut name = "";
        let mut accepting = false;

        for inner in pair.into_inner() {
            match inner.as_rule() {
                Rule::name => name = inner.as_str(),
                Rule::accepting => accepting = true,
                _ => {}
            }
        }

        let id = StateId(self.states.len());
        if let Some(shadowed) = self.names.insert(name.to_string(), id) {
            warn!(state = name, "state redeclared, earlier rules dropped");
            self.rules[shadowed.0].clear();
        }

        self.states.push(State::new(name, accepting));
        self.rules.push(Vec::new());
    }

    /// Attaches a raw rule to the most recently declared state.
    fn transition(&mut self, pair: Pair<'i, Rule>) {
        if self.rules.is_empty() {
            return self.reject(&pair, "transition rule before any state header");
        }

        let line = line_of(&pair);
        let tokens: Vec<&'i str> = pair.clone().into_inner().map(|p| p.as_str()).collect();
        let [input, output, direction, target] = tokens[..] else {
            return self.reject(&pair, "malformed transition rule");
        };
        let Some(direction) = parse_direction(direction) else {
            return self.reject(&pair, "unsupported direction");
        };

        if let Some(rules) = self.rules.last_mut() {
            rules.push(RawRule {
                input: input.to_string(),
                output: output.to_string(),
                direction,
                target,
                line,
            });
        }
    }

    /// Records a skipped line.
    fn reject(&mut self, pair: &Pair<'i, Rule>, reason: &str) {
        let error = SyntaxError {
            line: line_of(pair),
            content: pair.as_str().to_string(),
            reason: reason.to_string(),
        };

        warn!("{error}");
        self.diagnostics.push(error);
    }

    /// Resolves every raw rule against the declared states.
    fn build(self) -> Result<Program, TuringMachineError> {
        let ProgramBuilder {
            mut states,
            rules,
            names,
            diagnostics,
        } = self;

        if states.is_empty() {
            return Err(TuringMachineError::EmptyProgram);
        }

        for (state, rules) in states.iter_mut().zip(rules) {
            for rule in rules {
                let next = names.get(rule.target).copied().ok_or_else(|| {
                    TuringMachineError::UndefinedState {
                        name: rule.target.to_string(),
                        line: rule.line,
                    }
                })?;

                state.add_action(rule.input, rule.output, rule.direction, next);
            }
        }

        let program = Program::new(states, names, StateId(0), diagnostics);
        debug!(
            states = program.states().len(),
            transitions = program.transition_count(),
            skipped = program.diagnostics().len(),
            "parsed program"
        );

        Ok(program)
    }
}

/// Parses a direction marker: '<' for Left, '>' for Right.
fn parse_direction(token: &str) -> Option<Direction> {
    match token {
        "<" => Some(Direction::Left),
        ">" => Some(Direction::Right),
        _ => None,
    }
}

/// 1-based line number where `pair` starts.
fn line_of(pair: &Pair<Rule>) -> usize {
    pair.as_span().start_pos().line_col().0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::Action;

    fn action<'p>(program: &'p Program, state: &str, input: Option<&str>) -> Option<&'p Action> {
        program.state(program.find(state)?).action(input)
    }

    #[test]
    fn test_parse_single_accepting_state() {
        let program = parse("A!\n").unwrap();

        assert_eq!(program.states().len(), 1);
        let entry = program.state(program.entry());
        assert_eq!(entry.name(), "A");
        assert!(entry.is_accepting());
        assert_eq!(entry.action_count(), 0);
        assert!(program.diagnostics().is_empty());
    }

    #[test]
    fn test_parse_simple_program() {
        let input = "A\n  0 1 >B\nB!\n";
        let program = parse(input).unwrap();

        assert_eq!(program.state(program.entry()).name(), "A");
        assert!(!program.state(program.entry()).is_accepting());
        assert_eq!(
            action(&program, "A", Some("0")),
            Some(&Action {
                write: "1".into(),
                direction: Direction::Right,
                next: program.find("B").unwrap(),
            })
        );
        assert!(program.state(program.find("B").unwrap()).is_accepting());
        assert_eq!(program.transition_count(), 1);
    }

    #[test]
    fn test_parse_forward_and_self_references() {
        let input = "start\n  a b >middle\n  b b <start\nmiddle\n  a a >end\nend!\n";
        let program = parse(input).unwrap();

        let start = program.find("start").unwrap();
        assert_eq!(program.entry(), start);
        assert_eq!(action(&program, "start", Some("b")).unwrap().next, start);
        assert_eq!(
            action(&program, "start", Some("a")).unwrap().next,
            program.find("middle").unwrap()
        );
        assert_eq!(action(&program, "start", Some("b")).unwrap().direction, Direction::Left);
        assert_eq!(program.transition_count(), 3);
    }

    #[test]
    fn test_parse_undefined_state() {
        let input = "A\n  0 1 >B\n  1 0 >C\nB\n";
        let error = parse(input).unwrap_err();

        assert_eq!(
            error,
            TuringMachineError::UndefinedState {
                name: "C".into(),
                line: 3,
            }
        );
    }

    #[test]
    fn test_parse_undefined_state_is_fatal_even_with_syntax_errors() {
        let input = "A\n  garbage\n  0 1 >Nowhere\n";
        assert!(matches!(
            parse(input),
            Err(TuringMachineError::UndefinedState { .. })
        ));
    }

    #[test]
    fn test_parse_skips_malformed_lines() {
        let input = "A\n  0 1 B\n  1 1 >B\nB!\n";
        let program = parse(input).unwrap();

        assert_eq!(
            program.diagnostics(),
            [SyntaxError {
                line: 2,
                content: "  0 1 B".into(),
                reason: "unrecognized line".into(),
            }]
        );
        assert!(action(&program, "A", Some("0")).is_none());
        assert!(action(&program, "A", Some("1")).is_some());
        assert!(program.find("B").is_some());
    }

    #[test]
    fn test_parse_rejects_near_misses() {
        let input = "A \n A\nA! x\n 0 1 >A\n   0 1 >A\n  0  1 >A\n  0 1 > A\n  0 1 ^A\n  0 1 >A \nB-C\nA\n";
        let program = parse(input).unwrap();

        let lines: Vec<usize> = program.diagnostics().iter().map(|e| e.line).collect();
        assert_eq!(lines, (1..=10).collect::<Vec<_>>());
        assert_eq!(program.states().len(), 1);
        assert_eq!(program.transition_count(), 0);
    }

    #[test]
    fn test_parse_ignores_blank_lines() {
        let input = "\n\nA\n\n   \n  0 1 >A\n\t\nB!";
        let program = parse(input).unwrap();

        assert!(program.diagnostics().is_empty());
        assert_eq!(program.states().len(), 2);
        assert_eq!(program.transition_count(), 1);
    }

    #[test]
    fn test_parse_without_trailing_newline_and_crlf() {
        let program = parse("A\r\n  0 1 >B\r\nB!").unwrap();

        assert!(program.diagnostics().is_empty());
        assert!(action(&program, "A", Some("0")).is_some());
        assert!(program.state(program.find("B").unwrap()).is_accepting());
    }

    #[test]
    fn test_parse_duplicate_rule_last_wins() {
        let input = "A\n  0 1 >B\n  0 x <A\nB\n";
        let program = parse(input).unwrap();

        let rule = action(&program, "A", Some("0")).unwrap();
        assert_eq!(rule.write, "x");
        assert_eq!(rule.direction, Direction::Left);
        assert_eq!(rule.next, program.entry());
        assert_eq!(program.transition_count(), 1);
    }

    #[test]
    fn test_parse_redeclared_state_rebinds_name() {
        let input = "A\n  0 1 >B\nB\nB!\n  1 1 >A\n";
        let program = parse(input).unwrap();

        assert_eq!(program.states().len(), 3);
        let b = program.find("B").unwrap();
        assert_eq!(b.index(), 2);
        assert!(program.state(b).is_accepting());
        assert_eq!(action(&program, "A", Some("0")).unwrap().next, b);
        assert_eq!(program.state(StateId(1)).action_count(), 0);
    }

    #[test]
    fn test_parse_redeclared_entry_state_drops_its_rules() {
        let program = parse("A\n  0 1 >B\nB!\nA\n").unwrap();

        let entry = program.state(program.entry());
        assert_eq!(entry.name(), "A");
        assert_eq!(entry.action_count(), 0);
        assert_eq!(program.find("A"), Some(StateId(2)));
        assert_eq!(program.transition_count(), 0);
    }

    #[test]
    fn test_parse_shadowed_rules_are_never_resolved() {
        let program = parse("A\n  0 1 >Nowhere\nA!\n").unwrap();

        assert_eq!(program.states().len(), 2);
        assert_eq!(program.transition_count(), 0);
        assert!(program.state(program.find("A").unwrap()).is_accepting());
    }

    #[test]
    fn test_parse_rule_before_header() {
        let input = "  0 1 >A\nA!\n";
        let program = parse(input).unwrap();

        assert_eq!(program.diagnostics().len(), 1);
        assert_eq!(program.diagnostics()[0].line, 1);
        assert_eq!(
            program.diagnostics()[0].reason,
            "transition rule before any state header"
        );
        assert_eq!(program.transition_count(), 0);
    }

    #[test]
    fn test_parse_underscore_is_not_a_symbol() {
        let input = "A\n  _ 1 <A\n  1 _ >B\nB!\n";
        let program = parse(input).unwrap();

        let lines: Vec<usize> = program.diagnostics().iter().map(|e| e.line).collect();
        assert_eq!(lines, [2, 3]);
        assert_eq!(program.transition_count(), 0);
    }

    #[test]
    fn test_parse_multi_character_symbols() {
        let input = "A\n  10 abc >A\n";
        let program = parse(input).unwrap();

        let rule = action(&program, "A", Some("10")).unwrap();
        assert_eq!(rule.write, "abc");
        assert!(action(&program, "A", Some("1")).is_none());
    }

    #[test]
    fn test_parse_empty_program() {
        assert_eq!(parse("").unwrap_err(), TuringMachineError::EmptyProgram);
        assert_eq!(
            parse("\n  not a state\n").unwrap_err(),
            TuringMachineError::EmptyProgram
        );
    }

    #[test]
    fn test_parse_direction() {
        assert_eq!(parse_direction("<"), Some(Direction::Left));
        assert_eq!(parse_direction(">"), Some(Direction::Right));
        assert_eq!(parse_direction("R"), None);
    }
}
