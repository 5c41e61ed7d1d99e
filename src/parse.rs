use std::str::FromStr;

use itertools::Itertools;
use tracing::trace;

use crate::{
    error::{Error, ParseError},
    Dfa,
};

/// Splits a comma separated list into its trimmed items. Empty items, which arise from stray
/// leading or trailing commas, are dropped.
fn split_items(list: &str) -> Vec<String> {
    list.split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(str::to_string)
        .collect()
}

/// Parses a line of the form `from, symbol -> target, target, ...`.
fn parse_transition(
    line: usize,
    content: &str,
) -> Result<(String, String, Vec<String>), ParseError> {
    let malformed = || ParseError::MalformedLine {
        line,
        content: content.to_string(),
    };
    let (source, targets) = content.split_once("->").ok_or_else(malformed)?;
    let (from, symbol) = split_items(source)
        .into_iter()
        .collect_tuple()
        .ok_or_else(malformed)?;
    Ok((from, symbol, split_items(targets)))
}

impl FromStr for Dfa<String, String> {
    type Err = Error;

    /// Parses a textual description of a DFA. The description consists of four directives,
    /// each on its own line, followed by one line per transition:
    /// ```text
    /// states: A, B
    /// alphabet: 0, 1
    /// initial: A
    /// accepting: B
    /// A, 0 -> B
    /// ```
    /// Directive names are case insensitive, blank lines and everything after a `#` are ignored.
    /// A transition line may list several targets separated by commas, which is rejected as
    /// non-deterministic by the validation that follows parsing.
    ///
    /// # Example
    /// ```
    /// use automata_min::Dfa;
    ///
    /// let dfa: Dfa<String, String> = "
    ///     states: even, odd
    ///     alphabet: a,
    ///     initial: even
    ///     accepting: odd
    ///     even, a -> odd
    ///     odd, a -> even
    /// ".parse().unwrap();
    /// assert!(dfa.accepts(&["a".to_string()]));
    /// ```
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut states = None;
        let mut alphabet = None;
        let mut initial = None;
        let mut accepting = None;
        let mut builder = Dfa::builder();

        for (number, raw) in s.lines().enumerate() {
            let line = number + 1;
            let content = raw.split('#').next().unwrap_or_default().trim();
            if content.is_empty() {
                continue;
            }
            if content.contains("->") {
                let (from, symbol, targets) = parse_transition(line, content)?;
                builder = builder.with_transition_targets(from, symbol, targets);
                continue;
            }

            let (directive, list) = content.split_once(':').ok_or_else(|| {
                ParseError::MalformedLine {
                    line,
                    content: content.to_string(),
                }
            })?;
            let directive = directive.trim().to_lowercase();
            let slot = match directive.as_str() {
                "states" => &mut states,
                "alphabet" | "inputs" => &mut alphabet,
                "initial" => &mut initial,
                "accepting" | "final" => &mut accepting,
                _ => {
                    return Err(ParseError::UnknownDirective {
                        line,
                        directive: directive.clone(),
                    }
                    .into())
                }
            };
            if slot.replace(split_items(list)).is_some() {
                return Err(ParseError::RepeatedDirective(directive).into());
            }
        }

        let states = states.ok_or(ParseError::MissingDirective("states"))?;
        let alphabet = alphabet.ok_or(ParseError::MissingDirective("alphabet"))?;
        let mut initial = initial.ok_or(ParseError::MissingDirective("initial"))?;
        let accepting = accepting.ok_or(ParseError::MissingDirective("accepting"))?;
        if initial.len() > 1 {
            return Err(ParseError::AmbiguousInitialState(initial).into());
        }
        trace!(
            "parsed description with {} states and {} symbols",
            states.len(),
            alphabet.len()
        );

        if let Some(q) = initial.pop() {
            builder = builder.with_initial(q);
        }
        Ok(builder
            .with_states(states)
            .with_alphabet(alphabet)
            .with_accepting(accepting)
            .build()?)
    }
}
