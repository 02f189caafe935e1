//! Reading word replacement rules and resolving their chains.
//!
//! A rules file holds one `old -> new` rule per line. Rules compose: with
//! `a -> b` and `b -> c`, both `a` and `b` end up replaced by `c`. A rule
//! that would let a word eventually replace itself is rejected.
//!
//! Resolution runs in two tiers. Rules are first collected in a temporary
//! [`ChainedHashMap`] used for cycle detection and chain lookups; the
//! resolved rules are then committed to the backend the caller picked.

use tracing::{debug, info};

use crate::{
    chained_hashmap::ChainedHashMap,
    error::{ResolveError, Result},
    map::{AnyMap, Backend, Map},
};

/// Separator between the two sides of a rule
const ARROW: &str = "->";

/// Parses `old -> new` rules, one per line, skipping blank lines.
///
/// # Errors
///
/// Returns [`ResolveError::MalformedRule`] for a line without an arrow or
/// with an empty side.
pub fn parse_rules(text: &str) -> Result<Vec<(String, String)>, ResolveError> {
    let mut rules = Vec::new();
    for (index, line) in text.lines().enumerate() {
        if line.trim().is_empty() {
            continue;
        }
        let malformed = || ResolveError::MalformedRule {
            line: index.saturating_add(1),
            content: line.to_owned(),
        };
        let (old, new) = line.split_once(ARROW).ok_or_else(malformed)?;
        let (old, new) = (old.trim(), new.trim());
        if old.is_empty() || new.is_empty() {
            return Err(malformed());
        }
        rules.push((old.to_owned(), new.to_owned()));
    }
    Ok(rules)
}

/// Collects replacement rules, rejecting cycles as they arrive
#[derive(Debug, Clone, Default)]
pub struct RuleResolver {
    /// Word to the target it was last known to resolve to
    rules: ChainedHashMap<String, String>,
}

impl RuleResolver {
    /// Creates a resolver with no rules
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of distinct words with a rule
    #[must_use]
    pub const fn len(&self) -> usize {
        self.rules.len()
    }

    /// True when no rule was added
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Adds the rule `old -> new`.
    ///
    /// The rule is stored pointing at the end of the chain starting at
    /// `new`. Defining `old` a second time replaces its earlier rule.
    ///
    /// # Errors
    ///
    /// Returns [`ResolveError::Cycle`] if following `new` through the known
    /// rules leads back to `old`, including `old == new`. The rule is not
    /// recorded.
    pub fn add_rule(&mut self, old: &str, new: &str) -> Result<(), ResolveError> {
        let mut terminal = new;
        loop {
            if terminal == old {
                debug!(from = old, to = new, "replacement rule closes a cycle");
                return Err(ResolveError::Cycle { from: old.to_owned(), to: new.to_owned() });
            }
            match self.rules.get(terminal) {
                Some(next) => terminal = next.as_str(),
                None => break,
            }
        }

        let terminal = terminal.to_owned();
        debug!(from = old, to = new, terminal = %terminal, "adding replacement rule");
        self.rules.insert(old.to_owned(), terminal);
        Ok(())
    }

    /// Final replacement for `word`, if it has a rule
    #[must_use]
    pub fn resolve(&self, word: &str) -> Option<&str> {
        let mut target = self.rules.get(word)?;
        while let Some(next) = self.rules.get(target.as_str()) {
            target = next;
        }
        Some(target)
    }

    /// Points every rule at the end of its chain and commits the rules to
    /// a map of the chosen backend. The hash backend keeps the resolver's
    /// own table.
    #[must_use]
    pub fn finish(mut self, backend: Backend) -> AnyMap<String, String> {
        let resolved: Vec<(String, String)> = self
            .rules
            .iter()
            .filter_map(|(word, _)| Some((word.clone(), self.resolve(word)?.to_owned())))
            .collect();
        info!(rules = resolved.len(), %backend, "resolved replacement rules");

        match backend {
            Backend::Hash => {
                self.rules.extend(resolved);
                AnyMap::Hash(self.rules)
            }
            Backend::Tree | Backend::RedBlack => {
                let mut map = AnyMap::new(backend);
                for (word, target) in resolved {
                    map.insert(word, target);
                }
                map
            }
        }
    }
}

/// Resolves `rules` in order and commits them to a map of `backend`.
///
/// # Errors
///
/// Returns [`ResolveError::Cycle`] for the first rule closing a cycle; no
/// map is produced in that case.
pub fn resolve_rules<I, A, B>(
    rules: I,
    backend: Backend,
) -> Result<AnyMap<String, String>, ResolveError>
where
    I: IntoIterator<Item = (A, B)>,
    A: AsRef<str>,
    B: AsRef<str>,
{
    let mut resolver = RuleResolver::new();
    for (old, new) in rules {
        resolver.add_rule(old.as_ref(), new.as_ref())?;
    }
    Ok(resolver.finish(backend))
}
