// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! Tab completion: the provider registry, candidate collection, the shared fragment
//! (longest common prefix) computation, and the policy that decides what pressing Tab
//! does for a given number of candidates.

use std::{fmt::{Debug, Formatter},
          sync::Arc};

use miette::Diagnostic;
use thiserror::Error;

use crate::{char_len, char_slice, get_last_token, has_trailing_whitespace, tokenize};

#[derive(Debug, Error, Diagnostic)]
pub enum CompletionError {
    /// The input could not be split into shell tokens.
    #[error("can't tokenize input with unbalanced quotes: {input:?}")]
    UnbalancedQuotes { input: String },

    /// A provider failed. Its candidates are skipped, the other providers still run.
    #[error("autocomplete provider #{index} failed: {message}")]
    Provider { index: usize, message: String },
}

/// A completion provider. It receives the index of the token being completed, the full
/// token list, and the extra arguments that were bound when it was registered.
pub type AutocompleteFn =
    dyn Fn(usize, &[String], &[String]) -> miette::Result<Vec<String>> + Send + Sync;

/// Providers are registered and unregistered by reference identity
/// ([`Arc::ptr_eq`]), so keep a clone of the [Arc] around to remove it later.
pub type SafeAutocompleteFn = Arc<AutocompleteFn>;

/// Wraps a closure as a [`SafeAutocompleteFn`]. The closure's argument types are
/// inferred from the bound, so they don't have to be spelled out.
pub fn create_autocomplete_fn<F>(handler_fn: F) -> SafeAutocompleteFn
where
    F: Fn(usize, &[String], &[String]) -> miette::Result<Vec<String>>
        + Send
        + Sync
        + 'static,
{
    Arc::new(handler_fn)
}

#[derive(Clone)]
pub struct AutocompleteHandler {
    pub handler_fn: SafeAutocompleteFn,
    pub args: Vec<String>,
}

impl Debug for AutocompleteHandler {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AutocompleteHandler")
            .field("args", &self.args)
            .finish_non_exhaustive()
    }
}

/// Ordered list of providers. Insertion order is invocation order.
#[derive(Debug, Clone, Default)]
pub struct AutocompleteRegistry {
    pub handlers: Vec<AutocompleteHandler>,
}

impl AutocompleteRegistry {
    pub fn add(&mut self, handler_fn: SafeAutocompleteFn, args: Vec<String>) {
        self.handlers.push(AutocompleteHandler { handler_fn, args });
    }

    /// Removes the first handler that is the same [Arc] as `handler_fn`. Returns
    /// `false` if it wasn't registered.
    pub fn remove(&mut self, handler_fn: &SafeAutocompleteFn) -> bool {
        let maybe_index = self
            .handlers
            .iter()
            .position(|it| Arc::ptr_eq(&it.handler_fn, handler_fn));
        match maybe_index {
            Some(index) => {
                self.handlers.remove(index);
                true
            }
            None => false,
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool { self.handlers.is_empty() }

    #[must_use]
    pub fn len(&self) -> usize { self.handlers.len() }
}

/// Tokenizes `text`, works out which token is being completed, asks every provider for
/// candidates, and keeps the ones that start with the partially typed token.
///
/// - Blank text: token index 0, nothing typed yet.
/// - Text ending in unescaped whitespace: a new token at index `tokens.len()`.
/// - Otherwise: the last token, at index `tokens.len() - 1`.
///
/// A provider that fails is logged and contributes no candidates. If the text can't be
/// tokenized at all, there are no candidates.
#[must_use]
pub fn collect_candidates(handlers: &[AutocompleteHandler], text: &str) -> Vec<String> {
    let tokens = match tokenize(text) {
        Ok(tokens) => tokens,
        Err(error) => {
            // % is Display, ? is Debug.
            tracing::warn!(message = "Skipping completion", error = %error);
            return vec![];
        }
    };

    let (index, expr) = if text.trim().is_empty() {
        (0, String::new())
    } else if has_trailing_whitespace(text) {
        (tokens.len(), String::new())
    } else {
        let index = tokens.len().saturating_sub(1);
        (index, tokens.get(index).cloned().unwrap_or_default())
    };

    let mut acc = vec![];
    for (handler_index, handler) in handlers.iter().enumerate() {
        match (handler.handler_fn)(index, &tokens, &handler.args) {
            Ok(candidates) => acc.extend(candidates),
            Err(report) => {
                let error = CompletionError::Provider {
                    index: handler_index,
                    message: report.to_string(),
                };
                // % is Display, ? is Debug.
                tracing::warn!(message = "Autocomplete error", error = %error);
            }
        }
    }

    acc.retain(|candidate| candidate.starts_with(expr.as_str()));
    acc
}

/// Grows `fragment` one character at a time for as long as the longer prefix is shared
/// by every candidate, and returns the longest such prefix. Returns [None] if a
/// candidate doesn't even start with `fragment`.
#[must_use]
pub fn get_shared_fragment(fragment: &str, candidates: &[String]) -> Option<String> {
    if candidates
        .iter()
        .any(|candidate| !candidate.starts_with(fragment))
    {
        return None;
    }

    let Some(shortest_len) = candidates.iter().map(|it| char_len(it)).min() else {
        return Some(fragment.to_string());
    };

    let mut acc = fragment.to_string();
    let mut acc_len = char_len(&acc);
    while acc_len < shortest_len {
        let Some(next_char) = candidates[0].chars().nth(acc_len) else {
            break;
        };
        acc.push(next_char);
        if candidates.iter().all(|it| it.starts_with(acc.as_str())) {
            acc_len += 1;
        } else {
            acc.pop();
            break;
        }
    }

    Some(acc)
}

/// What pressing Tab should do, given the candidates for the input left of the cursor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CompletionAction {
    /// Nothing to do (no candidates, and the cursor already follows whitespace).
    None,
    /// No candidates: start a new token.
    InsertSpace,
    /// Exactly one candidate: insert the rest of it, then a space.
    InsertUnique(String),
    /// A few candidates: insert the rest of the shared fragment (if it is longer than
    /// what has been typed), then list all the candidates.
    InsertAndList {
        maybe_insert: Option<String>,
        candidates: Vec<String>,
    },
    /// Too many candidates: ask before listing them.
    ConfirmThenList(Vec<String>),
}

/// Applies the tab completion policy. `input_fragment` is the input left of the cursor.
/// The candidates are sorted before the policy is applied.
#[must_use]
pub fn plan_completion(
    input_fragment: &str,
    mut candidates: Vec<String>,
    max_entries: usize,
) -> CompletionAction {
    candidates.sort();

    let last_token = get_last_token(input_fragment);
    let typed_len = char_len(&last_token);
    let remainder_of = |it: &str| char_slice(it, typed_len, usize::MAX).to_string();

    match candidates.len() {
        0 if has_trailing_whitespace(input_fragment) => CompletionAction::None,
        0 => CompletionAction::InsertSpace,
        1 => CompletionAction::InsertUnique(format!("{} ", remainder_of(&candidates[0]))),
        count if count <= max_entries => {
            let maybe_insert = get_shared_fragment(&last_token, &candidates)
                .filter(|shared| char_len(shared) > typed_len)
                .map(|shared| remainder_of(&shared));
            CompletionAction::InsertAndList {
                maybe_insert,
                candidates,
            }
        }
        _ => CompletionAction::ConfirmThenList(candidates),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(it: &[&str]) -> Vec<String> { it.iter().map(ToString::to_string).collect() }

    fn fixed_provider(candidates: &'static [&'static str]) -> SafeAutocompleteFn {
        create_autocomplete_fn(move |_, _, _| Ok(strings(candidates)))
    }

    #[test]
    fn test_collect_candidates_filters_by_typed_prefix() {
        let mut registry = AutocompleteRegistry::default();
        registry.add(fixed_provider(&["cd", "cat"]), vec![]);
        pretty_assertions::assert_eq!(
            collect_candidates(&registry.handlers, "c"),
            strings(&["cd", "cat"])
        );

        registry.add(fixed_provider(&["cp", "ls"]), vec![]);
        pretty_assertions::assert_eq!(
            collect_candidates(&registry.handlers, "c"),
            strings(&["cd", "cat", "cp"])
        );
    }

    #[test]
    fn test_collect_candidates_passes_index_tokens_and_args() {
        let seen = Arc::new(crate::StdMutex::new(vec![]));
        let seen_clone = seen.clone();
        let provider: SafeAutocompleteFn = create_autocomplete_fn(move |index, tokens, args| {
            seen_clone
                .lock()
                .unwrap()
                .push((index, tokens.to_vec(), args.to_vec()));
            Ok(vec![])
        });
        let mut registry = AutocompleteRegistry::default();
        registry.add(provider, strings(&["extra"]));

        drop(collect_candidates(&registry.handlers, ""));
        drop(collect_candidates(&registry.handlers, "git "));
        drop(collect_candidates(&registry.handlers, "git co"));

        let seen = seen.lock().unwrap();
        pretty_assertions::assert_eq!(seen[0], (0, vec![], strings(&["extra"])));
        pretty_assertions::assert_eq!(seen[1], (1, strings(&["git"]), strings(&["extra"])));
        pretty_assertions::assert_eq!(
            seen[2],
            (1, strings(&["git", "co"]), strings(&["extra"]))
        );
    }

    #[test]
    fn test_failing_provider_does_not_abort_the_others() {
        let mut registry = AutocompleteRegistry::default();
        registry.add(fixed_provider(&["echo"]), vec![]);
        registry.add(
            create_autocomplete_fn(|_, _, _| miette::bail!("provider exploded")),
            vec![],
        );
        registry.add(fixed_provider(&["exit"]), vec![]);

        pretty_assertions::assert_eq!(
            collect_candidates(&registry.handlers, "e"),
            strings(&["echo", "exit"])
        );
    }

    #[test]
    fn test_collect_candidates_with_unbalanced_quotes_is_empty() {
        let mut registry = AutocompleteRegistry::default();
        registry.add(fixed_provider(&["'abc"]), vec![]);
        assert!(collect_candidates(&registry.handlers, "echo 'ab").is_empty());
    }

    #[test]
    fn test_registry_removes_by_identity_first_match_only() {
        let provider = fixed_provider(&["a"]);
        let other = fixed_provider(&["a"]);
        let mut registry = AutocompleteRegistry::default();
        registry.add(provider.clone(), vec![]);
        registry.add(provider.clone(), vec![]);

        assert!(!registry.remove(&other));
        assert_eq!(registry.len(), 2);
        assert!(registry.remove(&provider));
        assert_eq!(registry.len(), 1);
        assert!(registry.remove(&provider));
        assert!(registry.is_empty());
    }

    #[test]
    fn test_get_shared_fragment() {
        assert_eq!(
            get_shared_fragment("c", &strings(&["cd", "cat", "cp"])),
            Some("c".to_string())
        );
        assert_eq!(
            get_shared_fragment("ca", &strings(&["cat", "car"])),
            Some("ca".to_string())
        );
        assert_eq!(
            get_shared_fragment("c", &strings(&["cat", "cats"])),
            Some("cat".to_string())
        );
        assert_eq!(
            get_shared_fragment("", &strings(&["checkout", "cherry-pick"])),
            Some("che".to_string())
        );
        assert_eq!(get_shared_fragment("x", &strings(&["cat", "xyz"])), None);
    }

    #[test]
    fn test_plan_completion_by_candidate_count() {
        assert_eq!(plan_completion("foo", vec![], 10), CompletionAction::InsertSpace);
        assert_eq!(plan_completion("foo ", vec![], 10), CompletionAction::None);
        assert_eq!(
            plan_completion("git ch", strings(&["checkout"]), 10),
            CompletionAction::InsertUnique("eckout ".to_string())
        );
        assert_eq!(
            plan_completion("git ch", strings(&["cherry-pick", "checkout"]), 10),
            CompletionAction::InsertAndList {
                maybe_insert: Some("e".to_string()),
                candidates: strings(&["checkout", "cherry-pick"]),
            }
        );
        assert_eq!(
            plan_completion("c", strings(&["cp", "cd"]), 10),
            CompletionAction::InsertAndList {
                maybe_insert: None,
                candidates: strings(&["cd", "cp"]),
            }
        );
        assert_eq!(
            plan_completion("", strings(&["b", "a", "c"]), 2),
            CompletionAction::ConfirmThenList(strings(&["a", "b", "c"]))
        );
    }
}
