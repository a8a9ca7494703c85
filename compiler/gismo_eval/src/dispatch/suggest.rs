//! "Did you mean" lists for failed dispatch.

use gismo_ir::Name;

use crate::{ScopeRef, SignatureKey, TypePattern};

const MAX_SUGGESTIONS: usize = 5;

struct Candidate {
    text: String,
    score: u8,
}

/// Up to five signatures of `operator` that the failed call may have meant.
///
/// Only signatures of the same arity are offered. For binary calls a
/// matching left tag scores 2 and a matching right tag 1; once anything
/// scores, zero-score entries are dropped. Ties sort alphabetically.
pub fn suggest_signatures(scope: &ScopeRef, operator: Name, operand_types: &[Name]) -> Vec<String> {
    let mut candidates: Vec<Candidate> = scope
        .signatures_for(operator)
        .iter()
        .filter(|key| key.arity() == operand_types.len())
        .filter_map(|key| score(key, operand_types))
        .collect();

    candidates.sort_by(|a, b| b.score.cmp(&a.score).then_with(|| a.text.cmp(&b.text)));

    let binary = operand_types.len() == 2;
    let any_relevant = candidates.iter().any(|c| c.score > 0);
    candidates
        .into_iter()
        .filter(|c| !(binary && any_relevant && c.score == 0))
        .take(MAX_SUGGESTIONS)
        .map(|c| c.text)
        .collect()
}

fn score(key: &SignatureKey, operand_types: &[Name]) -> Option<Candidate> {
    match (key.patterns.as_slice(), operand_types) {
        ([pattern], [_]) => Some(Candidate {
            text: format!("{} {pattern}", key.operator),
            score: 1,
        }),
        ([left, right], [user_left, user_right]) => {
            let matches = |pattern: &TypePattern, tag: Name| *pattern == TypePattern::Tag(tag);
            let mut score = 0;
            if matches(left, *user_left) {
                score += 2;
            }
            if matches(right, *user_right) {
                score += 1;
            }
            let text = match key.operator {
                Name::CALL => format!("{left}({right})"),
                Name::CALL_CURLY => format!("{left}{{{right}}}"),
                operator => format!("{left} {operator} {right}"),
            };
            Some(Candidate { text, score })
        }
        _ => None,
    }
}
