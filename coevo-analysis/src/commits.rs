//! Commit classification
//!
//! Assigns each inspected commit a change category from an ordered rule table
//! and derives a breaking-change flag from its message. Both decisions are
//! pure functions of the commit's message and changed-file list.

use coevo_core::{ChangeCategory, CommitRecord};

use crate::git::CommitDetail;

/// Message keywords marking a commit as a likely breaking change
const BREAKING_KEYWORDS: &[&str] = &[
    "break",
    "breaking",
    "remove",
    "delete",
    "drop",
    "migrate",
    "migration",
    "incompatible",
    "deprecated",
];

/// How a single classification rule matches a commit
enum Rule {
    /// Any changed file whose path contains the fragment
    File(&'static str),
    /// The leading word of the message starts with one of the verbs
    Verb(&'static [&'static str]),
}

/// Ordered rule table; the first match wins. File-name patterns take
/// precedence over message verbs.
const CLASSIFICATION_RULES: &[(Rule, ChangeCategory)] = &[
    (Rule::File("structure.mps"), ChangeCategory::Structural),
    (Rule::File("editor.mps"), ChangeCategory::Presentation),
    (Rule::File("migration.mps"), ChangeCategory::Migration),
    (Rule::Verb(&["add", "new", "create"]), ChangeCategory::Addition),
    (Rule::Verb(&["remove", "delete", "drop"]), ChangeCategory::Removal),
];

/// Classify a commit from its message and changed-file list
pub fn classify_change(message: &str, files_changed: &[String]) -> ChangeCategory {
    let message = message.to_lowercase();
    let leading_verb = message.split_whitespace().next().unwrap_or("");
    let files: Vec<String> = files_changed.iter().map(|f| f.to_lowercase()).collect();

    for (rule, category) in CLASSIFICATION_RULES {
        let matched = match rule {
            Rule::File(fragment) => files.iter().any(|f| f.contains(fragment)),
            Rule::Verb(verbs) => verbs.iter().any(|verb| leading_verb.starts_with(verb)),
        };
        if matched {
            return *category;
        }
    }

    ChangeCategory::Modification
}

/// True when the message contains any breaking-change keyword,
/// case-insensitive
pub fn is_breaking_change(message: &str) -> bool {
    let message = message.to_lowercase();
    BREAKING_KEYWORDS
        .iter()
        .any(|keyword| message.contains(keyword))
}

/// Build the full record for one inspected commit
pub fn classify_commit(hash: &str, detail: CommitDetail) -> CommitRecord {
    let change_type = classify_change(&detail.message, &detail.files);
    let is_breaking = is_breaking_change(&detail.message);

    CommitRecord {
        hash: hash.to_string(),
        message: detail.message,
        author: detail.author,
        date: detail.date,
        files_changed: detail.files,
        change_type,
        is_breaking,
    }
}
