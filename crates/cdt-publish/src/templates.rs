//! Commit message, pull-request title, and pull-request body templates.
//!
//! Callers may override any of these per publish; the functions here
//! produce the defaults. Wording is load-bearing for reviewers who
//! triage the governance repo by PR title, so changes here should be
//! treated as a contract change.

use cdt_core::ArtifactKind;

/// Default commit message, also used as the default PR title.
///
/// `Add JSON Schema: property-home-credential.json` for a new file,
/// `Update ...` when the planner found the path already present.
pub fn commit_message(kind: ArtifactKind, file_name: &str, is_update: bool) -> String {
    let verb = if is_update { "Update" } else { "Add" };
    format!("{verb} {}: {file_name}", kind.label())
}

/// Default commit message for a vocabulary batch.
///
/// One item names the type; several only give the count.
pub fn batch_commit_message(names: &[String]) -> String {
    match names {
        [single] => format!("Add vocabulary type: {single}"),
        _ => format!("Add {} vocabulary types", names.len()),
    }
}

/// Default pull-request body.
///
/// Says whether the PR adds or updates the artifact, lists every file
/// it touches, and credits the publishing author so reviewers can
/// follow up without opening the commit.
pub fn pr_body(paths: &[String], is_update: bool, author_handle: &str) -> String {
    let verb = if is_update { "updates" } else { "adds" };
    let mut body = match paths {
        [single] => format!("This PR {verb} `{single}`."),
        _ => {
            let mut listing = format!("This PR {verb} {} files:\n", paths.len());
            for path in paths {
                listing.push_str(&format!("\n- `{path}`"));
            }
            listing
        }
    };
    body.push_str(&format!("\n\nPublished by @{author_handle}."));
    body
}

/// File name component of a repository-relative path.
pub fn file_name(path: &str) -> &str {
    path.rsplit('/').next().unwrap_or(path)
}
