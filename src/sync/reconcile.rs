use tracing::info;

use crate::github::{ContentEntry, FileDeletion, FileWrite, TemplateSyncApi};
use crate::templates::Template;

use super::SyncError;

/// A template file already present in the target repository
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExistingTemplateRecord {
    pub name: String,
    pub path: String,
    /// Content-identity token the contents API requires for deletion
    pub sha: String,
}

impl From<ContentEntry> for ExistingTemplateRecord {
    fn from(entry: ContentEntry) -> Self {
        Self {
            name: entry.name,
            path: entry.path,
            sha: entry.sha,
        }
    }
}

/// Deletes and writes for one branch, in execution order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReconcilePlan {
    pub deletions: Vec<FileDeletion>,
    pub writes: Vec<FileWrite>,
}

pub fn destination_path(destination_dir: &str, name: &str) -> String {
    let dir = destination_dir.trim_end_matches('/');
    if dir.is_empty() {
        name.to_string()
    } else {
        format!("{dir}/{name}")
    }
}

/// Existing records are matched to incoming templates by exact file name.
/// Every template gets a write whether or not something was deleted for it.
pub fn plan_reconciliation(
    existing: &[ExistingTemplateRecord],
    templates: &[Template],
    branch: &str,
    destination_dir: &str,
) -> ReconcilePlan {
    let deletions = existing
        .iter()
        .filter(|record| templates.iter().any(|t| t.name == record.name))
        .map(|record| FileDeletion {
            path: record.path.clone(),
            sha: record.sha.clone(),
            message: format!("Remove outdated {}", record.name),
            branch: branch.to_string(),
        })
        .collect();

    let writes = templates
        .iter()
        .map(|template| FileWrite {
            path: destination_path(destination_dir, &template.name),
            content: template.content.clone(),
            message: format!("Add {} template", template.name),
            branch: branch.to_string(),
        })
        .collect();

    ReconcilePlan { deletions, writes }
}

/// Paths touched by a completed reconciliation
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReconcileReport {
    pub deleted: Vec<String>,
    pub written: Vec<String>,
}

/// Run every deletion, then every write. A failure stops the run where it is;
/// commits already made stay on the branch.
pub async fn apply_plan(
    api: &dyn TemplateSyncApi,
    owner: &str,
    repo: &str,
    plan: &ReconcilePlan,
) -> Result<ReconcileReport, SyncError> {
    let mut report = ReconcileReport::default();

    for deletion in &plan.deletions {
        api.delete_file(owner, repo, deletion)
            .await
            .map_err(|source| SyncError::DeleteFile {
                path: deletion.path.clone(),
                branch: deletion.branch.clone(),
                source,
            })?;
        info!(path = %deletion.path, branch = %deletion.branch, "deleted existing template");
        report.deleted.push(deletion.path.clone());
    }

    for write in &plan.writes {
        api.create_file(owner, repo, write)
            .await
            .map_err(|source| SyncError::WriteFile {
                path: write.path.clone(),
                branch: write.branch.clone(),
                source,
            })?;
        info!(path = %write.path, branch = %write.branch, "wrote template");
        report.written.push(write.path.clone());
    }

    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::github::client::MockTemplateSyncApi;
    use crate::github::GitHubError;
    use mockall::Sequence;

    fn template(name: &str) -> Template {
        Template {
            name: name.to_string(),
            content: format!("contents of {name}"),
        }
    }

    fn record(name: &str, sha: &str) -> ExistingTemplateRecord {
        ExistingTemplateRecord {
            name: name.to_string(),
            path: format!(".github/{name}"),
            sha: sha.to_string(),
        }
    }

    #[test]
    fn test_destination_path() {
        assert_eq!(destination_path(".github", "a.md"), ".github/a.md");
        assert_eq!(destination_path(".github/", "a.md"), ".github/a.md");
        assert_eq!(destination_path("", "a.md"), "a.md");
    }

    #[test]
    fn test_no_existing_records_means_no_deletions() {
        let templates = vec![template("bug_report.md"), template("feature_request.md")];
        let plan = plan_reconciliation(&[], &templates, "octoherd/x", ".github");

        assert!(plan.deletions.is_empty());
        let paths: Vec<&str> = plan.writes.iter().map(|w| w.path.as_str()).collect();
        assert_eq!(paths, vec![".github/bug_report.md", ".github/feature_request.md"]);
        assert!(plan.writes.iter().all(|w| w.branch == "octoherd/x"));
    }

    #[test]
    fn test_only_name_matches_are_deleted() {
        let templates = vec![template("pull_request_template.md"), template("bug_report.md")];
        let existing = vec![
            record("pull_request_template.md", "sha-pr"),
            record("CODEOWNERS", "sha-owners"),
        ];

        let plan = plan_reconciliation(&existing, &templates, "octoherd/x", ".github");

        assert_eq!(plan.deletions.len(), 1);
        assert_eq!(plan.deletions[0].path, ".github/pull_request_template.md");
        assert_eq!(plan.deletions[0].sha, "sha-pr");
        // deleted file is still recreated
        assert_eq!(plan.writes.len(), 2);
        assert_eq!(plan.writes[0].path, ".github/pull_request_template.md");
        assert_eq!(plan.writes[0].content, "contents of pull_request_template.md");
    }

    #[test]
    fn test_name_match_is_exact() {
        let templates = vec![template("Bug_Report.md")];
        let existing = vec![record("bug_report.md", "sha")];
        let plan = plan_reconciliation(&existing, &templates, "b", ".github");
        assert!(plan.deletions.is_empty());
    }

    #[tokio::test]
    async fn test_deletions_run_before_writes() {
        let templates = vec![template("pull_request_template.md"), template("bug_report.md")];
        let existing = vec![record("pull_request_template.md", "sha-pr")];
        let plan = plan_reconciliation(&existing, &templates, "octoherd/x", ".github");

        let mut seq = Sequence::new();
        let mut api = MockTemplateSyncApi::new();
        api.expect_delete_file()
            .withf(|_, _, d| d.path == ".github/pull_request_template.md" && d.sha == "sha-pr")
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_, _, _| Ok(()));
        api.expect_create_file()
            .withf(|_, _, w| w.path == ".github/pull_request_template.md")
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_, _, _| Ok(()));
        api.expect_create_file()
            .withf(|_, _, w| w.path == ".github/bug_report.md")
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_, _, _| Ok(()));

        let report = apply_plan(&api, "octo-org", "widgets", &plan).await.unwrap();
        assert_eq!(report.deleted, vec![".github/pull_request_template.md"]);
        assert_eq!(
            report.written,
            vec![".github/pull_request_template.md", ".github/bug_report.md"]
        );
    }

    #[tokio::test]
    async fn test_write_failure_stops_remaining_writes() {
        let templates = vec![template("a.md"), template("b.md"), template("c.md")];
        let plan = plan_reconciliation(&[], &templates, "octoherd/x", ".github");

        let mut api = MockTemplateSyncApi::new();
        api.expect_create_file()
            .withf(|_, _, w| w.path == ".github/a.md")
            .times(1)
            .returning(|_, _, _| Ok(()));
        api.expect_create_file()
            .withf(|_, _, w| w.path == ".github/b.md")
            .times(1)
            .returning(|_, _, _| Err(GitHubError::NetworkError("connection reset".to_string())));
        api.expect_create_file()
            .withf(|_, _, w| w.path == ".github/c.md")
            .times(0);

        let err = apply_plan(&api, "octo-org", "widgets", &plan).await.unwrap_err();
        assert!(matches!(err, SyncError::WriteFile { ref path, .. } if path == ".github/b.md"));
    }
}
