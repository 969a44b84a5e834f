//! Commit history views: grouping by author and filtering by changed path.
//!
//! Everything here is a pure function over fetched commits. Filters return
//! new collections and leave their input untouched, so a view can be
//! re-derived at any time from the fetched data.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Placeholder avatar used when a commit has no linked provider account.
pub const DEFAULT_AVATAR_URL: &str =
    "https://github.githubassets.com/images/modules/logos_page/GitHub-Mark.png";

/// A file touched by a commit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChangedFile {
    /// Repository-relative path.
    pub path: String,
    /// Provider change status (`added`, `modified`, `removed`, ...).
    #[serde(default)]
    pub status: String,
    /// Lines added.
    pub additions: u64,
    /// Lines deleted.
    pub deletions: u64,
}

/// Who made a commit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Author {
    /// Stable login or handle; the grouping key.
    pub login: String,
    /// Avatar image URL.
    pub avatar_url: String,
}

/// One fetched commit with its changed files.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Commit {
    /// Commit hash.
    pub sha: String,
    /// Full commit message.
    pub message: String,
    /// Author identity.
    pub author: Author,
    /// Author date.
    pub timestamp: DateTime<Utc>,
    /// Changed files in provider order.
    #[serde(default)]
    pub files: Vec<ChangedFile>,
}

impl Commit {
    /// First line of the message.
    #[must_use]
    pub fn summary(&self) -> &str {
        self.message.lines().next().unwrap_or("")
    }

    /// First seven bytes of the hash, or all of it when shorter or when
    /// byte seven is not a character boundary.
    #[must_use]
    pub fn short_sha(&self) -> &str {
        self.sha.get(..7).unwrap_or(&self.sha)
    }

    /// Returns `true` if any changed file path contains `needle`.
    ///
    /// `needle` must already be lowercase.
    fn touches_lowercase(&self, needle: &str) -> bool {
        self.files.iter().any(|file| file.path.to_lowercase().contains(needle))
    }
}

/// Commits of one author, in provider order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AuthorGroup {
    /// Author metadata from the first commit seen for this login.
    pub author: Author,
    /// This author's commits.
    pub commits: Vec<Commit>,
}

impl AuthorGroup {
    /// Summed additions and deletions over every commit in the group.
    #[must_use]
    pub fn total_changes(&self) -> (u64, u64) {
        self.commits.iter().flat_map(|c| &c.files).fold((0, 0), |(add, del), file| {
            (add + file.additions, del + file.deletions)
        })
    }
}

/// Groups commits by author login.
///
/// Authors appear in order of their first commit; each group keeps its
/// commits in their original relative order.
#[must_use]
pub fn group_by_author(commits: &[Commit]) -> Vec<AuthorGroup> {
    let mut groups: Vec<AuthorGroup> = Vec::new();
    for commit in commits {
        match groups.iter_mut().find(|g| g.author.login == commit.author.login) {
            Some(group) => group.commits.push(commit.clone()),
            None => groups.push(AuthorGroup {
                author: commit.author.clone(),
                commits: vec![commit.clone()],
            }),
        }
    }
    groups
}

/// Keeps commits that touch a path containing `substring`, case-insensitively.
///
/// Groups left without commits are dropped. An empty substring returns the
/// groups unchanged.
#[must_use]
pub fn filter_by_path(groups: &[AuthorGroup], substring: &str) -> Vec<AuthorGroup> {
    if substring.is_empty() {
        return groups.to_vec();
    }
    let needle = substring.to_lowercase();
    groups
        .iter()
        .filter_map(|group| {
            let commits: Vec<Commit> =
                group.commits.iter().filter(|c| c.touches_lowercase(&needle)).cloned().collect();
            (!commits.is_empty()).then(|| AuthorGroup { author: group.author.clone(), commits })
        })
        .collect()
}

/// Flat commit-list filter: author login and changed-file suffix.
///
/// Empty fields match everything.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommitFilter {
    /// Substring of the author login (case-sensitive).
    pub author: String,
    /// Suffix of any changed file path, such as `.rs` (case-insensitive).
    pub file_suffix: String,
}

impl CommitFilter {
    /// Returns `true` if `commit` passes both criteria.
    #[must_use]
    pub fn matches(&self, commit: &Commit) -> bool {
        let author_ok = self.author.is_empty() || commit.author.login.contains(&self.author);
        let suffix = self.file_suffix.to_lowercase();
        let file_ok = suffix.is_empty()
            || commit.files.iter().any(|f| f.path.to_lowercase().ends_with(&suffix));
        author_ok && file_ok
    }

    /// The commits that pass, in their original order.
    #[must_use]
    pub fn apply(&self, commits: &[Commit]) -> Vec<Commit> {
        commits.iter().filter(|c| self.matches(c)).cloned().collect()
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use chrono::TimeZone;

    pub(crate) fn commit(sha: &str, login: &str, files: &[&str]) -> Commit {
        Commit {
            sha: sha.into(),
            message: format!("change {sha}\n\nbody"),
            author: Author { login: login.into(), avatar_url: DEFAULT_AVATAR_URL.into() },
            timestamp: Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap(),
            files: files
                .iter()
                .map(|p| ChangedFile {
                    path: (*p).into(),
                    status: "modified".into(),
                    additions: 3,
                    deletions: 1,
                })
                .collect(),
        }
    }

    fn shas(group: &AuthorGroup) -> Vec<&str> {
        group.commits.iter().map(|c| c.sha.as_str()).collect()
    }

    #[test]
    fn groups_in_first_appearance_order() {
        let commits = [
            commit("1", "x", &["a"]),
            commit("2", "y", &["b"]),
            commit("3", "x", &["c"]),
            commit("4", "z", &["d"]),
        ];
        let groups = group_by_author(&commits);

        let logins: Vec<&str> = groups.iter().map(|g| g.author.login.as_str()).collect();
        assert_eq!(logins, ["x", "y", "z"]);
        assert_eq!(shas(&groups[0]), ["1", "3"]);
    }

    #[test]
    fn path_filter_keeps_only_matching_authors() {
        let commits = [commit("1", "x", &["a/b.ts"]), commit("2", "y", &["a/c/d.ts"])];
        let filtered = filter_by_path(&group_by_author(&commits), "c/");

        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].author.login, "y");
        assert_eq!(shas(&filtered[0]), ["2"]);
    }

    #[test]
    fn path_filter_is_case_insensitive_and_any_file() {
        let commits = [commit("1", "x", &["README.md", "Src/Lib.rs"])];
        let filtered = filter_by_path(&group_by_author(&commits), "src/lib");
        assert_eq!(shas(&filtered[0]), ["1"]);
    }

    #[test]
    fn empty_filter_is_a_no_op() {
        let commits = [commit("1", "x", &["a"]), commit("2", "y", &[])];
        let groups = group_by_author(&commits);
        assert_eq!(filter_by_path(&groups, ""), groups);
    }

    #[test]
    fn path_filter_is_idempotent_and_leaves_input_alone() {
        let commits =
            [commit("1", "x", &["a/b"]), commit("2", "x", &["c/d"]), commit("3", "y", &["c/e"])];
        let groups = group_by_author(&commits);
        let once = filter_by_path(&groups, "c/");
        let twice = filter_by_path(&once, "c/");

        assert_eq!(once, twice);
        assert_eq!(shas(&once[0]), ["2"]);
        assert_eq!(shas(&groups[0]), ["1", "2"]);
    }

    #[test]
    fn commit_without_files_never_matches_a_path() {
        let groups = group_by_author(&[commit("1", "x", &[])]);
        assert!(filter_by_path(&groups, "a").is_empty());
    }

    #[test]
    fn total_changes_sums_all_files() {
        let groups = group_by_author(&[commit("1", "x", &["a", "b"]), commit("2", "x", &["c"])]);
        assert_eq!(groups[0].total_changes(), (9, 3));
    }

    #[test]
    fn commit_filter_by_author_and_suffix() {
        let commits = [
            commit("1", "alice", &["src/main.RS"]),
            commit("2", "bob", &["docs/guide.md"]),
            commit("3", "alicia", &["web/app.ts"]),
        ];

        let by_author = CommitFilter { author: "ali".into(), ..CommitFilter::default() };
        assert_eq!(by_author.apply(&commits).len(), 2);

        let by_suffix = CommitFilter { file_suffix: ".rs".into(), ..CommitFilter::default() };
        assert_eq!(by_suffix.apply(&commits)[0].sha, "1");

        let both = CommitFilter { author: "ali".into(), file_suffix: ".md".into() };
        assert!(both.apply(&commits).is_empty());

        assert_eq!(CommitFilter::default().apply(&commits).len(), 3);
    }

    #[test]
    fn summary_and_short_sha() {
        let mut c = commit("0123456789abcdef", "x", &[]);
        assert_eq!(c.summary(), "change 0123456789abcdef");
        assert_eq!(c.short_sha(), "0123456");
        c.sha = "abc".into();
        assert_eq!(c.short_sha(), "abc");
    }

    #[test]
    fn short_sha_of_non_ascii_hash_does_not_split_a_character() {
        let mut c = commit("abcdeféé", "x", &[]);
        // 'é' spans bytes 6 and 7
        assert_eq!(c.short_sha(), "abcdeféé");
        c.sha = "ééééé".into();
        assert_eq!(c.short_sha(), "ééééé");
    }
}
