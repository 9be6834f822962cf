use async_trait::async_trait;
use chrono::{DateTime, TimeZone, Utc};
use repo_announcer::{
    AnnouncementHistory, CommitInfo, DiscoveryError, GitHubHost, PublishError, PublishedPost,
    Publisher, RepositoryCandidate, RepositoryHost, Runner, RunnerConfig, RunnerError,
};
use serde_json::json;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use tempfile::TempDir;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const EXPECTED_QUERY: &str =
    "pushed:2024-05-01T09:00:00Z..2024-05-01T12:00:00Z language:solidity";

const VAULT_ANNOUNCEMENT: &str = "acme/vault (★15) (3 forks)\n\
Minimal ERC-4626 vault.\n\
\n\
Last commit: Fix rounding in withdraw by alice\n\
\n\
https://github.com/acme/vault\n";

fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap()
}

fn candidate(owner: &str, name: &str, stars: u32) -> RepositoryCandidate {
    RepositoryCandidate {
        owner: owner.to_string(),
        name: name.to_string(),
        full_name: format!("{owner}/{name}"),
        stars,
        forks: 3,
        html_url: format!("https://github.com/{owner}/{name}"),
        description: Some("Minimal ERC-4626 vault.".to_string()),
        default_branch: "main".to_string(),
        private: false,
        pushed_at: None,
    }
}

#[derive(Default)]
struct FakeHost {
    candidates: Vec<RepositoryCandidate>,
    commits: HashMap<String, CommitInfo>,
    queries: Arc<Mutex<Vec<String>>>,
    lookups: Arc<Mutex<Vec<String>>>,
}

impl FakeHost {
    fn with_repository(mut self, candidate: RepositoryCandidate, author: Option<&str>) -> Self {
        if let Some(author) = author {
            self.commits.insert(
                candidate.full_name.clone(),
                CommitInfo::new(
                    "6dcb09b",
                    "Fix rounding in withdraw\n\nUse mulDivDown.",
                    Some(author.to_string()),
                ),
            );
        }
        self.candidates.push(candidate);
        self
    }
}

#[async_trait]
impl RepositoryHost for FakeHost {
    async fn search_repositories(
        &self,
        query: &str,
    ) -> Result<Vec<RepositoryCandidate>, DiscoveryError> {
        self.queries.lock().unwrap().push(query.to_string());
        Ok(self.candidates.clone())
    }

    async fn latest_commit(
        &self,
        owner: &str,
        name: &str,
        branch: &str,
    ) -> Result<CommitInfo, DiscoveryError> {
        let full_name = format!("{owner}/{name}");
        self.lookups.lock().unwrap().push(full_name.clone());
        self.commits
            .get(&full_name)
            .cloned()
            .ok_or_else(|| DiscoveryError::MissingCommit {
                repository: full_name,
                branch: branch.to_string(),
            })
    }
}

type PublishHook = Box<dyn Fn() + Send + Sync>;

#[derive(Default)]
struct FakePublisher {
    posts: Arc<Mutex<Vec<String>>>,
    fail_containing: Option<&'static str>,
    dry_run: bool,
    on_publish: Option<PublishHook>,
}

#[async_trait]
impl Publisher for FakePublisher {
    fn name(&self) -> &'static str {
        "fake"
    }

    fn is_dry_run(&self) -> bool {
        self.dry_run
    }

    async fn publish(&self, message: &str) -> Result<PublishedPost, PublishError> {
        if let Some(hook) = &self.on_publish {
            hook();
        }
        if self.fail_containing.is_some_and(|needle| message.contains(needle)) {
            return Err(PublishError::Rejected {
                status: 403,
                body: "duplicate content".to_string(),
            });
        }
        let mut posts = self.posts.lock().unwrap();
        posts.push(message.to_string());
        Ok(PublishedPost {
            id: Some(posts.len().to_string()),
        })
    }
}

fn runner(config: RunnerConfig, host: FakeHost, publisher: FakePublisher) -> Runner {
    Runner::with_clients(config, Box::new(host), Box::new(publisher)).unwrap()
}

#[tokio::test]
async fn popular_repository_is_announced_once() {
    let host = FakeHost::default()
        .with_repository(candidate("acme", "vault", 15), Some("alice"))
        .with_repository(candidate("bob", "toy", 5), Some("bob"));
    let queries = host.queries.clone();
    let publisher = FakePublisher::default();
    let posts = publisher.posts.clone();

    let summary = runner(RunnerConfig::default(), host, publisher)
        .run_at(now())
        .await
        .unwrap();

    assert_eq!(*queries.lock().unwrap(), vec![EXPECTED_QUERY.to_string()]);
    assert_eq!(*posts.lock().unwrap(), vec![VAULT_ANNOUNCEMENT.to_string()]);
    assert_eq!(summary.candidates_discovered, 2);
    assert_eq!(summary.published, 1);
    assert_eq!(summary.rejected, 1);
    assert!(summary.all_success());
}

#[tokio::test]
async fn every_candidate_gets_a_commit_lookup() {
    let host = FakeHost::default()
        .with_repository(candidate("bob", "toy", 5), Some("bob"))
        .with_repository(candidate("acme", "vault", 15), Some("alice"));
    let lookups = host.lookups.clone();

    runner(RunnerConfig::default(), host, FakePublisher::default())
        .run_at(now())
        .await
        .unwrap();

    assert_eq!(
        *lookups.lock().unwrap(),
        vec!["bob/toy".to_string(), "acme/vault".to_string()]
    );
}

#[tokio::test]
async fn unresolved_commit_is_never_published() {
    let host = FakeHost::default()
        .with_repository(candidate("acme", "ghost", 500), None)
        .with_repository(candidate("acme", "vault", 15), Some("alice"));
    let publisher = FakePublisher::default();
    let posts = publisher.posts.clone();

    let summary = runner(RunnerConfig::default(), host, publisher)
        .run_at(now())
        .await
        .unwrap();

    assert_eq!(*posts.lock().unwrap(), vec![VAULT_ANNOUNCEMENT.to_string()]);
    assert_eq!(summary.lookup_failures, 1);
    assert_eq!(summary.failures(), 1);
    assert_eq!(summary.published, 1);
    assert!(summary.has_failures());
}

#[tokio::test]
async fn private_and_unlinked_repositories_are_rejected() {
    let mut private = candidate("acme", "secret", 100);
    private.private = true;
    let host = FakeHost::default()
        .with_repository(private, Some("alice"))
        .with_repository(candidate("acme", "anon", 100), Some(""));
    let publisher = FakePublisher::default();
    let posts = publisher.posts.clone();

    let summary = runner(RunnerConfig::default(), host, publisher)
        .run_at(now())
        .await
        .unwrap();

    assert!(posts.lock().unwrap().is_empty());
    assert_eq!(summary.rejected, 2);
    assert!(!summary.has_failures());
}

#[tokio::test]
async fn publish_failure_does_not_stop_the_run() {
    let host = FakeHost::default()
        .with_repository(candidate("acme", "first", 20), Some("alice"))
        .with_repository(candidate("acme", "vault", 15), Some("alice"));
    let publisher = FakePublisher {
        fail_containing: Some("acme/first"),
        ..FakePublisher::default()
    };
    let posts = publisher.posts.clone();

    let summary = runner(RunnerConfig::default(), host, publisher)
        .run_at(now())
        .await
        .unwrap();

    assert_eq!(*posts.lock().unwrap(), vec![VAULT_ANNOUNCEMENT.to_string()]);
    assert_eq!(summary.publish_failures, 1);
    assert_eq!(summary.published, 1);
}

#[tokio::test]
async fn oversized_message_is_a_format_failure() {
    let host = FakeHost::default().with_repository(candidate("acme", "vault", 15), Some("alice"));
    let publisher = FakePublisher::default();
    let posts = publisher.posts.clone();
    let config = RunnerConfig::default().with_max_length(10);

    let summary = runner(config, host, publisher).run_at(now()).await.unwrap();

    assert!(posts.lock().unwrap().is_empty());
    assert_eq!(summary.format_failures, 1);
}

#[tokio::test]
async fn history_skips_repositories_announced_in_window() {
    let dir = TempDir::new().unwrap();
    let history_path = dir.path().join("announced.json");
    let config = RunnerConfig::default().with_history_path(history_path.clone());

    let first = FakePublisher::default();
    let first_posts = first.posts.clone();
    let host = FakeHost::default().with_repository(candidate("acme", "vault", 15), Some("alice"));
    let summary = runner(config.clone(), host, first)
        .run_at(now())
        .await
        .unwrap();
    assert_eq!(summary.published, 1);
    assert_eq!(first_posts.lock().unwrap().len(), 1);

    let history = AnnouncementHistory::load(&history_path).unwrap();
    assert!(history.announced_since("acme/vault", now()));

    let second = FakePublisher::default();
    let second_posts = second.posts.clone();
    let host = FakeHost::default().with_repository(candidate("acme", "vault", 15), Some("alice"));
    let lookups = host.lookups.clone();
    let later = now() + chrono::Duration::minutes(30);
    let summary = runner(config, host, second).run_at(later).await.unwrap();

    assert_eq!(summary.skipped, 1);
    assert_eq!(summary.published, 0);
    assert!(second_posts.lock().unwrap().is_empty());
    assert!(lookups.lock().unwrap().is_empty());
}

#[tokio::test]
async fn unsaved_history_is_reported_as_failure() {
    let dir = TempDir::new().unwrap();
    let state_dir = dir.path().join("state");
    let history_path = state_dir.join("announced.json");
    let config = RunnerConfig::default().with_history_path(history_path.clone());
    let host = FakeHost::default().with_repository(candidate("acme", "vault", 15), Some("alice"));
    // A regular file where the history directory should be makes the save fail.
    let publisher = FakePublisher {
        on_publish: Some(Box::new(move || {
            std::fs::write(&state_dir, "not a directory").unwrap();
        })),
        ..FakePublisher::default()
    };

    let summary = runner(config, host, publisher).run_at(now()).await.unwrap();

    assert_eq!(summary.published, 1);
    assert_eq!(summary.history_failures, 1);
    assert!(summary.has_failures());
    assert!(!history_path.exists());
}

#[tokio::test]
async fn dry_run_previews_without_history() {
    let dir = TempDir::new().unwrap();
    let history_path = dir.path().join("announced.json");
    let config = RunnerConfig::default()
        .with_history_path(history_path.clone())
        .with_dry_run(true);
    let host = FakeHost::default().with_repository(candidate("acme", "vault", 15), Some("alice"));
    let publisher = FakePublisher {
        dry_run: true,
        ..FakePublisher::default()
    };
    let posts = publisher.posts.clone();

    let summary = runner(config, host, publisher).run_at(now()).await.unwrap();

    assert!(summary.dry_run);
    assert_eq!(summary.previewed, 1);
    assert_eq!(summary.published, 0);
    assert_eq!(*posts.lock().unwrap(), vec![VAULT_ANNOUNCEMENT.to_string()]);
    assert!(!history_path.exists());
}

#[tokio::test]
async fn concurrent_lookups_keep_search_order() {
    let mut host = FakeHost::default();
    for i in 0..8 {
        host = host.with_repository(candidate("acme", &format!("repo{i}"), 50), Some("alice"));
    }
    let publisher = FakePublisher::default();
    let posts = publisher.posts.clone();
    let config = RunnerConfig::default().with_concurrency(4);

    let summary = runner(config, host, publisher).run_at(now()).await.unwrap();

    assert_eq!(summary.published, 8);
    let posts = posts.lock().unwrap();
    for (i, post) in posts.iter().enumerate() {
        assert!(post.starts_with(&format!("acme/repo{i} ")), "post {i}: {post}");
    }
}

#[tokio::test]
async fn invalid_window_aborts_run() {
    let config = RunnerConfig::new("solidity", "three hours");
    let result = runner(config, FakeHost::default(), FakePublisher::default())
        .run_at(now())
        .await;

    assert!(matches!(result, Err(RunnerError::Window(_))));
}

#[tokio::test]
async fn search_failure_aborts_run() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/search/repositories"))
        .respond_with(ResponseTemplate::new(422).set_body_json(json!({
            "message": "Validation Failed",
            "documentation_url": "https://docs.github.com/v3/search"
        })))
        .mount(&server)
        .await;

    let host = GitHubHost::new(None, Some(&server.uri())).unwrap();
    let publisher = FakePublisher::default();
    let posts = publisher.posts.clone();
    let runner =
        Runner::with_clients(RunnerConfig::default(), Box::new(host), Box::new(publisher))
            .unwrap();

    let result = runner.run_at(now()).await;

    assert!(matches!(result, Err(RunnerError::Discovery(_))));
    assert!(posts.lock().unwrap().is_empty());
}
