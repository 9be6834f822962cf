//! Announcement renderer.

use super::text::{sanitize, truncate, weighted_length};
use super::TemplateError;
use crate::discovery::{CommitInfo, RepositoryCandidate};
use handlebars::{no_escape, Handlebars, Template};
use serde_json::{json, Value};

/// Layout of an announcement.
///
/// `description_line` is the description followed by a newline, or empty
/// when the repository has no description.
pub const DEFAULT_TEMPLATE: &str = "{{owner}}/{{name}} (★{{stars}}) ({{forks}} forks)\n\
{{description_line}}\n\
Last commit: {{commit_message}} by {{commit_author}}\n\
\n\
{{url}}\n";

/// Maximum description length before truncation.
pub const DESCRIPTION_LIMIT: usize = 180;

/// Twitter's post length limit.
pub const DEFAULT_MAX_LENGTH: usize = 280;

/// Creates a configured Handlebars registry.
///
/// The registry is configured with:
/// - No HTML escaping (posts are plain text)
/// - Strict mode (catches missing variables)
#[must_use]
pub fn create_handlebars_registry() -> Handlebars<'static> {
    let mut hbs = Handlebars::new();
    hbs.register_escape_fn(no_escape);
    hbs.set_strict_mode(true);
    hbs
}

/// Renders repository announcements.
pub struct MessageRenderer {
    handlebars: Handlebars<'static>,
    template: String,
    max_length: usize,
}

impl Default for MessageRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl MessageRenderer {
    /// Creates a renderer using [`DEFAULT_TEMPLATE`].
    #[must_use]
    pub fn new() -> Self {
        Self {
            handlebars: create_handlebars_registry(),
            template: DEFAULT_TEMPLATE.to_string(),
            max_length: DEFAULT_MAX_LENGTH,
        }
    }

    /// Creates a renderer using a custom template.
    ///
    /// # Errors
    ///
    /// Returns an error if the template does not compile.
    pub fn with_template(template: &str) -> Result<Self, TemplateError> {
        Template::compile(template)?;
        Ok(Self {
            template: template.to_string(),
            ..Self::new()
        })
    }

    /// Sets the maximum weighted message length.
    #[must_use]
    pub fn with_max_length(mut self, max_length: usize) -> Self {
        self.max_length = max_length;
        self
    }

    /// Returns the maximum weighted message length.
    #[must_use]
    pub fn max_length(&self) -> usize {
        self.max_length
    }

    /// Renders the announcement for a candidate and its latest commit.
    ///
    /// The description is cut to [`DESCRIPTION_LIMIT`] characters. If the
    /// message is still over the length limit, the description is shortened
    /// further and then dropped, after which the commit subject is shortened.
    ///
    /// # Errors
    ///
    /// Returns an error if rendering fails or the message cannot be made to
    /// fit.
    pub fn render(
        &self,
        repository: &RepositoryCandidate,
        commit: &CommitInfo,
    ) -> Result<String, TemplateError> {
        let description = repository
            .description
            .as_deref()
            .map(sanitize)
            .unwrap_or_default();
        let subject = sanitize(&commit.message);

        let mut description_budget = description.chars().count().min(DESCRIPTION_LIMIT);
        let mut subject_budget = subject.chars().count();

        loop {
            let message = self.render_parts(
                repository,
                commit,
                &fit(&description, description_budget),
                &fit(&subject, subject_budget),
            )?;
            let length = weighted_length(&message, &repository.html_url);
            if length <= self.max_length {
                return Ok(message);
            }

            // Wide characters weigh two, so shrink by half the overflow at a time.
            let overflow = ((length - self.max_length) / 2).max(1);
            if description_budget > 0 {
                description_budget = description_budget.saturating_sub(overflow);
            } else if subject_budget > 0 {
                subject_budget = subject_budget.saturating_sub(overflow);
            } else {
                return Err(TemplateError::TooLong {
                    length,
                    limit: self.max_length,
                });
            }
        }
    }

    fn render_parts(
        &self,
        repository: &RepositoryCandidate,
        commit: &CommitInfo,
        description: &str,
        subject: &str,
    ) -> Result<String, TemplateError> {
        let description_line = if description.is_empty() {
            String::new()
        } else {
            format!("{description}\n")
        };

        let data = json!({
            "owner": repository.owner,
            "name": repository.name,
            "full_name": repository.full_name,
            "stars": repository.stars,
            "forks": repository.forks,
            "url": repository.html_url,
            "description": description,
            "description_line": description_line,
            "commit_message": subject,
            "commit_author": commit.author_login,
            "commit_sha": commit.sha,
        });

        self.render_template(&data)
    }

    fn render_template(&self, data: &Value) -> Result<String, TemplateError> {
        Ok(self.handlebars.render_template(&self.template, data)?)
    }
}

fn fit(text: &str, budget: usize) -> String {
    if budget == 0 {
        String::new()
    } else {
        truncate(text, budget)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_repository() -> RepositoryCandidate {
        RepositoryCandidate {
            owner: "acme".to_string(),
            name: "vault".to_string(),
            full_name: "acme/vault".to_string(),
            stars: 15,
            forks: 3,
            html_url: "https://github.com/acme/vault".to_string(),
            description: Some("Minimal ERC-4626 vault.".to_string()),
            default_branch: "main".to_string(),
            private: false,
            pushed_at: None,
        }
    }

    fn sample_commit() -> CommitInfo {
        CommitInfo::new("abc123", "Fix rounding in withdraw", Some("alice".to_string()))
    }

    #[test]
    fn renders_golden_message() {
        let renderer = MessageRenderer::new();
        let message = renderer
            .render(&sample_repository(), &sample_commit())
            .unwrap();

        assert_eq!(
            message,
            "acme/vault (★15) (3 forks)\n\
             Minimal ERC-4626 vault.\n\
             \n\
             Last commit: Fix rounding in withdraw by alice\n\
             \n\
             https://github.com/acme/vault\n"
        );
    }

    #[test]
    fn omits_missing_description() {
        let mut repository = sample_repository();
        repository.description = None;

        let message = MessageRenderer::new()
            .render(&repository, &sample_commit())
            .unwrap();

        assert_eq!(
            message,
            "acme/vault (★15) (3 forks)\n\
             \n\
             Last commit: Fix rounding in withdraw by alice\n\
             \n\
             https://github.com/acme/vault\n"
        );
    }

    #[test]
    fn truncates_long_description() {
        let mut repository = sample_repository();
        repository.description = Some("d".repeat(200));

        let message = MessageRenderer::new()
            .with_max_length(10_000)
            .render(&repository, &sample_commit())
            .unwrap();

        let expected = format!("{}...\n", "d".repeat(180));
        assert!(message.contains(&expected));
    }

    #[test]
    fn sanitizes_user_text() {
        let mut repository = sample_repository();
        repository.description = Some("Line one\nLine two".to_string());
        let commit = CommitInfo::new("abc", "Tabs\there", Some("bob".to_string()));

        let message = MessageRenderer::new().render(&repository, &commit).unwrap();

        assert!(message.contains("Line one Line two\n"));
        assert!(message.contains("Last commit: Tabs here by bob"));
    }

    #[test]
    fn does_not_escape_html() {
        let mut repository = sample_repository();
        repository.description = Some("<b>bold</b> & 'quoted'".to_string());

        let message = MessageRenderer::new()
            .render(&repository, &sample_commit())
            .unwrap();

        assert!(message.contains("<b>bold</b> & 'quoted'"));
    }

    #[test]
    fn shortens_description_to_fit_limit() {
        let mut repository = sample_repository();
        repository.description = Some("x".repeat(180));

        let renderer = MessageRenderer::new().with_max_length(150);
        let message = renderer.render(&repository, &sample_commit()).unwrap();

        assert!(weighted_length(&message, &repository.html_url) <= 150);
        assert!(message.contains("...\n"));
        assert!(message.ends_with("https://github.com/acme/vault\n"));
    }

    #[test]
    fn drops_description_then_shortens_subject() {
        let mut repository = sample_repository();
        repository.description = Some("x".repeat(100));
        let commit = CommitInfo::new("abc", &"y".repeat(200), Some("alice".to_string()));

        let renderer = MessageRenderer::new().with_max_length(100);
        let message = renderer.render(&repository, &commit).unwrap();

        assert!(weighted_length(&message, &repository.html_url) <= 100);
        assert!(!message.contains('x'));
        assert!(message.contains("...by alice") || message.contains("... by alice"));
    }

    #[test]
    fn wide_subject_fits_weighted_limit() {
        let mut repository = sample_repository();
        repository.description = None;
        let commit = CommitInfo::new("abc", &"漢".repeat(400), Some("alice".to_string()));

        let message = MessageRenderer::new().render(&repository, &commit).unwrap();

        assert_eq!(weighted_length(&message, &repository.html_url), DEFAULT_MAX_LENGTH);
        assert!(message.chars().count() < DEFAULT_MAX_LENGTH);
        assert!(message.starts_with("acme/vault (★15)"));
    }

    #[test]
    fn long_ascii_subject_leaves_room_for_heading_star() {
        let mut repository = sample_repository();
        repository.description = None;
        let commit = CommitInfo::new("abc", &"y".repeat(400), Some("alice".to_string()));

        let message = MessageRenderer::new().render(&repository, &commit).unwrap();

        assert_eq!(weighted_length(&message, &repository.html_url), DEFAULT_MAX_LENGTH);
    }

    #[test]
    fn fails_when_message_cannot_fit() {
        let renderer = MessageRenderer::new().with_max_length(20);
        let result = renderer.render(&sample_repository(), &sample_commit());

        assert!(matches!(
            result,
            Err(TemplateError::TooLong { limit: 20, .. })
        ));
    }

    #[test]
    fn renders_custom_template() {
        let renderer =
            MessageRenderer::with_template("{{full_name}} got a commit from @{{commit_author}}")
                .unwrap();
        let message = renderer
            .render(&sample_repository(), &sample_commit())
            .unwrap();

        assert_eq!(message, "acme/vault got a commit from @alice");
    }

    #[test]
    fn rejects_invalid_template() {
        assert!(matches!(
            MessageRenderer::with_template("{{#if stars}}unclosed"),
            Err(TemplateError::RegistrationError(_))
        ));
    }

    #[test]
    fn strict_mode_rejects_unknown_variable() {
        let renderer = MessageRenderer::with_template("{{stargazers}}").unwrap();
        assert!(matches!(
            renderer.render(&sample_repository(), &sample_commit()),
            Err(TemplateError::RenderError(_))
        ));
    }
}
