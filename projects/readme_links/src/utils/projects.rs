use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

/// A GitHub repository referenced from README text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Project {
	pub name: String,
	pub url: String,
}

// ASCII classes on purpose: `\w` in the regex crate is Unicode-aware.
static GITHUB_REPO_LINK: LazyLock<Regex> = LazyLock::new(|| {
	Regex::new(r"github\.com/([A-Za-z0-9_-]+)/([A-Za-z0-9_-]+)")
		.unwrap_or_else(|err| panic!("invalid repository link pattern: {err}"))
});

/// Extracts every `github.com/<owner>/<repo>` occurrence, in text order.
///
/// Matches do not overlap and duplicates are kept.
pub fn extract_projects(readme: &str) -> Vec<Project> {
	GITHUB_REPO_LINK
		.captures_iter(readme)
		.map(|caps| {
			let owner = &caps[1];
			let repo = &caps[2];
			Project {
				name: repo.to_string(),
				url: format!("https://github.com/{owner}/{repo}"),
			}
		})
		.collect()
}

/// Keeps projects whose name contains `name`, ignoring case.
///
/// An empty `name` keeps everything.
pub fn filter_projects_by_name(projects: Vec<Project>, name: &str) -> Vec<Project> {
	if name.is_empty() {
		return projects;
	}

	let needle = name.to_lowercase();
	projects
		.into_iter()
		.filter(|project| project.name.to_lowercase().contains(&needle))
		.collect()
}

/// Strips the curly braces clients sometimes leave around the `name` query.
pub fn trim_name_query(raw: &str) -> &str {
	raw.trim_matches(|c| c == '{' || c == '}')
}

#[derive(Serialize)]
struct ProjectsEnvelope<'a> {
	projects: Vec<ProjectUrl<'a>>,
}

#[derive(Serialize)]
struct ProjectUrl<'a> {
	url: &'a str,
}

/// Renders `{"projects":[{"url":...},...]}`. Names are left out.
pub fn jsonify_projects(projects: &[Project]) -> Result<String, serde_json::Error> {
	let envelope = ProjectsEnvelope {
		projects: projects
			.iter()
			.map(|project| ProjectUrl { url: &project.url })
			.collect(),
	};

	serde_json::to_string(&envelope)
}
