use super::Client;
use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use url::Url;

pub const PROJECTS_PATH: &str = "/api_2/projects";

/// `[owner/]name` as typed on the command line.
#[derive(Debug, PartialEq, Eq)]
pub struct ProjectRef<'a> {
    pub owner: Option<&'a str>,
    pub name: &'a str,
}

impl<'a> ProjectRef<'a> {
    /// Without an explicit owner the configured `username`, if any, is used.
    pub fn parse(input: &'a str, default_owner: Option<&'a str>) -> Self {
        let (owner, name) = match input.split_once('/') {
            Some((owner, name)) => (Some(owner), name),
            None => (default_owner, input),
        };

        Self {
            owner: owner.filter(|o| !o.is_empty()),
            name,
        }
    }
}

/// The service hands out numeric ids, older deployments strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ProjectId {
    Number(i64),
    Text(String),
}

#[derive(Debug, Deserialize)]
pub struct Project {
    pub id: ProjectId,
    pub name: String,
}

#[derive(Debug, Deserialize)]
struct ProjectEntry {
    project: Project,
}

#[derive(Debug, Deserialize)]
struct Projects {
    projects: Vec<ProjectEntry>,
}

impl Projects {
    fn into_map(self) -> HashMap<String, Project> {
        self.projects
            .into_iter()
            .map(|entry| (entry.project.name.clone(), entry.project))
            .collect()
    }
}

pub fn listing_url(endpoint: &Url, owner: Option<&str>) -> Result<Url> {
    let mut url = endpoint.join(PROJECTS_PATH)?;

    if let Some(owner) = owner {
        url.query_pairs_mut().append_pair("owner", owner);
    }

    Ok(url)
}

impl<'a> Client<'a> {
    pub async fn get_projects(&self, owner: Option<&str>) -> Result<HashMap<String, Project>> {
        let url = listing_url(self.http_client.endpoint().await?, owner)?;

        let projects: Projects = self.http_client.get(url).await?;

        Ok(projects.into_map())
    }

    pub async fn get_project_id(&self, name: &str) -> Result<ProjectId> {
        let project_ref = ProjectRef::parse(name, self.settings.get("username"));

        self.get_projects(project_ref.owner)
            .await?
            .remove(project_ref.name)
            .map(|project| project.id)
            .ok_or_else(|| Error::NotFound(format!("COPR project '{name}' not found.")))
    }
}
