use super::project::ProjectId;
use super::Client;
use crate::error::{Error, Result};
use directories::BaseDirs;
use reqwest::{header, multipart, StatusCode};
use serde::Serialize;
use std::path::PathBuf;
use tracing::info;

pub const BUILDS_PATH: &str = "/api_2/builds";

pub const SRPM_MIME_TYPE: &str = "application/x-rpm";

/// The `metadata` field of a build upload. Chroots and network access are
/// left to the project defaults.
#[derive(Debug, Serialize)]
pub struct BuildMetadata {
    pub project_id: ProjectId,
    pub chroots: Vec<String>,
    pub enable_net: bool,
}

impl BuildMetadata {
    pub fn new(project_id: ProjectId) -> Self {
        Self {
            project_id,
            chroots: Vec::new(),
            enable_net: false,
        }
    }
}

/// Expands a leading `~` and makes the path absolute.
pub fn normalize_srpm_path(path: &str) -> std::io::Result<PathBuf> {
    let home = BaseDirs::new().map(|dirs| dirs.home_dir().to_path_buf());

    let expanded = match (path.strip_prefix('~'), home) {
        (Some(rest), Some(home)) if rest.is_empty() || rest.starts_with('/') => {
            home.join(rest.trim_start_matches('/'))
        }
        _ => PathBuf::from(path),
    };

    Ok(std::env::current_dir()?.join(expanded))
}

impl<'a> Client<'a> {
    /// Uploads `srpm` to `project` and returns the url of the new build.
    pub async fn build(&self, project: &str, srpm: &str) -> Result<String> {
        let srpm_path = normalize_srpm_path(srpm)?;
        if !srpm_path.exists() {
            return Err(Error::NotFound(format!("SRPM {srpm} not found.")));
        }

        let srpm_name = srpm_path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();

        let metadata = BuildMetadata::new(self.get_project_id(project).await?);

        // The file stays open until the upload below has been sent.
        let srpm_file = tokio::fs::File::open(&srpm_path).await?;
        let srpm_length = srpm_file.metadata().await?.len();

        let srpm_part = multipart::Part::stream_with_length(srpm_file, srpm_length)
            .file_name(srpm_name.clone())
            .mime_str(SRPM_MIME_TYPE)?;

        let form = multipart::Form::new()
            .part("srpm", srpm_part)
            .text("metadata", serde_json::to_string(&metadata)?);

        let url = self.http_client.url(BUILDS_PATH).await?;
        let response = self.http_client.post_multipart(url, form).await?;

        if response.status() != StatusCode::CREATED {
            return Err(Error::Build {
                srpm: srpm_name,
                status: response.status().as_u16(),
            });
        }

        let location = response
            .headers()
            .get(header::LOCATION)
            .and_then(|value| value.to_str().ok())
            .map(ToOwned::to_owned)
            .ok_or(Error::MissingLocation(srpm_name))?;

        info!("build submitted: {location}");

        Ok(location)
    }
}
