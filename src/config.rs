//! Loads the site [`Config`] from an `mdsite.yaml` project file. Every field of
//! the project file is optional and every path in it is relative to the
//! directory containing the file.

use serde::Deserialize;
use std::fmt;
use std::fs::File;
use std::path::{Path, PathBuf};

/// The name of the project file searched for by [`Config::from_directory`].
pub const PROJECT_FILE: &str = "mdsite.yaml";

#[derive(Deserialize)]
#[serde(default)]
struct Project {
    content_directory: PathBuf,
    static_directory: PathBuf,
    template: PathBuf,
    output_directory: PathBuf,
    base_path: String,
}

impl Default for Project {
    fn default() -> Self {
        Project {
            content_directory: PathBuf::from("content"),
            static_directory: PathBuf::from("static"),
            template: PathBuf::from("template.html"),
            output_directory: PathBuf::from("docs"),
            base_path: String::from("/"),
        }
    }
}

/// Resolved configuration for a site build.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Config {
    /// The directory tree of Markdown pages.
    pub content_directory: PathBuf,

    /// The directory of assets copied verbatim into the output directory.
    pub static_directory: PathBuf,

    /// The HTML template every page is rendered into.
    pub template: PathBuf,

    /// The directory the site is written to. Its contents are removed at the
    /// start of every build.
    pub output_directory: PathBuf,

    /// The prefix that replaces the leading `/` of root-relative links.
    pub base_path: String,
}

impl Config {
    /// Searches `dir` and its ancestors for an [`PROJECT_FILE`] and loads the
    /// first one found. If there is none, the defaults are applied relative to
    /// `dir`.
    pub fn from_directory(dir: &Path) -> Result<Config> {
        let mut current = Some(dir);
        while let Some(candidate) = current {
            let path = candidate.join(PROJECT_FILE);
            if path.is_file() {
                return Config::from_project_file(&path);
            }
            current = candidate.parent();
        }
        log::debug!(
            "no `{}` found above {}; using defaults",
            PROJECT_FILE,
            dir.display()
        );
        Ok(Config::from_project(dir, Project::default()))
    }

    /// Loads the project file at `path`.
    pub fn from_project_file(path: &Path) -> Result<Config> {
        let file = File::open(path).map_err(|err| Error::Open {
            path: path.to_owned(),
            err,
        })?;
        let project: Project = serde_yaml::from_reader(file).map_err(|err| Error::Parse {
            path: path.to_owned(),
            err,
        })?;
        let project_root = path.parent().unwrap_or_else(|| Path::new("."));
        log::debug!("loaded project file {}", path.display());
        Ok(Config::from_project(project_root, project))
    }

    fn from_project(project_root: &Path, project: Project) -> Config {
        Config {
            content_directory: project_root.join(project.content_directory),
            static_directory: project_root.join(project.static_directory),
            template: project_root.join(project.template),
            output_directory: project_root.join(project.output_directory),
            base_path: project.base_path,
        }
    }
}

/// The result of loading a [`Config`].
pub type Result<T> = std::result::Result<T, Error>;

/// Represents an error loading a [`Config`].
#[derive(Debug)]
pub enum Error {
    /// Returned when the project file can't be opened.
    Open { path: PathBuf, err: std::io::Error },

    /// Returned when the project file isn't valid YAML for a project.
    Parse { path: PathBuf, err: serde_yaml::Error },
}

impl fmt::Display for Error {
    /// Displays an [`Error`] as human-readable text.
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Error::Open { path, err } => {
                write!(f, "Opening project file '{}': {}", path.display(), err)
            }
            Error::Parse { path, err } => {
                write!(f, "Loading project file '{}': {}", path.display(), err)
            }
        }
    }
}

impl std::error::Error for Error {
    /// Implements the [`std::error::Error`] trait for [`Error`].
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Open { path: _, err } => Some(err),
            Error::Parse { path: _, err } => Some(err),
        }
    }
}
