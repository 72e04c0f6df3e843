//! Exports the [`build_site`] function which stitches together the high-level
//! steps of building the output static site: cleaning the output directory,
//! copying the static source directory into it, and rendering every Markdown
//! page in the content tree through the template ([`crate::page`]).

use crate::config::{self, Config};
use crate::page::{self, generate_page, Template};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

const MARKDOWN_EXTENSION: &str = "md";
const HTML_EXTENSION: &str = "html";

/// Builds the site described by `config`. Returns the number of pages
/// written. The build stops at the first failing page.
pub fn build_site(config: &Config) -> Result<usize> {
    // Blow away the old output so pages deleted from the content tree don't
    // linger.
    rmdir(&config.output_directory)?;
    fs::create_dir_all(&config.output_directory)?;

    if config.static_directory.is_dir() {
        copy_dir(&config.static_directory, &config.output_directory)?;
    } else {
        log::warn!(
            "static directory {} not found; skipping",
            config.static_directory.display()
        );
    }

    let template = read_template(&config.template)?;
    let written = generate_pages(
        &config.content_directory,
        &template,
        &config.output_directory,
        &config.base_path,
    )?;
    log::info!(
        "Wrote {} pages to {}",
        written,
        config.output_directory.display()
    );
    Ok(written)
}

/// Renders every `.md` file under `content_directory` to the same relative
/// path under `output_directory` with an `.html` extension. Other files in
/// the content tree are ignored.
pub fn generate_pages(
    content_directory: &Path,
    template: &Template,
    output_directory: &Path,
    base_path: &str,
) -> Result<usize> {
    let mut written = 0;
    for result in WalkDir::new(content_directory).sort_by(|a, b| a.file_name().cmp(b.file_name())) {
        let entry = result?;
        if !entry.file_type().is_file()
            || entry.path().extension().map_or(true, |ext| ext != MARKDOWN_EXTENSION)
        {
            continue;
        }

        let relative_path = relative_to(entry.path(), content_directory)?;
        let dest_path = output_directory
            .join(relative_path)
            .with_extension(HTML_EXTENSION);
        generate_page_file(entry.path(), &dest_path, template, base_path).map_err(|err| {
            Error::Annotated(
                format!("generating page `{}`", entry.path().display()),
                Box::new(err),
            )
        })?;
        written += 1;
    }
    Ok(written)
}

fn generate_page_file(
    source_path: &Path,
    dest_path: &Path,
    template: &Template,
    base_path: &str,
) -> Result<()> {
    log::info!(
        "Generating page from {} to {}",
        source_path.display(),
        dest_path.display()
    );
    let markdown = fs::read_to_string(source_path)?;
    let html = generate_page(&markdown, template, base_path)?;
    if let Some(dir) = dest_path.parent() {
        fs::create_dir_all(dir)?;
    }
    fs::write(dest_path, html)?;
    Ok(())
}

// Copies the contents of `src` into `dst`, preserving the directory structure.
fn copy_dir(src: &Path, dst: &Path) -> Result<()> {
    for result in WalkDir::new(src).min_depth(1) {
        let entry = result?;
        let target = dst.join(relative_to(entry.path(), src)?);
        if entry.file_type().is_dir() {
            fs::create_dir_all(&target)?;
        } else {
            log::debug!("Copying {} -> {}", entry.path().display(), target.display());
            fs::copy(entry.path(), &target).map_err(|err| Error::Copy {
                from: entry.path().to_owned(),
                to: target.clone(),
                err,
            })?;
        }
    }
    Ok(())
}

fn read_template(path: &Path) -> Result<Template> {
    fs::read_to_string(path)
        .map(Template::from)
        .map_err(|err| Error::OpenTemplateFile {
            path: path.to_owned(),
            err,
        })
}

fn relative_to<'a>(path: &'a Path, base: &Path) -> Result<&'a Path> {
    path.strip_prefix(base)
        .map_err(|_| Error::OutsideDirectory(path.to_owned()))
}

fn rmdir(dir: &Path) -> Result<()> {
    match fs::remove_dir_all(dir) {
        Ok(x) => Ok(x),
        Err(e) => match e.kind() {
            std::io::ErrorKind::NotFound => Ok(()),
            _ => Err(Error::Clean {
                path: dir.to_owned(),
                err: e,
            }),
        },
    }
}

/// The result of a site-building operation.
pub type Result<T> = std::result::Result<T, Error>;

/// The error type for building a site. Errors can be during configuration,
/// cleaning the output directory, copying static files, reading the template,
/// rendering pages, and other I/O.
#[derive(Debug)]
pub enum Error {
    /// Returned for errors loading the project configuration.
    Config(config::Error),

    /// Returned for errors assembling a page.
    Page(page::Error),

    /// Returned for I/O problems while cleaning the output directory.
    Clean { path: PathBuf, err: std::io::Error },

    /// Returned for I/O problems while opening the template file.
    OpenTemplateFile { path: PathBuf, err: std::io::Error },

    /// Returned for I/O problems while copying a static file.
    Copy {
        from: PathBuf,
        to: PathBuf,
        err: std::io::Error,
    },

    /// Returned when a walked path isn't inside the directory being walked.
    OutsideDirectory(PathBuf),

    /// Returned for errors walking a directory tree.
    WalkDir(walkdir::Error),

    /// Returned for other I/O errors.
    Io(std::io::Error),

    /// An error with an annotation.
    Annotated(String, Box<Error>),
}

impl fmt::Display for Error {
    /// Implements [`fmt::Display`] for [`Error`].
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Error::Config(err) => err.fmt(f),
            Error::Page(err) => err.fmt(f),
            Error::Clean { path, err } => {
                write!(f, "Cleaning directory '{}': {}", path.display(), err)
            }
            Error::OpenTemplateFile { path, err } => {
                write!(f, "Opening template file '{}': {}", path.display(), err)
            }
            Error::Copy { from, to, err } => write!(
                f,
                "Copying '{}' to '{}': {}",
                from.display(),
                to.display(),
                err
            ),
            Error::OutsideDirectory(path) => {
                write!(f, "Path '{}' is outside the walked directory", path.display())
            }
            Error::WalkDir(err) => err.fmt(f),
            Error::Io(err) => err.fmt(f),
            Error::Annotated(annotation, err) => {
                write!(f, "{}: {}", &annotation, err)
            }
        }
    }
}

impl std::error::Error for Error {
    /// Implements [`std::error::Error`] for [`Error`].
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Config(err) => Some(err),
            Error::Page(err) => Some(err),
            Error::Clean { path: _, err } => Some(err),
            Error::OpenTemplateFile { path: _, err } => Some(err),
            Error::Copy { err, .. } => Some(err),
            Error::OutsideDirectory(_) => None,
            Error::WalkDir(err) => Some(err),
            Error::Io(err) => Some(err),
            Error::Annotated(_, err) => Some(err),
        }
    }
}

impl From<config::Error> for Error {
    /// Converts [`config::Error`]s into [`Error`]. This allows us to use the
    /// `?` operator.
    fn from(err: config::Error) -> Error {
        Error::Config(err)
    }
}

impl From<page::Error> for Error {
    /// Converts [`page::Error`]s into [`Error`]. This allows us to use the `?`
    /// operator.
    fn from(err: page::Error) -> Error {
        Error::Page(err)
    }
}

impl From<walkdir::Error> for Error {
    /// Converts [`walkdir::Error`]s into [`Error`]. This allows us to use the
    /// `?` operator.
    fn from(err: walkdir::Error) -> Error {
        Error::WalkDir(err)
    }
}

impl From<std::io::Error> for Error {
    /// Converts [`std::io::Error`]s into [`Error`]. This allows us to use the
    /// `?` operator.
    fn from(err: std::io::Error) -> Error {
        Error::Io(err)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    fn fixture_config(output: &Path) -> Result<Config> {
        let mut config = Config::from_project_file(Path::new("./testdata/site/mdsite.yaml"))?;
        config.output_directory = output.to_owned();
        Ok(config)
    }

    #[test]
    fn test_build_site() -> Result<()> {
        let out = TempDir::new()?;
        let config = fixture_config(out.path())?;

        assert_eq!(2, build_site(&config)?);

        let index = fs::read_to_string(out.path().join("index.html"))?;
        assert!(index.contains("<title>Welcome</title>"));
        assert!(index.contains(r#"<link href="/docs/index.css" rel="stylesheet">"#));
        assert!(index.contains(r#"<a href="/docs/blog/first.html">first post</a>"#));

        let post = fs::read_to_string(out.path().join("blog").join("first.html"))?;
        assert!(post.contains("<title>First post</title>"));
        assert!(post.contains("<pre><code>fn main() {}\n</code></pre>"));

        assert!(out.path().join("index.css").is_file());
        assert!(out.path().join("images").join("logo.svg").is_file());
        assert!(!out.path().join("blog").join("notes.txt").exists());
        assert!(!out.path().join("blog").join("notes.html").exists());
        Ok(())
    }

    #[test]
    fn test_build_site_cleans_output() -> Result<()> {
        let out = TempDir::new()?;
        let stale = out.path().join("stale.html");
        fs::write(&stale, "old")?;

        build_site(&fixture_config(out.path())?)?;
        assert!(!stale.exists());
        Ok(())
    }

    #[test]
    fn test_build_site_missing_template() -> Result<()> {
        let out = TempDir::new()?;
        let mut config = fixture_config(out.path())?;
        config.template = PathBuf::from("./testdata/site/missing.html");
        match build_site(&config) {
            Err(Error::OpenTemplateFile { path, .. }) => assert_eq!(config.template, path),
            other => panic!("wanted template error; found {:?}", other),
        }
        Ok(())
    }

    #[test]
    fn test_page_without_title_fails_build() -> Result<()> {
        let dir = TempDir::new()?;
        let content = dir.path().join("content");
        fs::create_dir_all(&content)?;
        fs::write(content.join("untitled.md"), "no heading here")?;
        fs::write(dir.path().join("template.html"), "{{ Title }}{{ Content }}")?;

        let config = Config::from_directory(dir.path())?;
        match build_site(&config) {
            Err(Error::Annotated(annotation, err)) => {
                assert!(annotation.contains("untitled.md"));
                match *err {
                    Error::Page(page::Error::TitleNotFound) => {}
                    other => panic!("wanted missing title; found {:?}", other),
                }
            }
            other => panic!("wanted annotated error; found {:?}", other),
        }
        Ok(())
    }
}
