//! Assembles a complete HTML page from a Markdown document and a shared
//! template: the document body is rendered ([`crate::render`]), its title is
//! extracted, both are substituted into the template, and root-relative links
//! are rewritten for the site's base path.

use crate::render::{self, markdown_to_html};
use std::fmt;

const TITLE_PLACEHOLDER: &str = "{{ Title }}";
const CONTENT_PLACEHOLDER: &str = "{{ Content }}";

/// A page template containing literal `{{ Title }}` and `{{ Content }}`
/// placeholders.
#[derive(Clone, Debug)]
pub struct Template(String);

impl Template {
    pub fn new<S: Into<String>>(contents: S) -> Template {
        Template(contents.into())
    }

    /// Substitutes every occurrence of both placeholders.
    pub fn render(&self, title: &str, content: &str) -> String {
        self.0
            .replace(TITLE_PLACEHOLDER, title)
            .replace(CONTENT_PLACEHOLDER, content)
    }
}

impl From<String> for Template {
    fn from(contents: String) -> Template {
        Template(contents)
    }
}

/// Returns the text of the first line starting with `# `, trimmed.
pub fn extract_title(markdown: &str) -> Result<String> {
    markdown
        .split('\n')
        .find_map(|line| line.strip_prefix("# "))
        .map(|title| title.trim().to_owned())
        .ok_or(Error::TitleNotFound)
}

/// Points root-relative `href` and `src` attributes at `base_path`. The
/// leading `/` of each value is replaced by `base_path`, so `base_path` is
/// expected to end in a slash (e.g. `/blog/`).
pub fn rewrite_base_path(html: &str, base_path: &str) -> String {
    html.replace(r#"href="/"#, &format!(r#"href="{}"#, base_path))
        .replace(r#"src="/"#, &format!(r#"src="{}"#, base_path))
}

/// Renders `markdown` into `template` and rewrites links for `base_path`.
pub fn generate_page(markdown: &str, template: &Template, base_path: &str) -> Result<String> {
    let content = markdown_to_html(markdown)?;
    let title = extract_title(markdown)?;
    Ok(rewrite_base_path(&template.render(&title, &content), base_path))
}

/// The result of assembling a page.
pub type Result<T> = std::result::Result<T, Error>;

/// Represents an error assembling a page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// Returned when the document has no `# ` heading line to use as a title.
    TitleNotFound,

    /// Returned when the document body cannot be rendered.
    Render(render::Error),
}

impl fmt::Display for Error {
    /// Displays an [`Error`] as human-readable text.
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Error::TitleNotFound => write!(f, "markdown has no `# ` title heading"),
            Error::Render(err) => err.fmt(f),
        }
    }
}

impl std::error::Error for Error {
    /// Implements the [`std::error::Error`] trait for [`Error`].
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::TitleNotFound => None,
            Error::Render(err) => Some(err),
        }
    }
}

impl From<render::Error> for Error {
    /// Converts a [`render::Error`] into an [`Error`]. It allows us to use
    /// the `?` operator for rendering.
    fn from(err: render::Error) -> Error {
        Error::Render(err)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use pretty_assertions::assert_eq;

    const TEMPLATE: &str = r#"<html><head><title>{{ Title }}</title>
<link href="/index.css" rel="stylesheet"></head>
<body><article>{{ Content }}</article></body></html>"#;

    #[test]
    fn test_extract_title() -> Result<()> {
        assert_eq!("Hello", extract_title("\n# Hello\nSome text\n")?);
        Ok(())
    }

    #[test]
    fn test_extract_title_first_h1_wins() -> Result<()> {
        assert_eq!(
            "Hello",
            extract_title("## Not this\n#   Hello   \n## Sub\n# Later")?,
        );
        Ok(())
    }

    #[test]
    fn test_extract_title_missing() {
        for md in &["no title here\njust some text", "## only h2", "#no space", ""] {
            assert_eq!(Err(Error::TitleNotFound), extract_title(md));
        }
    }

    #[test]
    fn test_template_render_replaces_every_placeholder() {
        let template = Template::new("{{ Title }}|{{ Title }}|{{ Content }}");
        assert_eq!("T|T|<p>c</p>", template.render("T", "<p>c</p>"));
    }

    #[test]
    fn test_rewrite_base_path() {
        assert_eq!(
            r#"<a href="/blog/x.html"></a><img src="/blog/a.png"><a href="https://e.org/">"#,
            rewrite_base_path(
                r#"<a href="/x.html"></a><img src="/a.png"><a href="https://e.org/">"#,
                "/blog/",
            ),
        );
    }

    #[test]
    fn test_rewrite_default_base_path_is_identity() {
        let html = r#"<a href="/x.html"></a>"#;
        assert_eq!(html, rewrite_base_path(html, "/"));
    }

    #[test]
    fn test_generate_page() -> Result<()> {
        let md = "# Tolkien Fan Club\n\n![JRR Tolkien](/images/tolkien.png)\n\n[Back](/)";
        let page = generate_page(md, &Template::new(TEMPLATE), "/site/")?;
        assert_eq!(
            "<html><head><title>Tolkien Fan Club</title>\n\
             <link href=\"/site/index.css\" rel=\"stylesheet\"></head>\n\
             <body><article><div><h1>Tolkien Fan Club</h1>\
             <p><img src=\"/site/images/tolkien.png\" alt=\"JRR Tolkien\"></img></p>\
             <p><a href=\"/site/\">Back</a></p></div></article></body></html>",
            page,
        );
        Ok(())
    }

    #[test]
    fn test_generate_page_without_title() {
        assert_eq!(
            Err(Error::TitleNotFound),
            generate_page("just a paragraph", &Template::new(TEMPLATE), "/"),
        );
    }

    #[test]
    fn test_generate_page_render_error() {
        match generate_page("# T\n\n`open", &Template::new(TEMPLATE), "/") {
            Err(Error::Render(_)) => {}
            other => panic!("wanted render error; found {:?}", other),
        }
    }
}
