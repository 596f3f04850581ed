use crate::error::*;
use crate::LinkGraph;
use algograph::graph::QueryableGraph;
use regex::Regex;
use std::path::Path;
use std::sync::LazyLock;
use walkdir::WalkDir;

static LINK: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"<a\s+(?:[^>]*?)href="([^"]*)""#).expect("link pattern is valid")
});

/// Builds a link graph from the `*.html` files directly inside `dir`.
///
/// Each file is a page named by its file name. Links are the `href`s of
/// `<a>` tags; anything pointing outside the directory is dropped.
pub fn crawl(dir: &Path) -> Result<LinkGraph> {
    let mut pages = vec![];
    for entry in WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .sort_by_file_name()
    {
        let entry = entry.map_err(|e| RankError::MalformedSource {
            path: e.path().unwrap_or(dir).to_path_buf(),
            source: e.into(),
        })?;
        if !entry.file_type().is_file() {
            continue;
        }
        let path = entry.path();
        if path.extension().and_then(|ext| ext.to_str()) != Some("html") {
            continue;
        }
        let Some(name) = entry.file_name().to_str() else {
            tracing::warn!(path = %path.display(), "skipping page with a non-UTF-8 name");
            continue;
        };
        let contents =
            std::fs::read_to_string(path).map_err(|source| RankError::MalformedSource {
                path: path.to_path_buf(),
                source,
            })?;
        let links: Vec<String> = LINK
            .captures_iter(&contents)
            .map(|caps| caps[1].to_string())
            .collect();
        pages.push((name.to_string(), links));
    }
    let graph = LinkGraph::from_links(pages);
    tracing::info!(
        pages = graph.len(),
        links = graph.graph().edge_size(),
        dir = %dir.display(),
        "crawled corpus"
    );
    Ok(graph)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn page(links: &[&str]) -> String {
        let body: String = links
            .iter()
            .map(|l| format!("<li><a class=\"x\" href=\"{l}\">{l}</a></li>\n"))
            .collect();
        format!("<!DOCTYPE html>\n<html><body><ul>\n{body}</ul></body></html>\n")
    }

    #[test]
    fn links_between_pages() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("1.html"), page(&["2.html", "1.html"])).unwrap();
        fs::write(
            dir.path().join("2.html"),
            page(&["1.html", "3.html", "https://example.com/"]),
        )
        .unwrap();
        fs::write(dir.path().join("3.html"), page(&[])).unwrap();
        fs::write(dir.path().join("notes.txt"), page(&["1.html"])).unwrap();
        fs::create_dir(dir.path().join("sub.html")).unwrap();

        let g = crawl(dir.path()).unwrap();
        assert_eq!(g.names().collect::<Vec<_>>(), vec!["1.html", "2.html", "3.html"]);
        let links = |name: &str| g.links(name).unwrap().into_iter().collect::<Vec<_>>();
        assert_eq!(links("1.html"), vec!["2.html"]);
        assert_eq!(links("2.html"), vec!["1.html", "3.html"]);
        assert!(links("3.html").is_empty());
    }

    #[test]
    fn link_pattern() {
        let html = r#"<p><a class="nav" href="2.html">two</a> <a href="">none</a> <A href="x.html"></p>"#;
        let links: Vec<_> = LINK.captures_iter(html).map(|caps| caps[1].to_string()).collect();
        assert_eq!(links, vec!["2.html", ""]);
    }

    #[test]
    fn crawl_twice() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("1.html"), page(&["2.html"])).unwrap();
        fs::write(dir.path().join("2.html"), page(&["1.html"])).unwrap();
        let a = crawl(dir.path()).unwrap();
        let b = crawl(dir.path()).unwrap();
        assert_eq!(a.links("1.html"), b.links("1.html"));
        assert_eq!(a.links("2.html").unwrap().into_iter().collect::<Vec<_>>(), vec!["1.html"]);
    }

    #[test]
    fn empty_directory() {
        let dir = TempDir::new().unwrap();
        let g = crawl(dir.path()).unwrap();
        assert!(g.is_empty());
    }

    #[test]
    fn missing_directory() {
        let dir = TempDir::new().unwrap();
        let missing = dir.path().join("nope");
        assert!(matches!(
            crawl(&missing),
            Err(RankError::MalformedSource { .. })
        ));
    }
}
