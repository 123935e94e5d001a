//! Sitemap XML rendering.

use std::fmt::Write as _;

use chrono::NaiveDateTime;

/// Pages listed for every locale regardless of content.
pub const STATIC_PATHS: [&str; 5] = ["", "/projects", "/services", "/faq", "/contact"];

/// One `<url>` entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SitemapEntry {
    /// Absolute URL.
    pub loc: String,
    /// Last modification time.
    pub lastmod: Option<NaiveDateTime>,
}

/// Collects per-locale URLs under a public base URL.
#[derive(Debug, Clone)]
pub struct SitemapBuilder {
    base_url: String,
    locales: Vec<String>,
    entries: Vec<SitemapEntry>,
}

impl SitemapBuilder {
    /// Creates a builder; trailing slashes on `base_url` are dropped.
    #[must_use]
    pub fn new(base_url: &str, locales: &[String]) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            locales: locales.to_vec(),
            entries: Vec::new(),
        }
    }

    /// Adds the static pages for every locale.
    #[must_use]
    pub fn with_static_pages(mut self) -> Self {
        for path in STATIC_PATHS {
            self.add(path, None);
        }
        self
    }

    /// Adds `path` once per locale.
    pub fn add(&mut self, path: &str, lastmod: Option<NaiveDateTime>) {
        for locale in &self.locales {
            self.entries.push(SitemapEntry {
                loc: format!("{}/{locale}{path}", self.base_url),
                lastmod,
            });
        }
    }

    /// Number of collected entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true when nothing has been added.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Renders the `urlset` document.
    #[must_use]
    pub fn render(&self) -> String {
        render(&self.entries)
    }
}

/// Renders entries as a sitemap `urlset`.
#[must_use]
pub fn render(entries: &[SitemapEntry]) -> String {
    let mut xml = String::from(
        "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n\
         <urlset xmlns=\"http://www.sitemaps.org/schemas/sitemap/0.9\">\n",
    );
    for entry in entries {
        xml.push_str("  <url>\n");
        let _ = writeln!(xml, "    <loc>{}</loc>", escape_xml(&entry.loc));
        if let Some(lastmod) = entry.lastmod {
            let _ = writeln!(xml, "    <lastmod>{}</lastmod>", lastmod.format("%Y-%m-%d"));
        }
        xml.push_str("  </url>\n");
    }
    xml.push_str("</urlset>\n");
    xml
}

/// Escapes the five XML special characters.
#[must_use]
pub fn escape_xml(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(c),
        }
    }
    out
}
