use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use askama::Template;
use askama_web::WebTemplate;

use crate::site::{Site, SitePage};

pub mod filters;


#[derive(Template, WebTemplate)]
#[template(path = "page.html")]
pub struct PageTemplate {
    pub page: SitePage,
    pub site_name: String,
    pub canonical: String,
    pub json_ld: String,
}

impl PageTemplate {
    pub fn new(site: &Site, page: SitePage) -> Result<Self, serde_json::Error> {
        let json_ld = page.json_ld()?;

        Ok(Self {
            site_name: site.config().site.name.clone(),
            canonical: site.config().url(&page.path),
            json_ld,
            page,
        })
    }
}

/// Directory a page is written to: `/` maps to `output`, `/a/b` to `output/a/b`.
pub fn page_dir(output: &Path, path: &str) -> PathBuf {
    path.split('/')
        .filter(|segment| !segment.is_empty())
        .fold(output.to_path_buf(), |dir, segment| dir.join(segment))
}

/// Writes `index.html` and `schema.jsonld` for every page. Returns the page count.
pub fn run(site: &Site, output: &Path) -> Result<usize> {
    let pages = site.pages();
    let count = pages.len();

    for page in pages {
        let dir = page_dir(output, &page.path);
        fs::create_dir_all(&dir).with_context(|| format!("could not create dir {:?}", dir))?;

        let path = page.path.clone();
        let template = PageTemplate::new(site, page)
            .with_context(|| format!("could not serialize structured data for `{}`", path))?;

        let schema_path = dir.join("schema.jsonld");
        fs::write(&schema_path, &template.json_ld)
            .with_context(|| format!("could not write {:?}", schema_path))?;

        let html = template
            .render()
            .with_context(|| format!("could not render template for `{}`", path))?;
        let html_path = dir.join("index.html");
        fs::write(&html_path, html).with_context(|| format!("could not write {:?}", html_path))?;

        log::debug!("rendered {} to {:?}", path, dir);
    }

    Ok(count)
}
