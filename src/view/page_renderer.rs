use std::path::{Path, PathBuf};

use spdlog::{debug, Logger};

use crate::embellish::{embellish, unembellish};
use crate::entry::Entry;
use crate::error::Result;
use crate::imago::write_file;
use crate::view::fill_template;

pub const PAGE_TEMPLATE: &str = include_str!("../../res/imago/page.html");

pub struct PageRenderer<'a> {
    pub template: &'a str,
}

impl Default for PageRenderer<'static> {
    fn default() -> Self {
        PageRenderer::new(PAGE_TEMPLATE)
    }
}

impl<'a> PageRenderer<'a> {
    pub fn new(template: &'a str) -> PageRenderer<'a> {
        PageRenderer { template }
    }

    pub fn render(&self, entry: &Entry) -> String {
        let content = embellish(&entry.content);
        let body_title = embellish(&entry.title);
        let title = unembellish(&entry.title);

        fill_template(self.template, &[
            ("CONTENT", content.as_str()),
            ("DATESTRING", entry.datestring.as_str()),
            ("BODYTITLE", body_title.as_str()),
            ("TITLE", title.as_str()),
        ])
    }
}

pub fn render_page(entry: &Entry) -> String {
    PageRenderer::default().render(entry)
}

/// Writes the page of `entry` to `<output>/<slug>/index.html`.
pub fn create_page(output: &Path, slug: &str, entry: &Entry, logger: &Logger) -> Result<PathBuf> {
    debug!(logger: logger, "Creating page: {} -> {}/", entry.filename, slug);

    let page_path = output.join(slug).join("index.html");
    write_file(&page_path, &render_page(entry))?;
    Ok(page_path)
}
