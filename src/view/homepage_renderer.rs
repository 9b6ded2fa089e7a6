use std::fmt::Write;
use std::path::{Path, PathBuf};

use spdlog::{debug, Logger};

use crate::embellish::{embellish, unembellish};
use crate::entry::Entry;
use crate::error::Result;
use crate::imago::write_file;
use crate::options::{Options, ShowIndexWith, SortIndexBy};
use crate::slug::{get_slug, SlugError};
use crate::view::fill_template;

pub const HOMEPAGE_TEMPLATE: &str = include_str!("../../res/imago/homepage.html");

pub struct HomepageRenderer<'a> {
    pub template: &'a str,
}

impl Default for HomepageRenderer<'static> {
    fn default() -> Self {
        HomepageRenderer::new(HOMEPAGE_TEMPLATE)
    }
}

impl<'a> HomepageRenderer<'a> {
    pub fn new(template: &'a str) -> HomepageRenderer<'a> {
        HomepageRenderer { template }
    }

    /// Renders the homepage entry, ignoring its datestring, followed by the index of `page_entries`.
    pub fn render(&self, entry: &Entry, page_entries: &[&Entry], options: &Options) -> Result<String> {
        let index = build_index(page_entries, options)?;
        let content = embellish(&entry.content);
        let body_title = embellish(&entry.title);
        let title = unembellish(&entry.title);

        Ok(fill_template(self.template, &[
            ("INDEX", index.as_str()),
            ("CONTENT", content.as_str()),
            ("BODYTITLE", body_title.as_str()),
            ("TITLE", title.as_str()),
        ]))
    }
}

/// Sorted copy of `entries`. Ties keep their original order.
///
/// Dates are compared as plain strings: `newest` puts the greatest datestring first.
pub fn sort_entries<'e>(entries: &[&'e Entry], sort_by: SortIndexBy) -> Vec<&'e Entry> {
    let mut sorted = entries.to_vec();
    match sort_by {
        SortIndexBy::Newest => sorted.sort_by(|a, b| b.datestring.cmp(&a.datestring)),
        SortIndexBy::Oldest => sorted.sort_by(|a, b| a.datestring.cmp(&b.datestring)),
        SortIndexBy::Filename => sorted.sort_by(|a, b| a.filename.cmp(&b.filename)),
        SortIndexBy::Title => sorted.sort_by(|a, b| a.title.cmp(&b.title)),
    }
    sorted
}

/// One line per page, linking to its slug. Empty when the index is turned off.
pub fn build_index(page_entries: &[&Entry], options: &Options) -> std::result::Result<String, SlugError> {
    let mut index = String::new();
    if options.show_index_with == ShowIndexWith::Dont {
        return Ok(index);
    }

    for entry in sort_entries(page_entries, options.sort_index_by) {
        let slug = get_slug(entry, options.page_urls_based_on)?;
        let title = embellish(&entry.title);
        let _ = match options.show_index_with {
            ShowIndexWith::Dates => writeln!(&mut index, r#"{} <a href="{}">{}</a>"#, entry.datestring, slug, title),
            ShowIndexWith::NoDates => writeln!(&mut index, r#"<a href="{}">{}</a>"#, slug, title),
            ShowIndexWith::Dont => Ok(()),
        };
    }

    Ok(index)
}

pub fn render_homepage(entry: &Entry, page_entries: &[&Entry], options: &Options) -> Result<String> {
    HomepageRenderer::default().render(entry, page_entries, options)
}

/// Writes the homepage to `<output>/index.html`.
pub fn create_homepage(output: &Path, entry: &Entry, page_entries: &[&Entry], options: &Options,
                       logger: &Logger) -> Result<PathBuf> {
    debug!(logger: logger, "Creating homepage with {} indexed pages", page_entries.len());

    let homepage_path = output.join("index.html");
    write_file(&homepage_path, &render_homepage(entry, page_entries, options)?)?;
    Ok(homepage_path)
}

#[cfg(test)]
mod tests {
    use crate::options::PageUrlsBasedOn;
    use crate::test_data::{default_options, sample_entry};

    use super::*;

    fn entries() -> Vec<Entry> {
        vec![
            sample_entry("b-file", "Banana *split*", "2024-01-01", "A"),
            sample_entry("c-file", "Apple", "2024-02-01", "B"),
            sample_entry("a-file", "Cherry", "2023-12-31", "C"),
        ]
    }

    fn titles(sorted: &[&Entry]) -> Vec<String> {
        sorted.iter().map(|e| e.title.clone()).collect()
    }

    #[test]
    fn test_sort_entries() {
        let entries = entries();
        let refs: Vec<&Entry> = entries.iter().collect();

        assert_eq!(titles(&sort_entries(&refs, SortIndexBy::Newest)), ["Apple", "Banana *split*", "Cherry"]);
        assert_eq!(titles(&sort_entries(&refs, SortIndexBy::Oldest)), ["Cherry", "Banana *split*", "Apple"]);
        assert_eq!(titles(&sort_entries(&refs, SortIndexBy::Filename)), ["Cherry", "Banana *split*", "Apple"]);
        assert_eq!(titles(&sort_entries(&refs, SortIndexBy::Title)), ["Apple", "Banana *split*", "Cherry"]);

        // the caller's order is untouched
        assert_eq!(titles(&refs), ["Banana *split*", "Apple", "Cherry"]);
    }

    #[test]
    fn test_sort_is_stable() {
        let entries = vec![
            sample_entry("first", "First", "2024-01-01", ""),
            sample_entry("second", "Second", "2024-01-01", ""),
        ];
        let refs: Vec<&Entry> = entries.iter().collect();
        assert_eq!(titles(&sort_entries(&refs, SortIndexBy::Newest)), ["First", "Second"]);
        assert_eq!(titles(&sort_entries(&refs, SortIndexBy::Oldest)), ["First", "Second"]);
    }

    #[test]
    fn test_index_with_dates() {
        let entries = entries();
        let refs: Vec<&Entry> = entries.iter().collect();
        let options = default_options();

        let index = build_index(&refs, &options).unwrap();
        assert_eq!(index, concat!(
            "2024-02-01 <a href=\"apple\">Apple</a>\n",
            "2024-01-01 <a href=\"banana-split\">Banana <b>split</b></a>\n",
            "2023-12-31 <a href=\"cherry\">Cherry</a>\n",
        ));
    }

    #[test]
    fn test_index_without_dates() {
        let entries = entries();
        let refs: Vec<&Entry> = entries.iter().collect();
        let mut options = default_options();
        options.show_index_with = ShowIndexWith::NoDates;
        options.sort_index_by = SortIndexBy::Filename;
        options.page_urls_based_on = PageUrlsBasedOn::Filename;

        let index = build_index(&refs, &options).unwrap();
        assert_eq!(index, concat!(
            "<a href=\"a-file\">Cherry</a>\n",
            "<a href=\"b-file\">Banana <b>split</b></a>\n",
            "<a href=\"c-file\">Apple</a>\n",
        ));
    }

    #[test]
    fn test_no_index() {
        let entries = entries();
        let refs: Vec<&Entry> = entries.iter().collect();
        let mut options = default_options();
        options.show_index_with = ShowIndexWith::Dont;

        assert_eq!(build_index(&refs, &options).unwrap(), "");

        let homepage = sample_entry("homepage", "Home", "", "Hi");
        let rendered = render_homepage(&homepage, &refs, &options).unwrap();
        assert!(rendered.contains(r#"<div class="index"></div>"#));
    }

    #[test]
    fn test_index_slug_error() {
        let entries = vec![sample_entry("undated", "Undated", "", "")];
        let refs: Vec<&Entry> = entries.iter().collect();
        let mut options = default_options();
        options.page_urls_based_on = PageUrlsBasedOn::Date;

        assert!(matches!(build_index(&refs, &options), Err(SlugError::Empty { .. })));
    }

    #[test]
    fn test_render_homepage() {
        let entries = entries();
        let refs: Vec<&Entry> = entries.iter().collect();
        let homepage = sample_entry("homepage", "Welcome _home_", "2024-04-22", "Read the INDEX below");
        let rendered = render_homepage(&homepage, &refs, &default_options()).unwrap();

        assert!(rendered.contains("<title>Welcome home</title>"));
        assert!(rendered.contains("<h1>Welcome <i>home</i></h1>"));
        assert!(rendered.contains(r#"<div class="content">Read the INDEX below</div>"#));
        assert!(rendered.contains(r#"<a href="apple">Apple</a>"#));
        assert!(!rendered.contains("2024-04-22"));
    }
}
