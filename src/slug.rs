use std::collections::HashMap;
use std::fmt::{self, Display, Formatter};

use lazy_static::lazy_static;
use regex::Regex;
use thiserror::Error;

use crate::embellish::unembellish;
use crate::entry::Entry;
use crate::options::PageUrlsBasedOn;

lazy_static! {
    static ref INVALID_CHARS_REGEX: Regex = Regex::new(r#"\s|[/_;:,? '"*()\[\]{}!]"#).unwrap();
    static ref DASHES_REGEX: Regex = Regex::new(r"-+").unwrap();
}

/// Paths the homepage and the stylesheet already occupy in the output folder
pub const RESERVED_SLUGS: [&str; 2] = ["index.html", "styles.css"];

#[derive(Debug, Error, PartialEq)]
pub enum SlugError {
    #[error("Slugification failed! Value `{value}` produced an empty slug. Try changing the {kind} \
             that matches this value or choose a new option for the pageURLsBasedOn setting.")]
    Empty { kind: PageUrlsBasedOn, value: String },

    #[error("Slugification failed! Value `{value}` produced the slug `{slug}`, which cannot name a page. \
             Try changing the {kind} that matches this value or choose a new option for the pageURLsBasedOn setting.")]
    NotASegment { kind: PageUrlsBasedOn, value: String, slug: String },
}

/// Makes a title, filename or datestring ready to be a path segment of a page URL.
pub fn slugify(value: &str, kind: PageUrlsBasedOn) -> Result<String, SlugError> {
    let lowercase = value.trim().to_lowercase();
    let dashed = INVALID_CHARS_REGEX.replace_all(&lowercase, "-");
    let collapsed = DASHES_REGEX.replace_all(&dashed, "-");
    let slug = collapsed.trim_matches('-');

    if slug.is_empty() {
        return Err(SlugError::Empty { kind, value: value.to_string() });
    }

    // "." and ".." would resolve outside of the page's own directory
    if slug.chars().all(|c| c == '.') && slug.len() <= 2 {
        return Err(SlugError::NotASegment {
            kind,
            value: value.to_string(),
            slug: slug.to_string(),
        });
    }

    Ok(slug.to_string())
}

/// Slug of an entry, taken from the field selected by `based_on`.
///
/// Titles are stripped of markup first so `*Hello*` and `Hello` share a URL.
pub fn get_slug(entry: &Entry, based_on: PageUrlsBasedOn) -> Result<String, SlugError> {
    match based_on {
        PageUrlsBasedOn::Title => slugify(&unembellish(&entry.title), based_on),
        PageUrlsBasedOn::Filename => slugify(&entry.filename, based_on),
        PageUrlsBasedOn::Date => slugify(&entry.datestring, based_on),
    }
}

/// An entry left out of the site because another one already owns its slug.
#[derive(Debug, Clone, PartialEq)]
pub struct SlugCollision {
    pub filename: String,
    pub slug: String,
    /// `None` when the slug is reserved
    pub claimed_by: Option<String>,
}

impl Display for SlugCollision {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match &self.claimed_by {
            Some(owner) => write!(f, "{} has the same URL `{}` as {}", self.filename, self.slug, owner),
            None => write!(f, "{} would use the reserved URL `{}`", self.filename, self.slug),
        }
    }
}

#[derive(Debug)]
pub struct PlannedPage<'a> {
    pub entry: &'a Entry,
    pub slug: String,
}

/// Assigns a slug to every entry, keeping the first entry to claim each slug.
///
/// Retained pages and collisions both keep the order of `entries`.
pub fn plan_pages(entries: &[Entry], based_on: PageUrlsBasedOn)
                  -> Result<(Vec<PlannedPage<'_>>, Vec<SlugCollision>), SlugError> {
    let slugged = entries.iter()
        .map(|entry| get_slug(entry, based_on).map(|slug| PlannedPage { entry, slug }))
        .collect::<Result<Vec<_>, _>>()?;

    let mut owners: HashMap<String, Option<String>> = RESERVED_SLUGS.iter()
        .map(|slug| (slug.to_string(), None))
        .collect();
    let mut pages = vec![];
    let mut collisions = vec![];

    for page in slugged {
        match owners.get(&page.slug) {
            Some(claimed_by) => collisions.push(SlugCollision {
                filename: page.entry.filename.clone(),
                slug: page.slug,
                claimed_by: claimed_by.clone(),
            }),
            None => {
                owners.insert(page.slug.clone(), Some(page.entry.filename.clone()));
                pages.push(page);
            }
        }
    }

    Ok((pages, collisions))
}
