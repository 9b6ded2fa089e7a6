use std::fmt::{self, Display, Formatter};
use std::path::{Path, PathBuf};

use spdlog::{debug, info, warn, Logger};
use thiserror::Error;

use crate::entry::{make_entry, Entry};
use crate::entry_list::EntryList;
use crate::error::Error;
use crate::imago::{check_output_location, clear_output, BACKUP_DIR};
use crate::larva::{require_structure, ENTRIES_DIR, HOMEPAGE_FILENAME};
use crate::options::{create_options, OPTIONS_FILENAME};
use crate::slug::{plan_pages, SlugCollision};
use crate::view::homepage_renderer::create_homepage;
use crate::view::page_renderer::create_page;
use crate::view::stylesheet_renderer::create_stylesheet;

/// Steps of a build, in the order they run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Validating,
    ResolvingOptions,
    ClearingOutput,
    LoadingEntries,
    GeneratingPages,
    GeneratingHomepage,
    GeneratingStylesheet,
}

impl Display for Stage {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let name = match self {
            Stage::Validating => "validating the site",
            Stage::ResolvingOptions => "resolving options",
            Stage::ClearingOutput => "clearing the output location",
            Stage::LoadingEntries => "loading entries",
            Stage::GeneratingPages => "generating pages",
            Stage::GeneratingHomepage => "generating the homepage",
            Stage::GeneratingStylesheet => "generating the stylesheet",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Error)]
#[error("Build aborted while {stage}")]
pub struct Aborted {
    pub stage: Stage,
    #[source]
    pub source: Error,
}

fn abort<E: Into<Error>>(stage: Stage) -> impl FnOnce(E) -> Aborted {
    move |source| Aborted { stage, source: source.into() }
}

#[derive(Debug)]
pub struct BuildReport {
    pub output_location: PathBuf,
    pub pages_written: usize,
    /// Pages plus the homepage and the stylesheet
    pub files_written: usize,
    pub collisions: Vec<SlugCollision>,
}

fn load_entries(root: &Path, logger: &Logger) -> Result<Vec<Entry>, Error> {
    let files = EntryList::new(&root.join(ENTRIES_DIR)).retrieve_files()?;
    debug!(logger: logger, "Found {} entries", files.len());
    files.iter().map(|path| make_entry(path)).collect()
}

/// Builds the imago of the site at `root` from its larva and options.
pub fn eclose(root: &Path, logger: &Logger) -> Result<BuildReport, Aborted> {
    info!(logger: logger, "Molting...");

    require_structure(root, logger).map_err(abort(Stage::Validating))?;

    let options = create_options(&root.join(OPTIONS_FILENAME), logger)
        .map_err(abort(Stage::ResolvingOptions))?;

    let output = check_output_location(root, &options.output_location)
        .map_err(abort(Stage::ClearingOutput))?;
    let moved = clear_output(&output, &root.join(BACKUP_DIR), logger)
        .map_err(abort(Stage::ClearingOutput))?;
    debug!(logger: logger, "Moved {} items into {}", moved, BACKUP_DIR);

    let homepage = make_entry(&root.join(HOMEPAGE_FILENAME)).map_err(abort(Stage::LoadingEntries))?;
    let entries = load_entries(root, logger).map_err(abort(Stage::LoadingEntries))?;

    let (pages, collisions) = plan_pages(&entries, options.page_urls_based_on)
        .map_err(abort(Stage::GeneratingPages))?;
    for collision in &collisions {
        warn!(logger: logger, "Skipping page: {}. Change one of their {}s or choose another pageURLsBasedOn option.",
            collision, options.page_urls_based_on);
    }
    for page in &pages {
        create_page(&output, &page.slug, page.entry, logger).map_err(abort(Stage::GeneratingPages))?;
    }

    let page_entries: Vec<&Entry> = pages.iter().map(|page| page.entry).collect();
    create_homepage(&output, &homepage, &page_entries, &options, logger)
        .map_err(abort(Stage::GeneratingHomepage))?;

    create_stylesheet(&output, &options, logger).map_err(abort(Stage::GeneratingStylesheet))?;

    let report = BuildReport {
        output_location: output,
        pages_written: pages.len(),
        files_written: pages.len() + 2,
        collisions,
    };
    info!(logger: logger, "Wrote {} files", report.files_written);
    info!(logger: logger, "Molted! New imago lives at: {}", report.output_location.display());

    Ok(report)
}
