use std::env;
use std::fs;
use std::path::Path;
use std::sync::Arc;

use spdlog::sink::WriteSink;
use spdlog::{LevelFilter, Logger};
use tempfile::TempDir;

use crate::entry::Entry;
use crate::larva::{ENTRIES_DIR, HOMEPAGE_FILENAME};
use crate::options::{parse_options_dict, Options, OptionsDict, DEFAULT_OPTIONS, OPTIONS_FILENAME};

pub const ENTRY_DATA: &str = "My *first* post
2024-01-01

It begins here.

And it keeps _going_.
";

pub const ENTRY_DATA_CRLF: &str = "Written on Windows\r\n2023-12-31\r\n\r\nLine one\r\nLine two";

pub const FULL_OPTIONS: &str = "Appearance
fontIs Helvetica, sans-serif
sizeIs 21px
textColorIs black
linkColorIs rebeccapurple
backgroundColorIs var(--paper)

Homepage
showIndexWith noDates
sortIndexBy filename

Pages
pageURLsBasedOn date
outputLocationIs public/site
";

pub const HOMEPAGE_DATA: &str = "Home sweet *home*
2024-04-22

Everything I wrote:";

/// Logger without sinks, so tests stay quiet
pub fn test_logger() -> Logger {
    Logger::builder().build().unwrap()
}

/// Logger keeping every record in memory, read back with [`captured`]
pub fn capturing_logger() -> (Logger, Arc<WriteSink<Vec<u8>>>) {
    let sink = Arc::new(WriteSink::builder().target(Vec::new()).build().unwrap());
    let mut builder = Logger::builder();
    builder.sink(sink.clone()).level_filter(LevelFilter::All);
    (builder.build().unwrap(), sink)
}

pub fn captured(sink: &WriteSink<Vec<u8>>) -> String {
    String::from_utf8(sink.clone_target()).unwrap()
}

pub fn sample_entry(filename: &str, title: &str, datestring: &str, content: &str) -> Entry {
    Entry {
        filename: filename.to_string(),
        title: title.to_string(),
        datestring: datestring.to_string(),
        content: content.to_string(),
    }
}

pub fn default_options() -> Options {
    let defaults = parse_options_dict(DEFAULT_OPTIONS, "defaults").unwrap();
    Options::resolve(&OptionsDict::new(), &defaults, &test_logger()).unwrap()
}

/// Site with the given options text and `(file name, text)` entries.
pub fn make_site(options: &str, entries: &[(&str, &str)]) -> TempDir {
    make_site_in(&env::temp_dir(), options, entries)
}

/// Same as [`make_site`], placed under `parent`. The site path is relative when `parent` is.
pub fn make_site_in(parent: &Path, options: &str, entries: &[(&str, &str)]) -> TempDir {
    let site = TempDir::new_in(parent).unwrap();
    let entries_dir = site.path().join(ENTRIES_DIR);
    fs::create_dir_all(&entries_dir).unwrap();
    fs::write(site.path().join(OPTIONS_FILENAME), options).unwrap();
    fs::write(site.path().join(HOMEPAGE_FILENAME), HOMEPAGE_DATA).unwrap();

    for (file_name, text) in entries {
        fs::write(entries_dir.join(file_name), text).unwrap();
    }

    site
}
