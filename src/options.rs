use std::collections::HashMap;
use std::fmt::{self, Display, Formatter};
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use lazy_static::lazy_static;
use regex::Regex;
use spdlog::{debug, Logger};
use thiserror::Error;

pub const OPTIONS_FILENAME: &str = "options.txt";

/// Bundled defaults, which must name every option below
pub const DEFAULT_OPTIONS: &str = include_str!("../res/options.txt");
const DEFAULT_OPTIONS_SOURCE: &str = "bundled options.txt";

pub const FONT: &str = "fontIs";
pub const SIZE: &str = "sizeIs";
pub const TEXT_COLOR: &str = "textColorIs";
pub const LINK_COLOR: &str = "linkColorIs";
pub const BACKGROUND_COLOR: &str = "backgroundColorIs";
pub const SHOW_INDEX_WITH: &str = "showIndexWith";
pub const SORT_INDEX_BY: &str = "sortIndexBy";
pub const PAGE_URLS_BASED_ON: &str = "pageURLsBasedOn";
pub const OUTPUT_LOCATION: &str = "outputLocationIs";

lazy_static! {
    static ref BLANK_LINE_REGEX: Regex = Regex::new(r"^\s*$").unwrap();
    static ref FLAG_LINE_REGEX: Regex = Regex::new(r"^[A-Za-z]+\s*$").unwrap();
    static ref OPTION_LINE_REGEX: Regex = Regex::new(r"^(?P<key>[A-Za-z]+) (?P<value>.+)$").unwrap();
}

#[derive(Debug, Error)]
pub enum OptionsError {
    #[error("Could not read options file `{}`: {source}", .path.display())]
    Read { path: PathBuf, source: std::io::Error },

    #[error("Options file not formatted properly: {file} (line {line_number}: `{line}`)")]
    Format { file: String, line_number: usize, line: String },

    #[error("The following options in {file} were not valid: {details}")]
    Value { file: String, details: String },

    #[error("No default value for option `{key}`")]
    MissingDefault { key: &'static str },
}

pub type OptionsDict = HashMap<String, String>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShowIndexWith {
    Dates,
    NoDates,
    Dont,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortIndexBy {
    Newest,
    Oldest,
    Filename,
    Title,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageUrlsBasedOn {
    Title,
    Filename,
    Date,
}

impl ShowIndexWith {
    pub fn as_str(&self) -> &'static str {
        match self {
            ShowIndexWith::Dates => "dates",
            ShowIndexWith::NoDates => "noDates",
            ShowIndexWith::Dont => "dont",
        }
    }
}

impl FromStr for ShowIndexWith {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "dates" => Ok(ShowIndexWith::Dates),
            "noDates" => Ok(ShowIndexWith::NoDates),
            "dont" => Ok(ShowIndexWith::Dont),
            _ => Err(()),
        }
    }
}

impl SortIndexBy {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortIndexBy::Newest => "newest",
            SortIndexBy::Oldest => "oldest",
            SortIndexBy::Filename => "filename",
            SortIndexBy::Title => "title",
        }
    }
}

impl FromStr for SortIndexBy {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "newest" => Ok(SortIndexBy::Newest),
            "oldest" => Ok(SortIndexBy::Oldest),
            "filename" => Ok(SortIndexBy::Filename),
            "title" => Ok(SortIndexBy::Title),
            _ => Err(()),
        }
    }
}

impl PageUrlsBasedOn {
    pub fn as_str(&self) -> &'static str {
        match self {
            PageUrlsBasedOn::Title => "title",
            PageUrlsBasedOn::Filename => "filename",
            PageUrlsBasedOn::Date => "date",
        }
    }
}

impl FromStr for PageUrlsBasedOn {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "title" => Ok(PageUrlsBasedOn::Title),
            "filename" => Ok(PageUrlsBasedOn::Filename),
            "date" => Ok(PageUrlsBasedOn::Date),
            _ => Err(()),
        }
    }
}

impl Display for ShowIndexWith {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Display for SortIndexBy {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Display for PageUrlsBasedOn {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Fully resolved build configuration. Every field holds either the user's value or the default.
#[derive(Debug, Clone, PartialEq)]
pub struct Options {
    pub font: String,
    pub size: String,
    pub text_color: String,
    pub link_color: String,
    pub background_color: String,
    pub show_index_with: ShowIndexWith,
    pub sort_index_by: SortIndexBy,
    pub page_urls_based_on: PageUrlsBasedOn,
    /// Relative to the site root
    pub output_location: PathBuf,
}

impl Options {
    /// Picks every option from `user`, falling back on `defaults`.
    pub fn resolve(user: &OptionsDict, defaults: &OptionsDict, logger: &Logger) -> Result<Options, OptionsError> {
        let pick = |key: &'static str| -> Result<String, OptionsError> {
            if let Some(value) = user.get(key) {
                return Ok(value.clone());
            }
            match defaults.get(key) {
                Some(value) => {
                    debug!(logger: logger, "Option {} not set, using default `{}`", key, value);
                    Ok(value.clone())
                }
                None => Err(OptionsError::MissingDefault { key }),
            }
        };

        Ok(Options {
            font: pick(FONT)?,
            size: pick(SIZE)?,
            text_color: pick(TEXT_COLOR)?,
            link_color: pick(LINK_COLOR)?,
            background_color: pick(BACKGROUND_COLOR)?,
            show_index_with: parse_checked(SHOW_INDEX_WITH, &pick(SHOW_INDEX_WITH)?)?,
            sort_index_by: parse_checked(SORT_INDEX_BY, &pick(SORT_INDEX_BY)?)?,
            page_urls_based_on: parse_checked(PAGE_URLS_BASED_ON, &pick(PAGE_URLS_BASED_ON)?)?,
            output_location: PathBuf::from(pick(OUTPUT_LOCATION)?),
        })
    }
}

/// Reads the user's options file and merges it over the bundled defaults.
pub fn create_options(path: &Path, logger: &Logger) -> Result<Options, OptionsError> {
    let user = get_options_dict(path)?;
    let defaults = parse_options_dict(DEFAULT_OPTIONS, DEFAULT_OPTIONS_SOURCE)?;
    debug!(logger: logger, "Read {} options from {}", user.len(), path.display());

    Options::resolve(&user, &defaults, logger)
}

/// Reads an options file into a dictionary of option-name to value.
pub fn get_options_dict(path: &Path) -> Result<OptionsDict, OptionsError> {
    let text = fs::read_to_string(path).map_err(|source| OptionsError::Read {
        path: path.to_path_buf(),
        source,
    })?;

    parse_options_dict(&text, &path.display().to_string())
}

/// Parses options text. `source` only names the text in errors.
///
/// Each line is blank, a lone option name (ignored) or an option name, one
/// space and the value, which runs to the end of the line.
pub fn parse_options_dict(text: &str, source: &str) -> Result<OptionsDict, OptionsError> {
    let mut dict = OptionsDict::new();

    for (index, line) in text.lines().enumerate() {
        if BLANK_LINE_REGEX.is_match(line) || FLAG_LINE_REGEX.is_match(line) {
            continue;
        }

        let Some(caps) = OPTION_LINE_REGEX.captures(line) else {
            return Err(OptionsError::Format {
                file: source.to_string(),
                line_number: index + 1,
                line: line.to_string(),
            });
        };
        dict.insert(caps["key"].to_string(), caps["value"].to_string());
    }

    validate_values(&dict, source)?;

    Ok(dict)
}

/// Reports every option whose value is not one of its allowed values.
fn validate_values(dict: &OptionsDict, source: &str) -> Result<(), OptionsError> {
    let mut invalid: Vec<String> = vec![];

    check_value::<ShowIndexWith>(dict, SHOW_INDEX_WITH, &mut invalid);
    check_value::<SortIndexBy>(dict, SORT_INDEX_BY, &mut invalid);
    check_value::<PageUrlsBasedOn>(dict, PAGE_URLS_BASED_ON, &mut invalid);

    if invalid.is_empty() {
        return Ok(());
    }

    Err(OptionsError::Value {
        file: source.to_string(),
        details: invalid.join(", "),
    })
}

fn check_value<T: FromStr>(dict: &OptionsDict, key: &str, invalid: &mut Vec<String>) {
    if let Some(value) = dict.get(key) {
        if value.parse::<T>().is_err() {
            invalid.push(format!("{} {}", key, value));
        }
    }
}

fn parse_checked<T: FromStr>(key: &str, value: &str) -> Result<T, OptionsError> {
    value.parse::<T>().map_err(|_| OptionsError::Value {
        file: DEFAULT_OPTIONS_SOURCE.to_string(),
        details: format!("{} {}", key, value),
    })
}
