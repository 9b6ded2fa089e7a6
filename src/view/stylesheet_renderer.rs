use std::path::{Path, PathBuf};

use spdlog::{debug, Logger};

use crate::error::Result;
use crate::imago::write_file;
use crate::options::Options;
use crate::view::fill_template;

pub const STYLES_TEMPLATE: &str = include_str!("../../res/imago/styles.css");
pub const STYLES_FILENAME: &str = "styles.css";

pub fn render_stylesheet(template: &str, options: &Options) -> String {
    fill_template(template, &[
        ("LINKCOLOR", options.link_color.as_str()),
        ("BACKGROUNDCOLOR", options.background_color.as_str()),
        ("TEXTCOLOR", options.text_color.as_str()),
        ("FONTSIZE", options.size.as_str()),
        ("FONTFAMILY", options.font.as_str()),
    ])
}

/// Writes the stylesheet shared by every page to `<output>/styles.css`.
pub fn create_stylesheet(output: &Path, options: &Options, logger: &Logger) -> Result<PathBuf> {
    debug!(logger: logger, "Creating stylesheet");

    let styles_path = output.join(STYLES_FILENAME);
    write_file(&styles_path, &render_stylesheet(STYLES_TEMPLATE, options))?;
    Ok(styles_path)
}

#[cfg(test)]
mod tests {
    use std::fs;

    use tempfile::TempDir;

    use crate::test_data::{default_options, test_logger};

    use super::*;

    #[test]
    fn test_render_stylesheet() {
        let mut options = default_options();
        options.font = "Futura".to_string();
        options.size = "20px".to_string();
        options.text_color = "navy".to_string();
        options.link_color = "var(--accent)".to_string();
        options.background_color = "white".to_string();

        let template = "f: FONTFAMILY; s: FONTSIZE; c: TEXTCOLOR; b: BACKGROUNDCOLOR; a: LINKCOLOR;";
        assert_eq!(render_stylesheet(template, &options),
                   "f: Futura; s: 20px; c: navy; b: white; a: var(--accent);");
    }

    #[test]
    fn test_create_stylesheet() {
        let tmp = TempDir::new().unwrap();
        let options = default_options();
        let path = create_stylesheet(tmp.path(), &options, &test_logger()).unwrap();
        assert_eq!(path, tmp.path().join("styles.css"));

        let css = fs::read_to_string(path).unwrap();
        assert!(css.contains(&format!("font-family: {};", options.font)));
        assert!(css.contains(&format!("color: {};", options.link_color)));
        assert!(!css.contains("FONTSIZE"));
    }
}
