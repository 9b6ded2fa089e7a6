use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    // Spans must start and end on a non-whitespace character and may cross lines
    static ref BOLD_REGEX: Regex = Regex::new(r"(?is)\*(\S(.*?\S)?)\*").unwrap();
    static ref ITALIC_REGEX: Regex = Regex::new(r"(?is)_(\S(.*?\S)?)_").unwrap();
    static ref COLOR_REGEX: Regex = Regex::new(
        r"(?is)\{([^{]*?)\}\(([^()]*?|var\(--[_a-zA-Z0-9-]*\))\)"
    ).unwrap();
    static ref LINK_REGEX: Regex = Regex::new(r"(?is)\[([^\[]+)\]\(([^)]+)\)").unwrap();
}

/// Expands Pupate markup into HTML.
///
/// | Markup | HTML |
/// |---|---|
/// | `*text*` | `<b>text</b>` |
/// | `_text_` | `<i>text</i>` |
/// | `{text}(color)` | `<span style="color: color">text</span>` |
/// | `[text](target)` | `<a href="target">text</a>` |
///
/// Rules run in that order, each one over the output of the previous.
pub fn embellish(text: &str) -> String {
    apply(text, [
        "<b>${1}</b>",
        "<i>${1}</i>",
        r#"<span style="color: ${2}">${1}</span>"#,
        r#"<a href="${2}">${1}</a>"#,
    ])
}

/// Removes Pupate markup, keeping only the marked text.
pub fn unembellish(text: &str) -> String {
    apply(text, ["${1}"; 4])
}

fn apply(text: &str, replacements: [&str; 4]) -> String {
    let rules: [&Regex; 4] = [&BOLD_REGEX, &ITALIC_REGEX, &COLOR_REGEX, &LINK_REGEX];

    rules.iter()
        .zip(replacements)
        .fold(text.to_string(), |buf, (regex, replacement)| {
            regex.replace_all(&buf, replacement).into_owned()
        })
}
