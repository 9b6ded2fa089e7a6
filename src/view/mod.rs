pub mod homepage_renderer;
pub mod page_renderer;
pub mod stylesheet_renderer;

/// Replaces the first occurrence of each token, in the given order.
///
/// Templates list their tokens top to bottom and callers substitute bottom to
/// top, so a value can never be mistaken for a token that is still waiting.
pub fn fill_template(template: &str, substitutions: &[(&str, &str)]) -> String {
    let mut buf = template.to_string();
    for (token, value) in substitutions {
        buf = buf.replacen(token, value, 1);
    }
    buf
}
