//! Input sanitization utilities

/// Strip characters that could be interpreted as markup
///
/// This is a minimal denylist applied before validation; rendering code is
/// still expected to encode output for its own context.
pub fn sanitize_input(input: &str) -> String {
    input.chars().filter(|c| !matches!(c, '<' | '>')).collect()
}
