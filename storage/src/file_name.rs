//! File names for stored images: `image_<slug>_<unix-seconds>.png`.

/// Number of prompt characters kept in the slug.
pub const SLUG_MAX_CHARS: usize = 20;

/// First [`SLUG_MAX_CHARS`] characters of the prompt, with everything that is not alphanumeric
/// replaced by `_`.
pub fn prompt_slug(prompt: &str) -> String {
    prompt
        .chars()
        .take(SLUG_MAX_CHARS)
        .map(|c| if c.is_alphanumeric() { c } else { '_' })
        .collect()
}

/// Builds the file name for an image generated from `prompt` at `unix_seconds`.
pub fn image_file_name(prompt: &str, unix_seconds: i64) -> String {
    format!("image_{}_{}.png", prompt_slug(prompt), unix_seconds)
}
