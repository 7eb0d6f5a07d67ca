/// Average reading speed used for estimates.
pub const WORDS_PER_MINUTE: usize = 200;

/// Estimated minutes needed to read `content`, never less than one.
pub fn estimate_reading_time(content: &str) -> i32 {
    let words = content.split_whitespace().count();
    let minutes = words.div_ceil(WORDS_PER_MINUTE).max(1);
    i32::try_from(minutes).unwrap_or(i32::MAX)
}
