/// Lower-case a token and strip ASCII punctuation.
///
/// Only the ASCII punctuation set ``!"#$%&'()*+,-./:;<=>?@[\]^_`{|}~`` is
/// removed. Non-ASCII punctuation such as curly quotes or em-dashes is kept,
/// as are all non-ASCII letters and digits. The result may be empty.
pub fn normalize_token(token: &str) -> String {
    token
        .to_lowercase()
        .chars()
        .filter(|c| !c.is_ascii_punctuation())
        .collect()
}
