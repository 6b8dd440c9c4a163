// File: ./src/model/parser.rs
// Repairs raw feed text before ICS parsing and mines the owner token

/// Raw feed text after repair, plus the owner token when the feed names one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedFeed {
    pub owner_token: Option<String>,
    pub text: String,
}

/// Prepare a raw feed body for the ICS parser.
///
/// The timetable export embeds escaped newlines as the literal two-character
/// sequence `\n`, which breaks line-oriented parsing; those are stripped
/// first. The owner token is mined from the `X-WR-CALNAME:` header when the
/// expected delimiters are present and is never an error when they are not.
pub fn normalize(raw: &str) -> NormalizedFeed {
    let text = raw.replace("\\n", "");
    let owner_token = text
        .lines()
        .find_map(|line| line.strip_prefix("X-WR-CALNAME:"))
        .and_then(extract_owner_token);
    NormalizedFeed { owner_token, text }
}

/// Pull the account identifier out of a calendar name such as
/// `Rooster: 12345678@uva.nl`: the part between the last `: ` and the
/// first `@`. Missing delimiters mean there is no token to show.
fn extract_owner_token(value: &str) -> Option<String> {
    let (_, tail) = value.rsplit_once(": ")?;
    let (token, _) = tail.split_once('@')?;
    if token.is_empty() {
        return None;
    }
    Some(token.to_string())
}
