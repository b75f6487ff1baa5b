//! Ordered title cleanup. Later rules assume earlier ones already removed
//! surrounding boilerplate, so reordering changes results.

use std::sync::LazyLock;

use regex::Regex;

const SEP: &str = r"[-\x{2014}\x{2013}:|.]";

static CASCADE: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    [
        // season prefix: "S2 "
        r"^S\d+\s".to_string(),
        r"^Ep\.\d{1,3}\s?".to_string(),
        // "Syntax #512: "
        r"^([^\d#]+)?#\d{1,3}:?\s".to_string(),
        r"^Hasty Treats\s?-\s".to_string(),
        r"^(Bonus|BONUS):\s?".to_string(),
        r"^Ep\.\s".to_string(),
        r"\s\x{2014}\sOvercast".to_string(),
        r"\s-\sYouTube".to_string(),
        r"\s+on Vimeo".to_string(),
        r"The\sAdventure\sZone:".to_string(),
        r"\s-\sEp\.?\s\d+$".to_string(),
        r":\sArticles\sof\sInterest\s#\d+$".to_string(),
        r"\s[-\x{2014}]\s([0-9A-Za-z]+\s)+[-\x{2014}]\s(Overcast)".to_string(),
        // leading episode numbering: "12 - ", "Episode 12: ", "S1 E2 - ", "12. "
        format!(
            r"^(\D\d{{1,3}}\s{SEP}\s|\d{{1,3}}\s{SEP}\s|\w\d\D\w\d\s{SEP}\s|\w+\s\d{{1,3}}{SEP}\s|\d{{1,3}}{SEP}\s)"
        ),
        r"\s\x{2014}(\s[A-Za-z]+)+".to_string(),
        r"\s+$".to_string(),
        r"^\s+".to_string(),
    ]
    .iter()
    .map(|p| Regex::new(p).unwrap())
    .collect()
});

pub fn clean_title(raw: &str) -> String {
    CASCADE
        .iter()
        .fold(raw.to_string(), |title, re| re.replace_all(&title, "").into_owned())
}
