/// Multi-keyword substring matcher.
///
/// Keywords are folded to their comparison form once; each line is folded
/// once per test. Without case sensitivity both sides are lower-cased.
#[derive(Debug, Clone)]
pub struct KeywordMatcher {
    keywords: Vec<String>,
    case_sensitive: bool,
}

impl KeywordMatcher {
    pub fn new<S: AsRef<str>>(keywords: &[S], case_sensitive: bool) -> Self {
        let keywords = keywords
            .iter()
            .map(|k| fold(k.as_ref(), case_sensitive).into_owned())
            .collect();
        Self {
            keywords,
            case_sensitive,
        }
    }

    /// Index of the first keyword found in `line`, if any.
    pub fn find(&self, line: &str) -> Option<usize> {
        let line = fold(line, self.case_sensitive);
        self.keywords.iter().position(|k| line.contains(k.as_str()))
    }

    pub fn is_match(&self, line: &str) -> bool {
        self.find(line).is_some()
    }
}

fn fold(text: &str, case_sensitive: bool) -> std::borrow::Cow<'_, str> {
    if case_sensitive {
        text.into()
    } else {
        // Per character, so a word-final capital sigma folds the same way in
        // a keyword as in a line
        text.chars()
            .flat_map(char::to_lowercase)
            .collect::<String>()
            .into()
    }
}
