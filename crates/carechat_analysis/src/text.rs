//! Sentence splitting and tokenization shared by the analyzers.

/// A sentence slice of the original text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Sentence<'a> {
    /// Trimmed sentence text, terminal punctuation included
    pub text: &'a str,
    /// `?`, `!` or `.` when the sentence ended with one. A run such as
    /// `?!` counts as a question.
    pub terminator: Option<char>,
}

impl Sentence<'_> {
    pub fn is_question_mark(&self) -> bool {
        self.terminator == Some('?')
    }
}

fn is_boundary(c: char) -> bool {
    matches!(c, '.' | '!' | '?' | '\n')
}

fn terminal(c: char) -> Option<char> {
    match c {
        '.' | '!' | '?' => Some(c),
        _ => None,
    }
}

/// Split text into sentences on `.`, `!`, `?` and line breaks.
///
/// A period between two digits (`3.5`) does not end a sentence.
pub fn split_sentences(text: &str) -> Vec<Sentence<'_>> {
    let mut sentences = Vec::new();
    let mut start = 0;
    let mut prev: Option<char> = None;
    let mut chars = text.char_indices().peekable();

    while let Some((i, c)) = chars.next() {
        if !is_boundary(c) {
            prev = Some(c);
            continue;
        }

        let next_is_digit = chars.peek().is_some_and(|&(_, n)| n.is_ascii_digit());
        if c == '.' && prev.is_some_and(|p| p.is_ascii_digit()) && next_is_digit {
            prev = Some(c);
            continue;
        }

        let mut end = i + c.len_utf8();
        let mut terminator = terminal(c);
        while let Some(&(j, next)) = chars.peek() {
            if c == '\n' || !is_boundary(next) || next == '\n' {
                break;
            }
            if next == '?' {
                terminator = Some('?');
            } else if terminator.is_none() {
                terminator = terminal(next);
            }
            end = j + next.len_utf8();
            chars.next();
        }

        // The line break itself never belongs to the sentence text.
        let body_end = if c == '\n' { i } else { end };
        push_sentence(&mut sentences, &text[start..body_end], terminator);
        start = end;
        prev = None;
    }

    push_sentence(&mut sentences, &text[start..], None);
    sentences
}

fn push_sentence<'a>(sentences: &mut Vec<Sentence<'a>>, raw: &'a str, terminator: Option<char>) {
    let text = raw.trim();
    if text.chars().any(|c| !is_boundary(c) && !c.is_whitespace()) {
        sentences.push(Sentence { text, terminator });
    }
}

/// Lowercase alphabetic words. Apostrophes inside a word are kept
/// (`don't`), typographic apostrophes are normalized to `'`.
pub fn tokenize(text: &str) -> Vec<String> {
    let mut tokens = Vec::new();
    let mut current = String::new();
    let mut chars = text.chars().peekable();

    while let Some(c) = chars.next() {
        if c.is_alphabetic() {
            current.extend(c.to_lowercase());
        } else if matches!(c, '\'' | '\u{2019}')
            && !current.is_empty()
            && chars.peek().is_some_and(|n| n.is_alphabetic())
        {
            current.push('\'');
        } else if !current.is_empty() {
            tokens.push(std::mem::take(&mut current));
        }
    }

    if !current.is_empty() {
        tokens.push(current);
    }
    tokens
}

/// Common English function words excluded from co-occurrence counts.
pub const STOPWORDS: &[&str] = &[
    "i", "me", "my", "myself", "we", "our", "ours", "ourselves", "you", "your", "yours",
    "yourself", "yourselves", "he", "him", "his", "himself", "she", "her", "hers", "herself",
    "it", "its", "itself", "they", "them", "their", "theirs", "themselves", "what", "which",
    "who", "whom", "this", "that", "these", "those", "am", "is", "are", "was", "were", "be",
    "been", "being", "have", "has", "had", "having", "do", "does", "did", "doing", "a", "an",
    "the", "and", "but", "if", "or", "because", "as", "until", "while", "of", "at", "by",
    "for", "with", "about", "against", "between", "into", "through", "during", "before",
    "after", "above", "below", "to", "from", "up", "down", "in", "out", "on", "off", "over",
    "under", "again", "further", "then", "once", "here", "there", "when", "where", "why",
    "how", "all", "any", "both", "each", "few", "more", "most", "other", "some", "such", "no",
    "nor", "not", "only", "own", "same", "so", "than", "too", "very", "can", "will", "just",
    "don't", "should", "now", "i'm", "it's", "i've", "i'd", "i'll", "you're", "that's",
    "can't", "didn't", "doesn't", "isn't", "wasn't", "won't", "would", "could", "also",
];

pub fn is_stopword(word: &str) -> bool {
    STOPWORDS.contains(&word)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_sentences() {
        let sentences = split_sentences("I love this. Why does it fail?! Fine");
        assert_eq!(sentences.len(), 3);
        assert_eq!(sentences[0].text, "I love this.");
        assert_eq!(sentences[0].terminator, Some('.'));
        assert_eq!(sentences[1].text, "Why does it fail?!");
        assert!(sentences[1].is_question_mark());
        assert_eq!(sentences[2].text, "Fine");
        assert_eq!(sentences[2].terminator, None);
    }

    #[test]
    fn test_split_keeps_decimals() {
        let sentences = split_sentences("I slept 7.5 hours. Better.");
        assert_eq!(sentences.len(), 2);
        assert_eq!(sentences[0].text, "I slept 7.5 hours.");
    }

    #[test]
    fn test_split_line_breaks_and_noise() {
        let sentences = split_sentences("first line\nsecond line\n\n...!!!");
        assert_eq!(sentences.len(), 2);
        assert_eq!(sentences[1].text, "second line");
        assert!(split_sentences("").is_empty());
        assert!(split_sentences("?!.").is_empty());
    }

    #[test]
    fn test_tokenize() {
        assert_eq!(
            tokenize("I don\u{2019}t KNOW, really!"),
            vec!["i", "don't", "know", "really"]
        );
        assert!(tokenize("🙂 ... 123").is_empty());
        assert_eq!(tokenize("'quoted'"), vec!["quoted"]);
    }
}
