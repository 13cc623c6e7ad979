// Paraphrase Segmenter Service
// Splits paraphrased text into sentences and performs in-place word and
// sentence replacement while preserving punctuation and capitalization.

use regex::Regex;
use serde::{Deserialize, Serialize};

/// Trailing punctuation a replaced word inherits from the original token.
const INHERITED_PUNCTUATION: [char; 6] = ['.', ',', '!', '?', ';', ':'];

/// Ordered sequence of sentences produced by segmenting raw text.
///
/// A sentence boundary is a run of non-terminator characters followed by
/// one or more of `.`, `!`, `?`; a trailing remainder without a terminator
/// becomes the final sentence. Sentences keep their original leading
/// whitespace and trailing terminators, so concatenating them reproduces
/// the input. Abbreviations are not special-cased: "Hello Dr. Smith." splits
/// after "Dr." — this matches the upstream rewriter contract and is kept
/// as-is rather than fixed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    sentences: Vec<String>,
}

impl Document {
    /// Segment raw text by the terminator rule. Empty input (or input with
    /// no matchable run, e.g. only terminators) yields the whole input as a
    /// single sentence, so there is no special empty-document case.
    pub fn segment(raw_text: &str) -> Self {
        let re = Regex::new(r"[^.!?]+[.!?]+|[^.!?]+$").unwrap();
        let sentences: Vec<String> = re
            .find_iter(raw_text)
            .map(|m| m.as_str().to_string())
            .collect();

        if sentences.is_empty() {
            return Self {
                sentences: vec![raw_text.to_string()],
            };
        }
        Self { sentences }
    }

    pub fn sentences(&self) -> &[String] {
        &self.sentences
    }

    pub fn len(&self) -> usize {
        self.sentences.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sentences.is_empty()
    }

    /// Word tokens of one sentence, derived on demand by splitting on single
    /// spaces. Tokens are never cached, so they can't go stale across
    /// mutations.
    ///
    /// Panics if `sentence_idx` is out of range.
    pub fn words(&self, sentence_idx: usize) -> Vec<&str> {
        self.sentences[sentence_idx].split(' ').collect()
    }

    /// Replace a single word token in place.
    ///
    /// The replacement inherits one trailing punctuation character from the
    /// set `. , ! ? ; :` and the first-letter capitalization of the original
    /// token (first letter only, not a full-word case match). The sentence is
    /// rejoined with single spaces; word count is unchanged and every other
    /// sentence is untouched.
    ///
    /// Panics if either index is out of range — out-of-range indices are a
    /// contract violation on the caller, not a recoverable condition.
    pub fn replace_word(&mut self, sentence_idx: usize, word_idx: usize, new_word: &str) {
        let words: Vec<&str> = self.sentences[sentence_idx].split(' ').collect();
        let original = words[word_idx];

        let punctuation = original
            .chars()
            .last()
            .filter(|c| INHERITED_PUNCTUATION.contains(c));

        let mut replacement = if starts_uppercase(original) {
            capitalize_first(new_word)
        } else {
            new_word.to_string()
        };
        if let Some(p) = punctuation {
            replacement.push(p);
        }

        let mut rebuilt: Vec<&str> = words;
        rebuilt[word_idx] = &replacement;
        let joined = rebuilt.join(" ");
        self.sentences[sentence_idx] = joined;
    }

    /// Replace an entire sentence. No punctuation or case inheritance: the
    /// caller supplies a complete sentence. Word tokens are re-derived on
    /// next access.
    ///
    /// Panics if `sentence_idx` is out of range.
    pub fn replace_sentence(&mut self, sentence_idx: usize, new_sentence: &str) {
        self.sentences[sentence_idx] = new_sentence.to_string();
    }

    /// Concatenation of all sentences in order.
    pub fn text(&self) -> String {
        self.sentences.concat()
    }
}

/// Strip a token down to the form sent to the synonym service: word
/// characters and whitespace only. A punctuation-only token cleans to the
/// empty string and is therefore never replaceable through the word path.
pub fn clean_word(token: &str) -> String {
    let re = Regex::new(r"[^\w\s]").unwrap();
    re.replace_all(token, "").to_string()
}

fn starts_uppercase(token: &str) -> bool {
    token.chars().next().map(|c| c.is_uppercase()).unwrap_or(false)
}

fn capitalize_first(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

// ============ Selection ============

/// Exactly one edit target is active at a time; holding the word and
/// sentence targets in one enum makes "both active" unrepresentable.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Default, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum SelectionState {
    #[default]
    None,
    #[serde(rename_all = "camelCase")]
    Word { sentence_idx: usize, word_idx: usize },
    #[serde(rename_all = "camelCase")]
    Sentence { sentence_idx: usize },
}

/// Editing state for one paraphrase result: the segmented document plus the
/// active edit target. All transitions are synchronous and deterministic.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParaphraseEditor {
    document: Document,
    selection: SelectionState,
}

impl ParaphraseEditor {
    pub fn from_text(raw_text: &str) -> Self {
        Self {
            document: Document::segment(raw_text),
            selection: SelectionState::None,
        }
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn selection(&self) -> SelectionState {
        self.selection
    }

    /// Target a word for replacement, clearing any sentence target. Returns
    /// the cleaned token to look up synonyms for; a token that cleans to
    /// empty (punctuation only) is not selectable and the current selection
    /// is left unchanged.
    ///
    /// Panics if either index is out of range.
    pub fn select_word(&mut self, sentence_idx: usize, word_idx: usize) -> Option<String> {
        let token = self.document.words(sentence_idx)[word_idx];
        let cleaned = clean_word(token);
        if cleaned.is_empty() {
            return None;
        }
        self.selection = SelectionState::Word { sentence_idx, word_idx };
        Some(cleaned)
    }

    /// Target a sentence for rewrite, clearing any word target. Returns the
    /// sentence text to request variants for.
    ///
    /// Panics if `sentence_idx` is out of range.
    pub fn select_sentence(&mut self, sentence_idx: usize) -> String {
        let sentence = self.document.sentences()[sentence_idx].clone();
        self.selection = SelectionState::Sentence { sentence_idx };
        sentence
    }

    /// Background click or explicit popup close.
    pub fn dismiss(&mut self) {
        self.selection = SelectionState::None;
    }

    /// Apply a chosen candidate to the active word target. Clears the
    /// selection on success; returns false when no word target is active.
    pub fn apply_word_replacement(&mut self, new_word: &str) -> bool {
        let SelectionState::Word { sentence_idx, word_idx } = self.selection else {
            return false;
        };
        self.document.replace_word(sentence_idx, word_idx, new_word);
        self.selection = SelectionState::None;
        true
    }

    /// Apply a chosen variant to the active sentence target. Clears the
    /// selection on success; returns false when no sentence target is active.
    pub fn apply_sentence_replacement(&mut self, new_sentence: &str) -> bool {
        let SelectionState::Sentence { sentence_idx } = self.selection else {
            return false;
        };
        self.document.replace_sentence(sentence_idx, new_sentence);
        self.selection = SelectionState::None;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_segment_terminator_rule_splits_abbreviations() {
        let doc = Document::segment("Hello Dr. Smith. How are you");
        assert_eq!(
            doc.sentences(),
            &["Hello Dr.", " Smith.", " How are you"]
        );
    }

    #[test]
    fn test_segment_empty_input_yields_single_empty_sentence() {
        let doc = Document::segment("");
        assert_eq!(doc.sentences(), &[""]);
    }

    #[test]
    fn test_segment_terminator_only_input_kept_whole() {
        let doc = Document::segment("?!.");
        assert_eq!(doc.sentences(), &["?!."]);
    }

    #[test]
    fn test_segment_concat_reproduces_input() {
        let text = "One sentence. Another one! A question? And a tail";
        let doc = Document::segment(text);
        assert_eq!(doc.text(), text);
    }

    #[test]
    fn test_replace_word_inherits_punctuation_and_case() {
        let mut doc = Document::segment("Running. fast now");
        doc.replace_word(0, 0, "jumping");
        assert_eq!(doc.sentences()[0], "Jumping.");
    }

    #[test]
    fn test_replace_word_preserves_counts_and_other_sentences() {
        let mut doc = Document::segment("The cat sat. The dog ran.");
        let before_words = doc.words(1).len();
        doc.replace_word(1, 2, "wolf");
        assert_eq!(doc.len(), 2);
        assert_eq!(doc.words(1).len(), before_words);
        assert_eq!(doc.sentences()[0], "The cat sat.");
        assert_eq!(doc.sentences()[1], " The wolf ran.");
    }

    #[test]
    fn test_replace_word_lowercase_original_untouched_case() {
        let mut doc = Document::segment("the cat, sat");
        doc.replace_word(0, 1, "Dog");
        // First-letter check only: replacement case is not lowered.
        assert_eq!(doc.sentences()[0], "the Dog, sat");
    }

    #[test]
    #[should_panic]
    fn test_replace_word_out_of_range_panics() {
        let mut doc = Document::segment("short sentence.");
        doc.replace_word(0, 10, "word");
    }

    #[test]
    fn test_replace_sentence_no_inheritance() {
        let mut doc = Document::segment("First one. Second one.");
        doc.replace_sentence(1, " a plain rewrite");
        assert_eq!(doc.sentences()[1], " a plain rewrite");
        assert_eq!(doc.sentences()[0], "First one.");
    }

    #[test]
    fn test_clean_word_strips_punctuation() {
        assert_eq!(clean_word("word,"), "word");
        assert_eq!(clean_word("..."), "");
    }

    #[test]
    fn test_selection_targets_are_mutually_exclusive() {
        let mut editor = ParaphraseEditor::from_text("One two. Three four.");
        assert!(editor.select_word(0, 0).is_some());
        assert!(matches!(editor.selection(), SelectionState::Word { .. }));

        editor.select_sentence(1);
        assert_eq!(editor.selection(), SelectionState::Sentence { sentence_idx: 1 });

        assert!(editor.select_word(0, 1).is_some());
        assert_eq!(
            editor.selection(),
            SelectionState::Word { sentence_idx: 0, word_idx: 1 }
        );
    }

    #[test]
    fn test_punctuation_only_token_not_selectable() {
        let mut editor = ParaphraseEditor::from_text("wait - no.");
        let cleaned = editor.select_word(0, 1);
        assert!(cleaned.is_none());
        assert_eq!(editor.selection(), SelectionState::None);
    }

    #[test]
    fn test_successful_replacement_clears_selection() {
        let mut editor = ParaphraseEditor::from_text("Quick brown fox.");
        editor.select_word(0, 1);
        assert!(editor.apply_word_replacement("red"));
        assert_eq!(editor.selection(), SelectionState::None);
        assert_eq!(editor.document().sentences()[0], "Quick red fox.");
    }

    #[test]
    fn test_replacement_without_target_is_rejected() {
        let mut editor = ParaphraseEditor::from_text("Quick brown fox.");
        assert!(!editor.apply_word_replacement("red"));
        assert!(!editor.apply_sentence_replacement("A new sentence."));
    }

    #[test]
    fn test_dismiss_clears_selection() {
        let mut editor = ParaphraseEditor::from_text("Quick brown fox.");
        editor.select_sentence(0);
        editor.dismiss();
        assert_eq!(editor.selection(), SelectionState::None);
    }
}
