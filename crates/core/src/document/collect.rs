//! Group phone segments by phrase and phrases by sentence.

use crate::types::{Document, Segment, SentencePosition, Token};

/// A phrase with its tokens and phone segments, in document order.
#[derive(Debug, Clone)]
pub struct CollectedPhrase<'a> {
    /// Index of the phrase within its sentence
    pub index: usize,
    pub tokens: &'a [Token],
    /// Phone segments only; boundaries are left out
    pub phones: Vec<&'a Segment>,
}

/// A sentence with its position class and collected phrases.
#[derive(Debug, Clone)]
pub struct CollectedSentence<'a> {
    /// Index of the sentence within the document
    pub index: usize,
    pub position: SentencePosition,
    pub phrases: Vec<CollectedPhrase<'a>>,
}

/// Walk the document and collect every sentence and phrase.
///
/// Returns an empty list for a document without sentences.
pub fn collect(doc: &Document) -> Vec<CollectedSentence<'_>> {
    let count = doc.sentences.len();

    doc.sentences
        .iter()
        .enumerate()
        .map(|(si, sentence)| CollectedSentence {
            index: si,
            position: SentencePosition::from_index(si, count),
            phrases: sentence
                .phrases
                .iter()
                .enumerate()
                .map(|(pi, phrase)| CollectedPhrase {
                    index: pi,
                    tokens: &phrase.tokens,
                    phones: phrase.phone_segments(),
                })
                .collect(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Boundary, Phone, Phrase, Sentence};

    fn sentence(words: &[&str]) -> Sentence {
        let tokens = words
            .iter()
            .map(|w| {
                Token::new(
                    w,
                    "NN",
                    vec![
                        Segment::Phone(Phone::new(w, 100.0)),
                        Segment::Boundary(Boundary::new(Some("1"))),
                    ],
                )
            })
            .collect();
        Sentence::new(vec![Phrase::new(tokens)])
    }

    #[test]
    fn test_collect_empty_document() {
        assert!(collect(&Document::default()).is_empty());
    }

    #[test]
    fn test_collect_positions() {
        let doc = Document::new(vec![sentence(&["a"]), sentence(&["b"]), sentence(&["c"])]);
        let positions: Vec<SentencePosition> = collect(&doc).iter().map(|s| s.position).collect();
        assert_eq!(
            positions,
            vec![SentencePosition::First, SentencePosition::Middle, SentencePosition::Last]
        );
    }

    #[test]
    fn test_collect_single_sentence_is_first() {
        let doc = Document::new(vec![sentence(&["only"])]);
        let collected = collect(&doc);
        assert_eq!(collected.len(), 1);
        assert_eq!(collected[0].position, SentencePosition::First);
    }

    #[test]
    fn test_collect_phones_in_order() {
        let doc = Document::new(vec![sentence(&["x", "y", "z"])]);
        let collected = collect(&doc);
        let phrase = &collected[0].phrases[0];
        assert_eq!(phrase.tokens.len(), 3);
        let symbols: Vec<&str> = phrase
            .phones
            .iter()
            .filter_map(|s| s.as_phone())
            .map(|p| p.symbol.as_str())
            .collect();
        assert_eq!(symbols, vec!["x", "y", "z"]);
    }
}
