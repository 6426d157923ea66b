use std::collections::HashSet;

use crate::schema::EntitySpan;

/// Collapse exact (text, label) duplicates, keeping first-occurrence order.
///
/// Matching is case-sensitive; whitespace was normalized upstream. This is a
/// per-document pass — global identity is still enforced by the store's
/// merge semantics, since the same entity can reappear in another document.
pub fn dedup_spans(spans: Vec<EntitySpan>) -> Vec<EntitySpan> {
    let mut seen = HashSet::with_capacity(spans.len());
    let mut unique = Vec::with_capacity(spans.len());

    for span in spans {
        if seen.insert(span.clone()) {
            unique.push(span);
        }
    }
    unique
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn drops_exact_duplicates() {
        let spans = vec![
            EntitySpan::new("Paris", "GPE"),
            EntitySpan::new("Paris", "GPE"),
            EntitySpan::new("Ada Lovelace", "PERSON"),
        ];
        let unique = dedup_spans(spans);
        assert_eq!(
            unique,
            vec![
                EntitySpan::new("Paris", "GPE"),
                EntitySpan::new("Ada Lovelace", "PERSON"),
            ]
        );
    }

    #[test]
    fn preserves_first_occurrence_order() {
        let spans = vec![
            EntitySpan::new("b", "X"),
            EntitySpan::new("a", "X"),
            EntitySpan::new("b", "X"),
            EntitySpan::new("c", "X"),
            EntitySpan::new("a", "X"),
        ];
        let texts: Vec<_> = dedup_spans(spans).into_iter().map(|s| s.text).collect();
        assert_eq!(texts, vec!["b", "a", "c"]);
    }

    #[test]
    fn matching_is_case_sensitive() {
        let spans = vec![
            EntitySpan::new("paris", "GPE"),
            EntitySpan::new("Paris", "GPE"),
        ];
        assert_eq!(dedup_spans(spans).len(), 2);
    }

    #[test]
    fn same_text_with_different_labels_is_kept() {
        let spans = vec![
            EntitySpan::new("Washington", "GPE"),
            EntitySpan::new("Washington", "PERSON"),
        ];
        assert_eq!(dedup_spans(spans).len(), 2);
    }
}
