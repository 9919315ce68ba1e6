//! Grounding context assembly from retrieved documents

use crate::models::RetrievedDocument;

/// Concatenate retrieved documents into a single grounding context. Each
/// document is preceded by its source metadata, and documents appear in the
/// similarity-search ranking order they were retrieved in (best match
/// first), never re-sorted.
pub fn assemble_context(documents: &[RetrievedDocument]) -> String {
    documents
        .iter()
        .map(|doc| {
            let source = doc
                .metadata
                .get("filename")
                .or_else(|| doc.metadata.get("source"))
                .map(String::as_str)
                .unwrap_or("unknown");
            let chunk = doc
                .metadata
                .get("chunk_index")
                .map(String::as_str)
                .unwrap_or("?");
            format!(
                "[Source: {source}, chunk {chunk}]\n{}",
                doc.page_content
            )
        })
        .collect::<Vec<_>>()
        .join("\n\n")
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn doc(content: &str, filename: &str, chunk_index: &str) -> RetrievedDocument {
        let mut metadata = HashMap::new();
        metadata.insert("filename".to_string(), filename.to_string());
        metadata.insert("chunk_index".to_string(), chunk_index.to_string());
        RetrievedDocument {
            page_content: content.to_string(),
            metadata,
        }
    }

    #[test]
    fn test_empty_retrieval_yields_empty_context() {
        assert_eq!(assemble_context(&[]), "");
    }

    #[test]
    fn test_context_preserves_ranking_order() {
        let docs = vec![doc("best match", "a.txt", "0"), doc("runner up", "b.txt", "3")];
        let context = assemble_context(&docs);
        let best = context.find("best match").unwrap();
        let second = context.find("runner up").unwrap();
        assert!(best < second);
        assert!(context.contains("[Source: a.txt, chunk 0]"));
        assert!(context.contains("[Source: b.txt, chunk 3]"));
    }

    #[test]
    fn test_missing_metadata_falls_back_to_unknown() {
        let docs = vec![RetrievedDocument {
            page_content: "orphan text".to_string(),
            metadata: HashMap::new(),
        }];
        let context = assemble_context(&docs);
        assert!(context.contains("[Source: unknown, chunk ?]"));
        assert!(context.contains("orphan text"));
    }
}
