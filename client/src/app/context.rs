//! # Context Assembler
//!
//! Renders the grounding system prompt sent with every chat turn. The prompt is rebuilt
//! from the session's current documents and sources on each send, so removals take
//! effect on the next message.
//!
//! Layout:
//!
//! ```text
//! <preamble naming the persona, ending with "AVAILABLE INFORMATION:">
//! UPLOADED DOCUMENTS:          (omitted when there are no documents)
//!
//! --- notes.md ---
//! <text>
//!
//! WEB SOURCES:                 (omitted when there are no sources)
//!
//! --- <title> ---
//! URL: <url>
//! Summary: <summary>
//!
//! Now answer the following question ...
//! ```

use std::fmt::Write;

use shared::{Document, DocumentKind, WebSource};

/// Stand-in line for a PDF; the file itself travels as a document block.
pub const PDF_PLACEHOLDER: &str = "[PDF content will be provided]";

pub const CLOSING_INSTRUCTION: &str =
    "Now answer the following question based on the above sources. Always cite which source you're drawing from.";

/// Fixed instruction block, personalised with `persona`.
pub fn preamble(persona: &str) -> String {
    format!(
        "You are an AI avatar representing {persona} for educational and voter information purposes. \
You must respond based ONLY on the information provided in the documents and web sources below.

CRITICAL INSTRUCTIONS:
1. Answer questions based solely on documented evidence
2. Cite your sources by referencing document names or URLs
3. If information isn't in the provided sources, clearly state that
4. Maintain a factual, informational tone
5. When presenting {persona}'s positions, quote or paraphrase from sources and cite them
6. Do not make up information or speculate
7. Format citations as: [Source: document name or URL]

AVAILABLE INFORMATION:

"
    )
}

/// Build the system prompt for `persona` from the given material.
pub fn build_system_prompt(persona: &str, documents: &[Document], sources: &[WebSource]) -> String {
    let mut prompt = preamble(persona);

    // Writing into a String cannot fail.
    if !documents.is_empty() {
        prompt.push_str("UPLOADED DOCUMENTS:\n");
        for doc in documents {
            let _ = write!(prompt, "\n--- {} ---\n", doc.name);
            match doc.kind {
                DocumentKind::Text => {
                    prompt.push_str(&doc.content);
                    prompt.push('\n');
                }
                DocumentKind::Pdf => {
                    prompt.push_str(PDF_PLACEHOLDER);
                    prompt.push('\n');
                }
            }
        }
    }

    if !sources.is_empty() {
        prompt.push_str("\nWEB SOURCES:\n");
        for source in sources {
            let _ = write!(
                prompt,
                "\n--- {} ---\nURL: {}\nSummary: {}\n",
                source.title, source.url, source.summary
            );
        }
    }

    prompt.push('\n');
    prompt.push_str(CLOSING_INSTRUCTION);
    prompt
}
