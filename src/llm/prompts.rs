//! Prompt templates for query classification and grounded answering

/// Template for the grounded RAG answer. `{context}` and `{query}` are
/// substituted by `build_retriever_prompt`.
pub const RETRIEVER_PROMPT: &str = r"You are an expert assistant that provides accurate, comprehensive, and helpful answers.

Your job is to:
- Generate clear and well-structured answers.
- Ensure all information is factual and directly supported by the source material.
- If the answer is not found in the source material, clearly state that the information is not available.
- Structure your response using Markdown formatting (headings, lists, code blocks, tables, etc.) where appropriate.
- Provide specific examples or details when relevant.
- If multiple relevant pieces of information exist, synthesize them into a coherent response.
- Do not hallucinate or invent facts not present in the source material.
- If you are unsure about any part of the answer, clearly state the uncertainty.
- Focus on being helpful while maintaining accuracy to the source material.

Context:
{context}

Question: {query}

Answer:";

/// Template for the weather classification call. The model must answer with
/// strict JSON so the router can branch without further interpretation.
pub const WEATHER_CLASSIFICATION_PROMPT: &str = r#"You are a query classifier. Decide whether the user's query asks about current weather conditions, and if so, extract the location it refers to.

Respond with ONLY a JSON object in exactly this format, no other text:
{"is_weather": true or false, "location": "city name" or null}

Examples:
Query: "What's the weather like in Paris?"
{"is_weather": true, "location": "Paris"}

Query: "Summarize the uploaded documents"
{"is_weather": false, "location": null}

Query: "{query}"
"#;

/// Render the grounded answer prompt
pub fn build_retriever_prompt(context: &str, query: &str) -> String {
    RETRIEVER_PROMPT
        .replace("{context}", context)
        .replace("{query}", query)
}

/// Render the classification prompt for a user query
pub fn build_classification_prompt(query: &str) -> String {
    WEATHER_CLASSIFICATION_PROMPT.replace("{query}", query)
}
