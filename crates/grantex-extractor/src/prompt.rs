//! Prompt engineering for schema-constrained extraction

use grantex_domain::Schema;

/// Builds the extraction prompt for one task
pub struct PromptBuilder<'a> {
    question: &'a str,
    context: &'a str,
    schema: &'a Schema,
}

impl<'a> PromptBuilder<'a> {
    /// Create a new prompt builder
    pub fn new(question: &'a str, context: &'a str, schema: &'a Schema) -> Self {
        Self {
            question,
            context,
            schema,
        }
    }

    /// Build the complete extraction prompt
    pub fn build(&self) -> String {
        let mut prompt = String::new();

        // 1. Analyst framing and output policy
        prompt.push_str(ANALYST_FRAMING);
        prompt.push_str("\n\n");
        prompt.push_str(OUTPUT_POLICY);
        prompt.push_str("\n\n");

        // 2. The retrieved context
        prompt.push_str("Context:\n---\n");
        prompt.push_str(self.context);
        prompt.push_str("\n---\n\n");

        // 3. The task's question
        prompt.push_str("Question:\n");
        prompt.push_str(self.question);
        prompt.push_str("\n\n");

        // 4. The output shape, generated from the same schema that
        //    validates the response
        prompt.push_str("Format:\n");
        prompt.push_str(&self.schema.format_instructions());
        prompt.push('\n');

        prompt
    }
}

const ANALYST_FRAMING: &str = "You are a professional analyst specializing in grants \
and legal funding information. Your job is to extract structured information from \
legal documents.\n\
\n\
Use the context provided to answer the question. Format your output as valid JSON \
matching the structure described below.";

const OUTPUT_POLICY: &str = "Important instructions:\n\
- ONLY report the fields stated in the format and NOTHING MORE. Do NOT report any other fields!\n\
- Do NOT include explanations, comments, or text before or after the JSON curly braces.\n\
- Return a bare JSON object only, with no markdown code fences around it.\n\
- If a value is not found, use an empty string or an empty list rather than omitting the field.";
