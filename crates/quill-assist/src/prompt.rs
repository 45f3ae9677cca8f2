//! Prompt templates
//!
//! Each template wraps the user's source between `---` fences.

use quill_core::state::AssistKind;

const EXPLAIN_TEMPLATE: &str = "\
You are a friendly and helpful AI programming assistant. A user has requested help with their code.
Analyze the provided code snippet and provide a comprehensive report.

Your analysis should include:
1.  **Code Explanation**: A clear, line-by-line or block-by-block explanation of what the code does.
2.  **Suggestions for Improvement**: Specific, actionable suggestions to improve code quality, readability, and performance. Provide code examples for your suggestions.
3.  **Bug Detection**: Identify any potential bugs, logical errors, or edge cases the user might not have considered.

Format your response using markdown-style headings (e.g., \"### Code Explanation\").
Be encouraging and supportive in your tone.

Code to analyze:
";

const TESTS_TEMPLATE: &str = "\
You are an expert QA engineer. Your task is to write unit tests for the given code snippet using a modern JavaScript testing framework syntax like Jest or Vitest.

Your response should include:
1.  **Test Suite**: A complete `describe` block containing several `it` or `test` blocks.
2.  **Test Cases**: Cover happy paths, edge cases, and potential error conditions.
3.  **Explanations**: Briefly comment on what each test case is verifying.

Format your response as a single code block ready to be copied into a test file.
Do not add any conversational filler. Be direct and professional.

Code to test:
";

/// Prompt asking for an explanation, improvements and likely bugs
pub fn explain(code: &str) -> String {
    fenced(EXPLAIN_TEMPLATE, code)
}

/// Prompt asking for a Jest/Vitest test suite
pub fn generate_tests(code: &str) -> String {
    fenced(TESTS_TEMPLATE, code)
}

pub fn for_kind(kind: AssistKind, code: &str) -> String {
    match kind {
        AssistKind::Explain => explain(code),
        AssistKind::GenerateTests => generate_tests(code),
    }
}

fn fenced(template: &str, code: &str) -> String {
    format!("{template}---\n{code}\n---\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_code_is_fenced_verbatim() {
        let code = "function add(a, b) {\n  return a + b;\n}";
        let prompt = explain(code);
        assert!(prompt.ends_with(&format!("---\n{code}\n---\n")));
        assert!(prompt.contains("### Code Explanation"));
    }

    #[test]
    fn test_kinds_pick_their_template() {
        assert!(for_kind(AssistKind::Explain, "x").contains("Bug Detection"));
        let tests = for_kind(AssistKind::GenerateTests, "x");
        assert!(tests.contains("`describe` block"));
        assert!(tests.contains("Code to test:"));
    }
}
