//! Analysis prompt sent to the model

/// Prompt template. `{states}` and `{questions}` are substituted verbatim.
const ANALYSIS_PROMPT_TEMPLATE: &str = r#"You are an employment law compliance expert. Analyze these interview questions for legal compliance issues across these US states: {states}.

Interview Questions:
{questions}

For each question, identify:
1. Whether it's compliant or problematic
2. Specific legal issues (if any)
3. Which states have concerns
4. Risk level (Low/Medium/High)
5. A compliant alternative question

Format your response as JSON with this structure:
{
  "overallRisk": "Low/Medium/High",
  "summary": "Brief overview of findings",
  "analyses": [
    {
      "question": "The original question",
      "status": "compliant/problematic",
      "riskLevel": "Low/Medium/High",
      "issues": ["Issue 1", "Issue 2"],
      "affectedStates": ["State1", "State2"],
      "legalBasis": "Explanation of the legal concern",
      "alternative": "Suggested compliant question"
    }
  ]
}

Respond ONLY with valid JSON, no other text."#;

/// Render the analysis prompt for the given questions and states
pub fn build_prompt(questions: &str, states: &[String]) -> String {
    // Single pass so placeholder text inside the questions is left alone
    let (head, tail) = ANALYSIS_PROMPT_TEMPLATE
        .split_once("{questions}")
        .unwrap_or((ANALYSIS_PROMPT_TEMPLATE, ""));

    let mut prompt = head.replacen("{states}", &states.join(", "), 1);
    prompt.push_str(questions);
    prompt.push_str(tail);
    prompt
}
