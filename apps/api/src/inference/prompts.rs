// All LLM prompt templates for the inference module.
// Placeholders in braces are substituted with `str::replace` before sending.

/// Role inference. Replace `{role_list}` and `{resume_content}`.
pub const ROLE_INFERENCE_TEMPLATE: &str = "\
Analyze this resume and determine the most appropriate professional role. Choose EXACTLY ONE from this list:
{role_list}

Resume content:
{resume_content}

Respond with ONLY the role name, nothing else.";

/// Confidence scoring. Replace `{inferred_role}` and `{resume_content}`.
pub const CONFIDENCE_TEMPLATE: &str = "\
Rate the confidence level (0-100) that this resume matches the role \"{inferred_role}\".

Resume content:
{resume_content}

Respond with ONLY a number between 0 and 100, nothing else.";

/// Question generation. Replace `{role}` and `{category_list}`.
pub const QUESTION_GENERATION_TEMPLATE: &str = r#"Generate mostly asked behavioral interview questions for a {role} position.

Format as JSON array with objects having:
{
  "category": "category_name",
  "text": "question text"
}

Categories: {category_list}.

Use STAR method phrasing like "Tell me about a time when..." for {role} role."#;

/// Generic suggested answer. Replace `{question}` and `{star_format}`.
pub const SUGGESTED_ANSWER_TEMPLATE: &str = "\
Generate a STAR method answer for this interview question:
\"{question}\"

{star_format}";

/// Personalized answer. Replace `{question}`, `{category}`, `{personal_context}`,
/// `{draft}` and `{star_format}`.
pub const PERSONALIZED_ANSWER_TEMPLATE: &str = "\
You are an interview coach. Write a first-person STAR method answer to the behavioral \
interview question below, grounded ONLY in the candidate's real background. \
Do not invent employers, projects or numbers that are not in the background.

Question ({category}):
\"{question}\"

Candidate background:
{personal_context}

Candidate's current draft (may be empty):
{draft}

{star_format}";

/// Answer feedback. Replace `{question}`, `{category}`, `{answer}` and `{json_only}`.
pub const FEEDBACK_TEMPLATE: &str = r#"You are an interview coach. Evaluate the candidate's answer to a behavioral interview question.

Question ({category}):
"{question}"

Answer:
{answer}

Score each dimension from 0 to 100 and explain briefly. Return a JSON object with this EXACT schema:
{
  "structure": {"score": 0, "feedback": "..."},
  "clarity": {"score": 0, "feedback": "..."},
  "tone": {"score": 0, "feedback": "..."},
  "impact": {"score": 0, "feedback": "..."},
  "overall": "...",
  "improvedExample": "..."
}

{json_only}"#;
