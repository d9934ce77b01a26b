// Shared prompt fragments.
// Each module that needs LLM calls defines its own prompts alongside it;
// this file holds only what several of them reuse.

/// The STAR answer layout requested by every answer-producing prompt.
pub const STAR_FORMAT: &str = "\
Format:
SITUATION: ...
TASK: ...
ACTION: ...
RESULT: ...";

/// Instruction appended to prompts whose output is parsed as JSON.
pub const JSON_ONLY_INSTRUCTION: &str = "\
Respond with valid JSON only. \
Do NOT include any text outside the JSON. \
Do NOT include explanations or apologies.";
