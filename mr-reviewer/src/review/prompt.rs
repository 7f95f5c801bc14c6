//! Review prompt template.
//!
//! The output format below is what [`crate::review::feedback`] and
//! [`crate::review::ReviewResult::parse`] scan for; keep them in sync.

/// Returns at most `max_chars` characters of `diff` (never splits a char).
pub fn truncate_diff(diff: &str, max_chars: usize) -> &str {
    match diff.char_indices().nth(max_chars) {
        Some((idx, _)) => &diff[..idx],
        None => diff,
    }
}

/// Builds the full review prompt around a (truncated) diff.
pub fn build_review_prompt(diff: &str, max_chars: usize) -> String {
    let diff = truncate_diff(diff, max_chars);

    let mut s = String::with_capacity(INSTRUCTIONS.len() + OUTPUT_FORMAT.len() + diff.len() + 64);
    s.push_str(INSTRUCTIONS);
    s.push_str("\n**Code Diff**:\n```diff\n");
    s.push_str(diff);
    s.push_str("\n```\n\n");
    s.push_str(OUTPUT_FORMAT);
    s
}

const INSTRUCTIONS: &str = r#"**Role**: Senior Code Reviewer
**Task**: Analyze the code diff thoroughly. Classify the type of change, provide a walkthrough, overall rating, and detailed feedback with impacts and priorities.
Focus on:
- Code structure and organization
- Adherence to the language's coding standards
- Potential bugs, edge cases, and logical errors
- Performance optimizations
- Security vulnerabilities
- Readability and maintainability

**Rules**:
1. ALWAYS start with 'Rating: <NUMBER>/10' where NUMBER is from 1 to 10 based on overall quality. Do not use N/A.
2. Classify the primary type of change (e.g., Feature Addition, Bug Fix, Refactor, Dependency Update, Documentation).
3. Provide a brief code walkthrough summarizing the changes step-by-step, referencing files and approximate line numbers from the diff hunks.
4. Include at least one positive feedback point.
5. For line-specific feedback: Select the top 5 most important changed lines or hunks. For each:
   - Specify the file and lines (e.g., file.rs:10-15)
   - Quote the line(s) with context (+ for added, - for removed)
   - Describe the type of change (Addition, Removal, Modification)
   - Provide analysis/explanation
   - Suggest improvements if needed
   - Describe the impact if the suggestion is followed
   - Rate the priority of the suggestion (High, Medium, Low)
   - Provide a suggested comment for developers to post as a review comment
6. Provide 3-5 general feedback points, each with potential impact and priority.
7. Be thorough, critical, but constructive. Assume the diff is complete even if truncated.
8. Output in Markdown. Use HTML anchors for each line-specific feedback section (e.g., <a name="feedback-1"></a>).
9. STRICTLY follow the output format. Do not add extra text outside the format.
"#;

const OUTPUT_FORMAT: &str = r#"**Output Format** EXACTLY:
Rating: <NUMBER>/10

# 🤖 AI PR Review

## Overall Rating
<NUMBER>/10

## Change Type
<Primary type, e.g., Refactor>

## Code Walkthrough
<Step-by-step summary with file and line references>

## Positive Aspects
- <Point 1>
- <Point 2 if any>

## Line-Specific Feedback
<a name="feedback-1"></a>
### 1. File: <file> Lines: <lines>
**Quote:**
```diff
<QUOTE>
```
**Change Type:** <Type>
**Analysis:** <Explanation>
**Suggestion:** <Improvement or "None needed">
**Impact if Implemented:** <Description of benefits>
**Priority:** <High/Medium/Low>
**Suggested Comment:** <Concise comment for developers to post>

<a name="feedback-2"></a>
### 2. ... (repeat for 5)

## General Feedback
- **Point 1:** <Description>
  **Impact:** <Benefits>
  **Priority:** <High/Medium/Low>
- **Point 2:** ...
"#;
