// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Prompt templates and builders for the AI routes.
//!
//! Each AI call-out interpolates user-supplied text into a fixed
//! instruction template and sends the result as one prompt. Builders are
//! pure string assembly; the Gemini client does the I/O.

use crate::models::interview::TranscriptMessage;

/// Instruction for the resume chat assistant.
const RESUME_CHAT_INSTRUCTION: &str = "\
You are an expert resume reviewer and career coach. Answer the user's \
question about their resume with specific, actionable advice. Be concise \
and concrete; refer to the resume content when it is provided.";

/// Instruction sent together with inline PDF bytes.
const PDF_EXTRACTION_INSTRUCTION: &str = "\
Extract all text content from this PDF resume. Return only the extracted \
text, preserving the reading order of sections. Do not add commentary, \
headings of your own, or formatting marks.";

/// The five categories every interview is scored on, in response order.
pub const SCORING_CATEGORIES: [&str; 5] = [
    "Communication Skills",
    "Technical Knowledge",
    "Problem Solving",
    "Cultural & Role Fit",
    "Confidence & Clarity",
];

/// Build the resume chat prompt.
///
/// `context` carries prior conversation turns; `resume_text` is the
/// extracted resume when the user has one on file.
pub fn resume_chat_prompt(
    message: &str,
    context: Option<&str>,
    resume_text: Option<&str>,
) -> String {
    let mut prompt = String::from(RESUME_CHAT_INSTRUCTION);

    if let Some(resume) = resume_text.filter(|t| !t.trim().is_empty()) {
        prompt.push_str("\n\nResume content:\n");
        prompt.push_str(resume);
    }

    if let Some(context) = context.filter(|c| !c.trim().is_empty()) {
        prompt.push_str("\n\nConversation so far:\n");
        prompt.push_str(context);
    }

    prompt.push_str("\n\nUser question: ");
    prompt.push_str(message);
    prompt
}

/// Prompt sent alongside the inline PDF part.
pub fn pdf_extraction_prompt() -> &'static str {
    PDF_EXTRACTION_INSTRUCTION
}

/// Build the interview scoring prompt (JSON output mode).
pub fn interview_scoring_prompt(role: &str, transcript: &[TranscriptMessage]) -> String {
    let mut prompt = format!(
        "You are an experienced interviewer evaluating a mock interview for \
         the role of {role}. Score the candidate strictly based on the \
         transcript below. Do not be lenient; call out mistakes plainly.\n\
         \n\
         Score each category from 0 to 100:\n"
    );

    for category in SCORING_CATEGORIES {
        prompt.push_str("- ");
        prompt.push_str(category);
        prompt.push('\n');
    }

    prompt.push_str(
        "\nRespond with a JSON object of this exact shape:\n\
         {\"totalScore\": number, \"categoryScores\": [{\"name\": string, \
         \"score\": number, \"comment\": string}], \"strengths\": [string], \
         \"areasForImprovement\": [string], \"finalAssessment\": string}\n\
         The categoryScores array must list the five categories above, in \
         order, using exactly those names.\n\nTranscript:\n",
    );

    for message in transcript {
        prompt.push_str(&message.role);
        prompt.push_str(": ");
        prompt.push_str(&message.content);
        prompt.push('\n');
    }

    prompt
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resume_chat_prompt_includes_user_content() {
        let prompt = resume_chat_prompt(
            "How do I shorten it?",
            Some("Q: ... A: ..."),
            Some("Jane Doe, Software Engineer"),
        );

        assert!(prompt.contains("How do I shorten it?"));
        assert!(prompt.contains("Jane Doe, Software Engineer"));
        assert!(prompt.contains("Conversation so far:"));
    }

    #[test]
    fn test_resume_chat_prompt_omits_empty_sections() {
        let prompt = resume_chat_prompt("Hi", None, Some("   "));

        assert!(!prompt.contains("Resume content:"));
        assert!(!prompt.contains("Conversation so far:"));
    }

    #[test]
    fn test_scoring_prompt_lists_all_categories_and_transcript() {
        let transcript = vec![
            TranscriptMessage {
                role: "interviewer".to_string(),
                content: "Tell me about yourself.".to_string(),
            },
            TranscriptMessage {
                role: "candidate".to_string(),
                content: "I build web services.".to_string(),
            },
        ];

        let prompt = interview_scoring_prompt("Backend Engineer", &transcript);

        for category in SCORING_CATEGORIES {
            assert!(prompt.contains(category), "missing category {category}");
        }
        assert!(prompt.contains("Backend Engineer"));
        assert!(prompt.contains("candidate: I build web services."));
    }
}
