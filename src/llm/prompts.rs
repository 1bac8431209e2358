// ABOUTME: Prompt construction for talk show dialogue generation
// ABOUTME: Renders topic, guest names, and tone into the fixed dialogue instruction template
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Greenroom Project

//! # Dialogue Prompts
//!
//! This module renders the generation prompt for one show. The template fixes
//! the script format, the per-turn word limit, and the round count; the topic,
//! guest names, and tone are the only variable parts.

/// Build the dialogue generation prompt for one show
#[must_use]
pub fn build_dialogue_prompt(topic: &str, guest_a: &str, guest_b: &str, tone: &str) -> String {
    format!(
        "TASK: Create a realistic dialogue between the following two characters:\n\
         Character A:{guest_a}\n\
         Character B:{guest_b}\n\
         DIALOGUE TOPIC:{topic}\n\
         CHARACTERIZATION RULES:\n\
         -Each character must speak in a way that reflects:\n\
         .Their commonly known communication style.\n\
         .Their public persona, priorities, and worldview.\n\
         .Their emotional tone:{tone}\n\
         -Do NOT caricature them excessively.\n\
         -Avoid parody unless explicitly requested.\n\
         -Make the dialogue feel like a natural conversation, including:\n\
         .Interruptions\n\
         .Disagreements\n\
         .Ego, emotion, persuasion, or tension when appropriate\n\
         STRUCTURE:\n\
         -Use a script-style format:\n\
         Character Name: dialogue\n\
         -Alternate speakers naturally\n\
         -Include subtle emotional cues through word choice, not stage directions\n\
         -Length: Do NOT exceed 20 words by character\n\
         STYLE:\n\
         -Realistic\n\
         -Conversational\n\
         -Intellectually consistent with each character\n\
         -No narrator unless explicitly requested\n\
         FINAL CHECK:\n\
         -The dialogue must sound like how these people *might* speak, not how an AI summarizes them.\n\
         -The ENTIRE response must be in plain text only (no markdown, no bold, no headings).\n\
         Maximum 4 round by character"
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prompt_embeds_all_variable_fields() {
        let prompt = build_dialogue_prompt("climate policy", "Ada", "Grace", "playful");

        assert!(prompt.contains("Character A:Ada"));
        assert!(prompt.contains("Character B:Grace"));
        assert!(prompt.contains("DIALOGUE TOPIC:climate policy"));
        assert!(prompt.contains("emotional tone:playful"));
    }

    #[test]
    fn test_prompt_fixes_format_and_length_rules() {
        let prompt = build_dialogue_prompt("anything", "A", "B", "calm");

        assert!(prompt.starts_with("TASK: Create a realistic dialogue"));
        assert!(prompt.contains("Do NOT exceed 20 words by character"));
        assert!(prompt.contains("plain text only"));
        assert!(prompt.ends_with("Maximum 4 round by character"));
    }
}
