//! Prompt composition.
//!
//! The prompt is a header line followed by exactly ten numbered lines, one per
//! form topic, in a fixed order. Line breaks inside user input are folded to
//! single spaces so the numbered shape survives any input.

use crate::form::{Answer, FieldOption, FormState};

/// First line of every prompt.
pub const PROMPT_HEADER: &str = "Create me an article with the following details:";

/// Number of numbered detail lines following [`PROMPT_HEADER`].
pub const PROMPT_DETAIL_LINES: usize = 10;

const SOURCES_YES: &str = "Yes, will provide links later";
const CREDIBILITY_YES: &str = "Yes, will provide details later";

/// Build the prompt sent to the completion endpoint from the current form.
pub fn compose_prompt(form: &FormState) -> String {
    let keywords = if form.keywords.trim().is_empty() {
        form.keyword_help.fallback_phrase().to_string()
    } else {
        fold_line_breaks(&form.keywords)
    };

    let details = [
        ("Topic", fold_line_breaks(&form.topic)),
        ("Target Audience", fold_line_breaks(&form.audience)),
        ("Goal", fold_line_breaks(&form.goal)),
        ("Key Takeaways", fold_line_breaks(&form.takeaways)),
        ("Unique Angle", fold_line_breaks(&form.angle)),
        ("Keywords", keywords),
        ("Format", form.format.map(FieldOption::value).unwrap_or_default().to_string()),
        ("Tone", form.tone.map(FieldOption::value).unwrap_or_default().to_string()),
        ("Sources", yes_or_no(form.sources, SOURCES_YES)),
        ("Crucial Information for Credibility", yes_or_no(form.credibility, CREDIBILITY_YES)),
    ];

    let mut prompt = String::from(PROMPT_HEADER);
    for (number, (label, value)) in details.iter().enumerate() {
        prompt.push('\n');
        prompt.push_str(&format!("{}. {}: {}", number + 1, label, value));
    }
    prompt
}

fn yes_or_no(answer: Option<Answer>, yes: &str) -> String {
    match answer {
        Some(Answer::Yes) => yes.to_string(),
        Some(Answer::No) | None => Answer::No.value().to_string(),
    }
}

/// Collapse every run of line-break characters into a single space.
pub fn fold_line_breaks(value: &str) -> String {
    let mut folded = String::with_capacity(value.len());
    let mut in_break = false;
    for ch in value.chars() {
        if ch == '\n' || ch == '\r' {
            if !in_break {
                folded.push(' ');
            }
            in_break = true;
        } else {
            folded.push(ch);
            in_break = false;
        }
    }
    folded
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::form::{ArticleFormat, Tone};

    fn detail_lines(prompt: &str) -> Vec<&str> {
        prompt.lines().skip(1).collect()
    }

    #[test]
    fn empty_optional_fields_use_fallbacks() {
        let form = FormState {
            topic: "Cats".into(),
            audience: "Pet owners".into(),
            goal: "Inform".into(),
            ..FormState::default()
        };
        let prompt = compose_prompt(&form);
        let lines = detail_lines(&prompt);

        assert_eq!(prompt.lines().next(), Some(PROMPT_HEADER));
        assert_eq!(lines[0], "1. Topic: Cats");
        assert_eq!(lines[1], "2. Target Audience: Pet owners");
        assert_eq!(lines[2], "3. Goal: Inform");
        assert_eq!(lines[5], "6. Keywords: No specific keywords, need help with keyword research");
        assert_eq!(lines[6], "7. Format: ");
        assert_eq!(lines[8], "9. Sources: No");
        assert_eq!(lines[9], "10. Crucial Information for Credibility: No");
    }

    #[test]
    fn selected_options_are_interpolated() {
        let form = FormState {
            keywords: "indoor cats, enrichment".into(),
            format: Some(ArticleFormat::StepByStepGuide),
            tone: Some(Tone::Casual),
            sources: Some(Answer::Yes),
            credibility: Some(Answer::Yes),
            ..FormState::default()
        };
        let prompt = compose_prompt(&form);
        let lines = detail_lines(&prompt);

        assert_eq!(lines[5], "6. Keywords: indoor cats, enrichment");
        assert_eq!(lines[6], "7. Format: Step-by-Step Guide");
        assert_eq!(lines[7], "8. Tone: Casual");
        assert_eq!(lines[8], "9. Sources: Yes, will provide links later");
        assert_eq!(lines[9], "10. Crucial Information for Credibility: Yes, will provide details later");
    }

    #[test]
    fn explicit_no_renders_no() {
        let form = FormState {
            sources: Some(Answer::No),
            credibility: Some(Answer::No),
            ..FormState::default()
        };
        let prompt = compose_prompt(&form);
        assert!(prompt.contains("\n9. Sources: No\n"));
        assert!(prompt.ends_with("\n10. Crucial Information for Credibility: No"));
    }

    #[test]
    fn always_ten_numbered_lines() {
        let forms = [
            FormState::default(),
            FormState {
                topic: "Multi\nline\r\n\ntopic".into(),
                takeaways: "first\nsecond".into(),
                keywords: "\n".into(),
                ..FormState::default()
            },
        ];
        for form in forms {
            let prompt = compose_prompt(&form);
            let lines = detail_lines(&prompt);
            assert_eq!(lines.len(), PROMPT_DETAIL_LINES);
            for (index, line) in lines.iter().enumerate() {
                assert!(line.starts_with(&format!("{}. ", index + 1)), "line {index} was {line:?}");
            }
        }
    }

    #[test]
    fn line_breaks_fold_to_single_spaces() {
        let form = FormState {
            topic: "Multi\nline\r\n\ntopic".into(),
            ..FormState::default()
        };
        assert!(compose_prompt(&form).contains("1. Topic: Multi line topic\n"));
    }
}
