//! Article form model.
//!
//! [`FormState`] holds every input the article form collects. Free-text fields
//! are plain `String`s; enumerated fields are `Option`s so an untouched
//! selector stays distinguishable from an explicit choice. Nothing here
//! validates: every value is "a string, possibly empty".
//!
//! [`FieldId`] gives the UI an ordered, addressable view over the record so a
//! single form component can render and edit all fields generically.

use serde::{Deserialize, Serialize};

/// Common behavior for the enumerated options offered by a selector field.
pub trait FieldOption: Copy + Sized + 'static {
    /// Every option in display order.
    const ALL: &'static [Self];

    /// Value interpolated into the prompt.
    fn value(self) -> &'static str;

    /// Label shown next to the selector.
    fn label(self) -> &'static str;

    /// Position of `self` within [`FieldOption::ALL`].
    fn index(self) -> usize
    where
        Self: PartialEq,
    {
        Self::ALL.iter().position(|option| *option == self).unwrap_or(0)
    }
}

/// Article structure requested from the model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ArticleFormat {
    Listicle,
    StepByStepGuide,
    InDepthAnalysis,
    Other,
}

impl FieldOption for ArticleFormat {
    const ALL: &'static [Self] = &[Self::Listicle, Self::StepByStepGuide, Self::InDepthAnalysis, Self::Other];

    fn value(self) -> &'static str {
        match self {
            Self::Listicle => "Listicle",
            Self::StepByStepGuide => "Step-by-Step Guide",
            Self::InDepthAnalysis => "In-depth Analysis",
            Self::Other => "Other",
        }
    }

    fn label(self) -> &'static str {
        match self {
            Self::Listicle => "Listicle (e.g., Top 10 Tips)",
            Self::StepByStepGuide => "Step-by-Step Guide",
            Self::InDepthAnalysis => "In-depth Analysis",
            Self::Other => "Other (Specify)",
        }
    }
}

/// Writing tone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Tone {
    Formal,
    Casual,
    Humorous,
}

impl FieldOption for Tone {
    const ALL: &'static [Self] = &[Self::Formal, Self::Casual, Self::Humorous];

    fn value(self) -> &'static str {
        match self {
            Self::Formal => "Formal",
            Self::Casual => "Casual",
            Self::Humorous => "Humorous",
        }
    }

    fn label(self) -> &'static str {
        self.value()
    }
}

/// Yes/No answer used by the sources and credibility selectors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Answer {
    No,
    Yes,
}

impl FieldOption for Answer {
    const ALL: &'static [Self] = &[Self::No, Self::Yes];

    fn value(self) -> &'static str {
        match self {
            Self::No => "No",
            Self::Yes => "Yes",
        }
    }

    fn label(self) -> &'static str {
        self.value()
    }
}

/// What the writer wants when they have no keywords of their own.
///
/// There is a single option today; it supplies the fallback phrase for an
/// empty keyword list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum KeywordHelp {
    #[default]
    NeedResearch,
}

impl KeywordHelp {
    /// Phrase substituted for the keywords line when no keywords were given.
    pub fn fallback_phrase(self) -> &'static str {
        match self {
            Self::NeedResearch => "No specific keywords, need help with keyword research",
        }
    }
}

impl FieldOption for KeywordHelp {
    const ALL: &'static [Self] = &[Self::NeedResearch];

    fn value(self) -> &'static str {
        match self {
            Self::NeedResearch => "No",
        }
    }

    fn label(self) -> &'static str {
        match self {
            Self::NeedResearch => "No, I need help with keyword research",
        }
    }
}

/// Every input collected by the article form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormState {
    pub topic: String,
    pub audience: String,
    pub goal: String,
    pub takeaways: String,
    pub angle: String,
    pub keywords: String,
    pub keyword_help: KeywordHelp,
    pub format: Option<ArticleFormat>,
    pub tone: Option<Tone>,
    pub sources: Option<Answer>,
    pub credibility: Option<Answer>,
}

/// Addressable form fields in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldId {
    Topic,
    Audience,
    Goal,
    Takeaways,
    Angle,
    Keywords,
    KeywordHelp,
    Format,
    Tone,
    Sources,
    Credibility,
}

/// How a field is edited.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// Free text typed by the user.
    Text,
    /// One of a fixed set of options, cycled with the arrow keys.
    Choice,
}

impl FieldId {
    pub const ALL: [FieldId; 11] = [
        FieldId::Topic,
        FieldId::Audience,
        FieldId::Goal,
        FieldId::Takeaways,
        FieldId::Angle,
        FieldId::Keywords,
        FieldId::KeywordHelp,
        FieldId::Format,
        FieldId::Tone,
        FieldId::Sources,
        FieldId::Credibility,
    ];

    /// Question shown above the input.
    pub fn question(self) -> &'static str {
        match self {
            FieldId::Topic => "What is the main topic of your article?",
            FieldId::Audience => "Who are you writing this article for?",
            FieldId::Goal => "What is the main goal of your article?",
            FieldId::Takeaways => "What key takeaway(s) do you want readers to get?",
            FieldId::Angle => "What is your unique angle or approach (optional)?",
            FieldId::Keywords => "Do you have any keywords in mind?",
            FieldId::KeywordHelp => "If no, select one:",
            FieldId::Format => "What format would you like?",
            FieldId::Tone => "What tone do you want to use?",
            FieldId::Sources => "Do you have any sources you want to reference?",
            FieldId::Credibility => "Is there any specific information you think is crucial for credibility?",
        }
    }

    pub fn kind(self) -> FieldKind {
        match self {
            FieldId::Topic
            | FieldId::Audience
            | FieldId::Goal
            | FieldId::Takeaways
            | FieldId::Angle
            | FieldId::Keywords => FieldKind::Text,
            FieldId::KeywordHelp | FieldId::Format | FieldId::Tone | FieldId::Sources | FieldId::Credibility => {
                FieldKind::Choice
            }
        }
    }

    /// Labels of the options offered by a choice field; empty for text fields.
    pub fn option_labels(self) -> Vec<&'static str> {
        match self {
            FieldId::KeywordHelp => labels::<KeywordHelp>(),
            FieldId::Format => labels::<ArticleFormat>(),
            FieldId::Tone => labels::<Tone>(),
            FieldId::Sources => vec!["No", "Yes, will provide links later"],
            FieldId::Credibility => vec!["No", "Yes, will provide details later"],
            _ => Vec::new(),
        }
    }
}

fn labels<T: FieldOption>() -> Vec<&'static str> {
    T::ALL.iter().map(|option| option.label()).collect()
}

fn cycle<T: FieldOption + PartialEq>(current: Option<T>, forward: bool) -> Option<T> {
    let len = T::ALL.len();
    let next = match (current, forward) {
        (None, true) => 0,
        (None, false) => len - 1,
        (Some(option), true) => (option.index() + 1) % len,
        (Some(option), false) => (option.index() + len - 1) % len,
    };
    Some(T::ALL[next])
}

impl FormState {
    /// Text value of a free-text field.
    pub fn text(&self, field: FieldId) -> Option<&str> {
        match field {
            FieldId::Topic => Some(&self.topic),
            FieldId::Audience => Some(&self.audience),
            FieldId::Goal => Some(&self.goal),
            FieldId::Takeaways => Some(&self.takeaways),
            FieldId::Angle => Some(&self.angle),
            FieldId::Keywords => Some(&self.keywords),
            _ => None,
        }
    }

    pub fn text_mut(&mut self, field: FieldId) -> Option<&mut String> {
        match field {
            FieldId::Topic => Some(&mut self.topic),
            FieldId::Audience => Some(&mut self.audience),
            FieldId::Goal => Some(&mut self.goal),
            FieldId::Takeaways => Some(&mut self.takeaways),
            FieldId::Angle => Some(&mut self.angle),
            FieldId::Keywords => Some(&mut self.keywords),
            _ => None,
        }
    }

    /// Index of the selected option for a choice field, `None` when unset.
    pub fn selected_option(&self, field: FieldId) -> Option<usize> {
        match field {
            FieldId::KeywordHelp => Some(self.keyword_help.index()),
            FieldId::Format => self.format.map(FieldOption::index),
            FieldId::Tone => self.tone.map(FieldOption::index),
            FieldId::Sources => self.sources.map(FieldOption::index),
            FieldId::Credibility => self.credibility.map(FieldOption::index),
            _ => None,
        }
    }

    /// Step a choice field to its next (or previous) option.
    ///
    /// An unset selector moves to the first option going forward and to the
    /// last option going backward. Text fields are left untouched.
    pub fn cycle_option(&mut self, field: FieldId, forward: bool) {
        match field {
            FieldId::KeywordHelp => {
                self.keyword_help = cycle(Some(self.keyword_help), forward).unwrap_or_default();
            }
            FieldId::Format => self.format = cycle(self.format, forward),
            FieldId::Tone => self.tone = cycle(self.tone, forward),
            FieldId::Sources => self.sources = cycle(self.sources, forward),
            FieldId::Credibility => self.credibility = cycle(self.credibility, forward),
            _ => {}
        }
    }

    /// Total number of whitespace-separated words across the free-text fields.
    pub fn word_count(&self) -> usize {
        FieldId::ALL
            .iter()
            .filter_map(|field| self.text(*field))
            .map(|text| text.split_whitespace().count())
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cycling_from_unset_starts_at_either_end() {
        let mut form = FormState::default();
        form.cycle_option(FieldId::Format, true);
        assert_eq!(form.format, Some(ArticleFormat::Listicle));

        form.tone = None;
        form.cycle_option(FieldId::Tone, false);
        assert_eq!(form.tone, Some(Tone::Humorous));
    }

    #[test]
    fn cycling_wraps_around() {
        let mut form = FormState {
            sources: Some(Answer::Yes),
            ..FormState::default()
        };
        form.cycle_option(FieldId::Sources, true);
        assert_eq!(form.sources, Some(Answer::No));
        form.cycle_option(FieldId::Sources, false);
        assert_eq!(form.sources, Some(Answer::Yes));
    }

    #[test]
    fn text_accessors_cover_only_text_fields() {
        let mut form = FormState::default();
        for field in FieldId::ALL {
            assert_eq!(form.text(field).is_some(), field.kind() == FieldKind::Text);
            assert_eq!(!field.option_labels().is_empty(), field.kind() == FieldKind::Choice);
        }
        form.text_mut(FieldId::Goal).expect("goal is text").push_str("Inform");
        assert_eq!(form.goal, "Inform");
    }

    #[test]
    fn word_count_sums_free_text() {
        let form = FormState {
            topic: "Indoor cats".into(),
            takeaways: "  keep them   busy ".into(),
            ..FormState::default()
        };
        assert_eq!(form.word_count(), 5);
    }
}
