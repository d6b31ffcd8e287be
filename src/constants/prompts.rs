use crate::models::domain::LearningStyle;

pub const EXPLANATION_SYSTEM_PROMPT: &str = "You are a patient tutor writing study material for students. \
Explain the requested topic accurately and engagingly, adapting the presentation to the learner's style. \
Keep the explanation between 150 and 400 words. \
Return up to five short key points, three to five real-world applications, \
and, for visual learners only, up to five descriptions of diagrams that would help.";

pub const TEACH_BACK_SYSTEM_PROMPT: &str = "You are grading a student's explanation of a topic they have studied. \
Compare the student's explanation with the reference material. \
Score correctness from 0.0 (wrong or empty) to 1.0 (complete and accurate). \
Write two or three sentences of encouraging, specific feedback addressed to the student.";

pub fn style_instruction(style: LearningStyle) -> &'static str {
    match style {
        LearningStyle::Visual => "with clear examples and visual descriptions",
        LearningStyle::Auditory => "with a conversational tone and audio-friendly explanations",
        LearningStyle::Kinesthetic => "with hands-on activities and practical examples",
        LearningStyle::Reading => "with detailed explanations and comprehensive coverage",
    }
}

pub fn explanation_prompt(topic: &str, style: LearningStyle) -> String {
    format!(
        "Explain {} {}. Make it engaging and educational for students. The learner prefers {} learning.",
        topic,
        style_instruction(style),
        style
    )
}

pub fn teach_back_prompt(topic: &str, reference: &str, student_explanation: &str) -> String {
    format!(
        "Topic: {}\n\nReference material:\n{}\n\nStudent explanation:\n{}",
        topic, reference, student_explanation
    )
}
