use std::collections::BTreeMap;

use super::{MajorWeight, Question, QuizOption};

/// Description shown for majors missing from the description table
pub const FALLBACK_DESCRIPTION: &str = "A field of study with various career opportunities.";

fn option(key: &str, text: &str, weights: &[(&str, i64)]) -> QuizOption {
    QuizOption {
        key: key.to_string(),
        text: text.to_string(),
        weights: weights
            .iter()
            .map(|(major, points)| MajorWeight {
                major: major.to_string(),
                points: *points,
            })
            .collect(),
    }
}

pub fn default_questions() -> Vec<Question> {
    vec![
        Question {
            prompt: "What type of problems do you enjoy solving?".to_string(),
            options: vec![
                option(
                    "a",
                    "Mathematical and logical puzzles",
                    &[("Engineering", 3), ("Math", 3), ("Computer Science", 2)],
                ),
                option(
                    "b",
                    "Social and interpersonal issues",
                    &[("Psychology", 3), ("Social Work", 3), ("Business", 2)],
                ),
                option(
                    "c",
                    "Creative and artistic challenges",
                    &[("Art", 3), ("English", 2), ("Communications", 2)],
                ),
                option(
                    "d",
                    "Scientific and research problems",
                    &[("Biology", 3), ("Chemistry", 3), ("Physics", 2)],
                ),
            ],
        },
        Question {
            prompt: "What work environment appeals to you?".to_string(),
            options: vec![
                option(
                    "a",
                    "Laboratory or research facility",
                    &[("Chemistry", 3), ("Biology", 2), ("Physics", 3)],
                ),
                option(
                    "b",
                    "Office with team collaboration",
                    &[("Business", 3), ("Marketing", 2), ("Management", 2)],
                ),
                option(
                    "c",
                    "Creative studio or outdoors",
                    &[("Art", 3), ("Environmental Science", 2), ("Architecture", 2)],
                ),
                option(
                    "d",
                    "Hospital or healthcare setting",
                    &[("Nursing", 3), ("Medicine", 3), ("Psychology", 1)],
                ),
            ],
        },
        Question {
            prompt: "Which subject did you enjoy most in school?".to_string(),
            options: vec![
                option(
                    "a",
                    "Mathematics and Sciences",
                    &[("Engineering", 2), ("Math", 3), ("Computer Science", 2), ("Physics", 2)],
                ),
                option(
                    "b",
                    "History and Social Studies",
                    &[("History", 3), ("Political Science", 2), ("Sociology", 2)],
                ),
                option(
                    "c",
                    "English and Literature",
                    &[("English", 3), ("Communications", 2), ("Journalism", 2)],
                ),
                option(
                    "d",
                    "Art and Music",
                    &[("Art", 3), ("Music", 3), ("Theater", 2)],
                ),
            ],
        },
    ]
}

pub fn default_descriptions() -> BTreeMap<String, String> {
    [
        ("Engineering", "Design and build solutions to technical problems. High earning potential in various industries."),
        ("Computer Science", "Develop software, apps, and digital solutions. Excellent job market and growth opportunities."),
        ("Business", "Learn management, finance, and entrepreneurship. Versatile degree with many career paths."),
        ("Psychology", "Study human behavior and mental processes. Can lead to counseling, research, or therapy careers."),
        ("Biology", "Study living organisms and life processes. Foundation for medical, research, or environmental careers."),
        ("Art", "Express creativity through various mediums. Can lead to design, fine arts, or creative industry careers."),
        ("English", "Study literature, writing, and communication. Useful for law, journalism, or teaching careers."),
        ("Math", "Study abstract concepts and problem-solving. Applicable to finance, research, and technology."),
        ("Chemistry", "Study matter and chemical reactions. Essential for pharmaceuticals, research, and industry."),
        ("Physics", "Study fundamental laws of nature. Important for research, engineering, and technology."),
        ("History", "Study past events and their significance. Develops critical thinking for law, education, or research."),
        ("Communications", "Study media, public relations, and information sharing. Useful for marketing and journalism."),
        ("Nursing", "Provide healthcare and patient care. High demand field with job security."),
        ("Medicine", "Diagnose and treat medical conditions. Requires extensive education but offers high rewards."),
        ("Social Work", "Help individuals and communities solve problems. Meaningful work in social services."),
        ("Marketing", "Promote products and services to consumers. Creative field with business applications."),
        ("Environmental Science", "Study environmental problems and solutions. Growing field focused on sustainability."),
        ("Political Science", "Study government, politics, and public policy. Useful for law, government, or advocacy."),
        ("Sociology", "Study society and social behavior. Helps understand social issues and human interaction."),
        ("Journalism", "Report news and information to the public. Important for media and communication industries."),
        ("Architecture", "Design buildings and spaces. Combines creativity with technical skills."),
        ("Music", "Study musical performance, composition, or theory. Can lead to performance or education careers."),
        ("Theater", "Study dramatic arts and performance. Develops creativity and public speaking skills."),
        ("Management", "Learn to lead teams and organizations. Essential for business leadership roles."),
    ]
    .into_iter()
    .map(|(major, description)| (major.to_string(), description.to_string()))
    .collect()
}
