use anyhow::Result;
use std::io::{BufRead, Write};

use super::{summarize, Feedback, Response};
use crate::prompt::Prompter;

/// Ask each question in turn and give length feedback on every answer.
///
/// `skip` moves to the next question without recording it, `quit` ends the
/// session early. Both are case-insensitive. Returns the recorded responses.
pub fn run_practice<R: BufRead, W: Write>(
    prompter: &mut Prompter<R, W>,
    questions: &[String],
) -> Result<Vec<Response>> {
    let mut responses = Vec::new();

    prompter.say("=== College Interview Practice ===")?;
    prompter.say("Answer as if in a real interview.")?;
    prompter.say("Type 'skip' to move to the next question, 'quit' to end.")?;

    for (i, question) in questions.iter().enumerate() {
        prompter.say("")?;
        prompter.say(&format!("Question {}: {}", i + 1, question))?;
        prompter.say(&"-".repeat(50))?;

        let answer = prompter.prompt("Your answer: ")?;
        match answer.to_lowercase().as_str() {
            "quit" => break,
            "skip" => continue,
            _ => {}
        }

        let response = Response {
            question: question.clone(),
            answer,
        };
        prompter.say(Feedback::for_words(response.word_count()).message())?;
        responses.push(response);
    }

    if let Some(summary) = summarize(&responses) {
        prompter.say("")?;
        prompter.say("=== Practice Summary ===")?;
        prompter.say(&format!("Questions answered: {}", summary.answered))?;
        prompter.say(&format!("Average response length: {:.1} words", summary.average_words))?;
    }

    Ok(responses)
}
