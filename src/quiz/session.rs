use anyhow::Result;
use std::io::{BufRead, Write};

use super::{answer, Question};
use crate::prompt::Prompter;
use crate::scoring::Accumulator;

/// Ask every question in turn, re-prompting until a valid option key is entered.
/// Returns the accumulated scores and the keys chosen.
pub fn run_interactive<R: BufRead, W: Write>(
    prompter: &mut Prompter<R, W>,
    questions: &[Question],
) -> Result<(Accumulator, Vec<String>)> {
    let mut accumulator = Accumulator::new();
    let mut answers = Vec::with_capacity(questions.len());

    prompter.say("Answer these questions to get personalized major recommendations.")?;

    for (i, question) in questions.iter().enumerate() {
        prompter.say("")?;
        prompter.say(&format!("Question {}: {}", i + 1, question.prompt))?;
        for option in &question.options {
            prompter.say(&format!("  {}) {}", option.key, option.text))?;
        }

        let keys: Vec<&str> = question.options.iter().map(|o| o.key.as_str()).collect();
        let key = loop {
            let input = prompter.prompt(&format!("Your answer ({}): ", keys.join("/")))?;
            match question.option(&input) {
                Some(option) => break option.key.clone(),
                None => prompter.say(&format!("Please enter {}", question.key_list()))?,
            }
        };

        answer(&mut accumulator, i + 1, question, &key)?;
        answers.push(key);
    }

    Ok((accumulator, answers))
}
