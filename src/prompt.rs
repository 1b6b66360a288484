use anyhow::{bail, Context, Result};
use std::io::{BufRead, StdinLock, Stdout, Write};

/// Line-oriented prompts over any reader/writer pair (stdin/stdout in the binary).
pub struct Prompter<R, W> {
    input: R,
    output: W,
}

/// Prompter bound to the process's stdin and stdout
pub fn stdio() -> Prompter<StdinLock<'static>, Stdout> {
    Prompter::new(std::io::stdin().lock(), std::io::stdout())
}

impl<R: BufRead, W: Write> Prompter<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    pub fn into_parts(self) -> (R, W) {
        (self.input, self.output)
    }

    /// Write one line of output.
    pub fn say(&mut self, line: &str) -> Result<()> {
        writeln!(self.output, "{}", line).context("Failed to write output")
    }

    /// Prompt user with a message and return their trimmed input.
    pub fn prompt(&mut self, message: &str) -> Result<String> {
        write!(self.output, "{}", message).context("Failed to write prompt")?;
        self.output.flush().context("Failed to flush output")?;
        let mut input = String::new();
        let read = self
            .input
            .read_line(&mut input)
            .context("Failed to read input")?;
        if read == 0 {
            bail!("Input ended before an answer was given");
        }
        Ok(input.trim().to_string())
    }

    /// Prompt user with a message and a default value. Returns default if input is empty.
    pub fn prompt_with_default(&mut self, message: &str, default: &str) -> Result<String> {
        let input = self.prompt(&format!("{} [{}]: ", message, default))?;
        if input.is_empty() {
            Ok(default.to_string())
        } else {
            Ok(input)
        }
    }

    /// Prompt user with a yes/no question. Returns bool based on input and default.
    pub fn prompt_yes_no(&mut self, message: &str, default_yes: bool) -> Result<bool> {
        let hint = if default_yes { "Y/n" } else { "y/N" };
        let input = self.prompt(&format!("{} [{}]: ", message, hint))?;
        let input = input.to_lowercase();
        if input.is_empty() {
            Ok(default_yes)
        } else {
            Ok(input == "y" || input == "yes")
        }
    }

    /// Re-prompt until `parse` accepts the input.
    pub fn prompt_until<T, F>(&mut self, message: &str, default: &str, parse: F) -> Result<T>
    where
        F: Fn(&str) -> Result<T, String>,
    {
        loop {
            let input = self.prompt_with_default(message, default)?;
            match parse(&input) {
                Ok(value) => return Ok(value),
                Err(e) => self.say(&format!("  Invalid: {}. Try again.", e))?,
            }
        }
    }
}
