//! Line-oriented prompting with validation and re-prompting.
//!
//! On an attended terminal questions are asked through `dialoguer`, which
//! validates each answer in place. Any other input (pipes, scripted tests)
//! is read line by line from the supplied stream.

use std::io::{BufRead, IsTerminal, Write};

use console::Term;
use dialoguer::{theme::ColorfulTheme, Input};
use tracing::debug;

use bikeshare_core::error::{BikeshareError, Result};
use bikeshare_core::registry::{City, DayFilter, FilterSelection, MonthFilter, ValidationError};
use bikeshare_ui::{report::build_selection_lines, write_lines};

pub const GREETING: &str = "Hello! Let's explore some US bikeshare data!";
pub const CITY_QUESTION: &str =
    "Please enter your preferred city 'chicago', 'new york city' or 'washington': ";
pub const MONTH_QUESTION: &str =
    "Please enter a single month to filter by or enter the keyword all (eg: all, january, february, ... , june): ";
pub const DAY_QUESTION: &str =
    "Please enter a single day of the week to filter by or enter the keyword all (eg: all, monday, tuesday, ... , sunday): ";

/// Where answers come from.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum PromptMode {
    /// Interactive `dialoguer` prompts on the controlling terminal.
    Terminal,
    /// Plain lines read from the input stream.
    #[default]
    Stream,
}

impl PromptMode {
    /// `Terminal` when both stdin and stdout are attached to a terminal.
    pub fn detect() -> Self {
        if std::io::stdin().is_terminal() && Term::stdout().is_term() {
            PromptMode::Terminal
        } else {
            PromptMode::Stream
        }
    }
}

/// Reads answers from `input` and writes questions and feedback to `output`.
pub struct Prompter<R, W> {
    input: R,
    output: W,
    mode: PromptMode,
}

impl<R: BufRead, W: Write> Prompter<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self {
            input,
            output,
            mode: PromptMode::Stream,
        }
    }

    /// Switch between terminal and stream prompting.
    pub fn with_mode(mut self, mode: PromptMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn mode(&self) -> PromptMode {
        self.mode
    }

    /// Stream that questions and reports are written to.
    pub fn output(&mut self) -> &mut W {
        &mut self.output
    }

    /// Ask once and return the answer without surrounding whitespace.
    ///
    /// Bytes that are not valid UTF-8 are replaced rather than rejected, so a
    /// garbled answer fails validation like any other wrong answer. Returns
    /// `None` when the input stream is exhausted.
    pub fn ask(&mut self, question: &str) -> Result<Option<String>> {
        if self.mode == PromptMode::Terminal {
            return self.ask_terminal(question, |_| Ok(())).map(Some);
        }

        write!(self.output, "{question}")?;
        self.output.flush()?;

        let mut buf = Vec::new();
        if self.input.read_until(b'\n', &mut buf)? == 0 {
            debug!("Input exhausted while asking: {}", question.trim());
            return Ok(None);
        }
        Ok(Some(String::from_utf8_lossy(&buf).trim().to_string()))
    }

    /// Ask repeatedly until `parse` accepts the answer.
    ///
    /// Each rejection prints the validation message and asks again. There is
    /// no retry limit; only end of input stops the loop.
    pub fn ask_until<T>(
        &mut self,
        question: &str,
        parse: impl Fn(&str) -> std::result::Result<T, ValidationError>,
    ) -> Result<T> {
        loop {
            let answer = match self.mode {
                PromptMode::Terminal => self.ask_terminal(question, |answer| {
                    parse(answer).map(|_| ()).map_err(|err| err.to_string())
                })?,
                PromptMode::Stream => self.ask(question)?.ok_or(BikeshareError::InputClosed)?,
            };
            match parse(&answer) {
                Ok(value) => return Ok(value),
                Err(err) => {
                    debug!("Rejected answer \"{}\": {}", answer, err);
                    writeln!(self.output, "{err}")?;
                }
            }
        }
    }

    /// `true` only when the answer is "yes" in any letter case.
    ///
    /// End of input counts as "no".
    pub fn confirm(&mut self, question: &str) -> Result<bool> {
        Ok(self
            .ask(question)?
            .is_some_and(|answer| answer.eq_ignore_ascii_case("yes")))
    }

    /// One `dialoguer` text prompt; `validate` rejections are shown inline
    /// and re-asked by `dialoguer` itself.
    fn ask_terminal(
        &mut self,
        question: &str,
        mut validate: impl FnMut(&str) -> std::result::Result<(), String>,
    ) -> Result<String> {
        self.output.flush()?;
        let theme = ColorfulTheme::default();
        let answer = Input::<String>::with_theme(&theme)
            .with_prompt(question.trim().trim_end_matches(':'))
            .allow_empty(true)
            .validate_with(|input: &String| validate(input.trim()))
            .interact_text_on(&Term::stdout())
            .map_err(terminal_error)?;
        Ok(answer.trim().to_string())
    }

    /// Collect and echo a city, month and day selection.
    pub fn get_filters(&mut self) -> Result<FilterSelection> {
        writeln!(self.output, "{GREETING}")?;

        let city: City = self.ask_until(CITY_QUESTION, str::parse)?;
        let month: MonthFilter = self.ask_until(MONTH_QUESTION, str::parse)?;
        let day: DayFilter = self.ask_until(DAY_QUESTION, str::parse)?;

        let selection = FilterSelection { city, month, day };
        write_lines(&mut self.output, &build_selection_lines(&selection))?;
        Ok(selection)
    }
}

/// Terminal prompt failures (lost tty, interrupted read) surface as
/// [`BikeshareError::Other`].
fn terminal_error(err: dialoguer::Error) -> BikeshareError {
    BikeshareError::Other(err.into())
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Month, Weekday};

    fn run_filters(script: &str) -> (Result<FilterSelection>, String) {
        let mut out = Vec::new();
        let result = Prompter::new(script.as_bytes(), &mut out).get_filters();
        (result, String::from_utf8(out).unwrap())
    }

    #[test]
    fn test_get_filters_valid_first_try() {
        let (result, out) = run_filters("Chicago\nJUNE\nall\n");
        let sel = result.unwrap();

        assert_eq!(sel.city, City::Chicago);
        assert_eq!(sel.month, MonthFilter::Only(Month::June));
        assert_eq!(sel.day, DayFilter::All);
        assert!(out.starts_with(GREETING));
        assert!(out.contains("City...: Chicago"));
        assert!(out.contains("Month..: June"));
        assert!(out.contains("Day....: All"));
    }

    #[test]
    fn test_get_filters_reprompts_each_field() {
        let (result, out) = run_filters("boston\nnew york city\njun\nall\nfri\nFriday\n");
        let sel = result.unwrap();

        assert_eq!(sel.city, City::NewYorkCity);
        assert_eq!(sel.month, MonthFilter::All);
        assert_eq!(sel.day, DayFilter::Only(Weekday::Fri));
        assert_eq!(out.matches(CITY_QUESTION).count(), 2);
        assert_eq!(out.matches(MONTH_QUESTION).count(), 2);
        assert_eq!(out.matches(DAY_QUESTION).count(), 2);
        assert!(out.contains("Invalid city 'boston'"));
        assert!(out.contains("Invalid month 'jun'"));
        assert!(out.contains("Invalid day of week 'fri'"));
    }

    #[test]
    fn test_get_filters_input_closed() {
        let (result, _) = run_filters("washington\n");
        assert!(matches!(result, Err(BikeshareError::InputClosed)));
    }

    #[test]
    fn test_confirm_variants() {
        let mut out = Vec::new();
        let mut p = Prompter::new("YES\nyes \nno\ny\n".as_bytes(), &mut out);
        assert!(p.confirm("?").unwrap());
        assert!(p.confirm("?").unwrap());
        assert!(!p.confirm("?").unwrap());
        assert!(!p.confirm("?").unwrap());
        // Exhausted input reads as "no".
        assert!(!p.confirm("?").unwrap());
    }

    #[test]
    fn test_get_filters_reprompts_after_invalid_utf8() {
        let mut out = Vec::new();
        let sel = Prompter::new(&b"chic\xffago\nchicago\nall\nall\n"[..], &mut out)
            .get_filters()
            .unwrap();
        let out = String::from_utf8(out).unwrap();

        assert_eq!(sel.city, City::Chicago);
        assert_eq!(out.matches(CITY_QUESTION).count(), 2);
        assert!(out.contains("Invalid city 'chic\u{fffd}ago'"));
    }

    #[test]
    fn test_terminal_error_keeps_cause() {
        let err = terminal_error(dialoguer::Error::IO(std::io::Error::other("tty gone")));
        assert!(matches!(err, BikeshareError::Other(_)));
        assert!(err.to_string().contains("tty gone"));
    }

    #[test]
    fn test_prompter_defaults_to_stream_mode() {
        let mut out = Vec::new();
        let p = Prompter::new("".as_bytes(), &mut out);
        assert_eq!(p.mode(), PromptMode::Stream);
        let p = p.with_mode(PromptMode::Terminal);
        assert_eq!(p.mode(), PromptMode::Terminal);
    }

    #[test]
    fn test_ask_strips_line_ending() {
        let mut out = Vec::new();
        let mut p = Prompter::new("  washington \r\n".as_bytes(), &mut out);
        assert_eq!(p.ask("city? ").unwrap().as_deref(), Some("washington"));
        assert_eq!(p.ask("again? ").unwrap(), None);
        assert_eq!(String::from_utf8(out).unwrap(), "city? again? ");
    }
}
