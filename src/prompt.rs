//! Interactive console prompts for choosing a survey date.
//!
//! Every prompt repeats until it gets a valid answer. End of input is an
//! error rather than another retry.

use std::io::{BufRead, Write};
use std::ops::RangeInclusive;
use std::path::{Path, PathBuf};

use anyhow::{Result, bail};
use chrono::NaiveDate;
use tracing::debug;

use crate::survey::{locate_survey, survey_file_name};

pub const DAY_RANGE: RangeInclusive<u32> = 1..=31;
pub const MONTH_RANGE: RangeInclusive<u32> = 1..=12;
pub const YEAR_RANGE: RangeInclusive<u32> = 2000..=2024;

/// Line-oriented question/answer session over any reader and writer.
pub struct Prompter<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Prompter<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Prompter { input, output }
    }

    fn ask(&mut self, question: &str) -> Result<String> {
        write!(self.output, "{question}")?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            bail!("input closed while waiting for an answer");
        }
        Ok(line.trim().to_string())
    }

    fn say(&mut self, message: &str) -> Result<()> {
        writeln!(self.output, "{message}")?;
        Ok(())
    }

    /// Asks until the answer is an integer inside `range`.
    pub fn ask_in_range(
        &mut self,
        question: &str,
        range: RangeInclusive<u32>,
        out_of_range: &str,
    ) -> Result<u32> {
        loop {
            let answer = self.ask(question)?;
            if answer.is_empty() || !answer.chars().all(|c| c.is_ascii_digit()) {
                self.say("Integer required")?;
                continue;
            }
            match answer.parse::<u32>() {
                Ok(value) if range.contains(&value) => return Ok(value),
                _ => self.say(out_of_range)?,
            }
        }
    }

    /// Asks for day, month and year until they form a real calendar date.
    pub fn ask_date(&mut self) -> Result<NaiveDate> {
        loop {
            let day = self.ask_in_range(
                "Please enter the day of the survey in the format dd: ",
                DAY_RANGE,
                "Out of range - values must be in the range 1 and 31.",
            )?;
            let month = self.ask_in_range(
                "Please enter the month of the survey in the format mm: ",
                MONTH_RANGE,
                "Out of range - values must be in the range 1 to 12.",
            )?;
            let year = self.ask_in_range(
                "Please enter the year of the survey in the format yyyy: ",
                YEAR_RANGE,
                "Out of range - values must range from 2000 and 2024.",
            )?;

            // year is bounded by YEAR_RANGE, so the cast cannot wrap
            match NaiveDate::from_ymd_opt(year as i32, month, day) {
                Some(date) => return Ok(date),
                None => self.say(&format!("Invalid date: {day:02}/{month:02}/{year}"))?,
            }
        }
    }

    /// Asks for a date until a survey file for it exists in `dir`.
    pub fn ask_survey(&mut self, dir: &Path) -> Result<(NaiveDate, PathBuf)> {
        loop {
            let date = self.ask_date()?;
            if let Some(path) = locate_survey(dir, date) {
                debug!(path = %path.display(), "Survey file selected");
                return Ok((date, path));
            }
            self.say(&format!("Invalid path: {}", survey_file_name(date)))?;
        }
    }

    /// Asks a Y/N question until answered; case-insensitive.
    pub fn ask_yes_no(&mut self, question: &str) -> Result<bool> {
        loop {
            match self.ask(question)?.to_uppercase().as_str() {
                "Y" => return Ok(true),
                "N" => return Ok(false),
                _ => self.say("Invalid input - please enter Y or N.")?,
            }
        }
    }
}
