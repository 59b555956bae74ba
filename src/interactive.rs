//! Interactive front end: filter prompts, yes/no questions and the raw data pager.
//!
//! [`Prompter`] works over any `BufRead`/`Write` pair so sessions can be scripted in tests.

use std::io::{self, BufRead, Write};

use crate::error::ExplorerResult;
use crate::registry::{City, DayFilter, FilterSelection, MonthFilter};
use crate::types::{DataSet, Schema, Value};

pub const SEPARATOR: &str = "----------------------------------------";

const GREETING: &str = "Hello! Let's explore some US bikeshare data!";
const CITY_PROMPT: &str = "Would you like to see data for Chicago, New York City, or Washington? ";
const CITY_INVALID: &str =
    "Invalid input. Please choose from Chicago, New York City, or Washington.";
const MONTH_PROMPT: &str = "Which month - January, February, March, April, May, June, July, \
    August, September, October, November, or December? Type 'all' for no month filter. ";
const MONTH_INVALID: &str =
    "Invalid input. Please choose a month from January to December, or 'all'.";
const DAY_PROMPT: &str = "Which day - Monday, Tuesday, Wednesday, Thursday, Friday, Saturday, \
    or Sunday? Type 'all' for no day filter. ";
const DAY_INVALID: &str = "Invalid input. Please choose from Monday, Tuesday, Wednesday, \
    Thursday, Friday, Saturday, Sunday, or 'all'.";

/// Asks questions on `output` and reads answers from `input`.
pub struct Prompter<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Prompter<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// Writer used for prompts, also handy for printing reports in between.
    pub fn output(&mut self) -> &mut W {
        &mut self.output
    }

    pub fn into_inner(self) -> (R, W) {
        (self.input, self.output)
    }

    /// Ask for city, month and day, re-asking each until the answer is valid.
    ///
    /// Fails with [`io::ErrorKind::UnexpectedEof`] if input ends first.
    pub fn ask_filters(&mut self) -> io::Result<FilterSelection> {
        writeln!(self.output, "{GREETING}")?;
        let city = self.ask_until(CITY_PROMPT, CITY_INVALID, City::from_name)?;
        let month = self.ask_until(MONTH_PROMPT, MONTH_INVALID, MonthFilter::from_name)?;
        let day = self.ask_until(DAY_PROMPT, DAY_INVALID, DayFilter::from_name)?;
        writeln!(self.output, "{SEPARATOR}")?;
        Ok(FilterSelection::new(city, month, day))
    }

    /// `true` only for an answer of `yes` (any case). End of input counts as `no`.
    pub fn confirm(&mut self, question: &str) -> io::Result<bool> {
        Ok(self
            .read_answer(question)?
            .is_some_and(|answer| answer.eq_ignore_ascii_case("yes")))
    }

    /// Show `page_size` rows of `dataset` at a time for as long as the user answers `yes`.
    ///
    /// A `page_size` of zero is treated as one. Returns the number of rows shown.
    pub fn page_raw_rows(&mut self, dataset: &DataSet, page_size: usize) -> io::Result<usize> {
        let page_size = page_size.max(1);
        let first =
            format!("Would you like to see {page_size} rows of raw data? Enter yes or no: ");
        if !self.confirm(&first)? {
            return Ok(0);
        }

        let mut shown = 0;
        let mut pages = RawRowPager::new(dataset, page_size);
        loop {
            match pages.next() {
                Some(page) => {
                    render_page(&dataset.schema, page.start, page.rows, &mut self.output)?;
                    shown += page.rows.len();
                }
                None => {
                    writeln!(self.output, "No more rows to display.")?;
                    break;
                }
            }
            if pages.is_done() {
                writeln!(self.output, "No more rows to display.")?;
                break;
            }
            if !self.confirm("Do you wish to continue? Enter yes or no: ")? {
                break;
            }
        }
        Ok(shown)
    }

    fn ask_until<T>(
        &mut self,
        prompt: &str,
        invalid: &str,
        parse: impl Fn(&str) -> ExplorerResult<T>,
    ) -> io::Result<T> {
        loop {
            let answer = self.read_answer(prompt)?.ok_or_else(|| {
                io::Error::new(io::ErrorKind::UnexpectedEof, "input closed while prompting")
            })?;
            match parse(&answer) {
                Ok(value) => return Ok(value),
                Err(_) => writeln!(self.output, "{invalid}")?,
            }
        }
    }

    /// Trimmed answer, or `None` at end of input.
    fn read_answer(&mut self, prompt: &str) -> io::Result<Option<String>> {
        write!(self.output, "{prompt}")?;
        self.output.flush()?;
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }
}

/// A window of consecutive rows.
#[derive(Debug, Clone, Copy)]
pub struct RawPage<'a> {
    /// Index of the first row of the page within the table.
    pub start: usize,
    pub rows: &'a [Vec<Value>],
}

/// Iterates a table `page_size` rows at a time.
#[derive(Debug, Clone)]
pub struct RawRowPager<'a> {
    dataset: &'a DataSet,
    page_size: usize,
    next: usize,
}

impl<'a> RawRowPager<'a> {
    /// A `page_size` of zero is treated as one.
    pub fn new(dataset: &'a DataSet, page_size: usize) -> Self {
        Self {
            dataset,
            page_size: page_size.max(1),
            next: 0,
        }
    }

    /// No rows left to show.
    pub fn is_done(&self) -> bool {
        self.next >= self.dataset.row_count()
    }
}

impl<'a> Iterator for RawRowPager<'a> {
    type Item = RawPage<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.is_done() {
            return None;
        }
        let start = self.next;
        let rows = self.dataset.window(start, self.page_size);
        self.next += rows.len();
        Some(RawPage { start, rows })
    }
}

/// Write rows as an aligned table with a header and a leading row index.
pub fn render_page(
    schema: &Schema,
    start: usize,
    rows: &[Vec<Value>],
    out: &mut impl Write,
) -> io::Result<()> {
    let cells: Vec<Vec<String>> = rows
        .iter()
        .map(|row| row.iter().map(Value::to_string).collect())
        .collect();

    let mut widths: Vec<usize> = schema.field_names().map(|n| n.chars().count()).collect();
    for row in &cells {
        for (w, cell) in widths.iter_mut().zip(row) {
            *w = (*w).max(cell.chars().count());
        }
    }
    let index_width = (start + rows.len()).saturating_sub(1).to_string().len();

    write!(out, "{:index_width$}", "")?;
    for (name, w) in schema.field_names().zip(&widths) {
        write!(out, "  {name:>w$}")?;
    }
    writeln!(out)?;

    for (offset, row) in cells.iter().enumerate() {
        write!(out, "{:<index_width$}", start + offset)?;
        for (cell, w) in row.iter().zip(&widths) {
            write!(out, "  {cell:>w$}")?;
        }
        writeln!(out)?;
    }
    Ok(())
}
