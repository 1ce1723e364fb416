// Parser for the repeat-rule grammar:
//
//   rule    = "y" | "d" SP number | "w" SP list | "m" SP list [ SP list ]
//   list    = number { "," number }
//
// Tokens are separated by exactly one space.

use crate::ast::*;
use crate::error::{Field, RuleError, Span};

/// A space-separated word of the input and its byte range.
#[derive(Debug, Clone, Copy)]
struct Word<'a> {
    text: &'a str,
    span: Span,
}

/// Split on single spaces, keeping empty words so double spaces are caught.
fn split_words(input: &str, sep: char) -> Vec<Word<'_>> {
    let mut words = Vec::new();
    let mut start = 0;
    for part in input.split(sep) {
        let end = start + part.len();
        words.push(Word {
            text: part,
            span: Span::new(start, end),
        });
        start = end + sep.len_utf8();
    }
    words
}

/// Parser state: consumes the words of one rule.
struct Parser<'a> {
    words: Vec<Word<'a>>,
    pos: usize,
    input: &'a str,
}

impl<'a> Parser<'a> {
    fn new(input: &'a str) -> Self {
        Self {
            words: split_words(input, ' '),
            pos: 0,
            input,
        }
    }

    fn peek(&self) -> Option<Word<'a>> {
        self.words.get(self.pos).copied()
    }

    fn advance(&mut self) -> Option<Word<'a>> {
        let word = self.peek();
        if word.is_some() {
            self.pos += 1;
        }
        word
    }

    fn error_at_end(&self, message: String) -> RuleError {
        let end = self.input.len();
        RuleError::malformed(message, Span::new(end, end), self.input)
    }

    /// Take the next word, which must exist and be non-empty.
    fn expect(&mut self, expected: &str) -> Result<Word<'a>, RuleError> {
        match self.advance() {
            Some(word) if word.text.is_empty() => Err(RuleError::malformed(
                format!("expected {expected}, got an extra space"),
                word.span,
                self.input,
            )),
            Some(word) => Ok(word),
            None => Err(self.error_at_end(format!("expected {expected}"))),
        }
    }

    /// Fail if anything follows the rule.
    fn expect_end(&self, grammar: &str) -> Result<(), RuleError> {
        match self.peek() {
            None => Ok(()),
            Some(word) => {
                let span = Span::new(word.span.start, self.input.len());
                Err(RuleError::malformed(
                    format!("unexpected '{}' after rule, expected '{grammar}'", word.text),
                    span,
                    self.input,
                ))
            }
        }
    }

    // rule = "y" | "d" ... | "w" ... | "m" ...
    fn parse_rule(&mut self) -> Result<Rule, RuleError> {
        let Some(head) = self.advance() else {
            return Err(RuleError::Empty);
        };

        let rule = match head.text {
            "y" => {
                self.expect_end("y")?;
                Rule::Yearly
            }
            "d" => {
                let interval = self.parse_interval()?;
                self.expect_end("d <days>")?;
                Rule::Daily { interval }
            }
            "w" => {
                let days =
                    self.parse_list(Field::Weekday, "a list of weekdays", Weekday::from_number)?;
                self.expect_end("w <weekdays>")?;
                Rule::Weekly { days }
            }
            "m" => {
                let days =
                    self.parse_list(Field::Day, "a list of days", MonthDay::from_value)?;
                let months = if self.peek().is_some() {
                    self.parse_list(Field::Month, "a list of months", Month::from_number)?
                } else {
                    Vec::new()
                };
                self.expect_end("m <days> [months]")?;
                Rule::Monthly { days, months }
            }
            other => return Err(RuleError::unknown(other, head.span, self.input)),
        };

        Ok(rule)
    }

    fn parse_interval(&mut self) -> Result<u16, RuleError> {
        let word = self.expect("a number of days")?;
        let n = self.parse_number(Field::Interval, word)?;
        if !(1..=i64::from(Rule::MAX_INTERVAL)).contains(&n) {
            return Err(RuleError::out_of_range(
                Field::Interval,
                n,
                word.span,
                self.input,
            ));
        }
        Ok(n as u16)
    }

    // list = number { "," number }
    fn parse_list<T>(
        &mut self,
        field: Field,
        expected: &str,
        convert: impl Fn(i64) -> Option<T>,
    ) -> Result<Vec<T>, RuleError> {
        let word = self.expect(expected)?;
        let offset = word.span.start;
        let mut items = Vec::new();
        for item in split_words(word.text, ',') {
            let item = Word {
                text: item.text,
                span: Span::new(offset + item.span.start, offset + item.span.end),
            };
            let n = self.parse_number(field, item)?;
            match convert(n) {
                Some(value) => items.push(value),
                None => {
                    return Err(RuleError::out_of_range(field, n, item.span, self.input));
                }
            }
        }
        Ok(items)
    }

    fn parse_number(&self, field: Field, word: Word<'_>) -> Result<i64, RuleError> {
        word.text
            .parse::<i64>()
            .map_err(|_| RuleError::invalid_number(field, word.text, word.span, self.input))
    }
}

/// Parse a repeat rule.
pub fn parse(input: &str) -> Result<Rule, RuleError> {
    if input.is_empty() {
        return Err(RuleError::Empty);
    }
    Parser::new(input).parse_rule()
}
