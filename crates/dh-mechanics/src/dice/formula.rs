//! Dice formula parsing and evaluation.
//!
//! Supported formats:
//! - `XdY`: roll X dice of size Y (`dY` means `1dY`, `d%` means `d100`)
//! - `XdYkhN` / `XdYklN`: keep the N highest / lowest (`kN` is `khN`)
//! - any sum of dice terms and integer constants: `3d10kh2+20`, `8+1d5`, `10-1d5`
//!
//! Parsing is case-insensitive and ignores whitespace.

use std::fmt;

use rand::rngs::StdRng;
use serde::{Deserialize, Serialize};

use super::pool::DicePool;
use super::roll::DieResult;
use super::Die;
use crate::error::{FormulaError, MechError, MechResult};

const MAX_DICE: u32 = 100;
const MAX_SIDES: u32 = 1000;

/// A keep rule on a dice term.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Keep {
    /// Keep the N highest dice.
    Highest(u32),
    /// Keep the N lowest dice.
    Lowest(u32),
}

/// One term of a formula.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Term {
    /// `count` dice of one size, with an optional keep rule.
    Dice {
        /// Number of dice rolled.
        count: u32,
        /// Die size.
        die: Die,
        /// Which dice count toward the total.
        keep: Option<Keep>,
    },
    /// A flat integer.
    Constant(i32),
}

impl Term {
    fn bounds(&self) -> (i64, i64) {
        match *self {
            Self::Constant(n) => (i64::from(n), i64::from(n)),
            Self::Dice { count, die, keep } => {
                let counted = match keep {
                    Some(Keep::Highest(n) | Keep::Lowest(n)) => n,
                    None => count,
                };
                (
                    i64::from(counted),
                    i64::from(counted) * i64::from(die.sides()),
                )
            }
        }
    }
}

/// A term with its sign.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignedTerm {
    /// Whether the term is subtracted.
    pub negative: bool,
    /// The term itself.
    pub term: Term,
}

/// A parsed dice formula.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiceFormula {
    terms: Vec<SignedTerm>,
}

/// The outcome of rolling a formula.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormulaRoll {
    /// Canonical text of the formula that was rolled.
    pub formula: String,
    /// Every die rolled, dropped ones included, in term order.
    pub dice: Vec<DieResult>,
    /// Final total.
    pub total: i32,
}

impl DiceFormula {
    /// Parse a formula string.
    pub fn parse(input: &str) -> MechResult<Self> {
        Parser::new(input)
            .parse()
            .map_err(|source| MechError::Formula {
                formula: input.to_string(),
                source,
            })
    }

    /// The signed terms of the formula.
    pub fn terms(&self) -> &[SignedTerm] {
        &self.terms
    }

    /// Roll the formula.
    pub fn roll(&self, rng: &mut StdRng) -> FormulaRoll {
        let mut dice = Vec::new();
        let mut total: i64 = 0;
        for signed in &self.terms {
            let value = match signed.term {
                Term::Constant(n) => i64::from(n),
                Term::Dice { count, die, keep } => {
                    let rolled = DicePool::of(count, die).roll_keeping(rng, keep);
                    let subtotal = i64::from(rolled.total());
                    dice.extend(rolled.dice);
                    subtotal
                }
            };
            total += if signed.negative { -value } else { value };
        }
        FormulaRoll {
            formula: self.to_string(),
            dice,
            total: clamp_i32(total),
        }
    }

    /// Smallest possible total.
    pub fn min(&self) -> i32 {
        clamp_i32(self.fold_bounds(|lo, hi, negative| if negative { -hi } else { lo }))
    }

    /// Largest possible total.
    pub fn max(&self) -> i32 {
        clamp_i32(self.fold_bounds(|lo, hi, negative| if negative { -lo } else { hi }))
    }

    fn fold_bounds(&self, pick: impl Fn(i64, i64, bool) -> i64) -> i64 {
        self.terms
            .iter()
            .map(|t| {
                let (lo, hi) = t.term.bounds();
                pick(lo, hi, t.negative)
            })
            .sum()
    }
}

fn clamp_i32(value: i64) -> i32 {
    value.clamp(i64::from(i32::MIN), i64::from(i32::MAX)) as i32
}

impl std::str::FromStr for DiceFormula {
    type Err = MechError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for DiceFormula {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, signed) in self.terms.iter().enumerate() {
            if signed.negative {
                write!(f, "-")?;
            } else if i > 0 {
                write!(f, "+")?;
            }
            match signed.term {
                Term::Constant(n) => write!(f, "{n}")?,
                Term::Dice { count, die, keep } => {
                    write!(f, "{count}{die}")?;
                    match keep {
                        Some(Keep::Highest(n)) => write!(f, "kh{n}")?,
                        Some(Keep::Lowest(n)) => write!(f, "kl{n}")?,
                        None => {}
                    }
                }
            }
        }
        Ok(())
    }
}

struct Parser {
    chars: Vec<char>,
    pos: usize,
}

impl Parser {
    fn new(input: &str) -> Self {
        let chars = input
            .chars()
            .filter(|c| !c.is_whitespace())
            .flat_map(char::to_lowercase)
            .collect();
        Self { chars, pos: 0 }
    }

    fn peek(&self) -> Option<char> {
        self.chars.get(self.pos).copied()
    }

    fn eat(&mut self, c: char) -> bool {
        if self.peek() == Some(c) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    fn parse(mut self) -> Result<DiceFormula, FormulaError> {
        if self.chars.is_empty() {
            return Err(FormulaError::Empty);
        }
        let mut terms = Vec::new();
        let mut negative = self.eat('-');
        if !negative {
            self.eat('+');
        }
        loop {
            let term = self.term()?;
            terms.push(SignedTerm { negative, term });
            match self.peek() {
                None => break,
                Some('+') => {
                    self.pos += 1;
                    negative = false;
                }
                Some('-') => {
                    self.pos += 1;
                    negative = true;
                }
                Some(found) => {
                    return Err(FormulaError::Unexpected {
                        found,
                        position: self.pos,
                    });
                }
            }
        }
        Ok(DiceFormula { terms })
    }

    fn term(&mut self) -> Result<Term, FormulaError> {
        let count = self.number()?;
        if !self.eat('d') {
            let n = count.ok_or(FormulaError::ExpectedNumber(self.pos))?;
            let n = i32::try_from(n).map_err(|_| FormulaError::NumberTooLarge(self.pos))?;
            return Ok(Term::Constant(n));
        }

        let count = count.unwrap_or(1);
        if !(1..=MAX_DICE).contains(&count) {
            return Err(FormulaError::InvalidDiceCount(count));
        }

        let sides = if self.eat('%') {
            100
        } else {
            self.number()?
                .ok_or(FormulaError::ExpectedNumber(self.pos))?
        };
        if !(2..=MAX_SIDES).contains(&sides) {
            return Err(FormulaError::InvalidDieSize(sides));
        }

        let keep = if self.eat('k') {
            let lowest = if self.eat('l') {
                true
            } else {
                self.eat('h');
                false
            };
            let n = self
                .number()?
                .ok_or(FormulaError::ExpectedNumber(self.pos))?;
            if n == 0 || n > count {
                return Err(FormulaError::InvalidKeep { keep: n, count });
            }
            Some(if lowest { Keep::Lowest(n) } else { Keep::Highest(n) })
        } else {
            None
        };

        Ok(Term::Dice {
            count,
            die: Die::from_sides(sides),
            keep,
        })
    }

    fn number(&mut self) -> Result<Option<u32>, FormulaError> {
        let start = self.pos;
        let mut value: u32 = 0;
        while let Some(digit) = self.peek().and_then(|c| c.to_digit(10)) {
            value = value
                .checked_mul(10)
                .and_then(|v| v.checked_add(digit))
                .ok_or(FormulaError::NumberTooLarge(start))?;
            self.pos += 1;
        }
        Ok((self.pos > start).then_some(value))
    }
}
