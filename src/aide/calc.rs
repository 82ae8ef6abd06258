//! A small arithmetic evaluator for `+ - * /` over integer literals.
//!
//! Input limits: operands of at most 9 digits and at most 5 operands per
//! expression. Exponentiation (`**`) is rejected explicitly.
//!
//! Grammar:
//!
//! ```text
//! expr  := term (('+' | '-') term)*
//! term  := unary (('*' | '/') unary)*
//! unary := ('+' | '-') unary | number
//! ```

use thiserror::Error;

const MAX_OPERAND_DIGITS: usize = 9;
const MAX_OPERANDS: usize = 5;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CalcError {
    #[error("Expression is empty")]
    Empty,

    #[error("Unknown character '{0}' in expression")]
    UnknownCharacter(char),

    #[error("Exponentiation is not supported")]
    Exponentiation,

    #[error("Number too large: operands are limited to {} digits", MAX_OPERAND_DIGITS)]
    OperandTooLong,

    #[error("Too many values: use at most {} operators in one expression", MAX_OPERANDS - 1)]
    TooManyOperands,

    #[error("Division by zero is not allowed")]
    DivisionByZero,

    #[error("Malformed expression")]
    Syntax,
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum Token {
    Number(f64),
    Plus,
    Minus,
    Star,
    Slash,
}

/// Evaluate `input`. Division is exact (`7/2` is `3.5`).
pub fn evaluate(input: &str) -> Result<f64, CalcError> {
    let tokens = tokenize(input)?;
    let mut parser = Parser { tokens, pos: 0 };
    let value = parser.expr()?;
    if parser.pos != parser.tokens.len() {
        return Err(CalcError::Syntax);
    }
    Ok(value)
}

/// Render a result the way a person would write it: `4` rather than `4.0`.
pub fn format_result(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        format!("{}", value)
    }
}

fn tokenize(input: &str) -> Result<Vec<Token>, CalcError> {
    if input.trim().is_empty() {
        return Err(CalcError::Empty);
    }
    if let Some(bad) = input
        .chars()
        .find(|c| !(c.is_ascii_digit() || "+-*/".contains(*c) || c.is_whitespace()))
    {
        return Err(CalcError::UnknownCharacter(bad));
    }
    if input.contains("**") {
        return Err(CalcError::Exponentiation);
    }

    let mut tokens = Vec::new();
    let mut operand_digits = Vec::new();
    let mut chars = input.chars().peekable();
    while let Some(&c) = chars.peek() {
        if c.is_whitespace() {
            chars.next();
            continue;
        }
        if c.is_ascii_digit() {
            let mut digits = String::new();
            while let Some(&d) = chars.peek() {
                if !d.is_ascii_digit() {
                    break;
                }
                digits.push(d);
                chars.next();
            }
            operand_digits.push(digits.len());
            let value = digits.parse::<f64>().map_err(|_| CalcError::Syntax)?;
            tokens.push(Token::Number(value));
            continue;
        }
        tokens.push(match c {
            '+' => Token::Plus,
            '-' => Token::Minus,
            '*' => Token::Star,
            '/' => Token::Slash,
            other => return Err(CalcError::UnknownCharacter(other)),
        });
        chars.next();
    }

    // Length is checked over every operand before the count.
    if operand_digits.iter().any(|&len| len > MAX_OPERAND_DIGITS) {
        return Err(CalcError::OperandTooLong);
    }
    if operand_digits.len() > MAX_OPERANDS {
        return Err(CalcError::TooManyOperands);
    }
    Ok(tokens)
}

struct Parser {
    tokens: Vec<Token>,
    pos: usize,
}

impl Parser {
    fn peek(&self) -> Option<Token> {
        self.tokens.get(self.pos).copied()
    }

    fn next(&mut self) -> Option<Token> {
        let token = self.peek();
        if token.is_some() {
            self.pos += 1;
        }
        token
    }

    fn expr(&mut self) -> Result<f64, CalcError> {
        let mut value = self.term()?;
        while let Some(op @ (Token::Plus | Token::Minus)) = self.peek() {
            self.pos += 1;
            let rhs = self.term()?;
            value = if op == Token::Plus {
                value + rhs
            } else {
                value - rhs
            };
        }
        Ok(value)
    }

    fn term(&mut self) -> Result<f64, CalcError> {
        let mut value = self.unary()?;
        while let Some(op @ (Token::Star | Token::Slash)) = self.peek() {
            self.pos += 1;
            let rhs = self.unary()?;
            if op == Token::Star {
                value *= rhs;
            } else {
                if rhs == 0.0 {
                    return Err(CalcError::DivisionByZero);
                }
                value /= rhs;
            }
        }
        Ok(value)
    }

    fn unary(&mut self) -> Result<f64, CalcError> {
        match self.next() {
            Some(Token::Plus) => self.unary(),
            Some(Token::Minus) => Ok(-self.unary()?),
            Some(Token::Number(n)) => Ok(n),
            _ => Err(CalcError::Syntax),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn respects_precedence() {
        assert_eq!(evaluate("2+3*4").unwrap(), 14.0);
        assert_eq!(evaluate("10 - 4 / 2").unwrap(), 8.0);
        assert_eq!(evaluate("-3+5").unwrap(), 2.0);
        assert_eq!(evaluate("8/-2").unwrap(), -4.0);
    }

    #[test]
    fn division_is_exact() {
        assert_eq!(evaluate("7/2").unwrap(), 3.5);
        assert_eq!(format_result(evaluate("7/2").unwrap()), "3.5");
        assert_eq!(format_result(evaluate("4/2").unwrap()), "2");
    }

    #[test]
    fn reports_distinct_errors() {
        assert_eq!(evaluate("1/0"), Err(CalcError::DivisionByZero));
        assert_eq!(evaluate("2**3"), Err(CalcError::Exponentiation));
        assert_eq!(evaluate("2^3"), Err(CalcError::UnknownCharacter('^')));
        assert_eq!(evaluate("(1+2)"), Err(CalcError::UnknownCharacter('(')));
        assert_eq!(evaluate("1234567890+1"), Err(CalcError::OperandTooLong));
        assert_eq!(evaluate("1+2+3+4+5+6"), Err(CalcError::TooManyOperands));
        assert_eq!(
            evaluate("1+2+3+4+5+6+1234567890"),
            Err(CalcError::OperandTooLong)
        );
        assert_eq!(evaluate("1+"), Err(CalcError::Syntax));
        assert_eq!(evaluate("1 2"), Err(CalcError::Syntax));
        assert_eq!(evaluate("   "), Err(CalcError::Empty));
    }

    #[test]
    fn accepts_limits_exactly() {
        assert_eq!(evaluate("999999999+1").unwrap(), 1_000_000_000.0);
        assert_eq!(evaluate("1+2+3+4+5").unwrap(), 15.0);
    }
}
