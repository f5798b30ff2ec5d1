//! Command tokenizer and parser
//!
//! A line is tokenized once, then classified by the shape of its token
//! sequence. Shapes are tried in a fixed precedence order:
//!
//! 1. `DEST = OPERAND OP OPERAND`
//! 2. `DEST = X [,] [Y [,] Z]`
//! 3. `VEC * SCALAR` / `SCALAR * VEC`
//! 4. `OPERAND OP OPERAND`
//! 5. a bare word (name or keyword), with the rest of the line as argument
//!
//! Name resolution happens later in the session; the parser never looks at
//! the store.

/// A lexical token borrowed from the input line
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Token<'a> {
    Equals,
    Comma,
    Number(f64, &'a str),
    Word(&'a str),
}

impl<'a> Token<'a> {
    /// Source text of the token.
    pub fn text(&self) -> &'a str {
        match self {
            Token::Equals => "=",
            Token::Comma => ",",
            Token::Number(_, text) | Token::Word(text) => *text,
        }
    }

    fn word(&self) -> Option<&'a str> {
        match self {
            Token::Word(w) => Some(*w),
            _ => None,
        }
    }

    fn number(&self) -> Option<f64> {
        match self {
            Token::Number(n, _) => Some(*n),
            _ => None,
        }
    }

    fn operand(&self) -> Option<Operand<'a>> {
        match self {
            Token::Word(w) => Some(Operand::Name(*w)),
            Token::Number(n, _) => Some(Operand::Scalar(*n)),
            _ => None,
        }
    }
}

/// Split a line into tokens.
///
/// Whitespace separates tokens, `=` and `,` are always tokens of their own,
/// and any other run of characters is a word or, if it reads as a numeric
/// literal, a number.
pub fn tokenize(line: &str) -> Vec<Token<'_>> {
    let mut tokens = Vec::new();
    let mut start: Option<usize> = None;

    for (i, c) in line.char_indices() {
        if c.is_whitespace() || c == '=' || c == ',' {
            if let Some(s) = start.take() {
                tokens.push(classify_word(&line[s..i]));
            }
            match c {
                '=' => tokens.push(Token::Equals),
                ',' => tokens.push(Token::Comma),
                _ => {}
            }
        } else if start.is_none() {
            start = Some(i);
        }
    }
    if let Some(s) = start {
        tokens.push(classify_word(&line[s..]));
    }

    tokens
}

fn classify_word(word: &str) -> Token<'_> {
    if is_numeric_literal(word) {
        if let Ok(n) = word.parse::<f64>() {
            return Token::Number(n, word);
        }
    }
    Token::Word(word)
}

/// `[+-]digits[.digits][(e|E)[+-]digits]`, with digits required on at least
/// one side of the point. Words such as `inf` or `nan` stay words.
fn is_numeric_literal(word: &str) -> bool {
    let bytes = word.as_bytes();
    let mut i = 0;

    if matches!(bytes.first(), Some(b'+' | b'-')) {
        i += 1;
    }

    let int_start = i;
    while i < bytes.len() && bytes[i].is_ascii_digit() {
        i += 1;
    }
    let mut mantissa_digits = i - int_start;

    if i < bytes.len() && bytes[i] == b'.' {
        i += 1;
        let frac_start = i;
        while i < bytes.len() && bytes[i].is_ascii_digit() {
            i += 1;
        }
        mantissa_digits += i - frac_start;
    }
    if mantissa_digits == 0 {
        return false;
    }

    if i < bytes.len() && matches!(bytes[i], b'e' | b'E') {
        i += 1;
        if matches!(bytes.get(i), Some(b'+' | b'-')) {
            i += 1;
        }
        let exp_start = i;
        while i < bytes.len() && bytes[i].is_ascii_digit() {
            i += 1;
        }
        if i == exp_start {
            return false;
        }
    }

    i == bytes.len()
}

/// A binary operator accepted by the calculator
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Operator {
    Add,
    Sub,
    Mul,
    Dot,
    /// Cross product; keeps the letter case it was written with
    Cross(char),
}

impl Operator {
    /// Recognize an operator word, `None` for anything else.
    pub fn parse(text: &str) -> Option<Operator> {
        match text {
            "+" => Some(Operator::Add),
            "-" => Some(Operator::Sub),
            "*" => Some(Operator::Mul),
            "." => Some(Operator::Dot),
            "x" => Some(Operator::Cross('x')),
            "X" => Some(Operator::Cross('X')),
            _ => None,
        }
    }

    pub fn symbol(self) -> char {
        match self {
            Operator::Add => '+',
            Operator::Sub => '-',
            Operator::Mul => '*',
            Operator::Dot => '.',
            Operator::Cross(c) => c,
        }
    }
}

/// An operand before name resolution
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Operand<'a> {
    Name(&'a str),
    Scalar(f64),
}

impl Operand<'_> {
    pub fn as_name(&self) -> Option<&str> {
        match self {
            Operand::Name(n) => Some(*n),
            Operand::Scalar(_) => None,
        }
    }

    pub fn as_scalar(&self) -> Option<f64> {
        match self {
            Operand::Scalar(s) => Some(*s),
            Operand::Name(_) => None,
        }
    }
}

/// A classified input line
#[derive(Clone, Debug, PartialEq)]
pub enum Command<'a> {
    /// `dest = lhs op rhs`
    AssignBinary {
        dest: &'a str,
        lhs: Operand<'a>,
        op: &'a str,
        rhs: Operand<'a>,
    },
    /// `dest = x [y [z]]`
    AssignComponents { dest: &'a str, components: [f64; 3] },
    /// `name * factor` or `factor * name`
    Scale { name: &'a str, factor: f64 },
    /// `lhs op rhs`
    Binary {
        lhs: Operand<'a>,
        op: &'a str,
        rhs: Operand<'a>,
    },
    /// First word of the line and the trimmed remainder
    Word { word: &'a str, rest: &'a str },
    /// Nothing but whitespace
    Empty,
}

/// Classify one line of input
///
/// # Examples
///
/// ```
/// use minimat::command::{parse, Command, Operand};
///
/// assert_eq!(
///     parse("c = a x b"),
///     Command::AssignBinary {
///         dest: "c",
///         lhs: Operand::Name("a"),
///         op: "x",
///         rhs: Operand::Name("b"),
///     }
/// );
/// assert_eq!(
///     parse("a = 1, 2"),
///     Command::AssignComponents { dest: "a", components: [1.0, 2.0, 0.0] }
/// );
/// ```
pub fn parse(line: &str) -> Command<'_> {
    let tokens = tokenize(line);

    parse_assign_binary(&tokens)
        .or_else(|| parse_assign_components(&tokens))
        .or_else(|| parse_scale(&tokens))
        .or_else(|| parse_binary(&tokens))
        .unwrap_or_else(|| parse_word(line))
}

fn parse_assign_binary<'a>(tokens: &[Token<'a>]) -> Option<Command<'a>> {
    match tokens {
        [dest, Token::Equals, lhs, op, rhs] => Some(Command::AssignBinary {
            dest: dest.word()?,
            lhs: lhs.operand()?,
            op: op.word()?,
            rhs: rhs.operand()?,
        }),
        _ => None,
    }
}

fn parse_assign_components<'a>(tokens: &[Token<'a>]) -> Option<Command<'a>> {
    let [dest, Token::Equals, rest @ ..] = tokens else {
        return None;
    };
    let dest = dest.word()?;

    let mut components = [0.0f64; 3];
    let mut count = 0;
    let mut after_comma = false;
    for token in rest {
        match token {
            Token::Number(n, _) if count < components.len() => {
                components[count] = *n;
                count += 1;
                after_comma = false;
            }
            Token::Comma if count > 0 && !after_comma => after_comma = true,
            _ => return None,
        }
    }

    if count == 0 || after_comma {
        return None;
    }
    Some(Command::AssignComponents { dest, components })
}

fn parse_scale<'a>(tokens: &[Token<'a>]) -> Option<Command<'a>> {
    match tokens {
        [Token::Word(name), Token::Word("*"), factor]
        | [factor, Token::Word("*"), Token::Word(name)] => Some(Command::Scale {
            name: *name,
            factor: factor.number()?,
        }),
        _ => None,
    }
}

fn parse_binary<'a>(tokens: &[Token<'a>]) -> Option<Command<'a>> {
    match tokens {
        [lhs, op, rhs] => Some(Command::Binary {
            lhs: lhs.operand()?,
            op: op.text(),
            rhs: rhs.operand()?,
        }),
        _ => None,
    }
}

fn parse_word(line: &str) -> Command<'_> {
    let line = line.trim();
    if line.is_empty() {
        return Command::Empty;
    }
    match line.split_once(char::is_whitespace) {
        Some((word, rest)) => Command::Word {
            word,
            rest: rest.trim(),
        },
        None => Command::Word {
            word: line,
            rest: "",
        },
    }
}
