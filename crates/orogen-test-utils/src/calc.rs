//! A small arithmetic expression compiler for tests.
//!
//! Implements the [`ExpressionCompiler`] seam with a recursive-descent
//! parser over `+ - * /`, unary minus, parentheses, numeric literals,
//! the coordinate names `x`/`y`/`z`, and named constants resolved at
//! compile time. Enough grammar to exercise the parsed-function plugin;
//! production deployments inject a full-featured evaluator instead.

use indexmap::IndexMap;
use orogen_core::{ExpressionError, Point};
use orogen_plugins::{CompiledExpressionSet, ExpressionCompiler};

#[derive(Clone, Debug, PartialEq)]
enum Token {
    Num(f64),
    Ident(String),
    Plus,
    Minus,
    Star,
    Slash,
    LParen,
    RParen,
}

fn tokenize(text: &str) -> Result<Vec<Token>, ExpressionError> {
    let mut tokens = Vec::new();
    let mut chars = text.chars().peekable();
    while let Some(&c) = chars.peek() {
        match c {
            ' ' | '\t' => {
                chars.next();
            }
            '+' => {
                chars.next();
                tokens.push(Token::Plus);
            }
            '-' => {
                chars.next();
                tokens.push(Token::Minus);
            }
            '*' => {
                chars.next();
                tokens.push(Token::Star);
            }
            '/' => {
                chars.next();
                tokens.push(Token::Slash);
            }
            '(' => {
                chars.next();
                tokens.push(Token::LParen);
            }
            ')' => {
                chars.next();
                tokens.push(Token::RParen);
            }
            '0'..='9' | '.' => {
                let mut lit = String::new();
                while let Some(&d) = chars.peek() {
                    if d.is_ascii_digit() || d == '.' {
                        lit.push(d);
                        chars.next();
                    } else {
                        break;
                    }
                }
                let value = lit.parse().map_err(|_| ExpressionError::Parse {
                    reason: format!("malformed number '{lit}'"),
                })?;
                tokens.push(Token::Num(value));
            }
            c if c.is_ascii_alphabetic() || c == '_' => {
                let mut name = String::new();
                while let Some(&d) = chars.peek() {
                    if d.is_ascii_alphanumeric() || d == '_' {
                        name.push(d);
                        chars.next();
                    } else {
                        break;
                    }
                }
                tokens.push(Token::Ident(name));
            }
            other => {
                return Err(ExpressionError::Parse {
                    reason: format!("unexpected character '{other}'"),
                })
            }
        }
    }
    Ok(tokens)
}

#[derive(Clone, Debug)]
enum Expr {
    Num(f64),
    Coord(usize),
    Neg(Box<Expr>),
    Add(Box<Expr>, Box<Expr>),
    Sub(Box<Expr>, Box<Expr>),
    Mul(Box<Expr>, Box<Expr>),
    Div(Box<Expr>, Box<Expr>),
}

impl Expr {
    fn eval(&self, position: &Point) -> Result<f64, ExpressionError> {
        Ok(match self {
            Self::Num(v) => *v,
            // Missing trailing coordinates read as zero.
            Self::Coord(i) => position.get(*i).copied().unwrap_or(0.0),
            Self::Neg(e) => -e.eval(position)?,
            Self::Add(a, b) => a.eval(position)? + b.eval(position)?,
            Self::Sub(a, b) => a.eval(position)? - b.eval(position)?,
            Self::Mul(a, b) => a.eval(position)? * b.eval(position)?,
            Self::Div(a, b) => {
                let divisor = b.eval(position)?;
                if divisor == 0.0 {
                    return Err(ExpressionError::Eval {
                        reason: "division by zero".to_string(),
                    });
                }
                a.eval(position)? / divisor
            }
        })
    }
}

struct Parser<'a> {
    tokens: &'a [Token],
    pos: usize,
    constants: &'a IndexMap<String, f64>,
}

impl<'a> Parser<'a> {
    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.pos)
    }

    fn next(&mut self) -> Option<Token> {
        let tok = self.tokens.get(self.pos).cloned();
        if tok.is_some() {
            self.pos += 1;
        }
        tok
    }

    fn expr(&mut self) -> Result<Expr, ExpressionError> {
        let mut lhs = self.term()?;
        while let Some(op) = self.peek() {
            match op {
                Token::Plus => {
                    self.next();
                    lhs = Expr::Add(Box::new(lhs), Box::new(self.term()?));
                }
                Token::Minus => {
                    self.next();
                    lhs = Expr::Sub(Box::new(lhs), Box::new(self.term()?));
                }
                _ => break,
            }
        }
        Ok(lhs)
    }

    fn term(&mut self) -> Result<Expr, ExpressionError> {
        let mut lhs = self.factor()?;
        while let Some(op) = self.peek() {
            match op {
                Token::Star => {
                    self.next();
                    lhs = Expr::Mul(Box::new(lhs), Box::new(self.factor()?));
                }
                Token::Slash => {
                    self.next();
                    lhs = Expr::Div(Box::new(lhs), Box::new(self.factor()?));
                }
                _ => break,
            }
        }
        Ok(lhs)
    }

    fn factor(&mut self) -> Result<Expr, ExpressionError> {
        match self.next() {
            Some(Token::Num(v)) => Ok(Expr::Num(v)),
            Some(Token::Minus) => Ok(Expr::Neg(Box::new(self.factor()?))),
            Some(Token::Ident(name)) => match name.as_str() {
                "x" => Ok(Expr::Coord(0)),
                "y" => Ok(Expr::Coord(1)),
                "z" => Ok(Expr::Coord(2)),
                _ => self
                    .constants
                    .get(&name)
                    .map(|&v| Expr::Num(v))
                    .ok_or_else(|| ExpressionError::Parse {
                        reason: format!("unknown identifier '{name}'"),
                    }),
            },
            Some(Token::LParen) => {
                let inner = self.expr()?;
                match self.next() {
                    Some(Token::RParen) => Ok(inner),
                    _ => Err(ExpressionError::Parse {
                        reason: "missing closing parenthesis".to_string(),
                    }),
                }
            }
            Some(tok) => Err(ExpressionError::Parse {
                reason: format!("unexpected token {tok:?}"),
            }),
            None => Err(ExpressionError::Parse {
                reason: "unexpected end of expression".to_string(),
            }),
        }
    }
}

fn parse_component(text: &str, constants: &IndexMap<String, f64>) -> Result<Expr, ExpressionError> {
    let tokens = tokenize(text)?;
    if tokens.is_empty() {
        return Err(ExpressionError::Parse {
            reason: "empty expression component".to_string(),
        });
    }
    let mut parser = Parser {
        tokens: &tokens,
        pos: 0,
        constants,
    };
    let expr = parser.expr()?;
    if parser.pos != tokens.len() {
        return Err(ExpressionError::Parse {
            reason: format!("unexpected trailing token {:?}", tokens[parser.pos]),
        });
    }
    Ok(expr)
}

struct CalcExpressionSet {
    components: Vec<Expr>,
}

impl CompiledExpressionSet for CalcExpressionSet {
    fn component_count(&self) -> usize {
        self.components.len()
    }

    fn evaluate(&self, component: usize, position: &Point) -> Result<f64, ExpressionError> {
        let expr = self
            .components
            .get(component)
            .ok_or_else(|| ExpressionError::Eval {
                reason: format!(
                    "component {component} out of range for {} components",
                    self.components.len()
                ),
            })?;
        expr.eval(position)
    }
}

/// Arithmetic [`ExpressionCompiler`] over `+ - * /`, parentheses,
/// coordinates `x`/`y`/`z`, and compile-time constants.
pub struct CalcCompiler;

impl ExpressionCompiler for CalcCompiler {
    fn compile(
        &self,
        components: &[String],
        constants: &IndexMap<String, f64>,
    ) -> Result<Box<dyn CompiledExpressionSet>, ExpressionError> {
        let components = components
            .iter()
            .map(|c| parse_component(c, constants))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Box::new(CalcExpressionSet { components }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use smallvec::smallvec;

    fn eval(expr: &str, position: Point) -> Result<f64, ExpressionError> {
        let set = CalcCompiler.compile(&[expr.to_string()], &IndexMap::new())?;
        set.evaluate(0, &position)
    }

    #[test]
    fn precedence_and_parentheses() {
        assert_eq!(eval("1 + 2 * 3", smallvec![]).unwrap(), 7.0);
        assert_eq!(eval("(1 + 2) * 3", smallvec![]).unwrap(), 9.0);
        assert_eq!(eval("8 / 2 / 2", smallvec![]).unwrap(), 2.0);
        assert_eq!(eval("1 - 2 - 3", smallvec![]).unwrap(), -4.0);
    }

    #[test]
    fn coordinates_read_from_the_point() {
        assert_eq!(eval("x + y", smallvec![2.0, 3.0]).unwrap(), 5.0);
        assert_eq!(eval("x * z", smallvec![4.0, 0.0, 2.5]).unwrap(), 10.0);
        // Missing trailing coordinate reads as zero.
        assert_eq!(eval("z", smallvec![1.0, 2.0]).unwrap(), 0.0);
    }

    #[test]
    fn unary_minus_binds_tighter_than_addition() {
        assert_eq!(eval("-x + 1", smallvec![3.0]).unwrap(), -2.0);
        assert_eq!(eval("- - 2", smallvec![]).unwrap(), 2.0);
    }

    #[test]
    fn constants_resolve_at_compile_time() {
        let constants: IndexMap<String, f64> = [("ampl".to_string(), 0.25)].into_iter().collect();
        let set = CalcCompiler
            .compile(&["ampl * x".to_string()], &constants)
            .unwrap();
        let p: Point = smallvec![8.0];
        assert_eq!(set.evaluate(0, &p).unwrap(), 2.0);
    }

    #[test]
    fn unknown_identifier_is_a_parse_error() {
        assert!(matches!(
            eval("depth + 1", smallvec![]),
            Err(ExpressionError::Parse { .. })
        ));
    }

    #[test]
    fn trailing_garbage_is_rejected() {
        assert!(matches!(
            eval("1 2", smallvec![]),
            Err(ExpressionError::Parse { .. })
        ));
        assert!(matches!(
            eval("x +", smallvec![]),
            Err(ExpressionError::Parse { .. })
        ));
        assert!(matches!(
            eval("(x", smallvec![]),
            Err(ExpressionError::Parse { .. })
        ));
    }

    #[test]
    fn division_by_zero_is_an_eval_error() {
        assert!(matches!(
            eval("1 / y", smallvec![1.0, 0.0]),
            Err(ExpressionError::Eval { .. })
        ));
    }
}
