//! Runtime-defined systems from textual equations.
//!
//! Each of the three right-hand sides is tokenized, parsed into an [`Expr`],
//! resolved against the state variables `x`, `y`, `z` and the declared
//! parameter names, and compiled into stack [`Bytecode`]. Evaluation runs on a
//! fixed-size stack, so an [`ExpressionSystem`] is allocation-free per call
//! and can be shared across threads.

use std::collections::HashMap;

use thiserror::Error;

use crate::traits::State;

const STATE_VARS: [&str; 3] = ["x", "y", "z"];

/// Deepest operand stack a compiled expression may need.
pub const MAX_STACK_DEPTH: usize = 32;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ExpressionError {
    #[error("unexpected character '{0}'")]
    UnexpectedCharacter(char),

    #[error("malformed number '{0}'")]
    InvalidNumber(String),

    #[error("unexpected token {0}")]
    UnexpectedToken(String),

    #[error("unexpected end of expression")]
    UnexpectedEnd,

    #[error("unknown variable or parameter '{0}'")]
    UnknownIdentifier(String),

    #[error("unknown function '{0}'")]
    UnknownFunction(String),

    #[error("parameter name '{0}' is reserved or repeated")]
    InvalidParameterName(String),

    #[error("expression needs more than {} stack slots", MAX_STACK_DEPTH)]
    TooDeep,

    #[error("equation for d{var}/dt: {source}")]
    InEquation {
        var: &'static str,
        source: Box<ExpressionError>,
    },
}

/// Built-in unary functions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Function {
    Sin,
    Cos,
    Tan,
    Exp,
    Ln,
    Sqrt,
    Abs,
}

impl Function {
    fn lookup(name: &str) -> Option<Self> {
        Some(match name {
            "sin" => Function::Sin,
            "cos" => Function::Cos,
            "tan" => Function::Tan,
            "exp" => Function::Exp,
            "ln" => Function::Ln,
            "sqrt" => Function::Sqrt,
            "abs" => Function::Abs,
            _ => return None,
        })
    }

    #[inline]
    fn apply(self, a: f64) -> f64 {
        match self {
            Function::Sin => a.sin(),
            Function::Cos => a.cos(),
            Function::Tan => a.tan(),
            Function::Exp => a.exp(),
            Function::Ln => a.ln(),
            Function::Sqrt => a.sqrt(),
            Function::Abs => a.abs(),
        }
    }
}

/// Instructions for the operand-stack machine.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum OpCode {
    LoadConst(f64),
    /// State component: 0 = x, 1 = y, 2 = z.
    LoadVar(usize),
    LoadParam(usize),
    Add,
    Sub,
    Mul,
    Div,
    /// Pops exponent b and base a, pushes a^b.
    Pow,
    /// Integer power with a literal exponent.
    PowI(i32),
    Neg,
    Call(Function),
}

/// A compiled right-hand side.
#[derive(Debug, Clone, PartialEq)]
pub struct Bytecode {
    ops: Vec<OpCode>,
}

impl Bytecode {
    /// Runs the program. Compilation guarantees the stack never under- or
    /// overflows.
    pub fn execute(&self, vars: &State, params: &[f64]) -> f64 {
        let mut stack = [0.0f64; MAX_STACK_DEPTH];
        let mut top = 0usize;

        for op in &self.ops {
            match *op {
                OpCode::LoadConst(v) => {
                    stack[top] = v;
                    top += 1;
                }
                OpCode::LoadVar(i) => {
                    stack[top] = vars[i];
                    top += 1;
                }
                OpCode::LoadParam(i) => {
                    stack[top] = params[i];
                    top += 1;
                }
                OpCode::Neg => stack[top - 1] = -stack[top - 1],
                OpCode::PowI(n) => stack[top - 1] = stack[top - 1].powi(n),
                OpCode::Call(f) => stack[top - 1] = f.apply(stack[top - 1]),
                binary => {
                    top -= 1;
                    let b = stack[top];
                    let a = stack[top - 1];
                    stack[top - 1] = match binary {
                        OpCode::Add => a + b,
                        OpCode::Sub => a - b,
                        OpCode::Mul => a * b,
                        OpCode::Div => a / b,
                        OpCode::Pow => a.powf(b),
                        _ => unreachable!("unary and load ops are handled above"),
                    };
                }
            }
        }

        stack[0]
    }
}

// --- AST & Parser ---

#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    Number(f64),
    Ident(String),
    Neg(Box<Expr>),
    Binary(Box<Expr>, BinOp, Box<Expr>),
    Call(Function, Box<Expr>),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinOp {
    Add,
    Sub,
    Mul,
    Div,
    Pow,
}

#[derive(Debug, Clone, PartialEq)]
enum Token {
    Number(f64),
    Ident(String),
    Plus,
    Minus,
    Star,
    Slash,
    Caret,
    LParen,
    RParen,
}

fn describe(token: &Token) -> String {
    match token {
        Token::Number(n) => format!("'{n}'"),
        Token::Ident(name) => format!("'{name}'"),
        Token::Plus => "'+'".into(),
        Token::Minus => "'-'".into(),
        Token::Star => "'*'".into(),
        Token::Slash => "'/'".into(),
        Token::Caret => "'^'".into(),
        Token::LParen => "'('".into(),
        Token::RParen => "')'".into(),
    }
}

fn tokenize(input: &str) -> Result<Vec<Token>, ExpressionError> {
    let mut tokens = Vec::new();
    let mut chars = input.chars().peekable();

    while let Some(&c) = chars.peek() {
        if c.is_whitespace() {
            chars.next();
        } else if c.is_ascii_digit() || c == '.' {
            let mut literal = String::new();
            while let Some(&d) = chars.peek() {
                let exponent_sign =
                    (d == '+' || d == '-') && matches!(literal.chars().last(), Some('e' | 'E'));
                if d.is_ascii_digit() || d == '.' || d == 'e' || d == 'E' || exponent_sign {
                    literal.push(d);
                    chars.next();
                } else {
                    break;
                }
            }
            let value = literal
                .parse()
                .map_err(|_| ExpressionError::InvalidNumber(literal.clone()))?;
            tokens.push(Token::Number(value));
        } else if c.is_alphabetic() || c == '_' {
            let mut ident = String::new();
            while let Some(&d) = chars.peek() {
                if d.is_alphanumeric() || d == '_' {
                    ident.push(d);
                    chars.next();
                } else {
                    break;
                }
            }
            tokens.push(Token::Ident(ident));
        } else {
            tokens.push(match c {
                '+' => Token::Plus,
                '-' => Token::Minus,
                '*' => Token::Star,
                '/' => Token::Slash,
                '^' => Token::Caret,
                '(' => Token::LParen,
                ')' => Token::RParen,
                other => return Err(ExpressionError::UnexpectedCharacter(other)),
            });
            chars.next();
        }
    }
    Ok(tokens)
}

/// Parses one expression.
///
/// Precedence, loosest first: `+ -`, `* /`, unary minus, `^`
/// (right-associative), so `-x^2` is `-(x^2)`.
pub fn parse(input: &str) -> Result<Expr, ExpressionError> {
    let mut parser = Parser {
        tokens: tokenize(input)?,
        pos: 0,
    };
    let expr = parser.sum()?;
    match parser.peek() {
        None => Ok(expr),
        Some(token) => Err(ExpressionError::UnexpectedToken(describe(token))),
    }
}

struct Parser {
    tokens: Vec<Token>,
    pos: usize,
}

impl Parser {
    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.pos)
    }

    fn next(&mut self) -> Option<Token> {
        let token = self.tokens.get(self.pos).cloned();
        if token.is_some() {
            self.pos += 1;
        }
        token
    }

    fn expect_rparen(&mut self) -> Result<(), ExpressionError> {
        match self.next() {
            Some(Token::RParen) => Ok(()),
            Some(other) => Err(ExpressionError::UnexpectedToken(describe(&other))),
            None => Err(ExpressionError::UnexpectedEnd),
        }
    }

    fn sum(&mut self) -> Result<Expr, ExpressionError> {
        let mut left = self.product()?;
        loop {
            let op = match self.peek() {
                Some(Token::Plus) => BinOp::Add,
                Some(Token::Minus) => BinOp::Sub,
                _ => return Ok(left),
            };
            self.pos += 1;
            let right = self.product()?;
            left = Expr::Binary(Box::new(left), op, Box::new(right));
        }
    }

    fn product(&mut self) -> Result<Expr, ExpressionError> {
        let mut left = self.unary()?;
        loop {
            let op = match self.peek() {
                Some(Token::Star) => BinOp::Mul,
                Some(Token::Slash) => BinOp::Div,
                _ => return Ok(left),
            };
            self.pos += 1;
            let right = self.unary()?;
            left = Expr::Binary(Box::new(left), op, Box::new(right));
        }
    }

    fn unary(&mut self) -> Result<Expr, ExpressionError> {
        if let Some(Token::Minus) = self.peek() {
            self.pos += 1;
            return Ok(Expr::Neg(Box::new(self.unary()?)));
        }
        self.power()
    }

    fn power(&mut self) -> Result<Expr, ExpressionError> {
        let base = self.primary()?;
        if let Some(Token::Caret) = self.peek() {
            self.pos += 1;
            // Right operand goes back through unary so `2^-x` and `a^b^c` work.
            let exponent = self.unary()?;
            return Ok(Expr::Binary(Box::new(base), BinOp::Pow, Box::new(exponent)));
        }
        Ok(base)
    }

    fn primary(&mut self) -> Result<Expr, ExpressionError> {
        match self.next() {
            Some(Token::Number(n)) => Ok(Expr::Number(n)),
            Some(Token::Ident(name)) => {
                if let Some(Token::LParen) = self.peek() {
                    self.pos += 1;
                    let func = Function::lookup(&name)
                        .ok_or_else(|| ExpressionError::UnknownFunction(name.clone()))?;
                    let arg = self.sum()?;
                    self.expect_rparen()?;
                    Ok(Expr::Call(func, Box::new(arg)))
                } else {
                    Ok(Expr::Ident(name))
                }
            }
            Some(Token::LParen) => {
                let inner = self.sum()?;
                self.expect_rparen()?;
                Ok(inner)
            }
            Some(other) => Err(ExpressionError::UnexpectedToken(describe(&other))),
            None => Err(ExpressionError::UnexpectedEnd),
        }
    }
}

// --- Compiler ---

/// Resolves identifiers against `x, y, z` and the parameter list, then lowers
/// an [`Expr`] to [`Bytecode`].
pub struct Compiler {
    param_map: HashMap<String, usize>,
}

impl Compiler {
    pub fn new(param_names: &[&str]) -> Result<Self, ExpressionError> {
        let mut param_map = HashMap::new();
        for (i, &name) in param_names.iter().enumerate() {
            let reserved = STATE_VARS.contains(&name) || Function::lookup(name).is_some();
            if reserved || param_map.insert(name.to_string(), i).is_some() {
                return Err(ExpressionError::InvalidParameterName(name.to_string()));
            }
        }
        Ok(Self { param_map })
    }

    pub fn compile(&self, expr: &Expr) -> Result<Bytecode, ExpressionError> {
        let mut ops = Vec::new();
        let mut depth = 0;
        let mut max_depth = 0;
        self.lower(expr, &mut ops, &mut depth, &mut max_depth)?;
        if max_depth > MAX_STACK_DEPTH {
            return Err(ExpressionError::TooDeep);
        }
        Ok(Bytecode { ops })
    }

    fn lower(
        &self,
        expr: &Expr,
        ops: &mut Vec<OpCode>,
        depth: &mut usize,
        max_depth: &mut usize,
    ) -> Result<(), ExpressionError> {
        match expr {
            Expr::Number(n) => push(ops, OpCode::LoadConst(*n), depth, max_depth),
            Expr::Ident(name) => {
                let op = if let Some(i) = STATE_VARS.iter().position(|v| v == name) {
                    OpCode::LoadVar(i)
                } else if let Some(&i) = self.param_map.get(name) {
                    OpCode::LoadParam(i)
                } else {
                    return Err(ExpressionError::UnknownIdentifier(name.clone()));
                };
                push(ops, op, depth, max_depth);
            }
            Expr::Neg(inner) => {
                self.lower(inner, ops, depth, max_depth)?;
                ops.push(OpCode::Neg);
            }
            Expr::Call(func, arg) => {
                self.lower(arg, ops, depth, max_depth)?;
                ops.push(OpCode::Call(*func));
            }
            Expr::Binary(base, BinOp::Pow, exponent) => match **exponent {
                Expr::Number(n) if n.fract() == 0.0 && n.abs() <= 64.0 => {
                    self.lower(base, ops, depth, max_depth)?;
                    ops.push(OpCode::PowI(n as i32));
                }
                _ => {
                    self.lower(base, ops, depth, max_depth)?;
                    self.lower(exponent, ops, depth, max_depth)?;
                    ops.push(OpCode::Pow);
                    *depth -= 1;
                }
            },
            Expr::Binary(left, op, right) => {
                self.lower(left, ops, depth, max_depth)?;
                self.lower(right, ops, depth, max_depth)?;
                ops.push(match op {
                    BinOp::Add => OpCode::Add,
                    BinOp::Sub => OpCode::Sub,
                    BinOp::Mul => OpCode::Mul,
                    BinOp::Div => OpCode::Div,
                    BinOp::Pow => OpCode::Pow,
                });
                *depth -= 1;
            }
        }
        Ok(())
    }
}

fn push(ops: &mut Vec<OpCode>, op: OpCode, depth: &mut usize, max_depth: &mut usize) {
    ops.push(op);
    *depth += 1;
    *max_depth = (*max_depth).max(*depth);
}

// --- ExpressionSystem ---

/// A vector field given by three compiled right-hand sides.
#[derive(Debug, Clone, PartialEq)]
pub struct ExpressionSystem {
    equations: [Bytecode; 3],
    param_count: usize,
}

impl ExpressionSystem {
    /// Compiles `[dx/dt, dy/dt, dz/dt]`. Errors name the failing equation.
    pub fn compile(equations: [&str; 3], param_names: &[&str]) -> Result<Self, ExpressionError> {
        let compiler = Compiler::new(param_names)?;
        let compile_one = |i: usize| {
            parse(equations[i])
                .and_then(|expr| compiler.compile(&expr))
                .map_err(|e| ExpressionError::InEquation {
                    var: STATE_VARS[i],
                    source: Box::new(e),
                })
        };
        Ok(Self {
            equations: [compile_one(0)?, compile_one(1)?, compile_one(2)?],
            param_count: param_names.len(),
        })
    }

    pub fn param_count(&self) -> usize {
        self.param_count
    }

    pub fn eval(&self, state: &State, params: &[f64]) -> State {
        State::new(
            self.equations[0].execute(state, params),
            self.equations[1].execute(state, params),
            self.equations[2].execute(state, params),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::systems::lorenz;

    fn eval(src: &str, state: [f64; 3], params: &[f64], names: &[&str]) -> f64 {
        let expr = parse(src).unwrap();
        Compiler::new(names)
            .unwrap()
            .compile(&expr)
            .unwrap()
            .execute(&State::from(state), params)
    }

    #[test]
    fn precedence_and_associativity() {
        assert_eq!(eval("1 + 2 * 3", [0.0; 3], &[], &[]), 7.0);
        assert_eq!(eval("(1 + 2) * 3", [0.0; 3], &[], &[]), 9.0);
        assert_eq!(eval("8 / 4 / 2", [0.0; 3], &[], &[]), 1.0);
        assert_eq!(eval("-x^2", [3.0, 0.0, 0.0], &[], &[]), -9.0);
        assert_eq!(eval("2^3^2", [0.0; 3], &[], &[]), 512.0);
        assert_eq!(eval("2^-1", [0.0; 3], &[], &[]), 0.5);
        assert_eq!(eval("1e-2 * 300", [0.0; 3], &[], &[]), 3.0);
    }

    #[test]
    fn functions_and_parameters() {
        assert_eq!(eval("abs(x - y)", [1.0, 4.0, 0.0], &[], &[]), 3.0);
        assert_eq!(eval("sqrt(z) * k", [0.0, 0.0, 16.0], &[0.5], &["k"]), 2.0);
        assert_eq!(eval("exp(0) + ln(1)", [0.0; 3], &[], &[]), 1.0);
        assert_eq!(eval("sin(y)", [0.0, 0.3, 0.0], &[], &[]), 0.3f64.sin());
    }

    #[test]
    fn integer_powers_are_specialised() {
        let code = Compiler::new(&[]).unwrap().compile(&parse("x^3").unwrap()).unwrap();
        assert_eq!(code.ops, vec![OpCode::LoadVar(0), OpCode::PowI(3)]);
        let code = Compiler::new(&[]).unwrap().compile(&parse("x^0.5").unwrap()).unwrap();
        assert_eq!(code.ops.last(), Some(&OpCode::Pow));
    }

    #[test]
    fn reports_errors() {
        assert_eq!(parse("x $ y"), Err(ExpressionError::UnexpectedCharacter('$')));
        assert_eq!(parse("(x + y"), Err(ExpressionError::UnexpectedEnd));
        assert_eq!(parse("x y"), Err(ExpressionError::UnexpectedToken("'y'".into())));
        assert_eq!(parse("foo(x)"), Err(ExpressionError::UnknownFunction("foo".into())));
        assert_eq!(parse("1.2.3"), Err(ExpressionError::InvalidNumber("1.2.3".into())));

        let compiler = Compiler::new(&["a"]).unwrap();
        assert_eq!(
            compiler.compile(&parse("a * w").unwrap()),
            Err(ExpressionError::UnknownIdentifier("w".into()))
        );
        assert!(Compiler::new(&["x"]).is_err());
        assert!(Compiler::new(&["a", "a"]).is_err());
        assert!(Compiler::new(&["sin"]).is_err());
    }

    #[test]
    fn deep_nesting_is_rejected() {
        let mut src = String::from("x");
        for _ in 0..40 {
            src = format!("x + ({src})");
        }
        let expr = parse(&src).unwrap();
        assert_eq!(Compiler::new(&[]).unwrap().compile(&expr), Err(ExpressionError::TooDeep));
    }

    #[test]
    fn compiled_lorenz_matches_native() {
        let system = ExpressionSystem::compile(
            ["sigma * (y - x)", "x * (rho - z) - y", "x * y - beta * z"],
            &["sigma", "rho", "beta"],
        )
        .unwrap();
        let params = [10.0, 28.0, 8.0 / 3.0];
        for state in [
            State::new(0.0, 1.0, 0.0),
            State::new(-3.5, 2.25, 17.0),
            State::new(12.0, -8.0, 30.0),
        ] {
            assert_eq!(system.eval(&state, &params), lorenz(&state, &params));
        }
        assert_eq!(system.param_count(), 3);
    }

    #[test]
    fn equation_errors_name_the_component() {
        let err = ExpressionSystem::compile(["y", "q", "z"], &[]).unwrap_err();
        assert_eq!(
            err,
            ExpressionError::InEquation {
                var: "y",
                source: Box::new(ExpressionError::UnknownIdentifier("q".into())),
            }
        );
        assert_eq!(err.to_string(), "equation for dy/dt: unknown variable or parameter 'q'");
    }
}
