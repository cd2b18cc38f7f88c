//! Hand-written recursive-descent parser over the `logos` token stream,
//! producing a typed [`crate::ast::FunctionDef`].

#[cfg(test)]
mod tests;

use crate::ast::{
    BinOp, BoolOp, BuiltinFn, CompareOp, Expr, FunctionDef, NodeId, Span, Stmt, Target, UnaryOp,
};
use crate::lexer::Token;
use crate::{CompileError, Result};
use logos::Logos;

struct Parser<'s> {
    tokens: Vec<(Token<'s>, Span)>,
    pos: usize,
    next_id: u32,
}

/// Parse the source of a single update function into a [`FunctionDef`].
///
/// Fails with [`CompileError::UnsupportedInput`] if the source is not a
/// plain single-parameter function definition (spec §4.1).
pub fn parse(source: &str) -> Result<FunctionDef> {
    let mut lexer = Token::lexer(source);
    let mut tokens = Vec::new();
    while let Some(tok) = lexer.next() {
        let tok = tok.map_err(|_| CompileError::UnsupportedInput {
            message: format!("unrecognized token at {:?}", lexer.span()),
        })?;
        let span = Span::new(lexer.span().start as u32, lexer.span().end as u32);
        tokens.push((tok, span));
    }
    let mut parser = Parser { tokens, pos: 0, next_id: 0 };
    parser.parse_function()
}

impl<'s> Parser<'s> {
    fn fresh_id(&mut self) -> NodeId {
        let id = NodeId(self.next_id);
        self.next_id += 1;
        id
    }

    fn peek(&self) -> Option<&Token<'s>> {
        self.tokens.get(self.pos).map(|(t, _)| t)
    }

    fn peek_span(&self) -> Span {
        self.tokens
            .get(self.pos)
            .map(|(_, s)| *s)
            .unwrap_or_default()
    }

    fn advance(&mut self) -> Option<(Token<'s>, Span)> {
        let tok = self.tokens.get(self.pos).cloned();
        if tok.is_some() {
            self.pos += 1;
        }
        tok
    }

    fn expect(&mut self, expected: Token<'s>, what: &str) -> Result<Span> {
        match self.advance() {
            Some((tok, span)) if tok == expected => Ok(span),
            Some((_, span)) => Err(CompileError::UnsupportedInput {
                message: format!("expected {what} at byte {}", span.start),
            }),
            None => Err(CompileError::UnsupportedInput {
                message: format!("expected {what}, found end of input"),
            }),
        }
    }

    fn expect_ident(&mut self, what: &str) -> Result<String> {
        match self.advance() {
            Some((Token::Ident(name), _)) => Ok(name.to_string()),
            Some((_, span)) => Err(CompileError::UnsupportedInput {
                message: format!("expected {what} at byte {}", span.start),
            }),
            None => Err(CompileError::UnsupportedInput {
                message: format!("expected {what}, found end of input"),
            }),
        }
    }

    fn parse_function(&mut self) -> Result<FunctionDef> {
        let start = self.peek_span();
        self.expect(Token::Def, "'def'")?;
        let name = self.expect_ident("function name")?;
        self.expect(Token::LParen, "'('")?;
        let param = self.expect_ident("a single parameter name")?;
        self.expect(Token::RParen, "')'")?;
        self.expect(Token::LBrace, "'{'")?;
        let body = self.parse_stmts_until(Token::RBrace)?;
        let end = self.expect(Token::RBrace, "'}'")?;
        if self.peek().is_some() {
            return Err(CompileError::UnsupportedInput {
                message: "unexpected trailing input after function body".to_string(),
            });
        }
        Ok(FunctionDef {
            name,
            param,
            body,
            span: start.join(end),
        })
    }

    fn parse_stmts_until(&mut self, terminator: Token<'s>) -> Result<Vec<Stmt>> {
        let mut stmts = Vec::new();
        while self.peek().is_some() && self.peek() != Some(&terminator) {
            stmts.push(self.parse_stmt()?);
        }
        Ok(stmts)
    }

    fn parse_stmt(&mut self) -> Result<Stmt> {
        match self.peek() {
            Some(Token::Entity) => self.parse_bind_entity(),
            Some(Token::Pass) => {
                let id = self.fresh_id();
                let start = self.peek_span();
                self.advance();
                let end = self.expect(Token::Semi, "';'")?;
                Ok(Stmt::Pass { id, span: start.join(end) })
            }
            Some(Token::Str(_)) => self.parse_docstring(),
            Some(Token::If) => self.parse_if(),
            _ => self.parse_assign_like(),
        }
    }

    fn parse_bind_entity(&mut self) -> Result<Stmt> {
        let id = self.fresh_id();
        let start = self.peek_span();
        self.expect(Token::Entity, "'entity'")?;
        let name = self.expect_ident("entity variable name")?;
        self.expect(Token::LParen, "'('")?;
        let mut components = Vec::new();
        if self.peek() != Some(&Token::RParen) {
            loop {
                components.push(self.expect_str("component name string")?);
                if self.peek() == Some(&Token::Comma) {
                    self.advance();
                } else {
                    break;
                }
            }
        }
        self.expect(Token::RParen, "')'")?;
        let end = self.expect(Token::Semi, "';'")?;
        Ok(Stmt::BindEntity {
            id,
            name,
            components,
            span: start.join(end),
        })
    }

    fn expect_str(&mut self, what: &str) -> Result<String> {
        match self.advance() {
            Some((Token::Str(s), _)) => Ok(s),
            Some((_, span)) => Err(CompileError::UnsupportedInput {
                message: format!("expected {what} at byte {}", span.start),
            }),
            None => Err(CompileError::UnsupportedInput {
                message: format!("expected {what}, found end of input"),
            }),
        }
    }

    fn parse_docstring(&mut self) -> Result<Stmt> {
        let id = self.fresh_id();
        let start = self.peek_span();
        let text = self.expect_str("docstring")?;
        let end = self.expect(Token::Semi, "';'")?;
        Ok(Stmt::Docstring { id, text, span: start.join(end) })
    }

    fn parse_if(&mut self) -> Result<Stmt> {
        let id = self.fresh_id();
        let start = self.peek_span();
        self.expect(Token::If, "'if'")?;
        let cond = self.parse_expr()?;
        self.expect(Token::LBrace, "'{'")?;
        let then_body = self.parse_stmts_until(Token::RBrace)?;
        let mut end = self.expect(Token::RBrace, "'}'")?;

        let else_body = if self.peek() == Some(&Token::Elif) {
            let nested = self.parse_elif()?;
            end = nested.span();
            vec![nested]
        } else if self.peek() == Some(&Token::Else) {
            self.advance();
            self.expect(Token::LBrace, "'{'")?;
            let body = self.parse_stmts_until(Token::RBrace)?;
            end = self.expect(Token::RBrace, "'}'")?;
            body
        } else {
            Vec::new()
        };

        Ok(Stmt::If {
            id,
            cond,
            then_body,
            else_body,
            span: start.join(end),
        })
    }

    /// `elif COND { ... }` parses like an `if`, keeping the same node shape
    /// so if/elif/else chains are uniformly nested `If`s (spec §4.6).
    fn parse_elif(&mut self) -> Result<Stmt> {
        let id = self.fresh_id();
        let start = self.peek_span();
        self.expect(Token::Elif, "'elif'")?;
        let cond = self.parse_expr()?;
        self.expect(Token::LBrace, "'{'")?;
        let then_body = self.parse_stmts_until(Token::RBrace)?;
        let mut end = self.expect(Token::RBrace, "'}'")?;

        let else_body = if self.peek() == Some(&Token::Elif) {
            let nested = self.parse_elif()?;
            end = nested.span();
            vec![nested]
        } else if self.peek() == Some(&Token::Else) {
            self.advance();
            self.expect(Token::LBrace, "'{'")?;
            let body = self.parse_stmts_until(Token::RBrace)?;
            end = self.expect(Token::RBrace, "'}'")?;
            body
        } else {
            Vec::new()
        };

        Ok(Stmt::If {
            id,
            cond,
            then_body,
            else_body,
            span: start.join(end),
        })
    }

    fn parse_assign_like(&mut self) -> Result<Stmt> {
        let id = self.fresh_id();
        let start = self.peek_span();
        let target = self.parse_target()?;
        let op = match self.peek() {
            Some(Token::Eq) => None,
            Some(Token::PlusEq) => Some(BinOp::Add),
            Some(Token::MinusEq) => Some(BinOp::Sub),
            Some(Token::StarEq) => Some(BinOp::Mul),
            Some(Token::SlashEq) => Some(BinOp::Div),
            Some(Token::PercentEq) => Some(BinOp::Mod),
            _ => {
                return Err(CompileError::UnsupportedInput {
                    message: format!("expected assignment operator at byte {}", start.start),
                });
            }
        };
        self.advance();
        let value = self.parse_expr()?;
        let end = self.expect(Token::Semi, "';'")?;
        let span = start.join(end);
        Ok(match op {
            None => Stmt::Assign { id, target, value, span },
            Some(op) => Stmt::AugAssign { id, target, op, value, span },
        })
    }

    fn parse_target(&mut self) -> Result<Target> {
        let name = self.expect_ident("assignment target")?;
        if self.peek() == Some(&Token::Dot) {
            self.advance();
            let component = self.expect_ident("component name")?;
            self.expect(Token::Dot, "'.'")?;
            let attribute = self.expect_ident("attribute name")?;
            Ok(Target::Attribute {
                entity: name,
                component,
                attribute,
            })
        } else {
            Ok(Target::Name(name))
        }
    }

    // Precedence, low to high: ternary < or < and < not < compare < additive < term < unary < atom.
    fn parse_expr(&mut self) -> Result<Expr> {
        self.parse_ternary()
    }

    fn parse_ternary(&mut self) -> Result<Expr> {
        let then_expr = self.parse_or()?;
        if self.peek() == Some(&Token::If) {
            let id = self.fresh_id();
            let start = then_expr.span();
            self.advance();
            let cond = self.parse_or()?;
            self.expect(Token::Else, "'else'")?;
            let else_expr = self.parse_ternary()?;
            let span = start.join(else_expr.span());
            return Ok(Expr::Ternary {
                id,
                cond: Box::new(cond),
                then_expr: Box::new(then_expr),
                else_expr: Box::new(else_expr),
                span,
            });
        }
        Ok(then_expr)
    }

    fn parse_or(&mut self) -> Result<Expr> {
        let mut lhs = self.parse_and()?;
        while self.peek() == Some(&Token::Or) {
            let id = self.fresh_id();
            self.advance();
            let rhs = self.parse_and()?;
            let span = lhs.span().join(rhs.span());
            lhs = Expr::BoolOp {
                id,
                op: BoolOp::Or,
                lhs: Box::new(lhs),
                rhs: Box::new(rhs),
                span,
            };
        }
        Ok(lhs)
    }

    fn parse_and(&mut self) -> Result<Expr> {
        let mut lhs = self.parse_not()?;
        while self.peek() == Some(&Token::And) {
            let id = self.fresh_id();
            self.advance();
            let rhs = self.parse_not()?;
            let span = lhs.span().join(rhs.span());
            lhs = Expr::BoolOp {
                id,
                op: BoolOp::And,
                lhs: Box::new(lhs),
                rhs: Box::new(rhs),
                span,
            };
        }
        Ok(lhs)
    }

    fn parse_not(&mut self) -> Result<Expr> {
        if self.peek() == Some(&Token::Not) {
            let id = self.fresh_id();
            let start = self.peek_span();
            self.advance();
            let operand = self.parse_not()?;
            let span = start.join(operand.span());
            return Ok(Expr::Not { id, operand: Box::new(operand), span });
        }
        self.parse_compare()
    }

    fn parse_compare(&mut self) -> Result<Expr> {
        let lhs = self.parse_additive()?;
        let op = match self.peek() {
            Some(Token::EqEq) => CompareOp::Eq,
            Some(Token::NotEq) => CompareOp::NotEq,
            Some(Token::Lt) => CompareOp::Lt,
            Some(Token::Gt) => CompareOp::Gt,
            Some(Token::LtEq) => CompareOp::Le,
            Some(Token::GtEq) => CompareOp::Ge,
            _ => return Ok(lhs),
        };
        let id = self.fresh_id();
        self.advance();
        let rhs = self.parse_additive()?;
        let span = lhs.span().join(rhs.span());
        Ok(Expr::Compare { id, op, lhs: Box::new(lhs), rhs: Box::new(rhs), span })
    }

    fn parse_additive(&mut self) -> Result<Expr> {
        let mut lhs = self.parse_term()?;
        loop {
            let op = match self.peek() {
                Some(Token::Plus) => BinOp::Add,
                Some(Token::Minus) => BinOp::Sub,
                _ => break,
            };
            let id = self.fresh_id();
            self.advance();
            let rhs = self.parse_term()?;
            let span = lhs.span().join(rhs.span());
            lhs = Expr::Binary { id, op, lhs: Box::new(lhs), rhs: Box::new(rhs), span };
        }
        Ok(lhs)
    }

    fn parse_term(&mut self) -> Result<Expr> {
        let mut lhs = self.parse_unary()?;
        loop {
            let op = match self.peek() {
                Some(Token::Star) => BinOp::Mul,
                Some(Token::Slash) => BinOp::Div,
                Some(Token::Percent) => BinOp::Mod,
                _ => break,
            };
            let id = self.fresh_id();
            self.advance();
            let rhs = self.parse_unary()?;
            let span = lhs.span().join(rhs.span());
            lhs = Expr::Binary { id, op, lhs: Box::new(lhs), rhs: Box::new(rhs), span };
        }
        Ok(lhs)
    }

    fn parse_unary(&mut self) -> Result<Expr> {
        let op = match self.peek() {
            Some(Token::Minus) => Some(UnaryOp::Neg),
            Some(Token::Plus) => Some(UnaryOp::Pos),
            _ => None,
        };
        if let Some(op) = op {
            let id = self.fresh_id();
            let start = self.peek_span();
            self.advance();
            let operand = self.parse_unary()?;
            let span = start.join(operand.span());
            return Ok(Expr::Unary { id, op, operand: Box::new(operand), span });
        }
        self.parse_atom()
    }

    fn parse_atom(&mut self) -> Result<Expr> {
        let id = self.fresh_id();
        let (tok, span) = self.advance().ok_or_else(|| CompileError::UnsupportedInput {
            message: "expected an expression, found end of input".to_string(),
        })?;
        match tok {
            Token::Int(value) => Ok(Expr::Int { id, value, span }),
            Token::Float(value) => Ok(Expr::Float { id, value, span }),
            Token::True => Ok(Expr::Bool { id, value: true, span }),
            Token::False => Ok(Expr::Bool { id, value: false, span }),
            Token::Str(value) => Ok(Expr::Str { id, value, span }),
            Token::LParen => {
                let inner = self.parse_expr()?;
                self.expect(Token::RParen, "')'")?;
                Ok(inner)
            }
            Token::Ident(name) => {
                if self.peek() == Some(&Token::LParen) {
                    return self.parse_call(id, name, span);
                }
                if self.peek() == Some(&Token::Dot) {
                    self.advance();
                    let component = self.expect_ident("component name")?;
                    self.expect(Token::Dot, "'.'")?;
                    let attribute = self.expect_ident("attribute name")?;
                    let end = self.peek_span();
                    return Ok(Expr::Attribute {
                        id,
                        entity: name.to_string(),
                        component,
                        attribute,
                        span: span.join(end),
                    });
                }
                Ok(Expr::Name { id, name: name.to_string(), span })
            }
            _ => Err(CompileError::UnsupportedInput {
                message: format!("unexpected token at byte {}", span.start),
            }),
        }
    }

    fn parse_call(&mut self, id: NodeId, name: &str, start: Span) -> Result<Expr> {
        let Some(func) = BuiltinFn::from_name(name) else {
            return Err(CompileError::UnsupportedInput {
                message: format!("call to unsupported function '{name}'"),
            });
        };
        self.expect(Token::LParen, "'('")?;
        let mut args = Vec::new();
        if self.peek() != Some(&Token::RParen) {
            loop {
                args.push(self.parse_expr()?);
                if self.peek() == Some(&Token::Comma) {
                    self.advance();
                } else {
                    break;
                }
            }
        }
        let end = self.expect(Token::RParen, "')'")?;
        if args.len() != func.arity() {
            return Err(CompileError::UnsupportedInput {
                message: format!(
                    "'{name}' expects {} argument(s), got {}",
                    func.arity(),
                    args.len()
                ),
            });
        }
        Ok(Expr::Call { id, func, args, span: start.join(end) })
    }
}
