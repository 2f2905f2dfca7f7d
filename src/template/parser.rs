use super::lexer::{Lexer, Token};
use crate::context::Namespace;
use crate::error::EvaluationError;
use std::fmt;

/// A namespaced path such as `data.user.name`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathRef {
    pub namespace: Namespace,
    pub keys: Vec<String>,
}

impl PathRef {
    /// Parses `namespace(.key)*`. Returns `Ok(None)` for a word with no dot that
    /// is not a namespace, i.e. something that can only be a helper name.
    fn parse(word: &str, position: usize) -> Result<Option<Self>, EvaluationError> {
        let mut segments = word.split('.');
        let head = segments.next().unwrap_or_default();
        let namespace = match Namespace::parse(head) {
            Some(namespace) => namespace,
            None if word.contains('.') => {
                return Err(EvaluationError::UnknownNamespace(word.to_string()));
            }
            None => return Ok(None),
        };

        let keys: Vec<String> = segments.map(str::to_string).collect();
        if keys.iter().any(String::is_empty) {
            return Err(EvaluationError::Syntax {
                message: format!("empty key in path '{}'", word),
                position,
            });
        }
        Ok(Some(PathRef { namespace, keys }))
    }
}

impl fmt::Display for PathRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.namespace)?;
        for key in &self.keys {
            write!(f, ".{}", key)?;
        }
        Ok(())
    }
}

/// The expression inside one `{{ }}` span.
#[derive(Debug, Clone, PartialEq)]
pub enum Expression {
    Path(PathRef),
    /// A quoted string literal.
    Literal(String),
    /// A numeric literal, kept as written so integer arguments can be checked textually.
    Number(String),
    Call { helper: String, args: Vec<Expression> },
}

impl fmt::Display for Expression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expression::Path(path) => write!(f, "{}", path),
            Expression::Literal(text) => write!(f, "\"{}\"", text),
            Expression::Number(number) => write!(f, "{}", number),
            Expression::Call { helper, args } => {
                write!(f, "({}", helper)?;
                for arg in args {
                    write!(f, " {}", arg)?;
                }
                write!(f, ")")
            }
        }
    }
}

/// Recursive-descent parser over the tokens of a single span.
///
/// ```text
/// span := expr EOF
/// expr := WORD arg*            helper call, when WORD is not a path
///       | arg                  a lone path, literal or parenthesized call
/// arg  := STRING | NUMBER | PATH | "(" expr ")"
/// ```
pub struct Parser {
    tokens: Vec<(Token, usize)>,
    position: usize,
}

impl Parser {
    pub fn new(tokens: Vec<(Token, usize)>) -> Self {
        Self {
            tokens,
            position: 0,
        }
    }

    /// Tokenizes and parses the contents of one span.
    pub fn parse_span(source: &str) -> Result<Expression, EvaluationError> {
        let tokens = Lexer::new(source).tokenize()?;
        let mut parser = Parser::new(tokens);
        let expression = parser.parse_expression()?;
        match parser.peek() {
            None => Ok(expression),
            Some((Token::RParen, _)) => Err(EvaluationError::UnbalancedParentheses),
            Some((token, position)) => Err(EvaluationError::Syntax {
                message: format!("unexpected {:?} after expression", token),
                position: *position,
            }),
        }
    }

    fn peek(&self) -> Option<&(Token, usize)> {
        self.tokens.get(self.position)
    }

    fn next(&mut self) -> Option<(Token, usize)> {
        let token = self.tokens.get(self.position).cloned();
        if token.is_some() {
            self.position += 1;
        }
        token
    }

    fn parse_expression(&mut self) -> Result<Expression, EvaluationError> {
        if let Some((Token::Word(word), position)) = self.peek() {
            let position = *position;
            if PathRef::parse(word, position)?.is_none() {
                let helper = word.clone();
                self.position += 1;
                let mut args = Vec::new();
                while let Some((token, _)) = self.peek() {
                    if *token == Token::RParen {
                        break;
                    }
                    args.push(self.parse_argument()?);
                }
                return Ok(Expression::Call { helper, args });
            }
        }
        self.parse_argument()
    }

    fn parse_argument(&mut self) -> Result<Expression, EvaluationError> {
        match self.next() {
            None => Err(EvaluationError::Syntax {
                message: "expected an expression".to_string(),
                position: self.end_position(),
            }),
            Some((Token::Str(text), _)) => Ok(Expression::Literal(text)),
            Some((Token::Number(number), _)) => Ok(Expression::Number(number)),
            Some((Token::Word(word), position)) => match PathRef::parse(&word, position)? {
                Some(path) => Ok(Expression::Path(path)),
                None => Err(EvaluationError::UnknownNamespace(word)),
            },
            Some((Token::LParen, position)) => {
                if matches!(self.peek(), Some((Token::RParen, _))) {
                    return Err(EvaluationError::Syntax {
                        message: "empty parentheses".to_string(),
                        position,
                    });
                }
                let inner = self.parse_expression()?;
                match self.next() {
                    Some((Token::RParen, _)) => Ok(inner),
                    _ => Err(EvaluationError::UnbalancedParentheses),
                }
            }
            Some((Token::RParen, _)) => Err(EvaluationError::UnbalancedParentheses),
        }
    }

    fn end_position(&self) -> usize {
        self.tokens.last().map(|(_, position)| *position).unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn path(namespace: Namespace, keys: &[&str]) -> Expression {
        Expression::Path(PathRef {
            namespace,
            keys: keys.iter().map(|k| k.to_string()).collect(),
        })
    }

    #[test]
    fn lone_path() {
        assert_eq!(
            Parser::parse_span(" data.user.name ").unwrap(),
            path(Namespace::Data, &["user", "name"])
        );
    }

    #[test]
    fn nested_call() {
        let expr = Parser::parse_span("uppercase (dropFirst data.name 4)").unwrap();
        assert_eq!(
            expr,
            Expression::Call {
                helper: "uppercase".to_string(),
                args: vec![Expression::Call {
                    helper: "dropFirst".to_string(),
                    args: vec![
                        path(Namespace::Data, &["name"]),
                        Expression::Number("4".to_string()),
                    ],
                }],
            }
        );
        assert_eq!(expr.to_string(), "(uppercase (dropFirst data.name 4))");
    }

    #[test]
    fn unbalanced_parentheses() {
        assert_eq!(
            Parser::parse_span("uppercase (lowercase data.x"),
            Err(EvaluationError::UnbalancedParentheses)
        );
        assert_eq!(
            Parser::parse_span("uppercase data.x)"),
            Err(EvaluationError::UnbalancedParentheses)
        );
    }

    #[test]
    fn bare_word_argument_is_an_unknown_namespace() {
        assert_eq!(
            Parser::parse_span("uppercase name"),
            Err(EvaluationError::UnknownNamespace("name".to_string()))
        );
        assert_eq!(
            Parser::parse_span("session.token"),
            Err(EvaluationError::UnknownNamespace("session.token".to_string()))
        );
    }

    #[test]
    fn path_followed_by_arguments_is_rejected() {
        assert!(matches!(
            Parser::parse_span("data.name 4"),
            Err(EvaluationError::Syntax { .. })
        ));
        assert!(Parser::parse_span("   ").is_err());
    }
}
