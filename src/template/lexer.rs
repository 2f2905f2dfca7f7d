use crate::error::EvaluationError;

#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    /// A helper name or a dotted path.
    Word(String),
    /// The contents of a double-quoted literal.
    Str(String),
    /// A numeric literal, kept as written.
    Number(String),
    LParen,
    RParen,
}

/// Splits the inside of one `{{ }}` span into tokens.
pub struct Lexer {
    input: Vec<char>,
    position: usize,
}

impl Lexer {
    pub fn new(input: &str) -> Self {
        Lexer {
            input: input.chars().collect(),
            position: 0,
        }
    }

    pub fn tokenize(mut self) -> Result<Vec<(Token, usize)>, EvaluationError> {
        let mut tokens = Vec::new();
        loop {
            self.skip_whitespace();
            let start = self.position;
            let token = match self.current_char() {
                None => break,
                Some('(') => {
                    self.advance();
                    Token::LParen
                }
                Some(')') => {
                    self.advance();
                    Token::RParen
                }
                Some('"') => self.read_string()?,
                Some(ch) if ch.is_ascii_digit() => self.read_number()?,
                Some('-') if self.peek_char(1).is_some_and(|c| c.is_ascii_digit()) => {
                    self.read_number()?
                }
                Some(_) => self.read_word(),
            };

            if !matches!(token, Token::LParen | Token::RParen) {
                self.expect_boundary()?;
            }
            tokens.push((token, start));
        }
        Ok(tokens)
    }

    fn current_char(&self) -> Option<char> {
        self.input.get(self.position).copied()
    }

    fn peek_char(&self, offset: usize) -> Option<char> {
        self.input.get(self.position + offset).copied()
    }

    fn advance(&mut self) {
        self.position += 1;
    }

    fn skip_whitespace(&mut self) {
        while self.current_char().is_some_and(char::is_whitespace) {
            self.advance();
        }
    }

    /// A literal or word must end at whitespace, a parenthesis, or the end of the span.
    fn expect_boundary(&self) -> Result<(), EvaluationError> {
        match self.current_char() {
            None | Some('(') | Some(')') => Ok(()),
            Some(ch) if ch.is_whitespace() => Ok(()),
            Some(ch) => Err(EvaluationError::Syntax {
                message: format!("unexpected '{}'", ch),
                position: self.position,
            }),
        }
    }

    /// Reads a double-quoted literal. There is no escape syntax: the first
    /// quote after the opening one always closes the literal.
    fn read_string(&mut self) -> Result<Token, EvaluationError> {
        let start = self.position;
        self.advance();

        let mut result = String::new();
        while let Some(ch) = self.current_char() {
            self.advance();
            if ch == '"' {
                return Ok(Token::Str(result));
            }
            result.push(ch);
        }
        Err(EvaluationError::UnterminatedString(start))
    }

    fn read_number(&mut self) -> Result<Token, EvaluationError> {
        let start = self.position;
        let mut number = String::new();
        if self.current_char() == Some('-') {
            number.push('-');
            self.advance();
        }
        while let Some(ch) = self.current_char() {
            if ch.is_ascii_digit() || ch == '.' {
                number.push(ch);
                self.advance();
            } else {
                break;
            }
        }

        if number.parse::<f64>().is_err() {
            return Err(EvaluationError::Syntax {
                message: format!("invalid number '{}'", number),
                position: start,
            });
        }
        Ok(Token::Number(number))
    }

    fn read_word(&mut self) -> Token {
        let mut word = String::new();
        while let Some(ch) = self.current_char() {
            if ch.is_whitespace() || matches!(ch, '(' | ')' | '"') {
                break;
            }
            word.push(ch);
            self.advance();
        }
        Token::Word(word)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tokens(input: &str) -> Vec<Token> {
        Lexer::new(input)
            .tokenize()
            .unwrap()
            .into_iter()
            .map(|(token, _)| token)
            .collect()
    }

    #[test]
    fn nested_call() {
        assert_eq!(
            tokens("uppercase (dropFirst data.name 4)"),
            vec![
                Token::Word("uppercase".to_string()),
                Token::LParen,
                Token::Word("dropFirst".to_string()),
                Token::Word("data.name".to_string()),
                Token::Number("4".to_string()),
                Token::RParen,
            ]
        );
    }

    #[test]
    fn string_literal_keeps_inner_spaces() {
        assert_eq!(
            tokens(r#"replace data.x "a b" "-""#),
            vec![
                Token::Word("replace".to_string()),
                Token::Word("data.x".to_string()),
                Token::Str("a b".to_string()),
                Token::Str("-".to_string()),
            ]
        );
    }

    #[test]
    fn embedded_quotes_are_rejected() {
        assert!(Lexer::new(r#"lowercase "a\"b""#).tokenize().is_err());
        assert!(Lexer::new(r#"lowercase "a""b""#).tokenize().is_err());
        assert_eq!(
            Lexer::new(r#"lowercase "abc"#).tokenize(),
            Err(EvaluationError::UnterminatedString(10))
        );
    }

    #[test]
    fn negative_and_decimal_numbers() {
        assert_eq!(
            tokens("numberFormat -0.5"),
            vec![
                Token::Word("numberFormat".to_string()),
                Token::Number("-0.5".to_string()),
            ]
        );
        assert!(Lexer::new("prefix data.x 1.2.3").tokenize().is_err());
    }
}
