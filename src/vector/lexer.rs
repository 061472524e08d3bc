//! Lexer for SVG path data (`d` attributes) using logos

use logos::Logos;

/// Byte range in source text
pub type Span = std::ops::Range<usize>;

#[derive(Logos, Debug, Clone, PartialEq)]
#[logos(skip r"[ \t\n\r,]+")]
pub enum Token {
    #[regex(r"[MmLlHhVvCcSsQqTtAaZz]", |lex| lex.slice().chars().next())]
    Command(char),

    #[regex(r"[-+]?([0-9]+\.?[0-9]*|\.[0-9]+)([eE][-+]?[0-9]+)?", |lex| {
        lex.slice().parse::<f32>().ok().filter(|n| n.is_finite())
    })]
    Number(f32),

    /// Input the lexer could not read, including numbers outside `f32` range
    Error,
}

/// Lex path data into tokens with spans
///
/// Unreadable input is kept as [`Token::Error`] so the parser rejects it.
pub fn lex(input: &str) -> impl Iterator<Item = (Token, Span)> + '_ {
    Token::lexer(input)
        .spanned()
        .map(|(tok, span)| (tok.unwrap_or(Token::Error), span))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tokens(input: &str) -> Vec<Token> {
        lex(input).map(|(t, _)| t).collect()
    }

    #[test]
    fn test_commands_and_numbers() {
        assert_eq!(
            tokens("M10 20L30,40z"),
            vec![
                Token::Command('M'),
                Token::Number(10.0),
                Token::Number(20.0),
                Token::Command('L'),
                Token::Number(30.0),
                Token::Number(40.0),
                Token::Command('z'),
            ]
        );
    }

    #[test]
    fn test_packed_numbers() {
        // Signs and a second decimal point both start a new number
        assert_eq!(
            tokens("1.5-2.5.5"),
            vec![Token::Number(1.5), Token::Number(-2.5), Token::Number(0.5)]
        );
    }

    #[test]
    fn test_exponent() {
        assert_eq!(tokens("1e-2"), vec![Token::Number(0.01)]);
    }

    #[test]
    fn test_unknown_input_is_kept() {
        let lexed: Vec<(Token, Span)> = lex("L1 X!").collect();
        assert_eq!(lexed[0], (Token::Command('L'), 0..1));
        assert_eq!(lexed[1], (Token::Number(1.0), 1..2));
        assert!(lexed[2..].iter().all(|(t, _)| *t == Token::Error));
        assert_eq!(lexed[2].1.start, 3);
    }

    #[test]
    fn test_overflowing_number_is_an_error() {
        assert_eq!(tokens("1e99"), vec![Token::Error]);
        assert_eq!(tokens("-1e39"), vec![Token::Error]);
    }
}
