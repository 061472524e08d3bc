//! Path data parser using chumsky

use chumsky::input::{Stream, ValueInput};
use chumsky::prelude::*;

use crate::vector::lexer::Token;
use crate::vector::model::{ArcParams, PathCommand, Point};

/// Number of arguments consumed by one repetition of a command letter
fn arity(letter: char) -> Option<usize> {
    match letter.to_ascii_uppercase() {
        'Z' => Some(0),
        'H' | 'V' => Some(1),
        'M' | 'L' | 'T' => Some(2),
        'S' | 'Q' => Some(4),
        'C' => Some(6),
        'A' => Some(7),
        _ => None,
    }
}

/// Expand one command letter and its flat argument list into drawing commands
///
/// Repeated argument groups repeat the command, except after a moveto where
/// they become implicit linetos.
fn expand(letter: char, args: &[f32]) -> Result<Vec<PathCommand>, String> {
    let arity = arity(letter).ok_or_else(|| format!("unknown path command '{}'", letter))?;
    if arity == 0 {
        if !args.is_empty() {
            return Err(format!("'{}' takes no arguments", letter));
        }
        return Ok(vec![PathCommand::Close]);
    }
    if args.is_empty() || args.len() % arity != 0 {
        return Err(format!(
            "'{}' expects a multiple of {} numbers, found {}",
            letter,
            arity,
            args.len()
        ));
    }

    let relative = letter.is_ascii_lowercase();
    let commands = args
        .chunks(arity)
        .enumerate()
        .map(|(i, a)| {
            let p = |x: usize| Point::new(a[x], a[x + 1]);
            match (letter.to_ascii_uppercase(), relative) {
                ('M', false) if i == 0 => PathCommand::MoveTo(p(0)),
                ('M', true) if i == 0 => PathCommand::RelativeMoveTo(p(0)),
                ('M', false) | ('L', false) => PathCommand::LineTo(p(0)),
                ('M', true) | ('L', true) => PathCommand::RelativeLineTo(p(0)),
                ('H', false) => PathCommand::HorizontalTo(a[0]),
                ('H', true) => PathCommand::RelativeHorizontalTo(a[0]),
                ('V', false) => PathCommand::VerticalTo(a[0]),
                ('V', true) => PathCommand::RelativeVerticalTo(a[0]),
                ('C', false) => PathCommand::CurveTo(p(0), p(2), p(4)),
                ('C', true) => PathCommand::RelativeCurveTo(p(0), p(2), p(4)),
                ('S', false) => PathCommand::ReflectiveCurveTo(p(0), p(2)),
                ('S', true) => PathCommand::RelativeReflectiveCurveTo(p(0), p(2)),
                ('Q', false) => PathCommand::QuadTo(p(0), p(2)),
                ('Q', true) => PathCommand::RelativeQuadTo(p(0), p(2)),
                ('T', false) => PathCommand::ReflectiveQuadTo(p(0)),
                ('T', true) => PathCommand::RelativeReflectiveQuadTo(p(0)),
                (_, relative) => {
                    let arc = ArcParams {
                        radius_x: a[0],
                        radius_y: a[1],
                        rotation: a[2],
                        large_arc: a[3] != 0.0,
                        sweep: a[4] != 0.0,
                        end: p(5),
                    };
                    if relative {
                        PathCommand::RelativeArcTo(arc)
                    } else {
                        PathCommand::ArcTo(arc)
                    }
                }
            }
        })
        .collect();
    Ok(commands)
}

/// Parse SVG path data into drawing commands
pub fn parse_path_data(input: &str) -> Result<Vec<PathCommand>, Vec<crate::PathDataError>> {
    let len = input.len();

    let token_iter = crate::vector::lexer::lex(input).map(|(tok, span)| (tok, span.into()));

    let token_stream = Stream::from_iter(token_iter)
        // Split (Token, SimpleSpan) into token and span parts
        .map((len..len).into(), |(t, s): (_, _)| (t, s));

    path_data_parser()
        .parse(token_stream)
        .into_result()
        .map_err(|errs| errs.into_iter().map(|e| e.into()).collect())
}

fn path_data_parser<'a, I>() -> impl Parser<'a, I, Vec<PathCommand>, extra::Err<Rich<'a, Token>>> + Clone
where
    I: ValueInput<'a, Token = Token, Span = SimpleSpan>,
{
    let number = select! {
        Token::Number(n) => n,
    };

    let letter = select! {
        Token::Command(c) => c,
    };

    letter
        .then(number.repeated().collect::<Vec<_>>())
        .try_map(|(letter, args), span| {
            expand(letter, &args).map_err(|message| Rich::custom(span, message))
        })
        .repeated()
        .collect::<Vec<_>>()
        .then_ignore(end())
        .map(|segments: Vec<Vec<PathCommand>>| segments.into_iter().flatten().collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_square() {
        let commands = parse_path_data("M2 2h12v12H2z").expect("Should parse");
        assert_eq!(
            commands,
            vec![
                PathCommand::MoveTo(Point::new(2.0, 2.0)),
                PathCommand::RelativeHorizontalTo(12.0),
                PathCommand::RelativeVerticalTo(12.0),
                PathCommand::HorizontalTo(2.0),
                PathCommand::Close,
            ]
        );
    }

    #[test]
    fn test_implicit_lineto_after_moveto() {
        let commands = parse_path_data("m1 1 2 2 3 3").expect("Should parse");
        assert_eq!(
            commands,
            vec![
                PathCommand::RelativeMoveTo(Point::new(1.0, 1.0)),
                PathCommand::RelativeLineTo(Point::new(2.0, 2.0)),
                PathCommand::RelativeLineTo(Point::new(3.0, 3.0)),
            ]
        );
    }

    #[test]
    fn test_repeated_curve() {
        let commands = parse_path_data("C0 0 1 1 2 2 3 3 4 4 5 5").expect("Should parse");
        assert_eq!(commands.len(), 2);
        assert!(matches!(commands[1], PathCommand::CurveTo(..)));
    }

    #[test]
    fn test_arc_flags() {
        let commands = parse_path_data("M0 0a5 5 0 1 0 10 0").expect("Should parse");
        match &commands[1] {
            PathCommand::RelativeArcTo(arc) => {
                assert!(arc.large_arc);
                assert!(!arc.sweep);
                assert_eq!(arc.end, Point::new(10.0, 0.0));
            }
            other => panic!("Expected RelativeArcTo, got {:?}", other),
        }
    }

    #[test]
    fn test_empty_path_data() {
        assert_eq!(parse_path_data("").expect("Should parse"), vec![]);
    }

    #[test]
    fn test_wrong_argument_count() {
        let errors = parse_path_data("M0 0 L1").unwrap_err();
        assert!(!errors.is_empty());
    }

    #[test]
    fn test_expand_reports_arity() {
        let message = expand('L', &[1.0]).unwrap_err();
        assert!(message.contains("multiple of 2"));
        assert!(expand('Z', &[1.0]).is_err());
    }

    #[test]
    fn test_arguments_before_command() {
        assert!(parse_path_data("1 2 M0 0").is_err());
    }

    #[test]
    fn test_unknown_letter_is_rejected() {
        let errors = parse_path_data("M0 0 L1 1 X!! 2 2").unwrap_err();
        assert_eq!(errors[0].span().start, 10);
        assert!(errors[0].to_string().contains("unreadable input"));
    }

    #[test]
    fn test_out_of_range_number_is_rejected() {
        assert!(parse_path_data("M0 0 L1e99 0").is_err());
        assert!(parse_path_data("M0 0 L1 1 2 3.5e40").is_err());
    }
}
