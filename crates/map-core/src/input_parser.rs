use std::fmt::Display;

use nom::{
    branch::alt,
    bytes::complete::{tag, take_till1},
    character::complete::{space0, space1},
    combinator::{all_consuming, map, value, verify},
    number::complete::double,
    sequence::{preceded, terminated, tuple},
    IResult,
};

use crate::{
    geometry::{BoundingBox, TooltipSize},
    hover::HoverEvent,
};

/// An error parsing a line of hover input.
#[derive(Debug, PartialEq, Eq)]
pub enum InputParseError {
    /// The input was empty.
    Empty,
    /// The input didn't match any known command. The whole input is included.
    UnknownCommand(String),
}

impl Display for InputParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            InputParseError::Empty => write!(f, "no command given"),
            InputParseError::UnknownCommand(input) => write!(f, "unknown command: {input:?}"),
        }
    }
}

impl std::error::Error for InputParseError {}

/// Parses a line of input into a hover event.
///
/// The accepted commands are:
/// * `enter <room> <left> <top> <width> <height>`
/// * `leave`
/// * `tooltip-enter`
/// * `tooltip-leave`
/// * `resize <width> <height>`
pub fn parse_hover_event(input: &str) -> Result<HoverEvent, InputParseError> {
    let input = input.trim();
    if input.is_empty() {
        return Err(InputParseError::Empty);
    }

    all_consuming(hover_event)(input)
        .map(|(_, event)| event)
        .map_err(|_| InputParseError::UnknownCommand(input.to_string()))
}

fn hover_event(input: &str) -> IResult<&str, HoverEvent> {
    terminated(
        alt((
            enter_room,
            resize,
            value(HoverEvent::EnterTooltip, tag("tooltip-enter")),
            value(HoverEvent::LeaveTooltip, tag("tooltip-leave")),
            value(HoverEvent::LeaveRoom, tag("leave")),
        )),
        space0,
    )(input)
}

fn enter_room(input: &str) -> IResult<&str, HoverEvent> {
    map(
        preceded(
            tag("enter"),
            tuple((
                preceded(space1, take_till1(char::is_whitespace)),
                number,
                number,
                number,
                number,
            )),
        ),
        |(room, left, top, width, height): (&str, _, _, _, _)| HoverEvent::EnterRoom {
            room: room.to_string(),
            bounding_box: BoundingBox {
                left,
                top,
                width,
                height,
            },
        },
    )(input)
}

fn resize(input: &str) -> IResult<&str, HoverEvent> {
    map(
        preceded(tag("resize"), tuple((number, number))),
        |(width, height)| HoverEvent::TooltipResized(TooltipSize { width, height }),
    )(input)
}

/// A finite decimal number preceded by whitespace. `nan` and `inf` are rejected.
fn number(input: &str) -> IResult<&str, f64> {
    preceded(space1, verify(double, |n: &f64| n.is_finite()))(input)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn enter() {
        assert_eq!(
            Ok(HoverEvent::EnterRoom {
                room: "a101".to_string(),
                bounding_box: BoundingBox {
                    left: 10.0,
                    top: -20.5,
                    width: 30.0,
                    height: 40.25
                }
            }),
            parse_hover_event("enter a101 10 -20.5 30 40.25")
        );
    }

    #[test]
    fn enter_with_extra_whitespace() {
        assert!(matches!(
            parse_hover_event("  enter   a101\t1 2  3 4  \n"),
            Ok(HoverEvent::EnterRoom { .. })
        ));
    }

    #[test]
    fn simple_commands() {
        assert_eq!(Ok(HoverEvent::LeaveRoom), parse_hover_event("leave"));
        assert_eq!(
            Ok(HoverEvent::EnterTooltip),
            parse_hover_event("tooltip-enter")
        );
        assert_eq!(
            Ok(HoverEvent::LeaveTooltip),
            parse_hover_event("tooltip-leave")
        );
    }

    #[test]
    fn resize() {
        assert_eq!(
            Ok(HoverEvent::TooltipResized(TooltipSize {
                width: 650.0,
                height: 325.0
            })),
            parse_hover_event("resize 650 325")
        );
    }

    #[test]
    fn empty() {
        assert_eq!(Err(InputParseError::Empty), parse_hover_event("   "));
    }

    #[test]
    fn missing_numbers() {
        assert_eq!(
            Err(InputParseError::UnknownCommand("enter a101 1 2".to_string())),
            parse_hover_event("enter a101 1 2")
        );
    }

    #[test]
    fn trailing_garbage() {
        assert!(parse_hover_event("leave now").is_err());
        assert!(parse_hover_event("resize 1 2 3").is_err());
    }

    #[test]
    fn not_a_number() {
        assert!(parse_hover_event("resize wide tall").is_err());
    }

    #[test]
    fn non_finite_numbers() {
        assert_eq!(
            Err(InputParseError::UnknownCommand("enter a101 nan 1 2 3".to_string())),
            parse_hover_event("enter a101 nan 1 2 3")
        );
        assert!(parse_hover_event("enter a101 1 inf 2 3").is_err());
        assert!(parse_hover_event("resize 650 -infinity").is_err());
        assert!(parse_hover_event("resize NaN 325").is_err());
    }

    #[test]
    fn unknown() {
        assert_eq!(
            Err(InputParseError::UnknownCommand("jump".to_string())),
            parse_hover_event("jump")
        );
    }
}
