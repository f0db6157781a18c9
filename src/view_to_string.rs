use crossterm::style::{style, Stylize};
use itertools::Itertools;
use voca_rs::Voca;

use map_core::*;

const INDENT: &str = "  ";
const MAX_WIDTH: usize = 80;

/// Transforms the provided view update into a string for display.
pub fn view_update_to_string(update: ViewUpdate) -> String {
    match update {
        ViewUpdate::Show {
            room,
            card,
            position,
        } => {
            let location =
                style(format!("[{room} @ {}]", position_to_string(&position))).dark_grey();
            format!("{location}\n{}", card_to_string(*card))
        }
        ViewUpdate::Move(position) => style(format!("[moved to {}]", position_to_string(&position)))
            .dark_grey()
            .to_string(),
        ViewUpdate::Hide => style("[hidden]").dark_grey().to_string(),
        ViewUpdate::Error(e) => e._capitalize(false),
    }
}

/// Transforms the provided tooltip position into a string for display.
fn position_to_string(position: &TooltipPosition) -> String {
    format!("{:.0}, {:.0}", position.left, position.top)
}

/// Transforms the provided room card into a string for display.
fn card_to_string(card: RoomCardDescription) -> String {
    let header = header_to_string(&card.header);
    let description = card
        .description
        .map(|desc| desc._word_wrap(MAX_WIDTH, "\n", ""));
    let thumbnail = card
        .thumbnail
        .map(|url| style(format!("Picture: {url}")).dark_grey().to_string());
    let features = features_to_string(&card.features);

    [Some(header), description, thumbnail, features]
        .into_iter()
        .flatten()
        .join("\n\n")
}

/// Transforms the provided room card header into a string for display.
fn header_to_string(header: &RoomCardHeader) -> String {
    let name = format!("{}: {}", header.building, header.name);
    match &header.nickname {
        Some(nickname) => format!("{}\n{name}", style(nickname).bold()),
        None => style(name).bold().to_string(),
    }
}

/// Transforms the provided feature list into a string for display.
fn features_to_string(features: &[FeatureDisplay]) -> Option<String> {
    if features.is_empty() {
        return None;
    }

    Some(
        features
            .iter()
            .map(|feature| format!("{INDENT}{} {}", icon_to_glyph(feature.icon), feature.text))
            .join("\n"),
    )
}

/// Finds the glyph to display for the provided icon.
fn icon_to_glyph(icon: IconToken) -> &'static str {
    match icon {
        IconToken::GraduationCap => "🎓",
        IconToken::Users => "👥",
        IconToken::Video => "📽",
        IconToken::Magic => "🪄",
        IconToken::Couch => "🛋",
        IconToken::Desktop => "🖥",
        IconToken::Plug => "🔌",
        IconToken::Flask => "⚗",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn build_card() -> RoomCardDescription {
        RoomCardDescription {
            header: RoomCardHeader {
                nickname: Some("The Fishbowl".to_string()),
                building: "Science Hall".to_string(),
                name: "101".to_string(),
            },
            description: Some("This room includes tall windows".to_string()),
            thumbnail: None,
            features: vec![FeatureDisplay {
                visible: true,
                icon: IconToken::Users,
                text: "Room for 40 people".to_string(),
            }],
        }
    }

    #[test]
    fn card_contents() {
        let output = card_to_string(build_card());

        assert!(output.contains("The Fishbowl"));
        assert!(output.contains("Science Hall: 101"));
        assert!(output.contains("This room includes tall windows"));
        assert!(output.contains("👥 Room for 40 people"));
        assert!(!output.contains("Picture"));
    }

    #[test]
    fn errors_are_capitalized() {
        assert_eq!(
            "There's no room called \"x\"",
            view_update_to_string(ViewUpdate::Error("there's no room called \"x\"".to_string()))
        );
    }
}
