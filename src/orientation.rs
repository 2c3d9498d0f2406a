use std::fmt;
use std::str::FromStr;

use crate::error::OrientationError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VerticalAnchor {
    Top,
    Bottom,
    Middle,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HorizontalAnchor {
    Left,
    Right,
    Middle,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Edge {
    Leading,
    Trailing,
    Center,
}

impl VerticalAnchor {
    fn from_token(token: &str) -> Option<Self> {
        match token {
            "top" | "t" => Some(Self::Top),
            "bottom" | "b" => Some(Self::Bottom),
            "middle" | "m" => Some(Self::Middle),
            _ => None,
        }
    }

    pub fn edge(self) -> Edge {
        match self {
            Self::Top => Edge::Leading,
            Self::Bottom => Edge::Trailing,
            Self::Middle => Edge::Center,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Top => "top",
            Self::Bottom => "bottom",
            Self::Middle => "middle",
        }
    }
}

impl HorizontalAnchor {
    fn from_token(token: &str) -> Option<Self> {
        match token {
            "left" | "l" => Some(Self::Left),
            "right" | "r" => Some(Self::Right),
            "middle" | "m" => Some(Self::Middle),
            _ => None,
        }
    }

    pub fn edge(self) -> Edge {
        match self {
            Self::Left => Edge::Leading,
            Self::Right => Edge::Trailing,
            Self::Middle => Edge::Center,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Left => "left",
            Self::Right => "right",
            Self::Middle => "middle",
        }
    }
}

/// Resolved orientation: one anchor per axis plus whether the label is
/// rotated 90 degrees before it is measured and composited.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct OrientationSpec {
    pub vertical: VerticalAnchor,
    pub horizontal: HorizontalAnchor,
    pub rotated: bool,
}

impl OrientationSpec {
    pub fn parse(value: &str) -> Result<Self, OrientationError> {
        let tokens: Vec<&str> = value.split('-').collect();
        let [vertical, horizontal, direction] = tokens.as_slice() else {
            return Err(OrientationError::TokenCount {
                value: value.to_string(),
            });
        };

        let vertical =
            VerticalAnchor::from_token(vertical).ok_or_else(|| OrientationError::Vertical {
                token: vertical.to_string(),
                value: value.to_string(),
            })?;
        let horizontal = HorizontalAnchor::from_token(horizontal).ok_or_else(|| {
            OrientationError::Horizontal {
                token: horizontal.to_string(),
                value: value.to_string(),
            }
        })?;
        let rotated = match *direction {
            "horizontal" | "h" => false,
            "vertical" | "v" => true,
            other => {
                return Err(OrientationError::Direction {
                    token: other.to_string(),
                    value: value.to_string(),
                });
            }
        };

        Ok(Self {
            vertical,
            horizontal,
            rotated,
        })
    }
}

impl Default for OrientationSpec {
    fn default() -> Self {
        Self {
            vertical: VerticalAnchor::Top,
            horizontal: HorizontalAnchor::Left,
            rotated: false,
        }
    }
}

impl FromStr for OrientationSpec {
    type Err = OrientationError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::parse(value)
    }
}

impl fmt::Display for OrientationSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let direction = if self.rotated { "vertical" } else { "horizontal" };
        write!(
            f,
            "{}-{}-{}",
            self.vertical.as_str(),
            self.horizontal.as_str(),
            direction
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const VERTICAL: [&str; 6] = ["top", "t", "bottom", "b", "middle", "m"];
    const HORIZONTAL: [&str; 6] = ["left", "l", "right", "r", "middle", "m"];
    const DIRECTION: [&str; 4] = ["horizontal", "h", "vertical", "v"];

    #[test]
    fn every_long_and_short_combination_resolves() {
        for v in VERTICAL {
            for h in HORIZONTAL {
                for d in DIRECTION {
                    let token = format!("{v}-{h}-{d}");
                    let spec = OrientationSpec::parse(&token)
                        .unwrap_or_else(|err| panic!("{token}: {err}"));
                    assert_eq!(spec.rotated, d.starts_with('v'), "{token}");
                    assert_eq!(spec.vertical.as_str().as_bytes()[0], v.as_bytes()[0]);
                    assert_eq!(spec.horizontal.as_str().as_bytes()[0], h.as_bytes()[0]);
                }
            }
        }
    }

    #[test]
    fn short_and_long_forms_are_equivalent() {
        assert_eq!(
            OrientationSpec::parse("b-r-v").unwrap(),
            OrientationSpec::parse("bottom-right-vertical").unwrap()
        );
        assert_eq!(
            "t-m-h".parse::<OrientationSpec>().unwrap(),
            OrientationSpec {
                vertical: VerticalAnchor::Top,
                horizontal: HorizontalAnchor::Middle,
                rotated: false,
            }
        );
    }

    #[test]
    fn default_matches_default_token() {
        assert_eq!(
            OrientationSpec::parse("top-left-horizontal").unwrap(),
            OrientationSpec::default()
        );
        assert_eq!(OrientationSpec::default().to_string(), "top-left-horizontal");
    }

    #[test]
    fn unknown_tokens_name_the_offender() {
        let err = OrientationSpec::parse("up-left-h").unwrap_err();
        assert!(matches!(err, OrientationError::Vertical { ref token, .. } if token == "up"));
        assert!(err.to_string().contains("'up'"));

        let err = OrientationSpec::parse("top-center-h").unwrap_err();
        assert!(matches!(err, OrientationError::Horizontal { ref token, .. } if token == "center"));

        let err = OrientationSpec::parse("top-left-diagonal").unwrap_err();
        assert!(matches!(err, OrientationError::Direction { ref token, .. } if token == "diagonal"));

        let err = OrientationSpec::parse("top-left-").unwrap_err();
        assert!(matches!(err, OrientationError::Direction { ref token, .. } if token.is_empty()));
    }

    #[test]
    fn wrong_token_count_is_rejected() {
        for value in ["top-horizontal", "top", "", "top-left-horizontal-extra"] {
            assert!(
                matches!(
                    OrientationSpec::parse(value),
                    Err(OrientationError::TokenCount { .. })
                ),
                "{value}"
            );
        }
    }

    #[test]
    fn tokens_are_case_sensitive() {
        assert!(OrientationSpec::parse("Top-Left-Horizontal").is_err());
    }
}
