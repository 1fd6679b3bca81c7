//! Input type tags.
//!
//! An [`InputType`] names the semantic category of a field and selects the
//! control renderer for it. The core set is closed; applications add their
//! own tags with [`InputType::custom`] and bind a renderer in a registry layer.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

const RESERVED_NAMES: [&str; 3] = ["required", "optional", "error"];

/// The semantic input category of a field.
///
/// Tags display and parse as snake_case names:
///
/// ```rust
/// use semform::InputType;
///
/// assert_eq!(InputType::CheckBoxes.to_string(), "check_boxes");
/// assert_eq!("time_zone".parse::<InputType>().unwrap(), InputType::TimeZone);
/// assert_eq!("colour".parse::<InputType>().unwrap(), InputType::custom("colour").unwrap());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum InputType {
    String,
    Password,
    Text,
    Numeric,
    Email,
    Url,
    Phone,
    Search,
    Select,
    Radio,
    CheckBoxes,
    Boolean,
    Date,
    DateTime,
    Time,
    TimeZone,
    Country,
    Hidden,
    /// An application-defined tag, built with [`InputType::custom`].
    Custom(CustomType),
}

/// Name of an application-defined input type.
///
/// Only [`InputType::custom`] and parsing create one, so the name is always
/// a lowercase identifier that is neither a core tag nor a state class.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CustomType(String);

impl CustomType {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CustomType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl InputType {
    /// Every built-in tag, in declaration order.
    pub const CORE: [InputType; 18] = [
        InputType::String,
        InputType::Password,
        InputType::Text,
        InputType::Numeric,
        InputType::Email,
        InputType::Url,
        InputType::Phone,
        InputType::Search,
        InputType::Select,
        InputType::Radio,
        InputType::CheckBoxes,
        InputType::Boolean,
        InputType::Date,
        InputType::DateTime,
        InputType::Time,
        InputType::TimeZone,
        InputType::Country,
        InputType::Hidden,
    ];

    /// Returns the snake_case name of the tag.
    pub fn as_str(&self) -> &str {
        match self {
            InputType::String => "string",
            InputType::Password => "password",
            InputType::Text => "text",
            InputType::Numeric => "numeric",
            InputType::Email => "email",
            InputType::Url => "url",
            InputType::Phone => "phone",
            InputType::Search => "search",
            InputType::Select => "select",
            InputType::Radio => "radio",
            InputType::CheckBoxes => "check_boxes",
            InputType::Boolean => "boolean",
            InputType::Date => "date",
            InputType::DateTime => "datetime",
            InputType::Time => "time",
            InputType::TimeZone => "time_zone",
            InputType::Country => "country",
            InputType::Hidden => "hidden",
            InputType::Custom(name) => name.as_str(),
        }
    }

    /// Creates an application-defined tag.
    ///
    /// The name becomes a CSS class on the wrapper, so it must be a
    /// lowercase identifier (`[a-z][a-z0-9_]*`). Core tag names and the
    /// state classes (`required`, `optional`, `error`) are rejected.
    ///
    /// ```rust
    /// use semform::InputType;
    ///
    /// assert!(InputType::custom("colour").unwrap().is_custom());
    /// assert!(InputType::custom("hidden").is_err());
    /// assert!(InputType::custom("required").is_err());
    /// ```
    pub fn custom(name: impl Into<String>) -> Result<Self, String> {
        let name = name.into();
        if InputType::CORE.iter().any(|t| t.as_str() == name) {
            return Err(format!("{:?} is a core input type", name));
        }
        let mut chars = name.chars();
        let valid = matches!(chars.next(), Some(c) if c.is_ascii_lowercase())
            && chars.all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_');
        if !valid || RESERVED_NAMES.contains(&name.as_str()) {
            return Err(format!("invalid input type name: {:?}", name));
        }
        Ok(InputType::Custom(CustomType(name)))
    }

    /// Returns `true` for application-defined tags.
    pub fn is_custom(&self) -> bool {
        matches!(self, InputType::Custom(_))
    }
}

impl fmt::Display for InputType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for InputType {
    type Err = String;

    /// Parses a tag name. Names outside the core set go through
    /// [`InputType::custom`].
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match InputType::CORE.iter().find(|t| t.as_str() == s) {
            Some(core) => Ok(core.clone()),
            None => InputType::custom(s),
        }
    }
}

impl TryFrom<String> for InputType {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<InputType> for String {
    fn from(value: InputType) -> Self {
        value.as_str().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_core_names_round_trip() {
        for tag in InputType::CORE.iter() {
            assert_eq!(&tag.as_str().parse::<InputType>().unwrap(), tag);
        }
    }

    #[test]
    fn test_core_name_never_becomes_custom() {
        assert_eq!("string".parse::<InputType>().unwrap(), InputType::String);
        assert!(!InputType::String.is_custom());
    }

    #[test]
    fn test_invalid_custom_names() {
        assert!("".parse::<InputType>().is_err());
        assert!("Colour".parse::<InputType>().is_err());
        assert!("colour picker".parse::<InputType>().is_err());
        assert!("9lives".parse::<InputType>().is_err());
        assert!("required".parse::<InputType>().is_err());
    }

    #[test]
    fn test_deserialize_from_yaml() {
        let tags: Vec<InputType> = serde_yaml::from_str("[datetime, colour]").unwrap();
        assert_eq!(
            tags,
            vec![InputType::DateTime, InputType::custom("colour").unwrap()]
        );
    }

    #[test]
    fn test_custom_rejects_core_and_state_names() {
        for name in ["hidden", "string", "required", "optional", "error", "Big", ""] {
            assert!(InputType::custom(name).is_err(), "{name} accepted");
        }
        assert_eq!(InputType::custom("star_rating").unwrap().as_str(), "star_rating");
    }
}
