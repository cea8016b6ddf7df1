//! Position : directive d'insertion transmise par la couche requête

use serde::{Deserialize, Deserializer};

/// Position d'insertion demandée par la couche requête
///
/// La couche requête transmet soit les jetons littéraux `"start"`/`"end"`,
/// soit un index entier (nombre JSON ou chaîne numérique). Toute valeur non
/// reconnue retombe sur `End` : l'insertion en queue est la politique de
/// repli, pas une erreur.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Position {
    Start,
    #[default]
    End,
    At(i64),
}

impl Position {
    /// Parse une directive textuelle (`"start"`, `"end"` ou un entier)
    pub fn parse(directive: &str) -> Self {
        match directive.trim() {
            "start" => Position::Start,
            "end" => Position::End,
            other => other
                .parse::<i64>()
                .map(Position::At)
                .unwrap_or(Position::End),
        }
    }
}

/// Désérialiseur flexible : accepte chaîne ou nombre, repli sur `End`
impl<'de> Deserialize<'de> for Position {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        use serde_json::Value;

        let value = Value::deserialize(deserializer)?;
        Ok(match value {
            Value::String(s) => Position::parse(&s),
            Value::Number(n) => n.as_i64().map(Position::At).unwrap_or(Position::End),
            _ => Position::End,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_tokens() {
        assert_eq!(Position::parse("start"), Position::Start);
        assert_eq!(Position::parse("end"), Position::End);
        assert_eq!(Position::parse("2"), Position::At(2));
        assert_eq!(Position::parse("-1"), Position::At(-1));
    }

    #[test]
    fn test_parse_fallback_to_end() {
        assert_eq!(Position::parse("middle"), Position::End);
        assert_eq!(Position::parse(""), Position::End);
        assert_eq!(Position::parse("2.5"), Position::End);
    }

    #[test]
    fn test_deserialize_string_and_number() {
        assert_eq!(
            serde_json::from_str::<Position>(r#""start""#).unwrap(),
            Position::Start
        );
        assert_eq!(serde_json::from_str::<Position>("3").unwrap(), Position::At(3));
        assert_eq!(
            serde_json::from_str::<Position>(r#""4""#).unwrap(),
            Position::At(4)
        );
    }

    #[test]
    fn test_deserialize_fallback() {
        assert_eq!(
            serde_json::from_str::<Position>(r#""whatever""#).unwrap(),
            Position::End
        );
        assert_eq!(serde_json::from_str::<Position>("null").unwrap(), Position::End);
        assert_eq!(serde_json::from_str::<Position>("1.5").unwrap(), Position::End);
    }
}
