use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum LogLevel {
    Debug,
    Info,
    Warn,
    Error,
}

/// Source album selector: a numeric album id or one of VK's reserved
/// service albums.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Album {
    Profile,
    Wall,
    Saved,
    Id(i64),
}

impl Album {
    /// The `album_id` value sent to the VK API.
    pub fn as_api_value(&self) -> String {
        match self {
            Album::Profile => "profile".to_string(),
            Album::Wall => "wall".to_string(),
            Album::Saved => "saved".to_string(),
            Album::Id(id) => id.to_string(),
        }
    }
}

impl FromStr for Album {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "profile" => Ok(Album::Profile),
            "wall" => Ok(Album::Wall),
            "saved" => Ok(Album::Saved),
            other => other.parse::<i64>().map(Album::Id).map_err(|_| {
                format!(
                    "'{other}' is not an album: expected profile, wall, saved, \
                     or a numeric album id"
                )
            }),
        }
    }
}

impl fmt::Display for Album {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_api_value())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_album_reserved_tokens() {
        assert_eq!("profile".parse::<Album>().unwrap(), Album::Profile);
        assert_eq!("wall".parse::<Album>().unwrap(), Album::Wall);
        assert_eq!("saved".parse::<Album>().unwrap(), Album::Saved);
    }

    #[test]
    fn test_album_numeric() {
        assert_eq!("271843921".parse::<Album>().unwrap(), Album::Id(271843921));
        assert_eq!("-12".parse::<Album>().unwrap(), Album::Id(-12));
    }

    #[test]
    fn test_album_invalid() {
        assert!("holiday pics".parse::<Album>().is_err());
        assert!("".parse::<Album>().is_err());
    }

    #[test]
    fn test_album_api_value_round_trip() {
        for raw in ["profile", "wall", "saved", "42"] {
            let album: Album = raw.parse().unwrap();
            assert_eq!(album.as_api_value(), raw);
        }
    }
}
