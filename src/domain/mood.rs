#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mood(String);

impl Mood {
    pub const MAX_LENGTH: usize = 500;
    pub const MISSING_MESSAGE: &'static str = "Please describe your current mood";
    pub const TOO_LONG_MESSAGE: &'static str = "Mood description is too long";

    pub fn parse(s: String) -> Result<Mood, String> {
        if s.is_empty() {
            return Err(Self::MISSING_MESSAGE.to_string());
        }
        if s.chars().count() > Self::MAX_LENGTH {
            return Err(Self::TOO_LONG_MESSAGE.to_string());
        }
        Ok(Self(s))
    }
}

impl AsRef<str> for Mood {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
