use validator::ValidateEmail;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmissionEmail(String);

impl SubmissionEmail {
    pub const INVALID_MESSAGE: &'static str = "Please enter a valid email address";

    pub fn parse(s: String) -> Result<SubmissionEmail, String> {
        if s.validate_email() && has_top_level_domain(&s) {
            Ok(Self(s))
        } else {
            Err(Self::INVALID_MESSAGE.to_string())
        }
    }
}

/// `validator` 允许 `a@b` 这种没有顶级域名的地址，表单不允许：域名最后一段至少两个字母
fn has_top_level_domain(s: &str) -> bool {
    s.rsplit_once('@')
        .and_then(|(_, domain)| domain.rsplit_once('.'))
        .is_some_and(|(_, tld)| tld.len() >= 2 && tld.chars().all(|c| c.is_ascii_alphabetic()))
}

impl AsRef<str> for SubmissionEmail {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for SubmissionEmail {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}
