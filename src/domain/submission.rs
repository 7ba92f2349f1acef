use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::domain::{HoroscopeSign, Mood, SubmissionEmail};

/// 已保存的提交，创建后不再修改
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Submission {
    pub id: u64,
    pub email: SubmissionEmail,
    pub horoscope_sign: HoroscopeSign,
    pub mood: Mood,
    pub created_at: DateTime<Utc>,
}

impl Serialize for Submission {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        #[derive(Serialize)]
        #[serde(rename_all = "camelCase")]
        struct Wire<'a> {
            id: u64,
            email: &'a str,
            horoscope_sign: HoroscopeSign,
            mood: &'a str,
            created_at: DateTime<Utc>,
        }

        Wire {
            id: self.id,
            email: self.email.as_ref(),
            horoscope_sign: self.horoscope_sign,
            mood: self.mood.as_ref(),
            created_at: self.created_at,
        }
        .serialize(serializer)
    }
}
