use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::domain::{HoroscopeSign, Mood, SubmissionEmail};

/// 表单发出的原始数据，客户端用它构造请求体
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionFormData {
    pub email: Option<String>,
    pub horoscope_sign: Option<String>,
    pub mood: Option<String>,
}

pub struct NewSubmission {
    pub email: SubmissionEmail,
    pub horoscope_sign: HoroscopeSign,
    pub mood: Mood,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, thiserror::Error)]
#[error("{} field(s) failed validation", .0.len())]
pub struct ValidationErrors(Vec<FieldError>);

impl ValidationErrors {
    pub const REQUIRED_MESSAGE: &'static str = "Required";
    pub const EXPECTED_STRING_MESSAGE: &'static str = "Expected string";
    pub const EXPECTED_OBJECT_MESSAGE: &'static str = "Expected object";

    pub fn push(&mut self, field: &str, message: impl Into<String>) {
        self.0.push(FieldError {
            field: field.to_string(),
            message: message.into(),
        });
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn errors(&self) -> &[FieldError] {
        &self.0
    }

    pub fn field(&self, name: &str) -> Option<&FieldError> {
        self.0.iter().find(|e| e.field == name)
    }
}

impl From<Vec<FieldError>> for ValidationErrors {
    fn from(errors: Vec<FieldError>) -> Self {
        Self(errors)
    }
}

/// 单个字段在请求体里的样子：缺失（或 null）、字符串、其他 JSON 类型
enum RawField {
    Missing,
    Text(String),
    WrongType,
}

impl From<Option<String>> for RawField {
    fn from(value: Option<String>) -> Self {
        value.map_or(RawField::Missing, RawField::Text)
    }
}

impl From<Option<&Value>> for RawField {
    fn from(value: Option<&Value>) -> Self {
        match value {
            None | Some(Value::Null) => RawField::Missing,
            Some(Value::String(s)) => RawField::Text(s.clone()),
            Some(_) => RawField::WrongType,
        }
    }
}

fn check<T>(
    errors: &mut ValidationErrors,
    field: &str,
    value: RawField,
    parse: impl FnOnce(String) -> Result<T, String>,
) -> Option<T> {
    let value = match value {
        RawField::Text(value) => value,
        RawField::Missing => {
            errors.push(field, ValidationErrors::REQUIRED_MESSAGE);
            return None;
        }
        RawField::WrongType => {
            errors.push(field, ValidationErrors::EXPECTED_STRING_MESSAGE);
            return None;
        }
    };
    parse(value).map_err(|message| errors.push(field, message)).ok()
}

fn validate(email: RawField, sign: RawField, mood: RawField) -> Result<NewSubmission, ValidationErrors> {
    let mut errors = ValidationErrors::default();
    let email = check(&mut errors, "email", email, SubmissionEmail::parse);
    let horoscope_sign = check(&mut errors, "horoscopeSign", sign, HoroscopeSign::parse);
    let mood = check(&mut errors, "mood", mood, Mood::parse);

    match (email, horoscope_sign, mood) {
        (Some(email), Some(horoscope_sign), Some(mood)) => Ok(NewSubmission {
            email,
            horoscope_sign,
            mood,
        }),
        _ => Err(errors),
    }
}

impl TryFrom<SubmissionFormData> for NewSubmission {
    type Error = ValidationErrors;

    fn try_from(value: SubmissionFormData) -> Result<Self, Self::Error> {
        validate(value.email.into(), value.horoscope_sign.into(), value.mood.into())
    }
}

/// 服务端直接校验 JSON 请求体，字段类型不对时也能指出是哪个字段
impl TryFrom<Value> for NewSubmission {
    type Error = ValidationErrors;

    fn try_from(body: Value) -> Result<Self, Self::Error> {
        let Value::Object(body) = body else {
            let mut errors = ValidationErrors::default();
            errors.push("body", ValidationErrors::EXPECTED_OBJECT_MESSAGE);
            return Err(errors);
        };
        validate(
            body.get("email").into(),
            body.get("horoscopeSign").into(),
            body.get("mood").into(),
        )
    }
}
