use serde::{Deserialize, Serialize};

/// 表单提供的十二星座
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HoroscopeSign {
    Aries,
    Taurus,
    Gemini,
    Cancer,
    Leo,
    Virgo,
    Libra,
    Scorpio,
    Sagittarius,
    Capricorn,
    Aquarius,
    Pisces,
}

impl HoroscopeSign {
    pub const MISSING_MESSAGE: &'static str = "Please select your horoscope sign";

    pub const ALL: [HoroscopeSign; 12] = [
        HoroscopeSign::Aries,
        HoroscopeSign::Taurus,
        HoroscopeSign::Gemini,
        HoroscopeSign::Cancer,
        HoroscopeSign::Leo,
        HoroscopeSign::Virgo,
        HoroscopeSign::Libra,
        HoroscopeSign::Scorpio,
        HoroscopeSign::Sagittarius,
        HoroscopeSign::Capricorn,
        HoroscopeSign::Aquarius,
        HoroscopeSign::Pisces,
    ];

    pub fn parse(s: String) -> Result<HoroscopeSign, String> {
        if s.is_empty() {
            return Err(Self::MISSING_MESSAGE.to_string());
        }
        Self::ALL
            .into_iter()
            .find(|sign| sign.as_str() == s)
            .ok_or_else(|| format!("{s} is not a recognised horoscope sign"))
    }

    /// 表单提交以及转发给 webhook 时使用的取值
    pub fn as_str(&self) -> &'static str {
        match self {
            HoroscopeSign::Aries => "aries",
            HoroscopeSign::Taurus => "taurus",
            HoroscopeSign::Gemini => "gemini",
            HoroscopeSign::Cancer => "cancer",
            HoroscopeSign::Leo => "leo",
            HoroscopeSign::Virgo => "virgo",
            HoroscopeSign::Libra => "libra",
            HoroscopeSign::Scorpio => "scorpio",
            HoroscopeSign::Sagittarius => "sagittarius",
            HoroscopeSign::Capricorn => "capricorn",
            HoroscopeSign::Aquarius => "aquarius",
            HoroscopeSign::Pisces => "pisces",
        }
    }

    /// 下拉框显示的文字，包含星座符号和日期范围
    pub fn label(&self) -> &'static str {
        match self {
            HoroscopeSign::Aries => "♈ Aries (March 21 - April 19)",
            HoroscopeSign::Taurus => "♉ Taurus (April 20 - May 20)",
            HoroscopeSign::Gemini => "♊ Gemini (May 21 - June 20)",
            HoroscopeSign::Cancer => "♋ Cancer (June 21 - July 22)",
            HoroscopeSign::Leo => "♌ Leo (July 23 - August 22)",
            HoroscopeSign::Virgo => "♍ Virgo (August 23 - September 22)",
            HoroscopeSign::Libra => "♎ Libra (September 23 - October 22)",
            HoroscopeSign::Scorpio => "♏ Scorpio (October 23 - November 21)",
            HoroscopeSign::Sagittarius => "♐ Sagittarius (November 22 - December 21)",
            HoroscopeSign::Capricorn => "♑ Capricorn (December 22 - January 19)",
            HoroscopeSign::Aquarius => "♒ Aquarius (January 20 - February 18)",
            HoroscopeSign::Pisces => "♓ Pisces (February 19 - March 20)",
        }
    }
}

impl std::fmt::Display for HoroscopeSign {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
