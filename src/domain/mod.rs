mod horoscope_sign;
mod mood;
mod new_submission;
mod submission;
mod submission_email;

pub use horoscope_sign::HoroscopeSign;
pub use mood::Mood;
pub use new_submission::{FieldError, NewSubmission, SubmissionFormData, ValidationErrors};
pub use submission::Submission;
pub use submission_email::SubmissionEmail;
