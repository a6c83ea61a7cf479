use std::borrow::Cow;
use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError, ValidationErrors};

use crate::models::PostId;

/// First validation message per offending field, keyed by field name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, thiserror::Error)]
#[serde(transparent)]
#[error("{} field(s) failed validation", .0.len())]
pub struct FormErrors(BTreeMap<String, String>);

impl FormErrors {
    pub fn get(&self, field: &str) -> Option<&str> {
        self.0.get(field).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn insert(&mut self, field: &str, message: impl Into<String>) {
        self.0.insert(field.to_string(), message.into());
    }

    fn into_result(self) -> Result<(), FormErrors> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(self)
        }
    }
}

impl From<ValidationErrors> for FormErrors {
    fn from(errors: ValidationErrors) -> Self {
        let mut out = FormErrors::default();
        for (field, errs) in errors.field_errors() {
            if let Some(first) = errs.first() {
                let message = first
                    .message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| first.code.to_string());
                out.insert(&field, message);
            }
        }
        out
    }
}

fn run_rules(form: &impl Validate) -> FormErrors {
    match form.validate() {
        Ok(()) => FormErrors::default(),
        Err(e) => e.into(),
    }
}

fn error_with_message(code: &'static str, message: &'static str) -> ValidationError {
    let mut err = ValidationError::new(code);
    err.message = Some(Cow::Borrowed(message));
    err
}

pub fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(error_with_message("blank", "Comment cannot be empty."));
    }
    Ok(())
}

pub fn valid_post_id(value: &str) -> Result<(), ValidationError> {
    PostId::new(value)
        .map(|_| ())
        .map_err(|_| error_with_message("post_id", "A valid post is required."))
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CommentForm {
    #[validate(custom(function = "not_blank"))]
    pub body: String,
    #[validate(custom(function = "valid_post_id"))]
    pub post_id: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidComment {
    pub post_id: PostId,
    pub body: String,
}

impl CommentForm {
    pub fn parse(&self) -> Result<ValidComment, FormErrors> {
        run_rules(self).into_result()?;
        Ok(ValidComment {
            post_id: PostId::new_unchecked(self.post_id.clone()),
            body: self.body.clone(),
        })
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct LoginForm {
    #[validate(email(message = "Invalid Email!"))]
    pub email: String,
    #[validate(length(min = 8, max = 30, message = "Password must be at least 8 characters."))]
    pub password: String,
}

impl LoginForm {
    pub fn check(&self) -> Result<(), FormErrors> {
        run_rules(self).into_result()
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct SignUpForm {
    #[validate(length(min = 3, max = 30, message = "Name Is Required"))]
    pub name: String,
    #[validate(email(message = "Invalid Email!"))]
    pub email: String,
    #[validate(length(min = 8, max = 30, message = "Password must be at least 8 characters."))]
    pub password: String,
    pub confirm_password: String,
}

impl SignUpForm {
    /// Field rules plus the cross-field check: a mismatch is always
    /// reported on `confirm_password`, whatever else failed.
    pub fn check(&self) -> Result<(), FormErrors> {
        let mut errors = run_rules(self);
        if self.password != self.confirm_password {
            errors.insert("confirm_password", "Passwords do not match.");
        }
        errors.into_result()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn comment(body: &str, post_id: &str) -> CommentForm {
        CommentForm {
            body: body.into(),
            post_id: post_id.into(),
        }
    }

    #[test]
    fn comment_requires_body_and_post() {
        let errs = comment("", "p1").parse().unwrap_err();
        assert!(errs.get("body").is_some());

        let errs = comment("   \n", "p1").parse().unwrap_err();
        assert!(errs.get("body").is_some());

        let errs = comment("hi", "").parse().unwrap_err();
        assert!(errs.get("post_id").is_some());
        assert!(errs.get("body").is_none());
    }

    #[test]
    fn comment_parse_keeps_text_verbatim() {
        let ok = comment("Great post!", "p1").parse().unwrap();
        assert_eq!(ok.post_id.as_str(), "p1");
        assert_eq!(ok.body, "Great post!");
    }

    #[test]
    fn comment_form_reads_camel_case_json() {
        let form: CommentForm =
            serde_json::from_str(r#"{"postId":"p1","body":"Great post!"}"#).unwrap();
        assert_eq!(form, comment("Great post!", "p1"));
    }

    #[test]
    fn login_rules() {
        let form = LoginForm {
            email: "not-an-email".into(),
            password: "short".into(),
        };
        let errs = form.check().unwrap_err();
        assert_eq!(errs.get("email"), Some("Invalid Email!"));
        assert_eq!(
            errs.get("password"),
            Some("Password must be at least 8 characters.")
        );

        let form = LoginForm {
            email: "john@doe.com".into(),
            password: "hunter2hunter2".into(),
        };
        assert!(form.check().is_ok());
    }

    fn sign_up(password: &str, confirm: &str) -> SignUpForm {
        SignUpForm {
            name: "John Doe".into(),
            email: "john@doe.com".into(),
            password: password.into(),
            confirm_password: confirm.into(),
        }
    }

    #[test]
    fn sign_up_mismatch_lands_on_confirm_field() {
        let errs = sign_up("password123", "password124").check().unwrap_err();
        assert_eq!(errs.get("confirm_password"), Some("Passwords do not match."));
        assert!(errs.get("password").is_none());
    }

    #[test]
    fn sign_up_mismatch_reported_even_with_other_errors() {
        let mut form = sign_up("short", "other");
        form.name = "Jo".into();
        let errs = form.check().unwrap_err();
        assert_eq!(errs.get("name"), Some("Name Is Required"));
        assert!(errs.get("password").is_some());
        assert_eq!(errs.get("confirm_password"), Some("Passwords do not match."));
    }

    #[test]
    fn sign_up_accepts_matching_passwords() {
        assert!(sign_up("password123", "password123").check().is_ok());
    }
}
