//! Form validation
//!
//! Forms are validated client-side with `validator`; a failing form never
//! reaches the network. Messages are keyed by field name so the UI can put
//! each one under its input.

use serde::Serialize;
use shared::models::{
    AccountUpsert, AdminCreate, AdminUpdate, ChangePasswordRequest, CompanyUpsert,
    ForgotPasswordRequest, LoginRequest, ProfileUpdate, RecordStatus, ResetPasswordRequest,
    RoleCreate, RoleUpdate, UserCreate, UserUpdate,
};
use std::borrow::Cow;
use std::collections::BTreeMap;
use std::fmt;
use validator::{Validate, ValidationError, ValidationErrors};

/// First message per failing field
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrors(BTreeMap<String, String>);

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.0.entry(field.into()).or_insert_with(|| message.into());
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.0.get(field).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Message of the first field in name order
    pub fn first_message(&self) -> Option<&str> {
        self.0.values().next().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// `Ok(())` when nothing was recorded
    pub fn into_result(self) -> Result<(), FieldErrors> {
        if self.is_empty() { Ok(()) } else { Err(self) }
    }
}

impl fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let joined: Vec<String> = self.iter().map(|(k, v)| format!("{}: {}", k, v)).collect();
        f.write_str(&joined.join(", "))
    }
}

impl From<ValidationErrors> for FieldErrors {
    fn from(errors: ValidationErrors) -> Self {
        let mut out = FieldErrors::new();
        for (field, list) in errors.field_errors() {
            if let Some(first) = list.first() {
                let message = first
                    .message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| format!("Invalid {}", field));
                out.insert(field.to_string(), message);
            }
        }
        out
    }
}

/// Run `validator` rules and collect per-field messages
pub fn validate_form(form: &(impl Validate + ?Sized)) -> Result<(), FieldErrors> {
    form.validate().map_err(FieldErrors::from)
}

/// A form that turns into a request payload once it validates
pub trait Form: Validate {
    type Payload: Serialize;

    /// Build the payload; only meaningful after validation passed
    fn payload(&self) -> Self::Payload;

    fn submit(&self) -> Result<Self::Payload, FieldErrors> {
        validate_form(self)?;
        Ok(self.payload())
    }
}

pub(crate) fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("blank").with_message(Cow::Borrowed("This field is required")));
    }
    Ok(())
}

fn optional(value: &Option<String>) -> Option<String> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

#[derive(Debug, Clone, Default, Validate)]
pub struct LoginForm {
    #[validate(email(message = "Please enter a valid email address"))]
    pub email: String,
    #[validate(custom(function = "not_blank", message = "Please enter your password"))]
    pub password: String,
}

impl Form for LoginForm {
    type Payload = LoginRequest;

    fn payload(&self) -> LoginRequest {
        LoginRequest {
            email: self.email.trim().to_string(),
            password: self.password.clone(),
        }
    }
}

#[derive(Debug, Clone, Default, Validate)]
pub struct ForgotPasswordForm {
    #[validate(email(message = "Please enter a valid email address"))]
    pub email: String,
}

impl Form for ForgotPasswordForm {
    type Payload = ForgotPasswordRequest;

    fn payload(&self) -> ForgotPasswordRequest {
        ForgotPasswordRequest {
            email: self.email.trim().to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, Validate)]
pub struct ResetPasswordForm {
    #[validate(custom(function = "not_blank", message = "Reset link is invalid"))]
    pub token: String,
    #[validate(length(min = 8, message = "Password must be at least 8 characters"))]
    pub password: String,
    #[validate(must_match(other = "password", message = "Passwords do not match"))]
    pub confirm_password: String,
}

impl Form for ResetPasswordForm {
    type Payload = ResetPasswordRequest;

    fn payload(&self) -> ResetPasswordRequest {
        ResetPasswordRequest {
            token: self.token.clone(),
            password: self.password.clone(),
            confirm_password: self.confirm_password.clone(),
        }
    }
}

#[derive(Debug, Clone, Default, Validate)]
pub struct ChangePasswordForm {
    #[validate(custom(function = "not_blank", message = "Please enter your current password"))]
    pub old_password: String,
    #[validate(length(min = 8, message = "Password must be at least 8 characters"))]
    pub new_password: String,
    #[validate(must_match(other = "new_password", message = "Passwords do not match"))]
    pub confirm_password: String,
}

impl Form for ChangePasswordForm {
    type Payload = ChangePasswordRequest;

    fn payload(&self) -> ChangePasswordRequest {
        ChangePasswordRequest {
            old_password: self.old_password.clone(),
            new_password: self.new_password.clone(),
            confirm_password: self.confirm_password.clone(),
        }
    }
}

/// Customer create form
#[derive(Debug, Clone, Default, Validate)]
pub struct UserForm {
    #[validate(custom(function = "not_blank", message = "Please enter a first name"))]
    pub first_name: String,
    #[validate(custom(function = "not_blank", message = "Please enter a last name"))]
    pub last_name: String,
    #[validate(email(message = "Please enter a valid email address"))]
    pub email: String,
    #[validate(length(max = 20, message = "Phone number is too long"))]
    pub phone: Option<String>,
    pub country_id: Option<i64>,
    pub company_id: Option<i64>,
    #[validate(length(min = 8, message = "Password must be at least 8 characters"))]
    pub password: String,
}

impl Form for UserForm {
    type Payload = UserCreate;

    fn payload(&self) -> UserCreate {
        UserCreate {
            first_name: self.first_name.trim().to_string(),
            last_name: self.last_name.trim().to_string(),
            email: self.email.trim().to_string(),
            phone: optional(&self.phone),
            country_id: self.country_id,
            company_id: self.company_id,
            password: self.password.clone(),
        }
    }
}

/// Customer edit form; the password is changed elsewhere
#[derive(Debug, Clone, Default, Validate)]
pub struct UserEditForm {
    #[validate(custom(function = "not_blank", message = "Please enter a first name"))]
    pub first_name: String,
    #[validate(custom(function = "not_blank", message = "Please enter a last name"))]
    pub last_name: String,
    #[validate(email(message = "Please enter a valid email address"))]
    pub email: String,
    #[validate(length(max = 20, message = "Phone number is too long"))]
    pub phone: Option<String>,
    pub country_id: Option<i64>,
    pub company_id: Option<i64>,
}

impl Form for UserEditForm {
    type Payload = UserUpdate;

    fn payload(&self) -> UserUpdate {
        UserUpdate {
            first_name: Some(self.first_name.trim().to_string()),
            last_name: Some(self.last_name.trim().to_string()),
            email: Some(self.email.trim().to_string()),
            phone: optional(&self.phone),
            country_id: self.country_id,
            company_id: self.company_id,
        }
    }
}

#[derive(Debug, Clone, Default, Validate)]
pub struct AdminForm {
    #[validate(custom(function = "not_blank", message = "Please enter a name"))]
    pub name: String,
    #[validate(email(message = "Please enter a valid email address"))]
    pub email: String,
    #[validate(length(max = 20, message = "Phone number is too long"))]
    pub phone: Option<String>,
    #[validate(required(message = "Please select a role"))]
    pub role_id: Option<i64>,
    #[validate(length(min = 8, message = "Password must be at least 8 characters"))]
    pub password: String,
}

impl Form for AdminForm {
    type Payload = AdminCreate;

    fn payload(&self) -> AdminCreate {
        AdminCreate {
            name: self.name.trim().to_string(),
            email: self.email.trim().to_string(),
            phone: optional(&self.phone),
            role_id: self.role_id.unwrap_or_default(),
            password: self.password.clone(),
        }
    }
}

#[derive(Debug, Clone, Default, Validate)]
pub struct AdminEditForm {
    #[validate(custom(function = "not_blank", message = "Please enter a name"))]
    pub name: String,
    #[validate(email(message = "Please enter a valid email address"))]
    pub email: String,
    #[validate(length(max = 20, message = "Phone number is too long"))]
    pub phone: Option<String>,
    #[validate(required(message = "Please select a role"))]
    pub role_id: Option<i64>,
    pub status: Option<RecordStatus>,
}

impl Form for AdminEditForm {
    type Payload = AdminUpdate;

    fn payload(&self) -> AdminUpdate {
        AdminUpdate {
            name: Some(self.name.trim().to_string()),
            email: Some(self.email.trim().to_string()),
            phone: optional(&self.phone),
            role_id: self.role_id,
            status: self.status,
        }
    }
}

#[derive(Debug, Clone, Default, Validate)]
pub struct CompanyForm {
    #[validate(custom(function = "not_blank", message = "Please enter a company name"))]
    pub name: String,
    #[validate(email(message = "Please enter a valid email address"))]
    pub email: String,
    #[validate(length(max = 20, message = "Phone number is too long"))]
    pub phone: Option<String>,
    #[validate(length(max = 500, message = "Address is too long"))]
    pub address: Option<String>,
    #[validate(required(message = "Please select a country"))]
    pub country_id: Option<i64>,
    pub state_id: Option<i64>,
    #[validate(required(message = "Please select a currency"))]
    pub currency_id: Option<i64>,
}

impl Form for CompanyForm {
    type Payload = CompanyUpsert;

    fn payload(&self) -> CompanyUpsert {
        CompanyUpsert {
            name: self.name.trim().to_string(),
            email: self.email.trim().to_string(),
            phone: optional(&self.phone),
            address: optional(&self.address),
            country_id: self.country_id,
            state_id: self.state_id,
            currency_id: self.currency_id,
        }
    }
}

#[derive(Debug, Clone, Default, Validate)]
pub struct AccountForm {
    #[validate(required(message = "Please select a company"))]
    pub company_id: Option<i64>,
    #[validate(custom(function = "not_blank", message = "Please enter an account name"))]
    pub account_name: String,
    #[validate(custom(function = "not_blank", message = "Please enter an account number"))]
    pub account_number: String,
    pub bank_name: Option<String>,
    pub currency_id: Option<i64>,
}

impl Form for AccountForm {
    type Payload = AccountUpsert;

    fn payload(&self) -> AccountUpsert {
        AccountUpsert {
            company_id: self.company_id.unwrap_or_default(),
            account_name: self.account_name.trim().to_string(),
            account_number: self.account_number.trim().to_string(),
            bank_name: optional(&self.bank_name),
            currency_id: self.currency_id,
        }
    }
}

#[derive(Debug, Clone, Default, Validate)]
pub struct RoleForm {
    #[validate(length(min = 1, max = 100, message = "Role name must be 1-100 characters"))]
    pub name: String,
    #[validate(length(max = 500, message = "Description is too long"))]
    pub description: Option<String>,
}

impl Form for RoleForm {
    type Payload = RoleCreate;

    fn payload(&self) -> RoleCreate {
        RoleCreate {
            name: self.name.trim().to_string(),
            description: optional(&self.description),
        }
    }
}

#[derive(Debug, Clone, Default, Validate)]
pub struct RoleEditForm {
    #[validate(length(min = 1, max = 100, message = "Role name must be 1-100 characters"))]
    pub name: String,
    #[validate(length(max = 500, message = "Description is too long"))]
    pub description: Option<String>,
    pub status: Option<RecordStatus>,
}

impl Form for RoleEditForm {
    type Payload = RoleUpdate;

    fn payload(&self) -> RoleUpdate {
        RoleUpdate {
            name: Some(self.name.trim().to_string()),
            description: optional(&self.description),
            status: self.status,
        }
    }
}

#[derive(Debug, Clone, Default, Validate)]
pub struct ProfileForm {
    #[validate(custom(function = "not_blank", message = "Please enter your name"))]
    pub name: String,
    #[validate(email(message = "Please enter a valid email address"))]
    pub email: String,
    #[validate(length(max = 20, message = "Phone number is too long"))]
    pub phone: Option<String>,
}

impl Form for ProfileForm {
    type Payload = ProfileUpdate;

    fn payload(&self) -> ProfileUpdate {
        ProfileUpdate {
            name: self.name.trim().to_string(),
            email: self.email.trim().to_string(),
            phone: optional(&self.phone),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_login_form_messages() {
        let form = LoginForm {
            email: "not-an-email".to_string(),
            password: "   ".to_string(),
        };
        let errors = form.submit().unwrap_err();
        assert_eq!(errors.get("email"), Some("Please enter a valid email address"));
        assert_eq!(errors.get("password"), Some("Please enter your password"));
    }

    #[test]
    fn test_reset_password_mismatch() {
        let form = ResetPasswordForm {
            token: "abc".to_string(),
            password: "correct horse".to_string(),
            confirm_password: "correct house".to_string(),
        };
        let errors = validate_form(&form).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors.get("confirm_password"), Some("Passwords do not match"));
    }

    #[test]
    fn test_admin_form_requires_role() {
        let form = AdminForm {
            name: "Riley".to_string(),
            email: "riley@smartspend.test".to_string(),
            phone: None,
            role_id: None,
            password: "password1".to_string(),
        };
        let errors = form.submit().unwrap_err();
        assert_eq!(errors.get("role_id"), Some("Please select a role"));
    }

    #[test]
    fn test_payload_trims_and_drops_blank_optionals() {
        let form = UserForm {
            first_name: " Jo ".to_string(),
            last_name: "Park".to_string(),
            email: "jo@smartspend.test".to_string(),
            phone: Some("  ".to_string()),
            country_id: Some(3),
            company_id: None,
            password: "password1".to_string(),
        };
        let payload = form.submit().unwrap();
        assert_eq!(payload.first_name, "Jo");
        assert_eq!(payload.phone, None);
        assert_eq!(payload.country_id, Some(3));
    }

    fn submit_any<F: Form>(form: &F) -> Result<F::Payload, FieldErrors> {
        form.submit()
    }

    #[test]
    fn test_submit_through_generic_bound() {
        let form = RoleForm {
            name: String::new(),
            description: None,
        };
        let errors = submit_any(&form).unwrap_err();
        assert_eq!(errors.get("name"), Some("Role name must be 1-100 characters"));
    }

    #[test]
    fn test_user_edit_form() {
        let mut form = UserEditForm {
            first_name: "Jo".to_string(),
            last_name: " ".to_string(),
            email: "jo@".to_string(),
            phone: None,
            country_id: Some(3),
            company_id: None,
        };
        let errors = form.submit().unwrap_err();
        assert_eq!(errors.get("last_name"), Some("Please enter a last name"));
        assert_eq!(errors.get("email"), Some("Please enter a valid email address"));

        form.last_name = " Park ".to_string();
        form.email = "jo@smartspend.test".to_string();
        let payload = form.submit().unwrap();
        assert_eq!(payload.last_name.as_deref(), Some("Park"));
        assert_eq!(payload.phone, None);
        let body = serde_json::to_value(&payload).unwrap();
        assert!(body.get("phone").is_none());
    }

    #[test]
    fn test_admin_edit_form_keeps_status() {
        let form = AdminEditForm {
            name: "Riley".to_string(),
            email: "riley@smartspend.test".to_string(),
            phone: Some("555-0101".to_string()),
            role_id: Some(2),
            status: Some(RecordStatus::Inactive),
        };
        let payload = form.submit().unwrap();
        assert_eq!(payload.role_id, Some(2));
        assert_eq!(payload.status, Some(RecordStatus::Inactive));

        let form = AdminEditForm { role_id: None, ..form };
        assert_eq!(form.submit().unwrap_err().get("role_id"), Some("Please select a role"));
    }

    #[test]
    fn test_role_edit_form_name_length() {
        let form = RoleEditForm {
            name: "x".repeat(101),
            description: None,
            status: None,
        };
        let errors = form.submit().unwrap_err();
        assert_eq!(errors.get("name"), Some("Role name must be 1-100 characters"));
    }

    #[test]
    fn test_field_errors_keep_first_message() {
        let mut errors = FieldErrors::new();
        errors.insert("version", "Please enter a version number");
        errors.insert("version", "second");
        assert_eq!(errors.get("version"), Some("Please enter a version number"));
        assert_eq!(errors.first_message(), Some("Please enter a version number"));
        assert!(errors.clone().into_result().is_err());
        assert!(FieldErrors::new().into_result().is_ok());
    }
}
