// File: src/schemas.rs
// Purpose: Rule schemas for the admin front-end's forms

use crate::rule::{FieldRule, Rules};
use crate::value::{Value, Values};
use gsm_forms_validation::is_digits;
use once_cell::sync::Lazy;
use regex::Regex;

static EMAIL_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").unwrap());

static LOGIN_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[A-Za-z0-9_.-]+$").unwrap());

static INN_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"^(\d{10}|\d{12})$").unwrap());

static KPP_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\d{9}$").unwrap());

static HOST_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z0-9]([A-Za-z0-9.-]*[A-Za-z0-9])?$").unwrap());

/// Field must equal `other`, compared as displayed text
fn matches_field(other: &'static str, message: &'static str) -> impl Fn(&Value, &Values) -> Option<String> {
    move |value, all| {
        let expected = all.get(other).map(Value::display).unwrap_or_default();
        (value.display() != expected).then(|| message.to_string())
    }
}

fn whole_number(value: &Value, _: &Values) -> Option<String> {
    let n = value.to_number();
    (!n.is_nan() && n.fract() != 0.0).then(|| "Must be a whole number".to_string())
}

/// Create-user form with password confirmation
pub fn user_form() -> Rules {
    Rules::new()
        .field(
            "login",
            FieldRule::new()
                .required()
                .min_length(3)
                .max_length(50)
                .pattern(LOGIN_REGEX.clone())
                .label("Login"),
        )
        .field(
            "email",
            FieldRule::new()
                .required()
                .pattern(EMAIL_REGEX.clone())
                .message("Enter a valid e-mail address")
                .required_message("E-mail is required")
                .label("E-mail"),
        )
        .field(
            "password",
            FieldRule::new().required().min_length(8).label("Password"),
        )
        .field(
            "confirm_password",
            FieldRule::new()
                .validate(matches_field("password", "Passwords do not match"))
                .label("Confirm password"),
        )
}

pub fn organization_form() -> Rules {
    Rules::new()
        .field(
            "name",
            FieldRule::new().required().max_length(255).label("Name"),
        )
        .field(
            "inn",
            FieldRule::new()
                .required()
                .pattern(INN_REGEX.clone())
                .message("INN must have 10 or 12 digits")
                .required_message("INN is required")
                .label("INN"),
        )
        .field(
            "kpp",
            FieldRule::new()
                .pattern(KPP_REGEX.clone())
                .message("KPP must have 9 digits")
                .label("KPP"),
        )
}

pub fn fuel_card_form() -> Rules {
    Rules::new()
        .field(
            "card_number",
            FieldRule::new()
                .required()
                .min_length(16)
                .max_length(19)
                .validate(|value, _| {
                    let digits = value.as_str().map(is_digits).unwrap_or(false);
                    (!digits).then(|| "Card number must contain digits only".to_string())
                })
                .label("Card number"),
        )
        .field(
            "provider_id",
            FieldRule::new()
                .required()
                .required_message("Select a provider")
                .label("Provider"),
        )
        .field(
            "limit",
            FieldRule::new().min(0.0).label("Monthly limit"),
        )
}

pub fn email_settings_form() -> Rules {
    Rules::new()
        .field(
            "smtp_host",
            FieldRule::new()
                .required()
                .pattern(HOST_REGEX.clone())
                .label("SMTP host"),
        )
        .field(
            "smtp_port",
            FieldRule::new()
                .required()
                .min(1.0)
                .max(65535.0)
                .validate(whole_number)
                .label("SMTP port"),
        )
        .field(
            "sender_email",
            FieldRule::new()
                .required()
                .pattern(EMAIL_REGEX.clone())
                .message("Enter a valid e-mail address")
                .required_message("Sender e-mail is required")
                .label("Sender e-mail"),
        )
}

/// Daily card-info sync time
pub fn card_info_schedule_form() -> Rules {
    Rules::new()
        .field(
            "hour",
            FieldRule::new()
                .required()
                .min(0.0)
                .max(23.0)
                .validate(whole_number)
                .label("Hour"),
        )
        .field(
            "minute",
            FieldRule::new()
                .required()
                .min(0.0)
                .max(59.0)
                .validate(whole_number)
                .label("Minute"),
        )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::{FormState, InputKind};
    use crate::value::values;

    #[test]
    fn test_user_form_password_confirmation() {
        let mut form = FormState::new(
            values([
                ("login", "operator"),
                ("email", "op@gsm.example"),
                ("password", "secret123"),
                ("confirm_password", ""),
            ]),
            user_form(),
        );

        assert!(!form.validate_all());
        assert_eq!(form.error("confirm_password"), Some("Passwords do not match"));

        form.handle_change("confirm_password", "secret123", InputKind::Password);
        assert_eq!(form.error("confirm_password"), None);
        assert!(form.is_valid());
    }

    #[test]
    fn test_user_form_messages() {
        let form = FormState::new(Values::new(), user_form());
        assert_eq!(
            form.validate_field("email", &Value::from(""), None).as_deref(),
            Some("E-mail is required")
        );
        assert_eq!(
            form.validate_field("email", &Value::from("nope"), None).as_deref(),
            Some("Enter a valid e-mail address")
        );
        assert_eq!(
            form.validate_field("login", &Value::from("bad login"), None).as_deref(),
            Some("Login has an invalid format")
        );
    }

    #[test]
    fn test_organization_inn() {
        let form = FormState::new(Values::new(), organization_form());
        assert_eq!(form.validate_field("inn", &Value::from("7707083893"), None), None);
        assert_eq!(form.validate_field("inn", &Value::from("500100732259"), None), None);
        assert_eq!(
            form.validate_field("inn", &Value::from("12345"), None).as_deref(),
            Some("INN must have 10 or 12 digits")
        );
        // Optional KPP
        assert_eq!(form.validate_field("kpp", &Value::from(""), None), None);
        assert!(form.validate_field("kpp", &Value::from("77010100"), None).is_some());
    }

    #[test]
    fn test_fuel_card_number() {
        let form = FormState::new(Values::new(), fuel_card_form());
        assert_eq!(
            form.validate_field("card_number", &Value::from("7826010100000001"), None),
            None
        );
        assert_eq!(
            form.validate_field("card_number", &Value::from("7826-0101-0000-01"), None)
                .as_deref(),
            Some("Card number must contain digits only")
        );
        assert_eq!(
            form.validate_field("card_number", &Value::from("123"), None).as_deref(),
            Some("Must be at least 16 characters")
        );
        assert!(form.validate_field("limit", &Value::from(-1), None).is_some());
        assert_eq!(form.validate_field("limit", &Value::from(0), None), None);
    }

    #[test]
    fn test_email_settings_port() {
        let form = FormState::new(Values::new(), email_settings_form());
        assert_eq!(form.validate_field("smtp_port", &Value::from(587), None), None);
        assert_eq!(
            form.validate_field("smtp_port", &Value::from("0"), None).as_deref(),
            Some("Must be at least 1")
        );
        assert_eq!(
            form.validate_field("smtp_port", &Value::from(70000), None).as_deref(),
            Some("Must be at most 65535")
        );
        assert_eq!(
            form.validate_field("smtp_port", &Value::from(25.5), None).as_deref(),
            Some("Must be a whole number")
        );
        assert_eq!(form.validate_field("smtp_host", &Value::from("smtp.yandex.ru"), None), None);
    }

    #[test]
    fn test_schedule_zero_hour_is_valid() {
        let mut form = FormState::new(values([("hour", 0), ("minute", 0)]), card_info_schedule_form());
        assert!(form.validate_all());
        form.handle_change("minute", 60, InputKind::Number);
        assert_eq!(form.error("minute"), Some("Must be at most 59"));
    }
}
