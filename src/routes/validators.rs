//!
//! Documentation of the validators module.
//! Input rules for registration, shared by the register and edit forms.
//!

use super::*;

/// Registration emails have to come from here
pub const ALLOWED_DOMAIN: &str = "ncsu.edu";

// Passwords nobody should be allowed to keep
const COMMON_PASSWORDS: [&str; 4] = ["password!123456", "12345678", "qwerty", "admin"];

const SPECIAL_CHARACTERS: &str = "!@#$%^&*(),.?\":{}|<>";

///
/// Validates the email address
///
/// * exactly one '@'
/// * alphanumeric local part
/// * the allowed domain only
///
pub fn validate_email_domain(value: &str) -> Result<(), String> {
    let email_parts: Vec<&str> = value.split('@').collect();
    if email_parts.len() != 2 {
        return Err(String::from("Invalid email"));
    }
    let local = email_parts[0];
    if local.is_empty() || !local.chars().all(|x| x.is_ascii_alphanumeric()) {
        return Err(String::from("Invalid email"));
    }
    let domain = email_parts[email_parts.len() - 1];
    if domain != ALLOWED_DOMAIN {
        return Err(format!("Email must be from the {} domain.", ALLOWED_DOMAIN));
    }
    Ok(())
}

///
/// Validates the password strength
///
/// * 8 to 16 characters
/// * at least one lowercase, one uppercase, one digit, one special
/// * not a common password
/// * no character repeated three times in a row
///
pub fn validate_password(value: &str) -> Result<(), String> {
    if value.len() < 8 {
        return Err(String::from("Password is too short"));
    }
    if value.len() > 16 {
        return Err(String::from("Password is too long"));
    }

    if !value.chars().any(|x| x.is_ascii_lowercase()) {
        return Err(String::from("Password must contain at least one lowercase letter."));
    }

    if !value.chars().any(|x| x.is_ascii_uppercase()) {
        return Err(String::from("Password must contain at least one uppercase letter."));
    }

    if !value.chars().any(|x| x.is_ascii_digit()) {
        return Err(String::from("Password must contain at least one digit."));
    }

    if !value.chars().any(|x| SPECIAL_CHARACTERS.contains(x)) {
        return Err(String::from("Password must contain at least one special character."));
    }

    if COMMON_PASSWORDS.contains(&&value.to_lowercase()[..]) {
        return Err(String::from("This password is too common. Please choose a more unique password."));
    }

    let bytes = value.as_bytes();
    if bytes.windows(3).any(|x| x[0] == x[1] && x[1] == x[2]) {
        return Err(String::from("Password contains repeated characters. Please avoid easily guessable patterns."));
    }

    Ok(())
}

/// Checks the username is free
pub async fn validate_unique_username(db: &Database, username: String) -> mongodb::error::Result<Option<String>> {
    if ODM::odm::user_exists(&db, username).await? {
        return Ok(Some(String::from("Username must be unique")));
    }
    Ok(None)
}

/// Checks the unity id is free
pub async fn validate_unique_unityid(db: &Database, unityid: String) -> mongodb::error::Result<Option<String>> {
    if ODM::odm::unityid_exists(&db, unityid).await? {
        return Ok(Some(String::from("Unity ID must be unique")));
    }
    Ok(None)
}
