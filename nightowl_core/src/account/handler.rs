use chrono::{DateTime, Utc};
use regex::Regex;
use std::sync::LazyLock;

use super::dto::{
    AccountError, FieldError, FormField, LoginForm, PasswordOutcome, PasswordStep, Profile,
    RouteDecision, SignUpForm, UsernameChange, UsernameCooldown, MAX_USERNAME_LENGTH,
    MIN_PASSWORD_LENGTH, MIN_USERNAME_LENGTH, USERNAME_COOLDOWN_DAYS,
};

const DAY_MILLIS: i64 = 24 * 60 * 60 * 1000;

pub const DEFAULT_AVATAR: &str = "https://github.com/shadcn.png";

const PROTECTED_PREFIXES: [&str; 5] = ["/dashboard", "/schedule", "/tasks", "/analytics", "/settings"];

static EMAIL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").unwrap());

static ALPHANUMERIC: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[a-zA-Z0-9]+$").unwrap());

/// Whole days between two instants, rounded up.
fn days_between(earlier: DateTime<Utc>, later: DateTime<Utc>) -> i64 {
    let millis = (later - earlier).num_milliseconds().abs();
    (millis + DAY_MILLIS - 1) / DAY_MILLIS
}

pub fn username_cooldown(
    last_change: Option<DateTime<Utc>>,
    now: DateTime<Utc>,
) -> UsernameCooldown {
    let Some(last_change) = last_change else {
        return UsernameCooldown::Allowed;
    };

    let days_passed = days_between(last_change, now);

    if days_passed >= USERNAME_COOLDOWN_DAYS {
        UsernameCooldown::Allowed
    } else {
        UsernameCooldown::Blocked {
            days_remaining: USERNAME_COOLDOWN_DAYS - days_passed,
        }
    }
}

/// Decides what a username update does to `profile`. Nothing is written here;
/// the caller persists an `Apply`.
pub fn plan_username_change(
    profile: &Profile,
    requested: &str,
    now: DateTime<Utc>,
) -> Result<UsernameChange, AccountError> {
    if requested.is_empty() || requested == profile.username {
        return Ok(UsernameChange::Unchanged);
    }

    match username_cooldown(profile.last_username_change, now) {
        UsernameCooldown::Blocked { days_remaining } => {
            Err(AccountError::UsernameCooldown { days_remaining })
        }
        UsernameCooldown::Allowed => Ok(UsernameChange::Apply {
            username: requested.to_string(),
            changed_at: now,
        }),
    }
}

impl Profile {
    /// Builds the profile shown in the shell, falling back to the e-mail's
    /// local part when no username was stored.
    pub fn resolve(
        id: &str,
        email: Option<&str>,
        stored_username: Option<&str>,
        avatar_url: Option<&str>,
        last_username_change: Option<DateTime<Utc>>,
    ) -> Self {
        let email = email.unwrap_or_default().to_string();

        let username = stored_username
            .filter(|name| !name.is_empty())
            .map(str::to_string)
            .or_else(|| {
                email
                    .split('@')
                    .next()
                    .filter(|local| !local.is_empty())
                    .map(str::to_string)
            })
            .unwrap_or_else(|| "User".to_string());

        Profile {
            id: id.to_string(),
            username,
            email,
            avatar: avatar_url.unwrap_or(DEFAULT_AVATAR).to_string(),
            last_username_change,
        }
    }

    pub fn apply(&mut self, change: UsernameChange) {
        if let UsernameChange::Apply {
            username,
            changed_at,
        } = change
        {
            self.username = username;
            self.last_username_change = Some(changed_at);
        }
    }
}

/// Two-step password change: confirm the current password, then pick a new one.
#[derive(Debug, Clone, Default)]
pub struct PasswordChangeDialog {
    pub step: PasswordStep,
    pub current_password: String,
    pub new_password: String,
    pub confirm_password: String,
    pub error: Option<String>,
}

impl PasswordChangeDialog {
    pub fn submit(&mut self) -> Result<PasswordOutcome, AccountError> {
        let outcome = match self.step {
            PasswordStep::Current => {
                if self.current_password.is_empty() {
                    Err(AccountError::MissingCurrentPassword)
                } else {
                    self.step = PasswordStep::New;
                    Ok(PasswordOutcome::Advanced)
                }
            }
            PasswordStep::New => {
                if self.new_password != self.confirm_password {
                    Err(AccountError::PasswordMismatch)
                } else if self.new_password.chars().count() < MIN_PASSWORD_LENGTH {
                    Err(AccountError::PasswordTooShort)
                } else {
                    self.reset();
                    Ok(PasswordOutcome::Completed)
                }
            }
        };

        match &outcome {
            Ok(PasswordOutcome::Advanced) => self.error = None,
            Ok(PasswordOutcome::Completed) => {}
            Err(e) => self.error = Some(e.to_string()),
        }

        outcome
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

pub fn validate_sign_up(form: &SignUpForm) -> Vec<FieldError> {
    let mut errors = vec![];
    let username_length = form.username.chars().count();

    if username_length < MIN_USERNAME_LENGTH {
        errors.push(FieldError {
            field: FormField::Username,
            message: "Username must be at least 3 characters.",
        });
    } else if username_length > MAX_USERNAME_LENGTH {
        errors.push(FieldError {
            field: FormField::Username,
            message: "Username must be at most 15 characters.",
        });
    } else if !ALPHANUMERIC.is_match(&form.username) {
        errors.push(FieldError {
            field: FormField::Username,
            message: "Username must be alphanumeric.",
        });
    }

    if !EMAIL.is_match(&form.email) {
        errors.push(FieldError {
            field: FormField::Email,
            message: "Please enter a valid email address.",
        });
    }

    if form.password.chars().count() < MIN_PASSWORD_LENGTH {
        errors.push(FieldError {
            field: FormField::Password,
            message: "Password must be at least 6 characters.",
        });
    }

    if form.password != form.confirm_password {
        errors.push(FieldError {
            field: FormField::ConfirmPassword,
            message: "Passwords do not match",
        });
    }

    errors
}

pub fn validate_login(form: &LoginForm) -> Vec<FieldError> {
    let mut errors = vec![];

    if !EMAIL.is_match(&form.email) {
        errors.push(FieldError {
            field: FormField::Email,
            message: "Please enter a valid email address.",
        });
    }

    if form.password.is_empty() {
        errors.push(FieldError {
            field: FormField::Password,
            message: "Password is required.",
        });
    }

    errors
}

/// Where a request for `path` should go given whether a session exists.
pub fn guard_route(path: &str, has_session: bool) -> RouteDecision {
    let protected = PROTECTED_PREFIXES
        .iter()
        .any(|prefix| path.starts_with(prefix));

    if !has_session && protected {
        return RouteDecision::Redirect("/");
    }

    if has_session && path == "/" {
        return RouteDecision::Redirect("/dashboard");
    }

    RouteDecision::Continue
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn at(day: u32, hour: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 3, day, hour, 0, 0).unwrap()
    }

    fn profile(last_change: Option<DateTime<Utc>>) -> Profile {
        Profile::resolve("u-1", Some("owl@night.dev"), Some("nightowl"), None, last_change)
    }

    #[test]
    fn test_username_cooldown() {
        assert_eq!(username_cooldown(None, at(1, 0)), UsernameCooldown::Allowed);

        // Partial days round up
        assert_eq!(
            username_cooldown(Some(at(1, 0)), at(1, 1)),
            UsernameCooldown::Blocked { days_remaining: 14 }
        );
        assert_eq!(
            username_cooldown(Some(at(1, 0)), at(1, 0)),
            UsernameCooldown::Blocked { days_remaining: 15 }
        );
        assert_eq!(
            username_cooldown(Some(at(1, 0)), at(15, 0)),
            UsernameCooldown::Blocked { days_remaining: 1 }
        );
        assert_eq!(
            username_cooldown(Some(at(1, 0)), at(15, 1)),
            UsernameCooldown::Allowed
        );
        assert_eq!(
            username_cooldown(Some(at(1, 0)), at(16, 0)),
            UsernameCooldown::Allowed
        );
    }

    #[test]
    fn test_plan_username_change() {
        let now = at(10, 12);

        let fresh = profile(None);
        assert_eq!(
            plan_username_change(&fresh, "nightowl", now),
            Ok(UsernameChange::Unchanged)
        );

        let mut fresh = fresh;
        let change = plan_username_change(&fresh, "moonwalker", now).unwrap();
        fresh.apply(change);
        assert_eq!(fresh.username, "moonwalker");
        assert_eq!(fresh.last_username_change, Some(now));

        let recent = profile(Some(now - Duration::days(3)));
        let err = plan_username_change(&recent, "moonwalker", now).unwrap_err();
        assert_eq!(err, AccountError::UsernameCooldown { days_remaining: 12 });
        assert_eq!(
            err.to_string(),
            "You can only change your username once every 15 days. Days remaining: 12"
        );
    }

    #[test]
    fn test_profile_resolve_fallbacks() {
        let profile = Profile::resolve("u-2", Some("luna@night.dev"), None, None, None);
        assert_eq!(profile.username, "luna");
        assert_eq!(profile.avatar, DEFAULT_AVATAR);

        let profile = Profile::resolve("u-3", None, Some(""), Some("https://a/b.png"), None);
        assert_eq!(profile.username, "User");
        assert_eq!(profile.email, "");
        assert_eq!(profile.avatar, "https://a/b.png");
    }

    #[test]
    fn test_password_dialog_flow() {
        let mut dialog = PasswordChangeDialog::default();

        assert_eq!(dialog.submit(), Err(AccountError::MissingCurrentPassword));
        assert_eq!(dialog.error.as_deref(), Some("Please enter your current password."));
        assert_eq!(dialog.step, PasswordStep::Current);

        dialog.current_password = "old-secret".to_string();
        assert_eq!(dialog.submit(), Ok(PasswordOutcome::Advanced));
        assert_eq!(dialog.step, PasswordStep::New);
        assert!(dialog.error.is_none());

        dialog.new_password = "abc".to_string();
        dialog.confirm_password = "abd".to_string();
        assert_eq!(dialog.submit(), Err(AccountError::PasswordMismatch));

        dialog.confirm_password = "abc".to_string();
        assert_eq!(dialog.submit(), Err(AccountError::PasswordTooShort));
        assert_eq!(
            dialog.error.as_deref(),
            Some("Password must be at least 6 characters.")
        );

        dialog.new_password = "new-secret".to_string();
        dialog.confirm_password = "new-secret".to_string();
        assert_eq!(dialog.submit(), Ok(PasswordOutcome::Completed));
        assert_eq!(dialog.step, PasswordStep::Current);
        assert!(dialog.current_password.is_empty());
        assert!(dialog.error.is_none());
    }

    #[test]
    fn test_validate_sign_up() {
        let valid = SignUpForm {
            username: "nightowl42".to_string(),
            email: "owl@night.dev".to_string(),
            password: "hunter22".to_string(),
            confirm_password: "hunter22".to_string(),
        };
        assert!(validate_sign_up(&valid).is_empty());

        let invalid = SignUpForm {
            username: "night owl".to_string(),
            email: "not-an-email".to_string(),
            password: "short".to_string(),
            confirm_password: "shorter".to_string(),
        };
        let fields: Vec<FormField> = validate_sign_up(&invalid)
            .into_iter()
            .map(|e| e.field)
            .collect();
        assert_eq!(
            fields,
            vec![
                FormField::Username,
                FormField::Email,
                FormField::Password,
                FormField::ConfirmPassword
            ]
        );

        let long = SignUpForm {
            username: "a".repeat(16),
            ..valid.clone()
        };
        assert_eq!(
            validate_sign_up(&long)[0].message,
            "Username must be at most 15 characters."
        );
    }

    #[test]
    fn test_validate_login() {
        let form = LoginForm {
            email: "owl@night.dev".to_string(),
            password: "x".to_string(),
        };
        assert!(validate_login(&form).is_empty());

        let errors = validate_login(&LoginForm::default());
        assert_eq!(errors.len(), 2);
        assert_eq!(errors[1].message, "Password is required.");
    }

    #[test]
    fn test_guard_route() {
        assert_eq!(guard_route("/schedule", false), RouteDecision::Redirect("/"));
        assert_eq!(guard_route("/settings/profile", false), RouteDecision::Redirect("/"));
        assert_eq!(guard_route("/", false), RouteDecision::Continue);
        assert_eq!(guard_route("/", true), RouteDecision::Redirect("/dashboard"));
        assert_eq!(guard_route("/schedule", true), RouteDecision::Continue);
        assert_eq!(guard_route("/about", false), RouteDecision::Continue);
    }
}
