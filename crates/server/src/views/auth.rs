use domain::FormErrors;

use super::layout::{render, Chrome, Page};
use super::{escape, field_error, invalid_attr};

/// Echoed back on a failed login; passwords never are.
#[derive(Default)]
pub struct LoginValues<'a> {
    pub email: &'a str,
    pub errors: Option<&'a FormErrors>,
}

#[derive(Default)]
pub struct SignUpValues<'a> {
    pub name: &'a str,
    pub email: &'a str,
    pub errors: Option<&'a FormErrors>,
}

fn input(label: &str, name: &str, kind: &str, value: &str, placeholder: &str, error: Option<&str>) -> String {
    format!(
        r#"<div class="field">
  <label for="{name}">{label}</label>
  <input id="{name}" name="{name}" type="{kind}" value="{value}" placeholder="{placeholder}"{invalid}>
  {error}
</div>"#,
        label = label,
        name = name,
        kind = kind,
        value = escape(value),
        placeholder = placeholder,
        invalid = invalid_attr(error),
        error = field_error(error),
    )
}

pub fn login_page(chrome: &Chrome<'_>, values: LoginValues<'_>) -> String {
    let err = |field: &str| values.errors.and_then(|e| e.get(field));
    let body = format!(
        r#"<div class="card auth-card">
  <div class="card-header center"><h2>Welcome Back</h2><p class="muted">Login to get started right away</p></div>
  <form class="card-content" method="post" action="/auth/login">
    {email}
    {password}
    <button class="btn btn-block" type="submit">Login</button>
    <p class="muted center">Don&apos;t have an account? <a href="/auth/sign-up">Sign up</a></p>
  </form>
</div>"#,
        email = input("Email", "email", "email", values.email, "john@doe.com", err("email")),
        password = input("Password", "password", "password", "", "", err("password")),
    );
    render(
        chrome,
        Page {
            title: format!("Login | {}", chrome.site_title),
            description: None,
            body,
        },
    )
}

pub fn sign_up_page(chrome: &Chrome<'_>, values: SignUpValues<'_>) -> String {
    let err = |field: &str| values.errors.and_then(|e| e.get(field));
    let body = format!(
        r#"<div class="card auth-card">
  <div class="card-header center"><h2>Create Your Account</h2><p class="muted">Enter your email below to create your account</p></div>
  <form class="card-content" method="post" action="/auth/sign-up">
    {name}
    {email}
    <div class="field-row">
      {password}
      {confirm}
    </div>
    <p class="muted small">Must be at least 8 characters long.</p>
    <button class="btn btn-block" type="submit">Create Account</button>
    <p class="muted center">Already have an account? <a href="/auth/login">Sign in</a></p>
  </form>
</div>"#,
        name = input("Full Name", "name", "text", values.name, "John Doe", err("name")),
        email = input("Email", "email", "email", values.email, "john@doe.com", err("email")),
        password = input("Password", "password", "password", "", "", err("password")),
        confirm = input(
            "Confirm Password",
            "confirmPassword",
            "password",
            "",
            "",
            err("confirm_password")
        ),
    );
    render(
        chrome,
        Page {
            title: format!("Sign Up | {}", chrome.site_title),
            description: None,
            body,
        },
    )
}
