use domain::{Toast, ToastKind};

use super::escape;

pub struct Chrome<'a> {
    pub site_title: &'a str,
    pub signed_in: bool,
    pub toast: Option<Toast>,
}

pub struct Page<'a> {
    pub title: String,
    pub description: Option<&'a str>,
    pub body: String,
}

fn navbar(chrome: &Chrome<'_>) -> String {
    let auth = if chrome.signed_in {
        r#"<form method="post" action="/auth/sign-out"><button class="btn" type="submit">Logout</button></form>"#
            .to_string()
    } else {
        r#"<a class="btn" href="/auth/sign-up">Sign Up</a><a class="btn btn-outline" href="/auth/login">Login</a>"#
            .to_string()
    };

    format!(
        r#"<nav class="navbar">
  <div class="nav-left">
    <a href="/" class="brand"><h1>{title}<span class="brand-accent">Pro</span></h1></a>
    <div class="nav-links">
      <a class="btn btn-ghost" href="/">Home</a>
      <a class="btn btn-ghost" href="/blog">Blog</a>
    </div>
  </div>
  <div class="nav-right">
    {auth}
    <button class="btn btn-ghost theme-toggle" type="button" data-theme-toggle aria-label="Toggle theme">&#9680;</button>
  </div>
</nav>"#,
        title = escape(chrome.site_title),
        auth = auth,
    )
}

fn toast(toast: &Option<Toast>) -> String {
    match toast {
        Some(t) => {
            let kind = match t.kind {
                ToastKind::Success => "success",
                ToastKind::Error => "error",
            };
            format!(
                r#"<div class="toast toast-{kind}" role="status" data-toast="{kind}">{msg}</div>"#,
                kind = kind,
                msg = escape(&t.message)
            )
        }
        None => String::new(),
    }
}

pub fn render(chrome: &Chrome<'_>, page: Page<'_>) -> String {
    let description = page
        .description
        .map(|d| format!(r#"<meta name="description" content="{}">"#, escape(d)))
        .unwrap_or_default();

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>{title}</title>
{description}
<link rel="stylesheet" href="/static/app.css">
<script src="/static/app.js" defer></script>
</head>
<body>
<main class="shell">
{navbar}
{body}
</main>
<div id="toasts" class="toasts">{toast}</div>
</body>
</html>"#,
        title = escape(&page.title),
        description = description,
        navbar = navbar(chrome),
        body = page.body,
        toast = toast(&chrome.toast),
    )
}
