use axum::{
    extract::State,
    http::StatusCode,
    response::{Html, IntoResponse, Redirect, Response},
    Form,
};
use axum_extra::extract::cookie::CookieJar;
use adapter::{actions, ActionError};
use domain::{LoginForm, Notice, Session, SignUpForm, Toast};

use super::chrome;
use crate::http::session::{clear_session_cookie, session_cookie, CurrentViewer};
use crate::state::AppState;
use crate::views::{self, LoginValues, SignUpValues};

fn signed_in(state: &AppState, session: &Session, notice: Notice) -> Response {
    (
        CookieJar::new().add(session_cookie(&state.site, &session.token)),
        Redirect::to(&format!("/?notice={}", notice.code())),
    )
        .into_response()
}

fn failure_status(err: &ActionError) -> (StatusCode, Option<Toast>) {
    match err {
        ActionError::Invalid(_) => (StatusCode::UNPROCESSABLE_ENTITY, None),
        ActionError::Auth(e) => (StatusCode::UNAUTHORIZED, Some(Toast::error(e.user_message()))),
        ActionError::Failed => (
            StatusCode::BAD_GATEWAY,
            Some(Toast::error("Something went wrong. Please try again.")),
        ),
    }
}

pub async fn login_form(State(state): State<AppState>, viewer: CurrentViewer) -> Html<String> {
    Html(views::login_page(
        &chrome(&state, viewer.is_authenticated(), None),
        LoginValues::default(),
    ))
}

pub async fn login_submit(
    State(state): State<AppState>,
    viewer: CurrentViewer,
    Form(form): Form<LoginForm>,
) -> Response {
    let err = match actions::sign_in_action(state.auth.as_ref(), &form).await {
        Ok(session) => return signed_in(&state, &session, Notice::LoggedIn),
        Err(e) => e,
    };

    let (status, toast) = failure_status(&err);
    let errors = match &err {
        ActionError::Invalid(errors) => Some(errors),
        _ => None,
    };
    let html = views::login_page(
        &chrome(&state, viewer.is_authenticated(), toast),
        LoginValues {
            email: &form.email,
            errors,
        },
    );
    (status, Html(html)).into_response()
}

pub async fn sign_up_form(State(state): State<AppState>, viewer: CurrentViewer) -> Html<String> {
    Html(views::sign_up_page(
        &chrome(&state, viewer.is_authenticated(), None),
        SignUpValues::default(),
    ))
}

pub async fn sign_up_submit(
    State(state): State<AppState>,
    viewer: CurrentViewer,
    Form(form): Form<SignUpForm>,
) -> Response {
    let err = match actions::sign_up_action(state.auth.as_ref(), &form).await {
        Ok(session) => return signed_in(&state, &session, Notice::AccountCreated),
        Err(e) => e,
    };

    let (status, toast) = failure_status(&err);
    let errors = match &err {
        ActionError::Invalid(errors) => Some(errors),
        _ => None,
    };
    let html = views::sign_up_page(
        &chrome(&state, viewer.is_authenticated(), toast),
        SignUpValues {
            name: &form.name,
            email: &form.email,
            errors,
        },
    );
    (status, Html(html)).into_response()
}

pub async fn sign_out(State(state): State<AppState>, viewer: CurrentViewer) -> Response {
    let Some(token) = viewer.token.as_ref() else {
        return Redirect::to("/").into_response();
    };

    match actions::sign_out_action(state.auth.as_ref(), token).await {
        Ok(()) => (
            CookieJar::new().add(clear_session_cookie(&state.site)),
            Redirect::to(&format!("/?notice={}", Notice::LoggedOut.code())),
        )
            .into_response(),
        Err(e) => {
            let (status, toast) = failure_status(&e);
            (
                status,
                Html(views::home_page(&chrome(&state, viewer.is_authenticated(), toast))),
            )
                .into_response()
        }
    }
}
