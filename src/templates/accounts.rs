use super::{escape, form, input, layout, non_field_errors};
use crate::forms::{FormErrors, LoginForm};

pub fn login_page(login_form: &LoginForm, errors: &FormErrors) -> String {
    let fields = format!(
        r#"{}{}{}<input type="hidden" name="next" value="{}">"#,
        non_field_errors(errors),
        input(errors, "username", "Username", "text", &login_form.username),
        input(errors, "password", "Password", "password", ""),
        escape(&login_form.next),
    );

    layout("Log in", None, &form("/login", &fields, "Log in"))
}
