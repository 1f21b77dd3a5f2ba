use super::{escape, form, input, layout, non_field_errors};
use crate::forms::{ClientForm, FormErrors};
use crate::models::Client;
use crate::views::{client_detail_url, CLIENT_LIST};

pub fn clients_page(
    username: &str,
    clients: &[Client],
    client_form: &ClientForm,
    errors: &FormErrors,
) -> String {
    let list = if clients.is_empty() {
        "<p>No clients yet.</p>".to_string()
    } else {
        let items: String = clients
            .iter()
            .map(|c| {
                format!(
                    r#"<li><a href="{}">{}</a></li>"#,
                    client_detail_url(c.id),
                    escape(&c.name)
                )
            })
            .collect();
        format!(r#"<ul class="client-list">{items}</ul>"#)
    };

    let fields = format!(
        "{}{}",
        non_field_errors(errors),
        input(errors, "name", "Name", "text", &client_form.name)
    );

    let content = format!(
        "{list}\n<h2>Add client</h2>\n{}",
        form(CLIENT_LIST, &fields, "Add")
    );
    layout("Clients", Some(username), &content)
}

pub fn client_detail_page(
    username: &str,
    client: &Client,
    client_form: &ClientForm,
    errors: &FormErrors,
) -> String {
    let fields = format!(
        "{}{}",
        non_field_errors(errors),
        input(errors, "name", "Name", "text", &client_form.name)
    );

    let content = form(&client_detail_url(client.id), &fields, "Save");
    layout(&format!("Client: {}", client.name), Some(username), &content)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn acme() -> Client {
        Client {
            id: 7,
            name: "Acme".into(),
            author_id: Some(1),
        }
    }

    #[test]
    fn list_links_to_detail_page() {
        let page = clients_page("alice", &[acme()], &ClientForm::default(), &FormErrors::default());
        assert!(page.contains(r#"<a href="/clients/7">Acme</a>"#));
        assert!(page.contains(r#"action="/clients""#));
    }

    #[test]
    fn detail_form_posts_back_to_itself() {
        let client = acme();
        let page = client_detail_page(
            "alice",
            &client,
            &ClientForm::from(&client),
            &FormErrors::default(),
        );
        assert!(page.contains(r#"action="/clients/7""#));
    }
}
