use super::{escape, form, input, layout, non_field_errors, select};
use crate::forms::{FormErrors, ProjectForm};
use crate::models::{Client, Project};
use crate::views::{project_detail_url, PROJECT_LIST};

fn client_options(clients: &[Client]) -> Vec<(i64, String)> {
    clients.iter().map(|c| (c.id, c.name.clone())).collect()
}

fn project_fields(project_form: &ProjectForm, clients: &[Client], errors: &FormErrors) -> String {
    format!(
        "{}{}{}",
        non_field_errors(errors),
        input(errors, "name", "Name", "text", &project_form.name),
        select(
            errors,
            "client",
            "Client",
            &client_options(clients),
            &project_form.client
        ),
    )
}

pub fn projects_page(
    username: &str,
    projects: &[Project],
    clients: &[Client],
    project_form: &ProjectForm,
    errors: &FormErrors,
) -> String {
    let list = if projects.is_empty() {
        "<p>No projects yet.</p>".to_string()
    } else {
        let rows: String = projects
            .iter()
            .map(|p| {
                format!(
                    r#"<tr><td><a href="{}">{}</a></td><td>{}</td></tr>"#,
                    project_detail_url(p.id),
                    escape(&p.name),
                    escape(&p.client_name)
                )
            })
            .collect();
        format!(
            r#"<table class="project-list"><tr><th>Project</th><th>Client</th></tr>{rows}</table>"#
        )
    };

    let content = format!(
        "{list}\n<h2>Add project</h2>\n{}",
        form(PROJECT_LIST, &project_fields(project_form, clients, errors), "Add")
    );
    layout("Projects", Some(username), &content)
}

pub fn project_detail_page(
    username: &str,
    project: &Project,
    clients: &[Client],
    project_form: &ProjectForm,
    errors: &FormErrors,
) -> String {
    let content = form(
        &project_detail_url(project.id),
        &project_fields(project_form, clients, errors),
        "Save",
    );
    layout(&format!("Project: {}", project.name), Some(username), &content)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn list_and_detail_use_project_urls() {
        let client = Client {
            id: 1,
            name: "Acme".into(),
            author_id: Some(1),
        };
        let project = Project {
            id: 12,
            name: "Website".into(),
            client_id: 1,
            author_id: Some(1),
            client_name: "Acme".into(),
        };

        let list = projects_page(
            "alice",
            std::slice::from_ref(&project),
            std::slice::from_ref(&client),
            &ProjectForm::default(),
            &FormErrors::default(),
        );
        assert!(list.contains(r#"<a href="/projects/12">Website</a>"#));
        assert!(list.contains(r#"action="/projects""#));

        let detail = project_detail_page(
            "alice",
            &project,
            &[client],
            &ProjectForm::from(&project),
            &FormErrors::default(),
        );
        assert!(detail.contains(r#"action="/projects/12""#));
    }
}
