use super::{escape, form, input, layout, non_field_errors, select, textarea};
use crate::forms::{EntryForm, FormErrors};
use crate::models::{Entry, Project};

const DISPLAY_FORMAT: &str = "%Y-%m-%d %H:%M";

fn format_duration(entry: &Entry) -> String {
    let minutes = entry.duration().num_minutes();
    format!("{}:{:02}", minutes / 60, minutes % 60)
}

pub fn entries_page(
    username: &str,
    entries: &[Entry],
    projects: &[Project],
    entry_form: &EntryForm,
    errors: &FormErrors,
) -> String {
    let list = if entries.is_empty() {
        "<p>No entries yet.</p>".to_string()
    } else {
        let rows: String = entries
            .iter()
            .map(|e| {
                format!(
                    "<tr><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td></tr>",
                    e.start.format(DISPLAY_FORMAT),
                    e.stop.format(DISPLAY_FORMAT),
                    format_duration(e),
                    escape(&e.project_name),
                    escape(&e.description)
                )
            })
            .collect();
        format!(
            r#"<table class="entry-list"><tr><th>Start</th><th>Stop</th><th>Duration</th><th>Project</th><th>Description</th></tr>{rows}</table>"#
        )
    };

    let options: Vec<(i64, String)> = projects
        .iter()
        .map(|p| (p.id, format!("{} ({})", p.name, p.client_name)))
        .collect();

    let fields = format!(
        "{}{}{}{}{}",
        non_field_errors(errors),
        input(errors, "start", "Start", "datetime-local", &entry_form.start),
        input(errors, "stop", "Stop", "datetime-local", &entry_form.stop),
        select(errors, "project", "Project", &options, &entry_form.project),
        textarea(errors, "description", "Description", &entry_form.description),
    );

    let content = format!(
        "{list}\n<h2>Log time</h2>\n{}",
        form("/entries", &fields, "Add")
    );
    layout("Entries", Some(username), &content)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::forms::parse_datetime;

    #[test]
    fn duration_is_hours_and_minutes() {
        let entry = Entry {
            id: 1,
            start: parse_datetime("2015-09-09 09:00").unwrap(),
            stop: parse_datetime("2015-09-09 10:05").unwrap(),
            project_id: 1,
            description: "x".into(),
            author_id: Some(1),
            project_name: "Website".into(),
        };
        assert_eq!(format_duration(&entry), "1:05");
    }
}
