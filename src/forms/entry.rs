use serde::Deserialize;

use super::{choice, required_datetime, required_text, FormErrors};
use crate::models::NewEntry;

pub const DESCRIPTION_MAX_LEN: usize = 1000;
pub const STOP_BEFORE_START: &str = "Stop time cannot be before start time.";

#[derive(Debug, Default, Clone, Deserialize)]
#[serde(default)]
pub struct EntryForm {
    pub start: String,
    pub stop: String,
    pub project: String,
    pub description: String,
}

impl EntryForm {
    /// `project_ids` are the projects the submitting user may pick.
    pub fn validate(&self, project_ids: &[i64]) -> Result<NewEntry, FormErrors> {
        let mut errors = FormErrors::default();
        let start = required_datetime(&mut errors, "start", &self.start);
        let stop = required_datetime(&mut errors, "stop", &self.stop);
        let project_id = choice(&mut errors, "project", &self.project, project_ids);
        let description = required_text(
            &mut errors,
            "description",
            &self.description,
            DESCRIPTION_MAX_LEN,
        );

        if let (Some(start), Some(stop)) = (start, stop) {
            if stop < start {
                errors.add("stop", STOP_BEFORE_START);
            }
        }

        match (start, stop, project_id, description) {
            (Some(start), Some(stop), Some(project_id), Some(description)) if errors.is_empty() => {
                Ok(NewEntry {
                    start,
                    stop,
                    project_id,
                    description,
                })
            }
            _ => Err(errors),
        }
    }
}
