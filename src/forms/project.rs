use serde::Deserialize;

use super::{choice, required_text, FormErrors};
use crate::models::{NewProject, Project};

pub const NAME_MAX_LEN: usize = 200;

#[derive(Debug, Default, Clone, Deserialize)]
#[serde(default)]
pub struct ProjectForm {
    pub name: String,
    pub client: String,
}

impl ProjectForm {
    /// `client_ids` are the clients the submitting user may pick.
    pub fn validate(&self, client_ids: &[i64]) -> Result<NewProject, FormErrors> {
        let mut errors = FormErrors::default();
        let name = required_text(&mut errors, "name", &self.name, NAME_MAX_LEN);
        let client_id = choice(&mut errors, "client", &self.client, client_ids);

        errors.finish(|| NewProject {
            name: name.unwrap_or_default(),
            client_id: client_id.unwrap_or_default(),
        })
    }
}

impl From<&Project> for ProjectForm {
    fn from(project: &Project) -> Self {
        Self {
            name: project.name.clone(),
            client: project.client_id.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::forms::{INVALID_CHOICE, REQUIRED};

    #[test]
    fn accepts_an_owned_client() {
        let form = ProjectForm {
            name: "Website".into(),
            client: "7".into(),
        };
        assert_eq!(
            form.validate(&[3, 7]).unwrap(),
            NewProject {
                name: "Website".into(),
                client_id: 7
            }
        );
    }

    #[test]
    fn reports_every_bad_field() {
        let form = ProjectForm {
            name: "".into(),
            client: "9".into(),
        };
        let errors = form.validate(&[3, 7]).unwrap_err();
        assert_eq!(errors.field("name"), [REQUIRED]);
        assert_eq!(errors.field("client"), [INVALID_CHOICE]);
    }
}
