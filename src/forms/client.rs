use serde::Deserialize;

use super::{required_text, FormErrors};
use crate::models::{Client, NewClient};

pub const NAME_MAX_LEN: usize = 200;

#[derive(Debug, Default, Clone, Deserialize)]
#[serde(default)]
pub struct ClientForm {
    pub name: String,
}

impl ClientForm {
    pub fn validate(&self) -> Result<NewClient, FormErrors> {
        let mut errors = FormErrors::default();
        let name = required_text(&mut errors, "name", &self.name, NAME_MAX_LEN);

        errors.finish(|| NewClient {
            name: name.unwrap_or_default(),
        })
    }
}

impl From<&Client> for ClientForm {
    fn from(client: &Client) -> Self {
        Self {
            name: client.name.clone(),
        }
    }
}
