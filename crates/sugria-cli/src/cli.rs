//! Command handlers: run one parsed command against the portal and render
//! the result.

use std::{collections::BTreeMap, path::Path};

use anyhow::{bail, Context, Result};
use log::debug;
use serde_json::Value;
use sugria_core::{
    display::{
        ApplicationTable, DeleteResult, Drafts, MemberTable, OperationStatus, RecordReview,
        SubmitResult,
    },
    models::{Collection, FormKind},
    params::{FetchDocument, FillSection},
    Portal,
};

use crate::{
    args::{AdminCommands, FillArgs, FormCommands, RecordCommands},
    renderer::TerminalRenderer,
};

pub struct Cli {
    portal: Portal,
    renderer: TerminalRenderer,
}

/// Answers file contents as raw text per field. Numbers and booleans are
/// accepted and turned into their text form.
fn read_answers(path: &Path) -> Result<BTreeMap<String, String>> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read answers file {}", path.display()))?;
    let value: Value = serde_json::from_str(&text)
        .with_context(|| format!("Answers file {} is not valid JSON", path.display()))?;
    let Value::Object(map) = value else {
        bail!("Answers file must contain a JSON object of field answers");
    };

    map.into_iter()
        .map(|(field, value)| {
            let text = match value {
                Value::String(s) => s,
                Value::Null => String::new(),
                Value::Bool(b) => b.to_string(),
                Value::Number(n) => n.to_string(),
                other => bail!("Answer for '{field}' must be text, a number or a boolean, got {other}"),
            };
            Ok((field, text))
        })
        .collect()
}

impl Cli {
    pub fn new(portal: Portal, renderer: TerminalRenderer) -> Self {
        Self { portal, renderer }
    }

    fn status(&self, message: impl Into<String>) -> Result<()> {
        self.renderer
            .render(&OperationStatus::success(message).to_string())
    }

    pub async fn list_drafts(&self) -> Result<()> {
        let drafts = self.portal.list_forms().await?;
        self.renderer.render(&Drafts(drafts).to_string())
    }

    pub async fn handle_form_command(&self, kind: FormKind, command: FormCommands) -> Result<()> {
        debug!("Running {kind} form command");
        let view = match command {
            FormCommands::Start(args) => self.portal.start_form(&args.into_params(kind)).await?,
            FormCommands::Show => self.portal.show_form(kind).await?,
            FormCommands::Review => {
                let wizard = self.portal.load_form(kind).await?;
                return self.renderer.render(&RecordReview(&wizard).to_string());
            }
            FormCommands::Set(args) => self.portal.set_field(&args.into_params(kind)).await?,
            FormCommands::Attach(args) => {
                self.portal.attach_file(&args.into_params(kind)).await?
            }
            FormCommands::Detach(args) => {
                self.portal.detach_file(&args.into_params(kind)).await?
            }
            FormCommands::Fill(FillArgs { section, file }) => {
                let values = read_answers(&file)?;
                self.portal
                    .fill_section(&FillSection {
                        kind,
                        section,
                        values,
                    })
                    .await?
            }
            FormCommands::Next => self.portal.next_step(kind).await?,
            FormCommands::Back => self.portal.prev_step(kind).await?,
            FormCommands::Submit => {
                let outcome = self.portal.submit_form(kind).await?;
                return self.renderer.render(&SubmitResult(outcome).to_string());
            }
            FormCommands::Reset => self.portal.reset_form(kind).await?,
            FormCommands::Discard => {
                return if self.portal.discard_form(kind).await? {
                    self.status(format!("Discarded the {kind} form in progress"))
                } else {
                    self.status(format!("No {kind} form in progress"))
                };
            }
        };
        self.renderer.render(&view.to_string())
    }

    pub async fn handle_admin_command(&self, command: AdminCommands) -> Result<()> {
        match command {
            AdminCommands::Login(args) => {
                let session = self.portal.login(&args.into()).await?;
                self.renderer.render(&session.to_string())
            }
            AdminCommands::Logout => match self.portal.logout().await? {
                Some(session) => self.status(format!("Signed out {}", session.email)),
                None => self.status("Not signed in"),
            },
            AdminCommands::Whoami => match self.portal.session().await?.current() {
                Some(session) => self.renderer.render(&session.to_string()),
                None => self.renderer.render("Not signed in.\n"),
            },
            AdminCommands::Stats => {
                let stats = self.portal.dashboard().await?;
                self.renderer.render(&stats.to_string())
            }
            AdminCommands::Members { command } => {
                self.handle_records(Collection::Members, command).await
            }
            AdminCommands::Applications { command } => {
                self.handle_records(Collection::Applications, command).await
            }
            AdminCommands::Document(args) => {
                if args.download {
                    let params = FetchDocument::from(args);
                    let path = self.portal.download_document(&params).await?;
                    self.status(format!("Saved {}", path.display()))
                } else {
                    let url = self
                        .portal
                        .document_url(&args.id, args.document.into())
                        .await?;
                    self.renderer.render(&format!("{url}\n"))
                }
            }
        }
    }

    async fn handle_records(&self, collection: Collection, command: RecordCommands) -> Result<()> {
        match (collection, command) {
            (Collection::Members, RecordCommands::List(args)) => {
                let page = self
                    .portal
                    .list_members(&args.into_params(collection))
                    .await?;
                self.renderer.render(&MemberTable(page).to_string())
            }
            (Collection::Applications, RecordCommands::List(args)) => {
                let page = self
                    .portal
                    .list_applications(&args.into_params(collection))
                    .await?;
                self.renderer.render(&ApplicationTable(page).to_string())
            }
            (Collection::Members, RecordCommands::Show { id }) => {
                let member = self.portal.show_member(&id).await?;
                self.renderer.render(&member.to_string())
            }
            (Collection::Applications, RecordCommands::Show { id }) => {
                let application = self.portal.show_application(&id).await?;
                self.renderer.render(&application.to_string())
            }
            (_, RecordCommands::Delete(args)) => {
                let deleted = self
                    .portal
                    .delete_record(&args.into_params(collection))
                    .await?;
                self.renderer.render(&DeleteResult(deleted).to_string())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_answers_accepts_scalars() {
        let temp_dir = tempfile::TempDir::new().expect("Failed to create temp dir");
        let path = temp_dir.path().join("farm.json");
        std::fs::write(
            &path,
            r#"{"location": "Jos", "size": 2.5, "irrigated": true, "notes": null}"#,
        )
        .expect("Failed to write answers");

        let answers = read_answers(&path).expect("Failed to read answers");
        assert_eq!(answers["location"], "Jos");
        assert_eq!(answers["size"], "2.5");
        assert_eq!(answers["irrigated"], "true");
        assert_eq!(answers["notes"], "");
    }

    #[test]
    fn test_read_answers_rejects_nested_values() {
        let temp_dir = tempfile::TempDir::new().expect("Failed to create temp dir");
        let path = temp_dir.path().join("bad.json");
        std::fs::write(&path, r#"{"personal": {"email": "a@b.co"}}"#)
            .expect("Failed to write answers");
        assert!(read_answers(&path).is_err());

        std::fs::write(&path, r#"["not", "an", "object"]"#).expect("Failed to write answers");
        assert!(read_answers(&path).is_err());
    }
}
