// UI layer: renders the active tab and runs a keyboard-driven action menu
// using `dialoguer`. Form data lives only in `FormState`; this module reads
// it to draw and writes back through the typed setters.
//
// Prompting goes through the `Prompt` trait so the loop can be driven by a
// scripted implementation in tests.

use std::io::{stdout, Write};

use anyhow::{Context, Result};
use crossterm::cursor::MoveTo;
use crossterm::execute;
use crossterm::style::{style, Stylize};
use crossterm::terminal::{Clear, ClearType};
use dialoguer::{Confirm, Editor, Input, Select};

use crate::form::{
    EducationEntry, EducationField, ExperienceEntry, ExperienceField, FieldMeta, FormState,
    PersonalField, PersonalInfo, ProjectEntry, ProjectField, Record, SubmitOutcome, Tab,
};
use crate::sink::SubmissionSink;

const TITLE: &str = "Resume Builder";
const SKILLS_PLACEHOLDER: &str = "List your skills separated by commas";

/// One entry of the action menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    EditPersonal(PersonalField),
    EditEducation(usize, EducationField),
    EditExperience(usize, ExperienceField),
    EditProject(usize, ProjectField),
    EditSkills,
    AddEntry,
    Back,
    Next,
    JumpTo,
    Submit,
    Quit,
}

/// Terminal interaction needed by the form loop.
pub trait Prompt {
    /// Single-line text input pre-filled with `initial`.
    fn line(&mut self, label: &str, initial: &str) -> Result<String>;

    /// Multi-line text input pre-filled with `initial`.
    fn text(&mut self, label: &str, initial: &str) -> Result<String>;

    /// Pick one of `items`; `None` when the user cancels.
    fn choose(&mut self, prompt: &str, items: &[String], default: usize) -> Result<Option<usize>>;

    fn confirm(&mut self, prompt: &str) -> Result<bool>;

    /// Draw the current screen.
    fn show(&mut self, screen: &str) -> Result<()>;

    fn notify(&mut self, message: &str) -> Result<()>;
}

/// `Prompt` backed by `dialoguer` and `crossterm` on the real terminal.
#[derive(Debug, Default)]
pub struct TerminalPrompt {
    use_editor: bool,
}

impl TerminalPrompt {
    /// Text areas open `$VISUAL`/`$EDITOR` when one is set.
    pub fn new() -> Self {
        let use_editor = ["VISUAL", "EDITOR"]
            .iter()
            .any(|key| std::env::var(key).map(|v| !v.is_empty()).unwrap_or(false));
        TerminalPrompt { use_editor }
    }
}

impl Prompt for TerminalPrompt {
    fn line(&mut self, label: &str, initial: &str) -> Result<String> {
        let value: String = Input::new()
            .with_prompt(label)
            .with_initial_text(initial)
            .allow_empty(true)
            .interact_text()?;
        Ok(value)
    }

    fn text(&mut self, label: &str, initial: &str) -> Result<String> {
        if !self.use_editor {
            return self.line(label, initial);
        }
        // Closing the editor without saving keeps the old value.
        let edited = Editor::new()
            .edit(initial)
            .with_context(|| format!("Failed to open editor for {}", label))?;
        Ok(edited.unwrap_or_else(|| initial.to_string()))
    }

    fn choose(&mut self, prompt: &str, items: &[String], default: usize) -> Result<Option<usize>> {
        let selection = Select::new()
            .with_prompt(prompt)
            .items(items)
            .default(default)
            .interact_opt()?;
        Ok(selection)
    }

    fn confirm(&mut self, prompt: &str) -> Result<bool> {
        Ok(Confirm::new().with_prompt(prompt).default(false).interact()?)
    }

    fn show(&mut self, screen: &str) -> Result<()> {
        let mut out = stdout();
        execute!(out, Clear(ClearType::All), MoveTo(0, 0)).context("Failed to clear terminal")?;
        let mut lines = screen.lines();
        if let Some(title) = lines.next() {
            writeln!(out, "{}", style(title).bold())?;
        }
        for line in lines {
            writeln!(out, "{}", line)?;
        }
        out.flush()?;
        Ok(())
    }

    fn notify(&mut self, message: &str) -> Result<()> {
        println!("{}", style(message).green());
        Ok(())
    }
}

/// Run the form until the user quits. Blocks on terminal input.
pub fn run(form: &mut FormState, prompt: &mut dyn Prompt, sink: &mut dyn SubmissionSink) -> Result<()> {
    // Printed under the next screen so the clear does not wipe it.
    let mut notice: Option<String> = None;
    loop {
        prompt.show(&render(form))?;
        if let Some(message) = notice.take() {
            prompt.notify(&message)?;
        }

        let actions = actions(form);
        let labels: Vec<String> = actions.iter().map(|a| action_label(form, *a)).collect();
        let default = actions.iter().position(|a| *a == Action::Next).unwrap_or(0);
        // Esc, or an index outside the menu, behaves like Quit.
        let action = prompt
            .choose("Action", &labels, default)?
            .and_then(|i| actions.get(i).copied())
            .unwrap_or(Action::Quit);

        if action == Action::Quit {
            if prompt.confirm("Discard the form and quit?")? {
                tracing::info!("form closed without further submission");
                return Ok(());
            }
            continue;
        }
        notice = perform(form, action, prompt, sink)?;
    }
}

/// Apply one menu action to the form. Returns a message for the user, if
/// the action produced one.
pub fn perform(
    form: &mut FormState,
    action: Action,
    prompt: &mut dyn Prompt,
    sink: &mut dyn SubmissionSink,
) -> Result<Option<String>> {
    match action {
        Action::EditPersonal(field) => edit_personal(form, field, prompt)?,
        Action::EditEducation(index, field) => {
            let value = edit_value(prompt, field, form.education_entry(index)?.get(field))?;
            form.set_education(index, field, value)?;
        }
        Action::EditExperience(index, field) => {
            let value = edit_value(prompt, field, form.experience_entry(index)?.get(field))?;
            form.set_experience(index, field, value)?;
        }
        Action::EditProject(index, field) => {
            let value = edit_value(prompt, field, form.project_entry(index)?.get(field))?;
            form.set_project(index, field, value)?;
        }
        Action::EditSkills => {
            let value = prompt.text(SKILLS_PLACEHOLDER, form.skills())?;
            form.set_skills(value);
        }
        Action::AddEntry => match form.tab() {
            Tab::Education => {
                form.append_education();
            }
            Tab::Experience => {
                form.append_experience();
            }
            Tab::Projects => {
                form.append_project();
            }
            Tab::Personal | Tab::Skills => {}
        },
        Action::Back => {
            form.previous_tab();
        }
        Action::Next => {
            form.next_tab();
        }
        Action::JumpTo => {
            let labels: Vec<String> = Tab::ALL.iter().map(|t| t.label().to_string()).collect();
            let picked = prompt.choose("Go to", &labels, form.tab().position())?;
            if let Some(tab) = picked.and_then(|i| Tab::ALL.get(i).copied()) {
                form.select_tab(tab);
            }
        }
        Action::Submit => match form.submit_to(sink) {
            Ok(SubmitOutcome::Submitted(_)) => return Ok(Some("Resume submitted.".into())),
            Ok(SubmitOutcome::Focus(_)) => {
                // Move the cursor to the missing field; no message.
                if let Some(field) = form.take_focus() {
                    form.select_tab(Tab::Personal);
                    prompt.show(&render(form))?;
                    edit_personal(form, field, prompt)?;
                }
            }
            // The form stays open so nothing typed so far is lost.
            Err(e) => {
                tracing::warn!(error = %format!("{:#}", e), "submission failed");
                return Ok(Some(format!("Submit failed: {:#}", e)));
            }
        },
        Action::Quit => {}
    }
    Ok(None)
}

fn edit_personal(form: &mut FormState, field: PersonalField, prompt: &mut dyn Prompt) -> Result<()> {
    let value = edit_value(prompt, field, form.personal().get(field))?;
    form.set_personal(field, value);
    Ok(())
}

fn edit_value<F: FieldMeta>(prompt: &mut dyn Prompt, field: F, current: &str) -> Result<String> {
    if field.multiline() {
        prompt.text(field.placeholder(), current)
    } else {
        prompt.line(field.placeholder(), current)
    }
}

/// Menu entries for the active tab, in display order.
pub fn actions(form: &FormState) -> Vec<Action> {
    let mut actions = Vec::new();
    match form.tab() {
        Tab::Personal => {
            actions.extend(PersonalInfo::FIELDS.iter().map(|f| Action::EditPersonal(*f)));
        }
        Tab::Education => {
            for index in 0..form.education().len() {
                actions.extend(
                    EducationEntry::FIELDS
                        .iter()
                        .map(|f| Action::EditEducation(index, *f)),
                );
            }
            actions.push(Action::AddEntry);
        }
        Tab::Experience => {
            for index in 0..form.experience().len() {
                actions.extend(
                    ExperienceEntry::FIELDS
                        .iter()
                        .map(|f| Action::EditExperience(index, *f)),
                );
            }
            actions.push(Action::AddEntry);
        }
        Tab::Projects => {
            for index in 0..form.projects().len() {
                actions.extend(
                    ProjectEntry::FIELDS
                        .iter()
                        .map(|f| Action::EditProject(index, *f)),
                );
            }
            actions.push(Action::AddEntry);
        }
        Tab::Skills => actions.push(Action::EditSkills),
    }

    if form.tab().previous().is_some() {
        actions.push(Action::Back);
    }
    if form.tab().next().is_some() {
        actions.push(Action::Next);
    } else {
        actions.push(Action::Submit);
    }
    actions.push(Action::JumpTo);
    actions.push(Action::Quit);
    actions
}

/// Text shown for an action in the menu.
pub fn action_label(form: &FormState, action: Action) -> String {
    match action {
        Action::EditPersonal(f) => field_label(f, form.personal().get(f)),
        Action::EditEducation(i, f) => {
            entry_label("Education", i, f, form.education_entry(i).map_or("", |e| e.get(f)))
        }
        Action::EditExperience(i, f) => {
            entry_label("Experience", i, f, form.experience_entry(i).map_or("", |e| e.get(f)))
        }
        Action::EditProject(i, f) => {
            entry_label("Project", i, f, form.project_entry(i).map_or("", |e| e.get(f)))
        }
        Action::EditSkills => field_value_label(SKILLS_PLACEHOLDER, form.skills()),
        Action::AddEntry => match form.tab() {
            Tab::Education => "Add Education".into(),
            Tab::Experience => "Add Experience".into(),
            Tab::Projects => "Add Project".into(),
            Tab::Personal | Tab::Skills => String::new(),
        },
        Action::Back => "Back".into(),
        Action::Next => "Next".into(),
        Action::JumpTo => "Jump to tab...".into(),
        Action::Submit => "Submit".into(),
        Action::Quit => "Quit".into(),
    }
}

fn field_label<F: FieldMeta>(field: F, value: &str) -> String {
    field_value_label(field.placeholder(), value)
}

fn entry_label<F: FieldMeta>(card: &str, index: usize, field: F, value: &str) -> String {
    field_value_label(&format!("{} {} / {}", card, index + 1, field.placeholder()), value)
}

fn field_value_label(label: &str, value: &str) -> String {
    format!("{:<28} {}", label, preview(value))
}

/// First line of `value`, shortened for the menu.
fn preview(value: &str) -> String {
    const MAX: usize = 40;
    let first = value.lines().next().unwrap_or("");
    let mut out: String = first.chars().take(MAX).collect();
    if first.chars().count() > MAX || value.lines().count() > 1 {
        out.push_str("...");
    }
    out
}

/// Full screen for the active tab: title, tab bar, then the section cards.
pub fn render(form: &FormState) -> String {
    let mut out = String::new();
    out.push_str(TITLE);
    out.push('\n');
    out.push_str(&tab_bar(form.tab()));
    out.push_str("\n\n");

    match form.tab() {
        Tab::Personal => render_card(&mut out, "Personal Information", form.personal()),
        Tab::Education => {
            for (i, entry) in form.education().iter().enumerate() {
                render_card(&mut out, &format!("Education {}", i + 1), entry);
            }
        }
        Tab::Experience => {
            for (i, entry) in form.experience().iter().enumerate() {
                render_card(&mut out, &format!("Experience {}", i + 1), entry);
            }
        }
        Tab::Projects => {
            for (i, entry) in form.projects().iter().enumerate() {
                render_card(&mut out, &format!("Project {}", i + 1), entry);
            }
        }
        Tab::Skills => {
            out.push_str("Skills\n");
            out.push_str(&format!("  {}\n", display_value(form.skills(), SKILLS_PLACEHOLDER)));
        }
    }
    out
}

/// Active tab in brackets, the rest padded to line up.
fn tab_bar(active: Tab) -> String {
    Tab::ALL
        .iter()
        .map(|t| {
            if *t == active {
                format!("[{}]", t.label())
            } else {
                format!(" {} ", t.label())
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

fn render_card<R: Record>(out: &mut String, heading: &str, record: &R) {
    out.push_str(heading);
    out.push('\n');
    for field in R::FIELDS {
        let value = record.get(*field);
        if field.multiline() && value.lines().count() > 1 {
            out.push_str(&format!("  {}:\n", field.placeholder()));
            for line in value.lines() {
                out.push_str(&format!("    {}\n", line));
            }
        } else {
            out.push_str(&format!("  {:<22} {}\n", field.placeholder(), value));
        }
    }
    out.push('\n');
}

fn display_value<'a>(value: &'a str, placeholder: &'a str) -> &'a str {
    if value.is_empty() {
        placeholder
    } else {
        value
    }
}
