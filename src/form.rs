// Form model and controller.
// - Records (`PersonalInfo`, `EducationEntry`, ...) are plain serde structs.
// - Each record has a matching field enum so updates are checked at compile
//   time instead of going through a field-name string.
// - `FormState` owns every section plus the active tab. The UI reads it on
//   every render and writes back only through the setters below.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::FormError;
use crate::sink::SubmissionSink;

/// The five sections of the form, in navigation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tab {
    #[default]
    Personal,
    Education,
    Experience,
    Projects,
    Skills,
}

impl Tab {
    pub const ALL: [Tab; 5] = [
        Tab::Personal,
        Tab::Education,
        Tab::Experience,
        Tab::Projects,
        Tab::Skills,
    ];

    /// Capitalized label used on the tab bar.
    pub fn label(self) -> &'static str {
        match self {
            Tab::Personal => "Personal",
            Tab::Education => "Education",
            Tab::Experience => "Experience",
            Tab::Projects => "Projects",
            Tab::Skills => "Skills",
        }
    }

    pub fn position(self) -> usize {
        Tab::ALL.iter().position(|t| *t == self).unwrap_or(0)
    }

    /// Following tab, or `None` on the last one.
    pub fn next(self) -> Option<Tab> {
        Tab::ALL.get(self.position() + 1).copied()
    }

    /// Preceding tab, or `None` on the first one.
    pub fn previous(self) -> Option<Tab> {
        self.position().checked_sub(1).map(|i| Tab::ALL[i])
    }
}

impl fmt::Display for Tab {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Display metadata shared by every field enum.
pub trait FieldMeta: Copy + fmt::Debug + PartialEq + 'static {
    /// Prompt text shown for the field, including the required marker.
    fn placeholder(self) -> &'static str;

    /// Multi-line fields are edited as text areas.
    fn multiline(self) -> bool {
        false
    }
}

/// A record whose fields are addressed through a typed field enum.
pub trait Record: Default + Clone + fmt::Debug + Serialize {
    type Field: FieldMeta;

    /// Fields in on-screen order.
    const FIELDS: &'static [Self::Field];

    fn get(&self, field: Self::Field) -> &str;

    fn set(&mut self, field: Self::Field, value: String);
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersonalInfo {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub linkedin: String,
    pub github: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PersonalField {
    Name,
    Email,
    Phone,
    Linkedin,
    Github,
}

impl PersonalField {
    /// Required fields, in the order submission checks them.
    pub const REQUIRED: [PersonalField; 3] =
        [PersonalField::Name, PersonalField::Email, PersonalField::Phone];

    pub fn is_required(self) -> bool {
        PersonalField::REQUIRED.contains(&self)
    }
}

impl FieldMeta for PersonalField {
    fn placeholder(self) -> &'static str {
        match self {
            PersonalField::Name => "Name *",
            PersonalField::Email => "Email *",
            PersonalField::Phone => "Phone *",
            PersonalField::Linkedin => "LinkedIn (optional)",
            PersonalField::Github => "GitHub (optional)",
        }
    }
}

impl Record for PersonalInfo {
    type Field = PersonalField;

    const FIELDS: &'static [PersonalField] = &[
        PersonalField::Name,
        PersonalField::Email,
        PersonalField::Phone,
        PersonalField::Linkedin,
        PersonalField::Github,
    ];

    fn get(&self, field: PersonalField) -> &str {
        match field {
            PersonalField::Name => &self.name,
            PersonalField::Email => &self.email,
            PersonalField::Phone => &self.phone,
            PersonalField::Linkedin => &self.linkedin,
            PersonalField::Github => &self.github,
        }
    }

    fn set(&mut self, field: PersonalField, value: String) {
        match field {
            PersonalField::Name => self.name = value,
            PersonalField::Email => self.email = value,
            PersonalField::Phone => self.phone = value,
            PersonalField::Linkedin => self.linkedin = value,
            PersonalField::Github => self.github = value,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EducationEntry {
    pub degree: String,
    pub institution: String,
    pub year: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EducationField {
    Degree,
    Institution,
    Year,
}

impl FieldMeta for EducationField {
    fn placeholder(self) -> &'static str {
        match self {
            EducationField::Degree => "Degree",
            EducationField::Institution => "Institution",
            EducationField::Year => "Year",
        }
    }
}

impl Record for EducationEntry {
    type Field = EducationField;

    const FIELDS: &'static [EducationField] = &[
        EducationField::Degree,
        EducationField::Institution,
        EducationField::Year,
    ];

    fn get(&self, field: EducationField) -> &str {
        match field {
            EducationField::Degree => &self.degree,
            EducationField::Institution => &self.institution,
            EducationField::Year => &self.year,
        }
    }

    fn set(&mut self, field: EducationField, value: String) {
        match field {
            EducationField::Degree => self.degree = value,
            EducationField::Institution => self.institution = value,
            EducationField::Year => self.year = value,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExperienceEntry {
    pub job_title: String,
    pub company: String,
    pub duration: String,
    pub description: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ExperienceField {
    JobTitle,
    Company,
    Duration,
    Description,
}

impl FieldMeta for ExperienceField {
    fn placeholder(self) -> &'static str {
        match self {
            ExperienceField::JobTitle => "Job Title",
            ExperienceField::Company => "Company",
            ExperienceField::Duration => "Duration",
            ExperienceField::Description => "Description",
        }
    }

    fn multiline(self) -> bool {
        self == ExperienceField::Description
    }
}

impl Record for ExperienceEntry {
    type Field = ExperienceField;

    const FIELDS: &'static [ExperienceField] = &[
        ExperienceField::JobTitle,
        ExperienceField::Company,
        ExperienceField::Duration,
        ExperienceField::Description,
    ];

    fn get(&self, field: ExperienceField) -> &str {
        match field {
            ExperienceField::JobTitle => &self.job_title,
            ExperienceField::Company => &self.company,
            ExperienceField::Duration => &self.duration,
            ExperienceField::Description => &self.description,
        }
    }

    fn set(&mut self, field: ExperienceField, value: String) {
        match field {
            ExperienceField::JobTitle => self.job_title = value,
            ExperienceField::Company => self.company = value,
            ExperienceField::Duration => self.duration = value,
            ExperienceField::Description => self.description = value,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectEntry {
    pub title: String,
    pub description: String,
    pub link: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProjectField {
    Title,
    Description,
    Link,
}

impl FieldMeta for ProjectField {
    fn placeholder(self) -> &'static str {
        match self {
            ProjectField::Title => "Project Title",
            ProjectField::Description => "Description",
            ProjectField::Link => "Project Link",
        }
    }

    fn multiline(self) -> bool {
        self == ProjectField::Description
    }
}

impl Record for ProjectEntry {
    type Field = ProjectField;

    // Link is shown before the description.
    const FIELDS: &'static [ProjectField] = &[
        ProjectField::Title,
        ProjectField::Link,
        ProjectField::Description,
    ];

    fn get(&self, field: ProjectField) -> &str {
        match field {
            ProjectField::Title => &self.title,
            ProjectField::Description => &self.description,
            ProjectField::Link => &self.link,
        }
    }

    fn set(&mut self, field: ProjectField, value: String) {
        match field {
            ProjectField::Title => self.title = value,
            ProjectField::Description => self.description = value,
            ProjectField::Link => self.link = value,
        }
    }
}

/// The aggregated structure handed to a sink on successful submission.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Resume {
    pub personal_info: PersonalInfo,
    pub education: Vec<EducationEntry>,
    pub experience: Vec<ExperienceEntry>,
    pub projects: Vec<ProjectEntry>,
    pub skills: String,
}

/// Result of a submit attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// A required field is empty; focus moved there and nothing was emitted.
    Focus(PersonalField),
    Submitted(Resume),
}

/// Holds every section of the form plus the active tab.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormState {
    tab: Tab,
    personal: PersonalInfo,
    education: Vec<EducationEntry>,
    experience: Vec<ExperienceEntry>,
    projects: Vec<ProjectEntry>,
    skills: String,
    focus: Option<PersonalField>,
}

impl Default for FormState {
    fn default() -> Self {
        Self::new()
    }
}

impl FormState {
    /// Fresh form on the Personal tab; each list holds one empty entry.
    pub fn new() -> Self {
        FormState {
            tab: Tab::Personal,
            personal: PersonalInfo::default(),
            education: vec![EducationEntry::default()],
            experience: vec![ExperienceEntry::default()],
            projects: vec![ProjectEntry::default()],
            skills: String::new(),
            focus: None,
        }
    }

    pub fn tab(&self) -> Tab {
        self.tab
    }

    pub fn personal(&self) -> &PersonalInfo {
        &self.personal
    }

    pub fn education(&self) -> &[EducationEntry] {
        &self.education
    }

    pub fn experience(&self) -> &[ExperienceEntry] {
        &self.experience
    }

    pub fn projects(&self) -> &[ProjectEntry] {
        &self.projects
    }

    pub fn skills(&self) -> &str {
        &self.skills
    }

    /// Field the last failed submit pointed at, if any.
    pub fn focus(&self) -> Option<PersonalField> {
        self.focus
    }

    /// Consume the pending focus request.
    pub fn take_focus(&mut self) -> Option<PersonalField> {
        self.focus.take()
    }

    /// Navigation is never gated on required fields.
    pub fn select_tab(&mut self, tab: Tab) {
        if self.tab != tab {
            tracing::debug!(from = %self.tab, to = %tab, "tab selected");
        }
        self.tab = tab;
    }

    /// Move to the following tab; stays put on the last one.
    pub fn next_tab(&mut self) -> Tab {
        if let Some(tab) = self.tab.next() {
            self.select_tab(tab);
        }
        self.tab
    }

    /// Move to the preceding tab; stays put on the first one.
    pub fn previous_tab(&mut self) -> Tab {
        if let Some(tab) = self.tab.previous() {
            self.select_tab(tab);
        }
        self.tab
    }

    /// Education entry at `index`, or `EntryOutOfRange`.
    pub fn education_entry(&self, index: usize) -> Result<&EducationEntry, FormError> {
        entry_at(&self.education, Tab::Education, index)
    }

    pub fn experience_entry(&self, index: usize) -> Result<&ExperienceEntry, FormError> {
        entry_at(&self.experience, Tab::Experience, index)
    }

    pub fn project_entry(&self, index: usize) -> Result<&ProjectEntry, FormError> {
        entry_at(&self.projects, Tab::Projects, index)
    }

    pub fn set_personal(&mut self, field: PersonalField, value: impl Into<String>) {
        tracing::debug!(?field, "personal field updated");
        self.personal.set(field, value.into());
    }

    pub fn set_education(
        &mut self,
        index: usize,
        field: EducationField,
        value: impl Into<String>,
    ) -> Result<(), FormError> {
        set_entry(&mut self.education, Tab::Education, index, field, value.into())
    }

    pub fn set_experience(
        &mut self,
        index: usize,
        field: ExperienceField,
        value: impl Into<String>,
    ) -> Result<(), FormError> {
        set_entry(&mut self.experience, Tab::Experience, index, field, value.into())
    }

    pub fn set_project(
        &mut self,
        index: usize,
        field: ProjectField,
        value: impl Into<String>,
    ) -> Result<(), FormError> {
        set_entry(&mut self.projects, Tab::Projects, index, field, value.into())
    }

    pub fn set_skills(&mut self, value: impl Into<String>) {
        tracing::debug!("skills updated");
        self.skills = value.into();
    }

    /// Append an empty education entry and return its index.
    pub fn append_education(&mut self) -> usize {
        append_entry(&mut self.education, Tab::Education)
    }

    pub fn append_experience(&mut self) -> usize {
        append_entry(&mut self.experience, Tab::Experience)
    }

    pub fn append_project(&mut self) -> usize {
        append_entry(&mut self.projects, Tab::Projects)
    }

    /// Copy of the whole form as it would be submitted.
    pub fn snapshot(&self) -> Resume {
        Resume {
            personal_info: self.personal.clone(),
            education: self.education.clone(),
            experience: self.experience.clone(),
            projects: self.projects.clone(),
            skills: self.skills.clone(),
        }
    }

    /// Check name, email and phone in that order. The first empty one gets
    /// focus and the submit is dropped; otherwise the full form is returned.
    pub fn submit(&mut self) -> SubmitOutcome {
        let missing = PersonalField::REQUIRED
            .into_iter()
            .find(|field| self.personal.get(*field).is_empty());

        match missing {
            Some(field) => {
                tracing::debug!(?field, "submit blocked on empty required field");
                self.focus = Some(field);
                SubmitOutcome::Focus(field)
            }
            None => {
                self.focus = None;
                SubmitOutcome::Submitted(self.snapshot())
            }
        }
    }

    /// `submit`, then hand a successful result to `sink` exactly once.
    pub fn submit_to(&mut self, sink: &mut dyn SubmissionSink) -> anyhow::Result<SubmitOutcome> {
        let outcome = self.submit();
        if let SubmitOutcome::Submitted(resume) = &outcome {
            sink.submit(resume)?;
        }
        Ok(outcome)
    }
}

fn entry_at<R: Record>(entries: &[R], section: Tab, index: usize) -> Result<&R, FormError> {
    entries.get(index).ok_or(FormError::EntryOutOfRange {
        section,
        index,
        len: entries.len(),
    })
}

fn set_entry<R: Record>(
    entries: &mut [R],
    section: Tab,
    index: usize,
    field: R::Field,
    value: String,
) -> Result<(), FormError> {
    let len = entries.len();
    let entry = entries
        .get_mut(index)
        .ok_or(FormError::EntryOutOfRange { section, index, len })?;
    tracing::debug!(%section, index, ?field, "entry field updated");
    entry.set(field, value);
    Ok(())
}

fn append_entry<R: Record>(entries: &mut Vec<R>, section: Tab) -> usize {
    entries.push(R::default());
    let index = entries.len() - 1;
    tracing::debug!(%section, index, "entry appended");
    index
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use pretty_assertions::assert_eq;

    fn filled_required() -> FormState {
        let mut form = FormState::new();
        form.set_personal(PersonalField::Name, "Ada Lovelace");
        form.set_personal(PersonalField::Email, "ada@example.com");
        form.set_personal(PersonalField::Phone, "555-0100");
        form
    }

    #[test]
    fn new_form_has_one_empty_entry_per_list() {
        let form = FormState::new();
        assert_eq!(form.tab(), Tab::Personal);
        assert_eq!(form.education(), &[EducationEntry::default()]);
        assert_eq!(form.experience(), &[ExperienceEntry::default()]);
        assert_eq!(form.projects(), &[ProjectEntry::default()]);
        assert_eq!(form.skills(), "");
        assert_eq!(form.focus(), None);
    }

    #[test]
    fn tab_navigation_saturates_at_both_ends() {
        let mut form = FormState::new();
        assert_eq!(form.previous_tab(), Tab::Personal);
        for expected in &Tab::ALL[1..] {
            assert_eq!(form.next_tab(), *expected);
        }
        assert_eq!(form.next_tab(), Tab::Skills);
        assert_eq!(form.previous_tab(), Tab::Projects);
    }

    #[test]
    fn selecting_a_tab_leaves_form_data_alone() {
        let mut form = filled_required();
        form.set_skills("rust, sql");
        let before = form.snapshot();
        for tab in Tab::ALL.into_iter().rev() {
            form.select_tab(tab);
            assert_eq!(form.tab(), tab);
            assert_eq!(form.snapshot(), before);
        }
    }

    #[test]
    fn setters_touch_only_the_target_field() {
        let mut form = FormState::new();
        form.append_education();
        form.set_education(1, EducationField::Institution, "MIT").unwrap();

        assert_eq!(form.education()[0], EducationEntry::default());
        assert_eq!(
            form.education()[1],
            EducationEntry {
                institution: "MIT".into(),
                ..Default::default()
            }
        );
    }

    #[test]
    fn experience_and_project_setters_touch_only_the_target_field() {
        let mut form = FormState::new();
        form.append_experience();
        form.append_project();
        form.set_experience(1, ExperienceField::Duration, "2 years").unwrap();
        form.set_project(0, ProjectField::Link, "https://example.com").unwrap();

        assert_eq!(form.experience()[0], ExperienceEntry::default());
        assert_eq!(
            form.experience()[1],
            ExperienceEntry {
                duration: "2 years".into(),
                ..Default::default()
            }
        );
        assert_eq!(
            form.projects()[0],
            ProjectEntry {
                link: "https://example.com".into(),
                ..Default::default()
            }
        );
        assert_eq!(form.projects()[1], ProjectEntry::default());
        assert_eq!(form.education(), &[EducationEntry::default()]);
    }

    #[test]
    fn appends_grow_only_their_own_list() {
        let mut form = FormState::new();
        form.set_experience(0, ExperienceField::Company, "Acme").unwrap();
        form.set_project(0, ProjectField::Title, "Engine").unwrap();

        for expected in 2..=3 {
            assert_eq!(form.append_experience(), expected - 1);
            assert_eq!(form.experience().len(), expected);
            assert_eq!(form.experience()[0].company, "Acme");
            assert_eq!(form.projects().len(), 1);
        }
        for expected in 2..=3 {
            assert_eq!(form.append_project(), expected - 1);
            assert_eq!(form.projects().len(), expected);
            assert_eq!(form.projects()[0].title, "Engine");
            assert_eq!(form.experience().len(), 3);
        }
        assert_eq!(form.education().len(), 1);
    }

    #[test]
    fn checked_entry_getters_report_out_of_range() {
        let mut form = FormState::new();
        form.append_project();
        assert_eq!(form.project_entry(1), Ok(&ProjectEntry::default()));
        assert_eq!(
            form.education_entry(2),
            Err(FormError::EntryOutOfRange {
                section: Tab::Education,
                index: 2,
                len: 1
            })
        );
        assert_matches!(
            form.experience_entry(1),
            Err(FormError::EntryOutOfRange { index: 1, .. })
        );
    }

    #[test]
    fn appended_entries_do_not_alias() {
        let mut form = FormState::new();
        form.append_project();
        form.set_project(0, ProjectField::Title, "first").unwrap();
        form.set_project(1, ProjectField::Title, "second").unwrap();
        assert_eq!(form.projects()[0].title, "first");
        assert_eq!(form.projects()[1].title, "second");
    }

    #[test]
    fn out_of_range_index_is_rejected_without_mutation() {
        let mut form = FormState::new();
        let before = form.clone();
        let err = form
            .set_experience(3, ExperienceField::Company, "Acme")
            .unwrap_err();
        assert_eq!(
            err,
            FormError::EntryOutOfRange {
                section: Tab::Experience,
                index: 3,
                len: 1
            }
        );
        assert_eq!(form, before);
    }

    #[test]
    fn input_is_stored_verbatim() {
        let mut form = FormState::new();
        form.set_personal(PersonalField::Name, "  Grace  ");
        form.set_skills(" a ,b,, c ");
        assert_eq!(form.personal().name, "  Grace  ");
        assert_eq!(form.skills(), " a ,b,, c ");
    }

    #[test]
    fn submit_checks_required_fields_in_order() {
        let mut form = FormState::new();
        form.set_personal(PersonalField::Phone, "555");
        assert_matches!(form.submit(), SubmitOutcome::Focus(PersonalField::Name));
        assert_eq!(form.focus(), Some(PersonalField::Name));

        form.set_personal(PersonalField::Name, "Ada");
        assert_matches!(form.submit(), SubmitOutcome::Focus(PersonalField::Email));

        form.set_personal(PersonalField::Email, "ada@example.com");
        form.set_personal(PersonalField::Phone, "");
        assert_matches!(form.submit(), SubmitOutcome::Focus(PersonalField::Phone));
    }

    #[test]
    fn whitespace_counts_as_present() {
        let mut form = FormState::new();
        form.set_personal(PersonalField::Name, " ");
        form.set_personal(PersonalField::Email, " ");
        form.set_personal(PersonalField::Phone, " ");
        assert_matches!(form.submit(), SubmitOutcome::Submitted(_));
    }

    #[test]
    fn successful_submit_clears_focus_and_returns_everything() {
        let mut form = filled_required();
        form.set_personal(PersonalField::Name, "");
        form.submit();
        assert_eq!(form.take_focus(), Some(PersonalField::Name));
        assert_eq!(form.focus(), None);

        form.submit();
        form.set_personal(PersonalField::Name, "Ada");
        let resume = assert_matches!(form.submit(), SubmitOutcome::Submitted(r) => r);
        assert_eq!(form.focus(), None);
        assert_eq!(resume, form.snapshot());
        assert_eq!(resume.personal_info.linkedin, "");
    }

    #[test]
    fn required_markers_follow_placeholders() {
        for field in PersonalInfo::FIELDS {
            assert_eq!(field.is_required(), field.placeholder().ends_with('*'));
        }
    }

    #[test]
    fn multiline_fields_are_descriptions() {
        assert!(ExperienceField::Description.multiline());
        assert!(ProjectField::Description.multiline());
        assert!(!ProjectField::Link.multiline());
        assert!(!PersonalField::Name.multiline());
    }
}
